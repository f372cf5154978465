// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests Module
//!
//! Properties of memory unit conversion and topology assembly.

mod assembly;
mod units;
