// Copyright (c) 2025 - Cowboy AI, Inc.
//! Exported topology
//!
//! A validated [`Topology`] serializes to JSON with stable field names:
//!
//! - topology: `name`, `nodes`, `switches`, `links`
//! - device: `name`, `image`, `os`, `firmware`, `cpu.cores`, `memory.capacity`
//!   (bytes), `mounts[].source`, `mounts[].point`, plus inline flags
//! - link: `endpoints[].device`, `endpoints[].port`, `boot`, `mac`, plus inline
//!   flags
//!
//! Optional fields are omitted when absent. Loading an export goes back
//! through the evaluator, so a loaded topology has been validated again.

use crate::assembly::Topology;
use crate::config::{AssemblyOptions, EvaluationContext};
use crate::description::{evaluate_with, TopologyDescription};
use crate::errors::ExportError;

/// Structured value tree for consumers that do not want a string
pub fn to_value(topology: &Topology) -> Result<serde_json::Value, ExportError> {
    Ok(serde_json::to_value(topology)?)
}

pub fn to_json(topology: &Topology) -> Result<String, ExportError> {
    Ok(serde_json::to_string(topology)?)
}

pub fn to_json_pretty(topology: &Topology) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(topology)?)
}

/// Load an exported topology, validating it again
///
/// Mount sources in an export are absolute, so no working directory is
/// needed.
pub fn from_json(json: &str) -> Result<Topology, ExportError> {
    from_json_with(json, AssemblyOptions::default())
}

pub fn from_json_with(json: &str, options: AssemblyOptions) -> Result<Topology, ExportError> {
    let description = TopologyDescription::from_json(json)?;
    Ok(evaluate_with(&description, &EvaluationContext::root(), options)?)
}
