// Copyright (c) 2025 - Cowboy AI, Inc.
//! Topology Domain Models
//!
//! Value objects and records that make up an emulated testbed, each validated
//! on construction.
//!
//! # Value Objects with Invariants
//!
//! - [`ByteSize`] - Canonical memory byte count, built by [`units::mb`] / [`units::gb`]
//! - [`DeviceName`] - Host identifier grammar
//! - [`MacAddress`] - 48-bit MAC address, colon-separated
//! - [`Port`] - Device port number (from 1)
//! - [`BootPriority`] - Managed network-boot order
//! - [`ResourceSpec`] / [`Mount`] - Per-device resources
//!
//! # Records
//!
//! - [`Device`] - Compute node or switch, built from a [`DeviceSpec`]
//! - [`Link`] - Two [`Endpoint`]s plus [`LinkAttributes`]

pub mod device;
pub mod device_name;
pub mod invariants;
pub mod link;
pub mod network;
pub mod resources;
pub mod units;

pub use device::{Device, DeviceKind, DeviceSpec};
pub use device_name::DeviceName;
pub use link::{Endpoint, Link, LinkAttributes};
pub use network::{BootPriority, MacAddress, Port};
pub use resources::{Cpu, Memory, Mount, ResourceSpec};
pub use units::ByteSize;
