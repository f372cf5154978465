// Copyright (c) 2025 - Cowboy AI, Inc.
//! Device Records: Compute Nodes and Switches
//!
//! Nodes and switches share one shape. The [`DeviceKind`] only records which
//! list of the topology a device was declared in.
//!
//! # Invariants
//! - Name follows the [`DeviceName`] grammar
//! - Image identifier, when present, is non-empty
//! - Mount sources are absolute and mount points are absolute
//! - Flag names are non-empty and do not shadow device fields
//!
//! Name uniqueness is a topology-wide rule checked by the assembler.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use super::invariants::{validate_flag_key, validate_image};
use super::{DeviceName, Mount, ResourceSpec};
use crate::errors::TopologyResult;

/// Field names a device flag may not reuse
pub const DEVICE_FIELDS: &[&str] = &["name", "image", "os", "firmware", "cpu", "memory", "mounts"];

/// Which list of the topology a device belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceKind {
    /// Compute device (virtual machine)
    Node,
    /// Forwarding element
    Switch,
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceKind::Node => write!(f, "node"),
            DeviceKind::Switch => write!(f, "switch"),
        }
    }
}

/// Validated, immutable device record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Device {
    #[serde(skip)]
    kind: DeviceKind,

    name: DeviceName,

    /// Absent when the device boots from the network
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    os: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    firmware: Option<String>,

    #[serde(flatten)]
    resources: ResourceSpec,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    mounts: Vec<Mount>,

    /// Free-form flags, exported inline next to the device fields
    #[serde(flatten)]
    flags: BTreeMap<String, bool>,
}

impl Device {
    /// Build a compute node from a declaration
    pub fn node(spec: DeviceSpec) -> TopologyResult<Self> {
        spec.build(DeviceKind::Node)
    }

    /// Build a switch from a declaration
    pub fn switch(spec: DeviceSpec) -> TopologyResult<Self> {
        spec.build(DeviceKind::Switch)
    }

    pub fn kind(&self) -> DeviceKind {
        self.kind
    }

    pub fn name(&self) -> &DeviceName {
        &self.name
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    pub fn os(&self) -> Option<&str> {
        self.os.as_deref()
    }

    pub fn firmware(&self) -> Option<&str> {
        self.firmware.as_deref()
    }

    pub fn resources(&self) -> &ResourceSpec {
        &self.resources
    }

    pub fn mounts(&self) -> &[Mount] {
        &self.mounts
    }

    pub fn flags(&self) -> &BTreeMap<String, bool> {
        &self.flags
    }

    /// A flag that was never declared reads as `false`
    pub fn flag(&self, key: &str) -> bool {
        self.flags.get(key).copied().unwrap_or(false)
    }

    /// Devices without an image boot from the network
    pub fn boots_from_network(&self) -> bool {
        self.image.is_none()
    }
}

/// Declaration of a device, validated by [`Device::node`] or [`Device::switch`]
///
/// # Examples
///
/// ```rust
/// use testbed_topology::domain::{units::mb, Device, DeviceSpec, ResourceSpec};
///
/// let spec = DeviceSpec::new("sw", ResourceSpec::new(2, mb(512.0).unwrap()).unwrap())
///     .image("cumulusvx-3.5-mvrf");
/// let switch = Device::switch(spec).unwrap();
/// assert_eq!(switch.name().as_str(), "sw");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceSpec {
    name: String,
    image: Option<String>,
    os: Option<String>,
    firmware: Option<String>,
    resources: ResourceSpec,
    mounts: Vec<Mount>,
    flags: BTreeMap<String, bool>,
}

impl DeviceSpec {
    pub fn new(name: impl Into<String>, resources: ResourceSpec) -> Self {
        Self {
            name: name.into(),
            image: None,
            os: None,
            firmware: None,
            resources,
            mounts: Vec::new(),
            flags: BTreeMap::new(),
        }
    }

    pub fn image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn os(mut self, os: impl Into<String>) -> Self {
        self.os = Some(os.into());
        self
    }

    pub fn firmware(mut self, firmware: impl Into<String>) -> Self {
        self.firmware = Some(firmware.into());
        self
    }

    pub fn mount(mut self, mount: Mount) -> Self {
        self.mounts.push(mount);
        self
    }

    pub fn mounts(mut self, mounts: impl IntoIterator<Item = Mount>) -> Self {
        self.mounts.extend(mounts);
        self
    }

    /// Set a flag; a later value for the same key wins
    pub fn flag(mut self, key: impl Into<String>, value: bool) -> Self {
        self.flags.insert(key.into(), value);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn build(self, kind: DeviceKind) -> TopologyResult<Device> {
        let name = DeviceName::new(self.name)?;
        validate_image(name.as_str(), self.image.as_deref())?;
        for key in self.flags.keys() {
            validate_flag_key(key, DEVICE_FIELDS)?;
        }

        Ok(Device {
            kind,
            name,
            image: self.image,
            os: self.os,
            firmware: self.firmware,
            resources: self.resources,
            mounts: self.mounts,
            flags: self.flags,
        })
    }
}
