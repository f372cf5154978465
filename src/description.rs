// Copyright (c) 2025 - Cowboy AI, Inc.
//! Topology Description Surface
//!
//! Serde model of a declarative topology description and the evaluator that
//! turns it into a validated [`Topology`].
//!
//! The shape mirrors the model files used by the test fixtures:
//!
//! ```json
//! {
//!   "name": "nex0",
//!   "nodes": [
//!     { "name": "c2", "os": "netboot", "no-testnet": true,
//!       "cpu": { "cores": 2 }, "memory": { "capacity": { "MB": 512 } } }
//!   ],
//!   "switches": [
//!     { "name": "sw", "image": "cumulusvx-3.5-mvrf",
//!       "cpu": { "cores": 2 }, "memory": { "capacity": { "MB": 512 } } }
//!   ],
//!   "links": [
//!     { "endpoints": [{ "device": "c2", "port": 1 }, { "device": "sw", "port": 6 }],
//!       "boot": 1, "mac": { "c2": "00:00:99:10:00:01" } }
//!   ]
//! }
//! ```
//!
//! Unknown boolean keys on a device or link become flags. Exported topologies
//! use the same shape, so an export is itself a valid description.

use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::debug;

use crate::assembly::{Assembler, Declared, Topology};
use crate::config::{AssemblyOptions, EvaluationContext};
use crate::domain::units::{gb, mb};
use crate::domain::{
    BootPriority, ByteSize, Device, DeviceKind, DeviceSpec, Endpoint, Link, LinkAttributes,
    MacAddress, Mount, Port, ResourceSpec,
};
use crate::errors::{AssemblyReport, TopologyError, TopologyResult, Violation, ViolationSite};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TopologyDescription {
    pub name: String,
    #[serde(default)]
    pub nodes: Vec<DeviceDescription>,
    #[serde(default)]
    pub switches: Vec<DeviceDescription>,
    #[serde(default)]
    pub links: Vec<LinkDescription>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DeviceDescription {
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub os: Option<String>,
    #[serde(default)]
    pub firmware: Option<String>,
    pub cpu: CpuDescription,
    pub memory: MemoryDescription,
    #[serde(default)]
    pub mounts: Vec<MountDescription>,
    #[serde(flatten)]
    pub flags: BTreeMap<String, bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CpuDescription {
    pub cores: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct MemoryDescription {
    pub capacity: CapacityLiteral,
}

/// Memory capacity as written in a description
///
/// Either a raw byte count or one of the unit helpers, `{ "MB": n }` or
/// `{ "GB": n }`. Byte counts use the full `u64` range so every exported
/// capacity loads again; negative counts parse and are rejected on build.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CapacityLiteral {
    Bytes(u64),
    SignedBytes(i64),
    Megabytes {
        #[serde(rename = "MB")]
        mb: f64,
    },
    Gigabytes {
        #[serde(rename = "GB")]
        gb: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MountDescription {
    pub source: String,
    pub point: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LinkDescription {
    pub endpoints: [EndpointDescription; 2],
    #[serde(default)]
    pub boot: Option<i64>,
    #[serde(default)]
    pub mac: BTreeMap<String, String>,
    #[serde(flatten)]
    pub flags: BTreeMap<String, bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EndpointDescription {
    pub device: String,
    pub port: i64,
}

impl TopologyDescription {
    /// Parse a JSON description
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl DeviceDescription {
    fn resources(&self) -> TopologyResult<ResourceSpec> {
        ResourceSpec::from_raw_cores(self.cpu.cores, self.memory.capacity.to_byte_size()?)
    }

    /// Run the device factory on this declaration
    pub fn build(&self, kind: DeviceKind, ctx: &EvaluationContext) -> TopologyResult<Device> {
        let mut spec = DeviceSpec::new(self.name.clone(), self.resources()?);

        if let Some(image) = &self.image {
            spec = spec.image(image.clone());
        }
        if let Some(os) = &self.os {
            spec = spec.os(os.clone());
        }
        if let Some(firmware) = &self.firmware {
            spec = spec.firmware(firmware.clone());
        }
        for mount in &self.mounts {
            spec = spec.mount(Mount::new(&mount.source, mount.point.clone(), ctx)?);
        }
        for (key, value) in &self.flags {
            spec = spec.flag(key.clone(), *value);
        }

        match kind {
            DeviceKind::Node => Device::node(spec),
            DeviceKind::Switch => Device::switch(spec),
        }
    }
}

impl LinkDescription {
    /// Run the link builder on this declaration
    pub fn build(&self) -> TopologyResult<Link> {
        let [a, b] = &self.endpoints;
        let a = Endpoint::new(a.device.clone(), Port::from_raw(a.port)?);
        let b = Endpoint::new(b.device.clone(), Port::from_raw(b.port)?);

        let mut attributes = LinkAttributes::new();
        if let Some(boot) = self.boot {
            attributes = attributes.boot(BootPriority::from_raw(boot)?);
        }
        for (device, mac) in &self.mac {
            attributes = attributes.mac(device.clone(), MacAddress::new(mac)?);
        }
        for (key, value) in &self.flags {
            attributes = attributes.flag(key.clone(), *value);
        }

        Link::new(a, b, attributes)
    }
}

/// Evaluate a description with default assembly options
pub fn evaluate(
    description: &TopologyDescription,
    ctx: &EvaluationContext,
) -> Result<Topology, AssemblyReport> {
    evaluate_with(description, ctx, AssemblyOptions::default())
}

/// Evaluate a description into a validated topology
///
/// Every declaration is built first and failures are reported at their own
/// site. The declarations are then assembled together; a device that failed
/// to build still takes part in the name and port checks, but links naming
/// it are not reported as dangling. All violations come back in one report
/// ordered by declaration site.
pub fn evaluate_with(
    description: &TopologyDescription,
    ctx: &EvaluationContext,
    options: AssemblyOptions,
) -> Result<Topology, AssemblyReport> {
    debug!(
        topology = %description.name,
        working_dir = %ctx.working_dir().display(),
        "evaluating topology description"
    );

    let mut violations = Vec::new();

    let mut build_devices = |declared: &[DeviceDescription], kind: DeviceKind| {
        declared
            .iter()
            .enumerate()
            .map(|(position, desc)| match desc.build(kind, ctx) {
                Ok(device) => Declared::Built(device),
                Err(err) => {
                    violations.push(Violation::new(site_for(kind, position), err));
                    Declared::Rejected(desc.name.clone())
                }
            })
            .collect::<Vec<_>>()
    };
    let nodes = build_devices(&description.nodes, DeviceKind::Node);
    let switches = build_devices(&description.switches, DeviceKind::Switch);

    let links = description
        .links
        .iter()
        .enumerate()
        .map(|(position, desc)| match desc.build() {
            Ok(link) => Some(link),
            Err(err) => {
                violations.push(Violation::new(ViolationSite::Link(position), err));
                None
            }
        })
        .collect::<Vec<_>>();

    Assembler::new(options).assemble_declared(
        description.name.clone(),
        nodes,
        switches,
        links,
        violations,
    )
}

fn site_for(kind: DeviceKind, position: usize) -> ViolationSite {
    match kind {
        DeviceKind::Node => ViolationSite::Node(position),
        DeviceKind::Switch => ViolationSite::Switch(position),
    }
}

impl CapacityLiteral {
    /// Byte count this literal stands for
    pub fn to_byte_size(&self) -> TopologyResult<ByteSize> {
        match *self {
            CapacityLiteral::Bytes(bytes) => Ok(ByteSize::from_bytes(bytes)),
            CapacityLiteral::SignedBytes(bytes) => u64::try_from(bytes)
                .map(ByteSize::from_bytes)
                .map_err(|_| {
                    TopologyError::InvalidResourceSpec(format!(
                        "memory.capacity cannot be negative, got {}",
                        bytes
                    ))
                }),
            CapacityLiteral::Megabytes { mb: m } => mb(m),
            CapacityLiteral::Gigabytes { gb: g } => gb(g),
        }
    }
}
