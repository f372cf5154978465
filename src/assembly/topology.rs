// Copyright (c) 2025 - Cowboy AI, Inc.
//! Validated topology graph

use serde::Serialize;
use std::collections::BTreeMap;

use crate::domain::{BootPriority, Device, DeviceKind, Link, MacAddress};

/// Position of a device inside its declaration list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DeviceSlot {
    pub kind: DeviceKind,
    pub position: usize,
}

/// A link that takes part in the managed boot sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootEntry {
    /// Declared priority, unchanged
    pub priority: BootPriority,
    /// Index of the link in declaration order
    pub link: usize,
    /// Both endpoint devices of the link
    pub devices: [String; 2],
}

/// Immutable, validated topology
///
/// Only [`crate::assembly::Assembler`] can produce one. Every device name is
/// unique across nodes and switches, every link endpoint names a declared
/// device, and no `(device, port)` pair is claimed twice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Topology {
    name: String,
    nodes: Vec<Device>,
    switches: Vec<Device>,
    links: Vec<Link>,

    #[serde(skip)]
    index: BTreeMap<String, DeviceSlot>,

    #[serde(skip)]
    boot: Vec<BootEntry>,
}

impl Topology {
    pub(crate) fn from_parts(
        name: String,
        nodes: Vec<Device>,
        switches: Vec<Device>,
        links: Vec<Link>,
        index: BTreeMap<String, DeviceSlot>,
        boot: Vec<BootEntry>,
    ) -> Self {
        Self {
            name,
            nodes,
            switches,
            links,
            index,
            boot,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn nodes(&self) -> &[Device] {
        &self.nodes
    }

    pub fn switches(&self) -> &[Device] {
        &self.switches
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Number of entries in the device index
    pub fn device_count(&self) -> usize {
        self.index.len()
    }

    /// Look up a node or switch by name
    pub fn device(&self, name: &str) -> Option<&Device> {
        let slot = self.index.get(name)?;
        match slot.kind {
            DeviceKind::Node => self.nodes.get(slot.position),
            DeviceKind::Switch => self.switches.get(slot.position),
        }
    }

    /// All devices, nodes first, in declaration order
    pub fn devices(&self) -> impl Iterator<Item = &Device> {
        self.nodes.iter().chain(self.switches.iter())
    }

    /// Links touching a device, in declaration order
    pub fn links_for(&self, name: &str) -> Vec<&Link> {
        self.links.iter().filter(|link| link.touches(name)).collect()
    }

    /// Devices directly linked to `name`, without repeats
    pub fn neighbors(&self, name: &str) -> Vec<&str> {
        let mut seen = Vec::new();
        for link in self.links_for(name) {
            if let Some(peer) = link.peer_of(name) {
                if !seen.contains(&peer.device()) {
                    seen.push(peer.device());
                }
            }
        }
        seen
    }

    /// MAC overrides bound to a device across all of its links
    pub fn mac_for(&self, name: &str) -> Vec<&MacAddress> {
        self.links
            .iter()
            .filter_map(|link| link.mac_for(name))
            .collect()
    }

    /// Boot metadata in link declaration order
    pub fn boot_entries(&self) -> &[BootEntry] {
        &self.boot
    }

    /// Nodes taking part in the managed boot sequence
    ///
    /// Ordered by priority; ties keep link declaration order. Switches on
    /// boot links are recorded in [`Self::boot_entries`] but are not booted.
    pub fn boot_order(&self) -> Vec<&Device> {
        let mut entries: Vec<&BootEntry> = self.boot.iter().collect();
        entries.sort_by_key(|entry| entry.priority);

        let mut order: Vec<&Device> = Vec::new();
        for entry in entries {
            for name in &entry.devices {
                if let Some(device) = self.device(name) {
                    if device.kind() == DeviceKind::Node
                        && !order.iter().any(|d| d.name() == device.name())
                    {
                        order.push(device);
                    }
                }
            }
        }
        order
    }
}
