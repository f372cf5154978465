// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Topology Assembly
//!
//! Random star topologies: every node is linked to one switch on its own
//! port, so the declarations are valid unless a name repeats.

use proptest::prelude::*;
use std::collections::BTreeSet;
use testbed_topology::domain::units::mb;
use testbed_topology::{assemble, presets, Device, Link, TopologyError};

const SWITCH: &str = "sw";

fn name_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,7}".prop_filter("switch name is taken", |name| name != SWITCH)
}

fn star(names: &[String]) -> (Vec<Device>, Vec<Device>, Vec<Link>) {
    let memory = mb(256.0).unwrap();
    let nodes = names
        .iter()
        .map(|name| presets::netboot_node(name, 1, memory).unwrap())
        .collect();
    let switches = vec![presets::switch(SWITCH, 1, memory).unwrap()];
    let links = names
        .iter()
        .enumerate()
        .map(|(i, name)| presets::link(name, 1, SWITCH, i as u32 + 1).unwrap())
        .collect();
    (nodes, switches, links)
}

proptest! {
    /// Unique names index every node and switch
    #[test]
    fn prop_device_count(names in prop::collection::btree_set(name_strategy(), 0..16)) {
        let names: Vec<String> = names.into_iter().collect();
        let (nodes, switches, links) = star(&names);

        let topology = assemble("star", nodes, switches, links).unwrap();
        prop_assert_eq!(topology.device_count(), names.len() + 1);
        prop_assert_eq!(topology.links_for(SWITCH).len(), names.len());
        for name in &names {
            prop_assert_eq!(topology.neighbors(name), vec![SWITCH]);
        }
    }

    /// A repeated name is rejected wherever the repeat appears
    #[test]
    fn prop_duplicate_rejected(
        names in prop::collection::btree_set(name_strategy(), 1..12),
        pick in any::<prop::sample::Index>(),
        at in any::<prop::sample::Index>(),
    ) {
        let mut names: Vec<String> = names.into_iter().collect();
        let repeated = names[pick.index(names.len())].clone();
        names.insert(at.index(names.len() + 1), repeated.clone());

        let (nodes, switches, _) = star(&names);
        let report = assemble("star", nodes, switches, vec![]).unwrap_err();

        let expected = TopologyError::DuplicateDeviceName(repeated);
        let duplicates: Vec<&TopologyError> = report.errors().collect();
        prop_assert_eq!(duplicates, vec![&expected]);
    }

    /// Assembly is a pure function of its declarations
    #[test]
    fn prop_reassembly_equal(names in prop::collection::btree_set(name_strategy(), 0..8)) {
        let names: Vec<String> = names.into_iter().collect();
        let (nodes, switches, links) = star(&names);

        let first = assemble("star", nodes.clone(), switches.clone(), links.clone()).unwrap();
        let second = assemble("star", nodes, switches, links).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Two links on one switch port always produce exactly one collision
    #[test]
    fn prop_port_collision(names in prop::collection::btree_set(name_strategy(), 2..8)) {
        let names: Vec<String> = names.into_iter().collect();
        let (nodes, switches, mut links) = star(&names);
        let last = names.len() - 1;
        links[last] = presets::link(&names[last], 1, SWITCH, 1).unwrap();

        let report = assemble("star", nodes, switches, links).unwrap_err();
        let collided: BTreeSet<String> = report
            .errors()
            .filter_map(|err| match err {
                TopologyError::DuplicatePortAssignment { device, .. } => Some(device.clone()),
                _ => None,
            })
            .collect();
        prop_assert_eq!(report.len(), 1);
        prop_assert_eq!(collided, BTreeSet::from([SWITCH.to_string()]));
    }
}
