// Copyright (c) 2025 - Cowboy AI, Inc.
//! Integration tests for testbed assembly
//!
//! These tests drive complete testbed models through the assembler:
//! 1. Declare nodes, switches and links with the presets
//! 2. Assemble them into a topology
//! 3. Check the validated graph, or the complete violation report

mod fixtures;

use anyhow::Result;
use pretty_assertions::assert_eq;
use std::path::Path;
use test_case::test_case;

use fixtures::{nex0_basic, nex_mini, Declarations};
use testbed_topology::domain::units::{gb, mb};
use testbed_topology::{
    assemble, presets, AssemblyOptions, AssemblyReport, Assembler, BootPriority, DeviceKind,
    Endpoint, Link, LinkAttributes, MacAddress, Port, Topology, TopologyError, Violation,
    ViolationSite,
};

fn assemble_all(decl: Declarations) -> Result<Topology, AssemblyReport> {
    assemble(decl.name, decl.nodes, decl.switches, decl.links)
}

/// Test: the nex0 basic testbed assembles and keeps every declared attribute
#[test]
fn test_nex0_basic_testbed() -> Result<()> {
    let topology = assemble_all(nex0_basic())?;

    assert_eq!(topology.name(), "nex0");
    assert_eq!(topology.nodes().len(), 7);
    assert_eq!(topology.switches().len(), 1);
    assert_eq!(topology.links().len(), 7);
    assert_eq!(topology.device_count(), 8);

    // Compute nodes mount the development tree, resolved against the workdir
    let s0 = topology.device("s0").expect("s0 declared");
    assert_eq!(s0.kind(), DeviceKind::Node);
    assert_eq!(s0.image(), Some("fedora-28"));
    assert_eq!(s0.resources().capacity(), mb(1024.0)?);
    assert_eq!(s0.mounts()[0].source(), Path::new("/home/dev/src/nex"));
    assert_eq!(s0.mounts()[0].point(), "/tmp/nex");

    let c0 = topology.device("c0").expect("c0 declared");
    assert_eq!(c0.resources().capacity().bytes(), 536_870_912);

    // Netboot nodes stay off the test network
    let c2 = topology.device("c2").expect("c2 declared");
    assert!(c2.boots_from_network());
    assert!(c2.flag("no-testnet"));
    assert!(!s0.flag("no-testnet"));

    let sw = topology.device("sw").expect("sw declared");
    assert_eq!(sw.kind(), DeviceKind::Switch);
    assert_eq!(sw.image(), Some("cumulusvx-3.5-mvrf"));

    // The c2 link carries boot metadata bound to c2
    let c2_links = topology.links_for("c2");
    let c2_link = c2_links[0];
    assert_eq!(c2_link.boot_priority(), Some(BootPriority::new(1)));
    assert_eq!(
        c2_link.mac_for("c2").map(|mac| mac.as_str()),
        Some("00:00:99:10:00:01".to_string())
    );
    assert!(c2_link.mac_for("sw").is_none());

    // Plain links carry no attributes
    let s0_links = topology.links_for("s0");
    let s0_link = s0_links[0];
    assert!(s0_link.attributes().is_empty());
    assert_eq!(s0_link.to_string(), "s0:1 <-> sw:1");

    Ok(())
}

#[test]
fn test_nex0_queries() -> Result<()> {
    let topology = assemble_all(nex0_basic())?;

    assert_eq!(topology.links_for("sw").len(), 7);
    assert_eq!(topology.neighbors("c3"), vec!["sw"]);
    assert_eq!(
        topology.neighbors("sw"),
        vec!["s0", "s1", "db", "c0", "c1", "c2", "c3"]
    );

    let macs: Vec<String> = topology.mac_for("c3").iter().map(|m| m.as_str()).collect();
    assert_eq!(macs, vec!["00:00:99:22:00:11"]);
    assert!(topology.mac_for("s0").is_empty());

    // Both boot links share priority 1; declaration order breaks the tie
    let entries = topology.boot_entries();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].link, 5);
    assert_eq!(entries[0].devices, ["c2".to_string(), "sw".to_string()]);
    assert_eq!(entries[1].link, 6);

    let order: Vec<&str> = topology
        .boot_order()
        .iter()
        .map(|d| d.name().as_str())
        .collect();
    assert_eq!(order, vec!["c2", "c3"]);

    let names: Vec<&str> = topology.devices().map(|d| d.name().as_str()).collect();
    assert_eq!(names, vec!["s0", "s1", "db", "c0", "c1", "c2", "c3", "sw"]);

    Ok(())
}

#[test]
fn test_nex_mini_testbed() -> Result<()> {
    let topology = assemble_all(nex_mini(2))?;

    assert_eq!(topology.device_count(), 6);
    for device in topology.devices() {
        assert_eq!(device.resources().cores(), 4);
        assert_eq!(device.resources().capacity(), gb(4.0)?);
    }
    assert!(topology.boot_entries().is_empty());
    assert!(topology.boot_order().is_empty());

    Ok(())
}

/// Test: two links on cx port 1 produce one report naming the port
#[test]
fn test_nex_mini_port_collision() {
    let report = assemble_all(nex_mini(1)).unwrap_err();

    assert_eq!(report.topology, "nex-mini");
    assert_eq!(
        report.violations,
        vec![Violation::new(
            ViolationSite::Link(1),
            TopologyError::DuplicatePortAssignment {
                device: "cx".to_string(),
                port: 1,
                first_link: 0,
            },
        )]
    );
    assert!(report.to_string().contains("Port 1 on device cx"));
}

#[test_case(DeviceKind::Node, DeviceKind::Node ; "node then node")]
#[test_case(DeviceKind::Node, DeviceKind::Switch ; "node then switch")]
#[test_case(DeviceKind::Switch, DeviceKind::Switch ; "switch then switch")]
fn test_duplicate_name_across_kinds(first: DeviceKind, second: DeviceKind) {
    let memory = mb(512.0).unwrap();
    let mut nodes = Vec::new();
    let mut switches = Vec::new();
    for kind in [first, second] {
        match kind {
            DeviceKind::Node => nodes.push(presets::netboot_node("dup", 2, memory).unwrap()),
            DeviceKind::Switch => switches.push(presets::switch("dup", 2, memory).unwrap()),
        }
    }

    // Nodes are indexed before switches, so the later declaration is a switch
    // whenever one is present
    let expected_site = match second {
        DeviceKind::Node => ViolationSite::Node(1),
        DeviceKind::Switch if first == DeviceKind::Switch => ViolationSite::Switch(1),
        DeviceKind::Switch => ViolationSite::Switch(0),
    };

    let report = assemble("dups", nodes, switches, vec![]).unwrap_err();
    assert_eq!(
        report.violations,
        vec![Violation::new(
            expected_site,
            TopologyError::DuplicateDeviceName("dup".to_string()),
        )]
    );
}

#[test_case(0, 1 ; "adjacent")]
#[test_case(0, 2 ; "separated")]
#[test_case(1, 2 ; "trailing")]
fn test_duplicate_node_names(first: usize, second: usize) {
    let memory = mb(512.0).unwrap();
    let mut names = vec!["a", "b", "c"];
    names[second] = names[first];

    let nodes = names
        .iter()
        .map(|name| presets::netboot_node(name, 1, memory).unwrap())
        .collect();

    let report = assemble("dups", nodes, vec![], vec![]).unwrap_err();
    assert_eq!(report.len(), 1);
    assert_eq!(report.violations[0].site, ViolationSite::Node(second));
    assert_eq!(
        report.violations[0].error,
        TopologyError::DuplicateDeviceName(names[first].to_string())
    );
}

#[test]
fn test_dangling_endpoint() {
    let mut decl = nex_mini(2);
    decl.links.push(presets::link("ghost", 1, "cx", 9).unwrap());

    let report = assemble_all(decl).unwrap_err();
    assert_eq!(
        report.violations,
        vec![Violation::new(
            ViolationSite::Link(5),
            TopologyError::DanglingLinkEndpoint {
                device: "ghost".to_string(),
            },
        )]
    );
}

/// Test: every violation is reported, ordered by declaration site
#[test]
fn test_report_collects_everything() {
    let memory = mb(512.0).unwrap();
    let report = assemble(
        "",
        vec![
            presets::netboot_node("a", 1, memory).unwrap(),
            presets::netboot_node("a", 1, memory).unwrap(),
        ],
        vec![presets::switch("sw", 1, memory).unwrap()],
        vec![
            presets::link("a", 1, "sw", 1).unwrap(),
            presets::link("b", 1, "sw", 1).unwrap(),
        ],
    )
    .unwrap_err();

    let sites: Vec<ViolationSite> = report.violations.iter().map(|v| v.site).collect();
    assert_eq!(
        sites,
        vec![
            ViolationSite::Topology,
            ViolationSite::Node(1),
            ViolationSite::Link(1),
            ViolationSite::Link(1),
        ]
    );
    assert!(matches!(
        report.violations[2].error,
        TopologyError::DanglingLinkEndpoint { .. }
    ));
    assert!(matches!(
        report.violations[3].error,
        TopologyError::DuplicatePortAssignment { first_link: 0, .. }
    ));
}

#[test]
fn test_same_port_on_different_devices() -> Result<()> {
    let memory = mb(512.0)?;
    let topology = assemble(
        "ports",
        vec![
            presets::netboot_node("a", 1, memory)?,
            presets::netboot_node("b", 1, memory)?,
        ],
        vec![presets::switch("sw", 1, memory)?],
        vec![
            presets::link("a", 1, "sw", 1)?,
            presets::link("b", 1, "sw", 2)?,
        ],
    )?;

    assert_eq!(topology.links().len(), 2);
    Ok(())
}

#[test]
fn test_unbound_mac_override() -> Result<()> {
    let err = Link::new(
        Endpoint::new("c2", Port::new(1)?),
        Endpoint::new("sw", Port::new(6)?),
        LinkAttributes::new().mac("c9", MacAddress::new("00:00:99:10:00:01")?),
    )
    .unwrap_err();

    assert_eq!(
        err,
        TopologyError::UnboundMacOverride {
            device: "c9".to_string(),
            a: "c2".to_string(),
            b: "sw".to_string(),
        }
    );
    Ok(())
}

#[test]
fn test_boot_priority_uniqueness_is_opt_in() -> Result<()> {
    // Default options accept the shared priority in nex0
    assert!(assemble_all(nex0_basic()).is_ok());

    let decl = nex0_basic();
    let strict = Assembler::new(AssemblyOptions::default().with_unique_boot_priorities(true));
    let report = strict
        .assemble(decl.name, decl.nodes, decl.switches, decl.links)
        .unwrap_err();

    assert_eq!(
        report.violations,
        vec![Violation::new(
            ViolationSite::Link(6),
            TopologyError::DuplicateBootPriority {
                priority: 1,
                first_link: 5,
            },
        )]
    );
    Ok(())
}

/// Test: assembling the same declarations twice gives equal topologies
#[test]
fn test_assembly_is_idempotent() -> Result<()> {
    let first = assemble_all(nex0_basic())?;
    let second = assemble_all(nex0_basic())?;
    assert_eq!(first, second);

    let report_a = assemble_all(nex_mini(1)).unwrap_err();
    let report_b = assemble_all(nex_mini(1)).unwrap_err();
    assert_eq!(report_a, report_b);
    Ok(())
}
