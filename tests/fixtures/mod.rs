// Copyright (c) 2025 - Cowboy AI, Inc.
//! Test Fixtures for testbed-topology
//!
//! Deterministic testbed models taken from the network-services test suites.
//! The working directory is a fixed path so mount resolution is reproducible.

#![allow(dead_code)]

use serde_json::{json, Value};
use testbed_topology::domain::units::{gb, mb};
use testbed_topology::{presets, Device, EvaluationContext, Link};

/// Fixed working directory the models are evaluated in
pub const WORKDIR: &str = "/home/dev/src/nex/tests/basic";

pub fn ctx() -> EvaluationContext {
    EvaluationContext::new(WORKDIR).expect("fixture working directory is absolute")
}

/// Declarations of one testbed, ready for the assembler
pub struct Declarations {
    pub name: &'static str,
    pub nodes: Vec<Device>,
    pub switches: Vec<Device>,
    pub links: Vec<Link>,
}

/// The `nex0` basic testbed: five fedora nodes and two netboot nodes on one switch
pub fn nex0_basic() -> Declarations {
    let ctx = ctx();
    let fedora = |name: &str, megs: f64| {
        presets::compute_node(name, "fedora-28", 2, mb(megs).unwrap(), &ctx).unwrap()
    };
    let netboot = |name: &str| presets::netboot_node(name, 2, mb(512.0).unwrap()).unwrap();

    Declarations {
        name: "nex0",
        nodes: vec![
            fedora("s0", 1024.0),
            fedora("s1", 1024.0),
            fedora("db", 1024.0),
            fedora("c0", 512.0),
            fedora("c1", 512.0),
            netboot("c2"),
            netboot("c3"),
        ],
        switches: vec![presets::switch("sw", 2, mb(512.0).unwrap()).unwrap()],
        links: vec![
            presets::link("s0", 1, "sw", 1).unwrap(),
            presets::link("s1", 1, "sw", 2).unwrap(),
            presets::link("db", 1, "sw", 3).unwrap(),
            presets::link("c0", 1, "sw", 4).unwrap(),
            presets::link("c1", 1, "sw", 5).unwrap(),
            presets::netboot_link("c2", 1, "sw", 6, 1, "00:00:99:10:00:01").unwrap(),
            presets::netboot_link("c3", 1, "sw", 7, 1, "00:00:99:22:00:11").unwrap(),
        ],
    }
}

/// The `nex-mini` testbed: five debian nodes on switch `cx`
///
/// `port_for_db` is the `cx` port of the `db` link; 2 is the declared value.
pub fn nex_mini(port_for_db: u32) -> Declarations {
    let ctx = ctx();
    let deb = |name: &str| {
        presets::compute_node(name, "debian-buster", 4, gb(4.0).unwrap(), &ctx).unwrap()
    };

    Declarations {
        name: "nex-mini",
        nodes: vec![deb("server"), deb("db"), deb("c0"), deb("c1"), deb("c2")],
        switches: vec![presets::switch("cx", 4, gb(4.0).unwrap()).unwrap()],
        links: vec![
            presets::link("server", 1, "cx", 1).unwrap(),
            presets::link("db", 1, "cx", port_for_db).unwrap(),
            presets::link("c0", 1, "cx", 3).unwrap(),
            presets::link("c1", 1, "cx", 4).unwrap(),
            presets::link("c2", 1, "cx", 5).unwrap(),
        ],
    }
}

fn fedora_json(name: &str, megs: u64) -> Value {
    json!({
        "name": name,
        "image": "fedora-28",
        "cpu": { "cores": 2 },
        "memory": { "capacity": { "MB": megs } },
        "mounts": [{ "source": "../../../nex", "point": "/tmp/nex" }]
    })
}

fn netboot_json(name: &str) -> Value {
    json!({
        "name": name,
        "os": "netboot",
        "no-testnet": true,
        "cpu": { "cores": 2 },
        "memory": { "capacity": { "MB": 512 } }
    })
}

fn link_json(a: &str, a_port: u32, b: &str, b_port: u32) -> Value {
    json!({ "endpoints": [{ "device": a, "port": a_port }, { "device": b, "port": b_port }] })
}

/// The `nex0` basic model as a description document
pub fn nex0_basic_json() -> Value {
    let mut c2 = link_json("c2", 1, "sw", 6);
    c2["boot"] = json!(1);
    c2["mac"] = json!({ "c2": "00:00:99:10:00:01" });

    let mut c3 = link_json("c3", 1, "sw", 7);
    c3["boot"] = json!(1);
    c3["mac"] = json!({ "c3": "00:00:99:22:00:11" });

    json!({
        "name": "nex0",
        "nodes": [
            fedora_json("s0", 1024),
            fedora_json("s1", 1024),
            fedora_json("db", 1024),
            fedora_json("c0", 512),
            fedora_json("c1", 512),
            netboot_json("c2"),
            netboot_json("c3")
        ],
        "switches": [{
            "name": "sw",
            "image": "cumulusvx-3.5-mvrf",
            "cpu": { "cores": 2 },
            "memory": { "capacity": { "MB": 512 } }
        }],
        "links": [
            link_json("s0", 1, "sw", 1),
            link_json("s1", 1, "sw", 2),
            link_json("db", 1, "sw", 3),
            link_json("c0", 1, "sw", 4),
            link_json("c1", 1, "sw", 5),
            c2,
            c3
        ]
    })
}
