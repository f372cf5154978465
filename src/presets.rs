// Copyright (c) 2025 - Cowboy AI, Inc.
//! Device and link presets used by testbed models
//!
//! Convenience wrappers over [`Device::node`], [`Device::switch`] and
//! [`Link::new`]. They add defaults only; all validation still happens in the
//! factory and the link builder.

use crate::config::EvaluationContext;
use crate::domain::{
    BootPriority, ByteSize, Device, DeviceSpec, Endpoint, Link, LinkAttributes, MacAddress, Mount,
    Port, ResourceSpec,
};
use crate::errors::TopologyResult;

/// Forwarding image used by switch presets
pub const SWITCH_IMAGE: &str = "cumulusvx-3.5-mvrf";

/// Development tree mounted into compute nodes, relative to the working directory
pub const DEV_TREE_SOURCE: &str = "../../../nex";

/// Where the development tree appears inside a node
pub const DEV_TREE_POINT: &str = "/tmp/nex";

/// OS tag marking a device for network boot initialization
pub const NETBOOT_OS: &str = "netboot";

/// Flag keeping a device off the default shared test network
pub const NO_TESTNET: &str = "no-testnet";

pub const ONIE_IMAGE: &str = "onie-x86";
pub const ONIE_FIRMWARE: &str = "OVMF-pure-efi.fd";

/// Switch with the standard forwarding image and no mounts
pub fn switch(name: &str, cores: u32, memory: ByteSize) -> TopologyResult<Device> {
    Device::switch(DeviceSpec::new(name, ResourceSpec::new(cores, memory)?).image(SWITCH_IMAGE))
}

/// Compute node with a general-purpose image and the development tree mounted
pub fn compute_node(
    name: &str,
    image: &str,
    cores: u32,
    memory: ByteSize,
    ctx: &EvaluationContext,
) -> TopologyResult<Device> {
    let mount = Mount::new(DEV_TREE_SOURCE, DEV_TREE_POINT, ctx)?;
    Device::node(
        DeviceSpec::new(name, ResourceSpec::new(cores, memory)?)
            .image(image)
            .mount(mount),
    )
}

/// Node that boots from the network and stays off the shared test network
///
/// Pair it with [`netboot_link`] so it joins the managed boot sequence.
pub fn netboot_node(name: &str, cores: u32, memory: ByteSize) -> TopologyResult<Device> {
    Device::node(
        DeviceSpec::new(name, ResourceSpec::new(cores, memory)?)
            .os(NETBOOT_OS)
            .flag(NO_TESTNET, true),
    )
}

/// Node running the ONIE installer under UEFI firmware
pub fn onie_node(name: &str, cores: u32, memory: ByteSize) -> TopologyResult<Device> {
    Device::node(
        DeviceSpec::new(name, ResourceSpec::new(cores, memory)?)
            .image(ONIE_IMAGE)
            .os("onie")
            .firmware(ONIE_FIRMWARE),
    )
}

/// Plain link between two device ports
pub fn link(a: &str, a_port: u32, b: &str, b_port: u32) -> TopologyResult<Link> {
    Ok(Link::plain(
        Endpoint::new(a, Port::new(a_port)?),
        Endpoint::new(b, Port::new(b_port)?),
    ))
}

/// Link that puts `node` in the managed boot sequence with a fixed MAC
pub fn netboot_link(
    node: &str,
    node_port: u32,
    switch: &str,
    switch_port: u32,
    priority: u32,
    mac: &str,
) -> TopologyResult<Link> {
    Link::new(
        Endpoint::new(node, Port::new(node_port)?),
        Endpoint::new(switch, Port::new(switch_port)?),
        LinkAttributes::new()
            .boot(BootPriority::new(priority))
            .mac(node, MacAddress::new(mac)?),
    )
}
