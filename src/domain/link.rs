// Copyright (c) 2025 - Cowboy AI, Inc.
//! Point-to-point Links Between Device Ports
//!
//! A [`Link`] joins two [`Endpoint`]s and carries typed [`LinkAttributes`].
//! The builder checks everything visible from a single link; whether the
//! endpoints exist and whether their ports are free is decided by the
//! assembler.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use super::invariants::{validate_flag_key, validate_mac_binding};
use super::{BootPriority, MacAddress, Port};
use crate::errors::TopologyResult;

/// Field names a link flag may not reuse
pub const LINK_FIELDS: &[&str] = &["endpoints", "boot", "mac"];

/// One side of a link
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Endpoint {
    device: String,
    port: Port,
}

impl Endpoint {
    pub fn new(device: impl Into<String>, port: Port) -> Self {
        Self {
            device: device.into(),
            port,
        }
    }

    pub fn device(&self) -> &str {
        &self.device
    }

    pub fn port(&self) -> Port {
        self.port
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.device, self.port)
    }
}

/// Optional link attributes
///
/// `boot` and `mac` are the recognized options. Any other administrative
/// switch goes into `flags`, which is the extension point for new options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LinkAttributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    boot: Option<BootPriority>,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    mac: BTreeMap<String, MacAddress>,

    #[serde(flatten)]
    flags: BTreeMap<String, bool>,
}

impl LinkAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn boot(mut self, priority: BootPriority) -> Self {
        self.boot = Some(priority);
        self
    }

    pub fn mac(mut self, device: impl Into<String>, mac: MacAddress) -> Self {
        self.mac.insert(device.into(), mac);
        self
    }

    pub fn flag(mut self, key: impl Into<String>, value: bool) -> Self {
        self.flags.insert(key.into(), value);
        self
    }

    /// Combine two attribute bags, `other` winning on every conflict
    pub fn merge(mut self, other: LinkAttributes) -> Self {
        if other.boot.is_some() {
            self.boot = other.boot;
        }
        self.mac.extend(other.mac);
        self.flags.extend(other.flags);
        self
    }

    pub fn boot_priority(&self) -> Option<BootPriority> {
        self.boot
    }

    pub fn mac_overrides(&self) -> &BTreeMap<String, MacAddress> {
        &self.mac
    }

    pub fn flags(&self) -> &BTreeMap<String, bool> {
        &self.flags
    }

    pub fn is_empty(&self) -> bool {
        self.boot.is_none() && self.mac.is_empty() && self.flags.is_empty()
    }
}

/// Validated, immutable link record
///
/// # Examples
///
/// ```rust
/// use testbed_topology::domain::{BootPriority, Endpoint, Link, LinkAttributes, MacAddress, Port};
///
/// let link = Link::new(
///     Endpoint::new("c2", Port::new(1).unwrap()),
///     Endpoint::new("sw", Port::new(6).unwrap()),
///     LinkAttributes::new()
///         .boot(BootPriority::new(1))
///         .mac("c2", MacAddress::new("00:00:99:10:00:01").unwrap()),
/// )
/// .unwrap();
/// assert_eq!(link.boot_priority(), Some(BootPriority::new(1)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    endpoints: [Endpoint; 2],

    #[serde(flatten)]
    attributes: LinkAttributes,
}

impl Link {
    pub fn new(a: Endpoint, b: Endpoint, attributes: LinkAttributes) -> TopologyResult<Self> {
        for device in attributes.mac.keys() {
            validate_mac_binding(device, &a.device, &b.device)?;
        }
        for key in attributes.flags.keys() {
            validate_flag_key(key, LINK_FIELDS)?;
        }

        Ok(Self {
            endpoints: [a, b],
            attributes,
        })
    }

    /// Link with no attributes
    pub fn plain(a: Endpoint, b: Endpoint) -> Self {
        Self {
            endpoints: [a, b],
            attributes: LinkAttributes::default(),
        }
    }

    pub fn endpoints(&self) -> &[Endpoint; 2] {
        &self.endpoints
    }

    pub fn attributes(&self) -> &LinkAttributes {
        &self.attributes
    }

    pub fn boot_priority(&self) -> Option<BootPriority> {
        self.attributes.boot
    }

    /// MAC override bound to `device` on this link
    pub fn mac_for(&self, device: &str) -> Option<&MacAddress> {
        self.attributes.mac.get(device)
    }

    pub fn touches(&self, device: &str) -> bool {
        self.endpoints.iter().any(|e| e.device == device)
    }

    /// The endpoint across the link from `device`
    ///
    /// For a loopback link both ends name the same device; the second
    /// endpoint is returned.
    pub fn peer_of(&self, device: &str) -> Option<&Endpoint> {
        let [a, b] = &self.endpoints;
        if a.device == device {
            Some(b)
        } else if b.device == device {
            Some(a)
        } else {
            None
        }
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <-> {}", self.endpoints[0], self.endpoints[1])
    }
}
