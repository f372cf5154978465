// Copyright (c) 2025 - Cowboy AI, Inc.
//! Link Addressing Value Objects with Validation Invariants

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use crate::errors::{TopologyError, TopologyResult};

/// MAC Address value object
///
/// Represents a 48-bit MAC address written as six colon-separated octets.
/// Invariants:
/// - Exactly 6 octets of exactly 2 hex digits each
/// - Canonical representation (lowercase, colon-separated)
///
/// # Examples
///
/// ```rust
/// use testbed_topology::domain::MacAddress;
///
/// let mac = MacAddress::new("00:00:99:AB:00:CA").unwrap();
/// assert_eq!(mac.as_str(), "00:00:99:ab:00:ca");
/// assert!(MacAddress::new("00:00:99:AB:00").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MacAddress([u8; 6]);

impl MacAddress {
    pub fn new(mac: impl AsRef<str>) -> TopologyResult<Self> {
        let mac = mac.as_ref();
        let malformed = || TopologyError::MalformedMacAddress(mac.to_string());

        let mut octets = [0u8; 6];
        let mut groups = mac.split(':');
        for octet in octets.iter_mut() {
            let group = groups.next().ok_or_else(malformed)?;
            if group.len() != 2 || !group.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(malformed());
            }
            *octet = u8::from_str_radix(group, 16).map_err(|_| malformed())?;
        }

        if groups.next().is_some() {
            return Err(malformed());
        }

        Ok(Self(octets))
    }

    pub fn from_octets(octets: [u8; 6]) -> Self {
        Self(octets)
    }

    pub fn octets(&self) -> [u8; 6] {
        self.0
    }

    /// Canonical string (lowercase, colon-separated)
    pub fn as_str(&self) -> String {
        format!(
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            self.0[0], self.0[1], self.0[2], self.0[3], self.0[4], self.0[5]
        )
    }

    pub fn is_multicast(&self) -> bool {
        self.0[0] & 0x01 != 0
    }

    /// Locally administered addresses have the second-lowest bit of the
    /// first octet set.
    pub fn is_locally_administered(&self) -> bool {
        self.0[0] & 0x02 != 0
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MacAddress {
    type Err = TopologyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for MacAddress {
    type Error = TopologyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MacAddress> for String {
    fn from(mac: MacAddress) -> Self {
        mac.as_str()
    }
}

/// Port number on a device
///
/// Ports are numbered from 1; uniqueness per device is checked at assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Port(NonZeroU32);

impl Port {
    pub fn new(number: u32) -> TopologyResult<Self> {
        NonZeroU32::new(number)
            .map(Self)
            .ok_or(TopologyError::InvalidPort(0))
    }

    /// Accept a signed declaration, as written in a description
    pub fn from_raw(number: i64) -> TopologyResult<Self> {
        u32::try_from(number)
            .ok()
            .and_then(NonZeroU32::new)
            .map(Self)
            .ok_or(TopologyError::InvalidPort(number))
    }

    pub fn value(&self) -> u32 {
        self.0.get()
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u32> for Port {
    type Error = TopologyError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Port> for u32 {
    fn from(port: Port) -> Self {
        port.value()
    }
}

/// Managed network-boot priority
///
/// Lower values boot earlier. A link without a priority is not part of the
/// managed boot sequence.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct BootPriority(u32);

impl BootPriority {
    pub const fn new(priority: u32) -> Self {
        Self(priority)
    }

    /// Accept a signed declaration, rejecting negative or oversized values
    pub fn from_raw(priority: i64) -> TopologyResult<Self> {
        u32::try_from(priority)
            .map(Self)
            .map_err(|_| TopologyError::InvalidBootPriority(priority))
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for BootPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
