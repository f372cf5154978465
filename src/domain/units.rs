// Copyright (c) 2025 - Cowboy AI, Inc.
//! Memory Size Constructors
//!
//! Every memory capacity in a topology is a [`ByteSize`]. Descriptions write
//! capacities as `MB(512)` or `GB(4)`; [`mb`] and [`gb`] are the only way
//! those magnitudes become byte counts.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{TopologyError, TopologyResult};

/// Bytes per megabyte (binary)
pub const MIB: u64 = 1024 * 1024;

/// Bytes per gigabyte (binary)
pub const GIB: u64 = 1024 * MIB;

/// Canonical byte count
///
/// # Examples
///
/// ```rust
/// use testbed_topology::domain::units::{gb, mb};
///
/// assert_eq!(mb(512.0).unwrap().bytes(), 512 * 1024 * 1024);
/// assert_eq!(gb(4.0).unwrap(), mb(4096.0).unwrap());
/// assert!(mb(-1.0).is_err());
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ByteSize(u64);

impl ByteSize {
    pub const fn from_bytes(bytes: u64) -> Self {
        Self(bytes)
    }

    pub const fn bytes(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ByteSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            0 => write!(f, "0B"),
            b if b % GIB == 0 => write!(f, "{}GB", b / GIB),
            b if b % MIB == 0 => write!(f, "{}MB", b / MIB),
            b => write!(f, "{}B", b),
        }
    }
}

impl From<u64> for ByteSize {
    fn from(bytes: u64) -> Self {
        Self(bytes)
    }
}

/// Megabytes to bytes
pub fn mb(magnitude: f64) -> TopologyResult<ByteSize> {
    scale(magnitude, MIB)
}

/// Gigabytes to bytes
pub fn gb(magnitude: f64) -> TopologyResult<ByteSize> {
    scale(magnitude, GIB)
}

fn scale(magnitude: f64, unit: u64) -> TopologyResult<ByteSize> {
    if !magnitude.is_finite() || magnitude < 0.0 {
        return Err(TopologyError::InvalidMagnitude(magnitude.to_string()));
    }

    // Whole magnitudes stay in integer arithmetic so no precision is lost.
    if magnitude.fract() == 0.0 && magnitude < u64::MAX as f64 {
        return (magnitude as u64)
            .checked_mul(unit)
            .map(ByteSize)
            .ok_or_else(|| TopologyError::InvalidMagnitude(magnitude.to_string()));
    }

    let bytes = magnitude * unit as f64;
    if bytes >= u64::MAX as f64 {
        return Err(TopologyError::InvalidMagnitude(magnitude.to_string()));
    }
    Ok(ByteSize(bytes as u64))
}
