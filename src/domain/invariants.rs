// Copyright (c) 2025 - Cowboy AI, Inc.
//! Pure Validation Functions - Topology Invariants
//!
//! Business rules shared by the device factory, the link builder and the
//! assembler. All functions are pure (no side effects, no filesystem access)
//! and return the violation they detect.
//!
//! # Invariant Categories
//!
//! 1. **Declaration Invariants**: a single record is well formed
//! 2. **Binding Invariants**: link attributes refer to the link's own endpoints
//! 3. **Graph Invariants**: names and ports are unique across the topology

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use crate::errors::{TopologyError, TopologyResult};

/// Validate a topology name
///
/// # Rules
/// - Must not be empty or whitespace only
pub fn validate_topology_name(name: &str) -> TopologyResult<()> {
    if name.trim().is_empty() {
        return Err(TopologyError::InvalidTopologyName(name.to_string()));
    }
    Ok(())
}

/// Validate an image identifier
///
/// # Rules
/// - Absent images are allowed (the device boots from the network)
/// - A present image must not be empty or contain whitespace
pub fn validate_image(device: &str, image: Option<&str>) -> TopologyResult<()> {
    let Some(image) = image else {
        return Ok(());
    };

    if image.is_empty() {
        return Err(TopologyError::InvalidImage {
            device: device.to_string(),
            reason: "image identifier is empty".to_string(),
        });
    }

    if image.chars().any(char::is_whitespace) {
        return Err(TopologyError::InvalidImage {
            device: device.to_string(),
            reason: format!("image identifier {:?} contains whitespace", image),
        });
    }

    Ok(())
}

/// Validate a mount source
///
/// # Rules
/// - Must not be empty
/// - Must not contain NUL bytes
pub fn validate_mount_source(source: &str) -> TopologyResult<()> {
    if source.is_empty() {
        return Err(TopologyError::InvalidMountPath {
            path: source.to_string(),
            reason: "mount source is empty".to_string(),
        });
    }
    if source.contains('\0') {
        return Err(TopologyError::InvalidMountPath {
            path: source.to_string(),
            reason: "mount source contains a NUL byte".to_string(),
        });
    }
    Ok(())
}

/// Validate a mount point inside a device
///
/// # Rules
/// - Must be an absolute path (starts with `/`)
/// - Must not contain NUL bytes
pub fn validate_mount_point(point: &str) -> TopologyResult<()> {
    if !point.starts_with('/') {
        return Err(TopologyError::InvalidMountPath {
            path: point.to_string(),
            reason: "mount point must be absolute".to_string(),
        });
    }
    if point.contains('\0') {
        return Err(TopologyError::InvalidMountPath {
            path: point.to_string(),
            reason: "mount point contains a NUL byte".to_string(),
        });
    }
    Ok(())
}

/// Validate a free-form flag key
///
/// # Rules
/// - Must not be empty
/// - Must not collide with a field of the record it is attached to
pub fn validate_flag_key(key: &str, reserved: &[&str]) -> TopologyResult<()> {
    if key.is_empty() {
        return Err(TopologyError::InvalidFlag {
            key: key.to_string(),
            reason: "flag name is empty".to_string(),
        });
    }
    if reserved.contains(&key) {
        return Err(TopologyError::InvalidFlag {
            key: key.to_string(),
            reason: "flag name shadows a built-in field".to_string(),
        });
    }
    Ok(())
}

/// Validate that a MAC override is keyed by one of the link's endpoints
pub fn validate_mac_binding(device: &str, a: &str, b: &str) -> TopologyResult<()> {
    if device != a && device != b {
        return Err(TopologyError::UnboundMacOverride {
            device: device.to_string(),
            a: a.to_string(),
            b: b.to_string(),
        });
    }
    Ok(())
}

/// Claim a key for an owner, reporting the first owner on collision
///
/// Used for device names, `(device, port)` pairs and, when enforced, boot
/// priorities.
pub fn claim<K: Ord, O: Copy>(claims: &mut BTreeMap<K, O>, key: K, owner: O) -> Result<(), O> {
    match claims.entry(key) {
        Entry::Occupied(existing) => Err(*existing.get()),
        Entry::Vacant(slot) => {
            slot.insert(owner);
            Ok(())
        }
    }
}
