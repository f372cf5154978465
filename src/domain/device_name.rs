// Copyright (c) 2025 - Cowboy AI, Inc.
//! Device Name Value Object
//!
//! Device names double as host identifiers inside the emulated testbed, so
//! they follow a conservative identifier grammar:
//!
//! - 1 to 63 ASCII characters
//! - Characters drawn from `[A-Za-z0-9_-]`
//! - First character is a letter or digit
//! - Last character is not `-` or `_`
//!
//! Names are case-sensitive and kept verbatim.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{TopologyError, TopologyResult};

/// Validated device name
///
/// # Examples
///
/// ```rust
/// use testbed_topology::domain::DeviceName;
///
/// assert!(DeviceName::new("c2").is_ok());
/// assert!(DeviceName::new("leaf_01").is_ok());
/// assert!(DeviceName::new("").is_err());
/// assert!(DeviceName::new("-sw").is_err());
/// assert!(DeviceName::new("db.example").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DeviceName(String);

impl DeviceName {
    /// Maximum length, matching a single DNS label
    pub const MAX_LENGTH: usize = 63;

    pub fn new(name: impl Into<String>) -> TopologyResult<Self> {
        let name = name.into();

        let reject = |reason: &str| TopologyError::InvalidDeviceName {
            name: name.clone(),
            reason: reason.to_string(),
        };

        let first = match name.chars().next() {
            Some(c) => c,
            None => return Err(reject("name is empty")),
        };

        if name.len() > Self::MAX_LENGTH {
            return Err(reject("name exceeds 63 characters"));
        }

        if let Some(ch) = name
            .chars()
            .find(|c| !c.is_ascii_alphanumeric() && *c != '-' && *c != '_')
        {
            return Err(reject(&format!("character {:?} is not allowed", ch)));
        }

        if !first.is_ascii_alphanumeric() {
            return Err(reject("name must start with a letter or digit"));
        }

        if name.ends_with('-') || name.ends_with('_') {
            return Err(reject("name cannot end with '-' or '_'"));
        }

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeviceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DeviceName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for DeviceName {
    type Error = TopologyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for DeviceName {
    type Error = TopologyError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DeviceName> for String {
    fn from(name: DeviceName) -> Self {
        name.0
    }
}
