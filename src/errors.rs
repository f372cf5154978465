// Copyright (c) 2025 - Cowboy AI, Inc.
//! Error types for topology evaluation and assembly

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// A single violation detected while building or assembling a topology
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TopologyError {
    /// Memory magnitude is negative, non-finite or too large
    #[error("Invalid magnitude: {0}")]
    InvalidMagnitude(String),

    /// CPU or memory declaration out of range
    #[error("Invalid resource spec: {0}")]
    InvalidResourceSpec(String),

    /// Device name does not follow the identifier grammar
    #[error("Invalid device name {name:?}: {reason}")]
    InvalidDeviceName { name: String, reason: String },

    /// Image identifier present but empty
    #[error("Invalid image for device {device}: {reason}")]
    InvalidImage { device: String, reason: String },

    /// Mount source or mount point rejected
    #[error("Invalid mount path {path:?}: {reason}")]
    InvalidMountPath { path: String, reason: String },

    /// Port numbers start at 1
    #[error("Invalid port {0}: ports are numbered from 1")]
    InvalidPort(i64),

    /// MAC override is not six colon-separated hex octets
    #[error("Malformed MAC address: {0:?}")]
    MalformedMacAddress(String),

    /// MAC override keyed by a device outside the link
    #[error("MAC override for {device} is not bound to link endpoints {a} and {b}")]
    UnboundMacOverride { device: String, a: String, b: String },

    /// Boot priority below zero or out of range
    #[error("Invalid boot priority: {0}")]
    InvalidBootPriority(i64),

    /// Administrative flag key is empty or shadows a record field
    #[error("Invalid flag {key:?}: {reason}")]
    InvalidFlag { key: String, reason: String },

    /// Topology has no usable name
    #[error("Invalid topology name {0:?}")]
    InvalidTopologyName(String),

    /// Two devices share a name
    #[error("Duplicate device name: {0}")]
    DuplicateDeviceName(String),

    /// Link endpoint names a device that was never declared
    #[error("Link endpoint references unknown device {device}")]
    DanglingLinkEndpoint { device: String },

    /// Port already claimed by an earlier link
    #[error("Port {port} on device {device} is already claimed by link {first_link}")]
    DuplicatePortAssignment {
        device: String,
        port: u32,
        first_link: usize,
    },

    /// Boot priority reused while unique priorities are enforced
    #[error("Boot priority {priority} is already used by link {first_link}")]
    DuplicateBootPriority { priority: u32, first_link: usize },
}

/// Where in a topology description a violation was found
///
/// Ordering follows declaration order: topology-level problems first, then
/// nodes, switches and links by position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ViolationSite {
    Topology,
    Node(usize),
    Switch(usize),
    Link(usize),
}

impl fmt::Display for ViolationSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViolationSite::Topology => write!(f, "topology"),
            ViolationSite::Node(i) => write!(f, "node #{}", i),
            ViolationSite::Switch(i) => write!(f, "switch #{}", i),
            ViolationSite::Link(i) => write!(f, "link #{}", i),
        }
    }
}

/// A violation together with the declaration it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub site: ViolationSite,
    pub error: TopologyError,
}

impl Violation {
    pub fn new(site: ViolationSite, error: TopologyError) -> Self {
        Self { site, error }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.site, self.error)
    }
}

/// Complete, ordered list of violations for one rejected topology
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("topology {topology:?} rejected with {} violation(s): {}", .violations.len(), render(.violations))]
pub struct AssemblyReport {
    pub topology: String,
    pub violations: Vec<Violation>,
}

fn render(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl AssemblyReport {
    /// Build a report, ordering violations by declaration site
    ///
    /// The sort is stable, so violations found at the same site keep the
    /// order in which they were detected.
    pub fn new(topology: impl Into<String>, mut violations: Vec<Violation>) -> Self {
        violations.sort_by_key(|v| v.site);
        Self {
            topology: topology.into(),
            violations,
        }
    }

    /// Iterate the underlying errors in report order
    pub fn errors(&self) -> impl Iterator<Item = &TopologyError> {
        self.violations.iter().map(|v| &v.error)
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Errors raised while loading the evaluation context
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot determine working directory: {0}")]
    WorkingDirectory(#[from] std::io::Error),

    #[error("Working directory must be absolute: {0}")]
    RelativeWorkingDirectory(PathBuf),
}

/// Errors raised while exporting or re-loading a topology
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Rejected(#[from] AssemblyReport),
}

/// Result type for builder operations
pub type TopologyResult<T> = Result<T, TopologyError>;
