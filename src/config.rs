// Copyright (c) 2025 - Cowboy AI, Inc.
//! Evaluation context and assembly options
//!
//! Everything a description needs from its surroundings is passed in
//! explicitly through these types.

use std::path::{Component, Path, PathBuf};

use crate::errors::ConfigError;

/// Environment variable overriding the evaluation working directory
pub const WORKDIR_ENV: &str = "TOPOLOGY_WORKDIR";

/// Context a topology description is evaluated in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationContext {
    working_dir: PathBuf,
}

impl EvaluationContext {
    /// Create a context rooted at an absolute working directory
    pub fn new(working_dir: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let working_dir = working_dir.into();
        if !working_dir.is_absolute() {
            return Err(ConfigError::RelativeWorkingDirectory(working_dir));
        }
        Ok(Self {
            working_dir: normalize(&working_dir),
        })
    }

    /// Context rooted at the filesystem root
    ///
    /// Used when re-loading exported topologies, whose mount sources are
    /// already absolute.
    pub fn root() -> Self {
        Self {
            working_dir: PathBuf::from("/"),
        }
    }

    /// Load from the process environment
    ///
    /// Uses `TOPOLOGY_WORKDIR` when set, otherwise the process working
    /// directory at the moment of the call.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(WORKDIR_ENV) {
            Some(dir) => Self::new(PathBuf::from(dir)),
            None => Self::new(std::env::current_dir()?),
        }
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Resolve a path against the working directory
    ///
    /// Absolute paths are kept. The result is normalized lexically; the
    /// filesystem is never consulted.
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            normalize(path)
        } else {
            normalize(&self.working_dir.join(path))
        }
    }
}

/// Knobs for the topology assembler
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssemblyOptions {
    /// Reject links sharing a boot priority
    pub unique_boot_priorities: bool,
}

impl AssemblyOptions {
    pub fn with_unique_boot_priorities(mut self, enabled: bool) -> Self {
        self.unique_boot_priorities = enabled;
        self
    }
}

/// Collapse `.` and `..` components without touching the filesystem
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // `..` at the root stays at the root
                if !out.pop() && !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
