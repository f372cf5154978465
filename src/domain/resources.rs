// Copyright (c) 2025 - Cowboy AI, Inc.
//! Per-device resource declarations: CPU, memory and mounts

use serde::Serialize;
use std::path::{Path, PathBuf};

use super::invariants::{validate_mount_point, validate_mount_source};
use super::units::ByteSize;
use crate::config::EvaluationContext;
use crate::errors::{TopologyError, TopologyResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Cpu {
    pub cores: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Memory {
    pub capacity: ByteSize,
}

/// CPU and memory for one device
///
/// # Invariants
/// - At least one core
/// - Memory is a byte count produced by the unit helpers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ResourceSpec {
    cpu: Cpu,
    memory: Memory,
}

impl ResourceSpec {
    pub fn new(cores: u32, capacity: ByteSize) -> TopologyResult<Self> {
        if cores < 1 {
            return Err(TopologyError::InvalidResourceSpec(format!(
                "cpu.cores must be at least 1, got {}",
                cores
            )));
        }

        Ok(Self {
            cpu: Cpu { cores },
            memory: Memory { capacity },
        })
    }

    /// Build from signed declarations as written in a description
    pub fn from_raw(cores: i64, capacity_bytes: i64) -> TopologyResult<Self> {
        if capacity_bytes < 0 {
            return Err(TopologyError::InvalidResourceSpec(format!(
                "memory.capacity cannot be negative, got {}",
                capacity_bytes
            )));
        }
        Self::from_raw_cores(cores, ByteSize::from_bytes(capacity_bytes as u64))
    }

    /// Build from a signed core count and an already converted capacity
    pub fn from_raw_cores(cores: i64, capacity: ByteSize) -> TopologyResult<Self> {
        let cores = u32::try_from(cores).map_err(|_| {
            TopologyError::InvalidResourceSpec(format!("cpu.cores out of range: {}", cores))
        })?;
        Self::new(cores, capacity)
    }

    pub fn cores(&self) -> u32 {
        self.cpu.cores
    }

    pub fn capacity(&self) -> ByteSize {
        self.memory.capacity
    }
}

/// Binding of an external path into a device filesystem
///
/// The source is resolved against the evaluation working directory when the
/// mount is declared, so the recorded path is always absolute.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Mount {
    source: PathBuf,
    point: String,
}

impl Mount {
    pub fn new(
        source: impl AsRef<str>,
        point: impl Into<String>,
        ctx: &EvaluationContext,
    ) -> TopologyResult<Self> {
        let source = source.as_ref();
        let point = point.into();

        validate_mount_source(source)?;
        validate_mount_point(&point)?;

        Ok(Self {
            source: ctx.resolve(source),
            point,
        })
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn point(&self) -> &str {
        &self.point
    }
}
