// Copyright (c) 2025 - Cowboy AI, Inc.
//! Topology Checker
//!
//! Evaluates a JSON topology description, reports every violation, and writes
//! the validated topology as JSON for a provisioning backend.
//!
//! Configuration comes from the environment:
//! - `TOPOLOGY_FILE` - description to evaluate (required)
//! - `TOPOLOGY_OUTPUT` - where to write the export (stdout when unset)
//! - `TOPOLOGY_WORKDIR` - base for relative mount sources (process cwd when unset)
//! - `TOPOLOGY_UNIQUE_BOOT` - `true` rejects links sharing a boot priority
//! - `RUST_LOG` - log filter

use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use testbed_topology::{
    evaluate_with, export, AssemblyOptions, EvaluationContext, TopologyDescription,
};
use tracing::{error, info};

/// Configuration for the checker
#[derive(Debug, Clone)]
struct CheckerConfig {
    /// Description to evaluate
    input: PathBuf,
    /// Export destination
    output: Option<PathBuf>,
    /// Assembler options
    options: AssemblyOptions,
}

impl CheckerConfig {
    /// Load configuration from environment variables
    fn from_env() -> Result<Self> {
        let input = std::env::var("TOPOLOGY_FILE")
            .map(PathBuf::from)
            .context("TOPOLOGY_FILE not set")?;

        let output = std::env::var("TOPOLOGY_OUTPUT").ok().map(PathBuf::from);

        let unique_boot = std::env::var("TOPOLOGY_UNIQUE_BOOT")
            .ok()
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(false);

        Ok(Self {
            input,
            output,
            options: AssemblyOptions::default().with_unique_boot_priorities(unique_boot),
        })
    }
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = CheckerConfig::from_env()?;
    let ctx = EvaluationContext::from_env().context("Failed to load evaluation context")?;
    info!(
        input = %config.input.display(),
        working_dir = %ctx.working_dir().display(),
        "checking topology description"
    );

    let raw = std::fs::read_to_string(&config.input)
        .with_context(|| format!("Failed to read {}", config.input.display()))?;
    let description = TopologyDescription::from_json(&raw)
        .with_context(|| format!("Failed to parse {}", config.input.display()))?;

    let topology = match evaluate_with(&description, &ctx, config.options) {
        Ok(topology) => topology,
        Err(report) => {
            for violation in &report.violations {
                error!("{}", violation);
            }
            bail!(
                "topology {:?} rejected with {} violation(s)",
                report.topology,
                report.len()
            );
        }
    };

    info!(
        topology = %topology.name(),
        devices = topology.device_count(),
        links = topology.links().len(),
        boot_links = topology.boot_entries().len(),
        "topology validated"
    );

    let json = export::to_json_pretty(&topology)?;
    match &config.output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(output = %path.display(), "export written");
        }
        None => println!("{}", json),
    }

    Ok(())
}
