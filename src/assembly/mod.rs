// Copyright (c) 2025 - Cowboy AI, Inc.
//! Topology Assembler
//!
//! Binds nodes, switches and links into one [`Topology`] and checks the
//! cross-referential rules no single builder can see:
//!
//! 1. Device names are unique across nodes and switches
//! 2. Every link endpoint names a declared device
//! 3. No `(device, port)` pair is claimed by two links
//! 4. Boot priorities are recorded unchanged (unique only when configured)
//!
//! Assembly is all-or-nothing. Every violation is collected before the run
//! ends, and a topology with any violation is never returned.

mod topology;

pub use topology::{BootEntry, Topology};

use std::collections::BTreeMap;
use tracing::{debug, info, warn};

use topology::DeviceSlot;

use crate::config::AssemblyOptions;
use crate::domain::invariants::{claim, validate_topology_name};
use crate::domain::{Device, DeviceKind, Link};
use crate::errors::{AssemblyReport, TopologyError, Violation, ViolationSite};
use crate::state_machine::{AssemblyInput, AssemblyPhase, StateMachine};

/// Assembles validated topologies
#[derive(Debug, Clone, Copy, Default)]
pub struct Assembler {
    options: AssemblyOptions,
}

impl Assembler {
    pub fn new(options: AssemblyOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> AssemblyOptions {
        self.options
    }

    /// Assemble a topology from its declarations
    pub fn assemble(
        &self,
        name: impl Into<String>,
        nodes: Vec<Device>,
        switches: Vec<Device>,
        links: Vec<Link>,
    ) -> Result<Topology, AssemblyReport> {
        self.assemble_declared(
            name,
            nodes.into_iter().map(Declared::Built).collect(),
            switches.into_iter().map(Declared::Built).collect(),
            links.into_iter().map(Some).collect(),
            Vec::new(),
        )
    }

    /// Assemble declarations some of which already failed to build
    ///
    /// Positions are declaration positions. A rejected device still owns its
    /// name and its ports, so duplicates and collisions involving it are
    /// reported; only links naming it are not reported as dangling. A `None`
    /// link is skipped. `prior` must carry a violation for every rejected
    /// declaration, so a topology is only returned when nothing was rejected.
    pub(crate) fn assemble_declared(
        &self,
        name: impl Into<String>,
        nodes: Vec<Declared>,
        switches: Vec<Declared>,
        links: Vec<Option<Link>>,
        prior: Vec<Violation>,
    ) -> Result<Topology, AssemblyReport> {
        let name = name.into();
        let mut phase = advance(AssemblyPhase::Empty, AssemblyInput::Populate);
        let mut violations = prior;

        if let Err(err) = validate_topology_name(&name) {
            violations.push(Violation::new(ViolationSite::Topology, err));
        }

        let index = index_devices(&nodes, &switches, &mut violations);
        let boot = self.check_links(&links, &index, &mut violations);

        phase = advance(
            phase,
            AssemblyInput::Finish {
                violations: violations.len(),
            },
        );

        if phase == AssemblyPhase::Validated {
            info!(
                topology = %name,
                nodes = nodes.len(),
                switches = switches.len(),
                links = links.len(),
                "topology assembled"
            );
            Ok(Topology::from_parts(
                name,
                nodes.into_iter().filter_map(Declared::into_device).collect(),
                switches.into_iter().filter_map(Declared::into_device).collect(),
                links.into_iter().flatten().collect(),
                index,
                boot,
            ))
        } else {
            warn!(
                topology = %name,
                violations = violations.len(),
                "topology rejected"
            );
            Err(AssemblyReport::new(name, violations))
        }
    }

    /// Resolve endpoints, claim ports and collect boot metadata
    fn check_links(
        &self,
        links: &[Option<Link>],
        index: &BTreeMap<String, DeviceSlot>,
        violations: &mut Vec<Violation>,
    ) -> Vec<BootEntry> {
        let mut ports: BTreeMap<(&str, u32), usize> = BTreeMap::new();
        let mut priorities: BTreeMap<u32, usize> = BTreeMap::new();
        let mut boot = Vec::new();

        for (position, link) in links.iter().enumerate() {
            let Some(link) = link else { continue };
            let site = ViolationSite::Link(position);

            for endpoint in link.endpoints() {
                let device = endpoint.device();

                if !index.contains_key(device) {
                    violations.push(Violation::new(
                        site,
                        TopologyError::DanglingLinkEndpoint {
                            device: device.to_string(),
                        },
                    ));
                    continue;
                }

                let port = endpoint.port().value();
                if let Err(first_link) = claim(&mut ports, (device, port), position) {
                    violations.push(Violation::new(
                        site,
                        TopologyError::DuplicatePortAssignment {
                            device: device.to_string(),
                            port,
                            first_link,
                        },
                    ));
                }
            }

            if let Some(priority) = link.boot_priority() {
                if self.options.unique_boot_priorities {
                    if let Err(first_link) = claim(&mut priorities, priority.value(), position) {
                        violations.push(Violation::new(
                            site,
                            TopologyError::DuplicateBootPriority {
                                priority: priority.value(),
                                first_link,
                            },
                        ));
                    }
                }

                let [a, b] = link.endpoints();
                debug!(link = position, %priority, "recorded boot link {}", link);
                boot.push(BootEntry {
                    priority,
                    link: position,
                    devices: [a.device().to_string(), b.device().to_string()],
                });
            }
        }

        boot
    }
}

/// Assemble with default options
pub fn assemble(
    name: impl Into<String>,
    nodes: Vec<Device>,
    switches: Vec<Device>,
    links: Vec<Link>,
) -> Result<Topology, AssemblyReport> {
    Assembler::default().assemble(name, nodes, switches, links)
}

/// A device declaration as seen by the assembler
#[derive(Debug, Clone)]
pub(crate) enum Declared {
    Built(Device),
    /// Failed to build; only its name takes part in assembly
    Rejected(String),
}

impl Declared {
    fn name(&self) -> &str {
        match self {
            Declared::Built(device) => device.name().as_str(),
            Declared::Rejected(name) => name,
        }
    }

    fn into_device(self) -> Option<Device> {
        match self {
            Declared::Built(device) => Some(device),
            Declared::Rejected(_) => None,
        }
    }
}

/// Build the shared name index, nodes first
///
/// The first declaration of a name owns it; every later declaration is
/// reported at its own site.
fn index_devices(
    nodes: &[Declared],
    switches: &[Declared],
    violations: &mut Vec<Violation>,
) -> BTreeMap<String, DeviceSlot> {
    let mut index = BTreeMap::new();

    let declared = nodes
        .iter()
        .enumerate()
        .map(|(i, d)| (DeviceKind::Node, i, d))
        .chain(
            switches
                .iter()
                .enumerate()
                .map(|(i, d)| (DeviceKind::Switch, i, d)),
        );

    for (kind, position, device) in declared {
        let slot = DeviceSlot { kind, position };
        if claim(&mut index, device.name().to_string(), slot).is_err() {
            let site = match kind {
                DeviceKind::Node => ViolationSite::Node(position),
                DeviceKind::Switch => ViolationSite::Switch(position),
            };
            violations.push(Violation::new(
                site,
                TopologyError::DuplicateDeviceName(device.name().to_string()),
            ));
        }
    }

    index
}

fn advance(phase: AssemblyPhase, input: AssemblyInput) -> AssemblyPhase {
    match phase.transition(&input) {
        Ok((next, ())) => {
            debug!(from = %phase, to = %next, "assembly phase");
            next
        }
        Err(err) => {
            warn!(%err, "unexpected assembly phase transition");
            phase
        }
    }
}
