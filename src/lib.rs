//! Topology specification model for emulated network testbeds
//!
//! Evaluates declarative testbed descriptions (nodes, switches, links,
//! resources and boot metadata), normalizes them into a strongly-typed graph
//! and validates the graph before it is handed to a provisioning backend.
//!
//! ```rust
//! use testbed_topology::domain::units::mb;
//! use testbed_topology::{assemble, presets};
//!
//! let topology = assemble(
//!     "pair",
//!     vec![presets::netboot_node("c2", 2, mb(512.0).unwrap()).unwrap()],
//!     vec![presets::switch("sw", 2, mb(512.0).unwrap()).unwrap()],
//!     vec![presets::netboot_link("c2", 1, "sw", 6, 1, "00:00:99:10:00:01").unwrap()],
//! )
//! .unwrap();
//! assert_eq!(topology.device_count(), 2);
//! ```

pub mod assembly;
pub mod config;
pub mod description;
pub mod domain;
pub mod errors;
pub mod export;
pub mod presets;
pub mod state_machine;

// Re-export commonly used types
pub use assembly::{assemble, Assembler, BootEntry, Topology};
pub use config::{AssemblyOptions, EvaluationContext};
pub use description::{evaluate, evaluate_with, TopologyDescription};
pub use domain::{
    BootPriority, ByteSize, Device, DeviceKind, DeviceName, DeviceSpec, Endpoint, Link,
    LinkAttributes, MacAddress, Mount, Port, ResourceSpec,
};
pub use errors::{
    AssemblyReport, ConfigError, ExportError, TopologyError, TopologyResult, Violation,
    ViolationSite,
};
