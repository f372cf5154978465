// Copyright (c) 2025 - Cowboy AI, Inc.
//! Topology Assembly Lifecycle
//!
//! A topology under construction exists only inside one assembler run.
//!
//! # States
//!
//! - Empty: nothing indexed yet
//! - Populating: devices and links are being indexed and checked
//! - Validated: no violations (terminal)
//! - Rejected: at least one violation (terminal)
//!
//! # Inputs
//!
//! - Populate: Empty → Populating
//! - Finish { violations }: Populating → Validated when zero, Rejected otherwise

use std::fmt;

use super::{StateMachine, TransitionError, TransitionResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssemblyPhase {
    Empty,
    Populating,
    Validated,
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssemblyInput {
    Populate,
    Finish { violations: usize },
}

impl fmt::Display for AssemblyPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AssemblyPhase::Empty => "empty",
            AssemblyPhase::Populating => "populating",
            AssemblyPhase::Validated => "validated",
            AssemblyPhase::Rejected => "rejected",
        };
        f.write_str(name)
    }
}

impl StateMachine for AssemblyPhase {
    type Input = AssemblyInput;
    type Output = ();

    fn transition(&self, input: &Self::Input) -> TransitionResult<(Self, Self::Output)> {
        use AssemblyInput::*;
        use AssemblyPhase::*;

        match (self, input) {
            (Empty, Populate) => Ok((Populating, ())),
            (Populating, Finish { violations: 0 }) => Ok((Validated, ())),
            (Populating, Finish { .. }) => Ok((Rejected, ())),

            (Validated | Rejected, _) => Err(TransitionError::Terminal(self.to_string())),

            (Empty, Finish { .. }) => Err(TransitionError::InvalidTransition {
                from: "empty".to_string(),
                to: "finished".to_string(),
            }),
            (Populating, Populate) => Err(TransitionError::InvalidTransition {
                from: "populating".to_string(),
                to: "populating".to_string(),
            }),
        }
    }

    fn is_terminal(&self) -> bool {
        matches!(self, AssemblyPhase::Validated | AssemblyPhase::Rejected)
    }
}
