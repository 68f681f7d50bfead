//! Error types for agent operations.
//!
//! These cover precondition failures when starting a sub-task. They are
//! transient by design: the driver logs them at `debug` and moves on;
//! none of them ever aborts the simulation.

use thiserror::Error;

use ecosim_types::{ConsumableKind, SpeciesKind};

/// Why a courtship could not start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatingBlockReason {
    /// The two agents are different species.
    SpeciesMismatch,
    /// One of the agents is already running another task.
    Busy,
    /// One of the agents is juvenile or below the vital thresholds.
    Ineligible,
}

impl std::fmt::Display for MatingBlockReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::SpeciesMismatch => "species mismatch",
            Self::Busy => "participant busy",
            Self::Ineligible => "participant ineligible",
        };
        f.write_str(s)
    }
}

/// Errors raised by agent sub-task preconditions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AgentError {
    /// The species cannot consume this kind of resource.
    #[error("{species} cannot consume {kind}")]
    IneligibleConsumable {
        /// The would-be consumer's species.
        species: SpeciesKind,
        /// The refused consumable kind.
        kind: ConsumableKind,
    },

    /// A courtship precondition failed.
    #[error("mating blocked: {reason}")]
    MatingBlocked {
        /// Which precondition failed.
        reason: MatingBlockReason,
    },
}
