//! Shared type definitions for the Ecosim simulation.
//!
//! This crate is the single source of truth for the data model used across
//! the Ecosim workspace. Logic lives downstream: `ecosim-agents` mutates
//! vitals and blends traits, `ecosim-world` owns consumables and
//! placement, `ecosim-core` drives the tick cycle.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for entity identifiers
//! - [`enums`] -- Closed enumerations (species, consumable kind, death cause)
//! - [`structs`] -- Core entity structs (traits, vitals, agents, metrics)
//! - [`events`] -- Overlap events from the external physics layer

pub mod enums;
pub mod events;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{ConsumableKind, DeathCause, SpeciesKind};
pub use events::{OverlapEvent, OverlapPhase, OverlapTarget};
pub use ids::{AgentId, ConsumableId};
pub use structs::{
    Agent, AgentTraits, EpisodeMetrics, MATE_VITAL_THRESHOLD, Vec2, VitalState, clamp01, lerp,
};
