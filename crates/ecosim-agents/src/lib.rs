//! Agent lifecycle logic for the Ecosim simulation.
//!
//! Everything that happens *to* or *between* creatures lives here: the
//! per-tick vital update, death classification, fitness-weighted
//! inheritance, and the two timed sub-task state machines (consumption
//! and courtship). The tick driver in `ecosim-core` owns the collections
//! and calls into this crate one agent or one task at a time.
//!
//! # Modules
//!
//! - [`config`] -- Tunables: vital rates, trait bounds, mating schedule
//! - [`vitals`] -- Per-tick decay/regen and feeding
//! - [`death`] -- Death cause classification
//! - [`genetics`] -- Fitness-weighted trait inheritance
//! - [`consumption`] -- The drain-over-time state machine
//! - [`mating`] -- The courtship state machine
//! - [`agent`] -- Seed and offspring construction
//! - [`error`] -- Precondition errors

pub mod agent;
pub mod config;
pub mod consumption;
pub mod death;
pub mod error;
pub mod genetics;
pub mod mating;
pub mod vitals;

pub use agent::{spawn_offspring, spawn_seed_agent};
pub use config::{
    GeneRange, GeneticsConfig, MatingConfig, SeedTraitRanges, TraitBounds, VitalsConfig,
};
pub use consumption::{ConsumptionTask, DrainOutcome, StopReason, check_eligibility};
pub use death::classify_death;
pub use error::{AgentError, MatingBlockReason};
pub use genetics::inherit;
pub use mating::{CourtshipOutcome, MatingTask, pay_mating_cost, validate_pair};
pub use vitals::{apply_vital_tick, drink, eat};
