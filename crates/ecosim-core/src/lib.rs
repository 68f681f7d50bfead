//! Simulation core for the Ecosim predator/prey environment.
//!
//! This crate owns the fixed-step tick cycle that drives the simulation:
//! Decision, Decay, Deaths, Contacts, Consumption, Mating, and Crowding.
//!
//! # Modules
//!
//! - [`action`] -- [`ActionSource`] trait plus the idle and wander stubs.
//! - [`clock`] -- Fixed-step simulation clock.
//! - [`config`] -- Configuration loading from `ecosim-config.yaml` into
//!   strongly-typed structs.
//! - [`registry`] -- Live-agent registry with collapse detection.
//! - [`tick`] -- The tick cycle driver over [`SimulationState`].
//!
//! [`ActionSource`]: action::ActionSource
//! [`SimulationState`]: tick::SimulationState

pub mod action;
pub mod clock;
pub mod config;
pub mod registry;
pub mod tick;

pub use action::{ActionChoice, ActionSource, IdleActionSource, WanderActionSource};
pub use clock::{DEFAULT_FIXED_DT, SimClock};
pub use config::{ConfigError, CrowdingConfig, RunConfig, SimulationConfig, SpawnConfig};
pub use registry::PopulationRegistry;
pub use tick::{DeathReport, SimulationState, TickSummary, run_tick};
