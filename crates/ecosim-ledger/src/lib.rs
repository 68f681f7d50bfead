//! Reward accounting for the Ecosim simulation.
//!
//! Maps simulation events (feeding, predation, courtship, crowding,
//! walls, death) to signed reward magnitudes and keeps the cumulative
//! reward/penalty books that telemetry snapshots at episode boundaries.
//!
//! # Modules
//!
//! - [`config`] -- Baselines and scaling references per event class
//! - [`ledger`] -- The [`RewardLedger`] calculator

pub mod config;
pub mod ledger;

pub use config::RewardConfig;
pub use ledger::{MatingPayout, RewardLedger};
