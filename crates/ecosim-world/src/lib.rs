//! Environment state for the Ecosim simulation.
//!
//! Owns the things that exist in the arena but are not creatures: the
//! arena bounds themselves, sustained consumables (food patches, water
//! sources, prey bodies), and the rejection-sampling placement used to
//! seed and replenish them.
//!
//! # Modules
//!
//! - [`consumable`] -- Sustained consumables drained over multiple ticks
//! - [`placement`] -- Arena geometry and clear-spot spawn placement

pub mod consumable;
pub mod placement;

pub use consumable::{ConsumeResult, SustainedConsumable};
pub use placement::{
    Arena, DEFAULT_CHECK_RADIUS, DEFAULT_MAX_ATTEMPTS, SpawnRegion, find_spawn_position,
};
