//! Closed enumerations shared across the simulation.
//!
//! Species-dependent behavior (consumption eligibility, mating group
//! rewards) is selected by matching on [`SpeciesKind`] rather than by
//! subtyping, so every branch is visible at the match site.

use serde::{Deserialize, Serialize};

/// The species of an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeciesKind {
    /// Herbivore: eats food, drinks water, is edible by predators.
    Prey,
    /// Carnivore: hunts prey, drinks water.
    Predator,
}

impl core::fmt::Display for SpeciesKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Prey => write!(f, "prey"),
            Self::Predator => write!(f, "predator"),
        }
    }
}

/// What kind of resource a sustained consumable represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsumableKind {
    /// Plant food; raises hunger when drained.
    Food,
    /// Water source; raises thirst when drained.
    Water,
    /// A living prey agent's body; raises a predator's hunger and damages
    /// the prey when drained.
    Prey,
}

impl core::fmt::Display for ConsumableKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Food => write!(f, "food"),
            Self::Water => write!(f, "water"),
            Self::Prey => write!(f, "prey"),
        }
    }
}

/// The cause of an agent's death.
///
/// When several conditions hold at once the cause is classified by
/// priority: age limit first, then starvation, dehydration, and finally
/// health exhaustion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeathCause {
    /// Age reached the agent's maximum lifetime.
    Natural,
    /// Hunger reached zero.
    Starvation,
    /// Thirst reached zero.
    Dehydration,
    /// Health reached zero (predation damage or prolonged deficiency).
    Exhaustion,
}

impl core::fmt::Display for DeathCause {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Natural => write!(f, "natural"),
            Self::Starvation => write!(f, "starvation"),
            Self::Dehydration => write!(f, "dehydration"),
            Self::Exhaustion => write!(f, "exhaustion"),
        }
    }
}
