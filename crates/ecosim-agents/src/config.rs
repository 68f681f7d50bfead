//! Configuration for agent vital mechanics, trait bounds, and mating.
//!
//! All tunables are plain numeric fields with serde support so the engine
//! can load them from the run configuration file; every struct carries
//! defaults matching the reference parameter set, so tests and embedders
//! can start from `Default::default()` and override single fields.

use rand::Rng;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Vital mechanics
// ---------------------------------------------------------------------------

/// Tunables for the per-tick vital update.
///
/// Rates are per time unit and get multiplied by the tick's `dt`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VitalsConfig {
    /// Hunger lost per time unit (default: 0.03).
    pub hunger_decay_rate: f32,

    /// Thirst lost per time unit (default: 0.045).
    pub thirst_decay_rate: f32,

    /// Health lost per time unit while either vital is critically low
    /// (default: 0.05).
    pub health_decay_rate: f32,

    /// Health regained per time unit while both vitals are comfortable
    /// (default: 0.025).
    pub health_regen_rate: f32,

    /// Below this hunger or thirst level, health starts decaying
    /// (default: 0.3).
    pub low_vital_threshold: f32,

    /// At or above this level on both vitals, health regenerates
    /// (default: 0.5). The gap between the two thresholds is a dead zone
    /// where health holds steady, preventing oscillation at the boundary.
    pub regen_vital_threshold: f32,

    /// How long hunger/thirst decay is suspended after feeding or
    /// drinking, in time units (default: 2.0).
    pub feed_pause: f64,
}

impl Default for VitalsConfig {
    fn default() -> Self {
        Self {
            hunger_decay_rate: 0.03,
            thirst_decay_rate: 0.045,
            health_decay_rate: 0.05,
            health_regen_rate: 0.025,
            low_vital_threshold: 0.3,
            regen_vital_threshold: 0.5,
            feed_pause: 2.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Trait bounds and seeding
// ---------------------------------------------------------------------------

/// Closed interval a gene value must stay inside.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeneRange {
    /// Lower bound, inclusive.
    pub min: f32,
    /// Upper bound, inclusive.
    pub max: f32,
}

impl GeneRange {
    /// A new range.
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Clamp a value into this range.
    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }

    /// Draw a uniform value from this range.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> f32 {
        rng.random_range(self.min..=self.max)
    }
}

/// Valid ranges for each heritable trait, enforced at inheritance time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraitBounds {
    /// Locomotion speed bounds (default: [5, 25]).
    pub speed: GeneRange,
    /// Sight range multiplier bounds (default: [0.5, 3]).
    pub sight_range: GeneRange,
    /// Adult body size bounds (default: [1, 3.5]).
    pub max_size: GeneRange,
    /// Lifespan bounds (default: [30, 100]).
    pub max_lifetime: GeneRange,
    /// Growth period bounds (default: [10, 30]).
    pub growth_time: GeneRange,
}

impl Default for TraitBounds {
    fn default() -> Self {
        Self {
            speed: GeneRange::new(5.0, 25.0),
            sight_range: GeneRange::new(0.5, 3.0),
            max_size: GeneRange::new(1.0, 3.5),
            max_lifetime: GeneRange::new(30.0, 100.0),
            growth_time: GeneRange::new(10.0, 30.0),
        }
    }
}

/// Sampling ranges for generation-zero seed agents.
///
/// Deliberately narrower than [`TraitBounds`]: seed populations start in
/// a viable middle band and evolution explores outward from there.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedTraitRanges {
    /// Seed speed range (default: [10, 25]).
    pub speed: GeneRange,
    /// Seed sight range (default: [0.8, 1.5]).
    pub sight_range: GeneRange,
    /// Seed adult size range (default: [1.5, 3.5]).
    pub max_size: GeneRange,
    /// Seed lifespan range (default: [90, 100]).
    pub max_lifetime: GeneRange,
    /// Fixed growth period for seed agents (default: 20).
    pub growth_time: f32,
}

impl Default for SeedTraitRanges {
    fn default() -> Self {
        Self {
            speed: GeneRange::new(10.0, 25.0),
            sight_range: GeneRange::new(0.8, 1.5),
            max_size: GeneRange::new(1.5, 3.5),
            max_lifetime: GeneRange::new(90.0, 100.0),
            growth_time: 20.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Genetics
// ---------------------------------------------------------------------------

/// Mutation parameters for the inheritance blend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneticsConfig {
    /// Symmetric uniform mutation range applied per gene (default: 0.05).
    pub mutation_range: f32,
    /// Probability of an amplified mutation event (default: 0.01).
    pub large_mutation_chance: f64,
    /// Amplification factor range for the rare event (default: [3, 5]).
    pub amplification: GeneRange,
}

impl Default for GeneticsConfig {
    fn default() -> Self {
        Self {
            mutation_range: 0.05,
            large_mutation_chance: 0.01,
            amplification: GeneRange::new(3.0, 5.0),
        }
    }
}

// ---------------------------------------------------------------------------
// Mating
// ---------------------------------------------------------------------------

/// Courtship schedule and reproduction cost.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatingConfig {
    /// Total courtship duration in time units (default: 2.0).
    pub courtship_duration: f32,
    /// Interval between courtship sub-steps (default: 0.2). Each elapsed
    /// sub-step pays the partial courtship reward to the initiator.
    pub courtship_interval: f32,
    /// Fraction of the full hunger and thirst bars each parent pays on a
    /// successful mating (default: 0.2).
    pub vitality_cost: f32,
}

impl Default for MatingConfig {
    fn default() -> Self {
        Self {
            courtship_duration: 2.0,
            courtship_interval: 0.2,
            vitality_cost: 0.2,
        }
    }
}
