//! Core entity structs: positions, heritable traits, vitals, agents, and
//! the cumulative episode metrics.
//!
//! These are plain data carriers. The logic that mutates them lives in
//! `ecosim-agents` (vital mechanics, inheritance) and `ecosim-core`
//! (tick cycle, registry); constructing them from configuration is the
//! spawner's job.

use serde::{Deserialize, Serialize};

use crate::enums::SpeciesKind;
use crate::ids::{AgentId, ConsumableId};

/// Hunger/thirst level at or above which an adult agent may mate.
pub const MATE_VITAL_THRESHOLD: f32 = 0.7;

/// Clamp a vital value to the `[0, 1]` range.
pub fn clamp01(value: f32) -> f32 {
    value.clamp(0.0, 1.0)
}

/// Linear interpolation between `a` and `b` by `t` (unclamped).
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// A point or direction on the simulation's ground plane.
///
/// The excluded physics layer owns the third axis; the simulation core
/// only reasons about the XZ plane.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    /// East-west coordinate.
    pub x: f32,
    /// North-south coordinate.
    pub z: f32,
}

impl Vec2 {
    /// The origin / zero vector.
    pub const ZERO: Self = Self { x: 0.0, z: 0.0 };

    /// Create a new vector.
    pub const fn new(x: f32, z: f32) -> Self {
        Self { x, z }
    }

    /// Euclidean length.
    pub fn length(self) -> f32 {
        self.x.hypot(self.z)
    }

    /// Euclidean distance to another point.
    pub fn distance_to(self, other: Self) -> f32 {
        (self.x - other.x).hypot(self.z - other.z)
    }

    /// The point halfway between two positions (offspring spawn here).
    pub fn midpoint(self, other: Self) -> Self {
        Self {
            x: (self.x + other.x) / 2.0,
            z: (self.z + other.z) / 2.0,
        }
    }

    /// Return this vector scaled to unit length, or zero if degenerate.
    pub fn normalized(self) -> Self {
        let len = self.length();
        if len <= f32::EPSILON {
            Self::ZERO
        } else {
            Self {
                x: self.x / len,
                z: self.z / len,
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Heritable traits
// ---------------------------------------------------------------------------

/// Heritable traits, immutable after birth.
///
/// New values only come from random seeding or from the inheritance
/// blend; every gene is clamped to its bound range at that point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgentTraits {
    /// Maximum locomotion speed.
    pub speed: f32,
    /// Perception range multiplier for the external sensor rig.
    pub sight_range: f32,
    /// Body size reached at full growth.
    pub max_size: f32,
    /// Age at which the agent dies of natural causes.
    pub max_lifetime: f32,
    /// Age at which the agent reaches adult size.
    pub growth_time: f32,
    /// Generation number: 0 for seed agents, parents' max + 1 for offspring.
    pub generation: u32,
}

// ---------------------------------------------------------------------------
// Vital state
// ---------------------------------------------------------------------------

/// Mutable per-agent vitals, owned exclusively by one agent.
///
/// `hunger`, `thirst`, and `health` stay in `[0, 1]`; `age` only grows.
/// The two pause stamps suspend hunger/thirst decay for a short window
/// after feeding so the reward signal is not immediately masked.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VitalState {
    /// Satiation level: 0 = starving, 1 = full.
    pub hunger: f32,
    /// Hydration level: 0 = dehydrated, 1 = full.
    pub thirst: f32,
    /// Health level: 0 = dead, 1 = unharmed.
    pub health: f32,
    /// Age in simulation time units. Monotonic.
    pub age: f32,
    /// Number of offspring produced so far.
    pub num_children: u32,
    /// Simulation time until which hunger decay is suspended.
    pub hunger_pause_until: f64,
    /// Simulation time until which thirst decay is suspended.
    pub thirst_pause_until: f64,
}

impl VitalState {
    /// Fresh vitals for a newborn or seed agent: everything full, age zero,
    /// pause stamps cleared.
    pub const fn full() -> Self {
        Self {
            hunger: 1.0,
            thirst: 1.0,
            health: 1.0,
            age: 0.0,
            num_children: 0,
            hunger_pause_until: 0.0,
            thirst_pause_until: 0.0,
        }
    }

    /// Current body size, growing linearly from 1 to `max_size` over the
    /// growth period.
    pub fn current_size(&self, traits: &AgentTraits) -> f32 {
        lerp(1.0, traits.max_size, clamp01(self.age / traits.growth_time))
    }

    /// Whether the agent has finished growing.
    pub fn is_adult(&self, traits: &AgentTraits) -> bool {
        self.age >= traits.growth_time
    }

    /// Whether the agent is currently eligible to mate: adult and both
    /// hunger and thirst at comfortable levels.
    pub fn can_mate(&self, traits: &AgentTraits) -> bool {
        self.is_adult(traits)
            && self.hunger >= MATE_VITAL_THRESHOLD
            && self.thirst >= MATE_VITAL_THRESHOLD
    }

    /// Whether the agent is alive. Becomes false exactly once; the death
    /// path unregisters the agent so it can never flip back.
    pub fn is_alive(&self, traits: &AgentTraits) -> bool {
        self.hunger > 0.0
            && self.thirst > 0.0
            && self.health > 0.0
            && self.age < traits.max_lifetime
    }
}

// ---------------------------------------------------------------------------
// Agent
// ---------------------------------------------------------------------------

/// One live creature in the simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    /// Unique identifier.
    pub id: AgentId,
    /// Species, fixed at birth.
    pub species: SpeciesKind,
    /// Heritable traits, fixed at birth.
    pub traits: AgentTraits,
    /// Mutable vitals.
    pub vitals: VitalState,
    /// Current position on the ground plane.
    pub position: Vec2,
    /// Lineage: `None` for seed agents, both parent IDs for offspring.
    pub parents: Option<(AgentId, AgentId)>,
    /// Accumulated reward over this agent's lifetime. Used as the fitness
    /// weight during inheritance.
    pub lifetime_reward: f32,
    /// The Prey-kind consumable attached to this agent's body, if edible.
    pub body: Option<ConsumableId>,
    /// Movement vector chosen this tick, applied by the external
    /// locomotion layer.
    pub current_move: Vec2,
    /// Brake scalar in `[0, 1]` chosen this tick.
    pub brake: f32,
}

// ---------------------------------------------------------------------------
// Episode metrics
// ---------------------------------------------------------------------------

/// Cumulative counters for the whole run.
///
/// All fields except the live counts and generation highs accumulate
/// across episode resets; per-episode values are recovered by diffing
/// against the previous [`snapshot`](EpisodeMetrics::delta).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EpisodeMetrics {
    /// Number of completed episodes (population collapses).
    pub total_episodes: u32,

    /// Sum of all positive reward magnitudes handed out.
    pub total_reward_given: f32,
    /// Sum of all penalty magnitudes handed out (stored positive).
    pub total_penalty_given: f32,
    /// Portion of the penalty total caused by crowding.
    pub crowding_penalty: f32,
    /// Portion of the reward total paid as partial courtship credit.
    pub partial_mating_reward: f32,

    /// Prey spawned since the run started.
    pub total_prey_spawned: u32,
    /// Predators spawned since the run started.
    pub total_predators_spawned: u32,
    /// Prey currently alive.
    pub current_prey_count: u32,
    /// Predators currently alive.
    pub current_predator_count: u32,

    /// Food consumables fully drained.
    pub food_consumed: u32,
    /// Water consumables fully drained.
    pub water_consumed: u32,

    /// Completed matings.
    pub total_matings: u32,
    /// Highest prey generation seen this episode.
    pub highest_prey_generation: u32,
    /// Highest predator generation seen this episode.
    pub highest_predator_generation: u32,

    /// Prey fully eaten by predators.
    pub animals_killed: u32,
    /// Agents that died of old age.
    pub reached_life_end: u32,
    /// Agents that starved to death.
    pub died_from_hunger: u32,
    /// Agents that died of dehydration.
    pub died_from_thirst: u32,
    /// Agents whose health was exhausted.
    pub died_from_exhaustion: u32,
}

impl EpisodeMetrics {
    /// Compute this-episode values by subtracting a previous snapshot.
    ///
    /// Counter fields are diffed; live counts and generation highs are
    /// instantaneous values and are reported as-is.
    pub fn delta(&self, previous: &Self) -> Self {
        Self {
            total_episodes: self.total_episodes.saturating_sub(previous.total_episodes),
            total_reward_given: self.total_reward_given - previous.total_reward_given,
            total_penalty_given: self.total_penalty_given - previous.total_penalty_given,
            crowding_penalty: self.crowding_penalty - previous.crowding_penalty,
            partial_mating_reward: self.partial_mating_reward - previous.partial_mating_reward,
            total_prey_spawned: self
                .total_prey_spawned
                .saturating_sub(previous.total_prey_spawned),
            total_predators_spawned: self
                .total_predators_spawned
                .saturating_sub(previous.total_predators_spawned),
            current_prey_count: self.current_prey_count,
            current_predator_count: self.current_predator_count,
            food_consumed: self.food_consumed.saturating_sub(previous.food_consumed),
            water_consumed: self.water_consumed.saturating_sub(previous.water_consumed),
            total_matings: self.total_matings.saturating_sub(previous.total_matings),
            highest_prey_generation: self.highest_prey_generation,
            highest_predator_generation: self.highest_predator_generation,
            animals_killed: self.animals_killed.saturating_sub(previous.animals_killed),
            reached_life_end: self
                .reached_life_end
                .saturating_sub(previous.reached_life_end),
            died_from_hunger: self
                .died_from_hunger
                .saturating_sub(previous.died_from_hunger),
            died_from_thirst: self
                .died_from_thirst
                .saturating_sub(previous.died_from_thirst),
            died_from_exhaustion: self
                .died_from_exhaustion
                .saturating_sub(previous.died_from_exhaustion),
        }
    }
}
