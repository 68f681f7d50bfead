//! Configuration loading and the top-level config structure.
//!
//! The canonical configuration lives in `ecosim-config.yaml` at the
//! project root. This module defines the strongly-typed structs that
//! mirror the YAML structure and a loader that reads the file. Every
//! section defaults to the reference parameter set, so an empty or
//! missing section is always valid.

use std::path::Path;

use serde::{Deserialize, Serialize};

use ecosim_agents::{GeneticsConfig, MatingConfig, SeedTraitRanges, TraitBounds, VitalsConfig};
use ecosim_ledger::RewardConfig;
use ecosim_world::Arena;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Run boundary and reproducibility settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Maximum number of ticks before the run ends (0 = unlimited).
    pub max_ticks: u64,
    /// Random seed for mutation and placement draws.
    pub seed: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            max_ticks: 0,
            seed: 42,
        }
    }
}

/// Initial population sizes and resource balancing parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    /// Prey spawned at episode start (default: 10).
    pub initial_prey: u32,
    /// Predators spawned at episode start (default: 5).
    pub initial_predators: u32,
    /// Food patches spawned at episode start (default: 20).
    pub initial_food: u32,
    /// Water sources spawned at episode start (default: 10).
    pub initial_water: u32,

    /// Time units between food re-evaluations (default: 10).
    pub food_interval: f64,
    /// Time units between water re-evaluations (default: 20).
    pub water_interval: f64,
    /// Food patches maintained per live prey (default: 2.0).
    pub food_ratio: f32,
    /// Water sources maintained per live prey (default: 1.0).
    pub water_ratio: f32,
    /// Minimum food batch when any top-up is due (default: 5).
    pub food_min_batch: u32,
    /// Minimum water batch when any top-up is due (default: 2).
    pub water_min_batch: u32,

    /// Clearance radius for spawn placement (default: 1.5).
    pub check_radius: f32,
    /// Placement attempts before skipping a spawn (default: 10).
    pub max_spawn_attempts: u32,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            initial_prey: 10,
            initial_predators: 5,
            initial_food: 20,
            initial_water: 10,
            food_interval: 10.0,
            water_interval: 20.0,
            food_ratio: 2.0,
            water_ratio: 1.0,
            food_min_batch: 5,
            water_min_batch: 2,
            check_radius: 1.5,
            max_spawn_attempts: 10,
        }
    }
}

/// Crowding detection parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrowdingConfig {
    /// Radius within which same-species neighbors count as crowding
    /// (default: 4.0).
    pub radius: f32,
}

impl Default for CrowdingConfig {
    fn default() -> Self {
        Self { radius: 4.0 }
    }
}

/// Top-level simulation configuration.
///
/// Mirrors the structure of `ecosim-config.yaml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Fixed tick step size in time units (default: 0.02).
    pub fixed_dt: f32,
    /// Arena geometry.
    pub arena: Arena,
    /// Vital decay/regen rates and thresholds.
    pub vitals: VitalsConfig,
    /// Valid gene ranges enforced at inheritance.
    pub trait_bounds: TraitBounds,
    /// Sampling ranges for generation-zero agents.
    pub seed_traits: SeedTraitRanges,
    /// Mutation parameters.
    pub genetics: GeneticsConfig,
    /// Courtship schedule and cost.
    pub mating: MatingConfig,
    /// Reward baselines.
    pub rewards: RewardConfig,
    /// Initial populations and resource balancing.
    pub spawn: SpawnConfig,
    /// Crowding detection.
    pub crowding: CrowdingConfig,
    /// Run boundaries and seed.
    pub run: RunConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            fixed_dt: crate::clock::DEFAULT_FIXED_DT,
            arena: Arena::default(),
            vitals: VitalsConfig::default(),
            trait_bounds: TraitBounds::default(),
            seed_traits: SeedTraitRanges::default(),
            genetics: GeneticsConfig::default(),
            mating: MatingConfig::default(),
            rewards: RewardConfig::default(),
            spawn: SpawnConfig::default(),
            crowding: CrowdingConfig::default(),
            run: RunConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        Ok(config)
    }
}
