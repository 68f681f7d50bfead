//! Append-only telemetry recorders.
//!
//! A run produces two files under the telemetry directory, both named
//! with the wall-clock start time:
//!
//! - `ecosim_<timestamp>.csv` -- one row per completed episode, holding
//!   the episode-local delta of the cumulative metrics (the first row is
//!   the raw counters, since the previous snapshot starts at zero).
//! - `agents_<timestamp>.jsonl` -- one JSON record per agent at the
//!   moment of death, for lineage and fitness analysis offline.
//!
//! Both files are flushed after every row so a crashed run loses at most
//! the row being written.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use ecosim_types::{AgentId, AgentTraits, DeathCause, EpisodeMetrics, SpeciesKind};

use crate::error::TelemetryError;

const EPISODE_HEADER: &str = "episode,prey_spawned,predators_spawned,prey_alive,predators_alive,\
                              food_consumed,water_consumed,matings,kills,life_end_deaths,\
                              hunger_deaths,thirst_deaths,exhaustion_deaths,\
                              highest_prey_generation,highest_predator_generation,\
                              reward_given,penalty_given,crowding_penalty,partial_mating_reward";

/// Everything recorded about one agent when it dies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentDeathRecord {
    /// Tick at which the death was settled.
    pub tick: u64,
    /// The dead agent.
    pub agent: AgentId,
    /// Its species.
    pub species: SpeciesKind,
    /// Why it died.
    pub cause: DeathCause,
    /// Generation number.
    pub generation: u32,
    /// Lineage, absent for seed agents.
    pub parents: Option<(AgentId, AgentId)>,
    /// The heritable traits it carried.
    pub traits: AgentTraits,
    /// Age at death in simulation time units.
    pub age: f32,
    /// Offspring produced over its lifetime.
    pub num_children: u32,
    /// Final lifetime reward, terminal reward included.
    pub lifetime_reward: f32,
}

/// Writes the per-run telemetry files.
#[derive(Debug)]
pub struct TelemetryRecorder {
    episodes: BufWriter<File>,
    deaths: BufWriter<File>,
    episode_path: PathBuf,
    deaths_path: PathBuf,
    previous: EpisodeMetrics,
}

impl TelemetryRecorder {
    /// Create the telemetry directory (if needed) and open fresh,
    /// timestamped episode and death files.
    ///
    /// # Errors
    ///
    /// Returns [`TelemetryError::Io`] if the directory or either file
    /// cannot be created.
    pub fn create(dir: &Path) -> Result<Self, TelemetryError> {
        std::fs::create_dir_all(dir)?;
        let stamp = Utc::now().format("%Y%m%d_%H%M%S");
        let episode_path = dir.join(format!("ecosim_{stamp}.csv"));
        let deaths_path = dir.join(format!("agents_{stamp}.jsonl"));

        let mut episodes = BufWriter::new(File::create(&episode_path)?);
        writeln!(episodes, "{EPISODE_HEADER}")?;
        episodes.flush()?;
        let deaths = BufWriter::new(File::create(&deaths_path)?);

        info!(episodes = %episode_path.display(), deaths = %deaths_path.display(), "telemetry files opened");
        Ok(Self {
            episodes,
            deaths,
            episode_path,
            deaths_path,
            previous: EpisodeMetrics::default(),
        })
    }

    /// Path of the episode CSV file.
    pub fn episode_path(&self) -> &Path {
        &self.episode_path
    }

    /// Path of the death JSONL file.
    pub fn deaths_path(&self) -> &Path {
        &self.deaths_path
    }

    /// Append one episode row holding the delta from the previous
    /// snapshot, then remember the current counters.
    ///
    /// # Errors
    ///
    /// Returns [`TelemetryError::Io`] if the row cannot be written.
    pub fn record_episode(&mut self, metrics: &EpisodeMetrics) -> Result<(), TelemetryError> {
        let row = metrics.delta(&self.previous);
        writeln!(
            self.episodes,
            "{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{:.3},{:.3},{:.3},{:.3}",
            metrics.total_episodes,
            row.total_prey_spawned,
            row.total_predators_spawned,
            row.current_prey_count,
            row.current_predator_count,
            row.food_consumed,
            row.water_consumed,
            row.total_matings,
            row.animals_killed,
            row.reached_life_end,
            row.died_from_hunger,
            row.died_from_thirst,
            row.died_from_exhaustion,
            row.highest_prey_generation,
            row.highest_predator_generation,
            row.total_reward_given,
            row.total_penalty_given,
            row.crowding_penalty,
            row.partial_mating_reward,
        )?;
        self.episodes.flush()?;
        self.previous = metrics.clone();
        Ok(())
    }

    /// Append one death record as a single JSON line.
    ///
    /// # Errors
    ///
    /// Returns [`TelemetryError::Encode`] if the record cannot be
    /// serialized, or [`TelemetryError::Io`] if it cannot be written.
    pub fn record_death(&mut self, record: &AgentDeathRecord) -> Result<(), TelemetryError> {
        let line = serde_json::to_string(record)?;
        writeln!(self.deaths, "{line}")?;
        self.deaths.flush()?;
        Ok(())
    }
}
