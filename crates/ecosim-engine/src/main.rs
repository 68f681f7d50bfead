//! Engine binary for the Ecosim simulation.
//!
//! Wires together the tick cycle, spawn balancer, contact adapter, and
//! telemetry recorders, then runs the simulation loop.
//!
//! # Startup sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from `ecosim-config.yaml`
//! 3. Open the telemetry files
//! 4. Populate the arena with seed agents and resources
//! 5. Run the loop: contacts, tick, telemetry, balancer, reset on
//!    collapse, until the configured tick budget runs out

mod contact;
mod error;
mod spawner;

use std::path::Path;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use ecosim_core::{
    DeathReport, SimulationConfig, SimulationState, WanderActionSource, run_tick,
};
use ecosim_telemetry::{AgentDeathRecord, TelemetryRecorder};

use crate::contact::ContactAdapter;
use crate::error::EngineError;
use crate::spawner::SpawnBalancer;

/// Ticks between status log lines (10 time units at the default step).
const STATUS_INTERVAL: u64 = 500;

/// Default configuration file path, relative to the working directory.
const CONFIG_PATH: &str = "ecosim-config.yaml";

/// Directory receiving the per-run telemetry files.
const TELEMETRY_DIR: &str = "telemetry";

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("ecosim-engine starting");

    let config = load_config()?;
    info!(
        seed = config.run.seed,
        max_ticks = config.run.max_ticks,
        fixed_dt = config.fixed_dt,
        "configuration loaded"
    );

    let mut recorder = TelemetryRecorder::create(Path::new(TELEMETRY_DIR))?;
    let mut actions = WanderActionSource::new(config.run.seed);
    let mut state = SimulationState::new(config);
    let mut balancer = SpawnBalancer::new(&state.config.spawn, state.clock.now());
    let mut adapter = ContactAdapter::new();
    spawner::initial_populate(&mut state);

    let max_ticks = state.config.run.max_ticks;
    loop {
        let events = adapter.step(&mut state);
        let summary = run_tick(&mut state, &events, &mut actions);

        for death in &summary.deaths {
            recorder.record_death(&death_record(summary.tick, death))?;
        }
        let now = state.clock.now();
        balancer.maintain(&mut state, now);

        if summary.collapsed {
            reset_episode(&mut state, &mut balancer, &mut adapter, &mut recorder)?;
        }
        if summary.tick % STATUS_INTERVAL == 0 {
            info!(
                tick = summary.tick,
                alive = summary.alive,
                mean_age = summary.mean_age,
                prey = state.metrics.current_prey_count,
                predators = state.metrics.current_predator_count,
                "tick status"
            );
        }
        if max_ticks > 0 && summary.tick + 1 >= max_ticks {
            break;
        }
    }

    // Final partial-episode row so short runs still produce output.
    recorder.record_episode(&state.metrics)?;
    info!(
        episodes = state.metrics.total_episodes,
        ticks = state.clock.tick(),
        "run complete"
    );
    Ok(())
}

/// Load the YAML configuration, falling back to defaults when the file
/// does not exist.
fn load_config() -> Result<SimulationConfig, EngineError> {
    let path = Path::new(CONFIG_PATH);
    if path.exists() {
        Ok(SimulationConfig::from_file(path)?)
    } else {
        warn!(path = CONFIG_PATH, "config file not found, using defaults");
        Ok(SimulationConfig::default())
    }
}

/// Map a tick-cycle death report onto the telemetry record.
fn death_record(tick: u64, death: &DeathReport) -> AgentDeathRecord {
    AgentDeathRecord {
        tick,
        agent: death.agent,
        species: death.species,
        cause: death.cause,
        generation: death.traits.generation,
        parents: death.parents,
        traits: death.traits,
        age: death.age,
        num_children: death.num_children,
        lifetime_reward: death.lifetime_reward,
    }
}

/// Reset after a population collapse: log the episode row, tear down the
/// old world from a stable snapshot, and repopulate.
fn reset_episode(
    state: &mut SimulationState,
    balancer: &mut SpawnBalancer,
    adapter: &mut ContactAdapter,
    recorder: &mut TelemetryRecorder,
) -> Result<(), EngineError> {
    state.metrics.total_episodes += 1;
    recorder.record_episode(&state.metrics)?;
    info!(
        episode = state.metrics.total_episodes,
        tick = state.clock.tick(),
        "population collapsed, resetting episode"
    );

    state.registry.begin_reset();
    for id in state.registry.snapshot() {
        let species = state.agents.remove(&id).map(|agent| agent.species);
        if let Some(species) = species {
            let _ = state.registry.unregister(id, species, &mut state.metrics);
        }
    }
    state.agents.clear();
    state.consumables.clear();
    state.consumption_tasks.clear();
    state.mating_tasks.clear();
    state.contacts.clear();
    adapter.clear();
    state.metrics.highest_prey_generation = 0;
    state.metrics.highest_predator_generation = 0;

    spawner::initial_populate(state);
    balancer.reschedule(&state.config.spawn, state.clock.now());
    state.registry.end_reset();
    Ok(())
}
