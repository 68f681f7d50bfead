//! Spawn balancer: initial population and periodic resource top-ups.
//!
//! At episode start [`initial_populate`] seeds the arena with the
//! configured populations, species segregated by quadrant so predators
//! do not wipe out the prey before the first decisions land. While the
//! episode runs the [`SpawnBalancer`] re-evaluates each resource kind on
//! its own interval and tops the pool up toward a target proportional to
//! the live prey count.

use tracing::{debug, info};

use ecosim_agents::spawn_seed_agent;
use ecosim_core::{SimulationState, SpawnConfig};
use ecosim_types::{ConsumableKind, SpeciesKind, Vec2};
use ecosim_world::{SpawnRegion, SustainedConsumable, find_spawn_position};

/// Schedules the periodic resource re-evaluations.
#[derive(Debug, Clone, Copy)]
pub struct SpawnBalancer {
    next_food_check: f64,
    next_water_check: f64,
}

impl SpawnBalancer {
    /// A balancer whose first re-evaluations are due one full interval
    /// after `now`.
    pub fn new(config: &SpawnConfig, now: f64) -> Self {
        Self {
            next_food_check: now + config.food_interval,
            next_water_check: now + config.water_interval,
        }
    }

    /// Run any resource re-evaluations whose time has come.
    ///
    /// Top-ups aim for `ceil(prey_count * ratio)` of each kind; when a
    /// deficit exists the batch is never smaller than the configured
    /// minimum, and when the pool is already at target nothing spawns.
    pub fn maintain(&mut self, state: &mut SimulationState, now: f64) {
        let spawn = state.config.spawn;
        if now >= self.next_food_check {
            self.next_food_check += spawn.food_interval;
            top_up(state, ConsumableKind::Food, spawn.food_ratio, spawn.food_min_batch);
        }
        if now >= self.next_water_check {
            self.next_water_check += spawn.water_interval;
            top_up(state, ConsumableKind::Water, spawn.water_ratio, spawn.water_min_batch);
        }
    }

    /// Reschedule both re-evaluations after an episode reset.
    pub fn reschedule(&mut self, config: &SpawnConfig, now: f64) {
        self.next_food_check = now + config.food_interval;
        self.next_water_check = now + config.water_interval;
    }
}

/// Seed the arena with the configured initial populations.
///
/// Prey spawn in the northeast quadrant, predators in the southwest;
/// food and water land anywhere clear.
pub fn initial_populate(state: &mut SimulationState) {
    let spawn = state.config.spawn;
    spawn_creatures(state, SpeciesKind::Prey, spawn.initial_prey, SpawnRegion::NorthEast);
    spawn_creatures(
        state,
        SpeciesKind::Predator,
        spawn.initial_predators,
        SpawnRegion::SouthWest,
    );
    spawn_resources(state, ConsumableKind::Food, spawn.initial_food);
    spawn_resources(state, ConsumableKind::Water, spawn.initial_water);
    info!(
        prey = spawn.initial_prey,
        predators = spawn.initial_predators,
        food = spawn.initial_food,
        water = spawn.initial_water,
        "arena populated"
    );
}

fn top_up(state: &mut SimulationState, kind: ConsumableKind, ratio: f32, min_batch: u32) {
    let prey_count = state.metrics.current_prey_count;
    let target = (prey_count as f32 * ratio).ceil() as u32;
    let current = state
        .consumables
        .values()
        .filter(|c| c.kind == kind)
        .count() as u32;
    let deficit = target.saturating_sub(current);
    if deficit == 0 {
        debug!(%kind, current, target, "resource pool at target");
        return;
    }
    let batch = deficit.max(min_batch);
    debug!(%kind, current, target, batch, "topping up resource pool");
    spawn_resources(state, kind, batch);
}

fn spawn_creatures(
    state: &mut SimulationState,
    species: SpeciesKind,
    count: u32,
    region: SpawnRegion,
) {
    for _ in 0..count {
        let Some(position) = clear_position(state, region) else {
            continue;
        };
        let agent = spawn_seed_agent(species, position, &state.config.seed_traits, &mut state.rng);
        state.insert_agent(agent);
    }
}

fn spawn_resources(state: &mut SimulationState, kind: ConsumableKind, count: u32) {
    for _ in 0..count {
        let Some(position) = clear_position(state, SpawnRegion::Any) else {
            continue;
        };
        let consumable = match kind {
            ConsumableKind::Food => SustainedConsumable::food(position),
            // Prey bodies are attached at agent insertion, never
            // free-spawned.
            ConsumableKind::Water | ConsumableKind::Prey => SustainedConsumable::water(position),
        };
        state.consumables.insert(consumable.id, consumable);
    }
}

/// Rejection-sample a position clear of every agent and consumable.
fn clear_position(state: &mut SimulationState, region: SpawnRegion) -> Option<Vec2> {
    let blockers: Vec<Vec2> = state
        .agents
        .values()
        .map(|a| a.position)
        .chain(state.consumables.values().map(|c| c.position))
        .collect();
    find_spawn_position(
        &state.config.arena,
        region,
        &blockers,
        state.config.spawn.check_radius,
        state.config.spawn.max_spawn_attempts,
        &mut state.rng,
    )
}

#[cfg(test)]
mod tests {
    use ecosim_core::SimulationConfig;

    use super::*;

    fn populated_state() -> (SimulationState, SpawnBalancer) {
        let mut state = SimulationState::new(SimulationConfig::default());
        let balancer = SpawnBalancer::new(&state.config.spawn, 0.0);
        initial_populate(&mut state);
        (state, balancer)
    }

    fn count_kind(state: &SimulationState, kind: ConsumableKind) -> u32 {
        state
            .consumables
            .values()
            .filter(|c| c.kind == kind)
            .count() as u32
    }

    #[test]
    fn initial_populate_seeds_the_configured_counts() {
        let (state, _) = populated_state();
        assert_eq!(state.metrics.current_prey_count, 10);
        assert_eq!(state.metrics.current_predator_count, 5);
        assert_eq!(count_kind(&state, ConsumableKind::Food), 20);
        assert_eq!(count_kind(&state, ConsumableKind::Water), 10);
        // Each prey also carries its body consumable.
        assert_eq!(count_kind(&state, ConsumableKind::Prey), 10);
    }

    #[test]
    fn species_spawn_in_opposite_quadrants() {
        let (state, _) = populated_state();
        for agent in state.agents.values() {
            match agent.species {
                SpeciesKind::Prey => {
                    assert!(agent.position.x >= 0.0);
                    assert!(agent.position.z >= 0.0);
                }
                SpeciesKind::Predator => {
                    assert!(agent.position.x <= 0.0);
                    assert!(agent.position.z <= 0.0);
                }
            }
        }
    }

    #[test]
    fn maintain_is_idempotent_at_target() {
        let (mut state, mut balancer) = populated_state();
        // 10 prey at ratio 2.0 targets 20 food: already there.
        let before = count_kind(&state, ConsumableKind::Food);
        let when = state.config.spawn.food_interval + 0.01;
        balancer.maintain(&mut state, when);
        assert_eq!(count_kind(&state, ConsumableKind::Food), before);
    }

    #[test]
    fn maintain_tops_up_a_deficit_with_at_least_the_min_batch() {
        let (mut state, mut balancer) = populated_state();
        // Remove one food patch: deficit 1, but the batch floor is 5.
        let food_id = state
            .consumables
            .values()
            .find(|c| c.kind == ConsumableKind::Food)
            .map(|c| c.id);
        if let Some(id) = food_id {
            state.consumables.remove(&id);
        }
        let when = state.config.spawn.food_interval + 0.01;
        balancer.maintain(&mut state, when);
        assert_eq!(count_kind(&state, ConsumableKind::Food), 24);
    }

    #[test]
    fn maintain_before_the_interval_does_nothing() {
        let (mut state, mut balancer) = populated_state();
        let food_id = state
            .consumables
            .values()
            .find(|c| c.kind == ConsumableKind::Food)
            .map(|c| c.id);
        if let Some(id) = food_id {
            state.consumables.remove(&id);
        }
        balancer.maintain(&mut state, 1.0);
        assert_eq!(count_kind(&state, ConsumableKind::Food), 19);
    }
}
