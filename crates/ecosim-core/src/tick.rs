//! Tick cycle: the fixed-step loop that drives the simulation.
//!
//! Each tick runs these phases in order:
//!
//! 1. **Decision** -- ask the [`ActionSource`] for every live agent's
//!    movement choice.
//! 2. **Decay** -- advance every agent's vitals, pay the per-tick
//!    vitality reward or penalty, and rescale prey bodies that grew.
//! 3. **Deaths** -- settle agents whose vitals gave out this tick:
//!    death-cause counters, terminal reward, task cancellation,
//!    unregistration (which may report population collapse).
//! 4. **Contacts** -- consume the overlap events delivered by the
//!    physics layer: wall penalties, consumption task starts, courtship
//!    starts, and contact-loss cancellations.
//! 5. **Consumption** -- advance every due consumption task one drain.
//! 6. **Mating** -- advance every due courtship one sub-interval;
//!    completed pairs pay costs and spawn an offspring.
//! 7. **Crowding & aggregation** -- crowding penalties for ineligible
//!    agents with same-species neighbors, then the per-tick population
//!    aggregate (skipped entirely when the arena is empty).
//!
//! Ordering guarantee: decay always runs before consumption and mating,
//! so a just-fed agent's pause window takes effect starting next tick.
//! The cycle is deterministic given the same seed, events, and action
//! source outputs.

use std::collections::{BTreeMap, BTreeSet};

use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::{debug, info};

use ecosim_agents::{
    ConsumptionTask, CourtshipOutcome, DrainOutcome, MatingTask, apply_vital_tick,
    check_eligibility, drink, eat, inherit, pay_mating_cost, spawn_offspring, validate_pair,
};
use ecosim_ledger::RewardLedger;
use ecosim_types::{
    Agent, AgentId, AgentTraits, ConsumableId, ConsumableKind, DeathCause, EpisodeMetrics,
    OverlapEvent, OverlapPhase, OverlapTarget, SpeciesKind, clamp01,
};
use ecosim_world::SustainedConsumable;

use crate::action::ActionSource;
use crate::clock::SimClock;
use crate::config::SimulationConfig;
use crate::registry::PopulationRegistry;

/// Everything known about one agent at the moment of death, for the
/// telemetry record.
#[derive(Debug, Clone, PartialEq)]
pub struct DeathReport {
    /// The dead agent.
    pub agent: AgentId,
    /// Its species.
    pub species: SpeciesKind,
    /// Why it died.
    pub cause: DeathCause,
    /// Its heritable traits.
    pub traits: AgentTraits,
    /// Age at death.
    pub age: f32,
    /// Offspring produced over its lifetime.
    pub num_children: u32,
    /// Final lifetime reward, terminal reward included.
    pub lifetime_reward: f32,
    /// Lineage, if not a seed agent.
    pub parents: Option<(AgentId, AgentId)>,
}

/// Summary of a single tick's execution.
#[derive(Debug, Clone, PartialEq)]
pub struct TickSummary {
    /// The tick number that was executed.
    pub tick: u64,
    /// Living agents at end of tick.
    pub alive: u32,
    /// Mean age of the living agents (0 when none).
    pub mean_age: f32,
    /// Agents that died during this tick.
    pub deaths: Vec<DeathReport>,
    /// Whether the population collapsed to zero this tick.
    pub collapsed: bool,
}

/// The mutable simulation state passed through the tick cycle.
#[derive(Debug)]
pub struct SimulationState {
    /// The simulation clock.
    pub clock: SimClock,
    /// The live-agent registry.
    pub registry: PopulationRegistry,
    /// All living agents by id.
    pub agents: BTreeMap<AgentId, Agent>,
    /// All consumables by id, prey bodies included.
    pub consumables: BTreeMap<ConsumableId, SustainedConsumable>,
    /// At most one consumption task per agent.
    pub consumption_tasks: BTreeMap<AgentId, ConsumptionTask>,
    /// In-flight courtships.
    pub mating_tasks: Vec<MatingTask>,
    /// Currently open contacts, mirrored from the physics layer's
    /// began/ended events.
    pub contacts: BTreeSet<(AgentId, OverlapTarget)>,
    /// Cumulative run metrics.
    pub metrics: EpisodeMetrics,
    /// The reward calculator.
    pub ledger: RewardLedger,
    /// The full configuration.
    pub config: SimulationConfig,
    /// Seeded randomness for mutation draws.
    pub rng: SmallRng,
}

impl SimulationState {
    /// Fresh state from a configuration: empty arena, tick zero.
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            clock: SimClock::new(config.fixed_dt),
            registry: PopulationRegistry::new(),
            agents: BTreeMap::new(),
            consumables: BTreeMap::new(),
            consumption_tasks: BTreeMap::new(),
            mating_tasks: Vec::new(),
            contacts: BTreeSet::new(),
            metrics: EpisodeMetrics::default(),
            ledger: RewardLedger::new(config.rewards),
            rng: SmallRng::seed_from_u64(config.run.seed),
            config,
        }
    }

    /// Insert a live agent: register it and, for prey, attach the edible
    /// body consumable. Returns the agent's id.
    pub fn insert_agent(&mut self, mut agent: Agent) -> AgentId {
        if agent.species == SpeciesKind::Prey {
            let body = SustainedConsumable::prey_body(
                agent.position,
                agent.id,
                agent.vitals.current_size(&agent.traits),
            );
            agent.body = Some(body.id);
            self.consumables.insert(body.id, body);
        }
        self.registry.register(&agent, &mut self.metrics);
        let id = agent.id;
        self.agents.insert(id, agent);
        id
    }

    /// Whether the agent is currently running a consumption task.
    pub fn consuming(&self, id: AgentId) -> bool {
        self.consumption_tasks.contains_key(&id)
    }

    /// Whether the agent is currently in a courtship.
    pub fn courting(&self, id: AgentId) -> bool {
        self.mating_tasks.iter().any(|task| task.involves(id))
    }

    /// Drop every task and contact that references this agent.
    fn cancel_agent_tasks(&mut self, id: AgentId) {
        self.consumption_tasks.remove(&id);
        self.mating_tasks.retain(|task| !task.involves(id));
        self.contacts
            .retain(|(agent, target)| *agent != id && *target != OverlapTarget::Creature(id));
    }
}

/// Execute one complete tick of the simulation.
///
/// `events` are the overlap notifications the physics layer produced
/// since the last tick. The returned summary carries everything the
/// engine needs for telemetry and reset decisions.
pub fn run_tick(
    state: &mut SimulationState,
    events: &[OverlapEvent],
    actions: &mut dyn ActionSource,
) -> TickSummary {
    let tick = state.clock.tick();
    let now = state.clock.now();
    let dt = state.clock.dt();
    let ids = state.registry.snapshot();

    // --- Phase 1: Decision ---
    let mut choices = Vec::with_capacity(ids.len());
    for id in &ids {
        if let Some(agent) = state.agents.get(id) {
            choices.push((*id, actions.choose(tick, agent).sanitized()));
        }
    }
    for (id, choice) in choices {
        if let Some(agent) = state.agents.get_mut(&id) {
            agent.current_move = choice.steer;
            agent.brake = choice.brake;
        }
    }

    // --- Phase 2: Decay ---
    let mut pending_deaths: Vec<(AgentId, DeathCause)> = Vec::new();
    for id in &ids {
        let Some(agent) = state.agents.get_mut(id) else {
            continue;
        };
        if let Some(cause) =
            apply_vital_tick(&mut agent.vitals, &agent.traits, &state.config.vitals, now, dt)
        {
            pending_deaths.push((*id, cause));
            continue;
        }
        let delta =
            state
                .ledger
                .vitality(&mut state.metrics, agent.vitals.hunger, agent.vitals.thirst, dt);
        agent.lifetime_reward += delta;

        if let Some(body_id) = agent.body {
            let size = agent.vitals.current_size(&agent.traits);
            if let Some(body) = state.consumables.get_mut(&body_id) {
                body.update_from_size(size);
            }
        }
    }

    // --- Phase 3: Deaths ---
    let mut deaths = Vec::new();
    let mut collapsed = false;
    for (id, cause) in pending_deaths {
        collapsed |= process_death(state, id, cause, &mut deaths);
    }

    // --- Phase 4: Contacts ---
    for event in events {
        apply_overlap_event(state, event, now);
    }

    // --- Phase 5: Consumption ---
    advance_consumption(state, now);

    // --- Phase 6: Mating ---
    advance_mating(state, now);

    // --- Phase 7: Crowding & aggregation ---
    apply_crowding(state);

    let summary = if state.registry.is_empty() {
        TickSummary {
            tick,
            alive: 0,
            mean_age: 0.0,
            deaths,
            collapsed,
        }
    } else {
        let alive = state.registry.len() as u32;
        let age_sum: f32 = state.agents.values().map(|a| a.vitals.age).sum();
        TickSummary {
            tick,
            alive,
            mean_age: age_sum / alive as f32,
            deaths,
            collapsed,
        }
    };

    state.clock.advance();
    summary
}

/// Settle one agent's death. Returns whether the population collapsed.
fn process_death(
    state: &mut SimulationState,
    id: AgentId,
    cause: DeathCause,
    deaths: &mut Vec<DeathReport>,
) -> bool {
    let Some(mut agent) = state.agents.remove(&id) else {
        return false;
    };

    match cause {
        DeathCause::Natural => state.metrics.reached_life_end += 1,
        DeathCause::Starvation => state.metrics.died_from_hunger += 1,
        DeathCause::Dehydration => state.metrics.died_from_thirst += 1,
        DeathCause::Exhaustion => state.metrics.died_from_exhaustion += 1,
    }

    let delta = state
        .ledger
        .death_outcome(&mut state.metrics, cause, agent.vitals.num_children);
    agent.lifetime_reward += delta;

    state.cancel_agent_tasks(id);
    if let Some(body_id) = agent.body.take() {
        state.consumables.remove(&body_id);
    }

    let collapsed = state
        .registry
        .unregister(id, agent.species, &mut state.metrics);

    debug!(agent = %id, species = %agent.species, %cause, age = agent.vitals.age, "agent died");
    deaths.push(DeathReport {
        agent: id,
        species: agent.species,
        cause,
        traits: agent.traits,
        age: agent.vitals.age,
        num_children: agent.vitals.num_children,
        lifetime_reward: agent.lifetime_reward,
        parents: agent.parents,
    });
    collapsed
}

/// Apply one overlap event: contact bookkeeping plus whatever the
/// contact starts or cancels.
fn apply_overlap_event(state: &mut SimulationState, event: &OverlapEvent, now: f64) {
    if !state.agents.contains_key(&event.agent) {
        return;
    }

    match event.phase {
        OverlapPhase::Began => {
            state.contacts.insert((event.agent, event.target));
            match event.target {
                OverlapTarget::Wall => {
                    let delta = state.ledger.wall_contact(&mut state.metrics);
                    if let Some(agent) = state.agents.get_mut(&event.agent) {
                        agent.lifetime_reward += delta;
                    }
                }
                OverlapTarget::Consumable(target) => {
                    try_begin_consumption(state, event.agent, target, now);
                }
                OverlapTarget::Creature(other) => {
                    handle_creature_contact(state, event.agent, other, now);
                }
            }
        }
        OverlapPhase::Ended => {
            state.contacts.remove(&(event.agent, event.target));
            if cancel_consumption_on_lost_contact(state, event.agent, event.target) {
                begin_from_held_contacts(state, event.agent, now);
            }
            // Courtship deliberately survives contact loss; only death
            // cancels it.
        }
    }
}

/// Start a consumption task if the guard and eligibility checks pass.
fn try_begin_consumption(
    state: &mut SimulationState,
    agent_id: AgentId,
    target: ConsumableId,
    now: f64,
) {
    if state.consuming(agent_id) {
        return;
    }
    let Some(consumable) = state.consumables.get(&target) else {
        return;
    };
    let Some(agent) = state.agents.get(&agent_id) else {
        return;
    };
    if let Err(error) = check_eligibility(agent.species, consumable.kind) {
        debug!(agent = %agent_id, %error, "consumption refused");
        return;
    }
    // A prey body is only edible while its prey is alive; the death path
    // removes the body outright.
    if consumable.kind == ConsumableKind::Prey
        && !consumable
            .prey
            .is_some_and(|prey| state.agents.contains_key(&prey))
    {
        return;
    }
    state
        .consumption_tasks
        .insert(agent_id, ConsumptionTask::begin(agent_id, target, now));
    debug!(agent = %agent_id, consumable = %target, kind = %consumable.kind, "consumption started");
}

/// Creature-on-creature contact: courtship between same-species adults,
/// or a predator latching onto a prey's body.
fn handle_creature_contact(
    state: &mut SimulationState,
    agent_id: AgentId,
    other_id: AgentId,
    now: f64,
) {
    let Some(agent) = state.agents.get(&agent_id) else {
        return;
    };
    let Some(other) = state.agents.get(&other_id) else {
        return;
    };

    if agent.species == other.species {
        match validate_pair(
            agent,
            other,
            state.courting(agent_id),
            state.courting(other_id),
        ) {
            Ok(()) => {
                state.mating_tasks.push(MatingTask::begin(
                    agent_id,
                    other_id,
                    &state.config.mating,
                    now,
                ));
                debug!(initiator = %agent_id, partner = %other_id, "courtship started");
            }
            Err(error) => debug!(agent = %agent_id, %error, "courtship refused"),
        }
        return;
    }

    if agent.species == SpeciesKind::Predator && other.species == SpeciesKind::Prey {
        if let Some(body) = other.body {
            try_begin_consumption(state, agent_id, body, now);
        }
    }
}

/// Cancel the agent's consumption task when the contact it relies on
/// ends. Returns whether a task was cancelled.
fn cancel_consumption_on_lost_contact(
    state: &mut SimulationState,
    agent_id: AgentId,
    target: OverlapTarget,
) -> bool {
    let Some(task) = state.consumption_tasks.get(&agent_id) else {
        return false;
    };
    let lost = match target {
        OverlapTarget::Consumable(id) => task.target == id,
        OverlapTarget::Creature(other) => state
            .agents
            .get(&other)
            .is_some_and(|agent| agent.body == Some(task.target)),
        OverlapTarget::Wall => false,
    };
    if lost {
        debug!(agent = %agent_id, "consumption cancelled, contact lost");
        state.consumption_tasks.remove(&agent_id);
    }
    lost
}

/// Offer a freed consumer its remaining held contacts as targets.
///
/// Overlap events only fire on transitions, so an agent that finishes or
/// loses one consumption while still standing on another valid target
/// would otherwise stay idle on top of it.
fn begin_from_held_contacts(state: &mut SimulationState, agent_id: AgentId, now: f64) {
    let held: Vec<OverlapTarget> = state
        .contacts
        .iter()
        .filter(|(agent, _)| *agent == agent_id)
        .map(|(_, target)| *target)
        .collect();
    for target in held {
        if state.consuming(agent_id) {
            break;
        }
        match target {
            OverlapTarget::Consumable(id) => try_begin_consumption(state, agent_id, id, now),
            OverlapTarget::Creature(other) => {
                let predator = state
                    .agents
                    .get(&agent_id)
                    .is_some_and(|agent| agent.species == SpeciesKind::Predator);
                if predator
                    && let Some(body) = state.agents.get(&other).and_then(|prey| prey.body)
                {
                    try_begin_consumption(state, agent_id, body, now);
                }
            }
            OverlapTarget::Wall => {}
        }
    }
}

/// Whether the consumer still touches what its task drains.
fn consumption_contact_held(
    state: &SimulationState,
    task: &ConsumptionTask,
    kind: ConsumableKind,
    prey: Option<AgentId>,
) -> bool {
    if state
        .contacts
        .contains(&(task.consumer, OverlapTarget::Consumable(task.target)))
    {
        return true;
    }
    kind == ConsumableKind::Prey
        && prey.is_some_and(|prey_id| {
            state
                .contacts
                .contains(&(task.consumer, OverlapTarget::Creature(prey_id)))
        })
}

/// Advance every due consumption task one drain.
fn advance_consumption(state: &mut SimulationState, now: f64) {
    let task_ids: Vec<AgentId> = state.consumption_tasks.keys().copied().collect();
    for id in task_ids {
        let Some(mut task) = state.consumption_tasks.get(&id).copied() else {
            continue;
        };
        if !task.due(now) {
            continue;
        }

        let Some(consumable) = state.consumables.get(&task.target) else {
            state.consumption_tasks.remove(&id);
            begin_from_held_contacts(state, id, now);
            continue;
        };
        let kind = consumable.kind;
        let prey = consumable.prey;

        if !consumption_contact_held(state, &task, kind, prey)
            || (kind == ConsumableKind::Prey
                && !prey.is_some_and(|prey_id| state.agents.contains_key(&prey_id)))
        {
            debug!(agent = %id, "consumption cancelled, target out of reach");
            state.consumption_tasks.remove(&id);
            begin_from_held_contacts(state, id, now);
            continue;
        }

        let Some(consumer) = state.agents.get(&id) else {
            state.consumption_tasks.remove(&id);
            continue;
        };
        let vital_full = match kind {
            ConsumableKind::Food | ConsumableKind::Prey => consumer.vitals.hunger >= 1.0,
            ConsumableKind::Water => consumer.vitals.thirst >= 1.0,
        };

        let Some(consumable) = state.consumables.get_mut(&task.target) else {
            state.consumption_tasks.remove(&id);
            continue;
        };
        match task.advance(consumable, vital_full, now) {
            DrainOutcome::Skipped => {
                state.consumption_tasks.insert(id, task);
            }
            DrainOutcome::Stopped(reason) => {
                debug!(agent = %id, ?reason, "consumption finished");
                state.consumption_tasks.remove(&id);
                begin_from_held_contacts(state, id, now);
            }
            DrainOutcome::Drained { amount, retired } => {
                apply_drain(state, id, kind, prey, amount, now);
                if retired {
                    retire_consumable(state, task.target, kind, prey);
                    state.consumption_tasks.remove(&id);
                    begin_from_held_contacts(state, id, now);
                } else {
                    state.consumption_tasks.insert(id, task);
                }
            }
        }
    }
}

/// Apply one drained slice to the consumer (and, for predation, to the
/// prey) and pay the matching reward.
fn apply_drain(
    state: &mut SimulationState,
    consumer_id: AgentId,
    kind: ConsumableKind,
    prey: Option<AgentId>,
    amount: f32,
    now: f64,
) {
    let delta = match kind {
        ConsumableKind::Food => state.ledger.nutrition(&mut state.metrics, amount),
        ConsumableKind::Water => state.ledger.hydration(&mut state.metrics, amount),
        ConsumableKind::Prey => state.ledger.predation(&mut state.metrics, amount),
    };
    if let Some(consumer) = state.agents.get_mut(&consumer_id) {
        match kind {
            ConsumableKind::Food | ConsumableKind::Prey => {
                eat(&mut consumer.vitals, amount, now, &state.config.vitals);
            }
            ConsumableKind::Water => {
                drink(&mut consumer.vitals, amount, now, &state.config.vitals);
            }
        }
        consumer.lifetime_reward += delta;
    }
    if kind == ConsumableKind::Prey
        && let Some(prey_agent) = prey.and_then(|prey_id| state.agents.get_mut(&prey_id))
    {
        prey_agent.vitals.health = clamp01(prey_agent.vitals.health - amount);
    }
}

/// Retire an emptied consumable exactly once.
fn retire_consumable(
    state: &mut SimulationState,
    target: ConsumableId,
    kind: ConsumableKind,
    prey: Option<AgentId>,
) {
    state.consumables.remove(&target);
    match kind {
        ConsumableKind::Food => state.metrics.food_consumed += 1,
        ConsumableKind::Water => state.metrics.water_consumed += 1,
        ConsumableKind::Prey => {
            state.metrics.animals_killed += 1;
            // A fully eaten prey is dead: zero its health so the next
            // decay phase settles the death.
            if let Some(prey_agent) = prey.and_then(|prey_id| state.agents.get_mut(&prey_id)) {
                prey_agent.vitals.health = 0.0;
                prey_agent.body = None;
            }
        }
    }
}

/// Advance every due courtship one sub-interval.
fn advance_mating(state: &mut SimulationState, now: f64) {
    let tasks = std::mem::take(&mut state.mating_tasks);
    let mut kept = Vec::with_capacity(tasks.len());

    for mut task in tasks {
        // Either participant dying aborts the courtship outright.
        if !state.agents.contains_key(&task.initiator) || !state.agents.contains_key(&task.partner)
        {
            debug!(initiator = %task.initiator, partner = %task.partner, "courtship aborted");
            continue;
        }
        if !task.due(now) {
            kept.push(task);
            continue;
        }

        let outcome = task.advance(&state.config.mating, now);
        // Every elapsed sub-interval, the completing one included, pays
        // the partial credit to the initiator.
        let delta = state.ledger.partial_mating(&mut state.metrics);
        if let Some(initiator) = state.agents.get_mut(&task.initiator) {
            initiator.lifetime_reward += delta;
        }
        match outcome {
            CourtshipOutcome::Step => kept.push(task),
            CourtshipOutcome::Completed => complete_mating(state, &task),
        }
    }

    state.mating_tasks.extend(kept);
}

/// A completed courtship: costs, offspring, and the success payout.
fn complete_mating(state: &mut SimulationState, task: &MatingTask) {
    let Some(initiator) = state.agents.get(&task.initiator) else {
        return;
    };
    let Some(partner) = state.agents.get(&task.partner) else {
        return;
    };
    let species = initiator.species;
    let traits_a = initiator.traits;
    let traits_b = partner.traits;
    let fitness_a = initiator.lifetime_reward;
    let fitness_b = partner.lifetime_reward;
    let position = initiator.position.midpoint(partner.position);

    let child_traits = inherit(
        &traits_a,
        &traits_b,
        fitness_a,
        fitness_b,
        &state.config.trait_bounds,
        &state.config.genetics,
        &mut state.rng,
    );

    for id in [task.initiator, task.partner] {
        if let Some(parent) = state.agents.get_mut(&id) {
            pay_mating_cost(&mut parent.vitals, &state.config.mating);
            parent.vitals.num_children += 1;
        }
    }

    // Every other live same-species agent shares in the success.
    let group: Vec<AgentId> = state
        .agents
        .values()
        .filter(|a| a.species == species && a.id != task.initiator && a.id != task.partner)
        .map(|a| a.id)
        .collect();
    let payout = state
        .ledger
        .mating_success(&mut state.metrics, group.len() as u32);
    for id in [task.initiator, task.partner] {
        if let Some(parent) = state.agents.get_mut(&id) {
            parent.lifetime_reward += payout.parent;
        }
    }
    for id in group {
        if let Some(agent) = state.agents.get_mut(&id) {
            agent.lifetime_reward += payout.group;
        }
    }

    let child = spawn_offspring(species, child_traits, position, (task.initiator, task.partner));
    let child_id = state.insert_agent(child);
    info!(
        %species,
        child = %child_id,
        generation = child_traits.generation,
        initiator = %task.initiator,
        partner = %task.partner,
        "offspring born"
    );
}

/// Crowding penalties for agents that cannot mate and have same-species
/// neighbors packed within the crowding radius.
fn apply_crowding(state: &mut SimulationState) {
    let radius = state.config.crowding.radius;
    let mut penalized: Vec<(AgentId, u32)> = Vec::new();
    for agent in state.agents.values() {
        if agent.vitals.can_mate(&agent.traits) {
            continue;
        }
        let count = state
            .agents
            .values()
            .filter(|other| {
                other.id != agent.id
                    && other.species == agent.species
                    && other.position.distance_to(agent.position) <= radius
            })
            .count() as u32;
        if count > 0 {
            penalized.push((agent.id, count));
        }
    }
    for (id, count) in penalized {
        let delta = state.ledger.crowding(&mut state.metrics, count);
        if let Some(agent) = state.agents.get_mut(&id) {
            agent.lifetime_reward += delta;
        }
    }
}

#[cfg(test)]
mod tests {
    use ecosim_agents::spawn_seed_agent;
    use ecosim_types::Vec2;

    use super::*;
    use crate::action::IdleActionSource;

    fn test_state() -> SimulationState {
        SimulationState::new(SimulationConfig::default())
    }

    fn seed_agent(state: &mut SimulationState, species: SpeciesKind, position: Vec2) -> AgentId {
        let ranges = state.config.seed_traits;
        let agent = spawn_seed_agent(species, position, &ranges, &mut state.rng);
        state.insert_agent(agent)
    }

    fn adult_agent(state: &mut SimulationState, species: SpeciesKind, position: Vec2) -> AgentId {
        let id = seed_agent(state, species, position);
        if let Some(agent) = state.agents.get_mut(&id) {
            agent.vitals.age = agent.traits.growth_time + 1.0;
        }
        id
    }

    #[test]
    fn empty_arena_ticks_without_aggregation() {
        let mut state = test_state();
        let mut actions = IdleActionSource;
        let summary = run_tick(&mut state, &[], &mut actions);
        assert_eq!(summary.alive, 0);
        assert!(summary.mean_age.abs() < 1e-6);
        assert!(!summary.collapsed);
    }

    #[test]
    fn decay_runs_before_consumption_effects() {
        // Scenario A ordering: ten ticks of pure decay at the default
        // rate leave hunger at exactly 1.0 - 0.03 * 0.2.
        let mut state = test_state();
        let id = seed_agent(&mut state, SpeciesKind::Prey, Vec2::ZERO);
        let mut actions = IdleActionSource;
        for _ in 0..10 {
            let _ = run_tick(&mut state, &[], &mut actions);
        }
        let hunger = state.agents.get(&id).map_or(0.0, |a| a.vitals.hunger);
        assert!((hunger - 0.994).abs() < 1e-5);
    }

    #[test]
    fn prey_spawns_with_an_attached_body() {
        let mut state = test_state();
        let id = seed_agent(&mut state, SpeciesKind::Prey, Vec2::ZERO);
        let body = state.agents.get(&id).and_then(|a| a.body);
        assert!(body.is_some_and(|b| state.consumables.contains_key(&b)));
    }

    #[test]
    fn predators_have_no_body_consumable() {
        let mut state = test_state();
        let id = seed_agent(&mut state, SpeciesKind::Predator, Vec2::ZERO);
        assert!(state.agents.get(&id).is_some_and(|a| a.body.is_none()));
    }

    #[test]
    fn wall_contact_costs_the_flat_penalty() {
        let mut state = test_state();
        let id = seed_agent(&mut state, SpeciesKind::Prey, Vec2::ZERO);
        let mut actions = IdleActionSource;
        let events = [OverlapEvent {
            agent: id,
            target: OverlapTarget::Wall,
            phase: OverlapPhase::Began,
        }];
        let before = state.agents.get(&id).map_or(0.0, |a| a.lifetime_reward);
        let _ = run_tick(&mut state, &events, &mut actions);
        let after = state.agents.get(&id).map_or(0.0, |a| a.lifetime_reward);
        // Vitality reward also lands this tick, so compare against the
        // wall penalty with a loose bound.
        assert!(after < before - 0.4);
    }

    #[test]
    fn consumption_starts_on_contact_and_feeds_the_agent() {
        let mut state = test_state();
        let id = seed_agent(&mut state, SpeciesKind::Prey, Vec2::ZERO);
        if let Some(agent) = state.agents.get_mut(&id) {
            agent.vitals.hunger = 0.4;
        }
        let food = SustainedConsumable::food(Vec2::ZERO);
        let food_id = food.id;
        state.consumables.insert(food_id, food);

        let events = [OverlapEvent {
            agent: id,
            target: OverlapTarget::Consumable(food_id),
            phase: OverlapPhase::Began,
        }];
        let mut actions = IdleActionSource;
        let _ = run_tick(&mut state, &events, &mut actions);

        assert!(state.consuming(id));
        let hunger = state.agents.get(&id).map_or(0.0, |a| a.vitals.hunger);
        assert!(hunger > 0.4);
        let remaining = state
            .consumables
            .get(&food_id)
            .map_or(0.0, |c| c.remaining_value);
        assert!(remaining < 3.0);
    }

    #[test]
    fn prey_never_eats_a_prey_body() {
        let mut state = test_state();
        let eater = seed_agent(&mut state, SpeciesKind::Prey, Vec2::ZERO);
        let victim = seed_agent(&mut state, SpeciesKind::Prey, Vec2::new(1.0, 0.0));
        let body = state.agents.get(&victim).and_then(|a| a.body);
        let Some(body) = body else {
            assert!(body.is_some());
            return;
        };

        let events = [OverlapEvent {
            agent: eater,
            target: OverlapTarget::Consumable(body),
            phase: OverlapPhase::Began,
        }];
        let mut actions = IdleActionSource;
        let _ = run_tick(&mut state, &events, &mut actions);
        assert!(!state.consuming(eater));
    }

    #[test]
    fn lost_contact_cancels_consumption() {
        let mut state = test_state();
        let id = seed_agent(&mut state, SpeciesKind::Prey, Vec2::ZERO);
        if let Some(agent) = state.agents.get_mut(&id) {
            agent.vitals.hunger = 0.4;
        }
        let food = SustainedConsumable::food(Vec2::ZERO);
        let food_id = food.id;
        state.consumables.insert(food_id, food);
        let mut actions = IdleActionSource;

        let began = [OverlapEvent {
            agent: id,
            target: OverlapTarget::Consumable(food_id),
            phase: OverlapPhase::Began,
        }];
        let _ = run_tick(&mut state, &began, &mut actions);
        assert!(state.consuming(id));

        let ended = [OverlapEvent {
            agent: id,
            target: OverlapTarget::Consumable(food_id),
            phase: OverlapPhase::Ended,
        }];
        let _ = run_tick(&mut state, &ended, &mut actions);
        assert!(!state.consuming(id));
    }

    #[test]
    fn sated_grazer_releases_food_and_drinks() {
        // A full agent standing on both food and water must not hold the
        // food open forever: sated wakes run the schedule down, and the
        // freed agent picks up the water contact it is still standing on.
        let mut state = test_state();
        let id = seed_agent(&mut state, SpeciesKind::Prey, Vec2::ZERO);
        if let Some(agent) = state.agents.get_mut(&id) {
            agent.vitals.thirst = 0.6;
        }
        let food = SustainedConsumable::food(Vec2::ZERO);
        let water = SustainedConsumable::water(Vec2::ZERO);
        let food_id = food.id;
        let water_id = water.id;
        state.consumables.insert(food_id, food);
        state.consumables.insert(water_id, water);

        let events = [
            OverlapEvent {
                agent: id,
                target: OverlapTarget::Consumable(food_id),
                phase: OverlapPhase::Began,
            },
            OverlapEvent {
                agent: id,
                target: OverlapTarget::Consumable(water_id),
                phase: OverlapPhase::Began,
            },
        ];
        let mut actions = IdleActionSource;
        let _ = run_tick(&mut state, &events, &mut actions);
        for _ in 0..499 {
            let _ = run_tick(&mut state, &[], &mut actions);
        }

        // The food ran out despite the agent staying near-full on hunger,
        // and the agent drank instead of dehydrating on top of the water.
        assert_eq!(state.metrics.food_consumed, 1);
        let thirst = state.agents.get(&id).map_or(0.0, |a| a.vitals.thirst);
        assert!(thirst > 0.5);
        assert!(state.registry.contains(id));
    }

    #[test]
    fn simultaneous_deaths_collapse_exactly_once() {
        let mut state = test_state();
        let a = seed_agent(&mut state, SpeciesKind::Prey, Vec2::ZERO);
        let b = seed_agent(&mut state, SpeciesKind::Predator, Vec2::new(5.0, 5.0));
        for id in [a, b] {
            if let Some(agent) = state.agents.get_mut(&id) {
                agent.vitals.thirst = 0.0001;
            }
        }
        let mut actions = IdleActionSource;
        let summary = run_tick(&mut state, &[], &mut actions);

        assert_eq!(summary.deaths.len(), 2);
        assert!(summary.collapsed);
        assert!(state.registry.is_empty());
        assert_eq!(state.metrics.died_from_thirst, 2);
        assert_eq!(state.metrics.current_prey_count, 0);
        assert_eq!(state.metrics.current_predator_count, 0);
    }

    #[test]
    fn courtship_produces_an_offspring_with_costs_paid() {
        let mut state = test_state();
        let a = adult_agent(&mut state, SpeciesKind::Prey, Vec2::new(-1.0, 0.0));
        let b = adult_agent(&mut state, SpeciesKind::Prey, Vec2::new(1.0, 0.0));
        let mut actions = IdleActionSource;

        let events = [OverlapEvent {
            agent: a,
            target: OverlapTarget::Creature(b),
            phase: OverlapPhase::Began,
        }];
        let _ = run_tick(&mut state, &events, &mut actions);
        assert!(state.courting(a));

        // Courtship lasts 2.0 time units at dt 0.02: run it out.
        for _ in 0..110 {
            let _ = run_tick(&mut state, &[], &mut actions);
        }

        assert_eq!(state.metrics.total_matings, 1);
        assert_eq!(state.registry.len(), 3);
        let parent = state.agents.get(&a);
        assert!(parent.is_some_and(|p| p.vitals.num_children == 1));
        // The child carries generation 1 and both parents' ids.
        let child = state
            .agents
            .values()
            .find(|agent| agent.parents.is_some());
        assert!(child.is_some_and(|c| c.traits.generation == 1));
    }

    #[test]
    fn partner_death_aborts_courtship_without_offspring() {
        let mut state = test_state();
        let a = adult_agent(&mut state, SpeciesKind::Prey, Vec2::new(-1.0, 0.0));
        let b = adult_agent(&mut state, SpeciesKind::Prey, Vec2::new(1.0, 0.0));
        let mut actions = IdleActionSource;

        let events = [OverlapEvent {
            agent: a,
            target: OverlapTarget::Creature(b),
            phase: OverlapPhase::Began,
        }];
        let _ = run_tick(&mut state, &events, &mut actions);
        assert!(state.courting(a));

        // Kill the partner mid-courtship.
        if let Some(partner) = state.agents.get_mut(&b) {
            partner.vitals.health = 0.0;
            partner.vitals.hunger = 0.2;
        }
        let _ = run_tick(&mut state, &[], &mut actions);

        assert!(!state.courting(a));
        assert_eq!(state.metrics.total_matings, 0);
        assert_eq!(state.registry.len(), 1);
    }

    #[test]
    fn cross_species_contact_never_starts_courtship() {
        let mut state = test_state();
        let predator = adult_agent(&mut state, SpeciesKind::Predator, Vec2::ZERO);
        let prey = adult_agent(&mut state, SpeciesKind::Prey, Vec2::new(0.5, 0.0));
        let mut actions = IdleActionSource;

        let events = [OverlapEvent {
            agent: prey,
            target: OverlapTarget::Creature(predator),
            phase: OverlapPhase::Began,
        }];
        let _ = run_tick(&mut state, &events, &mut actions);
        assert!(!state.courting(prey));
        assert!(!state.courting(predator));
    }

    #[test]
    fn predator_contact_drains_the_prey_body() {
        let mut state = test_state();
        let predator = adult_agent(&mut state, SpeciesKind::Predator, Vec2::ZERO);
        let prey = seed_agent(&mut state, SpeciesKind::Prey, Vec2::new(0.5, 0.0));
        if let Some(agent) = state.agents.get_mut(&predator) {
            agent.vitals.hunger = 0.3;
        }
        let mut actions = IdleActionSource;

        let events = [OverlapEvent {
            agent: predator,
            target: OverlapTarget::Creature(prey),
            phase: OverlapPhase::Began,
        }];
        let _ = run_tick(&mut state, &events, &mut actions);

        assert!(state.consuming(predator));
        let prey_health = state.agents.get(&prey).map_or(1.0, |a| a.vitals.health);
        assert!(prey_health < 1.0);
    }

    #[test]
    fn last_death_collapses_the_population() {
        let mut state = test_state();
        let id = seed_agent(&mut state, SpeciesKind::Prey, Vec2::ZERO);
        if let Some(agent) = state.agents.get_mut(&id) {
            agent.vitals.thirst = 0.0001;
        }
        let mut actions = IdleActionSource;
        let summary = run_tick(&mut state, &[], &mut actions);

        assert!(summary.collapsed);
        assert_eq!(summary.deaths.len(), 1);
        assert_eq!(
            summary.deaths.first().map(|d| d.cause),
            Some(DeathCause::Dehydration)
        );
        assert_eq!(state.metrics.died_from_thirst, 1);
        // The prey's body went with it.
        assert!(state.consumables.is_empty());
    }

    #[test]
    fn dead_agents_never_resurface() {
        let mut state = test_state();
        let id = seed_agent(&mut state, SpeciesKind::Prey, Vec2::ZERO);
        let other = seed_agent(&mut state, SpeciesKind::Predator, Vec2::new(2.0, 0.0));
        if let Some(agent) = state.agents.get_mut(&id) {
            agent.vitals.hunger = 0.0001;
        }
        let mut actions = IdleActionSource;
        let _ = run_tick(&mut state, &[], &mut actions);

        assert!(!state.registry.contains(id));
        assert!(!state.agents.contains_key(&id));
        // Ten more ticks: the dead agent stays gone.
        for _ in 0..10 {
            let _ = run_tick(&mut state, &[], &mut actions);
        }
        assert!(!state.registry.contains(id));
        assert!(state.registry.contains(other));
    }

    #[test]
    fn crowding_penalizes_packed_juveniles() {
        let mut state = test_state();
        // Three juvenile prey stacked together: all ineligible to mate.
        let a = seed_agent(&mut state, SpeciesKind::Prey, Vec2::ZERO);
        let _ = seed_agent(&mut state, SpeciesKind::Prey, Vec2::new(0.5, 0.0));
        let _ = seed_agent(&mut state, SpeciesKind::Prey, Vec2::new(0.0, 0.5));
        let mut actions = IdleActionSource;
        let _ = run_tick(&mut state, &[], &mut actions);

        assert!(state.metrics.crowding_penalty > 0.0);
        let reward = state.agents.get(&a).map_or(0.0, |x| x.lifetime_reward);
        assert!(reward < 0.0);
    }

    #[test]
    fn tick_summary_reports_population_aggregate() {
        let mut state = test_state();
        let _ = seed_agent(&mut state, SpeciesKind::Prey, Vec2::ZERO);
        let _ = seed_agent(&mut state, SpeciesKind::Predator, Vec2::new(5.0, 5.0));
        let mut actions = IdleActionSource;
        let summary = run_tick(&mut state, &[], &mut actions);

        assert_eq!(summary.alive, 2);
        assert!(summary.mean_age > 0.0);
        assert_eq!(summary.tick, 0);
        assert_eq!(state.clock.tick(), 1);
    }
}
