//! The population registry: the live-agent set and its bookkeeping.
//!
//! Registration and unregistration are O(1) and keep the per-species
//! live counts, spawn totals, and generation highs in the metrics ledger
//! current. Unregistration reports population collapse exactly when the
//! live set transitions to empty -- unless a reset is already in
//! progress, so the teardown during an episode reset cannot re-trigger
//! itself.

use std::collections::HashSet;

use tracing::{debug, info};

use ecosim_types::{Agent, AgentId, EpisodeMetrics, SpeciesKind};

/// Tracks which agents are alive and guards episode-reset re-entrancy.
#[derive(Debug, Clone, Default)]
pub struct PopulationRegistry {
    alive: HashSet<AgentId>,
    resetting: bool,
}

impl PopulationRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            alive: HashSet::new(),
            resetting: false,
        }
    }

    /// Number of live agents.
    pub fn len(&self) -> usize {
        self.alive.len()
    }

    /// Whether no agents are alive.
    pub fn is_empty(&self) -> bool {
        self.alive.is_empty()
    }

    /// Whether the given agent is registered as alive.
    pub fn contains(&self, id: AgentId) -> bool {
        self.alive.contains(&id)
    }

    /// Stable snapshot of the live set for iterate-while-mutating passes.
    ///
    /// Sorted by id so tick-cycle iteration order is deterministic.
    pub fn snapshot(&self) -> Vec<AgentId> {
        let mut ids: Vec<AgentId> = self.alive.iter().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Register a newly spawned agent.
    ///
    /// Updates the live count and spawn total for its species and raises
    /// the species generation high if this agent exceeds it.
    pub fn register(&mut self, agent: &Agent, metrics: &mut EpisodeMetrics) {
        if !self.alive.insert(agent.id) {
            return;
        }
        match agent.species {
            SpeciesKind::Prey => {
                metrics.current_prey_count += 1;
                metrics.total_prey_spawned += 1;
                metrics.highest_prey_generation =
                    metrics.highest_prey_generation.max(agent.traits.generation);
            }
            SpeciesKind::Predator => {
                metrics.current_predator_count += 1;
                metrics.total_predators_spawned += 1;
                metrics.highest_predator_generation = metrics
                    .highest_predator_generation
                    .max(agent.traits.generation);
            }
        }
        debug!(agent = %agent.id, species = %agent.species, generation = agent.traits.generation, "registered");
    }

    /// Unregister a dead agent.
    ///
    /// Returns `true` exactly when this removal emptied the live set and
    /// no reset is in progress -- the population-collapse signal that
    /// drives the episode reset.
    pub fn unregister(
        &mut self,
        id: AgentId,
        species: SpeciesKind,
        metrics: &mut EpisodeMetrics,
    ) -> bool {
        if !self.alive.remove(&id) {
            return false;
        }
        match species {
            SpeciesKind::Prey => {
                metrics.current_prey_count = metrics.current_prey_count.saturating_sub(1);
            }
            SpeciesKind::Predator => {
                metrics.current_predator_count = metrics.current_predator_count.saturating_sub(1);
            }
        }
        let collapsed = self.alive.is_empty() && !self.resetting;
        if collapsed {
            info!("population collapsed");
        }
        collapsed
    }

    /// Whether an episode reset is currently in progress.
    pub const fn is_resetting(&self) -> bool {
        self.resetting
    }

    /// Enter the reset guard. Unregistrations during the teardown will
    /// not re-report a collapse.
    pub fn begin_reset(&mut self) {
        self.resetting = true;
    }

    /// Leave the reset guard once repopulation is complete.
    pub fn end_reset(&mut self) {
        self.resetting = false;
    }
}

#[cfg(test)]
mod tests {
    use ecosim_types::{AgentTraits, Vec2, VitalState};

    use super::*;

    fn agent(species: SpeciesKind, generation: u32) -> Agent {
        Agent {
            id: AgentId::new(),
            species,
            traits: AgentTraits {
                speed: 12.0,
                sight_range: 1.0,
                max_size: 2.0,
                max_lifetime: 80.0,
                growth_time: 20.0,
                generation,
            },
            vitals: VitalState::full(),
            position: Vec2::ZERO,
            parents: None,
            lifetime_reward: 0.0,
            body: None,
            current_move: Vec2::ZERO,
            brake: 0.0,
        }
    }

    #[test]
    fn register_updates_counts_and_generation_high() {
        let mut registry = PopulationRegistry::new();
        let mut metrics = EpisodeMetrics::default();
        registry.register(&agent(SpeciesKind::Prey, 3), &mut metrics);
        registry.register(&agent(SpeciesKind::Prey, 1), &mut metrics);
        registry.register(&agent(SpeciesKind::Predator, 0), &mut metrics);

        assert_eq!(registry.len(), 3);
        assert_eq!(metrics.current_prey_count, 2);
        assert_eq!(metrics.total_prey_spawned, 2);
        assert_eq!(metrics.current_predator_count, 1);
        assert_eq!(metrics.highest_prey_generation, 3);
    }

    #[test]
    fn duplicate_register_is_a_no_op() {
        let mut registry = PopulationRegistry::new();
        let mut metrics = EpisodeMetrics::default();
        let a = agent(SpeciesKind::Prey, 0);
        registry.register(&a, &mut metrics);
        registry.register(&a, &mut metrics);
        assert_eq!(metrics.total_prey_spawned, 1);
    }

    #[test]
    fn last_unregister_reports_collapse() {
        let mut registry = PopulationRegistry::new();
        let mut metrics = EpisodeMetrics::default();
        let a = agent(SpeciesKind::Prey, 0);
        let b = agent(SpeciesKind::Predator, 0);
        registry.register(&a, &mut metrics);
        registry.register(&b, &mut metrics);

        assert!(!registry.unregister(a.id, a.species, &mut metrics));
        assert!(registry.unregister(b.id, b.species, &mut metrics));
        assert_eq!(metrics.current_prey_count, 0);
        assert_eq!(metrics.current_predator_count, 0);
    }

    #[test]
    fn collapse_is_suppressed_during_reset() {
        let mut registry = PopulationRegistry::new();
        let mut metrics = EpisodeMetrics::default();
        let a = agent(SpeciesKind::Prey, 0);
        registry.register(&a, &mut metrics);

        registry.begin_reset();
        assert!(!registry.unregister(a.id, a.species, &mut metrics));
        registry.end_reset();
        assert!(!registry.is_resetting());
    }

    #[test]
    fn snapshot_is_sorted_by_id() {
        let mut registry = PopulationRegistry::new();
        let mut metrics = EpisodeMetrics::default();
        for _ in 0..8 {
            registry.register(&agent(SpeciesKind::Prey, 0), &mut metrics);
        }
        let snapshot = registry.snapshot();
        assert_eq!(snapshot.len(), 8);
        assert!(snapshot.is_sorted());
    }

    #[test]
    fn unknown_unregister_does_not_collapse() {
        let mut registry = PopulationRegistry::new();
        let mut metrics = EpisodeMetrics::default();
        assert!(!registry.unregister(AgentId::new(), SpeciesKind::Prey, &mut metrics));
    }
}
