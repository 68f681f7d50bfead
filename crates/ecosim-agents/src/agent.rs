//! Agent construction: random-seeded founders and blended offspring.

use rand::Rng;

use ecosim_types::{Agent, AgentId, AgentTraits, SpeciesKind, Vec2, VitalState};

use crate::config::SeedTraitRanges;

/// Create a generation-zero agent with traits drawn from the seed ranges.
pub fn spawn_seed_agent<R: Rng>(
    species: SpeciesKind,
    position: Vec2,
    ranges: &SeedTraitRanges,
    rng: &mut R,
) -> Agent {
    let traits = AgentTraits {
        speed: ranges.speed.sample(rng),
        sight_range: ranges.sight_range.sample(rng),
        max_size: ranges.max_size.sample(rng),
        max_lifetime: ranges.max_lifetime.sample(rng),
        growth_time: ranges.growth_time,
        generation: 0,
    };
    new_agent(species, traits, position, None)
}

/// Create an offspring agent from already-blended traits.
///
/// Vitals start full with the age and pause stamps reset; the lineage is
/// recorded for the telemetry death record.
pub fn spawn_offspring(
    species: SpeciesKind,
    traits: AgentTraits,
    position: Vec2,
    parents: (AgentId, AgentId),
) -> Agent {
    new_agent(species, traits, position, Some(parents))
}

fn new_agent(
    species: SpeciesKind,
    traits: AgentTraits,
    position: Vec2,
    parents: Option<(AgentId, AgentId)>,
) -> Agent {
    Agent {
        id: AgentId::new(),
        species,
        traits,
        vitals: VitalState::full(),
        position,
        parents,
        lifetime_reward: 0.0,
        body: None,
        current_move: Vec2::ZERO,
        brake: 0.0,
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    #[test]
    fn seed_agent_traits_come_from_seed_ranges() {
        let ranges = SeedTraitRanges::default();
        let mut rng = SmallRng::seed_from_u64(13);
        for _ in 0..50 {
            let agent = spawn_seed_agent(SpeciesKind::Prey, Vec2::ZERO, &ranges, &mut rng);
            assert_eq!(agent.traits.generation, 0);
            assert!(agent.traits.speed >= ranges.speed.min);
            assert!(agent.traits.speed <= ranges.speed.max);
            assert!(agent.traits.max_lifetime >= ranges.max_lifetime.min);
            assert!((agent.traits.growth_time - ranges.growth_time).abs() < 1e-6);
            assert!(agent.parents.is_none());
        }
    }

    #[test]
    fn offspring_starts_with_full_vitals_and_lineage() {
        let traits = AgentTraits {
            speed: 15.0,
            sight_range: 1.2,
            max_size: 2.5,
            max_lifetime: 85.0,
            growth_time: 18.0,
            generation: 4,
        };
        let parents = (AgentId::new(), AgentId::new());
        let child = spawn_offspring(SpeciesKind::Predator, traits, Vec2::new(1.0, 2.0), parents);
        assert_eq!(child.vitals, VitalState::full());
        assert_eq!(child.parents, Some(parents));
        assert_eq!(child.traits.generation, 4);
        assert!((child.lifetime_reward).abs() < 1e-9);
    }
}
