//! Fitness-weighted genetic inheritance.
//!
//! Offspring traits are a blend of both parents' genes weighted by their
//! lifetime rewards, plus small uniform mutation noise with a rare
//! amplified mutation event to occasionally escape local optima. Every
//! gene is clamped to its valid range after mutation, so inheritance can
//! never produce an out-of-bounds trait.
//!
//! All randomness goes through a caller-supplied [`Rng`] so scenario
//! tests are reproducible from a seed.

use rand::Rng;

use ecosim_types::{AgentTraits, lerp};

use crate::config::{GeneticsConfig, TraitBounds};

/// Guard against division by zero when both fitness values are zero.
const FITNESS_EPSILON: f32 = 1e-6;

/// Blend a single gene from both parents.
fn inherit_gene<R: Rng>(
    gene_a: f32,
    gene_b: f32,
    weight: f32,
    config: &GeneticsConfig,
    rng: &mut R,
) -> f32 {
    let base = lerp(gene_a, gene_b, weight);
    let mut mutation = rng.random_range(-config.mutation_range..=config.mutation_range);

    // Rare large mutation event.
    if rng.random_bool(config.large_mutation_chance) {
        mutation *= config.amplification.sample(rng);
    }

    base + mutation
}

/// Produce offspring traits from two parents and their fitness scores.
///
/// `fitness_a` / `fitness_b` are the parents' lifetime rewards; negative
/// scores are treated as zero so a badly penalized parent never inverts
/// the blend weight. The child's generation is the parents' max plus one.
pub fn inherit<R: Rng>(
    parent_a: &AgentTraits,
    parent_b: &AgentTraits,
    fitness_a: f32,
    fitness_b: f32,
    bounds: &TraitBounds,
    config: &GeneticsConfig,
    rng: &mut R,
) -> AgentTraits {
    let fitness_a = fitness_a.max(0.0);
    let fitness_b = fitness_b.max(0.0);
    let weight = fitness_a / (fitness_a + fitness_b + FITNESS_EPSILON);

    AgentTraits {
        speed: bounds
            .speed
            .clamp(inherit_gene(parent_a.speed, parent_b.speed, weight, config, rng)),
        sight_range: bounds.sight_range.clamp(inherit_gene(
            parent_a.sight_range,
            parent_b.sight_range,
            weight,
            config,
            rng,
        )),
        max_size: bounds.max_size.clamp(inherit_gene(
            parent_a.max_size,
            parent_b.max_size,
            weight,
            config,
            rng,
        )),
        max_lifetime: bounds.max_lifetime.clamp(inherit_gene(
            parent_a.max_lifetime,
            parent_b.max_lifetime,
            weight,
            config,
            rng,
        )),
        growth_time: bounds.growth_time.clamp(inherit_gene(
            parent_a.growth_time,
            parent_b.growth_time,
            weight,
            config,
            rng,
        )),
        generation: parent_a.generation.max(parent_b.generation) + 1,
    }
}
