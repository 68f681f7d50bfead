//! Vital mechanics applied to agents each tick.
//!
//! Per-tick order of operations:
//!
//! 1. Age advances by `dt`
//! 2. Hunger and thirst decay at their configured rates, unless the
//!    corresponding post-feed pause window is still open
//! 3. Health decays while either vital is critically low, regenerates
//!    while both are comfortable, and holds steady in between (the dead
//!    zone between the two thresholds prevents oscillation)
//! 4. All three vitals are clamped to `[0, 1]`
//! 5. If the agent is no longer alive, the death cause is classified
//!
//! Feeding happens outside the tick via [`eat`] / [`drink`], which raise
//! the vital and open its pause window so decay does not immediately
//! mask the reward signal.

use ecosim_types::{AgentTraits, DeathCause, VitalState, clamp01};

use crate::config::VitalsConfig;
use crate::death::classify_death;

/// Advance one agent's vitals by one tick.
///
/// `now` is the simulation time at the start of this tick, used to test
/// the pause windows. Returns the death cause if this tick killed the
/// agent; the caller owns the rest of the death path.
pub fn apply_vital_tick(
    vitals: &mut VitalState,
    traits: &AgentTraits,
    config: &VitalsConfig,
    now: f64,
    dt: f32,
) -> Option<DeathCause> {
    vitals.age += dt;

    if now >= vitals.hunger_pause_until {
        vitals.hunger -= config.hunger_decay_rate * dt;
    }
    if now >= vitals.thirst_pause_until {
        vitals.thirst -= config.thirst_decay_rate * dt;
    }
    vitals.hunger = clamp01(vitals.hunger);
    vitals.thirst = clamp01(vitals.thirst);

    if vitals.hunger < config.low_vital_threshold || vitals.thirst < config.low_vital_threshold {
        vitals.health -= config.health_decay_rate * dt;
    } else if vitals.hunger >= config.regen_vital_threshold
        && vitals.thirst >= config.regen_vital_threshold
    {
        vitals.health += config.health_regen_rate * dt;
    }
    vitals.health = clamp01(vitals.health);

    if vitals.is_alive(traits) {
        None
    } else {
        classify_death(vitals, traits)
    }
}

/// Raise hunger by `amount` and suspend hunger decay for the pause window.
pub fn eat(vitals: &mut VitalState, amount: f32, now: f64, config: &VitalsConfig) {
    vitals.hunger = clamp01(vitals.hunger + amount);
    vitals.hunger_pause_until = now + config.feed_pause;
}

/// Raise thirst by `amount` and suspend thirst decay for the pause window.
pub fn drink(vitals: &mut VitalState, amount: f32, now: f64, config: &VitalsConfig) {
    vitals.thirst = clamp01(vitals.thirst + amount);
    vitals.thirst_pause_until = now + config.feed_pause;
}
