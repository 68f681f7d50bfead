//! Death cause classification.
//!
//! `is_alive` flipping false tells the caller *that* an agent died; this
//! module answers *why*, for the death-cause counters and the per-agent
//! telemetry record. When several conditions are true at once the first
//! in priority order wins: age limit, then starvation, then dehydration,
//! then health exhaustion.

use ecosim_types::{AgentTraits, DeathCause, VitalState};

/// Classify why a dead agent died.
///
/// Returns `None` for an agent that is still alive.
pub fn classify_death(vitals: &VitalState, traits: &AgentTraits) -> Option<DeathCause> {
    if vitals.is_alive(traits) {
        return None;
    }
    if vitals.age >= traits.max_lifetime {
        Some(DeathCause::Natural)
    } else if vitals.hunger <= 0.0 {
        Some(DeathCause::Starvation)
    } else if vitals.thirst <= 0.0 {
        Some(DeathCause::Dehydration)
    } else {
        Some(DeathCause::Exhaustion)
    }
}
