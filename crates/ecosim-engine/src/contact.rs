//! Contact adapter: the stand-in for the excluded physics layer.
//!
//! The simulation core consumes overlap events and produces movement
//! intents; a real deployment pairs it with a physics engine. This
//! adapter closes the loop for standalone runs: it integrates each
//! agent's movement intent into a position, clamps to the arena, and
//! diffs proximity-derived overlap sets between ticks into began/ended
//! events.

use std::collections::BTreeSet;

use ecosim_core::SimulationState;
use ecosim_types::{AgentId, OverlapEvent, OverlapPhase, OverlapTarget, Vec2};

/// Distance at which two entities count as touching.
const CONTACT_RADIUS: f32 = 1.0;

/// Margin inside the arena edge that counts as wall contact.
const WALL_MARGIN: f32 = 0.05;

/// Integrates movement and derives overlap events between ticks.
#[derive(Debug, Default)]
pub struct ContactAdapter {
    overlaps: BTreeSet<(AgentId, OverlapTarget)>,
}

impl ContactAdapter {
    /// A fresh adapter with no open overlaps.
    pub const fn new() -> Self {
        Self {
            overlaps: BTreeSet::new(),
        }
    }

    /// Forget all open overlaps (after an episode reset).
    pub fn clear(&mut self) {
        self.overlaps.clear();
    }

    /// Move every agent by its current intent, then diff the overlap
    /// set against the previous tick.
    pub fn step(&mut self, state: &mut SimulationState) -> Vec<OverlapEvent> {
        integrate_movement(state);
        let current = derive_overlaps(state);

        let mut events = Vec::new();
        for pair in current.difference(&self.overlaps) {
            events.push(OverlapEvent {
                agent: pair.0,
                target: pair.1,
                phase: OverlapPhase::Began,
            });
        }
        for pair in self.overlaps.difference(&current) {
            events.push(OverlapEvent {
                agent: pair.0,
                target: pair.1,
                phase: OverlapPhase::Ended,
            });
        }
        self.overlaps = current;
        events
    }
}

/// Apply one tick of locomotion: direction scaled by the speed trait,
/// attenuated by the brake, clamped to the arena.
fn integrate_movement(state: &mut SimulationState) {
    let dt = state.clock.dt();
    let arena = state.config.arena;
    for agent in state.agents.values_mut() {
        let direction = agent.current_move.normalized();
        let step = agent.traits.speed * (1.0 - agent.brake) * dt;
        let next = Vec2::new(
            agent.position.x + direction.x * step,
            agent.position.z + direction.z * step,
        );
        agent.position = arena.clamp(next);
        // A prey's body consumable follows its owner.
        if let Some(body_id) = agent.body
            && let Some(body) = state.consumables.get_mut(&body_id)
        {
            body.position = agent.position;
        }
    }
}

/// Compute the full proximity overlap set for the current positions.
fn derive_overlaps(state: &SimulationState) -> BTreeSet<(AgentId, OverlapTarget)> {
    let arena = state.config.arena;
    let mut overlaps = BTreeSet::new();

    for agent in state.agents.values() {
        if agent.position.x.abs() >= arena.half_extents.x - WALL_MARGIN
            || agent.position.z.abs() >= arena.half_extents.z - WALL_MARGIN
        {
            overlaps.insert((agent.id, OverlapTarget::Wall));
        }

        for consumable in state.consumables.values() {
            // An agent never overlaps its own body.
            if consumable.prey == Some(agent.id) {
                continue;
            }
            if agent.position.distance_to(consumable.position) <= CONTACT_RADIUS {
                overlaps.insert((agent.id, OverlapTarget::Consumable(consumable.id)));
            }
        }

        for other in state.agents.values() {
            if other.id == agent.id {
                continue;
            }
            if agent.position.distance_to(other.position) <= CONTACT_RADIUS {
                overlaps.insert((agent.id, OverlapTarget::Creature(other.id)));
            }
        }
    }
    overlaps
}
