//! The consumption state machine.
//!
//! One agent drains one consumable over a series of timed wakes. The
//! task itself is a plain tagged struct advanced one logical step per
//! wake by the tick driver; it never holds references into the world, so
//! cancellation is just dropping the task. At most one task per agent is
//! enforced by the driver's state guard.
//!
//! A wake either drains one `value_per_tick` slice, skips (target vital
//! already full; schedule time still passes), or stops with a reason.
//! Stops are final: the driver drops the task and the agent is idle
//! again.

use ecosim_types::{AgentId, ConsumableId, ConsumableKind, SpeciesKind};
use ecosim_world::SustainedConsumable;

use crate::error::AgentError;

/// Why a consumption task finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The consumable ran out of value.
    Exhausted,
    /// The task's drain schedule ran its full duration.
    DurationElapsed,
    /// A predator woke sated on a prey body and released it.
    ConsumerSated,
}

/// Result of one consumption wake.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrainOutcome {
    /// A slice was drained. `retired` flags that this drain emptied the
    /// consumable, which the driver retires exactly once.
    Drained {
        /// Value actually drained this wake.
        amount: f32,
        /// Whether the consumable is now empty.
        retired: bool,
    },
    /// Nothing drained this wake (target vital already full); the
    /// schedule stays alive and the next wake is still set.
    Skipped,
    /// The task is finished; the driver drops it.
    Stopped(StopReason),
}

/// An in-flight consumption: one agent draining one consumable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConsumptionTask {
    /// The draining agent.
    pub consumer: AgentId,
    /// The consumable being drained.
    pub target: ConsumableId,
    /// Time spent on this task so far.
    pub elapsed: f32,
    /// Simulation time of the next drain wake.
    pub next_wake: f64,
}

impl ConsumptionTask {
    /// Start a task. The first drain wake is due immediately.
    pub const fn begin(consumer: AgentId, target: ConsumableId, now: f64) -> Self {
        Self {
            consumer,
            target,
            elapsed: 0.0,
            next_wake: now,
        }
    }

    /// Whether this task's next wake has arrived.
    pub fn due(&self, now: f64) -> bool {
        now >= self.next_wake
    }

    /// Advance one wake against the target consumable.
    ///
    /// `vital_full` is whether the vital this consumable feeds is already
    /// at 1.0. A full vital skips the drain, but schedule time still
    /// passes, so a sated consumer winds the task down instead of holding
    /// the target open forever; a sated predator releases the prey
    /// outright. The caller applies the drained amount to the consumer
    /// and hands out the reward.
    pub fn advance(
        &mut self,
        consumable: &mut SustainedConsumable,
        vital_full: bool,
        now: f64,
    ) -> DrainOutcome {
        if self.elapsed >= consumable.duration {
            return DrainOutcome::Stopped(StopReason::DurationElapsed);
        }

        if vital_full {
            if consumable.kind == ConsumableKind::Prey {
                return DrainOutcome::Stopped(StopReason::ConsumerSated);
            }
            self.elapsed += consumable.tick_interval;
            self.next_wake = now + f64::from(consumable.tick_interval);
            if self.elapsed >= consumable.duration {
                return DrainOutcome::Stopped(StopReason::DurationElapsed);
            }
            return DrainOutcome::Skipped;
        }

        let result = consumable.consume(consumable.value_per_tick);
        if result.consumed <= 0.0 {
            return DrainOutcome::Stopped(StopReason::Exhausted);
        }

        self.elapsed += consumable.tick_interval;
        self.next_wake = now + f64::from(consumable.tick_interval);
        DrainOutcome::Drained {
            amount: result.consumed,
            retired: result.exhausted,
        }
    }
}

/// Check that a species may drain a consumable of the given kind.
///
/// Prey graze and drink; predators drink and eat prey bodies. Everything
/// else is refused before a task is created.
pub fn check_eligibility(species: SpeciesKind, kind: ConsumableKind) -> Result<(), AgentError> {
    let allowed = match species {
        SpeciesKind::Prey => matches!(kind, ConsumableKind::Food | ConsumableKind::Water),
        SpeciesKind::Predator => matches!(kind, ConsumableKind::Water | ConsumableKind::Prey),
    };
    if allowed {
        Ok(())
    } else {
        Err(AgentError::IneligibleConsumable { species, kind })
    }
}
