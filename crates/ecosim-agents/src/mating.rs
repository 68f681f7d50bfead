//! The mating (courtship) state machine.
//!
//! A pair task between two same-species adults. Courtship runs a fixed
//! duration in fixed sub-intervals; each elapsed sub-interval is one
//! scheduling step, and the driver pays the partial courtship reward to
//! the initiator after each step. Completion hands back control to the
//! driver, which pays costs, blends offspring traits, and spawns the
//! child. Either participant dying mid-courtship cancels the task with
//! no reward and no offspring: the driver simply drops it.

use ecosim_types::{Agent, AgentId, VitalState, clamp01};

use crate::config::MatingConfig;
use crate::error::{AgentError, MatingBlockReason};

/// Result of one courtship step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourtshipOutcome {
    /// One sub-interval elapsed; courtship continues.
    Step,
    /// The full duration has elapsed; the pair reproduces.
    Completed,
}

/// An in-flight courtship between two agents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatingTask {
    /// The agent that began the courtship; receives the partial rewards.
    pub initiator: AgentId,
    /// The other participant.
    pub partner: AgentId,
    /// Courtship time elapsed so far.
    pub elapsed: f32,
    /// Simulation time of the next courtship step.
    pub next_wake: f64,
}

impl MatingTask {
    /// Start a courtship. The first step is due one interval from now.
    pub fn begin(
        initiator: AgentId,
        partner: AgentId,
        config: &MatingConfig,
        now: f64,
    ) -> Self {
        Self {
            initiator,
            partner,
            elapsed: 0.0,
            next_wake: now + f64::from(config.courtship_interval),
        }
    }

    /// Whether this task's next step has arrived.
    pub fn due(&self, now: f64) -> bool {
        now >= self.next_wake
    }

    /// Whether the given agent is a participant of this task.
    pub fn involves(&self, id: AgentId) -> bool {
        self.initiator == id || self.partner == id
    }

    /// Advance one courtship step.
    pub fn advance(&mut self, config: &MatingConfig, now: f64) -> CourtshipOutcome {
        self.elapsed += config.courtship_interval;
        self.next_wake = now + f64::from(config.courtship_interval);
        if self.elapsed >= config.courtship_duration {
            CourtshipOutcome::Completed
        } else {
            CourtshipOutcome::Step
        }
    }
}

/// Check that two agents may start a courtship.
///
/// `a_busy` / `b_busy` are the driver's state guards: an agent already
/// in a courtship cannot start another.
pub fn validate_pair(a: &Agent, b: &Agent, a_busy: bool, b_busy: bool) -> Result<(), AgentError> {
    if a.species != b.species {
        return Err(AgentError::MatingBlocked {
            reason: MatingBlockReason::SpeciesMismatch,
        });
    }
    if a_busy || b_busy {
        return Err(AgentError::MatingBlocked {
            reason: MatingBlockReason::Busy,
        });
    }
    if !a.vitals.can_mate(&a.traits) || !b.vitals.can_mate(&b.traits) {
        return Err(AgentError::MatingBlocked {
            reason: MatingBlockReason::Ineligible,
        });
    }
    Ok(())
}

/// Deduct the reproduction cost from one parent's vitals.
pub fn pay_mating_cost(vitals: &mut VitalState, config: &MatingConfig) {
    vitals.hunger = clamp01(vitals.hunger - config.vitality_cost);
    vitals.thirst = clamp01(vitals.thirst - config.vitality_cost);
}
