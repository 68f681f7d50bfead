//! Action source: where agent movement decisions come from.
//!
//! Once per tick the driver asks the [`ActionSource`] for each live
//! agent's steering choice. The trait abstracts the mechanism -- a
//! learned policy, a scripted bot, or a test stub -- so the tick cycle
//! can be exercised end to end without any policy backend.

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use ecosim_types::{Agent, Vec2, clamp01};

/// One agent's movement choice for the current tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ActionChoice {
    /// Desired movement direction; the locomotion layer scales it by the
    /// agent's speed trait.
    pub steer: Vec2,
    /// Brake scalar in `[0, 1]`: 1 stops the agent.
    pub brake: f32,
}

impl ActionChoice {
    /// Clamp the brake into range.
    pub fn sanitized(self) -> Self {
        Self {
            steer: self.steer,
            brake: clamp01(self.brake),
        }
    }
}

/// A source of per-agent movement decisions.
pub trait ActionSource {
    /// Choose one agent's movement for the given tick.
    fn choose(&mut self, tick: u64, agent: &Agent) -> ActionChoice;
}

/// A stub source that always stands still.
///
/// Lets tests drive the tick cycle with fully predictable positions.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdleActionSource;

impl ActionSource for IdleActionSource {
    fn choose(&mut self, _tick: u64, _agent: &Agent) -> ActionChoice {
        ActionChoice {
            steer: Vec2::ZERO,
            brake: 1.0,
        }
    }
}

/// A random-walk source: a fresh direction every few ticks.
///
/// Ships with the engine binary so a run produces movement without a
/// policy backend attached.
#[derive(Debug, Clone)]
pub struct WanderActionSource {
    rng: SmallRng,
    /// Ticks between direction changes.
    hold_ticks: u64,
}

impl WanderActionSource {
    /// A wander source seeded for reproducibility.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            hold_ticks: 25,
        }
    }
}

impl ActionSource for WanderActionSource {
    fn choose(&mut self, tick: u64, agent: &Agent) -> ActionChoice {
        // Keep the previous heading between direction changes.
        if tick % self.hold_ticks != 0 && agent.current_move != Vec2::ZERO {
            return ActionChoice {
                steer: agent.current_move,
                brake: agent.brake,
            };
        }
        let steer = Vec2::new(
            self.rng.random_range(-1.0..=1.0),
            self.rng.random_range(-1.0..=1.0),
        )
        .normalized();
        ActionChoice { steer, brake: 0.0 }
    }
}
