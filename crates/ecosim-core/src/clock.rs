//! The simulation clock: fixed-size discrete time steps.
//!
//! One tick advances simulation time by exactly `fixed_dt`. Elapsed time
//! is accumulated in `f64` so sub-task wake stamps stay precise over
//! long runs even with a small step.

use tracing::warn;

/// Default step size when the configured value is unusable.
pub const DEFAULT_FIXED_DT: f32 = 0.02;

/// Discrete fixed-step simulation clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimClock {
    tick: u64,
    fixed_dt: f32,
    elapsed: f64,
}

impl Default for SimClock {
    fn default() -> Self {
        Self::new(DEFAULT_FIXED_DT)
    }
}

impl SimClock {
    /// A clock at tick zero.
    ///
    /// A non-positive `fixed_dt` is replaced with [`DEFAULT_FIXED_DT`].
    pub fn new(fixed_dt: f32) -> Self {
        let fixed_dt = if fixed_dt <= 0.0 {
            warn!(fixed_dt, "non-positive step size, using default");
            DEFAULT_FIXED_DT
        } else {
            fixed_dt
        };
        Self {
            tick: 0,
            fixed_dt,
            elapsed: 0.0,
        }
    }

    /// The current tick number.
    pub const fn tick(&self) -> u64 {
        self.tick
    }

    /// The step size in time units.
    pub const fn dt(&self) -> f32 {
        self.fixed_dt
    }

    /// Simulation time at the start of the current tick.
    pub const fn now(&self) -> f64 {
        self.elapsed
    }

    /// Advance to the next tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed += f64::from(self.fixed_dt);
    }
}
