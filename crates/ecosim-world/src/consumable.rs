//! Sustained consumables: resources drained gradually over multiple ticks.
//!
//! A consumable exposes a fixed `value_per_tick` derived from its total
//! value and drain schedule. `remaining_value` only ever decreases; once
//! it reaches zero the owner retires the consumable exactly once (food
//! and water go back to the recycle path, a prey body rides the prey's
//! own death path).

use serde::{Deserialize, Serialize};

use ecosim_types::{AgentId, ConsumableId, ConsumableKind, Vec2};

/// Default total nutritional value of a food or water patch.
pub const DEFAULT_TOTAL_VALUE: f32 = 3.0;

/// Default interval between drain ticks, in time units.
pub const DEFAULT_TICK_INTERVAL: f32 = 0.2;

/// Default total drain duration, in time units.
pub const DEFAULT_DURATION: f32 = 1.0;

/// Biomass bounds for a prey body's edible value.
const PREY_VALUE_MIN: f32 = 1.0;
/// Upper biomass bound.
const PREY_VALUE_MAX: f32 = 5.0;

/// Result of a single drain step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConsumeResult {
    /// How much was actually drained (never exceeds what remained).
    pub consumed: f32,
    /// Whether this drain emptied the consumable.
    pub exhausted: bool,
}

/// An environment resource drained over multiple ticks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SustainedConsumable {
    /// Unique identifier.
    pub id: ConsumableId,
    /// What draining this resource does to the consumer.
    pub kind: ConsumableKind,
    /// Where the resource sits in the arena.
    pub position: Vec2,
    /// Total drainable value.
    pub total_value: f32,
    /// Value still available. Monotonically non-increasing.
    pub remaining_value: f32,
    /// Interval between drain ticks.
    pub tick_interval: f32,
    /// Total time a consumer spends draining this resource.
    pub duration: f32,
    /// Value drained per tick, derived from the schedule.
    pub value_per_tick: f32,
    /// Number of drain ticks in the schedule.
    pub total_ticks: u32,
    /// For Prey-kind: the living prey agent this body belongs to.
    pub prey: Option<AgentId>,
}

impl SustainedConsumable {
    /// Create a consumable with an explicit schedule.
    ///
    /// Invalid configuration is replaced with safe defaults rather than
    /// rejected: a non-positive (or near-zero) tick interval becomes
    /// [`DEFAULT_TICK_INTERVAL`], a non-positive duration becomes
    /// [`DEFAULT_DURATION`].
    pub fn new(
        kind: ConsumableKind,
        position: Vec2,
        total_value: f32,
        tick_interval: f32,
        duration: f32,
    ) -> Self {
        let tick_interval = if tick_interval <= 0.01 {
            DEFAULT_TICK_INTERVAL
        } else {
            tick_interval
        };
        let duration = if duration <= 0.0 { DEFAULT_DURATION } else { duration };

        let mut consumable = Self {
            id: ConsumableId::new(),
            kind,
            position,
            total_value,
            remaining_value: total_value,
            tick_interval,
            duration,
            value_per_tick: 0.0,
            total_ticks: 0,
            prey: None,
        };
        consumable.recompute_schedule();
        consumable
    }

    /// A food patch with default value and schedule.
    pub fn food(position: Vec2) -> Self {
        Self::new(
            ConsumableKind::Food,
            position,
            DEFAULT_TOTAL_VALUE,
            DEFAULT_TICK_INTERVAL,
            DEFAULT_DURATION,
        )
    }

    /// A water source with default value and schedule.
    pub fn water(position: Vec2) -> Self {
        Self::new(
            ConsumableKind::Water,
            position,
            DEFAULT_TOTAL_VALUE,
            DEFAULT_TICK_INTERVAL,
            DEFAULT_DURATION,
        )
    }

    /// The edible body of a living prey agent.
    ///
    /// Value and duration both scale with the prey's current biomass and
    /// are recomputed via [`update_from_size`](Self::update_from_size) as
    /// the prey grows.
    pub fn prey_body(position: Vec2, prey: AgentId, current_size: f32) -> Self {
        let biomass = current_size.clamp(PREY_VALUE_MIN, PREY_VALUE_MAX);
        let mut body = Self::new(
            ConsumableKind::Prey,
            position,
            biomass,
            DEFAULT_TICK_INTERVAL,
            biomass * 2.0,
        );
        body.prey = Some(prey);
        body
    }

    /// Recompute the per-tick value from the current schedule.
    fn recompute_schedule(&mut self) {
        let ticks = (self.duration / self.tick_interval).round();
        self.total_ticks = if ticks < 1.0 { 1 } else { ticks as u32 };
        self.value_per_tick = self.total_value / self.total_ticks as f32;
    }

    /// Rescale a prey body after the prey has grown.
    ///
    /// The already-consumed fraction is preserved so growth never refunds
    /// value that was drained.
    pub fn update_from_size(&mut self, new_biomass: f32) {
        if self.kind != ConsumableKind::Prey || self.total_value <= 0.0 {
            return;
        }

        let clamped = new_biomass.clamp(PREY_VALUE_MIN, PREY_VALUE_MAX);
        let consumed_fraction = 1.0 - self.remaining_value / self.total_value;

        self.total_value = clamped;
        self.duration = clamped * 2.0;
        self.recompute_schedule();
        self.remaining_value = self.total_value * (1.0 - consumed_fraction);
    }

    /// Drain up to `amount` from the remaining value.
    ///
    /// Returns how much was actually consumed and whether the resource is
    /// now empty. The remaining value never goes negative and the sum of
    /// all consumed amounts never exceeds `total_value`.
    pub fn consume(&mut self, amount: f32) -> ConsumeResult {
        let consumed = amount.min(self.remaining_value);
        if consumed <= 0.0 {
            return ConsumeResult {
                consumed: 0.0,
                exhausted: self.remaining_value <= 0.0,
            };
        }

        self.remaining_value = (self.remaining_value - consumed).max(0.0);
        ConsumeResult {
            consumed,
            exhausted: self.remaining_value <= 0.0,
        }
    }
}
