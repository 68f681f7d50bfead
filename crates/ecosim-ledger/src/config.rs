//! Reward baselines and scaling references.
//!
//! Every reward in the simulation is a fixed baseline scaled by the
//! event's magnitude relative to a reference amount, so tuning one
//! number shifts a whole event class without touching the ledger logic.

use serde::{Deserialize, Serialize};

/// Baselines for every reward event class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardConfig {
    /// Baseline for eating food (default: 0.2 per reference amount).
    pub nutrition_base: f32,
    /// Reference amount for one nutrition baseline (default: 0.1).
    pub nutrition_reference: f32,

    /// Baseline for drinking water (default: 0.2 per reference amount).
    pub hydration_base: f32,
    /// Reference amount for one hydration baseline (default: 0.1).
    pub hydration_reference: f32,

    /// Baseline for a predator feeding on prey (default: 3.0).
    pub predation_base: f32,
    /// Reference amount for one predation baseline (default: 0.6).
    pub predation_reference: f32,

    /// Paid to the initiator per elapsed courtship sub-interval
    /// (default: 0.15).
    pub partial_mating: f32,
    /// Lump sum to each parent on a successful mating (default: 5.0).
    pub mating_success: f32,
    /// Paid to every other live same-species agent on a successful
    /// mating (default: 0.25).
    pub mating_group_share: f32,

    /// Hunger/thirst level above which the per-tick vitality bonus
    /// applies (default: 0.7). Below it the banded penalty takes over.
    pub vitality_threshold: f32,
    /// Level below which the steep penalty band applies (default: 0.3).
    pub vitality_critical_threshold: f32,
    /// Cap on the per-tick vitality bonus before `dt` scaling
    /// (default: 0.05).
    pub vitality_reward_cap: f32,
    /// Cap on the per-tick vitality penalty magnitude before `dt`
    /// scaling (default: 0.1).
    pub vitality_penalty_cap: f32,
    /// Penalty slope in the moderate band, per 0.1 of deficit
    /// (default: 0.0025).
    pub vitality_low_rate: f32,
    /// Penalty slope in the critical band, per 0.1 of deficit
    /// (default: 0.01).
    pub vitality_critical_rate: f32,

    /// Same-species neighbor count at which the crowding penalty
    /// saturates (default: 6).
    pub crowding_reference: u32,
    /// Crowding penalty at full saturation (default: 0.05).
    pub crowding_scale: f32,

    /// Flat penalty for touching an arena wall (default: 0.5).
    pub wall_penalty: f32,
    /// Flat penalty on death (default: 1.0).
    pub death_penalty: f32,
    /// Per-child bonus divisor for a natural death with offspring: the
    /// bonus is `min(1, num_children / legacy_divisor)` (default: 2).
    pub legacy_divisor: f32,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            nutrition_base: 0.2,
            nutrition_reference: 0.1,
            hydration_base: 0.2,
            hydration_reference: 0.1,
            predation_base: 3.0,
            predation_reference: 0.6,
            partial_mating: 0.15,
            mating_success: 5.0,
            mating_group_share: 0.25,
            vitality_threshold: 0.7,
            vitality_critical_threshold: 0.3,
            vitality_reward_cap: 0.05,
            vitality_penalty_cap: 0.1,
            vitality_low_rate: 0.0025,
            vitality_critical_rate: 0.01,
            crowding_reference: 6,
            crowding_scale: 0.05,
            wall_penalty: 0.5,
            death_penalty: 1.0,
            legacy_divisor: 2.0,
        }
    }
}
