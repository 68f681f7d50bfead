//! The reward ledger: one place that turns simulation events into
//! signed reward deltas and keeps the cumulative books.
//!
//! Every method returns the signed delta for the agent concerned and
//! accumulates its magnitude into [`EpisodeMetrics`]: positive deltas
//! into `total_reward_given`, negative ones into `total_penalty_given`.
//! The caller adds the delta to the agent's `lifetime_reward`, which
//! doubles as the fitness score at inheritance time.

use ecosim_types::{DeathCause, EpisodeMetrics, clamp01};

use crate::config::RewardConfig;

/// Payout of a successful mating: lump sums for the parents plus a
/// share for every other live same-species agent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatingPayout {
    /// Paid to each of the two parents.
    pub parent: f32,
    /// Paid to each other live same-species agent.
    pub group: f32,
}

/// Stateless reward calculator over a cumulative metrics ledger.
#[derive(Debug, Clone, Default)]
pub struct RewardLedger {
    /// Baselines and references for every event class.
    pub config: RewardConfig,
}

impl RewardLedger {
    /// A ledger with the given baselines.
    pub const fn new(config: RewardConfig) -> Self {
        Self { config }
    }

    /// Book a signed delta into the cumulative totals.
    fn book(metrics: &mut EpisodeMetrics, delta: f32) -> f32 {
        if delta >= 0.0 {
            metrics.total_reward_given += delta;
        } else {
            metrics.total_penalty_given += -delta;
        }
        delta
    }

    /// Reward for eating `amount` of food.
    pub fn nutrition(&self, metrics: &mut EpisodeMetrics, amount: f32) -> f32 {
        let delta = self.config.nutrition_base * amount / self.config.nutrition_reference;
        Self::book(metrics, delta)
    }

    /// Reward for drinking `amount` of water.
    pub fn hydration(&self, metrics: &mut EpisodeMetrics, amount: f32) -> f32 {
        let delta = self.config.hydration_base * amount / self.config.hydration_reference;
        Self::book(metrics, delta)
    }

    /// Reward for a predator draining `amount` from a prey body.
    pub fn predation(&self, metrics: &mut EpisodeMetrics, amount: f32) -> f32 {
        let delta = self.config.predation_base * amount / self.config.predation_reference;
        Self::book(metrics, delta)
    }

    /// Partial courtship credit, paid to the initiator per sub-interval.
    pub fn partial_mating(&self, metrics: &mut EpisodeMetrics) -> f32 {
        let delta = self.config.partial_mating;
        metrics.partial_mating_reward += delta;
        Self::book(metrics, delta)
    }

    /// Payout for a completed mating.
    ///
    /// `group_size` is the number of other live same-species agents,
    /// excluding both parents. Books the full payout and bumps the
    /// mating counter; the caller distributes the individual shares.
    pub fn mating_success(&self, metrics: &mut EpisodeMetrics, group_size: u32) -> MatingPayout {
        let payout = MatingPayout {
            parent: self.config.mating_success,
            group: self.config.mating_group_share,
        };
        metrics.total_reward_given += payout.parent * 2.0 + payout.group * group_size as f32;
        metrics.total_matings += 1;
        payout
    }

    /// Per-tick vitality signal.
    ///
    /// Both vitals above the comfort threshold earn a small capped bonus;
    /// otherwise a banded penalty applies, mild while moderately low and
    /// steep once a vital drops below the critical threshold. Both sides
    /// scale with `dt`.
    pub fn vitality(&self, metrics: &mut EpisodeMetrics, hunger: f32, thirst: f32, dt: f32) -> f32 {
        let threshold = self.config.vitality_threshold;
        let delta = if hunger > threshold && thirst > threshold {
            let reward = (hunger - threshold) + (thirst - threshold);
            reward.clamp(0.0, self.config.vitality_reward_cap) * dt
        } else {
            let penalty = self.band_penalty(hunger) + self.band_penalty(thirst);
            penalty.clamp(-self.config.vitality_penalty_cap, 0.0) * dt
        };
        Self::book(metrics, delta)
    }

    fn band_penalty(&self, value: f32) -> f32 {
        if value >= self.config.vitality_threshold {
            0.0
        } else if value >= self.config.vitality_critical_threshold {
            -self.config.vitality_low_rate * ((self.config.vitality_threshold - value) / 0.1)
        } else {
            -self.config.vitality_critical_rate
                * ((self.config.vitality_critical_threshold - value) / 0.1)
        }
    }

    /// Crowding penalty for `count` same-species neighbors.
    pub fn crowding(&self, metrics: &mut EpisodeMetrics, count: u32) -> f32 {
        let penalty =
            clamp01(count as f32 / self.config.crowding_reference as f32) * self.config.crowding_scale;
        metrics.crowding_penalty += penalty;
        Self::book(metrics, -penalty)
    }

    /// Flat penalty for touching an arena wall.
    pub fn wall_contact(&self, metrics: &mut EpisodeMetrics) -> f32 {
        Self::book(metrics, -self.config.wall_penalty)
    }

    /// Terminal reward on death.
    ///
    /// A natural death with surviving offspring earns a legacy bonus of
    /// `min(1, num_children / legacy_divisor)`; every other death costs
    /// the flat death penalty.
    pub fn death_outcome(
        &self,
        metrics: &mut EpisodeMetrics,
        cause: DeathCause,
        num_children: u32,
    ) -> f32 {
        let delta = if cause == DeathCause::Natural && num_children > 0 {
            (num_children as f32 / self.config.legacy_divisor).min(1.0)
        } else {
            -self.config.death_penalty
        };
        Self::book(metrics, delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nutrition_scales_from_baseline() {
        // +0.2 per 0.1 units: eating 0.6 earns 1.2.
        let ledger = RewardLedger::default();
        let mut metrics = EpisodeMetrics::default();
        let delta = ledger.nutrition(&mut metrics, 0.6);
        assert!((delta - 1.2).abs() < 1e-5);
        assert!((metrics.total_reward_given - 1.2).abs() < 1e-5);
    }

    #[test]
    fn predation_scales_from_baseline() {
        // +3.0 per 0.6 units.
        let ledger = RewardLedger::default();
        let mut metrics = EpisodeMetrics::default();
        let delta = ledger.predation(&mut metrics, 0.6);
        assert!((delta - 3.0).abs() < 1e-5);
    }

    #[test]
    fn partial_mating_tracks_its_own_total() {
        let ledger = RewardLedger::default();
        let mut metrics = EpisodeMetrics::default();
        for _ in 0..4 {
            let _ = ledger.partial_mating(&mut metrics);
        }
        assert!((metrics.partial_mating_reward - 0.6).abs() < 1e-5);
        assert!((metrics.total_reward_given - 0.6).abs() < 1e-5);
    }

    #[test]
    fn mating_success_books_parents_and_group() {
        let ledger = RewardLedger::default();
        let mut metrics = EpisodeMetrics::default();
        let payout = ledger.mating_success(&mut metrics, 3);
        assert!((payout.parent - 5.0).abs() < 1e-6);
        assert!((payout.group - 0.25).abs() < 1e-6);
        // 2 * 5.0 + 3 * 0.25
        assert!((metrics.total_reward_given - 10.75).abs() < 1e-5);
        assert_eq!(metrics.total_matings, 1);
    }

    #[test]
    fn vitality_rewards_comfortable_agents() {
        let ledger = RewardLedger::default();
        let mut metrics = EpisodeMetrics::default();
        let delta = ledger.vitality(&mut metrics, 0.9, 0.8, 0.02);
        // (0.2 + 0.1) capped at 0.05, times dt.
        assert!((delta - 0.05 * 0.02).abs() < 1e-7);
    }

    #[test]
    fn vitality_penalizes_moderately_low_vitals() {
        let ledger = RewardLedger::default();
        let mut metrics = EpisodeMetrics::default();
        // hunger 0.5: -0.0025 * (0.2 / 0.1) = -0.005; thirst fine => 0.
        let delta = ledger.vitality(&mut metrics, 0.5, 0.9, 1.0);
        assert!((delta + 0.005).abs() < 1e-6);
        assert!((metrics.total_penalty_given - 0.005).abs() < 1e-6);
    }

    #[test]
    fn vitality_critical_band_is_steeper() {
        let ledger = RewardLedger::default();
        let mut metrics = EpisodeMetrics::default();
        // hunger 0.1: -0.01 * (0.2 / 0.1) = -0.02.
        let delta = ledger.vitality(&mut metrics, 0.1, 0.9, 1.0);
        assert!((delta + 0.02).abs() < 1e-6);
    }

    #[test]
    fn vitality_penalty_is_capped() {
        let ledger = RewardLedger::default();
        let mut metrics = EpisodeMetrics::default();
        let delta = ledger.vitality(&mut metrics, 0.0, 0.0, 1.0);
        assert!((delta + 0.1).abs() < 1e-6);
    }

    #[test]
    fn vitality_at_threshold_is_not_a_reward() {
        // Exactly 0.7 on either vital falls through to the penalty side,
        // where the band evaluates to zero.
        let ledger = RewardLedger::default();
        let mut metrics = EpisodeMetrics::default();
        let delta = ledger.vitality(&mut metrics, 0.7, 0.9, 1.0);
        assert!(delta.abs() < 1e-7);
    }

    #[test]
    fn crowding_saturates_at_reference_count() {
        let ledger = RewardLedger::default();
        let mut metrics = EpisodeMetrics::default();
        let at_reference = ledger.crowding(&mut metrics, 6);
        let beyond = ledger.crowding(&mut metrics, 60);
        assert!((at_reference + 0.05).abs() < 1e-6);
        assert!((beyond - at_reference).abs() < 1e-6);
        assert!((metrics.crowding_penalty - 0.1).abs() < 1e-6);
    }

    #[test]
    fn wall_contact_is_flat() {
        let ledger = RewardLedger::default();
        let mut metrics = EpisodeMetrics::default();
        assert!((ledger.wall_contact(&mut metrics) + 0.5).abs() < 1e-6);
    }

    #[test]
    fn death_without_offspring_costs_the_flat_penalty() {
        let ledger = RewardLedger::default();
        let mut metrics = EpisodeMetrics::default();
        let delta = ledger.death_outcome(&mut metrics, DeathCause::Starvation, 3);
        assert!((delta + 1.0).abs() < 1e-6);
        assert!((metrics.total_penalty_given - 1.0).abs() < 1e-6);
    }

    #[test]
    fn natural_death_with_offspring_earns_legacy_bonus() {
        // One child: +0.5. Three children: capped at +1.0.
        let ledger = RewardLedger::default();
        let mut metrics = EpisodeMetrics::default();
        let one = ledger.death_outcome(&mut metrics, DeathCause::Natural, 1);
        assert!((one - 0.5).abs() < 1e-6);
        let three = ledger.death_outcome(&mut metrics, DeathCause::Natural, 3);
        assert!((three - 1.0).abs() < 1e-6);
        // Bonuses are booked as rewards, not penalties.
        assert!((metrics.total_reward_given - 1.5).abs() < 1e-6);
        assert!(metrics.total_penalty_given.abs() < 1e-6);
    }

    #[test]
    fn natural_death_without_offspring_is_still_a_penalty() {
        let ledger = RewardLedger::default();
        let mut metrics = EpisodeMetrics::default();
        let delta = ledger.death_outcome(&mut metrics, DeathCause::Natural, 0);
        assert!((delta + 1.0).abs() < 1e-6);
    }
}
