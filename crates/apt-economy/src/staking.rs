//! Staking cohorts and the two staking policies.
//!
//! A cohort is locked in one month and released, whole, once
//! `staking_duration_months` have elapsed: a cohort started in month `s`
//! is liquid again at the start of month `s + duration`.

use std::collections::VecDeque;

use apt_core::constants::pct_of;
use apt_core::traits::{StakingContext, StakingPolicy};
use serde::{Deserialize, Serialize};

/// Tokens locked together in a single month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakingCohort {
    pub start_month: u32,
    pub amount: u64,
}

/// Open cohorts in lock order.
#[derive(Debug, Clone)]
pub struct StakingLedger {
    duration_months: u32,
    cohorts: VecDeque<StakingCohort>,
    staked: u64,
}

impl StakingLedger {
    pub fn new(duration_months: u32) -> Self {
        Self {
            duration_months,
            cohorts: VecDeque::new(),
            staked: 0,
        }
    }

    /// Total locked across all open cohorts.
    pub fn staked(&self) -> u64 {
        self.staked
    }

    pub fn cohorts(&self) -> impl Iterator<Item = &StakingCohort> {
        self.cohorts.iter()
    }

    /// Lock `amount` as a new cohort starting in `month`. Zero is a no-op.
    pub fn lock(&mut self, month: u32, amount: u64) {
        if amount == 0 {
            return;
        }
        self.cohorts.push_back(StakingCohort {
            start_month: month,
            amount,
        });
        self.staked += amount;
    }

    /// Release every cohort whose lock has run out by `month`.
    ///
    /// Cohorts are started in non-decreasing month order, so expired
    /// cohorts are always at the front.
    pub fn release_expired(&mut self, month: u32) -> u64 {
        let mut released = 0;
        while let Some(front) = self.cohorts.front() {
            // An expiry past u32::MAX never arrives.
            match front.start_month.checked_add(self.duration_months) {
                Some(end) if end <= month => {
                    released += front.amount;
                    self.cohorts.pop_front();
                }
                _ => break,
            }
        }
        self.staked -= released;
        released
    }
}

/// One cohort of a fixed share of total supply, locked in month 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ManualStaking {
    staking_pct: f64,
    restake: bool,
}

impl ManualStaking {
    pub fn new(staking_pct: f64, restake: bool) -> Self {
        Self {
            staking_pct,
            restake,
        }
    }
}

impl StakingPolicy for ManualStaking {
    fn new_stake(&self, ctx: &StakingContext) -> u64 {
        if ctx.month == 1 {
            pct_of(ctx.total_supply, self.staking_pct)
        } else {
            0
        }
    }

    fn restakes_on_expiry(&self) -> bool {
        self.restake
    }
}

/// Holders stake when the projected yield clears a target.
///
/// Below the target nobody stakes. At or above it the desired stake share
/// is `share_multiplier × yield`, capped at 100% of non-burned supply.
/// Shortfalls against what is already locked become a new cohort; a
/// surplus is only worked off as cohorts expire.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YieldStaking {
    /// Fractional target yield (0.08 for 8%).
    target_yield: f64,
    share_multiplier: f64,
}

impl YieldStaking {
    pub fn new(target_yield_pct: f64, share_multiplier: f64) -> Self {
        Self {
            target_yield: target_yield_pct / 100.0,
            share_multiplier,
        }
    }

    /// Desired staked share of non-burned supply for a given annual yield.
    pub fn target_share(&self, annual_yield: f64) -> f64 {
        if annual_yield.is_nan() || annual_yield < self.target_yield {
            return 0.0;
        }
        (self.share_multiplier * annual_yield).clamp(0.0, 1.0)
    }
}

impl StakingPolicy for YieldStaking {
    fn new_stake(&self, ctx: &StakingContext) -> u64 {
        let share = self.target_share(ctx.projected_annual_yield());
        if share <= 0.0 {
            return 0;
        }
        let stakable = ctx.circulating + ctx.staked;
        let target = pct_of(stakable, share * 100.0);
        target.saturating_sub(ctx.staked)
    }
}
