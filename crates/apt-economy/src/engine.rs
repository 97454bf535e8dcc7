//! Token economy recurrence.
//!
//! Month 0 is the launch state: the whole supply circulating, nothing staked
//! or burned, price at the seed price. Each month then runs, in order:
//!
//! 1. release expired staking cohorts and lock new ones
//! 2. spend revenue on a buyback at the current price, pay stakers their
//!    stake-weighted cut, burn the rest, and let the deflator treasury match
//! 3. settle circulating supply
//! 4. reprice from the change in circulating supply
//! 5. record valuation metrics
//!
//! Every token movement is an integer transfer between the circulating,
//! staked, and burned buckets, so their sum equals total supply after every
//! month.

use apt_core::allocation::AllocationBreakdown;
use apt_core::config::{EconomyConfig, SimulationConfig};
use apt_core::constants::{pct_of, to_tokens};
use apt_core::error::ValidationError;
use apt_core::traits::{StakingContext, StakingPolicy};
use apt_core::types::{
    MonthlyEconomyRecord, MonthlyRevenueRecord, SimulationParameters, SimulationRun, StakingMode,
};
use apt_solar::RevenueProjector;
use tracing::{debug, info, warn};

use crate::market::{reprice, staker_share, staking_yield_pct, BuybackPool};
use crate::staking::{ManualStaking, StakingLedger, YieldStaking};

/// Runs the economy recurrence under a fixed [`EconomyConfig`].
#[derive(Debug, Clone, Default)]
pub struct EconomySimulator {
    config: EconomyConfig,
}

impl EconomySimulator {
    pub fn new(config: EconomyConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EconomyConfig {
        &self.config
    }

    /// One record per revenue month, in order.
    ///
    /// Parameters, config, and the revenue sequence are all checked before
    /// the first month runs; after that the recurrence cannot fail.
    pub fn simulate(
        &self,
        params: &SimulationParameters,
        revenue: &[MonthlyRevenueRecord],
    ) -> Result<Vec<MonthlyEconomyRecord>, ValidationError> {
        params.validate()?;
        self.config.validate()?;
        check_revenue_sequence(revenue)?;

        info!(
            mode = params.staking.name(),
            investor_pct = params.investor_allocation_pct,
            duration = params.staking_duration_months,
            months = revenue.len(),
            seed_price = params.seed_price(),
            "starting economy simulation"
        );

        let records = match params.staking {
            StakingMode::Manual {
                staking_pct,
                restake,
            } => self.run(params, revenue, ManualStaking::new(staking_pct, restake)),
            StakingMode::YieldBased {
                target_yield_pct,
                share_multiplier,
            } => self.run(
                params,
                revenue,
                YieldStaking::new(target_yield_pct, share_multiplier),
            ),
        };

        if let Some(last) = records.last() {
            info!(
                final_price = last.token_price,
                burned = to_tokens(last.burned_cumulative),
                staked = to_tokens(last.staked_supply),
                "economy simulation complete"
            );
        }
        Ok(records)
    }

    fn run<P: StakingPolicy>(
        &self,
        params: &SimulationParameters,
        revenue: &[MonthlyRevenueRecord],
        policy: P,
    ) -> Vec<MonthlyEconomyRecord> {
        let mut state = EconomyState::launch(params, &self.config);
        revenue
            .iter()
            .map(|month| state.step(month, &policy, &self.config))
            .collect()
    }
}

/// Mutable state threaded through the recurrence. Private to a single run.
#[derive(Debug)]
struct EconomyState {
    total_supply: u64,
    circulating: u64,
    ledger: StakingLedger,
    burned: u64,
    price: f64,
    deflator_balance: u64,
    pool: BuybackPool,
}

impl EconomyState {
    fn launch(params: &SimulationParameters, config: &EconomyConfig) -> Self {
        let allocation =
            AllocationBreakdown::new(params, config.market_maker_pct, config.dev_pct);
        let deflator_balance = if config.deflator_matching {
            allocation.deflator_supply
        } else {
            0
        };
        Self {
            total_supply: params.total_supply,
            circulating: params.total_supply,
            ledger: StakingLedger::new(params.staking_duration_months),
            burned: 0,
            price: params.seed_price(),
            deflator_balance,
            pool: BuybackPool::new(pct_of(params.total_supply, config.liquidity_depth_pct)),
        }
    }

    fn step<P: StakingPolicy>(
        &mut self,
        revenue: &MonthlyRevenueRecord,
        policy: &P,
        config: &EconomyConfig,
    ) -> MonthlyEconomyRecord {
        let month = revenue.month_index;
        let circulating_before = self.circulating;
        let buyback_usd = revenue.monthly_revenue_usd.max(0.0) * config.buyback_fraction;

        // 1. Staking.
        let released = self.ledger.release_expired(month);
        self.circulating += released;

        let ctx = StakingContext {
            month,
            total_supply: self.total_supply,
            circulating: self.circulating,
            staked: self.ledger.staked(),
            token_price: self.price,
            buyback_usd,
        };
        let mut wanted = policy.new_stake(&ctx);
        if released > 0 && policy.restakes_on_expiry() {
            wanted = wanted.saturating_add(released);
        }
        let locked = wanted.min(self.circulating);
        if locked < wanted {
            warn!(month, wanted, locked, "stake capped by circulating supply");
        }
        self.ledger.lock(month, locked);
        self.circulating -= locked;

        // 2. Buyback and burn.
        let bought = self.pool.buy(buyback_usd, self.price).min(self.circulating);
        let rewards = staker_share(bought, self.ledger.staked(), self.total_supply);
        let matched = if config.deflator_matching {
            bought
                .min(self.deflator_balance)
                .min(self.circulating - bought)
        } else {
            0
        };
        self.deflator_balance -= matched;
        let burned_this_month = bought - rewards + matched;

        // 3. Supply.
        self.circulating -= burned_this_month;
        self.burned += burned_this_month;

        // 4. Price.
        self.price = reprice(
            self.price,
            circulating_before,
            self.circulating,
            config.price_elasticity,
        );

        // 5. Valuation.
        let staked = self.ledger.staked();
        let record = MonthlyEconomyRecord {
            month_index: month,
            circulating_supply: self.circulating,
            staked_supply: staked,
            burned_cumulative: self.burned,
            burned_this_month,
            bought_back: bought,
            staker_rewards: rewards,
            deflator_balance: self.deflator_balance,
            token_price: self.price,
            market_cap: to_tokens(self.circulating) * self.price,
            fdv: to_tokens(self.total_supply) * self.price,
            staking_yield_pct: staking_yield_pct(rewards, staked),
            stake_share_pct: staked as f64 / self.total_supply as f64 * 100.0,
        };

        debug!(
            month,
            released,
            locked,
            bought,
            burned = burned_this_month,
            price = self.price,
            "economy step"
        );
        record
    }
}

/// Revenue months must run 1, 2, 3, ... with no gaps.
fn check_revenue_sequence(revenue: &[MonthlyRevenueRecord]) -> Result<(), ValidationError> {
    for (i, record) in revenue.iter().enumerate() {
        let expected = i as u32 + 1;
        if record.month_index != expected {
            return Err(ValidationError::RevenueSequence {
                expected,
                got: record.month_index,
            });
        }
    }
    Ok(())
}

/// Run the economy over an existing revenue series.
pub fn simulate_economy(
    params: &SimulationParameters,
    revenue: &[MonthlyRevenueRecord],
    config: &EconomyConfig,
) -> Result<Vec<MonthlyEconomyRecord>, ValidationError> {
    EconomySimulator::new(config.clone()).simulate(params, revenue)
}

/// Project revenue from the parameters and run the economy over it.
pub fn simulate(
    params: &SimulationParameters,
    config: &SimulationConfig,
) -> Result<SimulationRun, ValidationError> {
    params.validate()?;
    let revenue = RevenueProjector::new(config.solar.clone()).project(
        params.funding_raised_usd,
        params.deployment_months,
        params.horizon_months,
    )?;
    let economy = simulate_economy(params, &revenue, &config.economy)?;
    Ok(SimulationRun {
        params: params.clone(),
        config: config.clone(),
        revenue,
        economy,
    })
}
