//! Headline figures for a finished run.
//!
//! [`SummaryAccumulator`] folds records in one month at a time, for callers
//! that stream a run; [`summarize_records`] does the same over record
//! slices and [`summarize`] over a whole [`SimulationRun`].

use apt_core::allocation::AllocationBreakdown;
use apt_core::config::SimulationConfig;
use apt_core::types::{
    MonthlyEconomyRecord, MonthlyRevenueRecord, SimulationParameters, SimulationRun,
};
use apt_solar::RevenueProjector;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub months: u32,
    pub initial_price: f64,
    pub final_price: f64,
    pub price_appreciation_pct: f64,
    pub peak_price: f64,
    pub final_market_cap: f64,
    pub final_fdv: f64,
    pub final_circulating_supply: u64,
    pub final_staked_supply: u64,
    pub final_staking_yield_pct: f64,
    pub total_burned: u64,
    pub total_bought_back: u64,
    pub total_staker_rewards: u64,
    pub deflator_balance: u64,
    pub total_revenue_usd: f64,
    pub final_capacity_kw: f64,
    /// Nameplate capacity the raise pays for.
    pub nameplate_capacity_mw: f64,
    pub annual_generation_kwh: f64,
    pub annual_revenue_usd: f64,
    pub allocation: AllocationBreakdown,
}

/// Running summary over a stream of monthly records.
#[derive(Debug, Clone)]
pub struct SummaryAccumulator {
    stats: SummaryStats,
}

impl SummaryAccumulator {
    /// Start from the launch state described by `params`.
    pub fn new(params: &SimulationParameters, config: &SimulationConfig) -> Self {
        let seed = params.seed_price();
        let projector = RevenueProjector::new(config.solar.clone());
        let allocation = AllocationBreakdown::new(
            params,
            config.economy.market_maker_pct,
            config.economy.dev_pct,
        );
        let deflator_balance = if config.economy.deflator_matching {
            allocation.deflator_supply
        } else {
            0
        };
        Self {
            stats: SummaryStats {
                months: 0,
                initial_price: seed,
                final_price: seed,
                price_appreciation_pct: 0.0,
                peak_price: seed,
                final_market_cap: params.launch_fdv(),
                final_fdv: params.launch_fdv(),
                final_circulating_supply: params.total_supply,
                final_staked_supply: 0,
                final_staking_yield_pct: 0.0,
                total_burned: 0,
                total_bought_back: 0,
                total_staker_rewards: 0,
                deflator_balance,
                total_revenue_usd: 0.0,
                final_capacity_kw: 0.0,
                nameplate_capacity_mw: projector.nameplate_capacity_mw(params.funding_raised_usd),
                annual_generation_kwh: projector.annual_generation_kwh(params.funding_raised_usd),
                annual_revenue_usd: projector.annual_revenue_usd(params.funding_raised_usd),
                allocation,
            },
        }
    }

    /// Fold in one month.
    pub fn push(&mut self, revenue: &MonthlyRevenueRecord, economy: &MonthlyEconomyRecord) {
        let s = &mut self.stats;
        s.months += 1;
        s.final_price = economy.token_price;
        s.peak_price = s.peak_price.max(economy.token_price);
        s.price_appreciation_pct = if s.initial_price > 0.0 {
            (economy.token_price / s.initial_price - 1.0) * 100.0
        } else {
            0.0
        };
        s.final_market_cap = economy.market_cap;
        s.final_fdv = economy.fdv;
        s.final_circulating_supply = economy.circulating_supply;
        s.final_staked_supply = economy.staked_supply;
        s.final_staking_yield_pct = economy.staking_yield_pct;
        s.total_burned = economy.burned_cumulative;
        s.total_bought_back += economy.bought_back;
        s.total_staker_rewards += economy.staker_rewards;
        s.deflator_balance = economy.deflator_balance;
        s.total_revenue_usd += revenue.monthly_revenue_usd;
        s.final_capacity_kw = revenue.installed_capacity_kw;
    }

    pub fn finish(self) -> SummaryStats {
        self.stats
    }
}

/// Summarize a complete run.
pub fn summarize(run: &SimulationRun) -> SummaryStats {
    summarize_records(&run.params, &run.config, &run.revenue, &run.economy)
}

/// Summarize paired record sequences. Months past the shorter sequence are
/// ignored.
pub fn summarize_records(
    params: &SimulationParameters,
    config: &SimulationConfig,
    revenue: &[MonthlyRevenueRecord],
    economy: &[MonthlyEconomyRecord],
) -> SummaryStats {
    let mut acc = SummaryAccumulator::new(params, config);
    for (rev, econ) in revenue.iter().zip(economy) {
        acc.push(rev, econ);
    }
    acc.finish()
}
