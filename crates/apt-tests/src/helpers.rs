//! Shared test helpers for scenario and property tests.

use apt_core::config::{EconomyConfig, SimulationConfig};
use apt_core::types::{
    MonthlyEconomyRecord, MonthlyRevenueRecord, SimulationParameters, StakingMode,
};
use apt_economy::{simulate, simulate_economy};

/// Manual-mode parameters with the fixed supply and raise.
pub fn manual_params(investor_pct: f64, staking_pct: f64, duration: u32) -> SimulationParameters {
    SimulationParameters {
        investor_allocation_pct: investor_pct,
        staking: StakingMode::manual(staking_pct),
        staking_duration_months: duration,
        ..SimulationParameters::default()
    }
}

/// Yield-based parameters with the default share multiplier.
pub fn yield_params(investor_pct: f64, target_yield_pct: f64, duration: u32) -> SimulationParameters {
    SimulationParameters {
        investor_allocation_pct: investor_pct,
        staking: StakingMode::yield_based(target_yield_pct),
        staking_duration_months: duration,
        ..SimulationParameters::default()
    }
}

/// A contiguous revenue series with the same USD amount every month.
pub fn flat_revenue(months: u32, monthly_usd: f64) -> Vec<MonthlyRevenueRecord> {
    (1..=months)
        .map(|m| MonthlyRevenueRecord {
            month_index: m,
            deployment_progress: 1.0,
            installed_capacity_kw: 0.0,
            energy_generated_kwh: 0.0,
            monthly_revenue_usd: monthly_usd,
            cumulative_revenue_usd: monthly_usd * f64::from(m),
        })
        .collect()
}

/// Economy records for `params` with default revenue and config.
pub fn run_default(params: &SimulationParameters) -> Vec<MonthlyEconomyRecord> {
    simulate(params, &SimulationConfig::default())
        .expect("valid parameters")
        .economy
}

/// Economy records over a caller-supplied revenue series.
pub fn run_with_revenue(
    params: &SimulationParameters,
    revenue: &[MonthlyRevenueRecord],
) -> Vec<MonthlyEconomyRecord> {
    simulate_economy(params, revenue, &EconomyConfig::default()).expect("valid parameters")
}
