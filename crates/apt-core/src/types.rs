//! Simulation inputs and per-month output records.
//!
//! Token amounts are `u64` base units (see [`UNIT`](crate::constants::UNIT))
//! so that supply accounting is exact. Prices and USD amounts are `f64`.

use serde::{Deserialize, Serialize};

use crate::constants::{
    to_tokens, DEFAULT_INVESTOR_ALLOCATION_PCT, DEFAULT_SHARE_MULTIPLIER,
    DEFAULT_STAKING_DURATION_MONTHS, DEFAULT_STAKING_PCT,
    DEPLOYMENT_MONTHS, FUNDING_RAISED_USD, HORIZON_MONTHS, TOTAL_SUPPLY,
};
use crate::config::SimulationConfig;
use crate::error::ValidationError;

/// How holders decide what to stake. Resolved once per run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum StakingMode {
    /// A single cohort of `staking_pct` of total supply locked in month 1.
    Manual {
        staking_pct: f64,
        /// Re-lock the cohort as soon as it is released.
        #[serde(default)]
        restake: bool,
    },
    /// Stake share follows the projected buyback yield.
    YieldBased {
        target_yield_pct: f64,
        share_multiplier: f64,
    },
}

impl StakingMode {
    pub fn manual(staking_pct: f64) -> Self {
        Self::Manual {
            staking_pct,
            restake: false,
        }
    }

    pub fn yield_based(target_yield_pct: f64) -> Self {
        Self::YieldBased {
            target_yield_pct,
            share_multiplier: DEFAULT_SHARE_MULTIPLIER,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Manual { .. } => "manual",
            Self::YieldBased { .. } => "yield-based",
        }
    }
}

impl Default for StakingMode {
    fn default() -> Self {
        Self::manual(DEFAULT_STAKING_PCT)
    }
}

/// Immutable input record for one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationParameters {
    /// Total token supply in units.
    pub total_supply: u64,
    pub funding_raised_usd: f64,
    pub investor_allocation_pct: f64,
    pub staking: StakingMode,
    pub staking_duration_months: u32,
    pub horizon_months: u32,
    pub deployment_months: u32,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            total_supply: TOTAL_SUPPLY,
            funding_raised_usd: FUNDING_RAISED_USD,
            investor_allocation_pct: DEFAULT_INVESTOR_ALLOCATION_PCT,
            staking: StakingMode::default(),
            staking_duration_months: DEFAULT_STAKING_DURATION_MONTHS,
            horizon_months: HORIZON_MONTHS,
            deployment_months: DEPLOYMENT_MONTHS,
        }
    }
}

impl SimulationParameters {
    /// Check every input range. Called once before a run starts.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.total_supply != TOTAL_SUPPLY {
            return Err(ValidationError::FixedSupply {
                expected: TOTAL_SUPPLY,
                got: self.total_supply,
            });
        }
        validate_funding(self.funding_raised_usd)?;

        let investor = finite("investor_allocation_pct", self.investor_allocation_pct)?;
        // Zero investors would leave no seed price.
        if investor <= 0.0 {
            return Err(ValidationError::NonPositive {
                field: "investor_allocation_pct",
                value: investor,
            });
        }
        percentage("investor_allocation_pct", investor)?;

        if self.staking_duration_months == 0 {
            return Err(ValidationError::NonPositiveDuration {
                field: "staking_duration_months",
            });
        }

        match self.staking {
            StakingMode::Manual { staking_pct, .. } => {
                percentage("staking_pct", finite("staking_pct", staking_pct)?)?;
            }
            StakingMode::YieldBased {
                target_yield_pct,
                share_multiplier,
            } => {
                let target = finite("target_yield_pct", target_yield_pct)?;
                if target <= 0.0 {
                    return Err(ValidationError::NonPositive {
                        field: "target_yield_pct",
                        value: target,
                    });
                }
                percentage("target_yield_pct", target)?;
                let multiplier = finite("share_multiplier", share_multiplier)?;
                if multiplier <= 0.0 {
                    return Err(ValidationError::NonPositive {
                        field: "share_multiplier",
                        value: multiplier,
                    });
                }
            }
        }

        validate_window(self.deployment_months, self.horizon_months)
    }

    /// Tokens sold to investors, in units.
    pub fn investor_supply(&self) -> u64 {
        crate::constants::pct_of(self.total_supply, self.investor_allocation_pct)
    }

    /// Launch price: the raise divided by the tokens investors received.
    ///
    /// Equivalent to FDV-at-launch / total supply. Only meaningful on
    /// validated parameters.
    pub fn seed_price(&self) -> f64 {
        let investor_tokens = to_tokens(self.investor_supply());
        if investor_tokens > 0.0 {
            self.funding_raised_usd / investor_tokens
        } else {
            0.0
        }
    }

    /// Fully diluted valuation at the seed price.
    pub fn launch_fdv(&self) -> f64 {
        self.seed_price() * to_tokens(self.total_supply)
    }
}

pub(crate) fn validate_funding(funding: f64) -> Result<(), ValidationError> {
    if !funding.is_finite() || funding <= 0.0 {
        return Err(ValidationError::NonPositiveFunding(funding));
    }
    Ok(())
}

/// Deployment must fit inside the horizon and neither may be zero.
pub fn validate_window(deployment_months: u32, horizon_months: u32) -> Result<(), ValidationError> {
    if deployment_months == 0 {
        return Err(ValidationError::NonPositiveDuration {
            field: "deployment_months",
        });
    }
    if horizon_months == 0 {
        return Err(ValidationError::NonPositiveDuration {
            field: "horizon_months",
        });
    }
    if horizon_months < deployment_months {
        return Err(ValidationError::HorizonShorterThanDeployment {
            horizon: horizon_months,
            deployment: deployment_months,
        });
    }
    Ok(())
}

pub(crate) fn finite(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValidationError::NonFinite { field })
    }
}

pub(crate) fn percentage(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if (0.0..=100.0).contains(&value) {
        Ok(value)
    } else {
        Err(ValidationError::PercentageOutOfRange {
            field,
            value,
            min: 0.0,
            max: 100.0,
        })
    }
}

/// One month of solar deployment and electricity revenue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRevenueRecord {
    /// 1-based month.
    pub month_index: u32,
    /// Fraction of nameplate capacity online, in `[0, 1]`.
    pub deployment_progress: f64,
    pub installed_capacity_kw: f64,
    pub energy_generated_kwh: f64,
    pub monthly_revenue_usd: f64,
    pub cumulative_revenue_usd: f64,
}

/// One month of token economy state, taken after all updates for the month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyEconomyRecord {
    /// 1-based month.
    pub month_index: u32,
    pub circulating_supply: u64,
    pub staked_supply: u64,
    pub burned_cumulative: u64,
    pub burned_this_month: u64,
    /// Tokens purchased with revenue this month.
    pub bought_back: u64,
    /// Bought-back tokens paid out to stakers (liquid).
    pub staker_rewards: u64,
    /// Deflator treasury budget left for matching burns.
    pub deflator_balance: u64,
    pub token_price: f64,
    pub market_cap: f64,
    pub fdv: f64,
    /// Annualized staker reward rate, in percent.
    pub staking_yield_pct: f64,
    /// Staked supply as a share of total supply, in percent.
    pub stake_share_pct: f64,
}

impl MonthlyEconomyRecord {
    pub fn circulating_tokens(&self) -> f64 {
        to_tokens(self.circulating_supply)
    }

    pub fn staked_tokens(&self) -> f64 {
        to_tokens(self.staked_supply)
    }

    pub fn burned_tokens(&self) -> f64 {
        to_tokens(self.burned_cumulative)
    }

    /// Sum of every supply bucket. Equals total supply on a valid run.
    pub fn accounted_supply(&self) -> u64 {
        self.circulating_supply + self.staked_supply + self.burned_cumulative
    }
}

/// Everything a single run produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRun {
    pub params: SimulationParameters,
    pub config: SimulationConfig,
    pub revenue: Vec<MonthlyRevenueRecord>,
    pub economy: Vec<MonthlyEconomyRecord>,
}

impl SimulationRun {
    pub fn final_month(&self) -> Option<&MonthlyEconomyRecord> {
        self.economy.last()
    }
}
