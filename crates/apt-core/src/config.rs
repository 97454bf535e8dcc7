//! Tunable model assumptions.
//!
//! [`SimulationConfig`] carries the numeric assumptions behind the revenue
//! projection and the token market. Every field has a documented default, so
//! a config file only needs to name what it overrides. Loading order:
//! defaults, then a JSON file, then `APT_*` environment variables.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::{
    BUYBACK_FRACTION, DAYS_PER_YEAR, DEV_ALLOCATION_PCT, GENERATION_HOURS_PER_DAY, KWH_PRICE_USD,
    LIQUIDITY_DEPTH_PCT, MARKET_MAKER_ALLOCATION_PCT, PRICE_ELASTICITY, SOLAR_COST_PER_MW_USD,
};
use crate::error::{ConfigError, ValidationError};
use crate::types::{finite, percentage};

/// Solar deployment and generation assumptions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolarConfig {
    /// Installed cost per MW of capacity.
    pub cost_per_mw_usd: f64,
    /// Sale price of generated electricity.
    pub price_per_kwh_usd: f64,
    /// Equivalent full-output hours per day.
    pub generation_hours_per_day: f64,
    pub days_per_year: f64,
}

impl Default for SolarConfig {
    fn default() -> Self {
        Self {
            cost_per_mw_usd: SOLAR_COST_PER_MW_USD,
            price_per_kwh_usd: KWH_PRICE_USD,
            generation_hours_per_day: GENERATION_HOURS_PER_DAY,
            days_per_year: DAYS_PER_YEAR,
        }
    }
}

impl SolarConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        positive("cost_per_mw_usd", self.cost_per_mw_usd)?;
        non_negative("price_per_kwh_usd", self.price_per_kwh_usd)?;
        let hours = non_negative("generation_hours_per_day", self.generation_hours_per_day)?;
        if hours > 24.0 {
            return Err(ValidationError::PercentageOutOfRange {
                field: "generation_hours_per_day",
                value: hours,
                min: 0.0,
                max: 24.0,
            });
        }
        positive("days_per_year", self.days_per_year)?;
        Ok(())
    }
}

/// Token market assumptions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomyConfig {
    /// Share of monthly revenue spent on buybacks, in `[0, 1]`.
    pub buyback_fraction: f64,
    /// Exponent applied to the supply ratio when repricing.
    pub price_elasticity: f64,
    /// Token depth of the buyback pool as a percent of total supply.
    /// Zero executes buybacks at spot with no slippage.
    pub liquidity_depth_pct: f64,
    pub market_maker_pct: f64,
    pub dev_pct: f64,
    /// Deflator treasury burns an extra token for every token bought back.
    pub deflator_matching: bool,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            buyback_fraction: BUYBACK_FRACTION,
            price_elasticity: PRICE_ELASTICITY,
            liquidity_depth_pct: LIQUIDITY_DEPTH_PCT,
            market_maker_pct: MARKET_MAKER_ALLOCATION_PCT,
            dev_pct: DEV_ALLOCATION_PCT,
            deflator_matching: true,
        }
    }
}

impl EconomyConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let fraction = non_negative("buyback_fraction", self.buyback_fraction)?;
        if fraction > 1.0 {
            return Err(ValidationError::PercentageOutOfRange {
                field: "buyback_fraction",
                value: fraction,
                min: 0.0,
                max: 1.0,
            });
        }
        non_negative("price_elasticity", self.price_elasticity)?;
        percentage("liquidity_depth_pct", finite("liquidity_depth_pct", self.liquidity_depth_pct)?)?;
        percentage("market_maker_pct", finite("market_maker_pct", self.market_maker_pct)?)?;
        percentage("dev_pct", finite("dev_pct", self.dev_pct)?)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub solar: SolarConfig,
    pub economy: EconomyConfig,
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.solar.validate()?;
        self.economy.validate()
    }

    /// Parse a JSON document. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        debug!(path = %path.display(), "loaded simulation config");
        Self::from_json_str(&raw)
    }

    /// Apply `APT_*` overrides from the process environment.
    pub fn apply_env(self) -> Result<Self, ConfigError> {
        self.apply_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides from an arbitrary lookup, then re-validate.
    pub fn apply_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let number = |name: &str| -> Result<Option<f64>, ConfigError> {
            match lookup(name) {
                None => Ok(None),
                Some(value) => value
                    .trim()
                    .parse::<f64>()
                    .map(Some)
                    .map_err(|_| ConfigError::InvalidEnv {
                        name: name.to_string(),
                        value,
                    }),
            }
        };

        if let Some(v) = number("APT_SOLAR_COST_PER_MW_USD")? {
            self.solar.cost_per_mw_usd = v;
        }
        if let Some(v) = number("APT_KWH_PRICE_USD")? {
            self.solar.price_per_kwh_usd = v;
        }
        if let Some(v) = number("APT_GENERATION_HOURS_PER_DAY")? {
            self.solar.generation_hours_per_day = v;
        }
        if let Some(v) = number("APT_BUYBACK_FRACTION")? {
            self.economy.buyback_fraction = v;
        }
        if let Some(v) = number("APT_PRICE_ELASTICITY")? {
            self.economy.price_elasticity = v;
        }
        if let Some(v) = number("APT_LIQUIDITY_DEPTH_PCT")? {
            self.economy.liquidity_depth_pct = v;
        }
        if let Some(value) = lookup("APT_DEFLATOR_MATCHING") {
            self.economy.deflator_matching = match value.trim() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => {
                    return Err(ConfigError::InvalidEnv {
                        name: "APT_DEFLATOR_MATCHING".to_string(),
                        value,
                    });
                }
            };
        }

        self.validate()?;
        Ok(self)
    }
}

fn positive(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    let value = finite(field, value)?;
    if value <= 0.0 {
        return Err(ValidationError::NonPositive { field, value });
    }
    Ok(value)
}

fn non_negative(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    let value = finite(field, value)?;
    if value < 0.0 {
        return Err(ValidationError::NonPositive { field, value });
    }
    Ok(value)
}
