//! Model constants. All token amounts in units (1 APT = 10^8 units).

pub const UNIT: u64 = 100_000_000;

/// Fixed total token supply: 100 million APT.
pub const TOTAL_SUPPLY_TOKENS: u64 = 100_000_000;
pub const TOTAL_SUPPLY: u64 = TOTAL_SUPPLY_TOKENS * UNIT;

/// Capital raised from investors at launch, in USD.
pub const FUNDING_RAISED_USD: f64 = 10_000_000.0;

/// Simulated horizon: 4 years of monthly steps.
pub const HORIZON_MONTHS: u32 = 48;
/// Months taken to bring the full solar capacity online.
pub const DEPLOYMENT_MONTHS: u32 = 10;
pub const MONTHS_PER_YEAR: u32 = 12;

pub const DEFAULT_INVESTOR_ALLOCATION_PCT: f64 = 40.0;
pub const DEFAULT_STAKING_PCT: f64 = 50.0;
pub const DEFAULT_STAKING_DURATION_MONTHS: u32 = 24;

/// Staking yield below which yield-based stakers stay liquid (8% APY).
pub const DEFAULT_TARGET_YIELD_PCT: f64 = 8.0;
/// Stake share per unit of annual yield once the target is cleared.
pub const DEFAULT_SHARE_MULTIPLIER: f64 = 2.0;

pub const SOLAR_COST_PER_MW_USD: f64 = 700_000.0;
pub const KWH_PRICE_USD: f64 = 0.17;
pub const GENERATION_HOURS_PER_DAY: f64 = 4.0;
pub const DAYS_PER_YEAR: f64 = 365.0;
pub const KW_PER_MW: f64 = 1_000.0;

pub const MARKET_MAKER_ALLOCATION_PCT: f64 = 10.0;
pub const DEV_ALLOCATION_PCT: f64 = 10.0;

pub const BUYBACK_FRACTION: f64 = 1.0;
pub const PRICE_ELASTICITY: f64 = 1.0;
/// Depth of the buyback pool's token side as a share of total supply.
pub const LIQUIDITY_DEPTH_PCT: f64 = 10.0;

/// Convert base units to whole tokens for display and valuation.
pub fn to_tokens(units: u64) -> f64 {
    units as f64 / UNIT as f64
}

/// Convert a (non-negative) token amount to base units, truncating dust.
///
/// Negative and non-finite inputs map to zero.
pub fn to_units(tokens: f64) -> u64 {
    if !tokens.is_finite() || tokens <= 0.0 {
        return 0;
    }
    let units = tokens * UNIT as f64;
    if units >= u64::MAX as f64 {
        u64::MAX
    } else {
        units as u64
    }
}

/// `amount * pct / 100` in units, truncating. Percentages are resolved to
/// parts-per-million, so anything finer than 0.0001% is rounded away.
pub fn pct_of(amount: u64, pct: f64) -> u64 {
    if !pct.is_finite() || pct <= 0.0 {
        return 0;
    }
    if pct >= 100.0 {
        return amount;
    }
    let ppm = (pct * 10_000.0).round() as u128;
    (amount as u128 * ppm / PPM) as u64
}

const PPM: u128 = 1_000_000;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_supply_fits_in_u64() {
        assert_eq!(TOTAL_SUPPLY, 10_000_000_000_000_000);
        assert!(TOTAL_SUPPLY < u64::MAX / 1_000);
    }

    #[test]
    fn unit_round_trip_whole_tokens() {
        assert_eq!(to_units(30_000_000.0), 30_000_000 * UNIT);
        assert_eq!(to_tokens(30_000_000 * UNIT), 30_000_000.0);
    }

    #[test]
    fn to_units_rejects_garbage() {
        assert_eq!(to_units(-1.0), 0);
        assert_eq!(to_units(f64::NAN), 0);
        assert_eq!(to_units(f64::INFINITY), 0);
        assert_eq!(to_units(1e300), u64::MAX);
    }

    #[test]
    fn pct_of_exact_for_whole_percent() {
        assert_eq!(pct_of(TOTAL_SUPPLY, 30.0), 30_000_000 * UNIT);
        assert_eq!(pct_of(TOTAL_SUPPLY, 100.0), TOTAL_SUPPLY);
        assert_eq!(pct_of(TOTAL_SUPPLY, 0.0), 0);
        assert_eq!(pct_of(TOTAL_SUPPLY, 150.0), TOTAL_SUPPLY);
    }
}
