//! Buyback execution and supply-driven repricing.
//!
//! Buybacks swap USD for tokens against a constant-product pool
//! (`tokens × usd = k`) whose token side holds `depth` tokens at the
//! current price, so large buybacks pay slippage. A zero-depth pool fills
//! at spot. After each month the price moves with the change in
//! circulating supply: `p' = p × (S / S')^elasticity`.

use apt_core::constants::{to_tokens, to_units};

/// Constant-product pool re-centered on the current price each month.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuybackPool {
    /// Token-side reserve, in units.
    depth: u64,
}

impl BuybackPool {
    pub fn new(depth: u64) -> Self {
        Self { depth }
    }

    pub fn depth(&self) -> u64 {
        self.depth
    }

    /// Tokens received for spending `usd` at `price`.
    ///
    /// Zero when there is nothing to spend or no price. Never more than the
    /// spot amount `usd / price`, and strictly less than the pool depth when
    /// the pool has depth.
    pub fn buy(&self, usd: f64, price: f64) -> u64 {
        if usd.is_nan() || usd <= 0.0 || !price.is_finite() || price <= 0.0 {
            return 0;
        }
        let spot = to_units(usd / price);
        if self.depth == 0 {
            return spot;
        }
        let pool_tokens = to_tokens(self.depth);
        let pool_usd = pool_tokens * price;
        // k = pool_tokens * pool_usd; tokens_out = pool_tokens - k / (pool_usd + usd)
        let out = pool_tokens * usd / (pool_usd + usd);
        to_units(out).min(spot).min(self.depth - 1)
    }
}

/// Stakers' cut of bought-back tokens: `bought × staked / total_supply`.
pub fn staker_share(bought: u64, staked: u64, total_supply: u64) -> u64 {
    if total_supply == 0 {
        return 0;
    }
    let share = bought as u128 * staked.min(total_supply) as u128 / total_supply as u128;
    share as u64
}

/// Annualized reward rate on staked tokens, in percent. Zero when nothing
/// is staked.
pub fn staking_yield_pct(rewards: u64, staked: u64) -> f64 {
    if staked == 0 {
        return 0.0;
    }
    rewards as f64 / staked as f64 * f64::from(apt_core::constants::MONTHS_PER_YEAR) * 100.0
}

/// Reprice after circulating supply moves from `before` to `after`.
///
/// Carries the old price forward when either side is zero or the result
/// would not be a positive finite number.
pub fn reprice(price: f64, before: u64, after: u64, elasticity: f64) -> f64 {
    if before == 0 || after == 0 || before == after {
        return price;
    }
    let ratio = before as f64 / after as f64;
    let next = price * ratio.powf(elasticity);
    if next.is_finite() && next > 0.0 {
        next
    } else {
        price
    }
}
