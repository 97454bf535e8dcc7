//! Launch allocation of the total supply.
//!
//! Investors take their configured share first. The market maker and the
//! dev team are carved out of what remains, each up to its configured
//! percentage, and the deflator treasury receives the rest:
//!
//! | Bucket       | Default share              |
//! |--------------|----------------------------|
//! | Investors    | `investor_allocation_pct`  |
//! | Market maker | 10%                        |
//! | Dev team     | 10%                        |
//! | Deflator     | remainder (80% − investors)|

use serde::{Deserialize, Serialize};

use crate::constants::{pct_of, to_tokens};
use crate::types::SimulationParameters;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationBreakdown {
    pub investor_pct: f64,
    pub market_maker_pct: f64,
    pub dev_pct: f64,
    pub deflator_pct: f64,
    pub investor_supply: u64,
    pub market_maker_supply: u64,
    pub dev_supply: u64,
    pub deflator_supply: u64,
}

impl AllocationBreakdown {
    /// Split `params.total_supply` using the given reserve percentages.
    pub fn new(params: &SimulationParameters, market_maker_pct: f64, dev_pct: f64) -> Self {
        let investor_pct = params.investor_allocation_pct.clamp(0.0, 100.0);
        let mut remaining = 100.0 - investor_pct;
        let market_maker_pct = market_maker_pct.clamp(0.0, remaining);
        remaining -= market_maker_pct;
        let dev_pct = dev_pct.clamp(0.0, remaining);
        let deflator_pct = remaining - dev_pct;

        let total = params.total_supply;
        let investor_supply = pct_of(total, investor_pct);
        let market_maker_supply = pct_of(total, market_maker_pct).min(total - investor_supply);
        let dev_supply =
            pct_of(total, dev_pct).min(total - investor_supply - market_maker_supply);
        // Rounding dust lands in the deflator bucket so the buckets sum exactly.
        let deflator_supply = total - investor_supply - market_maker_supply - dev_supply;

        Self {
            investor_pct,
            market_maker_pct,
            dev_pct,
            deflator_pct,
            investor_supply,
            market_maker_supply,
            dev_supply,
            deflator_supply,
        }
    }

    pub fn total(&self) -> u64 {
        self.investor_supply + self.market_maker_supply + self.dev_supply + self.deflator_supply
    }

    /// `(label, percent, tokens)` rows for display.
    pub fn rows(&self) -> [(&'static str, f64, f64); 4] {
        [
            ("Investors", self.investor_pct, to_tokens(self.investor_supply)),
            ("Deflator", self.deflator_pct, to_tokens(self.deflator_supply)),
            ("Market Maker", self.market_maker_pct, to_tokens(self.market_maker_supply)),
            ("Dev Team", self.dev_pct, to_tokens(self.dev_supply)),
        ]
    }
}
