//! # apt-economy — Token economy simulation.
//!
//! Threads circulating supply, staking cohorts, burns, and price through a
//! first-order monthly recurrence driven by solar revenue:
//! - **Staking**: manual single-cohort locks or yield-driven cohorts, each
//!   released after the staking duration.
//! - **Buyback & burn**: revenue buys tokens through a constant-product
//!   pool; stakers receive a stake-weighted cut and the rest is burned,
//!   with the deflator treasury matching each buyback.
//! - **Deflator pricing**: price scales with the inverse of circulating
//!   supply, raised to a configurable elasticity.
//!
//! Token accounting is integer-only, so circulating, staked, and burned
//! supply always sum exactly to total supply.

pub mod engine;
pub mod market;
pub mod staking;
pub mod summary;

pub use engine::{simulate, simulate_economy, EconomySimulator};
pub use staking::{ManualStaking, StakingCohort, StakingLedger, YieldStaking};
pub use summary::{summarize, summarize_records, SummaryAccumulator, SummaryStats};
