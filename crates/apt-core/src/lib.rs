//! # apt-core
//! Foundation types, constants, and validation for the APT token economy
//! simulator.

pub mod allocation;
pub mod config;
pub mod constants;
pub mod error;
pub mod traits;
pub mod types;

pub use allocation::AllocationBreakdown;
pub use config::{EconomyConfig, SimulationConfig, SolarConfig};
pub use error::{AptError, ConfigError, ValidationError};
pub use traits::{StakingContext, StakingPolicy};
pub use types::{
    MonthlyEconomyRecord, MonthlyRevenueRecord, SimulationParameters, SimulationRun, StakingMode,
};
