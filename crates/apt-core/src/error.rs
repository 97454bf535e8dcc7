//! Error types for the APT simulator.
use thiserror::Error;

/// Rejected input, raised before any recurrence step runs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{field} out of range: {value} (expected {min}..={max})")] PercentageOutOfRange { field: &'static str, value: f64, min: f64, max: f64 },
    #[error("{field} must be a positive number of months")] NonPositiveDuration { field: &'static str },
    #[error("horizon of {horizon} months is shorter than deployment window of {deployment} months")] HorizonShorterThanDeployment { horizon: u32, deployment: u32 },
    #[error("funding must be positive, got {0}")] NonPositiveFunding(f64),
    #[error("{field} must be positive, got {value}")] NonPositive { field: &'static str, value: f64 },
    #[error("{field} is not a finite number")] NonFinite { field: &'static str },
    #[error("total_supply is fixed at {expected} units, got {got}")] FixedSupply { expected: u64, got: u64 },
    #[error("revenue sequence broken: expected month {expected}, got {got}")] RevenueSequence { expected: u32, got: u32 },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("reading {path}: {source}")] Io { path: String, source: std::io::Error },
    #[error("parsing config: {0}")] Parse(#[from] serde_json::Error),
    #[error("environment variable {name}={value} is not a number")] InvalidEnv { name: String, value: String },
    #[error(transparent)] Invalid(#[from] ValidationError),
}

#[derive(Error, Debug)]
pub enum AptError {
    #[error(transparent)] Validation(#[from] ValidationError),
    #[error(transparent)] Config(#[from] ConfigError),
}
