//! apt-sim — Command-line front end for the APT token economy simulator.
//!
//! Projects solar revenue for a raise, runs the 48-month token economy over
//! it, and prints either the monthly table or the headline summary.

use std::path::PathBuf;

use anyhow::{Context, Result};
use apt_core::config::SimulationConfig;
use apt_core::constants::{
    DEFAULT_INVESTOR_ALLOCATION_PCT, DEFAULT_SHARE_MULTIPLIER, DEFAULT_STAKING_DURATION_MONTHS,
    DEFAULT_STAKING_PCT, DEFAULT_TARGET_YIELD_PCT, DEPLOYMENT_MONTHS, FUNDING_RAISED_USD,
    HORIZON_MONTHS, TOTAL_SUPPLY,
};
use apt_core::types::{SimulationParameters, SimulationRun, StakingMode};
use apt_economy::{simulate, summarize, SummaryStats};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(name = "apt-sim", version, about = "APT token economy simulator")]
struct Cli {
    /// Log level (trace, debug, info, warn, error). RUST_LOG takes precedence.
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Log output format.
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the simulation and print every month.
    Run(RunArgs),
    /// Run the simulation and print only the headline figures.
    Summary(SimArgs),
}

#[derive(Args, Debug)]
struct RunArgs {
    #[command(flatten)]
    sim: SimArgs,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

#[derive(Args, Debug, Clone)]
struct SimArgs {
    /// Percent of total supply sold to investors.
    #[arg(long, default_value_t = DEFAULT_INVESTOR_ALLOCATION_PCT)]
    investor_pct: f64,

    /// How holders decide what to stake.
    #[arg(long, value_enum, default_value_t = ModeArg::Manual)]
    mode: ModeArg,

    /// Percent of total supply staked in month 1 (manual mode).
    #[arg(long, default_value_t = DEFAULT_STAKING_PCT)]
    staking_pct: f64,

    /// Re-lock the manual cohort as soon as it is released.
    #[arg(long)]
    restake: bool,

    /// Annual yield below which nobody stakes (yield-based mode).
    #[arg(long, default_value_t = DEFAULT_TARGET_YIELD_PCT)]
    target_yield_pct: f64,

    /// Stake share per unit of projected yield (yield-based mode).
    #[arg(long, default_value_t = DEFAULT_SHARE_MULTIPLIER)]
    share_multiplier: f64,

    /// Months each staking cohort stays locked.
    #[arg(long, default_value_t = DEFAULT_STAKING_DURATION_MONTHS)]
    duration_months: u32,

    /// Capital raised, in USD.
    #[arg(long, default_value_t = FUNDING_RAISED_USD)]
    funding_usd: f64,

    /// Simulated months.
    #[arg(long, default_value_t = HORIZON_MONTHS)]
    horizon_months: u32,

    /// Months to bring the solar capacity fully online.
    #[arg(long, default_value_t = DEPLOYMENT_MONTHS)]
    deployment_months: u32,

    /// JSON file with solar and economy settings. APT_* variables override it.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum ModeArg {
    Manual,
    Yield,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum LogFormat {
    Text,
    Json,
}

impl SimArgs {
    fn params(&self) -> SimulationParameters {
        let staking = match self.mode {
            ModeArg::Manual => StakingMode::Manual {
                staking_pct: self.staking_pct,
                restake: self.restake,
            },
            ModeArg::Yield => StakingMode::YieldBased {
                target_yield_pct: self.target_yield_pct,
                share_multiplier: self.share_multiplier,
            },
        };
        SimulationParameters {
            total_supply: TOTAL_SUPPLY,
            funding_raised_usd: self.funding_usd,
            investor_allocation_pct: self.investor_pct,
            staking,
            staking_duration_months: self.duration_months,
            horizon_months: self.horizon_months,
            deployment_months: self.deployment_months,
        }
    }

    fn load_config(&self) -> Result<SimulationConfig> {
        let base = match &self.config {
            Some(path) => SimulationConfig::from_json_file(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => SimulationConfig::default(),
        };
        let config = base
            .apply_env()
            .context("invalid APT_* environment override")?;
        debug!(?config, "resolved configuration");
        Ok(config)
    }

    fn execute(&self) -> Result<SimulationRun> {
        let params = self.params();
        let config = self.load_config()?;
        info!(mode = params.staking.name(), "running simulation");
        simulate(&params, &config).context("simulation rejected its inputs")
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level, cli.log_format);

    match cli.command {
        Command::Run(args) => {
            let run = args.sim.execute()?;
            match args.format {
                OutputFormat::Table => {
                    print!("{}", render_table(&run));
                    println!();
                    print!("{}", render_summary(&summarize(&run)));
                }
                OutputFormat::Json => {
                    let json = serde_json::to_string_pretty(&run)
                        .context("failed to serialize run")?;
                    println!("{json}");
                }
            }
        }
        Command::Summary(args) => {
            let run = args.execute()?;
            print!("{}", render_summary(&summarize(&run)));
        }
    }
    Ok(())
}

/// Render the monthly economy records as a fixed-width table.
fn render_table(run: &SimulationRun) -> String {
    let mut out = String::new();
    out.push_str("=== APT Monthly Projection ===\n");
    out.push_str(&format!(
        "Mode: {}   Seed price: ${:.4}   Launch FDV: ${:.0}\n\n",
        run.params.staking.name(),
        run.params.seed_price(),
        run.params.launch_fdv()
    ));
    out.push_str(&format!(
        "{:>5} {:>14} {:>16} {:>16} {:>16} {:>12} {:>10} {:>16} {:>9}\n",
        "Month", "Revenue $", "Circulating", "Staked", "Burned", "Price $", "Yield %", "Market Cap $", "Deploy %"
    ));
    for (rev, econ) in run.revenue.iter().zip(&run.economy) {
        out.push_str(&format!(
            "{:>5} {:>14.2} {:>16.0} {:>16.0} {:>16.0} {:>12.6} {:>10.2} {:>16.0} {:>9.1}\n",
            econ.month_index,
            rev.monthly_revenue_usd,
            econ.circulating_tokens(),
            econ.staked_tokens(),
            econ.burned_tokens(),
            econ.token_price,
            econ.staking_yield_pct,
            econ.market_cap,
            rev.deployment_progress * 100.0
        ));
    }
    out
}

/// Render the headline figures for a run.
fn render_summary(stats: &SummaryStats) -> String {
    let mut out = String::new();
    out.push_str("=== APT Summary ===\n");
    out.push_str(&format!("Months simulated:   {}\n", stats.months));
    out.push_str(&format!("Initial price:      ${:.6}\n", stats.initial_price));
    out.push_str(&format!("Final price:        ${:.6}\n", stats.final_price));
    out.push_str(&format!("Peak price:         ${:.6}\n", stats.peak_price));
    out.push_str(&format!("Appreciation:       {:.2}%\n", stats.price_appreciation_pct));
    out.push_str(&format!("Final market cap:   ${:.0}\n", stats.final_market_cap));
    out.push_str(&format!("Final FDV:          ${:.0}\n", stats.final_fdv));
    out.push_str(&format!("Final staking APY:  {:.2}%\n", stats.final_staking_yield_pct));
    out.push_str(&format!(
        "Total burned:       {:.0} APT\n",
        apt_core::constants::to_tokens(stats.total_burned)
    ));
    out.push_str(&format!("Total revenue:      ${:.2}\n", stats.total_revenue_usd));
    out.push('\n');
    out.push_str("=== Solar Infrastructure ===\n");
    out.push_str(&format!("Nameplate capacity: {:.2} MW\n", stats.nameplate_capacity_mw));
    out.push_str(&format!("Annual generation:  {:.0} kWh\n", stats.annual_generation_kwh));
    out.push_str(&format!("Annual revenue:     ${:.2}\n", stats.annual_revenue_usd));
    out.push('\n');
    out.push_str("=== Token Allocation ===\n");
    for (label, pct, tokens) in stats.allocation.rows() {
        out.push_str(&format!("{label:<14} {pct:>6.2}%  {tokens:>16.0} APT\n"));
    }
    out
}

/// Initialize the tracing subscriber. Logs go to stderr so stdout stays
/// parseable when `--format json` is used.
fn init_logging(level_str: &str, format: LogFormat) {
    use tracing_subscriber::filter::EnvFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level_str));

    match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Text => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_level(true)
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}
