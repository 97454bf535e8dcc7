//! Revenue projector.
//!
//! Month `m` of a `d`-month deployment has `m / d` of nameplate capacity
//! installed; every month after `d` runs at nameplate. Energy and revenue
//! follow directly from installed capacity, so the whole series is a pure
//! function of the funding amount and the [`SolarConfig`].

use apt_core::config::SolarConfig;
use apt_core::constants::{DEPLOYMENT_MONTHS, HORIZON_MONTHS, KW_PER_MW, MONTHS_PER_YEAR};
use apt_core::error::ValidationError;
use apt_core::types::{validate_window, MonthlyRevenueRecord};
use tracing::debug;

/// Projects solar capacity and revenue under a fixed set of assumptions.
#[derive(Debug, Clone, Default)]
pub struct RevenueProjector {
    config: SolarConfig,
}

impl RevenueProjector {
    pub fn new(config: SolarConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SolarConfig {
        &self.config
    }

    /// Capacity the raise pays for, in MW.
    pub fn nameplate_capacity_mw(&self, funding_raised_usd: f64) -> f64 {
        funding_raised_usd / self.config.cost_per_mw_usd
    }

    /// Yearly output at full deployment, in kWh.
    pub fn annual_generation_kwh(&self, funding_raised_usd: f64) -> f64 {
        self.nameplate_capacity_mw(funding_raised_usd)
            * KW_PER_MW
            * self.config.generation_hours_per_day
            * self.config.days_per_year
    }

    /// Yearly revenue at full deployment, in USD.
    pub fn annual_revenue_usd(&self, funding_raised_usd: f64) -> f64 {
        self.annual_generation_kwh(funding_raised_usd) * self.config.price_per_kwh_usd
    }

    /// Monthly records for months `1..=horizon_months`.
    ///
    /// Fails without producing records on non-positive funding, a zero
    /// deployment window or horizon, or a horizon shorter than deployment.
    pub fn project(
        &self,
        funding_raised_usd: f64,
        deployment_months: u32,
        horizon_months: u32,
    ) -> Result<Vec<MonthlyRevenueRecord>, ValidationError> {
        if !funding_raised_usd.is_finite() || funding_raised_usd <= 0.0 {
            return Err(ValidationError::NonPositiveFunding(funding_raised_usd));
        }
        validate_window(deployment_months, horizon_months)?;
        self.config.validate()?;

        let nameplate_kw = self.nameplate_capacity_mw(funding_raised_usd) * KW_PER_MW;
        let hours_per_month =
            self.config.generation_hours_per_day * self.config.days_per_year / f64::from(MONTHS_PER_YEAR);

        let mut cumulative = 0.0;
        let records: Vec<MonthlyRevenueRecord> = (1..=horizon_months)
            .map(|month| {
                let progress = deployment_progress(month, deployment_months);
                let capacity_kw = nameplate_kw * progress;
                let energy_kwh = capacity_kw * hours_per_month;
                let revenue = energy_kwh * self.config.price_per_kwh_usd;
                cumulative += revenue;
                MonthlyRevenueRecord {
                    month_index: month,
                    deployment_progress: progress,
                    installed_capacity_kw: capacity_kw,
                    energy_generated_kwh: energy_kwh,
                    monthly_revenue_usd: revenue,
                    cumulative_revenue_usd: cumulative,
                }
            })
            .collect();

        debug!(
            months = horizon_months,
            nameplate_kw,
            total_revenue_usd = cumulative,
            "projected solar revenue"
        );
        Ok(records)
    }
}

/// Fraction of nameplate installed by the end of `month`.
fn deployment_progress(month: u32, deployment_months: u32) -> f64 {
    if month >= deployment_months {
        1.0
    } else {
        f64::from(month) / f64::from(deployment_months)
    }
}

/// Project revenue with the default solar assumptions.
///
/// Callers normally pass [`DEPLOYMENT_MONTHS`] and [`HORIZON_MONTHS`].
pub fn project_revenue(
    funding_raised_usd: f64,
    deployment_months: u32,
    horizon_months: u32,
) -> Result<Vec<MonthlyRevenueRecord>, ValidationError> {
    RevenueProjector::default().project(funding_raised_usd, deployment_months, horizon_months)
}

/// [`project_revenue`] over the standard 10-month ramp and 48-month horizon.
pub fn project_default_revenue(
    funding_raised_usd: f64,
) -> Result<Vec<MonthlyRevenueRecord>, ValidationError> {
    project_revenue(funding_raised_usd, DEPLOYMENT_MONTHS, HORIZON_MONTHS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use apt_core::constants::FUNDING_RAISED_USD;
    use proptest::prelude::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-6 * b.abs().max(1.0)
    }

    fn default_run() -> Vec<MonthlyRevenueRecord> {
        project_default_revenue(FUNDING_RAISED_USD).unwrap()
    }

    #[test]
    fn ten_million_buys_about_fourteen_mw() {
        let p = RevenueProjector::default();
        assert!(close(p.nameplate_capacity_mw(FUNDING_RAISED_USD), 14.285_714_285_714_286));
    }

    #[test]
    fn annual_figures_at_full_deployment() {
        let p = RevenueProjector::default();
        // 14,285.714 kW * 4 h * 365 d
        assert!(close(p.annual_generation_kwh(FUNDING_RAISED_USD), 20_857_142.857_142_86));
        assert!(close(p.annual_revenue_usd(FUNDING_RAISED_USD), 3_545_714.285_714_286));
    }

    #[test]
    fn produces_exactly_horizon_records() {
        let records = default_run();
        assert_eq!(records.len(), 48);
        for (i, r) in records.iter().enumerate() {
            assert_eq!(r.month_index, i as u32 + 1);
        }
    }

    #[test]
    fn capacity_ramps_linearly_then_holds() {
        let records = default_run();
        let full = records[9].installed_capacity_kw;
        assert!(close(records[0].installed_capacity_kw, full / 10.0));
        assert!(close(records[4].installed_capacity_kw, full / 2.0));
        assert_eq!(records[9].deployment_progress, 1.0);
        for r in &records[10..] {
            assert_eq!(r.installed_capacity_kw, full);
            assert_eq!(r.monthly_revenue_usd, records[9].monthly_revenue_usd);
        }
    }

    #[test]
    fn monthly_revenue_at_full_capacity() {
        let records = default_run();
        assert!(close(records[20].monthly_revenue_usd, 3_545_714.285_714_286 / 12.0));
    }

    #[test]
    fn cumulative_is_running_sum() {
        let records = default_run();
        let mut sum = 0.0;
        for r in &records {
            sum += r.monthly_revenue_usd;
            assert!(close(r.cumulative_revenue_usd, sum));
        }
    }

    #[test]
    fn deployment_equal_to_horizon_is_valid() {
        let records = project_revenue(FUNDING_RAISED_USD, 12, 12).unwrap();
        assert_eq!(records.len(), 12);
        assert_eq!(records[11].deployment_progress, 1.0);
    }

    #[test]
    fn horizon_shorter_than_deployment_rejected() {
        assert_eq!(
            project_revenue(FUNDING_RAISED_USD, 10, 9),
            Err(ValidationError::HorizonShorterThanDeployment {
                horizon: 9,
                deployment: 10
            })
        );
    }

    #[test]
    fn zero_deployment_rejected() {
        assert!(matches!(
            project_revenue(FUNDING_RAISED_USD, 0, 48),
            Err(ValidationError::NonPositiveDuration { .. })
        ));
    }

    #[test]
    fn non_positive_funding_rejected() {
        assert_eq!(
            project_revenue(0.0, 10, 48),
            Err(ValidationError::NonPositiveFunding(0.0))
        );
        assert!(project_revenue(-5.0, 10, 48).is_err());
        assert!(project_revenue(f64::NAN, 10, 48).is_err());
    }

    #[test]
    fn custom_price_scales_revenue() {
        let base = default_run();
        let projector = RevenueProjector::new(SolarConfig {
            price_per_kwh_usd: 0.34,
            ..SolarConfig::default()
        });
        let doubled = projector.project(FUNDING_RAISED_USD, 10, 48).unwrap();
        assert!(close(doubled[30].monthly_revenue_usd, 2.0 * base[30].monthly_revenue_usd));
        assert_eq!(doubled[30].energy_generated_kwh, base[30].energy_generated_kwh);
    }

    proptest! {
        #[test]
        fn revenue_non_decreasing_and_non_negative(
            funding in 1.0f64..1e9,
            deployment in 1u32..24,
            extra in 0u32..48,
        ) {
            let records = project_revenue(funding, deployment, deployment + extra).unwrap();
            prop_assert_eq!(records.len() as u32, deployment + extra);
            let mut prev = 0.0;
            for r in &records {
                prop_assert!(r.monthly_revenue_usd >= 0.0);
                prop_assert!(r.monthly_revenue_usd >= prev);
                prev = r.monthly_revenue_usd;
            }
        }
    }
}
