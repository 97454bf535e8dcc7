//! Criterion benchmarks for apt-economy.
//!
//! Covers: a full 48-month run per staking mode, and buyback execution.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use apt_core::config::{EconomyConfig, SimulationConfig};
use apt_core::constants::{FUNDING_RAISED_USD, TOTAL_SUPPLY};
use apt_core::types::{SimulationParameters, StakingMode};
use apt_economy::market::BuybackPool;
use apt_economy::{simulate, simulate_economy};
use apt_solar::project_default_revenue;

fn bench_manual_run(c: &mut Criterion) {
    let params = SimulationParameters::default();
    let config = SimulationConfig::default();

    c.bench_function("simulate_manual_48_months", |b| {
        b.iter(|| simulate(black_box(&params), black_box(&config)))
    });
}

fn bench_yield_run(c: &mut Criterion) {
    let params = SimulationParameters {
        staking: StakingMode::yield_based(8.0),
        ..SimulationParameters::default()
    };
    let revenue = project_default_revenue(FUNDING_RAISED_USD).unwrap();
    let config = EconomyConfig::default();

    c.bench_function("simulate_economy_yield_48_months", |b| {
        b.iter(|| simulate_economy(black_box(&params), black_box(&revenue), black_box(&config)))
    });
}

fn bench_buyback(c: &mut Criterion) {
    let pool = BuybackPool::new(TOTAL_SUPPLY / 10);

    c.bench_function("buyback_constant_product", |b| {
        b.iter(|| pool.buy(black_box(295_476.19), black_box(0.25)))
    });
}

criterion_group!(benches, bench_manual_run, bench_yield_run, bench_buyback);
criterion_main!(benches);
