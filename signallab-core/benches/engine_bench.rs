//! Criterion benchmarks for the engine loop.
//!
//! Benchmarks:
//! 1. Full backtest over N steps at the default threshold
//! 2. Classifier throughput

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use signallab_core::domain::PricePoint;
use signallab_core::engine::{run_backtest, EngineConfig};
use signallab_core::signals::classify;

// ── Helpers ──────────────────────────────────────────────────────────

fn make_inputs(n: usize) -> (Vec<PricePoint>, Vec<f64>) {
    let base_date = chrono::NaiveDate::from_ymd_opt(2020, 1, 2).unwrap();
    let prices = (0..n)
        .map(|i| {
            let close = 100.0 + (i as f64 * 0.1).sin() * 10.0;
            PricePoint::new(base_date + chrono::Duration::days(i as i64), close)
        })
        .collect();
    let confidences = (0..n).map(|i| 0.5 + (i as f64 * 0.37).cos() * 0.4).collect();
    (prices, confidences)
}

fn bench_backtest(c: &mut Criterion) {
    let mut group = c.benchmark_group("run_backtest");
    for n in [252usize, 2_520, 25_200] {
        let (prices, conf) = make_inputs(n);
        let config = EngineConfig::default();
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| run_backtest(black_box(&prices), black_box(&conf), &config))
        });
    }
    group.finish();
}

fn bench_classify(c: &mut Criterion) {
    let (_, conf) = make_inputs(10_000);
    c.bench_function("classify_10k", |b| {
        b.iter(|| {
            conf.iter()
                .filter(|&&x| classify(black_box(x), 0.6).is_trade())
                .count()
        })
    });
}

criterion_group!(benches, bench_backtest, bench_classify);
criterion_main!(benches);
