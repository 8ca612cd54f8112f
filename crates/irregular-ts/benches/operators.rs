//! Performance benchmarks for irregular-ts operators.
//!
//! Run with: `cargo bench -p irregular-ts`
//!
//! Inputs are seeded random walks sampled at exponentially distributed
//! times, so every run sees the same irregular spacing. Window widths cover
//! roughly 50 observations on average.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use irregular_ts::merge::sorted_union;
use irregular_ts::operators::{
    ema, rolling_max, rolling_median, rolling_quantile_eq, rolling_quantile_time_weighted,
    rolling_sum, sma, sma_eq_stable, sma_forward, Weighting,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const SIZES: &[usize] = &[1_000, 10_000, 100_000];

/// Mean gap between observations.
const MEAN_GAP: f64 = 1.0;

/// Window width used by every benchmark.
const TAU: f64 = 50.0;

/// Generate a random walk observed at irregular times.
fn generate_series(size: usize, seed: u64) -> (Vec<f64>, Vec<f64>) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut values = Vec::with_capacity(size);
    let mut times = Vec::with_capacity(size);

    let mut value = 100.0;
    let mut t = 0.0;
    for _ in 0..size {
        // Exponential gaps; 1 - u keeps the log argument positive
        let u: f64 = rng.random();
        t += -MEAN_GAP * (1.0 - u).ln() + 1e-9;
        let step: f64 = rng.random();
        value += step - 0.5;

        times.push(t);
        values.push(value);
    }

    (values, times)
}

fn bench_sma(c: &mut Criterion) {
    let mut group = c.benchmark_group("sma");
    for &size in SIZES {
        let data = generate_series(size, 42);
        group.throughput(Throughput::Elements(size as u64));
        for weighting in [Weighting::Eq, Weighting::Last, Weighting::Lin] {
            group.bench_with_input(
                BenchmarkId::new(weighting.as_str(), size),
                &data,
                |b, (v, t)| b.iter(|| sma(black_box(v), black_box(t), black_box(TAU), weighting)),
            );
        }
    }
    group.finish();
}

fn bench_sma_eq_stable(c: &mut Criterion) {
    let mut group = c.benchmark_group("sma_eq_stable");
    for &size in SIZES {
        let data = generate_series(size, 42);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, (v, t)| {
            b.iter(|| sma_eq_stable(black_box(v), black_box(t), black_box(TAU), black_box(100)))
        });
    }
    group.finish();
}

fn bench_sma_forward(c: &mut Criterion) {
    let mut group = c.benchmark_group("sma_forward");
    for &size in SIZES {
        let data = generate_series(size, 42);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, (v, t)| {
            b.iter(|| sma_forward(black_box(v), black_box(t), black_box(TAU)))
        });
    }
    group.finish();
}

fn bench_ema(c: &mut Criterion) {
    let mut group = c.benchmark_group("ema");
    for &size in SIZES {
        let data = generate_series(size, 7);
        group.throughput(Throughput::Elements(size as u64));
        for weighting in [Weighting::Eq, Weighting::Last, Weighting::Lin] {
            group.bench_with_input(
                BenchmarkId::new(weighting.as_str(), size),
                &data,
                |b, (v, t)| {
                    b.iter(|| ema(black_box(v), black_box(t), black_box(TAU), v[0], weighting))
                },
            );
        }
    }
    group.finish();
}

fn bench_rolling_sum(c: &mut Criterion) {
    let mut group = c.benchmark_group("rolling_sum");
    for &size in SIZES {
        let data = generate_series(size, 42);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, (v, t)| {
            b.iter(|| rolling_sum(black_box(v), black_box(t), black_box(TAU)))
        });
    }
    group.finish();
}

fn bench_rolling_max(c: &mut Criterion) {
    let mut group = c.benchmark_group("rolling_max");
    for &size in SIZES {
        let data = generate_series(size, 42);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("random_walk", size), &data, |b, (v, t)| {
            b.iter(|| rolling_max(black_box(v), black_box(t), black_box(TAU)))
        });

        // A falling series keeps the maximum at the window's left edge, so
        // every eviction forces a rescan
        let falling: Vec<f64> = (0..size).map(|i| -(i as f64)).collect();
        group.bench_with_input(
            BenchmarkId::new("falling", size),
            &(falling, data.1.clone()),
            |b, (v, t)| b.iter(|| rolling_max(black_box(v), black_box(t), black_box(TAU))),
        );
    }
    group.finish();
}

fn bench_rolling_median(c: &mut Criterion) {
    let mut group = c.benchmark_group("rolling_median");
    for &size in SIZES {
        let data = generate_series(size, 42);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, (v, t)| {
            b.iter(|| rolling_median(black_box(v), black_box(t), black_box(TAU)))
        });
    }
    group.finish();
}

fn bench_rolling_quantile(c: &mut Criterion) {
    let mut group = c.benchmark_group("rolling_quantile");
    for &size in SIZES {
        let data = generate_series(size, 42);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("eq", size), &data, |b, (v, t)| {
            b.iter(|| rolling_quantile_eq(black_box(v), black_box(t), black_box(TAU)))
        });
        group.bench_with_input(BenchmarkId::new("time_weighted", size), &data, |b, (v, t)| {
            b.iter(|| rolling_quantile_time_weighted(black_box(v), black_box(t), black_box(TAU)))
        });
    }
    group.finish();
}

fn bench_sorted_union(c: &mut Criterion) {
    let mut group = c.benchmark_group("sorted_union");
    for &size in SIZES {
        let (_, a) = generate_series(size, 1);
        let (_, b) = generate_series(size, 2);
        group.throughput(Throughput::Elements(2 * size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &(a, b), |bench, (a, b)| {
            bench.iter(|| sorted_union(black_box(a), black_box(b), black_box(1e-6)))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_sma,
    bench_sma_eq_stable,
    bench_sma_forward,
    bench_ema,
    bench_rolling_sum,
    bench_rolling_max,
    bench_rolling_median,
    bench_rolling_quantile,
    bench_sorted_union,
);

criterion_main!(benches);
