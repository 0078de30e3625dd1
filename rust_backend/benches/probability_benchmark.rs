use chrono::NaiveDate;
use climatescope::algorithms::{compute_histogram, compute_probability, percentile_cutoff};
use climatescope::models::{Threshold, Unit, VariableKind};
use climatescope::time::generate_historical_dates;
use climatescope::units::convert_series;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

/// Deterministic pseudo-temperatures with a gap every seventh sample.
fn sample_series(len: usize) -> Vec<Option<f64>> {
    (0..len)
        .map(|i| {
            if i % 7 == 3 {
                None
            } else {
                Some(15.0 + ((i * 37) % 200) as f64 / 10.0)
            }
        })
        .collect()
}

fn bench_probability(c: &mut Criterion) {
    let mut group = c.benchmark_group("probability");
    let absolute = Threshold::absolute(25.0, Unit::Celsius);
    let percentile = Threshold::percentile(90.0, Unit::Celsius);

    for len in [20usize, 1_000, 100_000] {
        let values = sample_series(len);
        group.bench_with_input(BenchmarkId::new("absolute", len), &values, |b, input| {
            b.iter(|| compute_probability(black_box(input), black_box(&absolute)));
        });
        group.bench_with_input(BenchmarkId::new("percentile", len), &values, |b, input| {
            b.iter(|| compute_probability(black_box(input), black_box(&percentile)));
        });
    }

    group.finish();
}

fn bench_histogram(c: &mut Criterion) {
    let mut group = c.benchmark_group("histogram");

    for len in [20usize, 1_000, 100_000] {
        let values: Vec<f64> = sample_series(len).into_iter().flatten().collect();
        group.bench_with_input(BenchmarkId::new("10_buckets", len), &values, |b, input| {
            b.iter(|| compute_histogram(black_box(input), 10));
        });
    }

    let values: Vec<f64> = sample_series(10_000).into_iter().flatten().collect();
    group.bench_function("percentile_cutoff_10k", |b| {
        b.iter(|| percentile_cutoff(black_box(&values), 75.0));
    });

    group.finish();
}

fn bench_dates_and_units(c: &mut Criterion) {
    let mut group = c.benchmark_group("dates_and_units");
    let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap_or_default();

    group.bench_function("generate_20_years", |b| {
        b.iter(|| generate_historical_dates(black_box(date), 20));
    });

    let wind = sample_series(1_000);
    group.bench_function("convert_wind_mph_1k", |b| {
        b.iter(|| convert_series(VariableKind::WindSpeed, black_box(&wind), Unit::MilesPerHour));
    });

    group.finish();
}

criterion_group!(benches, bench_probability, bench_histogram, bench_dates_and_units);
criterion_main!(benches);
