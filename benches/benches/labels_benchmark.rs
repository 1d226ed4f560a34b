//! Throughput of the label, resample and pattern passes.
//!
//! Run with: `cargo bench --package labelbar-bench`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use labelbar_bench::{SIZES, random_walk};
use labelbar_lib::prelude::*;
use labelbar_lib::rolling_slopes;
use std::hint::black_box;

fn labels_benchmark(c: &mut Criterion) {
    let config = LabelConfig::default();
    let engine = LabelEngine::new(config).unwrap();

    let mut group = c.benchmark_group("labels");
    for &(name, len) in SIZES {
        let series = random_walk(len);
        group.throughput(Throughput::Elements(len as u64));

        group.bench_with_input(BenchmarkId::new("compute", name), &series, |b, series| {
            b.iter(|| engine.compute(black_box(series)));
        });

        let closes = series.closes();
        group.bench_with_input(BenchmarkId::new("rolling_slopes", name), &closes, |b, closes| {
            b.iter(|| rolling_slopes(black_box(closes), config.regime_window));
        });
    }
    group.finish();
}

fn resample_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("resample");
    for &(name, len) in SIZES {
        let series = random_walk(len);
        group.throughput(Throughput::Elements(len as u64));

        group.bench_with_input(BenchmarkId::new("15m", name), &series, |b, series| {
            b.iter(|| resample(black_box(series), Interval::MINUTE_15));
        });

        let bars = resample(&series, Interval::MINUTE_15);
        let detector = PatternDetector::new(PatternConfig::default()).unwrap();
        group.bench_with_input(BenchmarkId::new("patterns", name), &bars, |b, bars| {
            b.iter(|| detector.analyze(black_box(bars)));
        });
    }
    group.finish();
}

criterion_group!(benches, labels_benchmark, resample_benchmark);
criterion_main!(benches);
