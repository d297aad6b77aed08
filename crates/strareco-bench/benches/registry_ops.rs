//! Criterion micro-benchmarks for histogram fills and registry merges.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use strareco_bench::{bench_config, reference_batches};
use strareco_engine::{strangeness_registry, StrangenessQa};
use strareco_hist::HistogramSink;

/// Benchmark: 10K fills into one 2D mass histogram.
fn bench_fill_2d(c: &mut Criterion) {
    let mut registry = strangeness_registry().unwrap();
    c.bench_function("fill_2d_10k", |b| {
        b.iter(|| {
            for i in 0..10_000u32 {
                let pt = f64::from(i % 100) * 0.1;
                let mass = 1.08 + f64::from(i % 70) * 0.001;
                registry.fill("h2dMassLambda", &[pt, mass]).unwrap();
            }
            black_box(registry.total_entries());
        });
    });
}

/// Benchmark: Build the full declared layout.
fn bench_declare_layout(c: &mut Criterion) {
    c.bench_function("declare_layout", |b| {
        b.iter(|| {
            let registry = strangeness_registry().unwrap();
            black_box(registry.len());
        });
    });
}

/// Benchmark: Merge a populated registry into a fresh one.
fn bench_merge(c: &mut Criterion) {
    let mut qa = StrangenessQa::new(bench_config()).unwrap();
    for batch in &reference_batches(3, 8) {
        qa.process_batch(batch).unwrap();
    }
    let populated = qa.registry().clone();

    c.bench_function("registry_merge", |b| {
        b.iter(|| {
            let mut target = strangeness_registry().unwrap();
            target.merge(black_box(&populated)).unwrap();
            black_box(target.total_entries());
        });
    });
}

criterion_group!(benches, bench_fill_2d, bench_declare_layout, bench_merge);
criterion_main!(benches);
