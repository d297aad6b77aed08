//! Criterion benchmarks for batch indexing, status annotation and full
//! batch processing.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use strareco_bench::{bench_config, reference_batches, stress_batches};
use strareco_engine::{annotate_reconstruction_status, BatchIndex, ShardedRunner, StrangenessQa};

/// Benchmark: Build the id index of one reference batch.
fn bench_index_build(c: &mut Criterion) {
    let batch = &reference_batches(42, 1)[0];
    c.bench_function("index_build_reference", |b| {
        b.iter(|| {
            let index = BatchIndex::build(black_box(batch)).unwrap();
            black_box(index);
        });
    });
}

/// Benchmark: Annotate reconstruction status on a stress batch.
fn bench_annotate(c: &mut Criterion) {
    let batch = &stress_batches(42, 1)[0];
    c.bench_function("annotate_stress", |b| {
        b.iter(|| {
            let status =
                annotate_reconstruction_status(&batch.sim_collisions, &batch.collisions);
            black_box(status.reconstructed_count());
        });
    });
}

/// Benchmark: All three passes over one reference batch.
fn bench_process_reference(c: &mut Criterion) {
    let batch = &reference_batches(42, 1)[0];
    let mut qa = StrangenessQa::new(bench_config()).unwrap();
    c.bench_function("process_batch_reference", |b| {
        b.iter(|| {
            let report = qa.process_batch(black_box(batch)).unwrap();
            black_box(report.v0s.selected);
        });
    });
}

/// Benchmark: All three passes over one stress batch.
fn bench_process_stress(c: &mut Criterion) {
    let batch = &stress_batches(42, 1)[0];
    let mut qa = StrangenessQa::new(bench_config()).unwrap();
    c.bench_function("process_batch_stress", |b| {
        b.iter(|| {
            let report = qa.process_batch(black_box(batch)).unwrap();
            black_box(report.cascades.selected);
        });
    });
}

/// Benchmark: 32 reference batches through a 4-worker sharded run.
fn bench_sharded_run(c: &mut Criterion) {
    let batches = reference_batches(7, 32);
    let runner = ShardedRunner::new(bench_config(), Some(4)).unwrap();
    c.bench_function("sharded_run_32x4", |b| {
        b.iter_batched(
            || batches.clone(),
            |batches| {
                let out = runner.run(batches).unwrap();
                black_box(out.summary);
            },
            BatchSize::LargeInput,
        );
    });
}

criterion_group!(
    benches,
    bench_index_build,
    bench_annotate,
    bench_process_reference,
    bench_process_stress,
    bench_sharded_run
);
criterion_main!(benches);
