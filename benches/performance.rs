//! Performance benchmarks for the statistics aggregator and ranking

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use dns_latency_bench::{
    executor::rank_results,
    models::{BenchmarkResult, Server},
    stats::summarize,
};

/// Deterministic pseudo-latencies in the 1-300ms range
fn create_samples(count: usize) -> Vec<f64> {
    (0..count)
        .map(|i| 1.0 + ((i * 7919) % 29_900) as f64 / 100.0)
        .collect()
}

fn benchmark_summarize(c: &mut Criterion) {
    let mut group = c.benchmark_group("summarize");

    for size in [10usize, 100, 1_000, 10_000] {
        let samples = create_samples(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &samples, |b, samples| {
            b.iter(|| summarize(black_box(samples)))
        });
    }

    group.finish();
}

fn benchmark_ranking(c: &mut Criterion) {
    let results: Vec<BenchmarkResult> = (0..500)
        .map(|i| {
            let samples = create_samples(20 + i % 7);
            let summary = summarize(&samples).unwrap();
            BenchmarkResult::new(&Server::new(format!("S{}", i), format!("10.0.{}.{}", i / 256, i % 256)), samples.len(), summary)
        })
        .collect();

    c.bench_function("rank_500_results", |b| {
        b.iter(|| {
            let mut ranked = results.clone();
            rank_results(black_box(&mut ranked));
            ranked
        })
    });
}

criterion_group!(benches, benchmark_summarize, benchmark_ranking);
criterion_main!(benches);
