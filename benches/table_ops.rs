//! Benchmarks for argument splitting and table rendering
//!
//! Printing is a debugging aid, but it runs inside hot loops often enough
//! that rendering a batch should stay well under a millisecond.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pshape::{render_arrays, split_args, ArrayLike, PrintOptions};

/// Generate test data for benchmarks
fn generate_test_data(size: usize) -> Vec<f64> {
    (0..size).map(|i| (i as f64) * 0.5).collect()
}

/// Benchmark splitting call lines with nested calls
fn bench_split(c: &mut Criterion) {
    let mut group = c.benchmark_group("split_args");

    for args in [2usize, 8, 32].iter() {
        let raw: Vec<String> = (0..*args).map(|i| format!("f(a{i}, g(b{i}))")).collect();
        let raw = raw.join(", ");
        group.throughput(Throughput::Bytes(raw.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(args), &raw, |bencher, raw| {
            bencher.iter(|| split_args(black_box(raw)));
        });
    }

    group.finish();
}

/// Benchmark rendering a batch of three arrays
fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_arrays");
    let options = PrintOptions::default();
    let names: Vec<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();

    for size in [100, 10_000, 1_000_000].iter() {
        group.throughput(Throughput::Elements(*size as u64 * 3));
        let data = generate_test_data(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |bencher, data| {
            let arrays: [&dyn ArrayLike; 3] = [data, data, data];
            bencher.iter(|| render_arrays(black_box(&names), &options, black_box(&arrays)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_split, bench_render);
criterion_main!(benches);
