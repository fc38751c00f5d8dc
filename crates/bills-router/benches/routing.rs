//! Routing benchmarks.
//!
//! Run with: `cargo bench -p bills-router`

use bills_router::RouteTable;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use http::Method;

fn build_table(num_routes: usize) -> RouteTable<usize> {
    let mut table = RouteTable::new();
    for i in 0..num_routes / 2 {
        table.register(format!("/api/v1/resource{i}"), Method::GET, i);
        table.register(format!("/api/v1/resource{i}/:id"), Method::GET, i);
    }
    table
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");
    for size in [10, 50, 200] {
        let table = build_table(size);
        let last = size / 2 - 1;
        let literal = format!("/api/v1/resource{last}");
        let param = format!("/api/v1/resource{last}/42");

        group.bench_with_input(BenchmarkId::new("literal", size), &literal, |b, path| {
            b.iter(|| table.resolve(black_box(path), &Method::GET).status());
        });
        group.bench_with_input(BenchmarkId::new("param", size), &param, |b, path| {
            b.iter(|| table.resolve(black_box(path), &Method::GET).status());
        });
        group.bench_function(BenchmarkId::new("miss", size), |b| {
            b.iter(|| table.resolve(black_box("/nothing/here"), &Method::GET).status());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_resolve);
criterion_main!(benches);
