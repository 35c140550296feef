//! Benchmarks for city resolution and similarity scoring.

#![allow(clippy::unwrap_used, missing_docs)]

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use shipping_quote::domain::services::similarity::similarity;
use shipping_quote::domain::services::{AdminDivisionIndex, FuzzyCityResolver, ResolverConfig};
use shipping_quote::infrastructure::reference::seed::seed_entries;
use std::hint::black_box;

fn bench_resolve(c: &mut Criterion) {
    let index = AdminDivisionIndex::new(seed_entries()).unwrap();
    let resolver = FuzzyCityResolver::new(ResolverConfig::default());

    let mut group = c.benchmark_group("resolve");
    let cases = [
        ("exact", "Medellín", "Antioquia"),
        ("folded", "bogota", "Bogota DC"),
        ("fuzzy_hinted", "Medelin", "Antioquia"),
        ("fuzzy_unhinted", "Bucaramnga", "Desconocido"),
        ("not_found", "Xyzabc123", "Desconocido"),
    ];
    for (name, city, department) in cases {
        group.bench_with_input(
            BenchmarkId::from_parameter(name),
            &(city, department),
            |b, &(city, department)| {
                b.iter(|| resolver.resolve(&index, black_box(city), Some(black_box(department))));
            },
        );
    }
    group.finish();
}

fn bench_similarity(c: &mut Criterion) {
    c.bench_function("similarity", |b| {
        b.iter(|| {
            similarity(
                black_box("san jose del guaviare"),
                black_box("san jose del guabiare"),
            )
        });
    });
}

criterion_group!(benches, bench_resolve, bench_similarity);
criterion_main!(benches);
