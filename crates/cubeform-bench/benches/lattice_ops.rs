//! Criterion micro-benchmarks for lattice expansion.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use cubeform_core::Coordinate;
use cubeform_lattice::{expand, DedupPolicy, GeometryConfig};
use cubeform_test_utils::fixtures::{fresh_graph, graph_with};

/// Benchmark: expand the Default lattice at a corner into a fresh graph.
fn bench_expand_corner(c: &mut Criterion) {
    c.bench_function("expand_corner", |b| {
        b.iter(|| {
            let mut graph = fresh_graph();
            let root = graph.default_id();
            let out = expand(&mut graph, root, Coordinate::new(0, 0, 0)).unwrap();
            black_box(out.children.len());
        });
    });
}

/// Benchmark: expand every coordinate of the Default lattice.
fn bench_expand_all_coordinates(c: &mut Criterion) {
    c.bench_function("expand_all_27", |b| {
        b.iter(|| {
            let mut graph = fresh_graph();
            let root = graph.default_id();
            for at in Coordinate::all() {
                black_box(expand(&mut graph, root, at).unwrap());
            }
        });
    });
}

/// Benchmark: re-expanding a corner where every candidate is a duplicate.
fn bench_expand_duplicates(c: &mut Criterion) {
    let mut graph = graph_with(GeometryConfig {
        dedup: DedupPolicy::Content,
        ..GeometryConfig::default()
    });
    let root = graph.default_id();
    expand(&mut graph, root, Coordinate::new(0, 0, 0)).unwrap();

    c.bench_function("expand_corner_duplicates", |b| {
        b.iter(|| {
            let out = expand(&mut graph, root, Coordinate::new(0, 0, 0)).unwrap();
            black_box(out.stats.duplicate);
        });
    });
}

criterion_group!(
    benches,
    bench_expand_corner,
    bench_expand_all_coordinates,
    bench_expand_duplicates
);
criterion_main!(benches);
