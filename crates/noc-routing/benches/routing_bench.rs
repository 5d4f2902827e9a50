//! Benchmarks for NoC routing
//!
//! Measures performance of:
//! - Productive neighbor enumeration
//! - Single next-hop decisions
//! - Full traffic cycles at different mesh sizes

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use noc_routing::{MinimalAdaptive, RoutingPolicy, TrafficConfig, TrafficGenerator};
use noc_topology::{CongestionGrid, HotspotRegistry, MeshCoord, Neighbors};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Benchmark productive neighbor enumeration
fn bench_productive_neighbors(c: &mut Criterion) {
    let mut group = c.benchmark_group("productive_neighbors");

    let cases = [
        (MeshCoord::new(0, 0), MeshCoord::new(7, 7)),
        (MeshCoord::new(3, 4), MeshCoord::new(3, 0)),
        (MeshCoord::new(7, 7), MeshCoord::new(0, 0)),
    ];

    for (from, to) in cases {
        group.throughput(Throughput::Elements(1));
        group.bench_with_input(
            BenchmarkId::new("distance", from.manhattan_distance(&to)),
            &(from, to),
            |b, &(from, to)| b.iter(|| Neighbors::productive(black_box(from), black_box(to), 8).count()),
        );
    }
    group.finish();
}

/// Benchmark a single adaptive routing decision
fn bench_next_hop(c: &mut Criterion) {
    let mut grid = CongestionGrid::new(16);
    let values = (0..grid.len()).map(|i| (i % 10) as f64 / 10.0).collect();
    grid.replace_all(values).unwrap();

    c.bench_function("minimal_adaptive_next_hop", |b| {
        b.iter(|| {
            MinimalAdaptive.next_hop(
                black_box(MeshCoord::new(4, 4)),
                black_box(MeshCoord::new(12, 12)),
                &grid,
            )
        })
    });
}

/// Benchmark full traffic cycles
fn bench_traffic_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("traffic_cycle");

    for &size in &[4usize, 8, 16, 32] {
        group.throughput(Throughput::Elements((size * size) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let mut generator = TrafficGenerator::new(TrafficConfig::default()).unwrap();
            let mut grid = CongestionGrid::new(size);
            let hotspots = HotspotRegistry::new();
            let mut rng = ChaCha8Rng::seed_from_u64(42);
            b.iter(|| generator.step(&mut grid, &hotspots, &mut rng).unwrap())
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_productive_neighbors,
    bench_next_hop,
    bench_traffic_cycle,
);

criterion_main!(benches);
