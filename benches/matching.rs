//! Benchmarks for the ride matcher.
//!
//! | Group | What is measured |
//! |-------|------------------|
//! | `quadtree` | insert, exact find and radius search on a populated tree |
//! | `update_ride` | one position update with candidate generation and ranking |
//! | `throughput` | batches of updates on a fresh matcher |
//!
//! ## Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench
//!
//! # Run specific benchmark
//! cargo bench -- find_near
//! ```
//!
//! Results are saved to `target/criterion/` with HTML reports.

use criterion::{
    black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput,
};
use std::time::Duration;

use ride_matcher::types::cost;
use ride_matcher::{Location, Matcher, MatcherConfig, PointQuadtree, RideId, User};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

// ============================================================================
// HELPER FUNCTIONS - Deterministic workloads
// ============================================================================

fn random_points(count: usize, spread: f64, seed: u64) -> Vec<Location> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|_| Location::new(rng.gen_range(-spread..=spread), rng.gen_range(-spread..=spread)))
        .collect()
}

fn populated_tree(count: usize) -> PointQuadtree<Location> {
    let mut tree =
        PointQuadtree::new(Location::new(-1000.0, 1000.0), Location::new(1000.0, -1000.0)).unwrap();
    for p in random_points(count, 1000.0, 1) {
        tree.insert(p).unwrap();
    }
    tree
}

/// Matcher with `count` rides scattered over a 400 x 400 square, 40% of
/// them drivers, all heading to the same area.
fn populated_matcher(count: usize) -> Matcher {
    let mut matcher = Matcher::with_capacity(MatcherConfig::default(), count).unwrap();
    let destination = Location::new(600.0, 600.0);

    for (i, at) in random_points(count, 200.0, 2).into_iter().enumerate() {
        let plate = (i % 5 < 2).then(|| format!("PL-{i}"));
        matcher
            .add_ride(User::shared("u", "U"), at, destination, plate, cost::SCALE)
            .unwrap();
    }
    matcher
}

fn update_batch(count: usize, rides: usize, seed: u64) -> Vec<(RideId, Location)> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            (
                rng.gen_range(1..=rides as u64),
                Location::new(rng.gen_range(-200.0..=200.0), rng.gen_range(-200.0..=200.0)),
            )
        })
        .collect()
}

// ============================================================================
// BENCHMARK: Quadtree
// ============================================================================

fn bench_quadtree(c: &mut Criterion) {
    let mut group = c.benchmark_group("quadtree");
    group.measurement_time(Duration::from_secs(5));

    group.bench_function("insert_into_100k", |b| {
        b.iter_batched(
            || populated_tree(100_000),
            |mut tree| black_box(tree.insert(Location::new(12.34, -56.78))),
            BatchSize::LargeInput,
        );
    });

    let tree = populated_tree(100_000);
    let probe = random_points(1, 1000.0, 1)[0];

    group.bench_function("find_in_100k", |b| {
        b.iter(|| black_box(tree.find(&probe)));
    });

    for radius in [10.0, 50.0, 200.0] {
        group.bench_with_input(
            BenchmarkId::new("find_near_in_100k", radius),
            &radius,
            |b, &r| {
                b.iter(|| black_box(tree.find_near(0.0, 0.0, r).len()));
            },
        );
    }

    group.finish();
}

// ============================================================================
// BENCHMARK: Single update
// ============================================================================

fn bench_update_ride(c: &mut Criterion) {
    let mut group = c.benchmark_group("update_ride");
    group.measurement_time(Duration::from_secs(10));

    for rides in [1_000, 10_000] {
        group.bench_with_input(BenchmarkId::new("rides", rides), &rides, |b, &n| {
            let moves = update_batch(1, n, 3);
            b.iter_batched(
                || populated_matcher(n),
                |mut matcher| {
                    let (ride, at) = moves[0];
                    black_box(matcher.update_ride(ride, at))
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

// ============================================================================
// BENCHMARK: Throughput
// ============================================================================

fn bench_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("throughput");
    group.measurement_time(Duration::from_secs(15));
    group.sample_size(20);

    for batch_size in [1_000, 10_000] {
        group.throughput(Throughput::Elements(batch_size as u64));

        group.bench_with_input(
            BenchmarkId::new("updates", batch_size),
            &batch_size,
            |b, &size| {
                let moves = update_batch(size, 5_000, 42);

                b.iter_batched(
                    || populated_matcher(5_000),
                    |mut matcher| {
                        for &(ride, at) in &moves {
                            black_box(matcher.update_ride(ride, at).ok());
                        }
                        matcher.pending_match_count()
                    },
                    BatchSize::LargeInput,
                );
            },
        );
    }

    group.finish();
}

// ============================================================================
// CRITERION ENTRY POINT
// ============================================================================

criterion_group!(benches, bench_quadtree, bench_update_ride, bench_throughput);

criterion_main!(benches);
