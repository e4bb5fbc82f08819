//! Shared workloads for lodestar benchmark suites.
//!
//! Every workload is generated deterministically (fixed layout or a seeded
//! `ChaCha8Rng`), so timings from different machines measure the same
//! search. [`guard_digest`] pins what a workload produced; a timing is only
//! comparable with another if their guard digests agree.

use lodestar_harness::report::RunReportV1;
use lodestar_harness::worlds::dominant_arm::DominantArm;
use lodestar_harness::worlds::grid::GridWorld;
use lodestar_harness::worlds::knapsack::{ItemV1, Knapsack};
use lodestar_harness::worlds::weighted_graph::{EdgeSpecV1, GraphSpecV1, WeightedGraph};
use lodestar_kernel::proof::canon::canonical_json_bytes;
use lodestar_kernel::proof::hash::{canonical_hash, ContentHash, HashDomain};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde_json::json;

/// `size × size` serpentine maze: every fourth column is a wall with a single
/// gap, alternating bottom and top. Start top-left, goal bottom-right.
///
/// # Panics
///
/// Panics if `size < 2`.
#[must_use]
pub fn serpentine_maze(size: usize) -> GridWorld {
    assert!(size >= 2, "maze needs at least 2x2 cells");
    let rows: Vec<String> = (0..size)
        .map(|r| {
            (0..size)
                .map(|c| {
                    let wall_column = c % 4 == 2 && c + 1 < size;
                    let gap_row = if (c / 4) % 2 == 0 { size - 1 } else { 0 };
                    match (r, c) {
                        (0, 0) => 'S',
                        _ if r == size - 1 && c == size - 1 => 'G',
                        _ if wall_column && r != gap_row => '#',
                        _ => '.',
                    }
                })
                .collect()
        })
        .collect();
    let refs: Vec<&str> = rows.iter().map(String::as_str).collect();
    GridWorld::parse(&refs).expect("generated maze is well formed")
}

/// Connected undirected graph with `vertices` points in a 100×100 square.
/// Vertex `i > 0` links to a random earlier vertex, plus `extra_edges`
/// random chords. Weights are 1 to 1.5 times the Euclidean span, so the
/// distance heuristic is consistent.
///
/// # Panics
///
/// Panics if `vertices < 2`.
#[must_use]
pub fn random_geometric_graph(vertices: usize, extra_edges: usize, seed: u64) -> WeightedGraph {
    assert!(vertices >= 2, "graph needs at least two vertices");
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let name = |i: usize| format!("v{i}");
    let points: Vec<[f64; 2]> = (0..vertices)
        .map(|_| [rng.gen_range(0.0..100.0), rng.gen_range(0.0..100.0)])
        .collect();
    let edge = |from: usize, to: usize, rng: &mut ChaCha8Rng| {
        let span = (points[to][0] - points[from][0]).hypot(points[to][1] - points[from][1]);
        EdgeSpecV1 {
            from: name(from),
            to: name(to),
            weight: span * rng.gen_range(1.0..1.5),
        }
    };
    let mut edges = Vec::with_capacity(vertices + extra_edges);
    for i in 1..vertices {
        let j = rng.gen_range(0..i);
        edges.push(edge(i, j, &mut rng));
    }
    for _ in 0..extra_edges {
        let a = rng.gen_range(0..vertices);
        let b = rng.gen_range(0..vertices);
        edges.push(edge(a, b, &mut rng));
    }
    let spec = GraphSpecV1 {
        start: name(0),
        goal: name(vertices - 1),
        edges,
        undirected: true,
        coordinates: (0..vertices).map(|i| (name(i), points[i])).collect(),
    };
    WeightedGraph::from_spec(&spec).expect("generated graph is valid")
}

/// `items` random items with capacity for roughly a third of them.
///
/// # Panics
///
/// Panics if `items == 0`.
#[must_use]
pub fn random_knapsack(items: usize, seed: u64) -> Knapsack {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let items: Vec<ItemV1> = (0..items)
        .map(|_| ItemV1 {
            weight: rng.gen_range(1..20),
            value: rng.gen_range(1..100),
        })
        .collect();
    let total: u32 = items.iter().map(|item| item.weight).sum();
    Knapsack::new(total / 3, items).expect("generated knapsack is non-empty")
}

/// Bandit with `arms` arms, the last one dominant.
///
/// # Panics
///
/// Panics if `arms < 2`.
#[must_use]
pub fn last_arm_dominant(arms: usize, horizon: u32) -> DominantArm {
    DominantArm::new(arms, arms - 1, horizon).expect("valid arm count")
}

/// Digest of a run's world, strategy and outcome, leaving out engine
/// counters so that pure performance work keeps the guard stable.
///
/// # Panics
///
/// Panics if the report holds a raw float.
#[must_use]
pub fn guard_digest(report: &RunReportV1) -> ContentHash {
    let guard = json!({
        "outcome": report.outcome,
        "strategy_digest": report.strategy_digest.as_str(),
        "world_digest": report.world_digest.as_str(),
    });
    let bytes = canonical_json_bytes(&guard).expect("report values are canonical");
    canonical_hash(HashDomain::BenchGuard, &bytes)
}
