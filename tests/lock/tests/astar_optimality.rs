//! A* against two references on small random graphs: the zero-heuristic
//! uniform-cost search and exhaustive enumeration of simple paths.
//!
//! Weights are whole numbers no lighter than the Euclidean span of their
//! edge, so the coordinate heuristic is consistent and every path cost is
//! exact in `f64`; costs are compared with `==`.

use std::collections::BTreeMap;

use lock_tests::brute_force::cheapest_simple_path;
use lodestar_harness::worlds::weighted_graph::{EdgeSpecV1, GraphSpecV1, WeightedGraph};
use lodestar_harness::worlds::GoalWorld;
use lodestar_kernel::budget::{BudgetV1, Exhaustion};
use lodestar_kernel::contract::PathDomain;
use lodestar_search::astar::{AStar, PathOutcome};
use lodestar_search::dijkstra::shortest_path;
use lodestar_search::policy::AStarPolicy;
use proptest::prelude::*;

fn name(index: usize) -> String {
    format!("v{index}")
}

/// Random graph over `2..=7` vertices, `v0` to the last vertex.
fn arb_graph() -> impl Strategy<Value = GraphSpecV1> {
    (2usize..=7).prop_flat_map(|n| {
        (
            prop::collection::vec((0i32..6, 0i32..6), n),
            prop::collection::vec((0..n, 0..n, 0u8..4), 0..16),
            any::<bool>(),
            any::<bool>(),
        )
            .prop_map(move |(points, raw_edges, undirected, with_coordinates)| {
                let point = |i: usize| [f64::from(points[i].0), f64::from(points[i].1)];
                // Self-loops register every vertex, so start and goal always exist.
                let mut edges: Vec<EdgeSpecV1> = (0..n)
                    .map(|i| EdgeSpecV1 {
                        from: name(i),
                        to: name(i),
                        weight: 0.0,
                    })
                    .collect();
                edges.extend(raw_edges.into_iter().map(|(from, to, extra)| {
                    let [x0, y0] = point(from);
                    let [x1, y1] = point(to);
                    EdgeSpecV1 {
                        from: name(from),
                        to: name(to),
                        weight: (x1 - x0).hypot(y1 - y0).ceil() + f64::from(extra),
                    }
                }));
                let coordinates = if with_coordinates {
                    (0..n).map(|i| (name(i), point(i))).collect()
                } else {
                    BTreeMap::new()
                };
                GraphSpecV1 {
                    start: name(0),
                    goal: name(n - 1),
                    edges,
                    undirected,
                    coordinates,
                }
            })
    })
}

proptest! {
    #[test]
    fn astar_cost_matches_dijkstra_and_enumeration(spec in arb_graph()) {
        let graph = WeightedGraph::from_spec(&spec).unwrap();
        let start = spec.start.clone();
        let goal = graph.goal();

        let astar = AStar::new(AStarPolicy::default())
            .find_path(&graph, &start, &goal)
            .unwrap();
        let baseline = shortest_path(&graph, &start, &goal, BudgetV1::UNBOUNDED).unwrap();
        let exhaustive = cheapest_simple_path(&graph, &start, &goal);

        let astar_cost = astar.outcome.path().map(|p| p.cost);
        let baseline_cost = baseline.outcome.path().map(|p| p.cost);
        prop_assert_eq!(astar_cost, exhaustive);
        prop_assert_eq!(baseline_cost, exhaustive);
        if exhaustive.is_none() {
            prop_assert_eq!(astar.outcome, PathOutcome::NoPath);
        }
    }

    #[test]
    fn found_paths_are_contiguous(spec in arb_graph()) {
        let graph = WeightedGraph::from_spec(&spec).unwrap();
        let goal = graph.goal();
        let result = AStar::new(AStarPolicy::default())
            .find_path(&graph, &spec.start, &goal)
            .unwrap();
        if let PathOutcome::Found(path) = result.outcome {
            prop_assert_eq!(path.start(), Some(&spec.start));
            prop_assert_eq!(path.goal(), Some(&goal));
            let mut total = 0.0;
            for pair in path.states.windows(2) {
                prop_assert!(
                    graph.neighbors(&pair[0]).iter().any(|(to, _)| *to == pair[1]),
                    "{} -> {} is not an edge", pair[0], pair[1]
                );
                total += graph.edge_cost(&pair[0], &pair[1]);
            }
            prop_assert_eq!(total, path.cost);
        }
    }
}

fn two_islands() -> WeightedGraph {
    WeightedGraph::from_json(
        r#"{"start": "a", "goal": "d", "undirected": true, "edges": [
            {"from": "a", "to": "b", "weight": 1.0},
            {"from": "c", "to": "d", "weight": 1.0}
        ]}"#,
    )
    .unwrap()
}

#[test_log::test]
fn disconnected_goal_is_no_path() {
    let graph = two_islands();
    let result = AStar::new(AStarPolicy::default())
        .find_path(&graph, &"a".to_string(), &graph.goal())
        .unwrap();
    assert_eq!(result.outcome, PathOutcome::NoPath);
    assert_eq!(result.stats.expansions, 2);
}

#[test]
fn start_equal_to_goal_is_zero_cost() {
    let graph = two_islands();
    let a = "a".to_string();
    let result = AStar::new(AStarPolicy::default())
        .find_path(&graph, &a, &a)
        .unwrap();
    let path = result.outcome.path().unwrap();
    assert_eq!(path.states, vec![a]);
    assert_eq!(path.cost, 0.0);
    assert_eq!(path.steps(), 0);
}

#[test]
fn iteration_ceiling_reports_exhaustion() {
    let graph = WeightedGraph::from_json(
        r#"{"start": "a", "goal": "d", "edges": [
            {"from": "a", "to": "b", "weight": 1.0},
            {"from": "b", "to": "c", "weight": 1.0},
            {"from": "c", "to": "d", "weight": 1.0}
        ]}"#,
    )
    .unwrap();
    let result = AStar::new(AStarPolicy {
        budget: BudgetV1::iterations(2),
    })
    .find_path(&graph, &"a".to_string(), &graph.goal())
    .unwrap();
    assert_eq!(
        result.outcome,
        PathOutcome::BudgetExhausted(Exhaustion::Iterations)
    );
}
