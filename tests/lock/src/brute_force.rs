//! Exhaustive reference answers for small instances.

use lodestar_harness::worlds::weighted_graph::WeightedGraph;

/// Cost of the cheapest simple path from `start` to `goal`, found by
/// enumerating every simple path. Exponential; keep graphs small.
#[must_use]
pub fn cheapest_simple_path(graph: &WeightedGraph, start: &str, goal: &str) -> Option<f64> {
    let mut on_path = vec![start.to_string()];
    let mut best = None;
    walk(graph, start, goal, 0.0, &mut on_path, &mut best);
    best
}

fn walk(
    graph: &WeightedGraph,
    vertex: &str,
    goal: &str,
    cost: f64,
    on_path: &mut Vec<String>,
    best: &mut Option<f64>,
) {
    if vertex == goal {
        if !matches!(best, Some(b) if *b <= cost) {
            *best = Some(cost);
        }
        return;
    }
    for (next, weight) in graph.neighbors(vertex) {
        if on_path.contains(next) {
            continue;
        }
        on_path.push(next.clone());
        walk(graph, next, goal, cost + weight, on_path, best);
        on_path.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_cheaper_of_two_routes() {
        let graph = WeightedGraph::from_json(
            r#"{"start": "a", "goal": "c", "edges": [
                {"from": "a", "to": "b", "weight": 1.0},
                {"from": "b", "to": "c", "weight": 1.0},
                {"from": "a", "to": "c", "weight": 5.0}
            ]}"#,
        )
        .unwrap();
        assert_eq!(cheapest_simple_path(&graph, "a", "c"), Some(2.0));
        assert_eq!(cheapest_simple_path(&graph, "c", "a"), None);
    }
}
