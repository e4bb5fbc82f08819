//! Explicit weighted graph: named vertices, adjacency lists, optional
//! coordinates.
//!
//! With coordinates, the heuristic is the straight-line distance to the
//! goal. Construction rejects any edge lighter than the distance it spans,
//! which keeps the heuristic admissible and consistent. Without
//! coordinates, the heuristic is zero and A* degenerates to uniform-cost
//! search.

use std::collections::BTreeMap;

use lodestar_kernel::contract::{PathDomain, SearchDomain};
use lodestar_kernel::proof::canon::float_value;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::{DescribeWorld, GoalWorld, WorldError};

/// One directed edge in a [`GraphSpecV1`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EdgeSpecV1 {
    pub from: String,
    pub to: String,
    pub weight: f64,
}

/// JSON description of a weighted graph search problem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GraphSpecV1 {
    pub start: String,
    pub goal: String,
    pub edges: Vec<EdgeSpecV1>,
    /// Add the reverse of every edge with the same weight.
    #[serde(default)]
    pub undirected: bool,
    /// Planar position per vertex. Either every vertex has one or none does.
    #[serde(default)]
    pub coordinates: BTreeMap<String, [f64; 2]>,
}

/// A validated weighted graph.
#[derive(Debug, Clone)]
pub struct WeightedGraph {
    /// Neighbors per vertex in first-mention order. Parallel edges keep the
    /// lightest weight.
    adjacency: BTreeMap<String, Vec<(String, f64)>>,
    coordinates: BTreeMap<String, [f64; 2]>,
    start: String,
    goal: String,
}

fn distance(a: [f64; 2], b: [f64; 2]) -> f64 {
    (a[0] - b[0]).hypot(a[1] - b[1])
}

impl WeightedGraph {
    /// # Errors
    ///
    /// Returns [`WorldError::Invalid`] for a negative or non-finite weight,
    /// an unknown start or goal, partial or non-finite coordinates, or an
    /// edge shorter than the straight-line distance it spans.
    pub fn from_spec(spec: &GraphSpecV1) -> Result<Self, WorldError> {
        let mut adjacency: BTreeMap<String, Vec<(String, f64)>> = BTreeMap::new();
        let mut add = |from: &str, to: &str, weight: f64| {
            adjacency.entry(to.to_string()).or_default();
            let neighbors = adjacency.entry(from.to_string()).or_default();
            match neighbors.iter_mut().find(|(name, _)| name == to) {
                Some(existing) => existing.1 = existing.1.min(weight),
                None => neighbors.push((to.to_string(), weight)),
            }
        };
        for edge in &spec.edges {
            if !(edge.weight.is_finite() && edge.weight >= 0.0) {
                return Err(WorldError::invalid(format!(
                    "edge {} -> {} has weight {}; weights must be finite and non-negative",
                    edge.from, edge.to, edge.weight
                )));
            }
            add(&edge.from, &edge.to, edge.weight);
            if spec.undirected {
                add(&edge.to, &edge.from, edge.weight);
            }
        }
        for endpoint in [&spec.start, &spec.goal] {
            if !adjacency.contains_key(endpoint) {
                return Err(WorldError::invalid(format!(
                    "vertex {endpoint} does not appear in any edge"
                )));
            }
        }

        if !spec.coordinates.is_empty() {
            for vertex in adjacency.keys() {
                let Some(point) = spec.coordinates.get(vertex) else {
                    return Err(WorldError::invalid(format!(
                        "vertex {vertex} has no coordinates"
                    )));
                };
                if !(point[0].is_finite() && point[1].is_finite()) {
                    return Err(WorldError::invalid(format!(
                        "vertex {vertex} has non-finite coordinates"
                    )));
                }
            }
            for (from, neighbors) in &adjacency {
                for (to, weight) in neighbors {
                    let span = distance(spec.coordinates[from], spec.coordinates[to]);
                    if *weight < span {
                        return Err(WorldError::invalid(format!(
                            "edge {from} -> {to} weighs {weight} but spans {span}; \
                             the distance heuristic would overestimate"
                        )));
                    }
                }
            }
        }

        Ok(Self {
            adjacency,
            coordinates: spec.coordinates.clone(),
            start: spec.start.clone(),
            goal: spec.goal.clone(),
        })
    }

    /// Parse a [`GraphSpecV1`] from JSON and build it.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::Parse`] for malformed JSON and
    /// [`WorldError::Invalid`] as [`from_spec`](Self::from_spec) does.
    pub fn from_json(text: &str) -> Result<Self, WorldError> {
        let spec: GraphSpecV1 = serde_json::from_str(text).map_err(|e| WorldError::Parse {
            detail: e.to_string(),
        })?;
        Self::from_spec(&spec)
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Whether the distance heuristic is active.
    #[must_use]
    pub fn has_coordinates(&self) -> bool {
        !self.coordinates.is_empty()
    }

    #[must_use]
    pub fn start(&self) -> &str {
        &self.start
    }

    /// Outgoing edges of `vertex`, in enumeration order.
    #[must_use]
    pub fn neighbors(&self, vertex: &str) -> &[(String, f64)] {
        self.adjacency.get(vertex).map_or(&[], Vec::as_slice)
    }
}

impl SearchDomain for WeightedGraph {
    type State = String;
    type Action = String;

    fn domain_id(&self) -> &str {
        "weighted_graph"
    }

    fn initial_state(&self) -> String {
        self.start.clone()
    }

    fn is_terminal(&self, state: &String) -> bool {
        self.neighbors(state).is_empty()
    }

    fn available_actions(&self, state: &String) -> Vec<String> {
        self.neighbors(state)
            .iter()
            .map(|(name, _)| name.clone())
            .collect()
    }

    fn apply_action(&self, state: &String, action: &String) -> String {
        assert!(
            self.neighbors(state).iter().any(|(name, _)| name == action),
            "{action} is not a neighbor of {state}"
        );
        action.clone()
    }
}

impl PathDomain for WeightedGraph {
    fn edge_cost(&self, from: &String, to: &String) -> f64 {
        self.neighbors(from)
            .iter()
            .find(|(name, _)| name == to)
            .map_or(f64::INFINITY, |(_, weight)| *weight)
    }

    fn heuristic(&self, state: &String, goal: &String) -> f64 {
        match (self.coordinates.get(state), self.coordinates.get(goal)) {
            (Some(a), Some(b)) => distance(*a, *b),
            _ => 0.0,
        }
    }
}

impl DescribeWorld for WeightedGraph {
    fn describe_state(&self, state: &String) -> Value {
        Value::String(state.clone())
    }

    fn describe_action(&self, action: &String) -> Value {
        Value::String(action.clone())
    }

    fn fixture(&self) -> Value {
        let adjacency: serde_json::Map<String, Value> = self
            .adjacency
            .iter()
            .map(|(vertex, neighbors)| {
                let edges = neighbors
                    .iter()
                    .map(|(to, weight)| json!({"to": to, "weight": float_value(*weight)}))
                    .collect();
                (vertex.clone(), Value::Array(edges))
            })
            .collect();
        let coordinates: serde_json::Map<String, Value> = self
            .coordinates
            .iter()
            .map(|(vertex, [x, y])| (vertex.clone(), json!([float_value(*x), float_value(*y)])))
            .collect();
        json!({
            "adjacency": adjacency,
            "coordinates": coordinates,
            "goal": self.goal,
            "start": self.start,
        })
    }
}

impl GoalWorld for WeightedGraph {
    fn goal(&self) -> String {
        self.goal.clone()
    }
}
