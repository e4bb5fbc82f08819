//! A* shortest-path search.
//!
//! Best-first expansion ordered by `f = g + h` over an arena of
//! [`SearchNode`]s. The open set is a binary heap with lazy deletion (see
//! [`crate::frontier`]); the closed set is the `Closed` node status.
//!
//! The first time the goal is *popped* from the open set its cost is final,
//! provided the heuristic is admissible and consistent. A closed node is
//! never reopened, so an inconsistent heuristic can yield a suboptimal path.

use std::collections::HashMap;

use log::{debug, trace};
use lodestar_kernel::budget::Exhaustion;
use lodestar_kernel::contract::{successors, PathDomain};

use crate::error::{check_cost, unsigned_zero, SearchError};
use crate::frontier::OpenSet;
use crate::node::{NodeId, NodeStatus, SearchNode};
use crate::policy::AStarPolicy;

/// A path from start to goal, both inclusive.
#[derive(Debug, Clone, PartialEq)]
pub struct PathV1<S> {
    pub states: Vec<S>,
    /// Sum of edge costs along `states`.
    pub cost: f64,
}

impl<S> PathV1<S> {
    /// Number of edges on the path.
    #[must_use]
    pub fn steps(&self) -> usize {
        self.states.len().saturating_sub(1)
    }

    #[must_use]
    pub fn start(&self) -> Option<&S> {
        self.states.first()
    }

    #[must_use]
    pub fn goal(&self) -> Option<&S> {
        self.states.last()
    }
}

/// How an A* call ended.
#[derive(Debug, Clone, PartialEq)]
pub enum PathOutcome<S> {
    Found(PathV1<S>),
    /// The reachable region was exhausted without reaching the goal.
    NoPath,
    /// A budget ceiling stopped the search first.
    BudgetExhausted(Exhaustion),
}

impl<S> PathOutcome<S> {
    /// The path, if one was found.
    #[must_use]
    pub fn path(&self) -> Option<&PathV1<S>> {
        match self {
            Self::Found(path) => Some(path),
            Self::NoPath | Self::BudgetExhausted(_) => None,
        }
    }
}

/// Counters collected over one A* call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchStats {
    /// Nodes moved to the closed set.
    pub expansions: u64,
    /// Successor states produced by expansions.
    pub generated: u64,
    /// Distinct states discovered (arena size).
    pub nodes: u64,
    /// Peak open-set heap size, stale entries included.
    pub frontier_high_water: u64,
    /// Heap entries dropped because the node had since improved or closed.
    pub stale_discarded: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AStarResult<S> {
    pub outcome: PathOutcome<S>,
    pub stats: SearchStats,
}

/// Per-call arena: nodes by index plus a state → index map.
struct NodeArena<S> {
    nodes: Vec<SearchNode<S>>,
    index: HashMap<S, NodeId>,
}

impl<S: Clone + Eq + std::hash::Hash> NodeArena<S> {
    fn new() -> Self {
        Self {
            nodes: Vec::new(),
            index: HashMap::new(),
        }
    }

    fn lookup(&self, state: &S) -> Option<NodeId> {
        self.index.get(state).copied()
    }

    fn node(&self, id: NodeId) -> &SearchNode<S> {
        &self.nodes[id.index()]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut SearchNode<S> {
        &mut self.nodes[id.index()]
    }

    /// Store `node` under the next free index, overwriting its `node_id`.
    fn insert(&mut self, node: SearchNode<S>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.index.insert(node.state.clone(), id);
        self.nodes.push(SearchNode { node_id: id, ..node });
        id
    }

    /// An open-set entry is current only while its node is open and the
    /// entry carries the node's best known cost.
    fn is_current(&self, id: NodeId, g_cost: f64) -> bool {
        let node = self.node(id);
        node.status == NodeStatus::Open && node.g_cost.to_bits() == g_cost.to_bits()
    }

    fn len(&self) -> u64 {
        self.nodes.len() as u64
    }
}

/// Walk `came_from` links back from `goal_id` and return the states in
/// start-to-goal order.
///
/// # Panics
///
/// Panics if `goal_id` or any predecessor index is out of bounds for `nodes`.
#[must_use]
pub fn reconstruct_path<S: Clone>(nodes: &[SearchNode<S>], goal_id: NodeId) -> Vec<S> {
    let mut states = Vec::new();
    let mut cursor = Some(goal_id);
    while let Some(id) = cursor {
        let node = &nodes[id.index()];
        states.push(node.state.clone());
        cursor = node.came_from;
    }
    states.reverse();
    states
}

/// A* engine. Holds only its policy; every call builds a fresh arena.
#[derive(Debug, Clone, Copy, Default)]
pub struct AStar {
    policy: AStarPolicy,
}

impl AStar {
    #[must_use]
    pub fn new(policy: AStarPolicy) -> Self {
        Self { policy }
    }

    #[must_use]
    pub fn policy(&self) -> &AStarPolicy {
        &self.policy
    }

    /// Find a least-cost path from `start` to `goal` using the domain's own
    /// heuristic.
    ///
    /// # Errors
    ///
    /// See [`find_path_with`](Self::find_path_with).
    pub fn find_path<D: PathDomain>(
        &self,
        domain: &D,
        start: &D::State,
        goal: &D::State,
    ) -> Result<AStarResult<D::State>, SearchError> {
        self.find_path_with(domain, start, goal, |state, goal| {
            domain.heuristic(state, goal)
        })
    }

    /// Find a least-cost path from `start` to `goal` with an explicit
    /// heuristic `h(state, goal)`.
    ///
    /// Terminal states other than the goal are not expanded.
    ///
    /// # Errors
    ///
    /// - [`SearchError::InvalidBudget`] for a degenerate budget.
    /// - [`SearchError::InvalidConfig`] if `h(goal, goal) != 0` or
    ///   `h(start, goal)` is negative or non-finite.
    /// - [`SearchError::DomainContract`] for a negative or non-finite edge
    ///   cost or heuristic value observed during search.
    pub fn find_path_with<D, H>(
        &self,
        domain: &D,
        start: &D::State,
        goal: &D::State,
        heuristic: H,
    ) -> Result<AStarResult<D::State>, SearchError>
    where
        D: PathDomain,
        H: Fn(&D::State, &D::State) -> f64,
    {
        self.policy.validate()?;
        let at_goal = heuristic(goal, goal);
        if at_goal != 0.0 {
            return Err(SearchError::invalid_config(format!(
                "heuristic must be zero at the goal, got {at_goal}"
            )));
        }
        let h_start = heuristic(start, goal);
        if !(h_start.is_finite() && h_start >= 0.0) {
            return Err(SearchError::invalid_config(format!(
                "heuristic at the start must be finite and non-negative, got {h_start}"
            )));
        }

        debug!(
            "astar start: domain={} budget={:?}",
            domain.domain_id(),
            self.policy.budget
        );

        let mut meter = self.policy.budget.start();
        let mut arena = NodeArena::new();
        let mut open = OpenSet::new();
        let mut stats = SearchStats::default();

        let creation_order = open.next_creation_order();
        let root = arena.insert(SearchNode {
            node_id: NodeId::ROOT,
            came_from: None,
            state: start.clone(),
            depth: 0,
            g_cost: 0.0,
            h_cost: unsigned_zero(h_start),
            creation_order,
            status: NodeStatus::Open,
        });
        open.push(root, arena.node(root).frontier_key(), 0.0);
        meter.record_nodes(arena.len());

        let outcome = loop {
            if let Some(exhaustion) = meter.exhausted() {
                break PathOutcome::BudgetExhausted(exhaustion);
            }
            let Some(current) = open.pop_best(|id, g| arena.is_current(id, g)) else {
                break PathOutcome::NoPath;
            };

            let (state, g_current, depth) = {
                let node = arena.node(current);
                (node.state.clone(), node.g_cost, node.depth)
            };
            if state == *goal {
                break PathOutcome::Found(PathV1 {
                    states: reconstruct_path(&arena.nodes, current),
                    cost: g_current,
                });
            }

            arena.node_mut(current).status = NodeStatus::Closed;
            stats.expansions += 1;
            meter.tick();
            trace!("astar expand: depth={depth} g={g_current} state={state:?}");

            if domain.is_terminal(&state) {
                continue;
            }

            for (_action, next) in successors(domain, &state) {
                stats.generated += 1;
                let existing = arena.lookup(&next);
                if let Some(id) = existing {
                    if arena.node(id).status == NodeStatus::Closed {
                        continue;
                    }
                }
                let step = check_cost(domain.edge_cost(&state, &next), "edge_cost")?;
                let tentative = g_current + step;

                let id = match existing {
                    Some(id) => {
                        if tentative >= arena.node(id).g_cost {
                            continue;
                        }
                        let creation_order = open.next_creation_order();
                        let node = arena.node_mut(id);
                        node.came_from = Some(current);
                        node.g_cost = tentative;
                        node.depth = depth + 1;
                        node.creation_order = creation_order;
                        id
                    }
                    None => {
                        let h_cost = check_cost(heuristic(&next, goal), "heuristic")?;
                        let creation_order = open.next_creation_order();
                        arena.insert(SearchNode {
                            node_id: NodeId::ROOT,
                            came_from: Some(current),
                            state: next,
                            depth: depth + 1,
                            g_cost: tentative,
                            h_cost,
                            creation_order,
                            status: NodeStatus::Open,
                        })
                    }
                };
                let node = arena.node(id);
                open.push(id, node.frontier_key(), node.g_cost);
            }
            meter.record_nodes(arena.len());
        };

        stats.nodes = arena.len();
        stats.frontier_high_water = open.high_water();
        stats.stale_discarded = open.stale_discarded();
        debug!(
            "astar done: domain={} outcome={} expansions={} nodes={} elapsed={:?}",
            domain.domain_id(),
            match &outcome {
                PathOutcome::Found(_) => "found",
                PathOutcome::NoPath => "no_path",
                PathOutcome::BudgetExhausted(_) => "budget_exhausted",
            },
            stats.expansions,
            stats.nodes,
            meter.elapsed()
        );
        Ok(AStarResult { outcome, stats })
    }
}
