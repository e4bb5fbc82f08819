//! Arena node and frontier ordering key for best-first search.
//!
//! Nodes refer to their parent by [`NodeId`], an index into the per-call
//! arena, so path reconstruction is a walk over indices and no node ever
//! owns another.

use std::cmp::Ordering;

/// Index of a node in a per-call arena. Only meaningful for the arena that
/// produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// The first node placed in every arena.
    pub const ROOT: Self = Self(0);

    /// Position in the arena.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Whether a node still sits on the open set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeStatus {
    Open,
    Closed,
}

/// One discovered state in an A* arena.
#[derive(Debug, Clone)]
pub struct SearchNode<S> {
    /// Position of this node in the arena.
    pub node_id: NodeId,
    /// Predecessor on the best known path (`None` for the start node).
    pub came_from: Option<NodeId>,
    /// The state this node stands for.
    pub state: S,
    /// Steps from the start along the best known path.
    pub depth: u32,
    /// Best known cost from the start.
    pub g_cost: f64,
    /// Heuristic estimate to the goal, computed once on discovery.
    pub h_cost: f64,
    /// Global counter at the last (re)insertion into the open set.
    pub creation_order: u64,
    pub status: NodeStatus,
}

impl<S> SearchNode<S> {
    /// `f_cost = g_cost + h_cost`, the frontier ordering key.
    #[must_use]
    pub fn f_cost(&self) -> f64 {
        self.g_cost + self.h_cost
    }

    /// Ordering key for this node's current entry in the open set.
    #[must_use]
    pub fn frontier_key(&self) -> FrontierKey {
        FrontierKey {
            f_cost: self.f_cost(),
            depth: self.depth,
            creation_order: self.creation_order,
        }
    }
}

/// The frontier ordering key: `(f_cost, depth, creation_order)`.
///
/// Lower `f_cost` first, then shallower depth, then older `creation_order`.
/// Costs are compared with [`f64::total_cmp`] so the order is total even
/// though engines never admit a NaN.
#[derive(Debug, Clone, Copy)]
pub struct FrontierKey {
    pub f_cost: f64,
    pub depth: u32,
    pub creation_order: u64,
}

impl PartialEq for FrontierKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierKey {}

impl PartialOrd for FrontierKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.f_cost
            .total_cmp(&other.f_cost)
            .then(self.depth.cmp(&other.depth))
            .then(self.creation_order.cmp(&other.creation_order))
    }
}
