//! Arena-allocated MCTS statistics tree.
//!
//! Nodes live in one `Vec` and refer to each other by [`NodeId`]. A node's
//! per-action statistics are stored on the *parent* as [`ChildStat`]s, so an
//! action can accumulate visits before (and without) a child node existing.

use crate::node::NodeId;

/// Statistics for one action out of a tree node.
#[derive(Debug, Clone, PartialEq)]
pub struct ChildStat<A> {
    pub action: A,
    /// Simulations that passed through this action.
    pub visits: u64,
    /// Sum of rollout rewards.
    pub score_sum: f64,
    /// Sum of squared rollout rewards, for the variance-aware bound.
    pub squared_score_sum: f64,
    /// Tree node reached by this action, created on first selection.
    pub child: Option<NodeId>,
}

impl<A> ChildStat<A> {
    /// Fresh, unvisited statistics for `action`.
    #[must_use]
    pub fn new(action: A) -> Self {
        Self {
            action,
            visits: 0,
            score_sum: 0.0,
            squared_score_sum: 0.0,
            child: None,
        }
    }

    /// Mean reward, defined only once visited.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn mean(&self) -> Option<f64> {
        (self.visits > 0).then(|| self.score_sum / self.visits as f64)
    }

    /// Population variance of rewards, clamped at zero against rounding.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn variance(&self) -> Option<f64> {
        let mean = self.mean()?;
        Some((self.squared_score_sum / self.visits as f64 - mean * mean).max(0.0))
    }

    /// Fold one rollout reward into the statistics.
    pub fn record(&mut self, reward: f64) {
        self.visits += 1;
        self.score_sum += reward;
        self.squared_score_sum += reward * reward;
    }
}

/// A node in the MCTS tree.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode<A> {
    /// `None` for the root.
    pub parent: Option<NodeId>,
    /// One entry per legal action, in enumeration order. Empty until the
    /// node is first visited.
    pub children: Vec<ChildStat<A>>,
    /// Times selection passed through this node. Equals the sum of the
    /// children's `visits` once each simulation has been backpropagated.
    pub visit_count: u64,
}

impl<A> TreeNode<A> {
    fn new(parent: Option<NodeId>) -> Self {
        Self {
            parent,
            children: Vec::new(),
            visit_count: 0,
        }
    }
}

/// Per-call tree arena. The root is always [`NodeId::ROOT`].
#[derive(Debug, Clone)]
pub struct Tree<A> {
    nodes: Vec<TreeNode<A>>,
}

impl<A> Default for Tree<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Tree<A> {
    /// A tree holding only an unvisited root.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![TreeNode::new(None)],
        }
    }

    /// # Panics
    ///
    /// Panics if `id` did not come from this tree.
    #[must_use]
    pub fn get(&self, id: NodeId) -> &TreeNode<A> {
        &self.nodes[id.index()]
    }

    /// # Panics
    ///
    /// Panics if `id` did not come from this tree.
    pub fn get_mut(&mut self, id: NodeId) -> &mut TreeNode<A> {
        &mut self.nodes[id.index()]
    }

    #[must_use]
    pub fn root(&self) -> &TreeNode<A> {
        self.get(NodeId::ROOT)
    }

    /// Create the node reached by child slot `slot` of `parent`, or return the
    /// existing one.
    ///
    /// # Panics
    ///
    /// Panics if `parent` or `slot` is out of range.
    pub fn expand(&mut self, parent: NodeId, slot: usize) -> NodeId {
        if let Some(existing) = self.nodes[parent.index()].children[slot].child {
            return existing;
        }
        let id = NodeId(self.nodes.len());
        self.nodes.push(TreeNode::new(Some(parent)));
        self.nodes[parent.index()].children[slot].child = Some(id);
        id
    }

    /// Number of nodes, the root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`; the root exists from construction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
