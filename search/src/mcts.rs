//! Monte-Carlo Tree Search with upper-confidence selection.
//!
//! Each simulation runs four phases against a per-call [`Tree`]:
//!
//! 1. **Selection**: from the root, repeatedly pick the child with the best
//!    [`SelectionPolicy`] score. A node's `visit_count` is bumped before its
//!    children are scored.
//! 2. **Expansion**: the first time an action is selected its child node is
//!    created and descent stops there.
//! 3. **Rollout**: uniformly random legal actions for up to
//!    `rollout_depth` steps or until a terminal state, then `evaluate`.
//! 4. **Backpropagation**: every edge on the selected path records the reward.
//!
//! The search runs until the budget trips, then recommends the root action
//! with the highest mean reward. Simulations are independent only through
//! the tree, so running rollouts in parallel would need per-worker RNGs and a
//! merge step for the statistics; engines here stay single-threaded.

use log::{debug, trace};
use lodestar_kernel::budget::Exhaustion;
use lodestar_kernel::contract::EvaluateDomain;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::{check_score, SearchError};
use crate::node::NodeId;
use crate::policy::MctsPolicy;
use crate::tree::{ChildStat, Tree};

/// The recommended action, tagged with where it came from.
#[derive(Debug, Clone, PartialEq)]
pub enum Decision<A> {
    /// Chosen by the search.
    Selected(A),
    /// No root action was ever simulated; this is the caller's fallback.
    Fallback(A),
}

impl<A> Decision<A> {
    #[must_use]
    pub fn action(&self) -> &A {
        match self {
            Self::Selected(action) | Self::Fallback(action) => action,
        }
    }

    #[must_use]
    pub fn into_action(self) -> A {
        match self {
            Self::Selected(action) | Self::Fallback(action) => action,
        }
    }

    #[must_use]
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }
}

/// Final statistics of one root action.
#[derive(Debug, Clone, PartialEq)]
pub struct ChildSummaryV1<A> {
    pub action: A,
    pub visits: u64,
    /// `None` when never visited.
    pub mean: Option<f64>,
    pub score_sum: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MctsResult<A> {
    pub decision: Decision<A>,
    /// Root actions in enumeration order. Empty if the root was never visited.
    pub root_children: Vec<ChildSummaryV1<A>>,
    /// Completed simulations.
    pub iterations: u64,
    /// Tree nodes at termination, the root included.
    pub tree_size: usize,
    /// The ceiling that ended the search.
    pub exhaustion: Exhaustion,
}

/// MCTS engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mcts {
    policy: MctsPolicy,
}

impl Mcts {
    #[must_use]
    pub fn new(policy: MctsPolicy) -> Self {
        Self { policy }
    }

    #[must_use]
    pub fn policy(&self) -> &MctsPolicy {
        &self.policy
    }

    /// Recommend an action from `root`, with rollouts driven by a
    /// `ChaCha8Rng` seeded from `policy.seed`. Identical inputs give
    /// identical results.
    ///
    /// # Errors
    ///
    /// See [`search_with_rng`](Self::search_with_rng).
    pub fn search<D: EvaluateDomain>(
        &self,
        domain: &D,
        root: &D::State,
        fallback: D::Action,
    ) -> Result<MctsResult<D::Action>, SearchError> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.policy.seed);
        self.search_with_rng(domain, root, fallback, &mut rng)
    }

    /// [`search`](Self::search) with a caller-owned random source.
    ///
    /// # Errors
    ///
    /// - [`SearchError::InvalidConfig`] / [`SearchError::InvalidBudget`] for an
    ///   unusable policy, including a budget with no ceiling.
    /// - [`SearchError::DomainContract`] for a non-finite rollout reward.
    pub fn search_with_rng<D, R>(
        &self,
        domain: &D,
        root: &D::State,
        fallback: D::Action,
        rng: &mut R,
    ) -> Result<MctsResult<D::Action>, SearchError>
    where
        D: EvaluateDomain,
        R: Rng + ?Sized,
    {
        self.policy.validate()?;
        debug!(
            "mcts start: domain={} budget={:?} selection={}",
            domain.domain_id(),
            self.policy.budget,
            self.policy.selection.as_str()
        );

        let mut meter = self.policy.budget.start();
        let mut tree = Tree::new();
        meter.record_nodes(1);

        let exhaustion = loop {
            if let Some(exhaustion) = meter.exhausted() {
                break exhaustion;
            }
            let reward = self.simulate(domain, root, &mut tree, rng)?;
            meter.tick();
            meter.record_nodes(tree.len() as u64);
            trace!(
                "mcts iteration {}: reward={reward} tree_size={}",
                meter.iterations(),
                tree.len()
            );
        };

        let root_node = tree.root();
        let mut best: Option<(usize, f64)> = None;
        for (slot, stat) in root_node.children.iter().enumerate() {
            if let Some(mean) = stat.mean() {
                match best {
                    Some((_, incumbent)) if mean <= incumbent => {}
                    _ => best = Some((slot, mean)),
                }
            }
        }
        let decision = match best {
            Some((slot, _)) => Decision::Selected(root_node.children[slot].action.clone()),
            None => Decision::Fallback(fallback),
        };
        let root_children = root_node
            .children
            .iter()
            .map(|stat| ChildSummaryV1 {
                action: stat.action.clone(),
                visits: stat.visits,
                mean: stat.mean(),
                score_sum: stat.score_sum,
            })
            .collect();

        debug!(
            "mcts done: domain={} iterations={} tree_size={} exhaustion={} decision={decision:?} elapsed={:?}",
            domain.domain_id(),
            meter.iterations(),
            tree.len(),
            exhaustion.as_str(),
            meter.elapsed()
        );
        Ok(MctsResult {
            decision,
            root_children,
            iterations: meter.iterations(),
            tree_size: tree.len(),
            exhaustion,
        })
    }

    /// One select / expand / rollout / backpropagate pass. Returns the reward.
    fn simulate<D, R>(
        &self,
        domain: &D,
        root: &D::State,
        tree: &mut Tree<D::Action>,
        rng: &mut R,
    ) -> Result<f64, SearchError>
    where
        D: EvaluateDomain,
        R: Rng + ?Sized,
    {
        let policy = &self.policy;
        let mut state = root.clone();
        let mut node = NodeId::ROOT;
        let mut path: Vec<(NodeId, usize)> = Vec::new();

        loop {
            if domain.is_terminal(&state) {
                break;
            }
            if policy
                .max_tree_depth
                .is_some_and(|max| path.len() >= max as usize)
            {
                break;
            }
            if tree.get(node).children.is_empty() {
                tree.get_mut(node).children = domain
                    .available_actions(&state)
                    .into_iter()
                    .map(ChildStat::new)
                    .collect();
            }

            let current = tree.get_mut(node);
            if current.children.is_empty() {
                break;
            }
            current.visit_count += 1;
            let Some(slot) = policy.selection.select(
                &current.children,
                current.visit_count,
                policy.exploration,
            ) else {
                break;
            };
            let existing = current.children[slot].child;
            state = domain.apply_action(&state, &current.children[slot].action);
            path.push((node, slot));

            match existing {
                Some(child) => node = child,
                None => {
                    tree.expand(node, slot);
                    break;
                }
            }
        }

        let reward = check_score(self.rollout(domain, state, rng))?;
        for (node, slot) in path {
            tree.get_mut(node).children[slot].record(reward);
        }
        Ok(reward)
    }

    /// Random playout from `state`; returns the unchecked evaluation.
    fn rollout<D, R>(&self, domain: &D, mut state: D::State, rng: &mut R) -> f64
    where
        D: EvaluateDomain,
        R: Rng + ?Sized,
    {
        for _ in 0..self.policy.rollout_depth {
            if domain.is_terminal(&state) {
                break;
            }
            let actions = domain.available_actions(&state);
            if actions.is_empty() {
                break;
            }
            let pick = rng.gen_range(0..actions.len());
            state = domain.apply_action(&state, &actions[pick]);
        }
        domain.evaluate(&state)
    }
}
