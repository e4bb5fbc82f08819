//! Domain collaborator contract.
//!
//! Engines never know what a state or an action *is*. Everything they learn
//! about the search space comes through these traits, supplied by the caller.
//!
//! # Contract
//!
//! - `available_actions` must be deterministic: same state, same actions, same
//!   order. Tie-breaking in every engine relies on enumeration order.
//! - An empty action list signals a terminal state or a dead end.
//! - `apply_action` is a pure transition. It is only ever called with an action
//!   taken from the most recent `available_actions` result for that state.
//!   Domains may `assert!` this; calling it with a foreign action is a
//!   programming error, not a search outcome.
//! - States are never mutated by the engines.

use std::fmt::Debug;
use std::hash::Hash;

/// The base collaborator: state space, actions, and transitions.
pub trait SearchDomain {
    /// One point in the search space. `Hash` gives A* a stable map key.
    type State: Clone + Eq + Hash + Debug;
    /// A transition available from a state.
    type Action: Clone + PartialEq + Debug;

    /// Stable identifier used in reports and log lines.
    fn domain_id(&self) -> &str;

    /// The state a search starts from when the caller does not supply one.
    fn initial_state(&self) -> Self::State;

    /// Whether no further transitions should be explored from `state`.
    fn is_terminal(&self, state: &Self::State) -> bool;

    /// Enumerate the legal actions from `state` in a deterministic order.
    fn available_actions(&self, state: &Self::State) -> Vec<Self::Action>;

    /// Apply `action` to `state`, producing the successor.
    fn apply_action(&self, state: &Self::State, action: &Self::Action) -> Self::State;
}

/// Cost model used by A* and uniform-cost search.
pub trait PathDomain: SearchDomain {
    /// Cost of the transition `from -> to`. Must be finite and non-negative.
    fn edge_cost(&self, from: &Self::State, to: &Self::State) -> f64;

    /// Estimated remaining cost from `state` to `goal`.
    ///
    /// Optimality of A* is only guaranteed when this never overestimates the
    /// true remaining cost (admissible). This is not checked; only a zero
    /// estimate at the goal itself is verified before search.
    fn heuristic(&self, state: &Self::State, goal: &Self::State) -> f64;
}

/// Scoring model used by beam search and MCTS. Higher is better.
pub trait EvaluateDomain: SearchDomain {
    /// Score `state`. Must be finite.
    fn evaluate(&self, state: &Self::State) -> f64;
}

/// Successors of `state` in enumeration order, paired with the producing action.
///
/// Convenience for engines that expand every action of a state at once.
pub fn successors<D: SearchDomain + ?Sized>(
    domain: &D,
    state: &D::State,
) -> Vec<(D::Action, D::State)> {
    domain
        .available_actions(state)
        .into_iter()
        .map(|action| {
            let next = domain.apply_action(state, &action);
            (action, next)
        })
        .collect()
}
