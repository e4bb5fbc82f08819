//! Search policy types.
//!
//! Every engine takes its tunables as one plain, serializable value so a run
//! can be described in a config file and echoed back in its report. Policies
//! are validated once, before the first search step.

use lodestar_kernel::budget::BudgetV1;
use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// Default beam width.
pub const DEFAULT_BEAM_WIDTH: usize = 3;
/// Default number of beam rounds.
pub const DEFAULT_BEAM_DEPTH: u32 = 5;
/// Default UCB exploration constant (√2).
pub const DEFAULT_EXPLORATION: f64 = std::f64::consts::SQRT_2;
/// Default random-rollout length.
pub const DEFAULT_ROLLOUT_DEPTH: u32 = 5;
/// Default MCTS simulation count.
pub const DEFAULT_MCTS_ITERATIONS: u64 = 1000;

/// A* configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AStarPolicy {
    /// Iterations here are node expansions. Unbounded by default; a zero
    /// ceiling is rejected.
    pub budget: BudgetV1,
}

impl AStarPolicy {
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidBudget`] for a degenerate budget,
    /// including a zero iteration ceiling.
    pub fn validate(&self) -> Result<(), SearchError> {
        self.budget.validate_nonzero()?;
        Ok(())
    }
}

/// Beam search configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BeamPolicy {
    /// States retained per round. Must be at least 1.
    pub width: usize,
    /// Expansion rounds. Zero returns the initial state unchanged.
    pub depth: u32,
    /// Iterations here are rounds. A zero ceiling is rejected.
    pub budget: BudgetV1,
}

impl Default for BeamPolicy {
    fn default() -> Self {
        Self {
            width: DEFAULT_BEAM_WIDTH,
            depth: DEFAULT_BEAM_DEPTH,
            budget: BudgetV1::UNBOUNDED,
        }
    }
}

impl BeamPolicy {
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidConfig`] for a zero width and
    /// [`SearchError::InvalidBudget`] for a degenerate budget, including a
    /// zero iteration ceiling.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.width == 0 {
            return Err(SearchError::invalid_config("beam width must be at least 1"));
        }
        self.budget.validate_nonzero()?;
        Ok(())
    }
}

/// Which upper-confidence formula MCTS uses to pick a child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPolicy {
    /// `mean + c * sqrt(ln N / n)`.
    #[default]
    Ucb1,
    /// UCB1 with the exploration term scaled by observed reward variance.
    Ucb1Tuned,
}

impl SelectionPolicy {
    /// Stable lowercase tag used in reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ucb1 => "ucb1",
            Self::Ucb1Tuned => "ucb1_tuned",
        }
    }
}

/// MCTS configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MctsPolicy {
    /// Iterations here are simulations. At least one ceiling is required.
    pub budget: BudgetV1,
    /// UCB exploration constant `c`. Finite and non-negative.
    pub exploration: f64,
    /// Maximum random steps taken by a rollout.
    pub rollout_depth: u32,
    /// Optional cap on tree descent depth. Must be positive when set.
    pub max_tree_depth: Option<u32>,
    pub selection: SelectionPolicy,
    /// Seed for the rollout RNG used by [`Mcts::search`](crate::mcts::Mcts::search).
    pub seed: u64,
}

impl Default for MctsPolicy {
    fn default() -> Self {
        Self {
            budget: BudgetV1::iterations(DEFAULT_MCTS_ITERATIONS),
            exploration: DEFAULT_EXPLORATION,
            rollout_depth: DEFAULT_ROLLOUT_DEPTH,
            max_tree_depth: None,
            selection: SelectionPolicy::Ucb1,
            seed: 0,
        }
    }
}

impl MctsPolicy {
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidConfig`] for a negative or non-finite
    /// exploration constant or a zero tree depth, and
    /// [`SearchError::InvalidBudget`] for a degenerate or unbounded budget.
    pub fn validate(&self) -> Result<(), SearchError> {
        if !(self.exploration.is_finite() && self.exploration >= 0.0) {
            return Err(SearchError::invalid_config(format!(
                "exploration constant must be finite and non-negative, got {}",
                self.exploration
            )));
        }
        if self.max_tree_depth == Some(0) {
            return Err(SearchError::invalid_config(
                "max_tree_depth must be positive when set",
            ));
        }
        self.budget.validate_bounded()?;
        Ok(())
    }
}
