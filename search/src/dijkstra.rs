//! Uniform-cost search: A* with a zero heuristic.
//!
//! Used as the optimality baseline in tests and benchmarks. Always optimal
//! for non-negative edge costs, at the price of expanding every state
//! cheaper than the goal.

use lodestar_kernel::budget::BudgetV1;
use lodestar_kernel::contract::PathDomain;

use crate::astar::{AStar, AStarResult};
use crate::error::SearchError;
use crate::policy::AStarPolicy;

/// Least-cost path from `start` to `goal`, ignoring the domain heuristic.
///
/// # Errors
///
/// Same as [`AStar::find_path_with`], minus the heuristic checks.
pub fn shortest_path<D: PathDomain>(
    domain: &D,
    start: &D::State,
    goal: &D::State,
    budget: BudgetV1,
) -> Result<AStarResult<D::State>, SearchError> {
    AStar::new(AStarPolicy { budget }).find_path_with(domain, start, goal, |_, _| 0.0)
}
