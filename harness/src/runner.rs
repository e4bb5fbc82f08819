//! Harness runner: runs one engine over one world and produces a
//! [`RunReportV1`].
//!
//! The runner uses ONLY engine APIs: `AStar::find_path`, `BeamSearch::search`,
//! `Mcts::search`. It does not implement any search logic itself.
//!
//! # Pipeline
//!
//! ```text
//! StrategyV1 → policy.validate() → engine call
//!   → outcome / stats JSON (floats as strings)
//!   → RunReportV1::new (fixture + strategy digests) → report digest
//! ```

use log::debug;
use lodestar_kernel::budget::BudgetV1;
use lodestar_kernel::contract::EvaluateDomain;
use lodestar_kernel::proof::canon::{float_value, CanonError};
use lodestar_search::astar::{AStar, PathOutcome};
use lodestar_search::beam::{BeamEntry, BeamSearch, BeamTermination};
use lodestar_search::error::SearchError;
use lodestar_search::mcts::{Decision, Mcts};
use lodestar_search::policy::{AStarPolicy, BeamPolicy, MctsPolicy};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

use crate::report::RunReportV1;
use crate::worlds::{DecisionWorld, DescribeWorld, GoalWorld, WorldError, WorldV1};

/// Error during a harness run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RunError {
    #[error(transparent)]
    Search(#[from] SearchError),
    #[error(transparent)]
    Canon(#[from] CanonError),
    #[error(transparent)]
    World(#[from] WorldError),
    /// The world lacks the capability the engine needs (e.g. a goal for A*).
    #[error("world {world} does not support strategy {strategy}")]
    UnsupportedStrategy {
        world: String,
        strategy: &'static str,
    },
}

/// The caller's engine choice with its policy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub enum StrategyV1 {
    #[serde(rename = "astar")]
    AStar(AStarPolicy),
    Beam(BeamPolicy),
    Mcts(MctsPolicy),
}

impl StrategyV1 {
    /// Stable lowercase tag used in reports.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::AStar(_) => "astar",
            Self::Beam(_) => "beam",
            Self::Mcts(_) => "mcts",
        }
    }

    /// Validate the wrapped policy.
    ///
    /// # Errors
    ///
    /// As the policy's own `validate`.
    pub fn validate(&self) -> Result<(), SearchError> {
        match self {
            Self::AStar(policy) => policy.validate(),
            Self::Beam(policy) => policy.validate(),
            Self::Mcts(policy) => policy.validate(),
        }
    }

    /// Canonical-JSON-safe snapshot: `{"kind": ..., "policy": {...}}`.
    #[must_use]
    pub fn snapshot(&self) -> Value {
        let policy = match self {
            Self::AStar(policy) => json!({"budget": budget_value(&policy.budget)}),
            Self::Beam(policy) => json!({
                "budget": budget_value(&policy.budget),
                "depth": policy.depth,
                "width": policy.width,
            }),
            Self::Mcts(policy) => json!({
                "budget": budget_value(&policy.budget),
                "exploration": float_value(policy.exploration),
                "max_tree_depth": policy.max_tree_depth,
                "rollout_depth": policy.rollout_depth,
                "seed": policy.seed,
                "selection": policy.selection.as_str(),
            }),
        };
        json!({"kind": self.kind(), "policy": policy})
    }
}

fn budget_value(budget: &BudgetV1) -> Value {
    json!({
        "max_iterations": budget.max_iterations,
        "max_nodes": budget.max_nodes,
        "time_limit_ms": budget.time_limit_ms,
    })
}

/// Run `strategy` over `world`.
///
/// # Errors
///
/// Returns [`RunError::UnsupportedStrategy`] when the world cannot serve
/// the engine, or any error from the engine or report assembly.
pub fn run_strategy(world: &WorldV1, strategy: &StrategyV1) -> Result<RunReportV1, RunError> {
    let report = match (world, strategy) {
        (WorldV1::WeightedGraph(w), StrategyV1::AStar(p)) => run_path(w, p),
        (WorldV1::Grid(w), StrategyV1::AStar(p)) => run_path(w, p),
        (WorldV1::Grid(w), StrategyV1::Beam(p)) => run_beam(w, p),
        (WorldV1::Grid(w), StrategyV1::Mcts(p)) => run_mcts(w, p),
        (WorldV1::DominantArm(w), StrategyV1::Beam(p)) => run_beam(w, p),
        (WorldV1::DominantArm(w), StrategyV1::Mcts(p)) => run_mcts(w, p),
        (WorldV1::Knapsack(w), StrategyV1::Beam(p)) => run_beam(w, p),
        (WorldV1::Knapsack(w), StrategyV1::Mcts(p)) => run_mcts(w, p),
        _ => Err(RunError::UnsupportedStrategy {
            world: world.world_id().to_string(),
            strategy: strategy.kind(),
        }),
    }?;
    debug!(
        "run done: world={} strategy={} outcome={}",
        report.world_id,
        strategy.kind(),
        report.outcome_kind()
    );
    Ok(report)
}

/// A* from the world's initial state to its goal.
///
/// # Errors
///
/// Engine or report assembly errors.
pub fn run_path<W: GoalWorld>(world: &W, policy: &AStarPolicy) -> Result<RunReportV1, RunError> {
    let result = AStar::new(*policy).find_path(world, &world.initial_state(), &world.goal())?;
    let outcome = match &result.outcome {
        PathOutcome::Found(path) => json!({
            "kind": "found",
            "cost": float_value(path.cost),
            "path": path.states.iter().map(|s| world.describe_state(s)).collect::<Vec<_>>(),
        }),
        PathOutcome::NoPath => json!({"kind": "no_path"}),
        PathOutcome::BudgetExhausted(exhaustion) => json!({
            "kind": "budget_exhausted",
            "exhaustion": exhaustion.as_str(),
        }),
    };
    let stats = result.stats;
    let stats = json!({
        "expansions": stats.expansions,
        "frontier_high_water": stats.frontier_high_water,
        "generated": stats.generated,
        "nodes": stats.nodes,
        "stale_discarded": stats.stale_discarded,
    });
    Ok(RunReportV1::new(
        world.domain_id(),
        &world.fixture(),
        StrategyV1::AStar(*policy).snapshot(),
        outcome,
        stats,
    )?)
}

/// Beam search from the world's initial state.
///
/// # Errors
///
/// Engine or report assembly errors.
pub fn run_beam<W: EvaluateDomain + DescribeWorld>(
    world: &W,
    policy: &BeamPolicy,
) -> Result<RunReportV1, RunError> {
    let result = BeamSearch::new(*policy).search(world, &world.initial_state())?;
    let entry = |e: &BeamEntry<W::State>| {
        json!({
            "order": e.order,
            "score": float_value(e.score),
            "state": world.describe_state(&e.state),
        })
    };
    let mut outcome = match result.termination {
        BeamTermination::DepthReached => json!({"kind": "depth_reached"}),
        BeamTermination::Collapsed { round } => json!({"kind": "collapsed", "round": round}),
        BeamTermination::BudgetExhausted(exhaustion) => json!({
            "kind": "budget_exhausted",
            "exhaustion": exhaustion.as_str(),
        }),
    };
    outcome["best"] = entry(&result.best);
    outcome["best_seen"] = entry(&result.best_seen);
    outcome["final_beam"] = result.final_beam.iter().map(entry).collect();

    let rounds: Vec<Value> = result
        .rounds
        .iter()
        .map(|r| {
            json!({
                "best_score": r.best_score.map(float_value),
                "candidates_generated": r.candidates_generated,
                "retained": r.retained,
                "round": r.round,
            })
        })
        .collect();
    Ok(RunReportV1::new(
        world.domain_id(),
        &world.fixture(),
        StrategyV1::Beam(*policy).snapshot(),
        outcome,
        json!({"rounds": rounds}),
    )?)
}

/// MCTS from the world's initial state, falling back to the world's default
/// action.
///
/// # Errors
///
/// Engine or report assembly errors.
pub fn run_mcts<W: DecisionWorld>(world: &W, policy: &MctsPolicy) -> Result<RunReportV1, RunError> {
    let result = Mcts::new(*policy).search(world, &world.initial_state(), world.fallback_action())?;
    let outcome = match &result.decision {
        Decision::Selected(action) => json!({
            "kind": "selected",
            "action": world.describe_action(action),
        }),
        Decision::Fallback(action) => json!({
            "kind": "fallback",
            "action": world.describe_action(action),
        }),
    };
    let root_children: Vec<Value> = result
        .root_children
        .iter()
        .map(|child| {
            json!({
                "action": world.describe_action(&child.action),
                "mean": child.mean.map(float_value),
                "score_sum": float_value(child.score_sum),
                "visits": child.visits,
            })
        })
        .collect();
    let stats = json!({
        "exhaustion": result.exhaustion.as_str(),
        "iterations": result.iterations,
        "root_children": root_children,
        "tree_size": result.tree_size,
    });
    Ok(RunReportV1::new(
        world.domain_id(),
        &world.fixture(),
        StrategyV1::Mcts(*policy).snapshot(),
        outcome,
        stats,
    )?)
}
