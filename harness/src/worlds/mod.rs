//! Sample worlds for tests, fixtures and benchmarks.
//!
//! None of these is part of the search core; they exist to exercise it.
//! [`WorldSpecV1`] is the serializable description a config file carries and
//! [`WorldV1`] the built, validated world.

pub mod dominant_arm;
pub mod grid;
pub mod knapsack;
pub mod weighted_graph;

use lodestar_kernel::contract::{EvaluateDomain, PathDomain, SearchDomain};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use self::dominant_arm::{DominantArm, DominantArmSpecV1};
use self::grid::{GridSpecV1, GridWorld};
use self::knapsack::{Knapsack, KnapsackSpecV1};
use self::weighted_graph::{GraphSpecV1, WeightedGraph};

/// Rejected world definition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorldError {
    #[error("invalid world definition: {detail}")]
    Invalid { detail: String },
    #[error("world JSON does not parse: {detail}")]
    Parse { detail: String },
}

impl WorldError {
    pub(crate) fn invalid(detail: impl Into<String>) -> Self {
        Self::Invalid {
            detail: detail.into(),
        }
    }
}

/// How a world renders itself into a run report.
///
/// Every value returned here must be accepted by the kernel's canonical JSON
/// writer: floats go through `canon::float_value`.
pub trait DescribeWorld: SearchDomain {
    fn describe_state(&self, state: &Self::State) -> Value;
    fn describe_action(&self, action: &Self::Action) -> Value;
    /// The full world definition, hashed into the report.
    fn fixture(&self) -> Value;
}

/// A world with a designated goal, for path search.
pub trait GoalWorld: PathDomain + DescribeWorld {
    fn goal(&self) -> Self::State;
}

/// A world with a default action, for MCTS.
pub trait DecisionWorld: EvaluateDomain + DescribeWorld {
    /// Returned when MCTS never simulates a root action.
    fn fallback_action(&self) -> Self::Action;
}

/// Serializable world description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub enum WorldSpecV1 {
    WeightedGraph(GraphSpecV1),
    Grid(GridSpecV1),
    DominantArm(DominantArmSpecV1),
    Knapsack(KnapsackSpecV1),
}

impl WorldSpecV1 {
    /// Validate and build the world.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::Invalid`] when the description is inconsistent.
    pub fn build(&self) -> Result<WorldV1, WorldError> {
        Ok(match self {
            Self::WeightedGraph(spec) => WorldV1::WeightedGraph(WeightedGraph::from_spec(spec)?),
            Self::Grid(spec) => WorldV1::Grid(GridWorld::from_spec(spec)?),
            Self::DominantArm(spec) => WorldV1::DominantArm(DominantArm::from_spec(spec)?),
            Self::Knapsack(spec) => WorldV1::Knapsack(Knapsack::from_spec(spec)?),
        })
    }
}

/// A built sample world.
#[derive(Debug, Clone)]
pub enum WorldV1 {
    WeightedGraph(WeightedGraph),
    Grid(GridWorld),
    DominantArm(DominantArm),
    Knapsack(Knapsack),
}

impl WorldV1 {
    #[must_use]
    pub fn world_id(&self) -> &str {
        match self {
            Self::WeightedGraph(world) => world.domain_id(),
            Self::Grid(world) => world.domain_id(),
            Self::DominantArm(world) => world.domain_id(),
            Self::Knapsack(world) => world.domain_id(),
        }
    }
}
