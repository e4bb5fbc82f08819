//! Budget/termination controller shared by every engine.
//!
//! A [`BudgetV1`] declares up to three ceilings: iterations (expansions for
//! A*, rounds for beam, simulations for MCTS), wall-clock time, and arena size.
//! [`BudgetV1::start`] produces a [`BudgetMeter`] owned by exactly one search
//! call. The meter is only consulted between iterations; nothing interrupts a
//! search mid-iteration.
//!
//! Ceilings are checked in a fixed order (iterations, nodes, wall clock) so
//! that the deterministic ceilings win whenever several trip at once.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Declared resource ceilings for one search call. `None` means "no ceiling".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BudgetV1 {
    /// Maximum iterations. `Some(0)` runs nothing; only MCTS accepts it (see
    /// [`BudgetV1::validate_nonzero`]).
    pub max_iterations: Option<u64>,
    /// Wall-clock limit in milliseconds.
    pub time_limit_ms: Option<u64>,
    /// Maximum number of nodes the engine may hold in its arena.
    pub max_nodes: Option<u64>,
}

/// Rejected budget declaration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BudgetError {
    #[error("time limit must be positive")]
    ZeroTimeLimit,
    #[error("node ceiling must be positive")]
    ZeroNodeCeiling,
    #[error("iteration ceiling must be positive")]
    ZeroIterations,
    #[error("budget declares no ceiling; search would never terminate")]
    Unbounded,
}

/// Which ceiling stopped a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Exhaustion {
    Iterations,
    Nodes,
    WallClock,
}

impl Exhaustion {
    /// Stable lowercase tag used in reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Iterations => "iterations",
            Self::Nodes => "nodes",
            Self::WallClock => "wall_clock",
        }
    }
}

impl BudgetV1 {
    /// No ceilings at all.
    pub const UNBOUNDED: Self = Self {
        max_iterations: None,
        time_limit_ms: None,
        max_nodes: None,
    };

    /// Iteration ceiling only.
    #[must_use]
    pub const fn iterations(max_iterations: u64) -> Self {
        Self {
            max_iterations: Some(max_iterations),
            time_limit_ms: None,
            max_nodes: None,
        }
    }

    /// Wall-clock ceiling only.
    #[must_use]
    pub const fn time_limit(ms: u64) -> Self {
        Self {
            max_iterations: None,
            time_limit_ms: Some(ms),
            max_nodes: None,
        }
    }

    /// Add or replace the node ceiling.
    #[must_use]
    pub const fn with_max_nodes(mut self, max_nodes: u64) -> Self {
        self.max_nodes = Some(max_nodes);
        self
    }

    /// Add or replace the wall-clock ceiling.
    #[must_use]
    pub const fn with_time_limit(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Whether at least one ceiling is declared.
    #[must_use]
    pub const fn is_bounded(&self) -> bool {
        self.max_iterations.is_some() || self.time_limit_ms.is_some() || self.max_nodes.is_some()
    }

    /// Reject degenerate ceilings.
    ///
    /// # Errors
    ///
    /// Returns [`BudgetError::ZeroTimeLimit`] or [`BudgetError::ZeroNodeCeiling`]
    /// for a zero wall-clock or node ceiling. A zero iteration ceiling is legal.
    pub fn validate(&self) -> Result<(), BudgetError> {
        if self.time_limit_ms == Some(0) {
            return Err(BudgetError::ZeroTimeLimit);
        }
        if self.max_nodes == Some(0) {
            return Err(BudgetError::ZeroNodeCeiling);
        }
        Ok(())
    }

    /// [`validate`](Self::validate), and additionally require at least one ceiling.
    ///
    /// # Errors
    ///
    /// Returns [`BudgetError::Unbounded`] when no ceiling is declared, or any
    /// error from [`validate`](Self::validate).
    pub fn validate_bounded(&self) -> Result<(), BudgetError> {
        self.validate()?;
        if !self.is_bounded() {
            return Err(BudgetError::Unbounded);
        }
        Ok(())
    }

    /// [`validate`](Self::validate), and additionally reject a zero iteration
    /// ceiling. Used by engines for which zero iterations can only produce a
    /// degenerate result.
    ///
    /// # Errors
    ///
    /// Returns [`BudgetError::ZeroIterations`], or any error from
    /// [`validate`](Self::validate).
    pub fn validate_nonzero(&self) -> Result<(), BudgetError> {
        self.validate()?;
        if self.max_iterations == Some(0) {
            return Err(BudgetError::ZeroIterations);
        }
        Ok(())
    }

    /// Start metering a search call now.
    #[must_use]
    pub fn start(&self) -> BudgetMeter {
        BudgetMeter {
            budget: *self,
            started: Instant::now(),
            iterations: 0,
            nodes: 0,
        }
    }
}

/// Per-call budget state. Never shared between search calls.
#[derive(Debug, Clone)]
pub struct BudgetMeter {
    budget: BudgetV1,
    started: Instant,
    iterations: u64,
    nodes: u64,
}

impl BudgetMeter {
    /// Count one completed iteration.
    pub fn tick(&mut self) {
        self.iterations = self.iterations.saturating_add(1);
    }

    /// Record the engine's current arena size.
    pub fn record_nodes(&mut self, nodes: u64) {
        self.nodes = nodes;
    }

    /// Iterations completed so far.
    #[must_use]
    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    /// Time since [`BudgetV1::start`].
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// The first ceiling that has been reached, if any.
    #[must_use]
    pub fn exhausted(&self) -> Option<Exhaustion> {
        self.exhausted_at(Instant::now())
    }

    /// [`exhausted`](Self::exhausted) evaluated against an explicit clock reading.
    #[must_use]
    pub fn exhausted_at(&self, now: Instant) -> Option<Exhaustion> {
        if let Some(max) = self.budget.max_iterations {
            if self.iterations >= max {
                return Some(Exhaustion::Iterations);
            }
        }
        if let Some(max) = self.budget.max_nodes {
            if self.nodes >= max {
                return Some(Exhaustion::Nodes);
            }
        }
        if let Some(ms) = self.budget.time_limit_ms {
            if now.saturating_duration_since(self.started) >= Duration::from_millis(ms) {
                return Some(Exhaustion::WallClock);
            }
        }
        None
    }
}
