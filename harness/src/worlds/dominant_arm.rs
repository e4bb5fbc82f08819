//! Sanity domain for MCTS: a fixed-length sequence of arm pulls where the
//! reward is the payoff of the *first* arm pulled.
//!
//! One arm pays strictly more than every other, so any search that samples
//! each root action enough times must recommend it.

use lodestar_kernel::contract::{EvaluateDomain, SearchDomain};
use lodestar_kernel::proof::canon::float_value;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::{DecisionWorld, DescribeWorld, WorldError};

/// Payoff of the dominant arm; every other arm pays nothing.
pub const DOMINANT_PAYOFF: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DominantArmSpecV1 {
    pub arms: usize,
    pub dominant: usize,
    /// Pulls per episode. At least 1.
    pub horizon: u32,
}

/// Position in an episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Episode {
    pub first: Option<usize>,
    pub pulls: u32,
}

#[derive(Debug, Clone)]
pub struct DominantArm {
    payoffs: Vec<f64>,
    horizon: u32,
}

impl DominantArm {
    /// `arms` arms, of which `dominant` pays [`DOMINANT_PAYOFF`].
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::Invalid`] for fewer than two arms, an
    /// out-of-range dominant arm, or a zero horizon.
    pub fn new(arms: usize, dominant: usize, horizon: u32) -> Result<Self, WorldError> {
        if arms < 2 {
            return Err(WorldError::invalid("dominant_arm needs at least two arms"));
        }
        if dominant >= arms {
            return Err(WorldError::invalid(format!(
                "dominant arm {dominant} out of range for {arms} arms"
            )));
        }
        if horizon == 0 {
            return Err(WorldError::invalid("dominant_arm horizon must be positive"));
        }
        let payoffs = (0..arms)
            .map(|arm| if arm == dominant { DOMINANT_PAYOFF } else { 0.0 })
            .collect();
        Ok(Self { payoffs, horizon })
    }

    /// # Errors
    ///
    /// As [`new`](Self::new).
    pub fn from_spec(spec: &DominantArmSpecV1) -> Result<Self, WorldError> {
        Self::new(spec.arms, spec.dominant, spec.horizon)
    }

    /// Index of the best-paying arm.
    #[must_use]
    pub fn dominant(&self) -> usize {
        self.payoffs
            .iter()
            .position(|payoff| *payoff >= DOMINANT_PAYOFF)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn arm_count(&self) -> usize {
        self.payoffs.len()
    }
}

impl SearchDomain for DominantArm {
    type State = Episode;
    type Action = usize;

    fn domain_id(&self) -> &str {
        "dominant_arm"
    }

    fn initial_state(&self) -> Episode {
        Episode {
            first: None,
            pulls: 0,
        }
    }

    fn is_terminal(&self, state: &Episode) -> bool {
        state.pulls >= self.horizon
    }

    fn available_actions(&self, state: &Episode) -> Vec<usize> {
        if self.is_terminal(state) {
            Vec::new()
        } else {
            (0..self.payoffs.len()).collect()
        }
    }

    fn apply_action(&self, state: &Episode, action: &usize) -> Episode {
        assert!(*action < self.payoffs.len(), "arm {action} does not exist");
        Episode {
            first: state.first.or(Some(*action)),
            pulls: state.pulls + 1,
        }
    }
}

impl EvaluateDomain for DominantArm {
    fn evaluate(&self, state: &Episode) -> f64 {
        state.first.map_or(0.0, |arm| self.payoffs[arm])
    }
}

impl DescribeWorld for DominantArm {
    fn describe_state(&self, state: &Episode) -> Value {
        json!({"first": state.first, "pulls": state.pulls})
    }

    fn describe_action(&self, action: &usize) -> Value {
        json!(action)
    }

    fn fixture(&self) -> Value {
        let payoffs: Vec<Value> = self.payoffs.iter().map(|p| float_value(*p)).collect();
        json!({"horizon": self.horizon, "payoffs": payoffs})
    }
}

impl DecisionWorld for DominantArm {
    fn fallback_action(&self) -> usize {
        0
    }
}
