//! Typed search errors.
//!
//! `SearchError` covers rejected configuration (returned before any search
//! step is taken) and domain contract violations (returned as soon as the
//! offending value is observed). Running out of budget or finding nothing is
//! never an error; those are outcome variants.

use lodestar_kernel::budget::BudgetError;
use thiserror::Error;

/// Typed failure for a search call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// A policy or call argument is unusable.
    #[error("invalid search configuration: {detail}")]
    InvalidConfig { detail: String },
    /// The declared budget is unusable.
    #[error("invalid budget: {0}")]
    InvalidBudget(#[from] BudgetError),
    /// The domain returned a value outside its contract.
    #[error("domain contract violated: {detail}")]
    DomainContract { detail: String },
}

impl SearchError {
    pub(crate) fn invalid_config(detail: impl Into<String>) -> Self {
        Self::InvalidConfig {
            detail: detail.into(),
        }
    }

    pub(crate) fn domain_contract(detail: impl Into<String>) -> Self {
        Self::DomainContract {
            detail: detail.into(),
        }
    }
}

/// Fold `-0.0` into `0.0`. Engines order values with [`f64::total_cmp`],
/// which would otherwise rank two equal zeros apart.
pub(crate) fn unsigned_zero(value: f64) -> f64 {
    if value == 0.0 {
        0.0
    } else {
        value
    }
}

/// Accept a finite, non-negative cost or estimate.
pub(crate) fn check_cost(value: f64, what: &str) -> Result<f64, SearchError> {
    if value.is_finite() && value >= 0.0 {
        Ok(unsigned_zero(value))
    } else {
        Err(SearchError::domain_contract(format!(
            "{what} must be finite and non-negative, got {value}"
        )))
    }
}

/// Accept a finite evaluation score.
pub(crate) fn check_score(value: f64) -> Result<f64, SearchError> {
    if value.is_finite() {
        Ok(unsigned_zero(value))
    } else {
        Err(SearchError::domain_contract(format!(
            "evaluate must return a finite score, got {value}"
        )))
    }
}
