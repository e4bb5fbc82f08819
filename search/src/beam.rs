//! Depth-bounded beam search.
//!
//! Each round expands every state in the beam by every legal action, scores
//! the successors with [`EvaluateDomain::evaluate`], and keeps the best
//! `width` of the pooled candidates. Memory stays O(width) per round,
//! where A* keeps every discovered state; the price is that the answer is
//! greedy and can miss the optimum a wider beam would find.
//!
//! Ties in score keep generation order: candidates are generated beam entry
//! by beam entry, action by action in enumeration order, and the sort is
//! stable.

use log::{debug, trace};
use lodestar_kernel::budget::Exhaustion;
use lodestar_kernel::contract::EvaluateDomain;

use crate::error::{check_score, SearchError};
use crate::policy::BeamPolicy;

/// A scored state in the beam.
#[derive(Debug, Clone, PartialEq)]
pub struct BeamEntry<S> {
    pub score: f64,
    pub state: S,
    /// Generation counter; the initial state is 0.
    pub order: u64,
}

/// One round of the audit log.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeamRoundV1 {
    /// Zero-based round index.
    pub round: u32,
    pub candidates_generated: u64,
    /// Entries kept after truncation. Never exceeds the beam width.
    pub retained: usize,
    /// Best retained score, `None` when the round collapsed.
    pub best_score: Option<f64>,
}

/// Why a beam search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeamTermination {
    /// All configured rounds ran.
    DepthReached,
    /// Round `round` produced no candidates; the previous beam is returned.
    Collapsed { round: u32 },
    /// A budget ceiling stopped the search between rounds.
    BudgetExhausted(Exhaustion),
}

#[derive(Debug, Clone, PartialEq)]
pub struct BeamResult<S> {
    /// Best entry of the final beam.
    pub best: BeamEntry<S>,
    /// The final beam, best first.
    pub final_beam: Vec<BeamEntry<S>>,
    /// Best entry retained in any round, the initial state included.
    pub best_seen: BeamEntry<S>,
    pub rounds: Vec<BeamRoundV1>,
    pub termination: BeamTermination,
}

impl<S> BeamResult<S> {
    /// The state the search settled on.
    #[must_use]
    pub fn state(&self) -> &S {
        &self.best.state
    }
}

/// Beam search engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct BeamSearch {
    policy: BeamPolicy,
}

impl BeamSearch {
    #[must_use]
    pub fn new(policy: BeamPolicy) -> Self {
        Self { policy }
    }

    #[must_use]
    pub fn policy(&self) -> &BeamPolicy {
        &self.policy
    }

    /// Run up to `policy.depth` rounds from `initial`.
    ///
    /// Terminal states contribute no candidates.
    ///
    /// # Errors
    ///
    /// - [`SearchError::InvalidConfig`] / [`SearchError::InvalidBudget`] for an
    ///   unusable policy.
    /// - [`SearchError::DomainContract`] for a non-finite evaluation.
    pub fn search<D: EvaluateDomain>(
        &self,
        domain: &D,
        initial: &D::State,
    ) -> Result<BeamResult<D::State>, SearchError> {
        self.policy.validate()?;
        let width = self.policy.width;
        debug!(
            "beam start: domain={} width={width} depth={}",
            domain.domain_id(),
            self.policy.depth
        );

        let mut meter = self.policy.budget.start();
        let root = BeamEntry {
            score: check_score(domain.evaluate(initial))?,
            state: initial.clone(),
            order: 0,
        };
        let mut next_order: u64 = 1;
        let mut best_seen = root.clone();
        let mut beam = vec![root];
        let mut rounds = Vec::new();
        meter.record_nodes(1);

        let mut termination = BeamTermination::DepthReached;
        for round in 0..self.policy.depth {
            if let Some(exhaustion) = meter.exhausted() {
                termination = BeamTermination::BudgetExhausted(exhaustion);
                break;
            }

            let mut pool = Vec::new();
            for entry in &beam {
                if domain.is_terminal(&entry.state) {
                    continue;
                }
                for action in domain.available_actions(&entry.state) {
                    let state = domain.apply_action(&entry.state, &action);
                    let score = check_score(domain.evaluate(&state))?;
                    pool.push(BeamEntry {
                        score,
                        state,
                        order: next_order,
                    });
                    next_order += 1;
                }
            }
            let generated = pool.len() as u64;
            meter.tick();

            if pool.is_empty() {
                rounds.push(BeamRoundV1 {
                    round,
                    candidates_generated: 0,
                    retained: 0,
                    best_score: None,
                });
                termination = BeamTermination::Collapsed { round };
                break;
            }

            pool.sort_by(|a, b| b.score.total_cmp(&a.score));
            pool.truncate(width);
            if pool[0].score > best_seen.score {
                best_seen = pool[0].clone();
            }
            trace!(
                "beam round {round}: generated={generated} retained={} best={}",
                pool.len(),
                pool[0].score
            );
            rounds.push(BeamRoundV1 {
                round,
                candidates_generated: generated,
                retained: pool.len(),
                best_score: Some(pool[0].score),
            });
            beam = pool;
            meter.record_nodes(beam.len() as u64);
        }

        // The beam is never empty: it starts with the initial state and is
        // only replaced by a non-empty pool.
        let best = beam[0].clone();
        debug!(
            "beam done: domain={} termination={termination:?} best={} elapsed={:?}",
            domain.domain_id(),
            best.score,
            meter.elapsed()
        );
        Ok(BeamResult {
            best,
            final_beam: beam,
            best_seen,
            rounds,
            termination,
        })
    }
}
