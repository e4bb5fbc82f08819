//! Upper-confidence scores for MCTS child selection.
//!
//! Unvisited children score `+inf`, so every action is tried once before any
//! is revisited. Selection scans children in enumeration order and only
//! replaces the incumbent on a strictly greater score, which makes the first
//! untried action win among several.

use crate::policy::SelectionPolicy;
use crate::tree::ChildStat;

impl SelectionPolicy {
    /// Score `stat` as a child of a node visited `parent_visits` times.
    ///
    /// `parent_visits` must already include the current simulation, so it
    /// is at least 1 and `ln` stays finite.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn score<A>(self, stat: &ChildStat<A>, parent_visits: u64, exploration: f64) -> f64 {
        let Some(mean) = stat.mean() else {
            return f64::INFINITY;
        };
        let visits_fraction = (parent_visits.max(1) as f64).ln() / stat.visits as f64;
        match self {
            Self::Ucb1 => mean + exploration * visits_fraction.sqrt(),
            Self::Ucb1Tuned => {
                let variance = stat.variance().unwrap_or(0.0);
                let spread = variance + exploration * visits_fraction.sqrt();
                mean + (spread.min(1.0) * visits_fraction).sqrt()
            }
        }
    }

    /// Slot of the best-scoring child; the first on ties. `None` when
    /// `children` is empty.
    #[must_use]
    pub fn select<A>(
        self,
        children: &[ChildStat<A>],
        parent_visits: u64,
        exploration: f64,
    ) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (slot, stat) in children.iter().enumerate() {
            let score = self.score(stat, parent_visits, exploration);
            match best {
                Some((_, incumbent)) if score <= incumbent => {}
                _ => best = Some((slot, score)),
            }
        }
        best.map(|(slot, _)| slot)
    }
}
