//! Beam search properties on knapsack instances.

use lodestar_harness::worlds::knapsack::{ItemV1, Knapsack, Packing};
use lodestar_kernel::budget::BudgetV1;
use lodestar_kernel::contract::{EvaluateDomain, SearchDomain};
use lodestar_search::beam::{BeamSearch, BeamTermination};
use lodestar_search::policy::BeamPolicy;
use proptest::prelude::*;

fn arb_knapsack() -> impl Strategy<Value = Knapsack> {
    (
        1u32..30,
        prop::collection::vec((1u32..12, 0u32..50), 1..8),
    )
        .prop_map(|(capacity, items)| {
            let items = items
                .into_iter()
                .map(|(weight, value)| ItemV1 { weight, value })
                .collect();
            Knapsack::new(capacity, items).unwrap()
        })
}

fn policy(width: usize, depth: u32) -> BeamPolicy {
    BeamPolicy {
        width,
        depth,
        budget: BudgetV1::UNBOUNDED,
    }
}

#[allow(clippy::cast_possible_truncation)]
fn item_count(knapsack: &Knapsack) -> u32 {
    knapsack.items().len() as u32
}

proptest! {
    #[test]
    fn every_round_respects_width(knapsack in arb_knapsack(), width in 1usize..6, depth in 0u32..10) {
        let result = BeamSearch::new(policy(width, depth))
            .search(&knapsack, &knapsack.initial_state())
            .unwrap();
        for round in &result.rounds {
            prop_assert!(round.retained <= width, "round {} kept {}", round.round, round.retained);
        }
        prop_assert!(result.final_beam.len() <= width.max(1));
        prop_assert!(result.rounds.len() <= depth as usize);
        prop_assert!(result.best_seen.score >= result.best.score);
        prop_assert!(result.best_seen.score <= f64::from(knapsack.optimal_value()));
    }

    #[test]
    fn final_beam_is_sorted_best_first(knapsack in arb_knapsack(), width in 1usize..6) {
        let depth = item_count(&knapsack);
        let result = BeamSearch::new(policy(width, depth))
            .search(&knapsack, &knapsack.initial_state())
            .unwrap();
        for pair in result.final_beam.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
            if pair[0].score == pair[1].score {
                prop_assert!(pair[0].order < pair[1].order);
            }
        }
    }

    #[test]
    fn unpruned_beam_finds_the_optimum(knapsack in arb_knapsack()) {
        let depth = item_count(&knapsack);
        let width = 1usize << knapsack.items().len();
        let result = BeamSearch::new(policy(width, depth))
            .search(&knapsack, &knapsack.initial_state())
            .unwrap();
        prop_assert_eq!(result.best.score, f64::from(knapsack.optimal_value()));
        prop_assert_eq!(result.termination, BeamTermination::DepthReached);
    }
}

fn sample() -> Knapsack {
    Knapsack::new(
        10,
        vec![
            ItemV1 { weight: 5, value: 10 },
            ItemV1 { weight: 4, value: 40 },
            ItemV1 { weight: 6, value: 30 },
            ItemV1 { weight: 3, value: 50 },
        ],
    )
    .unwrap()
}

#[test_log::test]
fn depth_zero_returns_the_initial_state() {
    let knapsack = sample();
    let initial = knapsack.initial_state();
    let result = BeamSearch::new(policy(3, 0)).search(&knapsack, &initial).unwrap();
    assert_eq!(result.state(), &initial);
    assert_eq!(result.best.score, knapsack.evaluate(&initial));
    assert!(result.rounds.is_empty());
    assert_eq!(result.termination, BeamTermination::DepthReached);
}

#[test]
fn rounds_past_the_last_item_collapse() {
    let knapsack = sample();
    let result = BeamSearch::new(policy(16, 6))
        .search(&knapsack, &knapsack.initial_state())
        .unwrap();
    assert_eq!(result.termination, BeamTermination::Collapsed { round: 4 });
    assert_eq!(result.best.score, 90.0);
    let best: &Packing = result.state();
    assert_eq!(best.taken, vec![1, 3]);
}

#[test]
fn width_one_is_greedy() {
    let knapsack = sample();
    let result = BeamSearch::new(policy(1, 4))
        .search(&knapsack, &knapsack.initial_state())
        .unwrap();
    // Greedy takes item 0 first and is then shut out of the 40 + 50 packing.
    assert!(result.best.score < 90.0);
    assert!(result.rounds.iter().all(|r| r.retained == 1));
}
