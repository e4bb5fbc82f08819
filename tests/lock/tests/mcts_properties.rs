//! MCTS properties on the dominant-arm world: convergence, exploration of
//! every root action, fallback on an empty budget, and determinism.

use lodestar_harness::worlds::dominant_arm::DominantArm;
use lodestar_kernel::budget::{BudgetV1, Exhaustion};
use lodestar_kernel::contract::SearchDomain;
use lodestar_search::mcts::{Decision, Mcts};
use lodestar_search::policy::{MctsPolicy, SelectionPolicy};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn policy(iterations: u64, seed: u64, selection: SelectionPolicy) -> MctsPolicy {
    MctsPolicy {
        budget: BudgetV1::iterations(iterations),
        seed,
        selection,
        ..MctsPolicy::default()
    }
}

fn arb_selection() -> impl Strategy<Value = SelectionPolicy> {
    prop_oneof![Just(SelectionPolicy::Ucb1), Just(SelectionPolicy::Ucb1Tuned)]
}

/// `(arms, dominant)` with `dominant < arms`.
fn arb_arms() -> impl Strategy<Value = (usize, usize)> {
    (2usize..8).prop_flat_map(|arms| (Just(arms), 0..arms))
}

proptest! {
    #[test]
    fn converges_on_the_dominant_arm(
        (arms, dominant) in arb_arms(),
        horizon in 1u32..5,
        extra in 0u64..200,
        seed in any::<u64>(),
        selection in arb_selection(),
    ) {
        let world = DominantArm::new(arms, dominant, horizon).unwrap();
        let iterations = arms as u64 + extra;
        let result = Mcts::new(policy(iterations, seed, selection))
            .search(&world, &world.initial_state(), 0)
            .unwrap();
        prop_assert_eq!(result.decision, Decision::Selected(dominant));
    }

    #[test]
    fn every_root_action_is_tried(
        (arms, dominant) in arb_arms(),
        extra in 0u64..50,
        seed in any::<u64>(),
    ) {
        let world = DominantArm::new(arms, dominant, 3).unwrap();
        let iterations = arms as u64 + extra;
        let result = Mcts::new(policy(iterations, seed, SelectionPolicy::Ucb1))
            .search(&world, &world.initial_state(), 0)
            .unwrap();
        prop_assert_eq!(result.root_children.len(), arms);
        prop_assert!(result.root_children.iter().all(|child| child.visits >= 1));
        let total: u64 = result.root_children.iter().map(|c| c.visits).sum();
        prop_assert_eq!(total, iterations);
    }

    #[test]
    fn identical_seed_gives_identical_result(seed in any::<u64>(), iterations in 0u64..100) {
        let world = DominantArm::new(5, 1, 4).unwrap();
        let engine = Mcts::new(policy(iterations, seed, SelectionPolicy::Ucb1Tuned));
        let a = engine.search(&world, &world.initial_state(), 0).unwrap();
        let b = engine.search(&world, &world.initial_state(), 0).unwrap();
        prop_assert_eq!(a, b);
    }
}

#[test_log::test]
fn budget_equal_to_action_count_visits_each_child_once() {
    let world = DominantArm::new(6, 4, 3).unwrap();
    let result = Mcts::new(policy(6, 0, SelectionPolicy::Ucb1))
        .search(&world, &world.initial_state(), 0)
        .unwrap();
    let visits: Vec<u64> = result.root_children.iter().map(|c| c.visits).collect();
    assert_eq!(visits, vec![1; 6]);
    assert_eq!(result.decision, Decision::Selected(4));
}

#[test]
fn zero_iterations_returns_the_fallback() {
    let world = DominantArm::new(3, 2, 2).unwrap();
    let result = Mcts::new(policy(0, 0, SelectionPolicy::Ucb1))
        .search(&world, &world.initial_state(), 1)
        .unwrap();
    assert_eq!(result.decision, Decision::Fallback(1));
    assert_eq!(result.iterations, 0);
    assert_eq!(result.exhaustion, Exhaustion::Iterations);
    assert!(result.root_children.is_empty());
}

#[test]
fn terminal_root_returns_the_fallback() {
    let world = DominantArm::new(3, 2, 1).unwrap();
    let done = world.apply_action(&world.initial_state(), &0);
    assert!(world.is_terminal(&done));
    let result = Mcts::new(policy(50, 0, SelectionPolicy::Ucb1))
        .search(&world, &done, 2)
        .unwrap();
    assert!(result.decision.is_fallback());
    assert_eq!(result.decision.into_action(), 2);
}

#[test]
fn caller_rng_matches_seeded_search() {
    let world = DominantArm::new(4, 0, 3).unwrap();
    let engine = Mcts::new(policy(80, 21, SelectionPolicy::Ucb1));
    let seeded = engine.search(&world, &world.initial_state(), 0).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(21);
    let explicit = engine
        .search_with_rng(&world, &world.initial_state(), 0, &mut rng)
        .unwrap();
    assert_eq!(seeded, explicit);
}

#[test]
fn unbounded_budget_is_rejected() {
    let world = DominantArm::new(3, 0, 2).unwrap();
    let engine = Mcts::new(MctsPolicy {
        budget: BudgetV1::UNBOUNDED,
        ..MctsPolicy::default()
    });
    assert!(engine.search(&world, &world.initial_state(), 0).is_err());
}
