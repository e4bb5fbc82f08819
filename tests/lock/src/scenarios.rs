//! Fixed harness scenarios with known answers.
//!
//! The same list drives the in-process determinism tests and the
//! `search_fixture` binary, so both sides of the cross-process comparison
//! run exactly the same inputs.

use log::info;
use lodestar_harness::config::{parse_config, HarnessConfigV1};
use lodestar_harness::report::RunReportV1;

/// Undirected graph with coordinates; the cheapest route `a → b → e` costs 9.
pub const GRAPH_ASTAR: &str = r#"{
    "world": {"weighted_graph": {
        "start": "a",
        "goal": "e",
        "undirected": true,
        "edges": [
            {"from": "a", "to": "b", "weight": 3.0},
            {"from": "a", "to": "c", "weight": 4.0},
            {"from": "b", "to": "d", "weight": 4.0},
            {"from": "c", "to": "d", "weight": 3.0},
            {"from": "b", "to": "e", "weight": 6.0},
            {"from": "d", "to": "e", "weight": 3.0}
        ],
        "coordinates": {
            "a": [0.0, 0.0], "b": [3.0, 0.0], "c": [0.0, 4.0],
            "d": [3.0, 4.0], "e": [6.0, 4.0]
        }
    }},
    "strategy": {"astar": {}}
}"#;

/// Maze whose shortest route is 14 moves against a Manhattan distance of 12.
pub const MAZE_ROWS: [&str; 6] = [
    "S...#...",
    ".##.#.#.",
    ".#..#.#.",
    ".#.##.#.",
    "...#....",
    ".#...#.G",
];

/// Best packing takes items 1 and 3 for a value of 90.
pub const KNAPSACK_ITEMS: &str = r#"{
    "capacity": 10,
    "items": [
        {"weight": 5, "value": 10},
        {"weight": 4, "value": 40},
        {"weight": 6, "value": 30},
        {"weight": 3, "value": 50}
    ]
}"#;

/// A named harness configuration.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub name: &'static str,
    pub config: HarnessConfigV1,
}

fn maze_world() -> String {
    let rows: Vec<String> = MAZE_ROWS.iter().map(|row| format!("\"{row}\"")).collect();
    format!(r#"{{"grid": {{"rows": [{}]}}}}"#, rows.join(", "))
}

fn scenario(name: &'static str, text: &str) -> Scenario {
    let config = parse_config(text)
        .unwrap_or_else(|e| panic!("scenario {name} does not load: {e}"));
    Scenario { name, config }
}

/// Every fixed scenario, in a stable order.
///
/// # Panics
///
/// Panics if a built-in scenario fails to load; they are constants.
#[must_use]
pub fn fixed_scenarios() -> Vec<Scenario> {
    let maze = maze_world();
    vec![
        scenario("graph_astar", GRAPH_ASTAR),
        scenario(
            "maze_astar",
            &format!(r#"{{"world": {maze}, "strategy": {{"astar": {{}}}}}}"#),
        ),
        scenario(
            "maze_beam",
            &format!(r#"{{"world": {maze}, "strategy": {{"beam": {{"width": 3, "depth": 16}}}}}}"#),
        ),
        scenario(
            "maze_mcts_tuned",
            &format!(
                r#"{{"world": {maze}, "strategy": {{"mcts": {{
                    "budget": {{"max_iterations": 200}},
                    "selection": "ucb1_tuned",
                    "seed": 11
                }}}}}}"#
            ),
        ),
        scenario(
            "knapsack_beam",
            &format!(
                r#"{{"world": {{"knapsack": {KNAPSACK_ITEMS}}},
                    "strategy": {{"beam": {{"width": 4, "depth": 4}}}}}}"#
            ),
        ),
        scenario(
            "dominant_arm_mcts",
            r#"{
                "world": {"dominant_arm": {"arms": 4, "dominant": 2, "horizon": 3}},
                "strategy": {"mcts": {"budget": {"max_iterations": 300}, "seed": 7}}
            }"#,
        ),
    ]
}

/// Run every fixed scenario.
///
/// # Panics
///
/// Panics if a scenario fails to run.
#[must_use]
pub fn run_all() -> Vec<(&'static str, RunReportV1)> {
    fixed_scenarios()
        .into_iter()
        .map(|scenario| {
            let report = scenario
                .config
                .run()
                .unwrap_or_else(|e| panic!("scenario {} failed: {e}", scenario.name));
            info!("{}: {}", scenario.name, report.outcome_kind());
            (scenario.name, report)
        })
        .collect()
}
