//! In-process determinism of the fixed scenarios.
//!
//! - Repeated runs yield identical report digests.
//! - A report written to disk reads back with the same digest.
//! - Reordering keys in a config file does not change any digest.
//! - Scenario answers stay where the fixtures say they are.

use lock_tests::scenarios::{fixed_scenarios, run_all, GRAPH_ASTAR};
use lodestar_harness::config::parse_config;
use lodestar_harness::report::{read_report_dir, write_report_dir};
use serde_json::json;

#[test]
fn ten_runs_yield_identical_digests() {
    let baseline: Vec<_> = run_all()
        .into_iter()
        .map(|(name, report)| (name, report.digest().unwrap()))
        .collect();
    for _ in 0..9 {
        let again: Vec<_> = run_all()
            .into_iter()
            .map(|(name, report)| (name, report.digest().unwrap()))
            .collect();
        assert_eq!(baseline, again);
    }
}

#[test]
fn report_dir_roundtrip_preserves_digest() {
    let dir = tempfile::tempdir().unwrap();
    for (name, report) in run_all() {
        let path = dir.path().join(name);
        let written = write_report_dir(&report, &path).unwrap();
        let (value, read) = read_report_dir(&path).unwrap();
        assert_eq!(written, report.digest().unwrap(), "{name}");
        assert_eq!(written, read, "{name}");
        assert_eq!(value, report.to_json(), "{name}");
    }
}

#[test]
fn key_order_does_not_change_digests() {
    let reordered = r#"{
        "strategy": {"astar": {}},
        "world": {"weighted_graph": {
            "coordinates": {
                "e": [6.0, 4.0], "d": [3.0, 4.0], "c": [0.0, 4.0],
                "b": [3.0, 0.0], "a": [0.0, 0.0]
            },
            "edges": [
                {"weight": 3.0, "to": "b", "from": "a"},
                {"weight": 4.0, "to": "c", "from": "a"},
                {"weight": 4.0, "to": "d", "from": "b"},
                {"weight": 3.0, "to": "d", "from": "c"},
                {"weight": 6.0, "to": "e", "from": "b"},
                {"weight": 3.0, "to": "e", "from": "d"}
            ],
            "undirected": true,
            "goal": "e",
            "start": "a"
        }}
    }"#;
    let a = parse_config(GRAPH_ASTAR).unwrap().run().unwrap();
    let b = parse_config(reordered).unwrap().run().unwrap();
    assert_eq!(a.world_digest, b.world_digest);
    assert_eq!(a.digest().unwrap(), b.digest().unwrap());
}

#[test]
fn scenario_answers() {
    let reports = run_all();
    let outcome = |name: &str| {
        reports
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, report)| report.outcome.clone())
            .unwrap()
    };

    let graph = outcome("graph_astar");
    assert_eq!(graph["cost"], "9");
    assert_eq!(graph["path"], json!(["a", "b", "e"]));

    assert_eq!(outcome("maze_astar")["cost"], "14");
    assert_eq!(outcome("knapsack_beam")["best"]["score"], "90");
    assert_eq!(
        outcome("dominant_arm_mcts"),
        json!({"kind": "selected", "action": 2})
    );
}

#[test]
fn scenario_names_are_unique() {
    let mut names: Vec<_> = fixed_scenarios().into_iter().map(|s| s.name).collect();
    let total = names.len();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), total);
}
