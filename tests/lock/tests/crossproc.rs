//! Cross-process determinism: the `search_fixture` binary must print
//! byte-identical output regardless of working directory, locale or
//! unrelated environment variables.

use std::path::Path;
use std::process::Command;

fn workspace_root() -> String {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("tests/ exists")
        .parent()
        .expect("workspace root exists")
        .to_string_lossy()
        .to_string()
}

fn run_variant(work_dir: &str, env_overrides: &[(&str, &str)]) -> String {
    let bin = env!("CARGO_BIN_EXE_search_fixture");

    let mut command = Command::new(bin);
    command.current_dir(work_dir);

    command
        .env_remove("LC_ALL")
        .env_remove("LC_COLLATE")
        .env_remove("LANG")
        .env_remove("LANGUAGE")
        .env_remove("RUST_LOG");

    for &(key, val) in env_overrides {
        command.env(key, val);
    }

    let output = command.output().unwrap_or_else(|e| {
        panic!("failed to spawn {bin} (work_dir={work_dir}, overrides={env_overrides:?}): {e}")
    });

    assert!(
        output.status.success(),
        "search_fixture exited with {}: stderr={}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );

    String::from_utf8(output.stdout).expect("stdout is valid UTF-8")
}

#[test]
fn crossproc_determinism_four_env_variants() {
    let root = workspace_root();
    let baseline = run_variant(&root, &[]);

    for line in [
        "graph_astar.outcome=found",
        "maze_astar.outcome=found",
        "dominant_arm_mcts.outcome=selected",
        "knapsack_beam.world_id=knapsack",
    ] {
        assert!(baseline.contains(line), "baseline output missing {line}");
    }
    assert_eq!(
        baseline.matches(".report_digest=sha256:").count(),
        6,
        "expected one report digest per scenario"
    );

    // Different cwd.
    let alt_cwd = std::env::temp_dir();
    let alt_cwd = alt_cwd.to_string_lossy();
    let variant_cwd = run_variant(&alt_cwd, &[]);
    assert_eq!(
        baseline, variant_cwd,
        "output differs when cwd changes from {root} to {alt_cwd}"
    );

    // Different locale env.
    let variant_locale = run_variant(&root, &[("LC_ALL", "C"), ("LANG", "C")]);
    assert_eq!(baseline, variant_locale, "output differs when LC_ALL=C LANG=C");

    // Spurious env vars, verbose logging included.
    let variant_noise = run_variant(
        &root,
        &[
            ("LODESTAR_NOISE", "should_not_matter"),
            ("TZ", "America/New_York"),
            ("HOME", "/nonexistent"),
            ("RUST_LOG", "trace"),
        ],
    );
    assert_eq!(baseline, variant_noise, "output differs with spurious env vars");
}

#[test]
fn crossproc_matches_in_process_digests() {
    let stdout = run_variant(&workspace_root(), &[]);
    for (name, report) in lock_tests::scenarios::run_all() {
        let line = format!("{name}.report_digest={}", report.digest().unwrap().as_str());
        assert!(stdout.contains(&line), "subprocess disagrees on {name}");
    }
}
