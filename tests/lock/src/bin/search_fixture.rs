//! Binary that runs every fixed scenario through the harness and prints
//! deterministic output lines for cross-process verification.
//!
//! Usage: `search_fixture`
//!
//! Output: `<scenario>.<key>=<value>` lines. Logging goes to stderr and is
//! controlled by `RUST_LOG`; it never affects stdout.

use lock_tests::scenarios::run_all;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    for (name, report) in run_all() {
        let digest = report
            .digest()
            .unwrap_or_else(|e| panic!("{name}: report is not canonical: {e}"));
        println!("{name}.world_id={}", report.world_id);
        println!("{name}.outcome={}", report.outcome_kind());
        println!("{name}.world_digest={}", report.world_digest.as_str());
        println!("{name}.strategy_digest={}", report.strategy_digest.as_str());
        println!("{name}.report_digest={}", digest.as_str());
    }
}
