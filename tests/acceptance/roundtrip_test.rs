//! End-to-end benchmark runs over the real harness.

use rtt_common::{BenchConfig, PlacementConfig, SchedPolicy};
use rtt_runtime::run_benchmark;

/// Placement that works on any machine: no pinning, no RT priority.
fn unpinned() -> PlacementConfig {
    PlacementConfig {
        initiator_core: None,
        policy: SchedPolicy::Other,
        ..Default::default()
    }
}

#[test]
fn test_short_benchmark_reports_exact_trial_count() {
    let config = BenchConfig {
        trials: 256,
        warmup: 16,
        placement: unpinned(),
    };

    let report = run_benchmark(&config).expect("benchmark failed");

    assert_eq!(report.trials, 256);
    assert_eq!(report.transport_errors, 0);
    assert!(report.totals.elapsed_nanos() > 0);
    assert!(report.totals.cycles > 0);

    // The average never exceeds the total.
    let (avg_secs, _) = report.average_time();
    let (total_secs, _) = report.totals.normalized();
    assert!(avg_secs <= total_secs);
}

#[test]
fn test_report_renders_three_lines() {
    let config = BenchConfig {
        trials: 32,
        warmup: 0,
        placement: unpinned(),
    };

    let report = run_benchmark(&config).expect("benchmark failed");
    let rendered = report.to_string();

    assert_eq!(rendered.lines().count(), 3);
    assert!(rendered.contains("Total round-trip time"));
    assert!(rendered.contains("AVG   round-trip time"));
    assert!(rendered.contains("AVG round-trip cycles"));
}

#[test]
fn test_placement_failure_degrades_but_completes() {
    // A core index no machine has: placement fails, the benchmark must
    // still run to completion on whatever cores the OS picks.
    let config = BenchConfig {
        trials: 64,
        warmup: 0,
        placement: PlacementConfig {
            responder_core: 1_000_000,
            initiator_core: None,
            policy: SchedPolicy::Other,
            priority: 0,
        },
    };

    let report = run_benchmark(&config).expect("benchmark failed");
    assert_eq!(report.trials, 64);
}

#[test]
#[ignore = "Full 100000-trial run - needs a quiet machine with two free cores"]
fn test_full_size_benchmark() {
    let config = BenchConfig::default();

    let report = run_benchmark(&config).expect("benchmark failed");

    assert_eq!(report.trials, 100_000);
    assert!(report.totals.elapsed_nanos() > 0);
    assert!(report.average_cycles() > 0);
}
