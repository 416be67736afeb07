//! Accumulators and result reporting for the round-trip benchmark.
//!
//! Totals accumulate raw second/nanosecond deltas without renormalizing;
//! the nanosecond field is folded back into whole seconds only when a
//! report is rendered.

use crate::time::{TimeDelta, NANOS_PER_SEC};
use std::fmt;

/// Running totals owned by the initiator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LatencyTotals {
    /// Accumulated whole seconds across successful trials.
    pub secs: u64,
    /// Accumulated nanoseconds; may exceed one second until normalized.
    pub nanos: u64,
    /// Accumulated cycle counts across every attempt, failed ones included.
    pub cycles: u64,
}

impl LatencyTotals {
    /// Fold one successful trial's elapsed time into the totals.
    pub fn add_elapsed(&mut self, delta: TimeDelta) {
        self.secs += delta.secs;
        self.nanos += delta.nanos;
    }

    /// Fold one attempt's cycle cost into the totals.
    pub fn add_cycles(&mut self, cycles: u64) {
        self.cycles += cycles;
    }

    /// Total elapsed time normalized so nanoseconds fall in `[0, 1e9)`.
    #[must_use]
    pub const fn normalized(&self) -> (u64, u64) {
        (self.secs + self.nanos / NANOS_PER_SEC, self.nanos % NANOS_PER_SEC)
    }

    /// Total elapsed nanoseconds across all successful trials.
    #[must_use]
    pub const fn elapsed_nanos(&self) -> u64 {
        self.secs * NANOS_PER_SEC + self.nanos
    }
}

/// Final benchmark results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BenchReport {
    /// Successful round trips recorded.
    pub trials: u64,
    /// Accumulated wall-clock and cycle totals.
    pub totals: LatencyTotals,
    /// Transient transport faults that forced a retry. Diagnostic only,
    /// never part of the time totals.
    pub transport_errors: u64,
}

impl BenchReport {
    /// Average round-trip time per call as normalized `(secs, nanos)`.
    #[must_use]
    pub fn average_time(&self) -> (u64, u64) {
        if self.trials == 0 {
            return (0, 0);
        }
        let avg = self.totals.elapsed_nanos() / self.trials;
        (avg / NANOS_PER_SEC, avg % NANOS_PER_SEC)
    }

    /// Average cycles per call, integer division.
    #[must_use]
    pub fn average_cycles(&self) -> u64 {
        if self.trials == 0 {
            return 0;
        }
        self.totals.cycles / self.trials
    }
}

impl fmt::Display for BenchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (total_secs, total_nanos) = self.totals.normalized();
        let (avg_secs, avg_nanos) = self.average_time();

        writeln!(f, "Total round-trip time : {total_secs:5}.{total_nanos:09}s")?;
        writeln!(f, "AVG   round-trip time : {avg_secs:5}.{avg_nanos:09}s")?;
        write!(f, "AVG round-trip cycles : {:15}", self.average_cycles())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn delta(secs: u64, nanos: u64) -> TimeDelta {
        TimeDelta { secs, nanos }
    }

    #[test]
    fn test_accumulation_is_order_independent() {
        let deltas = [delta(0, 300), delta(0, 999_999_999), delta(2, 1), delta(0, 0)];

        let mut forward = LatencyTotals::default();
        for d in deltas {
            forward.add_elapsed(d);
        }

        let mut reverse = LatencyTotals::default();
        for d in deltas.iter().rev() {
            reverse.add_elapsed(*d);
        }

        assert_eq!(forward, reverse);
        assert_eq!(forward.elapsed_nanos(), 3_000_000_300);
    }

    #[test]
    fn test_nanos_not_renormalized_during_accumulation() {
        let mut totals = LatencyTotals::default();
        totals.add_elapsed(delta(0, 800_000_000));
        totals.add_elapsed(delta(0, 700_000_000));

        // Raw fields keep the overflow; only normalized() folds it back.
        assert_eq!(totals.secs, 0);
        assert_eq!(totals.nanos, 1_500_000_000);
        assert_eq!(totals.normalized(), (1, 500_000_000));
    }

    #[test]
    fn test_average_time_normalized() {
        let report = BenchReport {
            trials: 4,
            totals: LatencyTotals { secs: 5, nanos: 0, cycles: 0 },
            transport_errors: 0,
        };

        // 5s / 4 = 1.25s per call.
        assert_eq!(report.average_time(), (1, 250_000_000));
    }

    #[test]
    fn test_average_cycles_integer_division() {
        let report = BenchReport {
            trials: 3,
            totals: LatencyTotals { secs: 0, nanos: 0, cycles: 10 },
            transport_errors: 0,
        };

        assert_eq!(report.average_cycles(), 3);
    }

    #[test]
    fn test_zero_trials_report_is_empty() {
        let report = BenchReport {
            trials: 0,
            totals: LatencyTotals::default(),
            transport_errors: 0,
        };

        assert_eq!(report.average_time(), (0, 0));
        assert_eq!(report.average_cycles(), 0);
    }

    #[test]
    fn test_display_renders_three_lines() {
        let report = BenchReport {
            trials: 2,
            totals: LatencyTotals { secs: 0, nanos: 2_000_000_400, cycles: 2400 },
            transport_errors: 0,
        };

        let rendered = report.to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("2.000000400s"));
        assert!(lines[1].contains("1.000000200s"));
        assert!(lines[2].contains("1200"));
    }
}
