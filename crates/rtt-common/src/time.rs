//! Monotonic timestamp arithmetic for round-trip measurement.
//!
//! Timestamps are second/nanosecond pairs as read from
//! `clock_gettime(CLOCK_MONOTONIC)`. Subtraction is wraparound-aware: when
//! the later reading's nanosecond field is smaller than the earlier one's,
//! a second is borrowed into the nanosecond difference.

/// Nanoseconds per second.
pub const NANOS_PER_SEC: u64 = 1_000_000_000;

/// A monotonic clock reading split into whole seconds and nanoseconds.
///
/// `nanos` is in `[0, 1e9)` for every reading produced by a clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct TimeStamp {
    /// Whole seconds.
    pub secs: u64,
    /// Sub-second nanoseconds, `< 1_000_000_000`.
    pub nanos: u64,
}

impl TimeStamp {
    /// Construct from raw parts.
    #[must_use]
    pub const fn new(secs: u64, nanos: u64) -> Self {
        Self { secs, nanos }
    }

    /// Elapsed time from `earlier` to `self`.
    ///
    /// When `self.nanos < earlier.nanos` one second is borrowed from the
    /// seconds difference and the nanosecond difference gains 1e9.
    /// Returns `None` if `self` precedes `earlier` - a pair no monotonic
    /// clock can produce, so callers treat it as a corrupted exchange.
    #[must_use]
    pub fn elapsed_since(&self, earlier: TimeStamp) -> Option<TimeDelta> {
        let (secs, nanos) = if self.nanos < earlier.nanos {
            let secs = self.secs.checked_sub(earlier.secs)?.checked_sub(1)?;
            (secs, self.nanos + NANOS_PER_SEC - earlier.nanos)
        } else {
            let secs = self.secs.checked_sub(earlier.secs)?;
            (secs, self.nanos - earlier.nanos)
        };
        Some(TimeDelta { secs, nanos })
    }
}

/// Elapsed wall-clock time of a single round trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeDelta {
    /// Whole seconds.
    pub secs: u64,
    /// Nanoseconds, `< 1_000_000_000`.
    pub nanos: u64,
}

impl TimeDelta {
    /// Total nanoseconds represented by this delta.
    #[must_use]
    pub const fn as_nanos(&self) -> u64 {
        self.secs * NANOS_PER_SEC + self.nanos
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elapsed_direct_subtraction() {
        let send = TimeStamp::new(0, 500);
        let reply = TimeStamp::new(0, 800);

        let delta = reply.elapsed_since(send).unwrap();
        assert_eq!(delta, TimeDelta { secs: 0, nanos: 300 });
    }

    #[test]
    fn test_elapsed_borrows_a_second() {
        // Reply nanoseconds below send nanoseconds forces the borrow.
        let send = TimeStamp::new(0, 900);
        let reply = TimeStamp::new(1, 100);

        let delta = reply.elapsed_since(send).unwrap();
        assert_eq!(delta, TimeDelta { secs: 0, nanos: 200 });
        assert_eq!(delta.as_nanos(), 200);
    }

    #[test]
    fn test_elapsed_zero() {
        let ts = TimeStamp::new(5, 123_456_789);
        let delta = ts.elapsed_since(ts).unwrap();
        assert_eq!(delta.as_nanos(), 0);
    }

    #[test]
    fn test_elapsed_whole_seconds() {
        let send = TimeStamp::new(1, 0);
        let reply = TimeStamp::new(3, 0);

        let delta = reply.elapsed_since(send).unwrap();
        assert_eq!(delta, TimeDelta { secs: 2, nanos: 0 });
    }

    #[test]
    fn test_reply_before_send_is_rejected() {
        let send = TimeStamp::new(2, 100);

        assert!(TimeStamp::new(1, 900).elapsed_since(send).is_none());
        assert!(TimeStamp::new(2, 50).elapsed_since(send).is_none());
        // Same second, smaller nanos: borrowing would go negative.
        assert!(TimeStamp::new(2, 99).elapsed_since(send).is_none());
    }

    #[test]
    fn test_ordering_matches_arithmetic() {
        let a = TimeStamp::new(1, 999_999_999);
        let b = TimeStamp::new(2, 0);

        assert!(a < b);
        assert!(b.elapsed_since(a).is_some());
        assert!(a.elapsed_since(b).is_none());
    }
}
