//! Monotonic clock access.

use rtt_common::TimeStamp;

/// Source of monotonic timestamps.
pub trait Clock {
    /// Current reading; never runs backward.
    fn now(&self) -> TimeStamp;
}

/// System monotonic clock (`CLOCK_MONOTONIC`).
#[derive(Debug, Clone, Copy, Default)]
pub struct MonotonicClock;

impl Clock for MonotonicClock {
    #[cfg(unix)]
    fn now(&self) -> TimeStamp {
        use nix::time::{clock_gettime, ClockId};

        match clock_gettime(ClockId::CLOCK_MONOTONIC) {
            Ok(ts) => TimeStamp::new(ts.tv_sec() as u64, ts.tv_nsec() as u64),
            // CLOCK_MONOTONIC does not fail on supported platforms; fall
            // back to a process-relative reading instead of propagating.
            Err(_) => instant_fallback(),
        }
    }

    #[cfg(not(unix))]
    fn now(&self) -> TimeStamp {
        instant_fallback()
    }
}

fn instant_fallback() -> TimeStamp {
    use std::sync::OnceLock;
    use std::time::Instant;

    static START: OnceLock<Instant> = OnceLock::new();
    let elapsed = START.get_or_init(Instant::now).elapsed();
    TimeStamp::new(elapsed.as_secs(), u64::from(elapsed.subsec_nanos()))
}
