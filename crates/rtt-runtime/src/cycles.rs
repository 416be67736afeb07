//! Cycle counter access for fine-grained latency measurement.

/// Hardware cycle counter.
///
/// Monotonically increasing; wraps per hardware semantics. Wraparound is
/// not handled, which is acceptable at benchmark trial counts.
pub trait CycleCounter {
    /// Current counter value.
    fn read(&self) -> u64;
}

/// Time-stamp counter via `RDTSC`.
#[cfg(target_arch = "x86_64")]
#[derive(Debug, Clone, Copy, Default)]
pub struct TscCounter;

#[cfg(target_arch = "x86_64")]
impl CycleCounter for TscCounter {
    #[inline]
    fn read(&self) -> u64 {
        // SAFETY: RDTSC is available on all x86_64 processors and has no
        // side effects.
        unsafe { core::arch::x86_64::_rdtsc() }
    }
}

/// Nanosecond-granularity stand-in for architectures without a readable
/// cycle counter.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstantCounter;

impl CycleCounter for InstantCounter {
    #[inline]
    fn read(&self) -> u64 {
        use std::sync::OnceLock;
        use std::time::Instant;

        static START: OnceLock<Instant> = OnceLock::new();
        START.get_or_init(Instant::now).elapsed().as_nanos() as u64
    }
}

/// The preferred counter for the build target.
#[cfg(target_arch = "x86_64")]
pub type DefaultCounter = TscCounter;

/// The preferred counter for the build target.
#[cfg(not(target_arch = "x86_64"))]
pub type DefaultCounter = InstantCounter;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_counter_is_monotonic() {
        let counter = DefaultCounter::default();
        let mut prev = counter.read();
        for _ in 0..1000 {
            let next = counter.read();
            assert!(next >= prev);
            prev = next;
        }
    }

    #[test]
    fn test_counter_advances_across_a_sleep() {
        let counter = DefaultCounter::default();
        let before = counter.read();
        std::thread::sleep(std::time::Duration::from_millis(5));
        assert!(counter.read() > before);
    }
}
