//! Thread placement: CPU affinity and scheduler priority.
//!
//! Placement runs once at bootstrap. A rejected request degrades the
//! measurement (the two loops may end up sharing a core) but never stops
//! the benchmark, so every failure here surfaces as an error the caller
//! logs and ignores.

#![allow(unused_imports)] // Platform-specific code may not use all imports

use rtt_common::{RttError, RttResult, SchedPolicy};
use tracing::{debug, info, warn};

/// Native handle of a spawned thread, as handed to the scheduler.
#[cfg(unix)]
pub type NativeThread = libc::pthread_t;

/// Native handle of a spawned thread, as handed to the scheduler.
#[cfg(not(unix))]
pub type NativeThread = u64;

/// Affinity plus priority applied to one thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementRequest {
    /// Core index the thread is pinned to.
    pub core: usize,
    /// Scheduler policy.
    pub policy: SchedPolicy,
    /// Scheduler priority; clamped to 1-99 for RT policies.
    pub priority: u8,
}

/// Apply `request` to a spawned thread identified by its native handle.
///
/// # Errors
///
/// Returns a [`RttError::Placement`] when the affinity mask or scheduler
/// parameters are rejected. Callers treat this as non-fatal.
#[cfg(target_os = "linux")]
pub fn place_thread(native: NativeThread, request: &PlacementRequest) -> RttResult<()> {
    set_thread_affinity(native, request.core)?;
    set_thread_priority(native, request.policy, request.priority)
}

/// Apply `request` to a spawned thread identified by its native handle.
#[cfg(not(target_os = "linux"))]
pub fn place_thread(_native: NativeThread, request: &PlacementRequest) -> RttResult<()> {
    warn!(
        core = request.core,
        "thread placement not available on this platform"
    );
    Ok(())
}

/// Pin the calling thread to `core`.
///
/// # Errors
///
/// Returns a [`RttError::Placement`] when the core index is invalid or the
/// affinity call is rejected. Callers treat this as non-fatal.
#[cfg(target_os = "linux")]
pub fn pin_current_thread(core: usize) -> RttResult<()> {
    use nix::sched::{sched_setaffinity, CpuSet};
    use nix::unistd::Pid;

    let mut cpu_set = CpuSet::new();
    cpu_set
        .set(core)
        .map_err(|e| RttError::Placement(format!("invalid CPU index {core}: {e}")))?;

    sched_setaffinity(Pid::from_raw(0), &cpu_set)
        .map_err(|e| RttError::Placement(format!("sched_setaffinity to core {core} failed: {e}")))?;

    info!(core, "calling thread pinned");
    Ok(())
}

/// Pin the calling thread to `core`.
#[cfg(not(target_os = "linux"))]
pub fn pin_current_thread(core: usize) -> RttResult<()> {
    warn!(core, "CPU affinity not available on this platform");
    Ok(())
}

#[cfg(target_os = "linux")]
fn set_thread_affinity(native: NativeThread, core: usize) -> RttResult<()> {
    if core >= libc::CPU_SETSIZE as usize {
        return Err(RttError::Placement(format!(
            "core index {core} exceeds CPU_SETSIZE"
        )));
    }

    // SAFETY: cpu_set_t is plain data; an all-zero value is the empty set.
    let mut cpu_set: libc::cpu_set_t = unsafe { std::mem::zeroed() };
    // SAFETY: `core` was bounds-checked against CPU_SETSIZE above.
    unsafe {
        libc::CPU_ZERO(&mut cpu_set);
        libc::CPU_SET(core, &mut cpu_set);
    }

    // SAFETY: `native` is a live pthread handle and the set is initialized.
    let rc = unsafe {
        libc::pthread_setaffinity_np(native, std::mem::size_of::<libc::cpu_set_t>(), &cpu_set)
    };
    if rc != 0 {
        let err = std::io::Error::from_raw_os_error(rc);
        return Err(RttError::Placement(format!(
            "pthread_setaffinity_np to core {core} failed: {err}"
        )));
    }

    debug!(core, "responder thread pinned");
    Ok(())
}

#[cfg(target_os = "linux")]
fn set_thread_priority(native: NativeThread, policy: SchedPolicy, priority: u8) -> RttResult<()> {
    let linux_policy = match policy {
        SchedPolicy::Fifo => libc::SCHED_FIFO,
        SchedPolicy::Rr => libc::SCHED_RR,
        SchedPolicy::Other => {
            debug!("using SCHED_OTHER, leaving priority unchanged");
            return Ok(());
        }
    };

    // Clamp priority to valid range (1-99 for RT policies)
    let clamped = priority.clamp(1, 99);
    if clamped != priority {
        warn!(
            original = priority,
            clamped, "scheduler priority clamped to valid range"
        );
    }

    let param = libc::sched_param {
        sched_priority: i32::from(clamped),
    };

    // SAFETY: `native` is a live pthread handle and `param` is initialized.
    let rc = unsafe { libc::pthread_setschedparam(native, linux_policy, &param) };
    if rc != 0 {
        let err = std::io::Error::from_raw_os_error(rc);
        if rc == libc::EPERM {
            return Err(RttError::Placement(format!(
                "RT priority rejected without CAP_SYS_NICE: {err}"
            )));
        }
        return Err(RttError::Placement(format!(
            "pthread_setschedparam failed: {err}"
        )));
    }

    info!(?policy, priority = clamped, "responder scheduling applied");
    Ok(())
}
