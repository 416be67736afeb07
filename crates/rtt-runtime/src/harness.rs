//! Bootstrap: wire the transport, place the threads, run the benchmark.

use crate::{
    pin_current_thread, place_thread, DefaultCounter, Initiator, MonotonicClock, NativeThread,
    PlacementRequest, Responder,
};
use rtt_common::{BenchConfig, BenchReport, RttError, RttResult};
use rtt_transport::rendezvous;
use std::thread;
use tracing::{info, warn};

/// Run the full benchmark described by `config`.
///
/// Spawns the responder thread, submits its placement request, pins the
/// calling thread, and drives the initiator loop in place. Failure to
/// create the responder thread is fatal; failed placement is logged and
/// the benchmark proceeds with degraded accuracy.
pub fn run_benchmark(config: &BenchConfig) -> RttResult<BenchReport> {
    let (endpoint, port) = rendezvous();

    let responder = Responder::new(port, MonotonicClock);
    let handle = thread::Builder::new()
        .name("rtt-responder".into())
        .spawn(move || responder.run())
        .map_err(|e| RttError::ContextCreation(format!("failed to spawn responder thread: {e}")))?;

    let request = PlacementRequest {
        core: config.placement.responder_core,
        policy: config.placement.policy,
        priority: config.placement.priority,
    };
    if let Err(e) = place_thread(native_handle(&handle), &request) {
        warn!("responder placement failed, continuing unpinned: {e}");
    }

    if let Some(core) = config.placement.initiator_core {
        if let Err(e) = pin_current_thread(core) {
            warn!("initiator pinning failed, continuing unpinned: {e}");
        }
    }

    info!(
        trials = config.trials,
        warmup = config.warmup,
        responder_core = config.placement.responder_core,
        initiator_core = ?config.placement.initiator_core,
        "starting round-trip benchmark"
    );

    let initiator = Initiator::new(
        endpoint,
        MonotonicClock,
        DefaultCounter::default(),
        config.trials,
    )
    .with_warmup(config.warmup);
    let report = initiator.run();

    // Dropping the initiator releases its endpoint, which ends the
    // responder's wait.
    drop(initiator);
    match handle.join() {
        Ok(served) => info!(served, "responder thread exited"),
        Err(_) => warn!("responder thread panicked"),
    }

    report
}

#[cfg(unix)]
fn native_handle<T>(handle: &thread::JoinHandle<T>) -> NativeThread {
    use std::os::unix::thread::JoinHandleExt;

    handle.as_pthread_t()
}

#[cfg(not(unix))]
fn native_handle<T>(_handle: &thread::JoinHandle<T>) -> NativeThread {
    0
}
