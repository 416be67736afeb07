//! Retry completeness under injected transport faults.

use rtt_runtime::{DefaultCounter, Initiator, MonotonicClock, Responder};
use rtt_transport::{rendezvous, FaultyEndpoint};
use std::thread;

#[test]
fn test_injected_fault_is_retried_to_completion() {
    let (endpoint, port) = rendezvous();

    let responder = Responder::new(port, MonotonicClock);
    let handle = thread::Builder::new()
        .name("rtt-responder".into())
        .spawn(move || responder.run())
        .expect("failed to spawn responder");

    // Trial 2 of 3 faults once before reaching the transport.
    let faulty = FaultyEndpoint::new(endpoint, [None, Some(0x20), None]);
    let initiator = Initiator::new(faulty, MonotonicClock, DefaultCounter::default(), 3);

    let report = initiator.run().expect("benchmark failed");

    assert_eq!(report.trials, 3);
    assert_eq!(report.transport_errors, 1);
    assert!(report.totals.elapsed_nanos() > 0);

    drop(initiator);
    // Only the three passed-through calls reached the responder.
    let served = handle.join().expect("responder panicked");
    assert_eq!(served, 3);
}

#[test]
fn test_fault_burst_before_every_success() {
    let (endpoint, port) = rendezvous();

    let responder = Responder::new(port, MonotonicClock);
    let handle = thread::Builder::new()
        .name("rtt-responder".into())
        .spawn(move || responder.run())
        .expect("failed to spawn responder");

    // Ten straight faults before the first exchange gets through.
    let faulty = FaultyEndpoint::failing_first(endpoint, 10, 0x11);
    let initiator = Initiator::new(faulty, MonotonicClock, DefaultCounter::default(), 4);

    let report = initiator.run().expect("benchmark failed");

    assert_eq!(report.trials, 4);
    assert_eq!(report.transport_errors, 10);

    drop(initiator);
    assert_eq!(handle.join().expect("responder panicked"), 4);
}
