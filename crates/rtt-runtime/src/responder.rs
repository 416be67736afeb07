//! Responder half of the benchmark: answer every request with the current
//! monotonic time.

use crate::Clock;
use rtt_transport::{Message, Port};
use tracing::{debug, warn};

/// Replies to each request with the receive-side timestamp.
///
/// The loop has two states collapsed into blocking calls: waiting for a
/// request, and replying while waiting for the next one.
#[derive(Debug)]
pub struct Responder<P, C> {
    port: P,
    clock: C,
}

impl<P: Port, C: Clock> Responder<P, C> {
    /// Create a responder over `port`, stamping replies with `clock`.
    pub fn new(port: P, clock: C) -> Self {
        Self { port, clock }
    }

    /// Serve requests until the initiator goes away.
    ///
    /// A transient transport fault is logged and the faulted request is
    /// dropped without a reply; the loop re-enters its wait. Returns the
    /// number of requests served.
    pub fn run(&self) -> u64 {
        let mut served = 0u64;

        // Wait for the first request from anyone; no timeout.
        let mut incoming = self.port.wait();
        loop {
            match incoming {
                Ok(_) => {
                    let stamp = self.clock.now();
                    served += 1;
                    incoming = self.port.reply_and_wait(Message::from(stamp));
                }
                Err(err) if err.is_transient() => {
                    warn!(
                        "responder: transport fault (code {:#x}), dropping request",
                        err.code()
                    );
                    incoming = self.port.wait();
                }
                Err(_) => {
                    debug!(served, "responder: peer gone, leaving serve loop");
                    return served;
                }
            }
        }
    }
}
