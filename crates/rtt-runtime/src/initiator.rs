//! Initiator half: drive the measured round trips and accumulate results.

use crate::{Clock, CycleCounter};
use rtt_common::{BenchReport, LatencyTotals, RttError, RttResult, TimeStamp};
use rtt_transport::{Endpoint, Message};
use tracing::{debug, info, warn};

/// Drives a fixed number of successful round trips against an endpoint and
/// reports aggregate wall-clock and cycle costs.
#[derive(Debug)]
pub struct Initiator<E, C, Y> {
    endpoint: E,
    clock: C,
    cycles: Y,
    trials: u64,
    warmup: u64,
}

impl<E: Endpoint, C: Clock, Y: CycleCounter> Initiator<E, C, Y> {
    /// Create an initiator recording `trials` successful round trips.
    pub fn new(endpoint: E, clock: C, cycles: Y, trials: u64) -> Self {
        Self {
            endpoint,
            clock,
            cycles,
            trials,
            warmup: 0,
        }
    }

    /// Run `warmup` unmeasured exchanges before the measured loop.
    #[must_use]
    pub fn with_warmup(mut self, warmup: u64) -> Self {
        self.warmup = warmup;
        self
    }

    /// Run the benchmark loop.
    ///
    /// A transient transport fault is logged and the trial retried, without
    /// bound, until exactly `trials` successful round trips are recorded.
    /// Failed attempts still pay their cycle cost into the totals; the time
    /// totals only ever see successful trials. A disconnect is fatal: the
    /// responder is gone and no retry can complete the remaining trials.
    pub fn run(&self) -> RttResult<BenchReport> {
        self.run_warmup()?;

        let mut totals = LatencyTotals::default();
        let mut completed = 0u64;
        let mut transport_errors = 0u64;

        while completed < self.trials {
            // The two captures bracket the call as tightly as possible.
            let t_send = self.clock.now();
            let c_start = self.cycles.read();
            let outcome = self.endpoint.call(Message::ZERO);
            totals.add_cycles(self.cycles.read().wrapping_sub(c_start));

            match outcome {
                Ok(reply) => {
                    let t_reply = TimeStamp::from(reply);
                    if let Some(delta) = t_reply.elapsed_since(t_send) {
                        totals.add_elapsed(delta);
                        completed += 1;
                    } else {
                        // A reply stamped before the send can only be stale
                        // data; treat it like a faulted exchange.
                        transport_errors += 1;
                        warn!(
                            "initiator: reply predates send, retrying trial {}",
                            completed + 1
                        );
                    }
                }
                Err(err) if err.is_transient() => {
                    transport_errors += 1;
                    warn!(
                        "initiator: transport fault (code {:#x}), retrying trial {}",
                        err.code(),
                        completed + 1
                    );
                }
                Err(_) => {
                    return Err(RttError::ResponderGone {
                        completed,
                        requested: self.trials,
                    });
                }
            }
        }

        info!(trials = completed, transport_errors, "benchmark loop complete");
        Ok(BenchReport {
            trials: completed,
            totals,
            transport_errors,
        })
    }

    fn run_warmup(&self) -> RttResult<()> {
        if self.warmup > 0 {
            debug!(exchanges = self.warmup, "running warmup");
        }
        for _ in 0..self.warmup {
            match self.endpoint.call(Message::ZERO) {
                Ok(_) => {}
                Err(err) if err.is_transient() => {
                    debug!(
                        "initiator: transport fault (code {:#x}) during warmup",
                        err.code()
                    );
                }
                Err(_) => {
                    return Err(RttError::ResponderGone {
                        completed: 0,
                        requested: self.trials,
                    });
                }
            }
        }
        Ok(())
    }
}
