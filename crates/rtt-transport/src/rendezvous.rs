//! Condition-variable-guarded rendezvous mailbox.
//!
//! One slot, strict alternation: the initiator writes a request, the
//! responder consumes it and writes the reply, the initiator consumes the
//! reply. The slot is cleared to [`Message::ZERO`] whenever an exchange
//! completes or is torn down, so a later exchange can never read stale
//! data from a prior failed one.

use crate::{Endpoint, Message, Port, TransportError};
use crossbeam_utils::CachePadded;
use std::sync::{Arc, Condvar, Mutex, MutexGuard};

/// Exchange phase. Only `call` moves `Idle -> Request`; only the responder
/// moves `Request -> Reply`; only `call` moves `Reply -> Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Request,
    Reply,
}

#[derive(Debug)]
struct Slot {
    phase: Phase,
    buf: Message,
    caller_alive: bool,
    responder_alive: bool,
}

impl Slot {
    fn clear(&mut self) {
        self.phase = Phase::Idle;
        self.buf = Message::ZERO;
    }
}

#[derive(Debug)]
struct Channel {
    // The slot line is written from both pinned cores; keep it off any
    // neighboring allocation's cache line.
    slot: CachePadded<Mutex<Slot>>,
    request_ready: Condvar,
    reply_ready: Condvar,
}

fn lock(chan: &Channel) -> Result<MutexGuard<'_, Slot>, TransportError> {
    chan.slot.lock().map_err(|_| TransportError::Poisoned)
}

/// Create a connected rendezvous pair.
#[must_use]
pub fn rendezvous() -> (RendezvousEndpoint, RendezvousPort) {
    let chan = Arc::new(Channel {
        slot: CachePadded::new(Mutex::new(Slot {
            phase: Phase::Idle,
            buf: Message::ZERO,
            caller_alive: true,
            responder_alive: true,
        })),
        request_ready: Condvar::new(),
        reply_ready: Condvar::new(),
    });

    (
        RendezvousEndpoint {
            chan: Arc::clone(&chan),
        },
        RendezvousPort { chan },
    )
}

/// Initiator half of the rendezvous.
#[derive(Debug)]
pub struct RendezvousEndpoint {
    chan: Arc<Channel>,
}

/// Responder half of the rendezvous.
#[derive(Debug)]
pub struct RendezvousPort {
    chan: Arc<Channel>,
}

impl Endpoint for RendezvousEndpoint {
    fn call(&self, request: Message) -> Result<Message, TransportError> {
        let mut slot = lock(&self.chan)?;
        if !slot.responder_alive {
            return Err(TransportError::Disconnected);
        }
        debug_assert_eq!(slot.phase, Phase::Idle);

        slot.buf = request;
        slot.phase = Phase::Request;
        self.chan.request_ready.notify_one();

        while slot.phase != Phase::Reply {
            if !slot.responder_alive {
                slot.clear();
                return Err(TransportError::Disconnected);
            }
            slot = self
                .chan
                .reply_ready
                .wait(slot)
                .map_err(|_| TransportError::Poisoned)?;
        }

        let reply = slot.buf;
        slot.clear();
        Ok(reply)
    }
}

impl Port for RendezvousPort {
    fn wait(&self) -> Result<Message, TransportError> {
        let slot = lock(&self.chan)?;
        wait_for_request(&self.chan, slot)
    }

    fn reply_and_wait(&self, reply: Message) -> Result<Message, TransportError> {
        let mut slot = lock(&self.chan)?;
        if !slot.caller_alive {
            return Err(TransportError::Disconnected);
        }
        debug_assert_eq!(slot.phase, Phase::Request);

        slot.buf = reply;
        slot.phase = Phase::Reply;
        self.chan.reply_ready.notify_one();

        wait_for_request(&self.chan, slot)
    }
}

fn wait_for_request(
    chan: &Channel,
    mut slot: MutexGuard<'_, Slot>,
) -> Result<Message, TransportError> {
    loop {
        if slot.phase == Phase::Request {
            return Ok(slot.buf);
        }
        if !slot.caller_alive {
            return Err(TransportError::Disconnected);
        }
        slot = chan
            .request_ready
            .wait(slot)
            .map_err(|_| TransportError::Poisoned)?;
    }
}

impl Drop for RendezvousEndpoint {
    fn drop(&mut self) {
        if let Ok(mut slot) = self.chan.slot.lock() {
            slot.caller_alive = false;
        }
        self.chan.request_ready.notify_all();
        self.chan.reply_ready.notify_all();
    }
}

impl Drop for RendezvousPort {
    fn drop(&mut self) {
        if let Ok(mut slot) = self.chan.slot.lock() {
            slot.responder_alive = false;
        }
        self.chan.request_ready.notify_all();
        self.chan.reply_ready.notify_all();
    }
}
