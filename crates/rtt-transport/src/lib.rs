#![doc = "Synchronous message transport for the IPC round-trip benchmark."]

pub mod fault;
pub mod message;
pub mod rendezvous;

pub use fault::*;
pub use message::*;
pub use rendezvous::*;

use thiserror::Error;

/// Failure surfaced by a transport exchange.
///
/// Every variant carries an opaque non-zero [`code`](TransportError::code);
/// success is the absence of an error.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TransportError {
    /// The peer half of the channel was dropped.
    #[error("peer disconnected")]
    Disconnected,

    /// A participant panicked while holding the channel state.
    #[error("channel poisoned by a panicked peer")]
    Poisoned,

    /// Transient exchange failure carrying the raw error code.
    #[error("exchange faulted (code {0:#x})")]
    Faulted(u32),
}

impl TransportError {
    /// Raw non-zero error code, for diagnostic logs.
    #[must_use]
    pub fn code(&self) -> u32 {
        match self {
            Self::Disconnected => 0x1,
            Self::Poisoned => 0x2,
            Self::Faulted(code) => *code,
        }
    }

    /// Whether retrying the exchange can ever succeed.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Faulted(_))
    }
}

/// Initiator-side handle targeting the responder.
///
/// Created once at bootstrap and held unchanged for the benchmark's
/// duration.
pub trait Endpoint: Send {
    /// Send `request` and block, with no timeout, until the matching reply.
    ///
    /// The transport guarantees strict pairing: this returns only after the
    /// responder has consumed the request and produced its reply.
    fn call(&self, request: Message) -> Result<Message, TransportError>;
}

/// Responder-side handle.
pub trait Port: Send {
    /// Block, with no timeout, until a request arrives from the initiator.
    fn wait(&self) -> Result<Message, TransportError>;

    /// Reply to the pending request, then block until the next one.
    fn reply_and_wait(&self, reply: Message) -> Result<Message, TransportError>;
}
