//! The two-word message buffer exchanged on each round trip.

use rtt_common::TimeStamp;

/// Fixed-size message payload: two machine words carrying a timestamp.
///
/// Requests travel as [`Message::ZERO`]; replies carry the responder's
/// receive timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Message {
    /// Whole seconds of the responder's receive timestamp.
    pub secs: u64,
    /// Nanosecond part of the responder's receive timestamp.
    pub nanos: u64,
}

impl Message {
    /// The cleared-buffer sentinel.
    pub const ZERO: Message = Message { secs: 0, nanos: 0 };
}

impl From<TimeStamp> for Message {
    fn from(ts: TimeStamp) -> Self {
        Self {
            secs: ts.secs,
            nanos: ts.nanos,
        }
    }
}

impl From<Message> for TimeStamp {
    fn from(msg: Message) -> Self {
        TimeStamp::new(msg.secs, msg.nanos)
    }
}
