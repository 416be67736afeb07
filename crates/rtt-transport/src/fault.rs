//! Scripted fault injection for exercising retry paths.

use crate::{Endpoint, Message, TransportError};
use std::collections::VecDeque;
use std::sync::Mutex;

/// Wraps an [`Endpoint`] and fails scripted calls before they reach the
/// underlying transport.
///
/// The schedule is a sequence of per-call outcomes: `Some(code)` fails the
/// call with that code, `None` lets it through. Once the schedule runs out
/// every call passes through.
#[derive(Debug)]
pub struct FaultyEndpoint<E> {
    inner: E,
    schedule: Mutex<VecDeque<Option<u32>>>,
}

impl<E> FaultyEndpoint<E> {
    /// Wrap `inner` with a fault schedule.
    pub fn new<I>(inner: E, schedule: I) -> Self
    where
        I: IntoIterator<Item = Option<u32>>,
    {
        Self {
            inner,
            schedule: Mutex::new(schedule.into_iter().collect()),
        }
    }

    /// Fail the first `n` calls with `code`, then pass everything through.
    pub fn failing_first(inner: E, n: usize, code: u32) -> Self {
        Self::new(inner, std::iter::repeat(Some(code)).take(n))
    }

    /// Unwrap the underlying endpoint.
    pub fn into_inner(self) -> E {
        self.inner
    }
}

impl<E: Endpoint> Endpoint for FaultyEndpoint<E> {
    fn call(&self, request: Message) -> Result<Message, TransportError> {
        let injected = self
            .schedule
            .lock()
            .map_err(|_| TransportError::Poisoned)?
            .pop_front()
            .flatten();

        match injected {
            Some(code) => Err(TransportError::Faulted(code)),
            None => self.inner.call(request),
        }
    }
}
