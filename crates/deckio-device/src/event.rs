//! Session events and the channel that carries them.
//!
//! Native callbacks and lifecycle outcomes all land on one unbounded
//! channel per session, so the order a listener observes is the order
//! events were produced. Nothing is emitted into the void: an error raised
//! during construction waits in the channel until someone reads it.

use crate::driver::Completion;
use crate::error::SessionError;
use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TryRecvError};
use deckio_core::VideoFrame;
use std::time::Duration;

/// Events emitted by a capture session.
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureEvent {
    Error(SessionError),
    /// A delivered frame, exactly as the driver produced it.
    Frame(VideoFrame),
    /// The stream has stopped.
    Done,
}

/// Events emitted by a playback session.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackEvent {
    Error(SessionError),
    /// A scheduled frame finished playing out.
    Played(Completion),
    /// The stream has stopped.
    Done,
}

/// Lifecycle events common to both directions.
pub trait SessionEvent: Send + 'static {
    fn error(err: SessionError) -> Self;
    fn done() -> Self;
    fn as_error(&self) -> Option<&SessionError>;
}

impl SessionEvent for CaptureEvent {
    fn error(err: SessionError) -> Self {
        Self::Error(err)
    }

    fn done() -> Self {
        Self::Done
    }

    fn as_error(&self) -> Option<&SessionError> {
        match self {
            Self::Error(err) => Some(err),
            _ => None,
        }
    }
}

impl SessionEvent for PlaybackEvent {
    fn error(err: SessionError) -> Self {
        Self::Error(err)
    }

    fn done() -> Self {
        Self::Done
    }

    fn as_error(&self) -> Option<&SessionError> {
        match self {
            Self::Error(err) => Some(err),
            _ => None,
        }
    }
}

/// The event-emitting capability shared by capture and playback.
///
/// Receivers handed out by [`EventSource::events`] share one queue: each
/// event is taken by exactly one reader.
pub struct EventSource<E> {
    tx: Sender<E>,
    rx: Receiver<E>,
}

impl<E> EventSource<E> {
    pub fn new() -> Self {
        let (tx, rx) = crossbeam_channel::unbounded();
        Self { tx, rx }
    }

    /// Queue an event for listeners.
    pub fn emit(&self, event: E) {
        // `self.rx` keeps the channel connected, so this cannot fail.
        let _ = self.tx.send(event);
    }

    /// A receiver for this source's events.
    pub fn events(&self) -> Receiver<E> {
        self.rx.clone()
    }

    /// Sender side, for handing to the native driver.
    pub(crate) fn sender(&self) -> Sender<E> {
        self.tx.clone()
    }

    /// Next queued event, without waiting.
    pub fn try_next(&self) -> Option<E> {
        match self.rx.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }

    /// Next event, waiting up to `timeout`.
    pub fn next_timeout(&self, timeout: Duration) -> Option<E> {
        match self.rx.recv_timeout(timeout) {
            Ok(event) => Some(event),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Everything currently queued, oldest first.
    pub fn drain(&self) -> Vec<E> {
        self.rx.try_iter().collect()
    }

    /// Number of queued events.
    pub fn pending(&self) -> usize {
        self.rx.len()
    }
}

impl<E> Default for EventSource<E> {
    fn default() -> Self {
        Self::new()
    }
}
