//! Error types for device sessions.

use thiserror::Error;

/// A failure reported by the native driver.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct NativeError {
    pub message: String,
}

impl NativeError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Errors surfaced by sessions, mostly as `Error` events.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Wrong number or kind of construction arguments.
    #[error("{kind} requires three number arguments: index, display mode and pixel format ({reason})")]
    ConstructionArgument { kind: SessionKind, reason: String },

    /// The driver failed during open, init, start or stop.
    #[error("native {operation} failed: {source}")]
    NativeCall {
        operation: &'static str,
        #[source]
        source: NativeError,
    },

    /// The driver's scheduler answered with a message instead of a token.
    #[error("Problem scheduling frame: {0}")]
    Scheduling(String),

    /// The session failed construction and has no native handle.
    #[error("{0} session has no native handle")]
    NoHandle(SessionKind),

    /// The hardware driver does not exist on this operating system.
    #[error("deckio is not currently supported on platform {os:?}")]
    UnsupportedPlatform { os: String },
}

impl SessionError {
    pub(crate) fn native(operation: &'static str, source: NativeError) -> Self {
        Self::NativeCall { operation, source }
    }
}

/// Direction of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionKind {
    Capture,
    Playback,
}

impl std::fmt::Display for SessionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Capture => f.write_str("Capture"),
            Self::Playback => f.write_str("Playback"),
        }
    }
}
