//! Session lifecycle shared by capture and playback.
//!
//! A session owns at most one native stream handle and walks it through
//!
//! ```text
//! Unconstructed -> Constructed -> Initialized -> Running -> Stopped
//! ```
//!
//! Every failure after construction is reported as an `Error` event on the
//! session's [`EventSource`]; lifecycle methods never return errors.

use crate::driver::StreamHandle;
use crate::error::{NativeError, SessionError, SessionKind};
use crate::event::{EventSource, SessionEvent};
use crossbeam_channel::{Receiver, Sender};
use deckio_core::{DisplayModeCode, PixelFormatCode};
use serde_json::Value;
use tracing::{debug, info, warn};

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    /// Construction failed; there is no native handle.
    Unconstructed,
    /// The native handle is open.
    Constructed,
    /// The hardware has been prepared for streaming.
    Initialized,
    Running,
    Stopped,
}

/// Validate the three positional construction arguments: device index,
/// display mode code and pixel format code.
///
/// Each must be a non-negative integer that fits in 32 bits.
pub fn parse_args(
    kind: SessionKind,
    args: &[Value],
) -> Result<(u32, DisplayModeCode, PixelFormatCode), SessionError> {
    let reject = |reason: String| SessionError::ConstructionArgument { kind, reason };

    if args.len() != 3 {
        return Err(reject(format!("got {} arguments", args.len())));
    }

    let mut numbers = [0u32; 3];
    for (position, (arg, slot)) in args.iter().zip(numbers.iter_mut()).enumerate() {
        *slot = arg
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| reject(format!("argument {position} is {arg}")))?;
    }

    let [device_index, mode, format] = numbers;
    Ok((device_index, DisplayModeCode(mode), PixelFormatCode(format)))
}

/// Lifecycle core composed into [`CaptureSession`](crate::CaptureSession)
/// and [`PlaybackSession`](crate::PlaybackSession).
pub struct Session<H: StreamHandle, E: SessionEvent> {
    kind: SessionKind,
    device_index: u32,
    display_mode: DisplayModeCode,
    pixel_format: PixelFormatCode,
    handle: Option<H>,
    initialized: bool,
    state: SessionState,
    events: EventSource<E>,
}

impl<H: StreamHandle, E: SessionEvent> Session<H, E> {
    /// Open a native handle with `open`.
    ///
    /// On failure the error is queued and the session stays unconstructed.
    pub(crate) fn open(
        kind: SessionKind,
        device_index: u32,
        display_mode: DisplayModeCode,
        pixel_format: PixelFormatCode,
        open: impl FnOnce(u32, DisplayModeCode, PixelFormatCode) -> Result<H, NativeError>,
    ) -> Self {
        let mut session = Self {
            kind,
            device_index,
            display_mode,
            pixel_format,
            handle: None,
            initialized: false,
            state: SessionState::Unconstructed,
            events: EventSource::new(),
        };

        match open(device_index, display_mode, pixel_format) {
            Ok(handle) => {
                info!(
                    %kind,
                    device_index,
                    display_mode = %display_mode,
                    pixel_format = %pixel_format,
                    "Session opened"
                );
                session.handle = Some(handle);
                session.state = SessionState::Constructed;
            }
            Err(source) => session.emit_error(SessionError::native("open", source)),
        }
        session
    }

    /// A session whose construction arguments were rejected.
    pub(crate) fn rejected(kind: SessionKind, err: SessionError) -> Self {
        let session = Self {
            kind,
            device_index: 0,
            display_mode: DisplayModeCode(0),
            pixel_format: PixelFormatCode(0),
            handle: None,
            initialized: false,
            state: SessionState::Unconstructed,
            events: EventSource::new(),
        };
        session.emit_error(err);
        session
    }

    /// Queue an `Error` event.
    pub(crate) fn emit_error(&self, err: SessionError) {
        warn!(kind = %self.kind, error = %err, "Session error");
        self.events.emit(E::error(err));
    }

    /// Run native `init` unless it has already succeeded.
    pub(crate) fn ensure_initialized(&mut self) -> Result<(), SessionError> {
        if self.initialized {
            return Ok(());
        }
        let handle = self
            .handle
            .as_mut()
            .ok_or(SessionError::NoHandle(self.kind))?;
        handle
            .init()
            .map_err(|source| SessionError::native("init", source))?;

        debug!(kind = %self.kind, "Session initialized");
        self.initialized = true;
        if self.state == SessionState::Constructed {
            self.state = SessionState::Initialized;
        }
        Ok(())
    }

    /// Initialize if needed, then hand the event sender to `begin`.
    pub(crate) fn start_with(
        &mut self,
        begin: impl FnOnce(&mut H, Sender<E>) -> Result<(), NativeError>,
    ) {
        if let Err(err) = self.ensure_initialized() {
            self.emit_error(err);
            return;
        }
        let sender = self.events.sender();
        let Some(handle) = self.handle.as_mut() else {
            self.emit_error(SessionError::NoHandle(self.kind));
            return;
        };
        match begin(handle, sender) {
            Ok(()) => {
                info!(kind = %self.kind, device_index = self.device_index, "Session started");
                self.state = SessionState::Running;
            }
            Err(source) => self.emit_error(SessionError::native("start", source)),
        }
    }

    /// Stop the stream and emit `Done`.
    ///
    /// Native stop runs only if the hardware was prepared; otherwise this
    /// is a no-op that still reports `Done`.
    pub(crate) fn stop(&mut self) {
        let Some(handle) = self.handle.as_mut() else {
            self.emit_error(SessionError::NoHandle(self.kind));
            return;
        };

        if matches!(self.state, SessionState::Initialized | SessionState::Running) {
            if let Err(source) = handle.stop() {
                self.emit_error(SessionError::native("stop", source));
                return;
            }
            info!(kind = %self.kind, device_index = self.device_index, "Session stopped");
            self.state = SessionState::Stopped;
        }
        self.events.emit(E::done());
    }

    pub(crate) fn handle_mut(&mut self) -> Option<&mut H> {
        self.handle.as_mut()
    }

    pub fn kind(&self) -> SessionKind {
        self.kind
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Whether a native handle is held.
    pub fn has_handle(&self) -> bool {
        self.handle.is_some()
    }

    pub fn device_index(&self) -> u32 {
        self.device_index
    }

    pub fn display_mode(&self) -> DisplayModeCode {
        self.display_mode
    }

    pub fn pixel_format(&self) -> PixelFormatCode {
        self.pixel_format
    }

    pub fn event_source(&self) -> &EventSource<E> {
        &self.events
    }

    /// A receiver for this session's events.
    pub fn events(&self) -> Receiver<E> {
        self.events.events()
    }
}

impl<H: StreamHandle, E: SessionEvent> Drop for Session<H, E> {
    fn drop(&mut self) {
        if self.state != SessionState::Running {
            return;
        }
        if let Some(handle) = self.handle.as_mut() {
            if let Err(err) = handle.stop() {
                warn!(kind = %self.kind, error = %err, "Stop on drop failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::CaptureEvent;
    use serde_json::json;

    struct CountingHandle {
        inits: u32,
        stops: u32,
        fail_init: bool,
    }

    impl StreamHandle for CountingHandle {
        fn init(&mut self) -> Result<(), NativeError> {
            self.inits += 1;
            if self.fail_init {
                Err(NativeError::new("no signal"))
            } else {
                Ok(())
            }
        }

        fn stop(&mut self) -> Result<(), NativeError> {
            self.stops += 1;
            Ok(())
        }
    }

    fn session(fail_init: bool) -> Session<CountingHandle, CaptureEvent> {
        Session::open(
            SessionKind::Capture,
            0,
            DisplayModeCode(1),
            PixelFormatCode(2),
            |_, _, _| {
                Ok(CountingHandle {
                    inits: 0,
                    stops: 0,
                    fail_init,
                })
            },
        )
    }

    #[test]
    fn test_parse_args() {
        let parsed = parse_args(SessionKind::Capture, &[json!(1), json!(0x4870_3235), json!(32)]);
        assert_eq!(
            parsed,
            Ok((1, DisplayModeCode(0x4870_3235), PixelFormatCode(32)))
        );
    }

    #[test]
    fn test_parse_args_rejects() {
        for args in [
            vec![json!(0), json!(1)],
            vec![json!(0), json!(1), json!(2), json!(3)],
            vec![json!("0"), json!(1), json!(2)],
            vec![json!(0), json!(-1), json!(2)],
            vec![json!(0), json!(1), json!(2.5)],
            vec![json!(0), json!(1), json!(u64::from(u32::MAX) + 1)],
        ] {
            let err = parse_args(SessionKind::Playback, &args).unwrap_err();
            assert!(matches!(
                err,
                SessionError::ConstructionArgument {
                    kind: SessionKind::Playback,
                    ..
                }
            ));
        }
    }

    #[test]
    fn test_init_runs_once() {
        let mut session = session(false);
        assert_eq!(session.state(), SessionState::Constructed);
        session.start_with(|_, _| Ok(()));
        session.start_with(|_, _| Ok(()));
        assert_eq!(session.handle_mut().map(|h| h.inits), Some(1));
        assert_eq!(session.state(), SessionState::Running);
        assert!(session.event_source().drain().is_empty());
    }

    #[test]
    fn test_failed_init_is_emitted_and_retried() {
        let mut session = session(true);
        session.start_with(|_, _| Ok(()));
        assert!(!session.is_initialized());
        assert_eq!(session.state(), SessionState::Constructed);
        assert!(matches!(
            session.event_source().try_next(),
            Some(CaptureEvent::Error(SessionError::NativeCall { operation: "init", .. }))
        ));

        session.start_with(|_, _| Ok(()));
        assert_eq!(session.handle_mut().map(|h| h.inits), Some(2));
    }

    #[test]
    fn test_stop_before_start_skips_native_stop() {
        let mut session = session(false);
        session.stop();
        assert_eq!(session.handle_mut().map(|h| h.stops), Some(0));
        assert_eq!(session.event_source().drain(), vec![CaptureEvent::Done]);
        assert_eq!(session.state(), SessionState::Constructed);
    }

    #[test]
    fn test_failed_open() {
        let session: Session<CountingHandle, CaptureEvent> = Session::open(
            SessionKind::Capture,
            7,
            DisplayModeCode(1),
            PixelFormatCode(2),
            |_, _, _| Err(NativeError::new("no device at index 7")),
        );
        assert!(!session.has_handle());
        assert_eq!(session.state(), SessionState::Unconstructed);
        assert_eq!(session.event_source().pending(), 1);
    }
}
