//! Output sessions.

use crate::driver::{Driver, PlaybackHandle, ScheduleOutcome, ScheduleToken, Sink};
use crate::error::{SessionError, SessionKind};
use crate::event::{EventSource, PlaybackEvent};
use crate::session::{parse_args, Session, SessionState};
use crossbeam_channel::Receiver;
use deckio_core::{DisplayModeCode, PixelFormatCode, VideoFrame};
use serde_json::Value;
use tracing::debug;

/// A playback stream on one device.
///
/// Frames are queued with [`schedule_frame`](Self::schedule_frame); each
/// one the driver finishes with becomes a [`PlaybackEvent::Played`] in
/// completion order.
pub struct PlaybackSession<H: PlaybackHandle> {
    inner: Session<H, PlaybackEvent>,
}

impl<H: PlaybackHandle> PlaybackSession<H> {
    /// Open device `device_index` for playback in `mode`/`format`.
    pub fn open<D>(
        driver: &D,
        device_index: u32,
        mode: DisplayModeCode,
        format: PixelFormatCode,
    ) -> Self
    where
        D: Driver<Playback = H>,
    {
        Self {
            inner: Session::open(SessionKind::Playback, device_index, mode, format, |i, m, f| {
                driver.open_playback(i, m, f)
            }),
        }
    }

    /// Open from positional `[device_index, display_mode, pixel_format]`.
    ///
    /// Bad arguments leave one `Error` queued and no native handle.
    pub fn from_args<D>(driver: &D, args: &[Value]) -> Self
    where
        D: Driver<Playback = H>,
    {
        match parse_args(SessionKind::Playback, args) {
            Ok((index, mode, format)) => Self::open(driver, index, mode, format),
            Err(err) => Self {
                inner: Session::rejected(SessionKind::Playback, err),
            },
        }
    }

    /// Initialize once, then begin playing scheduled frames out.
    pub fn start(&mut self) {
        self.inner
            .start_with(|handle, tx| handle.do_playback(Sink::new(tx)));
    }

    /// Stop playout and emit `Done`.
    pub fn stop(&mut self) {
        self.inner.stop();
    }

    /// Queue `frame` for output, initializing first if needed.
    ///
    /// Returns the driver's token. When the driver refuses the frame the
    /// reason arrives as an `Error` event and this returns `None`.
    pub fn schedule_frame(&mut self, frame: VideoFrame) -> Option<ScheduleToken> {
        if let Err(err) = self.inner.ensure_initialized() {
            self.inner.emit_error(err);
            return None;
        }
        let sequence = frame.sequence;
        let outcome = self.inner.handle_mut()?.schedule_frame(frame);
        match outcome {
            ScheduleOutcome::Scheduled(token) => {
                debug!(sequence, token = token.0, "Frame scheduled");
                Some(token)
            }
            ScheduleOutcome::Rejected(message) => {
                self.inner.emit_error(SessionError::Scheduling(message));
                None
            }
        }
    }

    pub fn state(&self) -> SessionState {
        self.inner.state()
    }

    pub fn is_initialized(&self) -> bool {
        self.inner.is_initialized()
    }

    pub fn has_handle(&self) -> bool {
        self.inner.has_handle()
    }

    pub fn device_index(&self) -> u32 {
        self.inner.device_index()
    }

    pub fn display_mode(&self) -> DisplayModeCode {
        self.inner.display_mode()
    }

    pub fn pixel_format(&self) -> PixelFormatCode {
        self.inner.pixel_format()
    }

    pub fn events(&self) -> Receiver<PlaybackEvent> {
        self.inner.events()
    }

    pub fn event_source(&self) -> &EventSource<PlaybackEvent> {
        self.inner.event_source()
    }

    /// The native handle, for driver-specific calls.
    pub fn handle_mut(&mut self) -> Option<&mut H> {
        self.inner.handle_mut()
    }
}
