//! The native driver contract.
//!
//! deckio never talks to hardware directly. A [`Driver`] opens stream
//! handles and reports device information; handles push their per-frame
//! callbacks into a [`Sink`], which feeds the owning session's event
//! channel in the order the driver calls it.

use crate::error::{NativeError, SessionError};
use crate::event::{CaptureEvent, PlaybackEvent};
use crate::info::DeviceAttributes;
use crate::platform;
use crossbeam_channel::Sender;
use deckio_core::{DisplayModeCode, PixelFormatCode, VideoFrame};

/// Opaque token the driver hands back for a scheduled frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScheduleToken(pub u64);

/// How a scheduled frame left the output queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompletionResult {
    Completed,
    DisplayedLate,
    Dropped,
    Flushed,
}

/// A playback completion callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Completion {
    pub token: ScheduleToken,
    pub result: CompletionResult,
}

/// The driver's answer to a scheduling request: a token, or a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleOutcome {
    Scheduled(ScheduleToken),
    Rejected(String),
}

/// Callback endpoint given to a running stream.
///
/// Cheap to clone; the driver may call it from any thread. Each call
/// becomes exactly one event.
pub struct Sink<E> {
    tx: Sender<E>,
}

impl<E> Clone for Sink<E> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<E> Sink<E> {
    pub(crate) fn new(tx: Sender<E>) -> Self {
        Self { tx }
    }
}

/// Sink for captured frames.
pub type FrameSink = Sink<CaptureEvent>;

/// Sink for playback completions.
pub type CompletionSink = Sink<PlaybackEvent>;

impl Sink<CaptureEvent> {
    /// Deliver a captured frame. Returns `false` once the session is gone.
    pub fn deliver(&self, frame: VideoFrame) -> bool {
        self.tx.send(CaptureEvent::Frame(frame)).is_ok()
    }
}

impl Sink<PlaybackEvent> {
    /// Report a completed frame. Returns `false` once the session is gone.
    pub fn complete(&self, completion: Completion) -> bool {
        self.tx.send(PlaybackEvent::Played(completion)).is_ok()
    }
}

/// Lifecycle shared by capture and playback handles.
pub trait StreamHandle: Send + 'static {
    /// Prepare the hardware for streaming.
    fn init(&mut self) -> Result<(), NativeError>;

    /// End streaming.
    fn stop(&mut self) -> Result<(), NativeError>;
}

/// An input stream.
pub trait CaptureHandle: StreamHandle {
    /// Begin capture. `sink` is called once per delivered frame until stop.
    fn do_capture(&mut self, sink: FrameSink) -> Result<(), NativeError>;
}

/// An output stream.
pub trait PlaybackHandle: StreamHandle {
    /// Begin playout. `sink` is called once per completed frame.
    fn do_playback(&mut self, sink: CompletionSink) -> Result<(), NativeError>;

    /// Queue a frame for output.
    fn schedule_frame(&mut self, frame: VideoFrame) -> ScheduleOutcome;
}

/// Entry point to a native driver.
pub trait Driver: Send + Sync + 'static {
    type Capture: CaptureHandle;
    type Playback: PlaybackHandle;

    fn open_capture(
        &self,
        device_index: u32,
        mode: DisplayModeCode,
        format: PixelFormatCode,
    ) -> Result<Self::Capture, NativeError>;

    fn open_playback(
        &self,
        device_index: u32,
        mode: DisplayModeCode,
        format: PixelFormatCode,
    ) -> Result<Self::Playback, NativeError>;

    /// Raw 64-bit API version; see [`crate::info::ApiVersion::from_raw`].
    fn api_version(&self) -> Result<i64, NativeError>;

    /// Model name of the first device, if any.
    fn first_device(&self) -> Option<String>;

    /// Attributes of every attached device.
    fn devices(&self) -> Result<Vec<DeviceAttributes>, NativeError>;

    /// Whether this driver can run here. Hardware drivers exist only on
    /// Windows and macOS.
    fn check_platform(&self) -> Result<(), SessionError> {
        platform::ensure_current()
    }
}
