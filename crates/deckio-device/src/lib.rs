//! deckio device - capture and playback sessions
//!
//! Drives a video I/O card through the [`Driver`] contract and turns its
//! callbacks into ordered events.
//!
//! Architecture:
//! - `Driver`: native engine contract (open, init, stream, schedule, stop)
//! - `EventSource`: per-session channel buffering `Error`/`Frame`/`Played`/`Done`
//! - `CaptureSession` / `PlaybackSession`: lifecycle over one native handle
//! - `DeckLink`: facade for loading a driver and querying devices
//! - `SimulatedDriver`: in-process engine for tests and demos

pub mod capture;
pub mod deck;
pub mod driver;
pub mod error;
pub mod event;
pub mod info;
pub mod platform;
pub mod playback;
pub mod session;
pub mod sim;

pub use capture::CaptureSession;
pub use deck::DeckLink;
pub use driver::{
    CaptureHandle, Completion, CompletionResult, CompletionSink, Driver, FrameSink,
    PlaybackHandle, ScheduleOutcome, ScheduleToken, Sink, StreamHandle,
};
pub use error::{NativeError, SessionError, SessionKind};
pub use event::{CaptureEvent, EventSource, PlaybackEvent, SessionEvent};
pub use info::{ApiVersion, DeviceAttributes, DeviceInfo, DeviceInterface, VideoConnection};
pub use playback::PlaybackSession;
pub use session::{parse_args, SessionState};
pub use sim::{CallCounts, Faults, Pacing, SimCapture, SimPlayback, SimulatedDriver};
