//! An in-process stand-in for the hardware driver.
//!
//! [`SimulatedDriver`] runs anywhere. With [`Pacing::Manual`] nothing
//! happens until the caller pushes frames or completions through the driver;
//! with [`Pacing::Realtime`] each running stream gets a worker thread that
//! fires callbacks at the mode's exact frame duration.

use crate::driver::{
    CaptureHandle, Completion, CompletionResult, CompletionSink, Driver, FrameSink, PlaybackHandle,
    ScheduleOutcome, ScheduleToken, StreamHandle,
};
use crate::error::{NativeError, SessionError};
use crate::info::{ApiVersion, DeviceAttributes, DeviceInterface, VideoConnection};
use crossbeam_channel::{RecvTimeoutError, Sender};
use deckio_core::{
    frame_size, mode_grain_duration, DisplayMode, DisplayModeCode, GrainDuration, PixelFormat,
    PixelFormatCode, VideoFrame,
};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Instant;
use tracing::{debug, trace};

/// API version the simulator reports.
pub const SIMULATED_API_VERSION: ApiVersion = ApiVersion {
    major: 12,
    minor: 4,
    point: 1,
};

/// Tick used for modes without a frame duration.
const FALLBACK_GRAIN: GrainDuration = GrainDuration::new(1, 25);

/// Who drives the callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pacing {
    /// The test pushes frames and completions.
    #[default]
    Manual,
    /// Worker threads fire at the frame rate.
    Realtime,
}

/// Native calls that should fail.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Faults {
    pub open: bool,
    pub init: bool,
    pub start: bool,
    pub stop: bool,
    /// Answer every scheduling request with this message.
    pub reject_schedule: Option<String>,
}

/// How often each native entry point has been called.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallCounts {
    pub opens: u32,
    pub inits: u32,
    pub starts: u32,
    pub stops: u32,
    /// Frames accepted by the scheduler
    pub scheduled: u32,
}

struct CaptureTap {
    stream: u64,
    sink: FrameSink,
    mode: DisplayModeCode,
    format: PixelFormatCode,
    next_sequence: u64,
}

impl CaptureTap {
    fn deliver(&mut self, data: Vec<u8>) -> bool {
        let frame = VideoFrame::new(self.mode, self.format, self.next_sequence, data);
        self.next_sequence += 1;
        self.sink.deliver(frame)
    }
}

struct PlaybackTap {
    stream: u64,
    sink: CompletionSink,
}

struct SimState {
    pacing: Pacing,
    faults: Faults,
    counts: CallCounts,
    devices: Vec<DeviceAttributes>,
    next_stream: u64,
    next_token: u64,
    captures: Vec<CaptureTap>,
    playbacks: Vec<PlaybackTap>,
    /// Scheduled frames not yet played, oldest first
    queue: VecDeque<(u64, ScheduleToken)>,
}

impl SimState {
    /// Complete the oldest queued frame belonging to a running stream.
    fn complete_next(
        &mut self,
        stream: Option<u64>,
        result: CompletionResult,
    ) -> Option<Completion> {
        let position = self.queue.iter().position(|(owner, _)| {
            stream.map_or(true, |s| s == *owner) && self.playbacks.iter().any(|t| t.stream == *owner)
        })?;
        let (owner, token) = self.queue.remove(position)?;
        let completion = Completion { token, result };
        if let Some(tap) = self.playbacks.iter().find(|t| t.stream == owner) {
            tap.sink.complete(completion);
        }
        Some(completion)
    }

    fn allocate_stream(
        &mut self,
        device_index: u32,
        mode: DisplayModeCode,
        format: PixelFormatCode,
    ) -> Result<u64, NativeError> {
        self.counts.opens += 1;
        if self.faults.open {
            return Err(NativeError::new("simulated open failure"));
        }
        if device_index as usize >= self.devices.len() {
            return Err(NativeError::new(format!("no device at index {device_index}")));
        }
        if DisplayMode::from_code(mode).is_none() {
            return Err(NativeError::new(format!("display mode {mode} not supported")));
        }
        if PixelFormat::from_code(format).is_none() {
            return Err(NativeError::new(format!("pixel format {format} not supported")));
        }
        let stream = self.next_stream;
        self.next_stream += 1;
        Ok(stream)
    }

    fn init(&mut self) -> Result<(), NativeError> {
        self.counts.inits += 1;
        if self.faults.init {
            return Err(NativeError::new("simulated init failure"));
        }
        Ok(())
    }

    fn start(&mut self) -> Result<(), NativeError> {
        self.counts.starts += 1;
        if self.faults.start {
            return Err(NativeError::new("simulated start failure"));
        }
        Ok(())
    }

    fn stop(&mut self) -> Result<(), NativeError> {
        self.counts.stops += 1;
        if self.faults.stop {
            return Err(NativeError::new("simulated stop failure"));
        }
        Ok(())
    }
}

/// A paced callback thread.
struct Worker {
    stop_tx: Sender<()>,
    thread: JoinHandle<()>,
}

impl Worker {
    /// Call `tick` once per `grain` until it returns `false` or `finish`
    /// runs. Tick `n` is due at `start + n * grain`, so late wakeups do not
    /// push later ticks back.
    fn spawn(
        name: String,
        grain: GrainDuration,
        mut tick: impl FnMut() -> bool + Send + 'static,
    ) -> Result<Self, NativeError> {
        let (stop_tx, stop_rx) = crossbeam_channel::bounded::<()>(1);
        let thread = thread::Builder::new()
            .name(name)
            .spawn(move || {
                let start = Instant::now();
                let mut ticks = 0u64;
                loop {
                    ticks += 1;
                    match stop_rx.recv_deadline(tick_deadline(start, grain, ticks)) {
                        Err(RecvTimeoutError::Timeout) => {
                            if !tick() {
                                break;
                            }
                        }
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
            })
            .map_err(|err| NativeError::new(format!("failed to spawn stream thread: {err}")))?;
        Ok(Self { stop_tx, thread })
    }

    fn finish(self) {
        let _ = self.stop_tx.send(());
        if self.thread.join().is_err() {
            debug!("Simulated stream thread panicked");
        }
    }
}

fn tick_deadline(start: Instant, grain: GrainDuration, ticks: u64) -> Instant {
    start + grain.std_offset(ticks)
}

fn grain_of(mode: DisplayModeCode) -> GrainDuration {
    let grain = mode_grain_duration(mode);
    if grain.is_zero() {
        FALLBACK_GRAIN
    } else {
        grain
    }
}

/// The default simulated card.
pub fn simulated_device() -> DeviceAttributes {
    let sdi_hdmi = VideoConnection::to_mask(&[VideoConnection::Sdi, VideoConnection::Hdmi]);
    DeviceAttributes {
        model_name: "DeckLink Simulator".to_string(),
        display_name: "DeckLink Simulator (1)".to_string(),
        persistent_id: 0x5349_4D31,
        topological_id: 0x0001_0000,
        maximum_audio_channels: 16,
        supports_input_format_detection: true,
        supports_full_duplex: true,
        interface: DeviceInterface::Pci.code(),
        video_output_connections: sdi_hdmi,
        video_input_connections: sdi_hdmi,
        ..DeviceAttributes::default()
    }
}

/// In-process driver with scripted or real-time callbacks.
#[derive(Clone)]
pub struct SimulatedDriver {
    state: Arc<Mutex<SimState>>,
}

impl SimulatedDriver {
    pub fn new(pacing: Pacing) -> Self {
        Self {
            state: Arc::new(Mutex::new(SimState {
                pacing,
                faults: Faults::default(),
                counts: CallCounts::default(),
                devices: vec![simulated_device()],
                next_stream: 0,
                next_token: 1,
                captures: Vec::new(),
                playbacks: Vec::new(),
                queue: VecDeque::new(),
            })),
        }
    }

    pub fn manual() -> Self {
        Self::new(Pacing::Manual)
    }

    pub fn realtime() -> Self {
        Self::new(Pacing::Realtime)
    }

    /// Replace the attached devices.
    pub fn with_devices(self, devices: Vec<DeviceAttributes>) -> Self {
        self.state.lock().devices = devices;
        self
    }

    pub fn set_faults(&self, faults: Faults) {
        self.state.lock().faults = faults;
    }

    pub fn counts(&self) -> CallCounts {
        self.state.lock().counts
    }

    /// Deliver one frame to every running capture stream.
    ///
    /// Returns `false` if no stream took it.
    pub fn inject_frame(&self, data: Vec<u8>) -> bool {
        let mut state = self.state.lock();
        let mut delivered = false;
        for tap in state.captures.iter_mut() {
            delivered |= tap.deliver(data.clone());
        }
        delivered
    }

    /// Play out the oldest scheduled frame of any running playback stream.
    pub fn complete_next(&self, result: CompletionResult) -> Option<Completion> {
        self.state.lock().complete_next(None, result)
    }

    /// Frames scheduled but not yet completed.
    pub fn queued_frames(&self) -> usize {
        self.state.lock().queue.len()
    }
}

impl Default for SimulatedDriver {
    fn default() -> Self {
        Self::manual()
    }
}

impl Driver for SimulatedDriver {
    type Capture = SimCapture;
    type Playback = SimPlayback;

    fn open_capture(
        &self,
        device_index: u32,
        mode: DisplayModeCode,
        format: PixelFormatCode,
    ) -> Result<SimCapture, NativeError> {
        let stream = self.state.lock().allocate_stream(device_index, mode, format)?;
        Ok(SimCapture {
            stream,
            mode,
            format,
            state: Arc::clone(&self.state),
            worker: None,
        })
    }

    fn open_playback(
        &self,
        device_index: u32,
        mode: DisplayModeCode,
        format: PixelFormatCode,
    ) -> Result<SimPlayback, NativeError> {
        let stream = self.state.lock().allocate_stream(device_index, mode, format)?;
        Ok(SimPlayback {
            stream,
            mode,
            state: Arc::clone(&self.state),
            worker: None,
        })
    }

    fn api_version(&self) -> Result<i64, NativeError> {
        Ok(SIMULATED_API_VERSION.to_raw())
    }

    fn first_device(&self) -> Option<String> {
        self.state
            .lock()
            .devices
            .first()
            .map(|device| device.model_name.clone())
    }

    fn devices(&self) -> Result<Vec<DeviceAttributes>, NativeError> {
        Ok(self.state.lock().devices.clone())
    }

    fn check_platform(&self) -> Result<(), SessionError> {
        Ok(())
    }
}

/// Simulated capture handle.
pub struct SimCapture {
    stream: u64,
    mode: DisplayModeCode,
    format: PixelFormatCode,
    state: Arc<Mutex<SimState>>,
    worker: Option<Worker>,
}

impl SimCapture {
    fn detach(&mut self) {
        self.state.lock().captures.retain(|tap| tap.stream != self.stream);
        if let Some(worker) = self.worker.take() {
            worker.finish();
        }
    }
}

impl StreamHandle for SimCapture {
    fn init(&mut self) -> Result<(), NativeError> {
        self.state.lock().init()
    }

    fn stop(&mut self) -> Result<(), NativeError> {
        self.state.lock().stop()?;
        self.detach();
        debug!(stream = self.stream, "Simulated capture stopped");
        Ok(())
    }
}

impl CaptureHandle for SimCapture {
    fn do_capture(&mut self, sink: FrameSink) -> Result<(), NativeError> {
        let pacing = {
            let mut state = self.state.lock();
            state.start()?;
            if state.captures.iter().any(|tap| tap.stream == self.stream) {
                return Ok(());
            }
            state.captures.push(CaptureTap {
                stream: self.stream,
                sink,
                mode: self.mode,
                format: self.format,
                next_sequence: 0,
            });
            state.pacing
        };

        if pacing == Pacing::Realtime {
            let state = Arc::clone(&self.state);
            let stream = self.stream;
            let size = frame_size(self.mode, self.format);
            self.worker = Some(Worker::spawn(
                format!("deckio-capture-{stream}"),
                grain_of(self.mode),
                move || {
                    let mut state = state.lock();
                    match state.captures.iter_mut().find(|tap| tap.stream == stream) {
                        Some(tap) => {
                            trace!(stream, sequence = tap.next_sequence, "Simulated frame");
                            tap.deliver(vec![0u8; size])
                        }
                        None => false,
                    }
                },
            )?);
        }
        debug!(stream = self.stream, ?pacing, "Simulated capture started");
        Ok(())
    }
}

impl Drop for SimCapture {
    fn drop(&mut self) {
        self.detach();
    }
}

/// Simulated playback handle.
pub struct SimPlayback {
    stream: u64,
    mode: DisplayModeCode,
    state: Arc<Mutex<SimState>>,
    worker: Option<Worker>,
}

impl SimPlayback {
    /// Flush queued frames and unregister; flushed frames still complete.
    fn detach(&mut self) {
        {
            let mut state = self.state.lock();
            while state
                .complete_next(Some(self.stream), CompletionResult::Flushed)
                .is_some()
            {}
            let stream = self.stream;
            state.queue.retain(|(owner, _)| *owner != stream);
            state.playbacks.retain(|tap| tap.stream != stream);
        }
        if let Some(worker) = self.worker.take() {
            worker.finish();
        }
    }
}

impl StreamHandle for SimPlayback {
    fn init(&mut self) -> Result<(), NativeError> {
        self.state.lock().init()
    }

    fn stop(&mut self) -> Result<(), NativeError> {
        self.state.lock().stop()?;
        self.detach();
        debug!(stream = self.stream, "Simulated playback stopped");
        Ok(())
    }
}

impl PlaybackHandle for SimPlayback {
    fn do_playback(&mut self, sink: CompletionSink) -> Result<(), NativeError> {
        let pacing = {
            let mut state = self.state.lock();
            state.start()?;
            if state.playbacks.iter().any(|tap| tap.stream == self.stream) {
                return Ok(());
            }
            state.playbacks.push(PlaybackTap {
                stream: self.stream,
                sink,
            });
            state.pacing
        };

        if pacing == Pacing::Realtime {
            let state = Arc::clone(&self.state);
            let stream = self.stream;
            self.worker = Some(Worker::spawn(
                format!("deckio-playback-{stream}"),
                grain_of(self.mode),
                move || {
                    let mut state = state.lock();
                    if !state.playbacks.iter().any(|tap| tap.stream == stream) {
                        return false;
                    }
                    state.complete_next(Some(stream), CompletionResult::Completed);
                    true
                },
            )?);
        }
        debug!(stream = self.stream, ?pacing, "Simulated playback started");
        Ok(())
    }

    fn schedule_frame(&mut self, frame: VideoFrame) -> ScheduleOutcome {
        let mut state = self.state.lock();
        if let Some(message) = state.faults.reject_schedule.clone() {
            return ScheduleOutcome::Rejected(message);
        }
        state.counts.scheduled += 1;
        let token = ScheduleToken(state.next_token);
        state.next_token += 1;
        state.queue.push_back((self.stream, token));
        trace!(stream = self.stream, token = token.0, bytes = frame.data.len(), "Simulated schedule");
        ScheduleOutcome::Scheduled(token)
    }
}

impl Drop for SimPlayback {
    fn drop(&mut self) {
        self.detach();
    }
}
