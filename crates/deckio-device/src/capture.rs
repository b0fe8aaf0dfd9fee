//! Input sessions.

use crate::driver::{CaptureHandle, Driver, Sink};
use crate::error::SessionKind;
use crate::event::{CaptureEvent, EventSource};
use crate::session::{parse_args, Session, SessionState};
use crossbeam_channel::Receiver;
use deckio_core::{DisplayModeCode, PixelFormatCode};
use serde_json::Value;

/// A capture stream on one device.
///
/// Each frame the driver delivers becomes one [`CaptureEvent::Frame`],
/// in delivery order, with the buffer untouched.
pub struct CaptureSession<H: CaptureHandle> {
    inner: Session<H, CaptureEvent>,
}

impl<H: CaptureHandle> CaptureSession<H> {
    /// Open device `device_index` for capture in `mode`/`format`.
    pub fn open<D>(
        driver: &D,
        device_index: u32,
        mode: DisplayModeCode,
        format: PixelFormatCode,
    ) -> Self
    where
        D: Driver<Capture = H>,
    {
        Self {
            inner: Session::open(SessionKind::Capture, device_index, mode, format, |i, m, f| {
                driver.open_capture(i, m, f)
            }),
        }
    }

    /// Open from positional `[device_index, display_mode, pixel_format]`.
    ///
    /// Bad arguments leave one `Error` queued and no native handle.
    pub fn from_args<D>(driver: &D, args: &[Value]) -> Self
    where
        D: Driver<Capture = H>,
    {
        match parse_args(SessionKind::Capture, args) {
            Ok((index, mode, format)) => Self::open(driver, index, mode, format),
            Err(err) => Self {
                inner: Session::rejected(SessionKind::Capture, err),
            },
        }
    }

    /// Initialize once, then begin delivering frames.
    pub fn start(&mut self) {
        self.inner
            .start_with(|handle, tx| handle.do_capture(Sink::new(tx)));
    }

    /// Stop delivering frames and emit `Done`.
    pub fn stop(&mut self) {
        self.inner.stop();
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

    pub fn events(&self) -> Receiver<CaptureEvent> {
        self.inner.events()
    }

    pub fn event_source(&self) -> &EventSource<CaptureEvent> {
        self.inner.event_source()
    }

    /// The native handle, for driver-specific calls.
    pub fn handle_mut(&mut self) -> Option<&mut H> {
        self.inner.handle_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SessionError;
    use crate::sim::{Faults, SimulatedDriver};
    use deckio_core::{DisplayMode, PixelFormat};
    use serde_json::json;

    fn open(driver: &SimulatedDriver) -> CaptureSession<crate::sim::SimCapture> {
        CaptureSession::open(
            driver,
            0,
            DisplayMode::Hd1080p25.code(),
            PixelFormat::Yuv10.code(),
        )
    }

    #[test]
    fn test_frames_pass_through_unchanged() {
        let driver = SimulatedDriver::manual();
        let mut session = open(&driver);
        session.start();

        assert!(driver.inject_frame(vec![1, 2, 3]));
        assert!(driver.inject_frame(vec![4, 5]));

        let events = session.event_source().drain();
        assert_eq!(events.len(), 2);
        match &events[0] {
            CaptureEvent::Frame(frame) => {
                assert_eq!(frame.data, vec![1, 2, 3]);
                assert_eq!(frame.sequence, 0);
                assert_eq!(frame.display_mode, DisplayMode::Hd1080p25.code());
            }
            other => panic!("expected frame, got {other:?}"),
        }
        assert!(matches!(&events[1], CaptureEvent::Frame(f) if f.sequence == 1));
    }

    #[test]
    fn test_start_twice_inits_once() {
        let driver = SimulatedDriver::manual();
        let mut session = open(&driver);
        session.start();
        session.start();
        assert_eq!(driver.counts().inits, 1);
        assert_eq!(session.state(), SessionState::Running);
    }

    #[test]
    fn test_bad_arguments() {
        let driver = SimulatedDriver::manual();
        let session = CaptureSession::from_args(&driver, &[json!(0), json!("Hp25"), json!(0)]);
        assert!(!session.has_handle());
        assert_eq!(driver.counts().opens, 0);

        let events = session.event_source().drain();
        assert_eq!(events.len(), 1);
        assert!(matches!(
            events[0],
            CaptureEvent::Error(SessionError::ConstructionArgument { .. })
        ));
    }

    #[test]
    fn test_start_without_handle() {
        let driver = SimulatedDriver::manual();
        let mut session = CaptureSession::from_args(&driver, &[]);
        session.event_source().drain();
        session.start();
        assert_eq!(
            session.event_source().drain(),
            vec![CaptureEvent::Error(SessionError::NoHandle(SessionKind::Capture))]
        );
    }

    #[test]
    fn test_stop_emits_done() {
        let driver = SimulatedDriver::manual();
        let mut session = open(&driver);
        session.start();
        session.stop();
        assert_eq!(driver.counts().stops, 1);
        assert_eq!(session.event_source().drain(), vec![CaptureEvent::Done]);
        assert_eq!(session.state(), SessionState::Stopped);
    }

    #[test]
    fn test_stop_failure_is_an_event() {
        let driver = SimulatedDriver::manual();
        let mut session = open(&driver);
        session.start();
        driver.set_faults(Faults {
            stop: true,
            ..Faults::default()
        });
        session.stop();

        let events = session.event_source().drain();
        assert_eq!(events.len(), 1);
        assert!(matches!(
            &events[0],
            CaptureEvent::Error(SessionError::NativeCall { operation: "stop", .. })
        ));
        assert_eq!(session.state(), SessionState::Running);
    }

    #[test]
    fn test_restart_after_stop() {
        let driver = SimulatedDriver::manual();
        let mut session = open(&driver);
        session.start();
        session.stop();
        session.start();
        assert_eq!(session.state(), SessionState::Running);
        assert_eq!(driver.counts().inits, 1);
        assert_eq!(driver.counts().starts, 2);
    }
}
