//! Session lifecycle across deckio-device and the simulated engine.

use deckio_core::{DisplayMode, PixelFormat, SessionConfig, VideoFrame};
use deckio_device::{
    CaptureEvent, DeckLink, Faults, PlaybackEvent, SessionError, SessionKind, SessionState,
    SimulatedDriver,
};
use serde_json::json;

// ── Helpers ────────────────────────────────────────────────────

fn deck() -> DeckLink<SimulatedDriver> {
    DeckLink::load(SimulatedDriver::manual()).unwrap()
}

fn config() -> SessionConfig {
    SessionConfig::new(0, DisplayMode::Hd1080p25, PixelFormat::Yuv10)
}

fn blank(sequence: u64) -> VideoFrame {
    let (_, mode, format) = config().codes();
    VideoFrame::blank(mode, format, sequence)
}

// ── Construction ───────────────────────────────────────────────

#[test]
fn non_numeric_argument_queues_one_error() {
    let deck = deck();
    let session = deck.capture_from_args(&[json!(0), json!("bmdModeHD1080p25"), json!(0)]);

    assert!(!session.has_handle());
    assert_eq!(session.state(), SessionState::Unconstructed);
    assert_eq!(deck.driver().counts().opens, 0);

    // read after construction returned: still there
    let events: Vec<_> = session.events().try_iter().collect();
    assert_eq!(events.len(), 1);
    match &events[0] {
        CaptureEvent::Error(err @ SessionError::ConstructionArgument { .. }) => {
            assert!(err
                .to_string()
                .starts_with("Capture requires three number arguments"));
        }
        other => panic!("expected construction error, got {other:?}"),
    }
}

#[test]
fn wrong_arity_is_rejected_for_playback() {
    let deck = deck();
    let session = deck.playback_from_args(&[json!(0), json!(1)]);
    assert_eq!(
        session.event_source().drain().len(),
        1,
        "exactly one error for a bad construction"
    );
    assert!(!session.has_handle());
}

#[test]
fn driver_open_failure_is_an_event() {
    let deck = deck();
    deck.driver().set_faults(Faults {
        open: true,
        ..Faults::default()
    });
    let session = deck.capture_with(&config());
    assert!(!session.has_handle());
    assert!(matches!(
        session.event_source().try_next(),
        Some(CaptureEvent::Error(SessionError::NativeCall { operation: "open", .. }))
    ));
}

// ── Initialization ─────────────────────────────────────────────

#[test]
fn start_twice_initializes_once() {
    let deck = deck();
    let mut session = deck.capture_with(&config());
    session.start();
    session.start();
    assert_eq!(deck.driver().counts().inits, 1);
    assert!(session.is_initialized());
}

#[test]
fn schedule_before_start_initializes_once() {
    let deck = deck();
    let mut session = deck.playback_with(&config());
    assert!(session.schedule_frame(blank(0)).is_some());
    assert!(session.schedule_frame(blank(1)).is_some());
    session.start();
    assert_eq!(deck.driver().counts().inits, 1);
    assert_eq!(session.state(), SessionState::Running);
}

#[test]
fn start_failure_keeps_session_startable() {
    let deck = deck();
    let mut session = deck.capture_with(&config());
    deck.driver().set_faults(Faults {
        start: true,
        ..Faults::default()
    });
    session.start();
    assert!(matches!(
        session.event_source().try_next(),
        Some(CaptureEvent::Error(SessionError::NativeCall { operation: "start", .. }))
    ));
    assert_eq!(session.state(), SessionState::Initialized);

    deck.driver().set_faults(Faults::default());
    session.start();
    assert_eq!(session.state(), SessionState::Running);
    assert_eq!(deck.driver().counts().inits, 1);
}

// ── Scheduling ─────────────────────────────────────────────────

#[test]
fn rejected_schedule_emits_error_and_returns_nothing() {
    let deck = deck();
    let mut session = deck.playback_with(&config());
    session.start();
    deck.driver().set_faults(Faults {
        reject_schedule: Some("no free buffers".into()),
        ..Faults::default()
    });

    assert_eq!(session.schedule_frame(blank(0)), None);
    assert_eq!(
        session.event_source().drain(),
        vec![PlaybackEvent::Error(SessionError::Scheduling(
            "no free buffers".into()
        ))]
    );
}

#[test]
fn accepted_schedule_returns_token_without_events() {
    let deck = deck();
    let mut session = deck.playback_with(&config());
    session.start();
    let first = session.schedule_frame(blank(0)).unwrap();
    let second = session.schedule_frame(blank(1)).unwrap();
    assert!(second > first);
    assert_eq!(session.event_source().pending(), 0);
}

// ── Stopping ───────────────────────────────────────────────────

#[test]
fn stop_never_started_is_done_without_error() {
    let deck = deck();
    let mut capture = deck.capture_with(&config());
    capture.stop();
    assert_eq!(capture.event_source().drain(), vec![CaptureEvent::Done]);
    assert_eq!(deck.driver().counts().stops, 0);
}

#[test]
fn stop_without_handle_reports_missing_handle() {
    let deck = deck();
    let mut session = deck.playback_from_args(&[]);
    session.event_source().drain();
    session.stop();
    assert_eq!(
        session.event_source().drain(),
        vec![PlaybackEvent::Error(SessionError::NoHandle(
            SessionKind::Playback
        ))]
    );
}

#[test]
fn playback_stop_flushes_then_done() {
    let deck = deck();
    let mut session = deck.playback_with(&config());
    session.start();
    session.schedule_frame(blank(0));
    session.stop();

    let events = session.event_source().drain();
    assert_eq!(events.len(), 2);
    assert!(matches!(events[0], PlaybackEvent::Played(_)));
    assert_eq!(events[1], PlaybackEvent::Done);
    assert_eq!(session.state(), SessionState::Stopped);
}

#[test]
fn dropping_a_running_session_stops_it() {
    let deck = deck();
    {
        let mut session = deck.capture_with(&config());
        session.start();
    }
    assert_eq!(deck.driver().counts().stops, 1);
    assert!(!deck.driver().inject_frame(vec![0]));
}

#[test]
fn stopped_session_keeps_its_handle_until_dropped() {
    let deck = deck();
    {
        let mut session = deck.capture_with(&config());
        session.start();
        session.stop();
        assert!(session.has_handle());
        assert_eq!(session.state(), SessionState::Stopped);

        session.start();
        assert_eq!(session.state(), SessionState::Running);
        assert!(deck.driver().inject_frame(vec![2]));
        assert_eq!(deck.driver().counts().opens, 1);
    }
    assert!(!deck.driver().inject_frame(vec![3]));
}

#[test]
fn independent_sessions_do_not_share_events() {
    let deck = deck();
    let mut a = deck.capture_with(&config());
    let b = deck.capture_with(&config());
    a.start();
    assert!(deck.driver().inject_frame(vec![1]));
    assert_eq!(a.event_source().pending(), 1);
    assert_eq!(b.event_source().pending(), 0);
}
