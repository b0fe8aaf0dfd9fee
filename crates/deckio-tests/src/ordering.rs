//! Callback ordering: events must come out in the order the engine fired them.

use deckio_core::{DisplayMode, PixelFormat, SessionConfig, VideoFrame};
use deckio_device::{
    CaptureEvent, CompletionResult, DeckLink, PlaybackEvent, ScheduleToken, SimulatedDriver,
};
use std::thread;
use std::time::Duration;

const CALLBACKS: u64 = 150;

fn config() -> SessionConfig {
    SessionConfig::new(0, DisplayMode::Hd720p5994, PixelFormat::Yuv8)
}

#[test]
fn frames_from_another_thread_arrive_in_order() {
    let deck = DeckLink::load(SimulatedDriver::manual()).unwrap();
    let mut session = deck.capture_with(&config());
    session.start();

    let driver = deck.driver().clone();
    let injector = thread::spawn(move || {
        for i in 0..CALLBACKS {
            assert!(driver.inject_frame(i.to_le_bytes().to_vec()));
            if i % 16 == 0 {
                thread::yield_now();
            }
        }
    });

    let mut received = Vec::new();
    while (received.len() as u64) < CALLBACKS {
        match session.event_source().next_timeout(Duration::from_secs(5)) {
            Some(CaptureEvent::Frame(frame)) => received.push(frame),
            other => panic!("unexpected {other:?}"),
        }
    }
    injector.join().unwrap();

    for (i, frame) in received.iter().enumerate() {
        assert_eq!(frame.sequence, i as u64);
        assert_eq!(frame.data, (i as u64).to_le_bytes().to_vec());
    }
}

#[test]
fn interleaved_schedule_and_completion_keep_order() {
    let deck = DeckLink::load(SimulatedDriver::manual()).unwrap();
    let (_, mode, format) = config().codes();
    let mut session = deck.playback_with(&config());
    session.start();

    let mut scheduled: Vec<ScheduleToken> = Vec::new();
    let mut completed = 0;
    for i in 0..CALLBACKS {
        scheduled.push(session.schedule_frame(VideoFrame::blank(mode, format, i)).unwrap());
        // complete every other step, lagging behind the scheduler
        if i % 2 == 1 {
            deck.driver().complete_next(CompletionResult::Completed);
            completed += 1;
        }
    }
    while deck.driver().complete_next(CompletionResult::DisplayedLate).is_some() {
        completed += 1;
    }
    assert_eq!(completed, CALLBACKS);

    let played: Vec<ScheduleToken> = session
        .event_source()
        .drain()
        .into_iter()
        .map(|event| match event {
            PlaybackEvent::Played(completion) => completion.token,
            other => panic!("unexpected {other:?}"),
        })
        .collect();
    assert_eq!(played, scheduled);
}

#[test]
fn capture_and_playback_callbacks_interleave_without_crosstalk() {
    let deck = DeckLink::load(SimulatedDriver::manual()).unwrap();
    let (_, mode, format) = config().codes();
    let mut capture = deck.capture_with(&config());
    let mut playback = deck.playback_with(&config());
    capture.start();
    playback.start();

    for i in 0..CALLBACKS {
        if i % 3 == 0 {
            playback.schedule_frame(VideoFrame::blank(mode, format, i));
            deck.driver().complete_next(CompletionResult::Completed);
        } else {
            deck.driver().inject_frame(vec![i as u8]);
        }
    }

    let frames = capture.event_source().drain();
    let played = playback.event_source().drain();
    assert_eq!(frames.len() + played.len(), CALLBACKS as usize);
    assert!(frames
        .iter()
        .enumerate()
        .all(|(i, e)| matches!(e, CaptureEvent::Frame(f) if f.sequence == i as u64)));
    assert!(played.iter().all(|e| matches!(e, PlaybackEvent::Played(_))));
}

#[test]
fn realtime_capture_stops_cleanly() {
    let deck = DeckLink::load(SimulatedDriver::realtime()).unwrap();
    let config = SessionConfig::new(0, DisplayMode::Hd1080p6000, PixelFormat::Yuv8);
    let mut session = deck.capture_with(&config);
    session.start();

    let first = session.event_source().next_timeout(Duration::from_secs(2));
    assert!(matches!(first, Some(CaptureEvent::Frame(ref f)) if f.sequence == 0));
    session.stop();

    // everything after the last frame is the single Done
    let rest = session.event_source().drain();
    assert_eq!(rest.last(), Some(&CaptureEvent::Done));
    assert_eq!(
        rest.iter().filter(|e| **e == CaptureEvent::Done).count(),
        1
    );
}
