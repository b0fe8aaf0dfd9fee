//! Running configured capture and playback sessions to completion.

use anyhow::{anyhow, bail, Result};
use deckio_core::{DeckioConfig, VideoFrame};
use deckio_device::{CaptureEvent, DeckLink, Driver, PlaybackEvent};
use std::time::Duration;
use tracing::{debug, info};

/// Frames queued ahead of the output before playout starts.
const PREROLL: u64 = 3;

/// Longest silence tolerated between events.
const EVENT_TIMEOUT: Duration = Duration::from_secs(2);

pub fn capture<D: Driver>(deck: &DeckLink<D>, config: &DeckioConfig) -> Result<()> {
    let Some(settings) = config.capture else {
        bail!("config has no capture section");
    };
    let mut session = deck.capture_with(&settings);
    session.start();

    let mut captured = 0u64;
    let mut bytes = 0usize;
    while captured < config.frames {
        match session.event_source().next_timeout(EVENT_TIMEOUT) {
            Some(CaptureEvent::Frame(frame)) => {
                debug!(
                    sequence = frame.sequence,
                    stream_time = %frame.stream_time,
                    bytes = frame.memory_size(),
                    "Frame captured"
                );
                bytes += frame.memory_size();
                captured += 1;
            }
            Some(CaptureEvent::Error(err)) => bail!(err),
            Some(CaptureEvent::Done) => break,
            None => bail!("no frame within {EVENT_TIMEOUT:?}"),
        }
    }

    session.stop();
    wait_done(|| match session.event_source().next_timeout(EVENT_TIMEOUT) {
        Some(CaptureEvent::Done) => Some(Ok(())),
        Some(CaptureEvent::Error(err)) => Some(Err(anyhow!(err))),
        Some(CaptureEvent::Frame(_)) => None,
        None => Some(Err(anyhow!("capture did not stop"))),
    })?;

    info!(frames = captured, bytes, "Capture finished");
    println!("captured {captured} frames ({bytes} bytes)");
    Ok(())
}

pub fn playback<D: Driver>(deck: &DeckLink<D>, config: &DeckioConfig) -> Result<()> {
    let Some(settings) = config.playback else {
        bail!("config has no playback section");
    };
    let (_, mode, format) = settings.codes();
    let mut session = deck.playback_with(&settings);

    let mut scheduled = 0u64;
    let mut schedule_next = |session: &mut deckio_device::PlaybackSession<D::Playback>| {
        if scheduled >= config.frames {
            return;
        }
        if session
            .schedule_frame(VideoFrame::blank(mode, format, scheduled))
            .is_some()
        {
            scheduled += 1;
        }
    };

    for _ in 0..PREROLL {
        schedule_next(&mut session);
    }
    session.start();

    let mut played = 0u64;
    while played < config.frames {
        match session.event_source().next_timeout(EVENT_TIMEOUT) {
            Some(PlaybackEvent::Played(completion)) => {
                debug!(token = completion.token.0, result = ?completion.result, "Frame played");
                played += 1;
                schedule_next(&mut session);
            }
            Some(PlaybackEvent::Error(err)) => bail!(err),
            Some(PlaybackEvent::Done) => break,
            None => bail!("no completion within {EVENT_TIMEOUT:?}"),
        }
    }

    session.stop();
    wait_done(|| match session.event_source().next_timeout(EVENT_TIMEOUT) {
        Some(PlaybackEvent::Done) => Some(Ok(())),
        Some(PlaybackEvent::Error(err)) => Some(Err(anyhow!(err))),
        Some(PlaybackEvent::Played(_)) => None,
        None => Some(Err(anyhow!("playback did not stop"))),
    })?;

    info!(frames = played, "Playback finished");
    println!("played {played} frames");
    Ok(())
}

/// Poll `next` until it yields an outcome.
fn wait_done(mut next: impl FnMut() -> Option<Result<()>>) -> Result<()> {
    loop {
        if let Some(outcome) = next() {
            return outcome;
        }
    }
}
