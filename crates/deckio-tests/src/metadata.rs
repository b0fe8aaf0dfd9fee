//! Metadata as seen through frames and sessions.

use deckio_core::{
    format_colorimetry, format_depth, format_fourcc, format_sampling, frame_size,
    mode_grain_duration, mode_height, mode_interlace, mode_width, pack_tag, registry, unpack_tag,
    DisplayMode, DisplayModeCode, GrainDuration, PixelFormat, PixelFormatCode, RationalTime,
};
use deckio_device::{CaptureEvent, DeckLink, SimulatedDriver};

#[test]
fn every_mode_tag_round_trips() {
    for mode in DisplayMode::ALL {
        let code = mode.code();
        assert_eq!(pack_tag(&unpack_tag(code.0)).unwrap(), code.0, "{}", mode.name());
    }
}

#[test]
fn argb_is_plain_32() {
    assert_eq!(PixelFormat::Argb8.code(), PixelFormatCode(32));
    assert_eq!(registry().value_of("bmdFormat8BitARGB"), Some(32));
    assert_eq!(PixelFormat::Argb8.tag(), None);
}

#[test]
fn reference_timings_are_exact() {
    assert_eq!(
        mode_grain_duration(DisplayMode::Ntsc.code()),
        GrainDuration::new(1001, 30000)
    );
    assert_eq!(
        mode_grain_duration(DisplayMode::Hd1080p25.code()),
        GrainDuration::new(1000, 25000)
    );
    // 30000 NTSC frames are exactly 1001 seconds
    let grain = mode_grain_duration(DisplayMode::Ntsc.code());
    assert_eq!(grain.frames_to_time(30000), RationalTime::new(1001, 1));
}

#[test]
fn sixty_and_fifty_nine_point_nine_four_stay_distinct() {
    let exact = mode_grain_duration(DisplayMode::Hd1080p6000.code());
    let drop = mode_grain_duration(DisplayMode::Hd1080p5994.code());
    assert_ne!(exact.as_time(), drop.as_time());
    assert_eq!(drop.as_time(), RationalTime::new(1001, 60000));
}

#[test]
fn reference_geometry() {
    let uhd = DisplayMode::Mode4k2160p25.code();
    assert_eq!((mode_width(uhd), mode_height(uhd)), (3840, 2160));
    let dci = DisplayMode::Mode2kDci24.code();
    assert_eq!((mode_width(dci), mode_height(dci)), (2048, 1080));
    assert!(mode_interlace(DisplayMode::Hd1080i50.code()));
}

#[test]
fn unknown_codes_are_zero() {
    let mode = DisplayModeCode::from_tag(b"zzzz");
    let format = PixelFormatCode(0xDEAD_BEEF);
    assert_eq!(mode_width(mode), 0);
    assert_eq!(mode_height(mode), 0);
    assert_eq!(mode_grain_duration(mode), GrainDuration::ZERO);
    assert!(!mode_interlace(mode));
    assert_eq!(format_depth(format), 0);
    assert_eq!(format_fourcc(format), "");
    assert_eq!(format_sampling(format), "");
    assert_eq!(format_colorimetry(format), "");
    assert_eq!(frame_size(mode, PixelFormat::Yuv8.code()), 0);
}

#[test]
fn captured_frames_carry_exact_stream_time() {
    let deck = DeckLink::load(SimulatedDriver::manual()).unwrap();
    let mode = DisplayMode::Ntsc.code();
    let format = PixelFormat::Yuv8.code();
    let mut session = deck.capture(0, mode, format);
    session.start();
    for _ in 0..3 {
        deck.driver().inject_frame(vec![0; frame_size(mode, format)]);
    }

    let frames: Vec<_> = session
        .event_source()
        .drain()
        .into_iter()
        .filter_map(|e| match e {
            CaptureEvent::Frame(f) => Some(f),
            _ => None,
        })
        .collect();
    assert_eq!(frames.len(), 3);
    assert_eq!(frames[2].stream_time, RationalTime::new(2002, 30000));
    assert!(frames.iter().all(|f| f.is_complete()));
    assert_eq!((frames[0].width, frames[0].height), (720, 486));
}
