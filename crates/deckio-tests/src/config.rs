//! Config files driving sessions.

use deckio_core::{DeckioConfig, DisplayMode, PixelFormat, SessionConfig};
use deckio_device::{DeckLink, SessionState, SimulatedDriver};

#[test]
fn saved_config_opens_the_same_sessions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("deckio.json");
    let config = DeckioConfig {
        capture: Some(SessionConfig::new(0, DisplayMode::Hd1080i5994, PixelFormat::Yuv10)),
        playback: Some(SessionConfig::new(0, DisplayMode::Mode4k2160p2398, PixelFormat::Rgb12)),
        frames: 12,
    };
    config.save_to_file(&path).unwrap();

    let loaded = DeckioConfig::load_from_file(&path).unwrap();
    assert_eq!(loaded, config);

    let deck = DeckLink::load(SimulatedDriver::manual()).unwrap();
    let capture = deck.capture_with(&loaded.capture.unwrap());
    let playback = deck.playback_with(&loaded.playback.unwrap());
    assert_eq!(capture.state(), SessionState::Constructed);
    assert_eq!(playback.display_mode(), DisplayMode::Mode4k2160p2398.code());
    assert_eq!(playback.pixel_format(), PixelFormat::Rgb12.code());
}

#[test]
fn config_names_modes_by_registry_name() {
    let json = br#"{
        "playback": {
            "device_index": 0,
            "display_mode": "bmdModeHD720p50",
            "pixel_format": "bmdFormat8BitBGRA"
        }
    }"#;
    let config = DeckioConfig::from_json(json).unwrap();
    assert_eq!(config.capture, None);
    assert_eq!(config.frames, 100);
    let playback = config.playback.unwrap();
    assert_eq!(playback.display_mode, DisplayMode::Hd720p50);
    assert_eq!(playback.pixel_format, PixelFormat::Bgra8);
}

#[test]
fn unknown_mode_name_is_a_config_error() {
    let json = br#"{ "capture": { "display_mode": "bmdModeHD1080p7", "pixel_format": "bmdFormat8BitYUV" } }"#;
    let err = DeckioConfig::from_json(json).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config"));
}
