//! deckio core - registry and metadata for professional video I/O cards
//!
//! This crate provides the hardware-independent half of deckio:
//! - Four-character code packing (`fourcc`)
//! - The display mode / pixel format registry (`registry`)
//! - Geometry, exact timing and colorimetry per mode and format (`metadata`)
//! - Rational stream time (`time`)
//! - Frame buffers and configuration files

pub mod config;
pub mod error;
pub mod fourcc;
pub mod frame;
pub mod metadata;
pub mod registry;
pub mod time;

pub use config::{DeckioConfig, SessionConfig};
pub use error::{CoreError, Result};
pub use fourcc::{pack_tag, unpack_tag, DisplayModeCode, PixelFormatCode};
pub use frame::VideoFrame;
pub use metadata::{
    format_colorimetry, format_depth, format_fourcc, format_sampling, frame_bytes, frame_size,
    mode_frame_rate, mode_grain_duration, mode_height, mode_interlace, mode_width, row_bytes,
};
pub use registry::{
    registry, DisplayMode, DisplayModeFlags, Entry, FieldDominance, PixelFormat, Registry,
};
pub use time::{FrameRate, GrainDuration, RationalTime};
