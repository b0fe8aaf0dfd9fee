//! Frame metadata derived from display modes and pixel formats.
//!
//! Every function here is a total lookup: codes outside the registry give
//! 0, `""`, `false` or [`GrainDuration::ZERO`] rather than an error.

use crate::fourcc::{DisplayModeCode, PixelFormatCode};
use crate::registry::{DisplayMode, DisplayModeFlags, FieldDominance, PixelFormat};
use crate::time::{FrameRate, GrainDuration};

impl DisplayMode {
    /// Frame width in pixels.
    pub const fn width(self) -> u32 {
        use DisplayMode::*;
        match self {
            Ntsc | Ntsc2398 | NtscP | Pal | PalP => 720,
            Hd720p50 | Hd720p5994 | Hd720p60 => 1280,
            Hd1080p2398 | Hd1080p24 | Hd1080p25 | Hd1080p2997 | Hd1080p30 | Hd1080i50
            | Hd1080i5994 | Hd1080i6000 | Hd1080p50 | Hd1080p5994 | Hd1080p6000 => 1920,
            Mode2k2398 | Mode2k24 | Mode2k25 | Mode2kDci2398 | Mode2kDci24 | Mode2kDci25 => 2048,
            Mode4k2160p2398 | Mode4k2160p24 | Mode4k2160p25 | Mode4k2160p2997
            | Mode4k2160p30 | Mode4k2160p50 | Mode4k2160p5994 | Mode4k2160p60 => 3840,
            Mode4kDci2398 | Mode4kDci24 | Mode4kDci25 => 4096,
            Unknown => 0,
        }
    }

    /// Frame height in lines.
    pub const fn height(self) -> u32 {
        use DisplayMode::*;
        match self {
            Ntsc | Ntsc2398 | NtscP => 486,
            Pal | PalP => 576,
            Hd720p50 | Hd720p5994 | Hd720p60 => 720,
            Hd1080p2398 | Hd1080p24 | Hd1080p25 | Hd1080p2997 | Hd1080p30 | Hd1080i50
            | Hd1080i5994 | Hd1080i6000 | Hd1080p50 | Hd1080p5994 | Hd1080p6000 => 1080,
            Mode2k2398 | Mode2k24 | Mode2k25 => 1556,
            Mode2kDci2398 | Mode2kDci24 | Mode2kDci25 => 1080,
            Mode4k2160p2398 | Mode4k2160p24 | Mode4k2160p25 | Mode4k2160p2997
            | Mode4k2160p30 | Mode4k2160p50 | Mode4k2160p5994 | Mode4k2160p60
            | Mode4kDci2398 | Mode4kDci24 | Mode4kDci25 => 2160,
            Unknown => 0,
        }
    }

    /// Exact duration of one frame.
    ///
    /// Values follow the hardware table verbatim. That table is not uniform
    /// for interlaced HD: 1080i50 is given per frame (`{1000, 25000}`) while
    /// 1080i59.94 and 1080i60 are given per field (`{1001, 60000}` and
    /// `{1000, 60000}`). `NTSC2398` runs at 29.97 on the wire because the
    /// card applies 3:2 pulldown.
    pub const fn grain_duration(self) -> GrainDuration {
        use DisplayMode::*;
        let (n, d) = match self {
            Ntsc | Ntsc2398 => (1001, 30000),
            NtscP => (1001, 60000),
            Pal => (1000, 25000),
            PalP => (1000, 50000),
            Hd720p50 => (1000, 50000),
            Hd720p5994 => (1001, 60000),
            Hd720p60 => (1000, 60000),
            Hd1080p2398 => (1001, 24000),
            Hd1080p24 => (1000, 24000),
            Hd1080p25 => (1000, 25000),
            Hd1080p2997 => (1001, 30000),
            Hd1080p30 => (1000, 30000),
            Hd1080i50 => (1000, 25000),
            Hd1080i5994 => (1001, 60000),
            Hd1080i6000 => (1000, 60000),
            Hd1080p50 => (1000, 50000),
            Hd1080p5994 => (1001, 60000),
            Hd1080p6000 => (1000, 60000),
            Mode2k2398 | Mode2kDci2398 | Mode4k2160p2398 | Mode4kDci2398 => (1001, 24000),
            Mode2k24 | Mode2kDci24 | Mode4k2160p24 | Mode4kDci24 => (1000, 24000),
            Mode2k25 | Mode2kDci25 | Mode4k2160p25 | Mode4kDci25 => (1000, 25000),
            Mode4k2160p2997 => (1001, 30000),
            Mode4k2160p30 => (1000, 30000),
            Mode4k2160p50 => (1000, 50000),
            Mode4k2160p5994 => (1001, 60000),
            Mode4k2160p60 => (1000, 60000),
            Unknown => return GrainDuration::ZERO,
        };
        GrainDuration::new(n, d)
    }

    /// Frame rate, the reciprocal of [`DisplayMode::grain_duration`].
    pub fn frame_rate(self) -> FrameRate {
        self.grain_duration().frame_rate()
    }

    /// Whether frames are transmitted as two interlaced fields.
    pub const fn is_interlaced(self) -> bool {
        use DisplayMode::*;
        matches!(self, Ntsc | Ntsc2398 | Pal | Hd1080i50 | Hd1080i5994 | Hd1080i6000)
    }

    /// Field order of the mode.
    pub const fn field_dominance(self) -> FieldDominance {
        use DisplayMode::*;
        match self {
            Ntsc | Ntsc2398 => FieldDominance::LowerFieldFirst,
            Pal | Hd1080i50 | Hd1080i5994 | Hd1080i6000 => FieldDominance::UpperFieldFirst,
            Unknown => FieldDominance::Unknown,
            _ => FieldDominance::ProgressiveFrame,
        }
    }

    /// Colorspace flags: Rec.601 for SD, Rec.709 for everything larger.
    pub const fn flags(self) -> DisplayModeFlags {
        use DisplayMode::*;
        match self {
            Ntsc | Ntsc2398 | NtscP | Pal | PalP => DisplayModeFlags::COLORSPACE_REC601,
            Unknown => DisplayModeFlags::EMPTY,
            _ => DisplayModeFlags::COLORSPACE_REC709,
        }
    }
}

impl PixelFormat {
    /// Bits per sample component.
    pub const fn bit_depth(self) -> u32 {
        use PixelFormat::*;
        match self {
            Yuv8 | Argb8 | Bgra8 => 8,
            Yuv10 | Rgb10 | Rgbx10Le | Rgbx10 => 10,
            Rgb12 | Rgb12Le => 12,
        }
    }

    /// Four-character sample layout, as a media framework would name it.
    ///
    /// This is not always the hardware tag: 8-bit YUV is coded `2vuy` but
    /// laid out as `UYVY`.
    pub const fn fourcc(self) -> &'static str {
        use PixelFormat::*;
        match self {
            Yuv8 => "UYVY",
            Yuv10 => "v210",
            Argb8 => "ARGB",
            Bgra8 => "BGRA",
            Rgb10 => "r210",
            Rgb12 => "R12B",
            Rgb12Le => "R12L",
            Rgbx10Le => "R10l",
            Rgbx10 => "R10b",
        }
    }

    /// Chroma/color sampling description.
    pub const fn sampling(self) -> &'static str {
        use PixelFormat::*;
        match self {
            Yuv8 | Yuv10 => "YCbCr-4:2:2",
            Argb8 => "ARGB",
            Bgra8 => "BGRA",
            Rgb10 | Rgb12 | Rgb12Le | Rgbx10Le | Rgbx10 => "RGB",
        }
    }

    /// Colorimetry standard.
    pub const fn colorimetry(self) -> &'static str {
        use PixelFormat::*;
        match self {
            Yuv8 => "BT601-5",
            Yuv10 => "BT709-2",
            Argb8 | Bgra8 | Rgb12 | Rgb12Le => "FULL",
            Rgb10 | Rgbx10Le | Rgbx10 => "SMPTE240M",
        }
    }

    /// Bytes per line for a frame `width` pixels wide, as the card packs it.
    pub const fn row_bytes(self, width: u32) -> usize {
        use PixelFormat::*;
        let width = width as usize;
        match self {
            Yuv8 => width * 2,
            // 48 pixels in 32 little-endian words
            Yuv10 => width.div_ceil(48) * 128,
            Argb8 | Bgra8 | Rgb10 | Rgbx10Le | Rgbx10 => width * 4,
            // 8 pixels in 36 bytes
            Rgb12 | Rgb12Le => width.div_ceil(8) * 36,
        }
    }
}

/// Bytes needed for one frame of `mode` in `format`.
pub const fn frame_bytes(mode: DisplayMode, format: PixelFormat) -> usize {
    format.row_bytes(mode.width()) * mode.height() as usize
}

// Code-level lookups. These accept any 32-bit value.

/// Width in pixels, 0 for unknown modes.
pub fn mode_width(code: DisplayModeCode) -> u32 {
    DisplayMode::from_code(code).map_or(0, DisplayMode::width)
}

/// Height in lines, 0 for unknown modes.
pub fn mode_height(code: DisplayModeCode) -> u32 {
    DisplayMode::from_code(code).map_or(0, DisplayMode::height)
}

/// Exact frame duration, `{0, 1}` for unknown modes.
pub fn mode_grain_duration(code: DisplayModeCode) -> GrainDuration {
    DisplayMode::from_code(code).map_or(GrainDuration::ZERO, DisplayMode::grain_duration)
}

/// Frame rate, `{0, 1}` for unknown modes.
pub fn mode_frame_rate(code: DisplayModeCode) -> FrameRate {
    mode_grain_duration(code).frame_rate()
}

/// Interlace flag, `false` for unknown modes.
pub fn mode_interlace(code: DisplayModeCode) -> bool {
    DisplayMode::from_code(code).is_some_and(DisplayMode::is_interlaced)
}

/// Bits per component, 0 for unknown formats.
pub fn format_depth(code: PixelFormatCode) -> u32 {
    PixelFormat::from_code(code).map_or(0, PixelFormat::bit_depth)
}

/// Sample layout tag, `""` for unknown formats.
pub fn format_fourcc(code: PixelFormatCode) -> &'static str {
    PixelFormat::from_code(code).map_or("", PixelFormat::fourcc)
}

/// Sampling label, `""` for unknown formats.
pub fn format_sampling(code: PixelFormatCode) -> &'static str {
    PixelFormat::from_code(code).map_or("", PixelFormat::sampling)
}

/// Colorimetry label, `""` for unknown formats.
pub fn format_colorimetry(code: PixelFormatCode) -> &'static str {
    PixelFormat::from_code(code).map_or("", PixelFormat::colorimetry)
}

/// Bytes per line, 0 when the format is unknown.
pub fn row_bytes(format: PixelFormatCode, width: u32) -> usize {
    PixelFormat::from_code(format).map_or(0, |f| f.row_bytes(width))
}

/// Bytes per frame, 0 when either code is unknown.
pub fn frame_size(mode: DisplayModeCode, format: PixelFormatCode) -> usize {
    match (DisplayMode::from_code(mode), PixelFormat::from_code(format)) {
        (Some(mode), Some(format)) => frame_bytes(mode, format),
        _ => 0,
    }
}
