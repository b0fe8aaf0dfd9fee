//! Video frames exchanged with the card.

use crate::fourcc::{DisplayModeCode, PixelFormatCode};
use crate::metadata::{mode_grain_duration, mode_height, mode_width, row_bytes};
use crate::time::RationalTime;

/// A frame buffer plus the mode/format context it was produced in.
///
/// The payload is opaque to deckio: capture hands it over exactly as the
/// driver delivered it and playback passes it to the driver unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoFrame {
    pub display_mode: DisplayModeCode,
    pub pixel_format: PixelFormatCode,
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in lines
    pub height: u32,
    /// Bytes per line
    pub row_bytes: usize,
    /// Position in the stream, counting from 0
    pub sequence: u64,
    /// Start of this frame in stream time
    pub stream_time: RationalTime,
    /// Raw sample data
    pub data: Vec<u8>,
}

impl VideoFrame {
    /// Wrap `data` as frame `sequence` of a stream in `mode`/`format`.
    ///
    /// Geometry and stream time are derived from the registry; for unknown
    /// codes they are zero.
    pub fn new(
        display_mode: DisplayModeCode,
        pixel_format: PixelFormatCode,
        sequence: u64,
        data: Vec<u8>,
    ) -> Self {
        let width = mode_width(display_mode);
        Self {
            display_mode,
            pixel_format,
            width,
            height: mode_height(display_mode),
            row_bytes: row_bytes(pixel_format, width),
            sequence,
            stream_time: mode_grain_duration(display_mode).frames_to_time(sequence as i64),
            data,
        }
    }

    /// A zero-filled frame sized for `mode`/`format`.
    pub fn blank(display_mode: DisplayModeCode, pixel_format: PixelFormatCode, sequence: u64) -> Self {
        let mut frame = Self::new(display_mode, pixel_format, sequence, Vec::new());
        frame.data = vec![0u8; frame.expected_size()];
        frame
    }

    /// Bytes a complete frame of this geometry occupies.
    pub fn expected_size(&self) -> usize {
        self.row_bytes * self.height as usize
    }

    /// Whether the buffer holds at least one full frame.
    pub fn is_complete(&self) -> bool {
        self.expected_size() > 0 && self.data.len() >= self.expected_size()
    }

    /// Actual buffer size in bytes.
    #[inline]
    pub fn memory_size(&self) -> usize {
        self.data.len()
    }

    /// One line of sample data, if present.
    pub fn row(&self, y: u32) -> Option<&[u8]> {
        if y >= self.height {
            return None;
        }
        let start = y as usize * self.row_bytes;
        self.data.get(start..start + self.row_bytes)
    }
}
