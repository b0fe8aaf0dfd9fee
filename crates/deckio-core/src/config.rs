//! Stream configuration files.
//!
//! JSON documents naming modes and formats by registry name:
//!
//! ```json
//! {
//!   "capture": {
//!     "device_index": 0,
//!     "display_mode": "bmdModeHD1080i50",
//!     "pixel_format": "bmdFormat10BitYUV"
//!   },
//!   "frames": 250
//! }
//! ```

use crate::error::{CoreError, Result};
use crate::fourcc::{DisplayModeCode, PixelFormatCode};
use crate::registry::{DisplayMode, PixelFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Parameters for opening one stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub device_index: u32,
    pub display_mode: DisplayMode,
    pub pixel_format: PixelFormat,
}

impl SessionConfig {
    pub fn new(device_index: u32, display_mode: DisplayMode, pixel_format: PixelFormat) -> Self {
        Self {
            device_index,
            display_mode,
            pixel_format,
        }
    }

    /// The triple a session is constructed from.
    pub fn codes(&self) -> (u32, DisplayModeCode, PixelFormatCode) {
        (
            self.device_index,
            self.display_mode.code(),
            self.pixel_format.code(),
        )
    }
}

fn default_frames() -> u64 {
    100
}

/// Top-level configuration document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckioConfig {
    #[serde(default)]
    pub capture: Option<SessionConfig>,
    #[serde(default)]
    pub playback: Option<SessionConfig>,
    /// Number of frames to capture or play before stopping.
    #[serde(default = "default_frames")]
    pub frames: u64,
}

impl Default for DeckioConfig {
    fn default() -> Self {
        Self {
            capture: None,
            playback: None,
            frames: default_frames(),
        }
    }
}

impl DeckioConfig {
    pub fn to_json(&self) -> Result<Vec<u8>> {
        serde_json::to_vec_pretty(self)
            .map_err(|e| CoreError::Config(format!("Failed to serialize config: {}", e)))
    }

    pub fn from_json(data: &[u8]) -> Result<Self> {
        serde_json::from_slice(data)
            .map_err(|e| CoreError::Config(format!("Failed to parse config: {}", e)))
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let data = self.to_json()?;
        std::fs::write(path, data)?;
        Ok(())
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_json(&data)
    }
}
