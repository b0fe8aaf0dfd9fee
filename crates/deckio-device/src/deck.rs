//! Entry point tying a driver to sessions and device queries.

use crate::capture::CaptureSession;
use crate::driver::Driver;
use crate::error::{NativeError, SessionError};
use crate::info::{ApiVersion, DeviceInfo};
use crate::playback::PlaybackSession;
use deckio_core::{DisplayModeCode, PixelFormatCode, SessionConfig};
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

/// A loaded driver.
///
/// Cheap to clone; every session opened through it shares the driver.
pub struct DeckLink<D: Driver> {
    driver: Arc<D>,
}

impl<D: Driver> Clone for DeckLink<D> {
    fn clone(&self) -> Self {
        Self {
            driver: Arc::clone(&self.driver),
        }
    }
}

impl<D: Driver> DeckLink<D> {
    /// Load `driver`, failing if it cannot run on this platform.
    pub fn load(driver: D) -> Result<Self, SessionError> {
        driver.check_platform()?;
        info!(platform = std::env::consts::OS, "Driver loaded");
        Ok(Self {
            driver: Arc::new(driver),
        })
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn version(&self) -> Result<ApiVersion, NativeError> {
        self.driver.api_version().map(ApiVersion::from_raw)
    }

    /// Model name of the first attached device.
    pub fn first_device(&self) -> Option<String> {
        self.driver.first_device()
    }

    pub fn devices(&self) -> Result<Vec<DeviceInfo>, NativeError> {
        Ok(self
            .driver
            .devices()?
            .iter()
            .map(DeviceInfo::from_attributes)
            .collect())
    }

    pub fn capture(
        &self,
        device_index: u32,
        mode: DisplayModeCode,
        format: PixelFormatCode,
    ) -> CaptureSession<D::Capture> {
        CaptureSession::open(self.driver.as_ref(), device_index, mode, format)
    }

    pub fn capture_from_args(&self, args: &[Value]) -> CaptureSession<D::Capture> {
        CaptureSession::from_args(self.driver.as_ref(), args)
    }

    pub fn capture_with(&self, config: &SessionConfig) -> CaptureSession<D::Capture> {
        let (index, mode, format) = config.codes();
        self.capture(index, mode, format)
    }

    pub fn playback(
        &self,
        device_index: u32,
        mode: DisplayModeCode,
        format: PixelFormatCode,
    ) -> PlaybackSession<D::Playback> {
        PlaybackSession::open(self.driver.as_ref(), device_index, mode, format)
    }

    pub fn playback_from_args(&self, args: &[Value]) -> PlaybackSession<D::Playback> {
        PlaybackSession::from_args(self.driver.as_ref(), args)
    }

    pub fn playback_with(&self, config: &SessionConfig) -> PlaybackSession<D::Playback> {
        let (index, mode, format) = config.codes();
        self.playback(index, mode, format)
    }

    /// A raw capture handle, bypassing session bookkeeping and events.
    pub fn direct_capture(
        &self,
        device_index: u32,
        mode: DisplayModeCode,
        format: PixelFormatCode,
    ) -> Result<D::Capture, NativeError> {
        self.driver.open_capture(device_index, mode, format)
    }
}
