//! Operating systems the hardware driver ships for.

use crate::error::SessionError;

/// Values of `std::env::consts::OS` with a hardware driver.
pub const SUPPORTED_PLATFORMS: &[&str] = &["windows", "macos"];

/// Fail with [`SessionError::UnsupportedPlatform`] unless `os` has a driver.
pub fn ensure_supported(os: &str) -> Result<(), SessionError> {
    if SUPPORTED_PLATFORMS.contains(&os) {
        Ok(())
    } else {
        Err(SessionError::UnsupportedPlatform { os: os.to_string() })
    }
}

/// [`ensure_supported`] for the running system.
pub fn ensure_current() -> Result<(), SessionError> {
    ensure_supported(current())
}

#[inline]
pub fn current() -> &'static str {
    std::env::consts::OS
}
