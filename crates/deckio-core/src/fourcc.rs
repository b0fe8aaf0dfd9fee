//! Four-character hardware codes.
//!
//! The card identifies display modes, pixel formats and field dominance
//! by 32-bit values built from four ASCII bytes in big-endian order, so
//! the tag `"Hp30"` is the code `0x4870_3330`.

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Pack a 4-byte tag into a big-endian `u32`.
///
/// Fails with [`CoreError::InvalidTag`] unless `tag` is exactly four bytes
/// long. Multi-byte UTF-8 characters count by their encoded length.
pub fn pack_tag(tag: &str) -> Result<u32> {
    let bytes: [u8; 4] = tag
        .as_bytes()
        .try_into()
        .map_err(|_| CoreError::InvalidTag {
            tag: tag.to_string(),
            len: tag.len(),
        })?;
    Ok(u32::from_be_bytes(bytes))
}

/// Unpack any 32-bit code into four characters, one per byte.
///
/// Defined for every input; bytes outside ASCII map to the Latin-1
/// character with the same value, so the result is only re-packable when
/// the code was built from an ASCII tag.
pub fn unpack_tag(code: u32) -> String {
    code.to_be_bytes().iter().map(|&b| char::from(b)).collect()
}

/// Compile-time tag packing for registry tables.
#[inline]
pub const fn tag(bytes: &[u8; 4]) -> u32 {
    u32::from_be_bytes(*bytes)
}

/// True when all four bytes of `code` are printable ASCII.
pub fn is_printable(code: u32) -> bool {
    code.to_be_bytes().iter().all(|b| b.is_ascii_graphic() || *b == b' ')
}

/// Opaque display mode code as understood by the hardware.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DisplayModeCode(pub u32);

impl DisplayModeCode {
    /// Build a code from a literal tag.
    #[inline]
    pub const fn from_tag(bytes: &[u8; 4]) -> Self {
        Self(tag(bytes))
    }

    /// Parse a runtime tag such as `"Hp25"`.
    pub fn parse(tag: &str) -> Result<Self> {
        pack_tag(tag).map(Self)
    }

    /// The four-character form of this code.
    pub fn tag(self) -> String {
        unpack_tag(self.0)
    }
}

impl From<u32> for DisplayModeCode {
    fn from(code: u32) -> Self {
        Self(code)
    }
}

impl fmt::Display for DisplayModeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_code(f, self.0)
    }
}

/// Opaque pixel format code as understood by the hardware.
///
/// Note that 8-bit ARGB is the plain integer 32 rather than a packed tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PixelFormatCode(pub u32);

impl PixelFormatCode {
    /// Build a code from a literal tag.
    #[inline]
    pub const fn from_tag(bytes: &[u8; 4]) -> Self {
        Self(tag(bytes))
    }

    /// Parse a runtime tag such as `"v210"`.
    pub fn parse(tag: &str) -> Result<Self> {
        pack_tag(tag).map(Self)
    }

    /// The four-character form of this code.
    pub fn tag(self) -> String {
        unpack_tag(self.0)
    }
}

impl From<u32> for PixelFormatCode {
    fn from(code: u32) -> Self {
        Self(code)
    }
}

impl fmt::Display for PixelFormatCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_code(f, self.0)
    }
}

fn write_code(f: &mut fmt::Formatter<'_>, code: u32) -> fmt::Result {
    if is_printable(code) {
        write!(f, "'{}'", unpack_tag(code))
    } else {
        write!(f, "{code:#010x}")
    }
}
