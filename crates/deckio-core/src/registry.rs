//! The mode/format registry.
//!
//! Maps the hardware's symbolic names (`bmdModeHD1080p25`,
//! `bmdFormat10BitYUV`, ...) to their 32-bit codes and back. The tables are
//! built once on first use and never mutated afterwards.

use crate::error::{CoreError, Result};
use crate::fourcc::{tag, DisplayModeCode, PixelFormatCode};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::LazyLock;

/// Video display modes supported by the card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DisplayMode {
    // SD
    #[serde(rename = "bmdModeNTSC")]
    Ntsc,
    /// NTSC with 3:2 pulldown applied on the card.
    #[serde(rename = "bmdModeNTSC2398")]
    Ntsc2398,
    #[serde(rename = "bmdModePAL")]
    Pal,
    #[serde(rename = "bmdModeNTSCp")]
    NtscP,
    #[serde(rename = "bmdModePALp")]
    PalP,
    // HD 1080
    #[serde(rename = "bmdModeHD1080p2398")]
    Hd1080p2398,
    #[serde(rename = "bmdModeHD1080p24")]
    Hd1080p24,
    #[serde(rename = "bmdModeHD1080p25")]
    Hd1080p25,
    #[serde(rename = "bmdModeHD1080p2997")]
    Hd1080p2997,
    #[serde(rename = "bmdModeHD1080p30")]
    Hd1080p30,
    #[serde(rename = "bmdModeHD1080i50")]
    Hd1080i50,
    #[serde(rename = "bmdModeHD1080i5994")]
    Hd1080i5994,
    /// Exactly 60.00 Hz, not 59.94.
    #[serde(rename = "bmdModeHD1080i6000")]
    Hd1080i6000,
    #[serde(rename = "bmdModeHD1080p50")]
    Hd1080p50,
    #[serde(rename = "bmdModeHD1080p5994")]
    Hd1080p5994,
    /// Exactly 60.00 Hz, not 59.94.
    #[serde(rename = "bmdModeHD1080p6000")]
    Hd1080p6000,
    // HD 720
    #[serde(rename = "bmdModeHD720p50")]
    Hd720p50,
    #[serde(rename = "bmdModeHD720p5994")]
    Hd720p5994,
    #[serde(rename = "bmdModeHD720p60")]
    Hd720p60,
    // 2K
    #[serde(rename = "bmdMode2k2398")]
    Mode2k2398,
    #[serde(rename = "bmdMode2k24")]
    Mode2k24,
    #[serde(rename = "bmdMode2k25")]
    Mode2k25,
    // 2K DCI, output only
    #[serde(rename = "bmdMode2kDCI2398")]
    Mode2kDci2398,
    #[serde(rename = "bmdMode2kDCI24")]
    Mode2kDci24,
    #[serde(rename = "bmdMode2kDCI25")]
    Mode2kDci25,
    // 4K UHD
    #[serde(rename = "bmdMode4K2160p2398")]
    Mode4k2160p2398,
    #[serde(rename = "bmdMode4K2160p24")]
    Mode4k2160p24,
    #[serde(rename = "bmdMode4K2160p25")]
    Mode4k2160p25,
    #[serde(rename = "bmdMode4K2160p2997")]
    Mode4k2160p2997,
    #[serde(rename = "bmdMode4K2160p30")]
    Mode4k2160p30,
    #[serde(rename = "bmdMode4K2160p50")]
    Mode4k2160p50,
    #[serde(rename = "bmdMode4K2160p5994")]
    Mode4k2160p5994,
    #[serde(rename = "bmdMode4K2160p60")]
    Mode4k2160p60,
    // 4K DCI, output only
    #[serde(rename = "bmdMode4kDCI2398")]
    Mode4kDci2398,
    #[serde(rename = "bmdMode4kDCI24")]
    Mode4kDci24,
    #[serde(rename = "bmdMode4kDCI25")]
    Mode4kDci25,
    /// Placeholder reported by the card when no signal is locked.
    #[serde(rename = "bmdModeUnknown")]
    Unknown,
}

impl DisplayMode {
    /// Every display mode, in registry order.
    pub const ALL: [Self; 37] = [
        Self::Ntsc,
        Self::Ntsc2398,
        Self::Pal,
        Self::NtscP,
        Self::PalP,
        Self::Hd1080p2398,
        Self::Hd1080p24,
        Self::Hd1080p25,
        Self::Hd1080p2997,
        Self::Hd1080p30,
        Self::Hd1080i50,
        Self::Hd1080i5994,
        Self::Hd1080i6000,
        Self::Hd1080p50,
        Self::Hd1080p5994,
        Self::Hd1080p6000,
        Self::Hd720p50,
        Self::Hd720p5994,
        Self::Hd720p60,
        Self::Mode2k2398,
        Self::Mode2k24,
        Self::Mode2k25,
        Self::Mode2kDci2398,
        Self::Mode2kDci24,
        Self::Mode2kDci25,
        Self::Mode4k2160p2398,
        Self::Mode4k2160p24,
        Self::Mode4k2160p25,
        Self::Mode4k2160p2997,
        Self::Mode4k2160p30,
        Self::Mode4k2160p50,
        Self::Mode4k2160p5994,
        Self::Mode4k2160p60,
        Self::Mode4kDci2398,
        Self::Mode4kDci24,
        Self::Mode4kDci25,
        Self::Unknown,
    ];

    /// The four-byte tag the hardware uses for this mode.
    pub const fn tag_bytes(self) -> &'static [u8; 4] {
        match self {
            Self::Ntsc => b"ntsc",
            Self::Ntsc2398 => b"nt23",
            Self::Pal => b"pal ",
            Self::NtscP => b"ntsp",
            Self::PalP => b"palp",
            Self::Hd1080p2398 => b"23ps",
            Self::Hd1080p24 => b"24ps",
            Self::Hd1080p25 => b"Hp25",
            Self::Hd1080p2997 => b"Hp29",
            Self::Hd1080p30 => b"Hp30",
            Self::Hd1080i50 => b"Hi50",
            Self::Hd1080i5994 => b"Hi59",
            Self::Hd1080i6000 => b"Hi60",
            Self::Hd1080p50 => b"Hp50",
            Self::Hd1080p5994 => b"Hp59",
            Self::Hd1080p6000 => b"Hp60",
            Self::Hd720p50 => b"hp50",
            Self::Hd720p5994 => b"hp59",
            Self::Hd720p60 => b"hp60",
            Self::Mode2k2398 => b"2k23",
            Self::Mode2k24 => b"2k24",
            Self::Mode2k25 => b"2k25",
            Self::Mode2kDci2398 => b"2d23",
            Self::Mode2kDci24 => b"2d24",
            Self::Mode2kDci25 => b"2d25",
            Self::Mode4k2160p2398 => b"4k23",
            Self::Mode4k2160p24 => b"4k24",
            Self::Mode4k2160p25 => b"4k25",
            Self::Mode4k2160p2997 => b"4k29",
            Self::Mode4k2160p30 => b"4k30",
            Self::Mode4k2160p50 => b"4k50",
            Self::Mode4k2160p5994 => b"4k59",
            Self::Mode4k2160p60 => b"4k60",
            Self::Mode4kDci2398 => b"4d23",
            Self::Mode4kDci24 => b"4d24",
            Self::Mode4kDci25 => b"4d25",
            Self::Unknown => b"iunk",
        }
    }

    /// Hardware code for this mode.
    #[inline]
    pub const fn code(self) -> DisplayModeCode {
        DisplayModeCode(tag(self.tag_bytes()))
    }

    /// Symbolic registry name, e.g. `bmdModeHD1080p25`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ntsc => "bmdModeNTSC",
            Self::Ntsc2398 => "bmdModeNTSC2398",
            Self::Pal => "bmdModePAL",
            Self::NtscP => "bmdModeNTSCp",
            Self::PalP => "bmdModePALp",
            Self::Hd1080p2398 => "bmdModeHD1080p2398",
            Self::Hd1080p24 => "bmdModeHD1080p24",
            Self::Hd1080p25 => "bmdModeHD1080p25",
            Self::Hd1080p2997 => "bmdModeHD1080p2997",
            Self::Hd1080p30 => "bmdModeHD1080p30",
            Self::Hd1080i50 => "bmdModeHD1080i50",
            Self::Hd1080i5994 => "bmdModeHD1080i5994",
            Self::Hd1080i6000 => "bmdModeHD1080i6000",
            Self::Hd1080p50 => "bmdModeHD1080p50",
            Self::Hd1080p5994 => "bmdModeHD1080p5994",
            Self::Hd1080p6000 => "bmdModeHD1080p6000",
            Self::Hd720p50 => "bmdModeHD720p50",
            Self::Hd720p5994 => "bmdModeHD720p5994",
            Self::Hd720p60 => "bmdModeHD720p60",
            Self::Mode2k2398 => "bmdMode2k2398",
            Self::Mode2k24 => "bmdMode2k24",
            Self::Mode2k25 => "bmdMode2k25",
            Self::Mode2kDci2398 => "bmdMode2kDCI2398",
            Self::Mode2kDci24 => "bmdMode2kDCI24",
            Self::Mode2kDci25 => "bmdMode2kDCI25",
            Self::Mode4k2160p2398 => "bmdMode4K2160p2398",
            Self::Mode4k2160p24 => "bmdMode4K2160p24",
            Self::Mode4k2160p25 => "bmdMode4K2160p25",
            Self::Mode4k2160p2997 => "bmdMode4K2160p2997",
            Self::Mode4k2160p30 => "bmdMode4K2160p30",
            Self::Mode4k2160p50 => "bmdMode4K2160p50",
            Self::Mode4k2160p5994 => "bmdMode4K2160p5994",
            Self::Mode4k2160p60 => "bmdMode4K2160p60",
            Self::Mode4kDci2398 => "bmdMode4kDCI2398",
            Self::Mode4kDci24 => "bmdMode4kDCI24",
            Self::Mode4kDci25 => "bmdMode4kDCI25",
            Self::Unknown => "bmdModeUnknown",
        }
    }

    /// Look up a mode by its hardware code.
    pub fn from_code(code: DisplayModeCode) -> Option<Self> {
        registry().display_mode(code)
    }

    /// Look up a mode by its symbolic name.
    pub fn from_name(name: &str) -> Option<Self> {
        match registry().lookup(name)? {
            Entry::DisplayMode(mode) => Some(mode),
            _ => None,
        }
    }

    /// Like [`DisplayMode::from_name`], failing with
    /// [`CoreError::UnknownName`] for names that are not display modes.
    pub fn parse_name(name: &str) -> Result<Self> {
        Self::from_name(name).ok_or_else(|| CoreError::UnknownName(name.to_string()))
    }
}

/// Pixel formats supported for input and output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PixelFormat {
    #[serde(rename = "bmdFormat8BitYUV")]
    Yuv8,
    #[serde(rename = "bmdFormat10BitYUV")]
    Yuv10,
    #[serde(rename = "bmdFormat8BitARGB")]
    Argb8,
    #[serde(rename = "bmdFormat8BitBGRA")]
    Bgra8,
    /// Big-endian RGB 10-bit per component, SMPTE levels (64-960), packed 2:10:10:10.
    #[serde(rename = "bmdFormat10BitRGB")]
    Rgb10,
    /// Big-endian RGB 12-bit per component, full range (0-4095).
    #[serde(rename = "bmdFormat12BitRGB")]
    Rgb12,
    /// Little-endian RGB 12-bit per component, full range (0-4095).
    #[serde(rename = "bmdFormat12BitRGBLE")]
    Rgb12Le,
    /// Little-endian 10-bit RGB, SMPTE levels (64-940).
    #[serde(rename = "bmdFormat10BitRGBXLE")]
    Rgbx10Le,
    /// Big-endian 10-bit RGB, SMPTE levels (64-940).
    #[serde(rename = "bmdFormat10BitRGBX")]
    Rgbx10,
}

/// Code of 8-bit ARGB. Not a packed tag; kept verbatim for binary compatibility.
pub const ARGB8_CODE: u32 = 32;

impl PixelFormat {
    /// Every pixel format, in registry order.
    pub const ALL: [Self; 9] = [
        Self::Yuv8,
        Self::Yuv10,
        Self::Argb8,
        Self::Bgra8,
        Self::Rgb10,
        Self::Rgb12,
        Self::Rgb12Le,
        Self::Rgbx10Le,
        Self::Rgbx10,
    ];

    /// Hardware code for this format.
    pub const fn code(self) -> PixelFormatCode {
        match self {
            Self::Yuv8 => PixelFormatCode::from_tag(b"2vuy"),
            Self::Yuv10 => PixelFormatCode::from_tag(b"v210"),
            Self::Argb8 => PixelFormatCode(ARGB8_CODE),
            Self::Bgra8 => PixelFormatCode::from_tag(b"BGRA"),
            Self::Rgb10 => PixelFormatCode::from_tag(b"r210"),
            Self::Rgb12 => PixelFormatCode::from_tag(b"R12B"),
            Self::Rgb12Le => PixelFormatCode::from_tag(b"R12L"),
            Self::Rgbx10Le => PixelFormatCode::from_tag(b"R10l"),
            Self::Rgbx10 => PixelFormatCode::from_tag(b"R10b"),
        }
    }

    /// The packed tag behind the code, or `None` for 8-bit ARGB.
    pub fn tag(self) -> Option<String> {
        match self {
            Self::Argb8 => None,
            other => Some(other.code().tag()),
        }
    }

    /// Symbolic registry name, e.g. `bmdFormat10BitYUV`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Yuv8 => "bmdFormat8BitYUV",
            Self::Yuv10 => "bmdFormat10BitYUV",
            Self::Argb8 => "bmdFormat8BitARGB",
            Self::Bgra8 => "bmdFormat8BitBGRA",
            Self::Rgb10 => "bmdFormat10BitRGB",
            Self::Rgb12 => "bmdFormat12BitRGB",
            Self::Rgb12Le => "bmdFormat12BitRGBLE",
            Self::Rgbx10Le => "bmdFormat10BitRGBXLE",
            Self::Rgbx10 => "bmdFormat10BitRGBX",
        }
    }

    /// Look up a format by its hardware code.
    pub fn from_code(code: PixelFormatCode) -> Option<Self> {
        registry().pixel_format(code)
    }

    /// Look up a format by its symbolic name.
    pub fn from_name(name: &str) -> Option<Self> {
        match registry().lookup(name)? {
            Entry::PixelFormat(format) => Some(format),
            _ => None,
        }
    }

    pub fn parse_name(name: &str) -> Result<Self> {
        Self::from_name(name).ok_or_else(|| CoreError::UnknownName(name.to_string()))
    }
}

/// Video field dominance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldDominance {
    #[serde(rename = "bmdUnknownFieldDominance")]
    Unknown,
    #[serde(rename = "bmdLowerFieldFirst")]
    LowerFieldFirst,
    #[serde(rename = "bmdUpperFieldFirst")]
    UpperFieldFirst,
    #[serde(rename = "bmdProgressiveFrame")]
    ProgressiveFrame,
    #[serde(rename = "bmdProgressiveSegmentedFrame")]
    ProgressiveSegmentedFrame,
}

impl FieldDominance {
    pub const ALL: [Self; 5] = [
        Self::Unknown,
        Self::LowerFieldFirst,
        Self::UpperFieldFirst,
        Self::ProgressiveFrame,
        Self::ProgressiveSegmentedFrame,
    ];

    /// Hardware code. The unknown dominance is the plain integer 0.
    pub const fn code(self) -> u32 {
        match self {
            Self::Unknown => 0,
            Self::LowerFieldFirst => tag(b"lowr"),
            Self::UpperFieldFirst => tag(b"uppr"),
            Self::ProgressiveFrame => tag(b"prog"),
            Self::ProgressiveSegmentedFrame => tag(b"psf "),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Unknown => "bmdUnknownFieldDominance",
            Self::LowerFieldFirst => "bmdLowerFieldFirst",
            Self::UpperFieldFirst => "bmdUpperFieldFirst",
            Self::ProgressiveFrame => "bmdProgressiveFrame",
            Self::ProgressiveSegmentedFrame => "bmdProgressiveSegmentedFrame",
        }
    }

    pub fn from_code(code: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.code() == code)
    }
}

/// Characteristics of a display mode, as a bit set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DisplayModeFlags(pub u32);

impl DisplayModeFlags {
    pub const EMPTY: Self = Self(0);
    pub const SUPPORTS_3D: Self = Self(1 << 0);
    pub const COLORSPACE_REC601: Self = Self(1 << 1);
    pub const COLORSPACE_REC709: Self = Self(1 << 2);

    /// Named flags, in registry order.
    pub const NAMED: [(&'static str, Self); 3] = [
        ("bmdDisplayModeSupports3D", Self::SUPPORTS_3D),
        ("bmdDisplayModeColorspaceRec601", Self::COLORSPACE_REC601),
        ("bmdDisplayModeColorspaceRec709", Self::COLORSPACE_REC709),
    ];

    #[inline]
    pub const fn bits(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for DisplayModeFlags {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

/// A named registry entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entry {
    DisplayMode(DisplayMode),
    PixelFormat(PixelFormat),
    FieldDominance(FieldDominance),
    DisplayModeFlag(DisplayModeFlags),
}

impl Entry {
    /// Integer value of this entry as the hardware sees it.
    pub fn value(self) -> u32 {
        match self {
            Self::DisplayMode(mode) => mode.code().0,
            Self::PixelFormat(format) => format.code().0,
            Self::FieldDominance(dominance) => dominance.code(),
            Self::DisplayModeFlag(flags) => flags.bits(),
        }
    }
}

/// Process-wide name/code tables.
pub struct Registry {
    by_name: HashMap<&'static str, Entry>,
    modes: HashMap<DisplayModeCode, DisplayMode>,
    formats: HashMap<PixelFormatCode, PixelFormat>,
    names: Vec<&'static str>,
}

static REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::build);

/// The registry, built on first access.
pub fn registry() -> &'static Registry {
    &REGISTRY
}

impl Registry {
    fn build() -> Self {
        let mut by_name = HashMap::new();
        let mut modes = HashMap::new();
        let mut formats = HashMap::new();
        let mut names = Vec::new();

        for mode in DisplayMode::ALL {
            by_name.insert(mode.name(), Entry::DisplayMode(mode));
            modes.insert(mode.code(), mode);
            names.push(mode.name());
        }
        for dominance in FieldDominance::ALL {
            by_name.insert(dominance.name(), Entry::FieldDominance(dominance));
            names.push(dominance.name());
        }
        for format in PixelFormat::ALL {
            by_name.insert(format.name(), Entry::PixelFormat(format));
            formats.insert(format.code(), format);
            names.push(format.name());
        }
        for (name, flag) in DisplayModeFlags::NAMED {
            by_name.insert(name, Entry::DisplayModeFlag(flag));
            names.push(name);
        }

        Self {
            by_name,
            modes,
            formats,
            names,
        }
    }

    /// Find an entry by symbolic name.
    pub fn lookup(&self, name: &str) -> Option<Entry> {
        self.by_name.get(name).copied()
    }

    /// Integer value for a symbolic name.
    pub fn value_of(&self, name: &str) -> Option<u32> {
        self.lookup(name).map(Entry::value)
    }

    pub fn display_mode(&self, code: DisplayModeCode) -> Option<DisplayMode> {
        self.modes.get(&code).copied()
    }

    pub fn pixel_format(&self, code: PixelFormatCode) -> Option<PixelFormat> {
        self.formats.get(&code).copied()
    }

    /// All registered names in registry order.
    pub fn names(&self) -> &[&'static str] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fourcc::{pack_tag, unpack_tag};
    use std::collections::HashSet;

    #[test]
    fn test_display_mode_codes_round_trip() {
        for mode in DisplayMode::ALL {
            let code = mode.code().0;
            assert_eq!(pack_tag(&unpack_tag(code)).unwrap(), code, "{}", mode.name());
        }
    }

    #[test]
    fn test_codes_are_unique() {
        let modes: HashSet<_> = DisplayMode::ALL.iter().map(|m| m.code()).collect();
        assert_eq!(modes.len(), DisplayMode::ALL.len());
        let formats: HashSet<_> = PixelFormat::ALL.iter().map(|f| f.code()).collect();
        assert_eq!(formats.len(), PixelFormat::ALL.len());
    }

    #[test]
    fn test_argb_is_plain_integer() {
        assert_eq!(PixelFormat::Argb8.code().0, 32);
        assert_eq!(PixelFormat::Argb8.tag(), None);
        assert!(!crate::fourcc::is_printable(PixelFormat::Argb8.code().0));
        assert_eq!(PixelFormat::Bgra8.tag().as_deref(), Some("BGRA"));
    }

    #[test]
    fn test_lookup_by_code_and_name() {
        let code = DisplayModeCode::from_tag(b"Hp25");
        assert_eq!(DisplayMode::from_code(code), Some(DisplayMode::Hd1080p25));
        assert_eq!(
            DisplayMode::from_name("bmdModeHD1080p25"),
            Some(DisplayMode::Hd1080p25)
        );
        assert_eq!(
            PixelFormat::from_code(PixelFormatCode(32)),
            Some(PixelFormat::Argb8)
        );
        assert_eq!(DisplayMode::from_code(DisplayModeCode(0)), None);
        // Names are typed: a format name is not a display mode.
        assert_eq!(DisplayMode::from_name("bmdFormat10BitYUV"), None);
    }

    #[test]
    fn test_parse_name_reports_unknown_names() {
        assert_eq!(
            DisplayMode::parse_name("bmdModeNTSC2398").unwrap(),
            DisplayMode::Ntsc2398
        );
        assert_eq!(
            PixelFormat::parse_name("bmdFormat10BitRGBXLE").unwrap(),
            PixelFormat::Rgbx10Le
        );

        match DisplayMode::parse_name("bmdFormat8BitYUV") {
            Err(CoreError::UnknownName(name)) => assert_eq!(name, "bmdFormat8BitYUV"),
            other => panic!("expected UnknownName, got {other:?}"),
        }
        let err = PixelFormat::parse_name("bmdModeHD720p50").unwrap_err();
        assert_eq!(err.to_string(), "Unknown registry name: bmdModeHD720p50");
    }

    #[test]
    fn test_registry_values() {
        let reg = registry();
        assert_eq!(reg.value_of("bmdModeHD1080p30"), Some(0x4870_3330));
        assert_eq!(reg.value_of("bmdUnknownFieldDominance"), Some(0));
        assert_eq!(reg.value_of("bmdProgressiveSegmentedFrame"), pack_tag("psf ").ok());
        assert_eq!(reg.value_of("bmdDisplayModeColorspaceRec709"), Some(4));
        assert_eq!(reg.value_of("bmdModeNope"), None);
        assert_eq!(reg.len(), 37 + 5 + 9 + 3);
    }

    #[test]
    fn test_every_name_resolves() {
        let reg = registry();
        for name in reg.names() {
            assert!(reg.lookup(name).is_some(), "{name}");
        }
    }

    #[test]
    fn test_serde_names_match_registry() {
        for mode in DisplayMode::ALL {
            let json = serde_json::to_string(&mode).unwrap();
            assert_eq!(json, format!("\"{}\"", mode.name()));
        }
        for format in PixelFormat::ALL {
            let json = serde_json::to_string(&format).unwrap();
            assert_eq!(json, format!("\"{}\"", format.name()));
        }
        for dominance in FieldDominance::ALL {
            let json = serde_json::to_string(&dominance).unwrap();
            assert_eq!(json, format!("\"{}\"", dominance.name()));
        }
    }

    #[test]
    fn test_field_dominance_codes() {
        assert_eq!(
            FieldDominance::from_code(pack_tag("lowr").unwrap()),
            Some(FieldDominance::LowerFieldFirst)
        );
        assert_eq!(FieldDominance::from_code(0), Some(FieldDominance::Unknown));
        assert_eq!(FieldDominance::from_code(1), None);
    }

    #[test]
    fn test_flags() {
        let flags = DisplayModeFlags::COLORSPACE_REC709 | DisplayModeFlags::SUPPORTS_3D;
        assert!(flags.contains(DisplayModeFlags::SUPPORTS_3D));
        assert!(!flags.contains(DisplayModeFlags::COLORSPACE_REC601));
        assert_eq!(flags.bits(), 5);
    }
}
