//! Driver version and device attribute reporting.

use deckio_core::fourcc::tag;
use serde::Serialize;
use std::fmt;

/// Decoded driver API version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ApiVersion {
    pub major: u8,
    pub minor: u8,
    pub point: u8,
}

impl ApiVersion {
    /// Unpack the driver's 64-bit version word (`0xMMmmpp00`).
    pub fn from_raw(raw: i64) -> Self {
        Self {
            major: ((raw >> 24) & 0xFF) as u8,
            minor: ((raw >> 16) & 0xFF) as u8,
            point: ((raw >> 8) & 0xFF) as u8,
        }
    }

    /// Inverse of [`from_raw`](Self::from_raw).
    pub fn to_raw(self) -> i64 {
        (i64::from(self.major) << 24) | (i64::from(self.minor) << 16) | (i64::from(self.point) << 8)
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DeckLinkAPI version: {}.{}.{}",
            self.major, self.minor, self.point
        )
    }
}

/// How a device is attached to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DeviceInterface {
    #[serde(rename = "PCI")]
    Pci,
    #[serde(rename = "USB")]
    Usb,
    Thunderbolt,
}

impl DeviceInterface {
    pub const fn code(self) -> u32 {
        match self {
            Self::Pci => tag(b"pci "),
            Self::Usb => tag(b"usb "),
            Self::Thunderbolt => tag(b"thun"),
        }
    }

    pub fn from_code(code: u32) -> Option<Self> {
        [Self::Pci, Self::Usb, Self::Thunderbolt]
            .into_iter()
            .find(|interface| interface.code() == code)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Pci => "PCI",
            Self::Usb => "USB",
            Self::Thunderbolt => "Thunderbolt",
        }
    }
}

/// A physical video connector type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum VideoConnection {
    #[serde(rename = "SDI")]
    Sdi,
    #[serde(rename = "HDMI")]
    Hdmi,
    #[serde(rename = "Optical SDI")]
    OpticalSdi,
    Component,
    Composite,
    #[serde(rename = "S-Video")]
    SVideo,
}

impl VideoConnection {
    pub const ALL: [VideoConnection; 6] = [
        Self::Sdi,
        Self::Hdmi,
        Self::OpticalSdi,
        Self::Component,
        Self::Composite,
        Self::SVideo,
    ];

    /// Bit in the driver's connection mask.
    pub const fn bit(self) -> u32 {
        match self {
            Self::Sdi => 1 << 0,
            Self::Hdmi => 1 << 1,
            Self::OpticalSdi => 1 << 2,
            Self::Component => 1 << 3,
            Self::Composite => 1 << 4,
            Self::SVideo => 1 << 5,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Sdi => "SDI",
            Self::Hdmi => "HDMI",
            Self::OpticalSdi => "Optical SDI",
            Self::Component => "Component",
            Self::Composite => "Composite",
            Self::SVideo => "S-Video",
        }
    }

    /// Connections set in `mask`, in bit order. Unknown bits are ignored.
    pub fn from_mask(mask: u32) -> Vec<VideoConnection> {
        Self::ALL
            .into_iter()
            .filter(|connection| mask & connection.bit() != 0)
            .collect()
    }

    pub fn to_mask(connections: &[VideoConnection]) -> u32 {
        connections.iter().fold(0, |mask, c| mask | c.bit())
    }
}

/// Attributes exactly as a driver reports them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceAttributes {
    pub model_name: String,
    pub display_name: String,
    pub has_serial_port: bool,
    pub serial_port_name: String,
    pub persistent_id: i64,
    pub topological_id: i64,
    pub number_of_sub_devices: i64,
    pub sub_device_index: i64,
    pub maximum_audio_channels: i64,
    pub supports_input_format_detection: bool,
    pub supports_full_duplex: bool,
    pub supports_external_keying: bool,
    pub supports_internal_keying: bool,
    pub supports_hd_keying: bool,
    /// Four-character interface code, e.g. `'pci '`
    pub interface: u32,
    pub video_output_connections: u32,
    pub video_input_connections: u32,
}

/// A device description ready for display or JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceInfo {
    pub model_name: String,
    pub display_name: String,
    pub has_serial_port: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial_port_device_name: Option<String>,
    #[serde(rename = "persistentID")]
    pub persistent_id: i64,
    #[serde(rename = "topologicalID")]
    pub topological_id: i64,
    pub number_of_sub_devices: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_device_index: Option<i64>,
    pub maximum_audio_channels: i64,
    pub supports_input_format_detection: bool,
    pub supports_full_duplex: bool,
    pub supports_external_keying: bool,
    pub supports_internal_keying: bool,
    #[serde(rename = "supportsHDKeying")]
    pub supports_hd_keying: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_interface: Option<DeviceInterface>,
    pub video_output_connections: Vec<VideoConnection>,
    pub video_input_connections: Vec<VideoConnection>,
}

impl DeviceInfo {
    pub fn from_attributes(attrs: &DeviceAttributes) -> Self {
        Self {
            model_name: attrs.model_name.clone(),
            display_name: attrs.display_name.clone(),
            has_serial_port: attrs.has_serial_port,
            serial_port_device_name: attrs
                .has_serial_port
                .then(|| attrs.serial_port_name.clone()),
            persistent_id: attrs.persistent_id,
            topological_id: attrs.topological_id,
            number_of_sub_devices: attrs.number_of_sub_devices,
            sub_device_index: (attrs.number_of_sub_devices > 0).then_some(attrs.sub_device_index),
            maximum_audio_channels: attrs.maximum_audio_channels,
            supports_input_format_detection: attrs.supports_input_format_detection,
            supports_full_duplex: attrs.supports_full_duplex,
            supports_external_keying: attrs.supports_external_keying,
            supports_internal_keying: attrs.supports_internal_keying,
            supports_hd_keying: attrs.supports_hd_keying,
            device_interface: DeviceInterface::from_code(attrs.interface),
            video_output_connections: VideoConnection::from_mask(attrs.video_output_connections),
            video_input_connections: VideoConnection::from_mask(attrs.video_input_connections),
        }
    }
}
