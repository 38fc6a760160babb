//! Container type definitions
//!
//! Header enumerations and the mip chain produced by the parser.

use super::header::TextureHeader;
use serde::{Deserialize, Serialize};

/// Target hardware profile recorded in the header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    Default,
    PS3,
    Xbox360,
    PC,
    Unknown(u32),
}

impl From<u32> for Platform {
    fn from(value: u32) -> Self {
        match value {
            0 => Platform::Default,
            10 => Platform::PS3,
            11 => Platform::Xbox360,
            12 => Platform::PC,
            other => Platform::Unknown(other),
        }
    }
}

impl Platform {
    /// Integer value as stored in the container
    pub fn raw(&self) -> u32 {
        match self {
            Platform::Default => 0,
            Platform::PS3 => 10,
            Platform::Xbox360 => 11,
            Platform::PC => 12,
            Platform::Unknown(value) => *value,
        }
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            Platform::Default => "Default",
            Platform::PS3 => "PS3",
            Platform::Xbox360 => "Xbox360",
            Platform::PC => "PC",
            Platform::Unknown(_) => "Unknown",
        }
    }
}

/// Intended usage of the texture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextureType {
    OneD,
    TwoD,
    ThreeD,
    Cubemap,
    Unknown(u32),
}

const TEXTURE_TYPE_DESCRIPTIONS: [(TextureType, &str); 4] = [
    (TextureType::OneD, "1D"),
    (TextureType::TwoD, "2D"),
    (TextureType::ThreeD, "3D"),
    (TextureType::Cubemap, "Cube Mapped"),
];

impl From<u32> for TextureType {
    fn from(value: u32) -> Self {
        match value {
            1 => TextureType::OneD,
            2 => TextureType::TwoD,
            3 => TextureType::ThreeD,
            4 => TextureType::Cubemap,
            other => TextureType::Unknown(other),
        }
    }
}

impl TextureType {
    /// Integer value as stored in the container
    pub fn raw(&self) -> u32 {
        match self {
            TextureType::OneD => 1,
            TextureType::TwoD => 2,
            TextureType::ThreeD => 3,
            TextureType::Cubemap => 4,
            TextureType::Unknown(value) => *value,
        }
    }

    /// Human-readable description, empty for unknown types
    pub fn description(&self) -> &'static str {
        TEXTURE_TYPE_DESCRIPTIONS
            .iter()
            .find(|(kind, _)| kind == self)
            .map(|(_, text)| *text)
            .unwrap_or("")
    }

    /// Reverse lookup from a description
    pub fn from_description(description: &str) -> Option<Self> {
        TEXTURE_TYPE_DESCRIPTIONS
            .iter()
            .find(|(_, text)| *text == description)
            .map(|(kind, _)| *kind)
    }
}

/// One level of the mip chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MipLevel {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl MipLevel {
    /// Get dimensions as tuple
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Size string in `WxH` form
    pub fn size_string(&self) -> String {
        format!("{}x{}", self.width, self.height)
    }
}

/// A parsed KTEX container
#[derive(Debug, Clone)]
pub struct TexFile {
    pub header: TextureHeader,
    pub mipmaps: Vec<MipLevel>,
}

impl TexFile {
    /// The primary mip, always index 0
    pub fn main_mipmap(&self) -> &MipLevel {
        // The parser never produces an empty chain
        &self.mipmaps[0]
    }

    /// Number of parsed mip levels
    pub fn mip_count(&self) -> usize {
        self.mipmaps.len()
    }

    /// See [`TextureHeader::is_legacy_variant`]
    pub fn is_legacy_variant(&self) -> bool {
        self.header.is_legacy_variant()
    }
}
