//! Pixel format definitions
//!
//! This module defines the KTEX pixel formats and their storage layout.

use klei_tex_core::BLOCK_DIMENSION;
use serde::{Deserialize, Serialize};

/// KTEX pixel formats
///
/// Values match the integer stored in the container header. Anything outside
/// the four known encodings is kept as `Unknown` so the header still parses
/// and the decoder can report it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PixelFormat {
    DXT1,
    DXT3,
    DXT5,
    ARGB,
    Unknown(u32),
}

impl From<u32> for PixelFormat {
    fn from(value: u32) -> Self {
        match value {
            0 => PixelFormat::DXT1,
            1 => PixelFormat::DXT3,
            2 => PixelFormat::DXT5,
            3 => PixelFormat::ARGB,
            other => PixelFormat::Unknown(other),
        }
    }
}

/// Pixel format capabilities and storage metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PixelFormatInfo {
    pub name: &'static str,
    pub block_size: (u32, u32), // (width, height) in pixels
    pub bytes_per_block: usize,
    pub compressed: bool,
    pub has_alpha: bool,
}

const FORMAT_TABLE: [(PixelFormat, PixelFormatInfo); 4] = [
    (
        PixelFormat::DXT1,
        PixelFormatInfo {
            name: "DXT1",
            block_size: (BLOCK_DIMENSION, BLOCK_DIMENSION),
            bytes_per_block: 8,
            compressed: true,
            has_alpha: true, // 1-bit
        },
    ),
    (
        PixelFormat::DXT3,
        PixelFormatInfo {
            name: "DXT3",
            block_size: (BLOCK_DIMENSION, BLOCK_DIMENSION),
            bytes_per_block: 16,
            compressed: true,
            has_alpha: true,
        },
    ),
    (
        PixelFormat::DXT5,
        PixelFormatInfo {
            name: "DXT5",
            block_size: (BLOCK_DIMENSION, BLOCK_DIMENSION),
            bytes_per_block: 16,
            compressed: true,
            has_alpha: true,
        },
    ),
    (
        PixelFormat::ARGB,
        PixelFormatInfo {
            name: "ARGB",
            block_size: (1, 1),
            bytes_per_block: 4,
            compressed: false,
            has_alpha: true,
        },
    ),
];

impl PixelFormat {
    /// Integer value as stored in the container
    pub fn raw(&self) -> u32 {
        match self {
            PixelFormat::DXT1 => 0,
            PixelFormat::DXT3 => 1,
            PixelFormat::DXT5 => 2,
            PixelFormat::ARGB => 3,
            PixelFormat::Unknown(value) => *value,
        }
    }

    /// Get format information, `None` for unknown formats
    pub fn info(&self) -> Option<PixelFormatInfo> {
        FORMAT_TABLE
            .iter()
            .find(|(format, _)| format == self)
            .map(|(_, info)| *info)
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        self.info().map(|info| info.name).unwrap_or("Unknown")
    }

    /// Look a format up by its display name (case-insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        FORMAT_TABLE
            .iter()
            .find(|(_, info)| info.name.eq_ignore_ascii_case(name))
            .map(|(format, _)| *format)
    }

    /// Check if the decoder handles this format
    pub fn is_supported(&self) -> bool {
        self.info().is_some()
    }

    /// Check if format is block-compressed
    pub fn is_compressed(&self) -> bool {
        self.info().is_some_and(|info| info.compressed)
    }

    /// Bytes needed to store one `width` x `height` image in this format.
    ///
    /// Block formats round each dimension up to whole blocks, with at least
    /// one block per axis. `None` for unknown formats or a size that does
    /// not fit in `usize`.
    pub fn calculate_data_size(&self, width: u32, height: u32) -> Option<usize> {
        let info = self.info()?;
        let (block_w, block_h) = info.block_size;
        let blocks_x = width.div_ceil(block_w).max(1) as usize;
        let blocks_y = height.div_ceil(block_h).max(1) as usize;
        blocks_x
            .checked_mul(blocks_y)?
            .checked_mul(info.bytes_per_block)
    }

    /// All formats the decoder understands
    pub fn supported() -> Vec<PixelFormat> {
        FORMAT_TABLE.iter().map(|(format, _)| *format).collect()
    }
}

impl std::fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PixelFormat::Unknown(value) => write!(f, "Unknown({})", value),
            known => f.write_str(known.name()),
        }
    }
}
