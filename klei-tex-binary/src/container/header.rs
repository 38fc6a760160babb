//! KTEX header parsing
//!
//! The header is a magic marker followed by four little-endian `u32` fields
//! in fixed order: platform, pixel format, mip count, texture type.

use super::types::{Platform, TextureType};
use crate::reader::BinaryReader;
use crate::texture::formats::PixelFormat;
use klei_tex_core::{KTEX_MAGIC, ParseStage, Result, TexError};
use serde::{Deserialize, Serialize};

/// Header of a KTEX container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextureHeader {
    /// Target hardware profile
    pub platform: Platform,
    /// Encoding of every mip in the file
    pub pixel_format: PixelFormat,
    /// Intended usage
    pub texture_type: TextureType,
    /// Number of mip records that follow the header
    pub mip_count: u32,
}

impl TextureHeader {
    /// Parse header from binary data
    pub fn from_reader(reader: &mut BinaryReader) -> Result<Self> {
        reader.set_stage(ParseStage::Magic);
        let magic = reader.read_array::<4>()?;
        if magic != KTEX_MAGIC {
            return Err(TexError::malformed(
                ParseStage::Magic,
                format!(
                    "expected {:?}, got {:?}",
                    String::from_utf8_lossy(&KTEX_MAGIC),
                    String::from_utf8_lossy(&magic)
                ),
            ));
        }

        reader.set_stage(ParseStage::Header);
        let platform = Platform::from(reader.read_u32()?);
        let pixel_format = PixelFormat::from(reader.read_u32()?);
        let mip_count = reader.read_u32()?;
        let texture_type = TextureType::from(reader.read_u32()?);

        let header = Self {
            platform,
            pixel_format,
            texture_type,
            mip_count,
        };
        header.validate()?;
        Ok(header)
    }

    /// Validate header consistency
    pub fn validate(&self) -> Result<()> {
        if self.mip_count == 0 {
            return Err(TexError::malformed(
                ParseStage::Header,
                "mip count cannot be zero",
            ));
        }
        Ok(())
    }

    /// Whether this header comes from the older container revision.
    ///
    /// That revision predates the texture type field and leaves it zero,
    /// which is not a valid type in newer files.
    pub fn is_legacy_variant(&self) -> bool {
        self.texture_type.raw() == 0
    }
}
