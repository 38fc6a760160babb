//! Uncompressed pixel format decoder
//!
//! ARGB stores one 4-byte record per pixel as (a, r, g, b).

use super::Decoder;
use crate::texture::formats::PixelFormat;
use crate::texture::types::rgba_len;
use klei_tex_core::{ParseStage, RGBA_BYTES_PER_PIXEL, Result, TexError};

/// Decoder for per-pixel formats
pub struct BasicDecoder;

impl BasicDecoder {
    /// Create a new basic decoder
    pub fn new() -> Self {
        Self
    }

    /// Reorder ARGB records into RGBA
    fn decode_argb(&self, data: &[u8], width: u32, height: u32) -> Result<Vec<u8>> {
        let records = rgba_len(width, height)
            .and_then(|len| data.get(..len))
            .ok_or_else(|| {
                TexError::malformed(
                    ParseStage::MipData(0),
                    format!("insufficient ARGB data for {}x{}", width, height),
                )
            })?;

        Ok(records
            .chunks_exact(RGBA_BYTES_PER_PIXEL)
            .flat_map(|src| [src[1], src[2], src[3], src[0]])
            .collect())
    }
}

impl Decoder for BasicDecoder {
    fn decode(&self, data: &[u8], width: u32, height: u32, format: PixelFormat) -> Result<Vec<u8>> {
        match format {
            PixelFormat::ARGB => self.decode_argb(data, width, height),
            other => Err(TexError::unsupported_format(other.raw())),
        }
    }

    fn can_decode(&self, format: PixelFormat) -> bool {
        matches!(format, PixelFormat::ARGB)
    }

    fn supported_formats(&self) -> Vec<PixelFormat> {
        vec![PixelFormat::ARGB]
    }
}

impl Default for BasicDecoder {
    fn default() -> Self {
        Self::new()
    }
}
