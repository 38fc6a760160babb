//! Pixel format decoders
//!
//! This module provides the decoders for the KTEX pixel formats, split by
//! storage category: `basic` for per-pixel records, `compressed` for the
//! DXT block formats.

mod basic;
mod compressed;

pub use basic::BasicDecoder;
pub use compressed::CompressedDecoder;

use super::formats::PixelFormat;
use super::types::rgba_len;
use klei_tex_core::{ParseStage, Result, TexError};
use tracing::instrument;

/// Main texture decoder dispatcher
///
/// Routes each format to the decoder for its category. Any format outside
/// the known set is rejected before any output is allocated.
pub struct TextureDecoder {
    basic: BasicDecoder,
    compressed: CompressedDecoder,
}

impl TextureDecoder {
    /// Create a new texture decoder
    pub fn new() -> Self {
        Self {
            basic: BasicDecoder::new(),
            compressed: CompressedDecoder::new(),
        }
    }

    /// Decode one image to a `width * height * 4` RGBA buffer.
    ///
    /// Short input is reported as a malformed container at the primary mip;
    /// use [`TextureDecoder::decode_level`] to name another level.
    pub fn decode(
        &self,
        data: &[u8],
        width: u32,
        height: u32,
        format: PixelFormat,
    ) -> Result<Vec<u8>> {
        self.decode_level(data, width, height, format, 0)
    }

    /// Decode the mip level at `level`
    #[instrument(level = "debug", skip(self, data), fields(len = data.len()))]
    pub fn decode_level(
        &self,
        data: &[u8],
        width: u32,
        height: u32,
        format: PixelFormat,
        level: usize,
    ) -> Result<Vec<u8>> {
        let stage = ParseStage::MipData(level);
        validate_dimensions(width, height, stage)?;
        let expected = format
            .calculate_data_size(width, height)
            .ok_or_else(|| TexError::unsupported_format(format.raw()))?;
        if data.len() < expected {
            return Err(TexError::malformed(
                stage,
                format!(
                    "insufficient data for {} {}x{}: expected {}, got {}",
                    format,
                    width,
                    height,
                    expected,
                    data.len()
                ),
            ));
        }

        let pixels = if self.basic.can_decode(format) {
            self.basic.decode(data, width, height, format)
        } else if self.compressed.can_decode(format) {
            self.compressed.decode(data, width, height, format)
        } else {
            return Err(TexError::unsupported_format(format.raw()));
        }
        .map_err(|e| e.at_stage(stage))?;

        debug_assert_eq!(Some(pixels.len()), rgba_len(width, height));
        Ok(pixels)
    }

    /// Check if a format can be decoded
    pub fn can_decode(&self, format: PixelFormat) -> bool {
        self.basic.can_decode(format) || self.compressed.can_decode(format)
    }

    /// Get list of supported formats
    pub fn supported_formats(&self) -> Vec<PixelFormat> {
        let mut formats = self.compressed.supported_formats();
        formats.extend(self.basic.supported_formats());
        formats
    }
}

impl Default for TextureDecoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Common decoder trait
///
/// Implementors may assume the dispatcher already checked the dimensions
/// and that `data` holds at least the format's full data size.
pub trait Decoder {
    /// Decode raw texture data to an RGBA buffer
    fn decode(&self, data: &[u8], width: u32, height: u32, format: PixelFormat)
    -> Result<Vec<u8>>;

    /// Check if this decoder can handle the given format
    fn can_decode(&self, format: PixelFormat) -> bool;

    /// Get list of formats supported by this decoder
    fn supported_formats(&self) -> Vec<PixelFormat>;
}

/// Helper function to validate dimensions.
///
/// Rejects empty images and images whose RGBA output would not fit in
/// memory addressing.
pub(crate) fn validate_dimensions(width: u32, height: u32, stage: ParseStage) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(TexError::malformed(
            stage,
            format!("invalid texture dimensions {}x{}", width, height),
        ));
    }
    if rgba_len(width, height).is_none() {
        return Err(TexError::malformed(
            stage,
            format!("texture dimensions {}x{} are too large", width, height),
        ));
    }
    Ok(())
}
