//! Texture processing module
//!
//! Decodes KTEX mip data into RGBA pixels and writes decoded images out.
//!
//! # Architecture
//!
//! The module is organized into several sub-modules:
//! - `formats` - Pixel format definitions and metadata
//! - `types` - Decoded image buffer and the vertical flip
//! - `decoders` - Specialized decoders for different format categories
//! - `helpers` - Output sinks for decoded images
//!
//! # Examples
//!
//! ```rust,no_run
//! use klei_tex_binary::container::ContainerParser;
//! use klei_tex_binary::texture::{FileSink, ImageSink, TextureProcessor};
//!
//! let data = std::fs::read("minimap.tex")?;
//! let file = ContainerParser::parse(&data)?;
//!
//! let processor = TextureProcessor::new();
//! let image = processor.decode_main(&file)?;
//!
//! FileSink::new("minimap.png").write_image(&image)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod decoders;
pub mod formats;
pub mod helpers;
pub mod types;

// Re-export main types for easy access
pub use decoders::{Decoder, TextureDecoder};
pub use formats::{PixelFormat, PixelFormatInfo};
pub use helpers::{FileSink, ImageSink, TextureExporter, WriterSink};
pub use types::{DecodedImage, flip_rows, rgba_len};

// Re-export decoder types for advanced usage
pub use decoders::{BasicDecoder, CompressedDecoder};

use crate::container::TexFile;
use klei_tex_core::{ParseStage, Result, TexError};

/// Main texture processing facade
///
/// Decodes a parsed container's mip levels. The returned image keeps the
/// container's bottom-left row order; flipping is left to the caller.
pub struct TextureProcessor {
    decoder: TextureDecoder,
}

impl TextureProcessor {
    /// Create a new texture processor
    pub fn new() -> Self {
        Self {
            decoder: TextureDecoder::new(),
        }
    }

    /// Decode the primary mip (index 0)
    pub fn decode_main(&self, file: &TexFile) -> Result<DecodedImage> {
        self.decode_mip(file, 0)
    }

    /// Decode the mip at `level`
    pub fn decode_mip(&self, file: &TexFile, level: usize) -> Result<DecodedImage> {
        let mip = file.mipmaps.get(level).ok_or_else(|| {
            TexError::malformed(
                ParseStage::MipRecord(level),
                format!("mip level {} not present ({} total)", level, file.mip_count()),
            )
        })?;
        let pixels = self.decoder.decode_level(
            &mip.data,
            mip.width,
            mip.height,
            file.header.pixel_format,
            level,
        )?;
        DecodedImage::from_raw(mip.width, mip.height, pixels).ok_or_else(|| {
            TexError::malformed(
                ParseStage::MipData(level),
                "decoded buffer does not match mip dimensions",
            )
        })
    }

    /// Check if a format can be processed
    pub fn can_process(&self, format: PixelFormat) -> bool {
        self.decoder.can_decode(format)
    }

    /// Get list of supported formats
    pub fn supported_formats(&self) -> Vec<PixelFormat> {
        self.decoder.supported_formats()
    }
}

impl Default for TextureProcessor {
    fn default() -> Self {
        Self::new()
    }
}

/// Quick function to check if a format is supported
pub fn is_format_supported(format: PixelFormat) -> bool {
    TextureDecoder::new().can_decode(format)
}

/// Quick function to decode texture data
pub fn decode_texture_data(
    format: PixelFormat,
    width: u32,
    height: u32,
    data: &[u8],
) -> Result<Vec<u8>> {
    TextureDecoder::new().decode(data, width, height, format)
}
