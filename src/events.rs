//! Decode notifications
//!
//! Listeners are called synchronously on the thread running the decode.

use klei_tex_atlas::AtlasRect;
use klei_tex_binary::{DecodedImage, TexFile};
use serde::{Deserialize, Serialize};

/// Metadata reported when a texture has been opened
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextureInfo {
    /// File name without directories
    pub file_name: String,
    pub platform: String,
    pub format: String,
    /// Texture type description ("1D", "2D", "3D", "Cube Mapped")
    pub texture_type: String,
    pub mip_count: usize,
    pub width: u32,
    pub height: u32,
    /// Primary mip size as `WxH`
    pub size: String,
    /// Written by the older container revision without a texture type
    pub legacy: bool,
}

impl TextureInfo {
    /// Describe a parsed container, using its primary mip for the size
    pub fn from_file<S: Into<String>>(file_name: S, file: &TexFile) -> Self {
        let mip = file.main_mipmap();
        Self {
            file_name: file_name.into(),
            platform: file.header.platform.name().to_string(),
            format: file.header.pixel_format.to_string(),
            texture_type: file.header.texture_type.description().to_string(),
            mip_count: file.mip_count(),
            width: mip.width,
            height: mip.height,
            size: mip.size_string(),
            legacy: file.is_legacy_variant(),
        }
    }
}

/// Receives progress of a decode
///
/// Every method has an empty default, so implementors only override what
/// they need.
pub trait DecodeListener {
    /// The container was parsed; decoding has not started
    fn on_opened(&mut self, _info: &TextureInfo) {}

    /// Pixel assembly progress, non-decreasing, ending at 100
    fn on_progress(&mut self, _percent: u8) {}

    /// The final image and its atlas rectangles are ready
    fn on_decoded(&mut self, _image: &DecodedImage, _rects: &[AtlasRect]) {}
}

impl DecodeListener for () {}
