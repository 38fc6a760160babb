//! Klei Binary Texture Parser
//!
//! This crate provides functionality to parse the KTEX texture container
//! used by Klei Entertainment games and to decode its pixel data:
//! - Container header and mip chain parsing
//! - DXT1 / DXT3 / DXT5 block decompression
//! - Uncompressed ARGB reordering
//! - Image export through the `image` crate
//!
//! # Example
//!
//! ```rust,no_run
//! use klei_tex_binary::container::ContainerParser;
//! use klei_tex_binary::texture::TextureProcessor;
//! use std::fs;
//!
//! let data = fs::read("inventoryimages.tex")?;
//! let file = ContainerParser::parse(&data)?;
//!
//! println!("Platform: {}", file.header.platform.name());
//! println!("Format: {}", file.header.pixel_format);
//! for (index, mip) in file.mipmaps.iter().enumerate() {
//!     println!("  Mip {}: {}", index, mip.size_string());
//! }
//!
//! let image = TextureProcessor::new().decode_main(&file)?;
//! println!("Decoded {} bytes", image.pixels().len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod container;
pub mod reader;
pub mod texture;

// Re-export core types
pub use container::{ContainerParser, MipLevel, Platform, TexFile, TextureHeader, TextureType};
pub use klei_tex_core::{ParseStage, Result, TexError};
pub use reader::BinaryReader;
pub use texture::{
    DecodedImage, FileSink, ImageSink, PixelFormat, TextureDecoder, TextureExporter,
    TextureProcessor, WriterSink,
};

/// Parse a KTEX container from memory
pub fn load_texture_from_memory(data: &[u8]) -> Result<TexFile> {
    ContainerParser::parse(data)
}

/// Parse a KTEX container from a file path
pub fn load_texture<P: AsRef<std::path::Path>>(path: P) -> Result<TexFile> {
    let data = std::fs::read(path)?;
    ContainerParser::parse(&data)
}
