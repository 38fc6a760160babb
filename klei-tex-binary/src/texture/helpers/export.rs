//! Texture export utilities
//!
//! Output sinks that hand a decoded image to the `image` crate's encoders.

use crate::texture::types::DecodedImage;
use image::ImageFormat;
use klei_tex_core::{Result, TexError};
use std::io::{Seek, Write};
use std::path::{Path, PathBuf};

/// Destination for a decoded image
pub trait ImageSink {
    /// Encode and write one image
    fn write_image(&mut self, image: &DecodedImage) -> Result<()>;
}

/// Texture exporter utility
pub struct TextureExporter;

impl TextureExporter {
    /// Export as PNG
    pub fn export_png<P: AsRef<Path>>(image: &DecodedImage, path: P) -> Result<()> {
        Self::export_with_format(image, path, ImageFormat::Png)
    }

    /// Export with automatic format detection based on file extension
    pub fn export_auto<P: AsRef<Path>>(image: &DecodedImage, path: P) -> Result<()> {
        let format = Self::format_for_path(path.as_ref());
        Self::export_with_format(image, path, format)
    }

    /// Export with an explicit format
    pub fn export_with_format<P: AsRef<Path>>(
        image: &DecodedImage,
        path: P,
        format: ImageFormat,
    ) -> Result<()> {
        image
            .to_rgba_image()
            .save_with_format(path.as_ref(), format)
            .map_err(|e| {
                TexError::export(format!(
                    "Failed to save {} as {:?}: {}",
                    path.as_ref().display(),
                    format,
                    e
                ))
            })
    }

    /// Encode into any seekable writer
    pub fn write_to<W: Write + Seek>(
        image: &DecodedImage,
        writer: &mut W,
        format: ImageFormat,
    ) -> Result<()> {
        image
            .to_rgba_image()
            .write_to(writer, format)
            .map_err(|e| TexError::export(format!("Failed to encode {:?}: {}", format, e)))
    }

    /// Pick an encoder from the extension, PNG when unknown
    pub fn format_for_path(path: &Path) -> ImageFormat {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_lowercase();

        match extension.as_str() {
            "bmp" => ImageFormat::Bmp,
            "tif" | "tiff" => ImageFormat::Tiff,
            _ => ImageFormat::Png,
        }
    }

    /// Get supported export formats
    pub fn supported_formats() -> Vec<&'static str> {
        vec!["png", "bmp", "tiff", "tif"]
    }
}

/// Sink writing to a file path, format chosen by extension
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ImageSink for FileSink {
    fn write_image(&mut self, image: &DecodedImage) -> Result<()> {
        TextureExporter::export_auto(image, &self.path)
    }
}

/// Sink encoding into a seekable writer
pub struct WriterSink<W: Write + Seek> {
    writer: W,
    format: ImageFormat,
}

impl<W: Write + Seek> WriterSink<W> {
    /// PNG into `writer`
    pub fn png(writer: W) -> Self {
        Self {
            writer,
            format: ImageFormat::Png,
        }
    }

    pub fn with_format(writer: W, format: ImageFormat) -> Self {
        Self { writer, format }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Seek> ImageSink for WriterSink<W> {
    fn write_image(&mut self, image: &DecodedImage) -> Result<()> {
        TextureExporter::write_to(image, &mut self.writer, self.format)
    }
}
