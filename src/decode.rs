//! Decode pipeline
//!
//! parse -> primary mip -> pixel decode -> atlas lookup -> vertical flip

use crate::events::{DecodeListener, TextureInfo};
use crate::options::OpenOptions;
use klei_tex_atlas::{AtlasDocument, AtlasRect, atlas_path_for, map_document};
use klei_tex_binary::texture::flip_rows;
use klei_tex_binary::{ContainerParser, DecodedImage, TexFile, TextureProcessor};
use klei_tex_core::{ParseStage, Result, TexError};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// Image and atlas rectangles produced by [`open`]
#[derive(Debug, Clone)]
pub struct DecodeOutput {
    pub info: TextureInfo,
    /// Primary mip, rows ordered top to bottom
    pub image: DecodedImage,
    /// Atlas rectangles sorted by name, empty without an atlas document
    pub rects: Vec<AtlasRect>,
}

/// Decode the texture read from `stream`.
///
/// `filename` names the texture for metadata and locates its atlas
/// document; the stream itself is the only source of pixel data and is
/// dropped before this returns.
#[instrument(skip(filename, stream, options, listener), fields(file = %filename.display()))]
pub fn open<R, L>(
    filename: &Path,
    stream: R,
    options: &OpenOptions,
    listener: &mut L,
) -> Result<DecodeOutput>
where
    R: Read,
    L: DecodeListener + ?Sized,
{
    let file = ContainerParser::parse_reader(stream)?;
    check_dimensions(&file, options.max_dimension)?;

    let file_name = filename
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let info = TextureInfo::from_file(file_name, &file);
    info!(
        platform = %info.platform,
        format = %info.format,
        texture_type = %info.texture_type,
        mips = info.mip_count,
        size = %info.size,
        legacy = info.legacy,
        "Opened texture"
    );
    listener.on_opened(&info);

    let decoded = TextureProcessor::new().decode_main(&file)?;
    let (width, height) = decoded.dimensions();

    let rects = if options.load_atlas {
        load_atlas_rects(filename, &options.atlas_extension, width, height)
    } else {
        Vec::new()
    };

    let pixels = flip_rows(decoded.pixels(), width, height, |percent| {
        listener.on_progress(percent)
    });
    let image = DecodedImage::from_raw(width, height, pixels).ok_or_else(|| {
        TexError::malformed(ParseStage::MipData(0), "flipped buffer size mismatch")
    })?;

    info!(width, height, rects = rects.len(), "Decoded texture");
    listener.on_decoded(&image, &rects);

    Ok(DecodeOutput { info, image, rects })
}

/// Open and decode a texture file
pub fn open_path<P, L>(path: P, options: &OpenOptions, listener: &mut L) -> Result<DecodeOutput>
where
    P: AsRef<Path>,
    L: DecodeListener + ?Sized,
{
    let path = path.as_ref();
    let stream = BufReader::new(File::open(path)?);
    open(path, stream, options, listener)
}

fn check_dimensions(file: &TexFile, max_dimension: u32) -> Result<()> {
    let (width, height) = file.main_mipmap().dimensions();
    if width > max_dimension || height > max_dimension {
        return Err(TexError::malformed(
            ParseStage::MipRecord(0),
            format!(
                "texture {}x{} exceeds the {} pixel limit",
                width, height, max_dimension
            ),
        ));
    }
    Ok(())
}

/// Rectangles from the atlas document next to `texture_path`.
///
/// A missing document yields no rectangles; an unreadable one is logged
/// and also yields none.
fn load_atlas_rects(
    texture_path: &Path,
    extension: &str,
    width: u32,
    height: u32,
) -> Vec<AtlasRect> {
    let atlas_path = atlas_path_for(texture_path, extension);
    if !atlas_path.is_file() {
        debug!(path = %atlas_path.display(), "No atlas document");
        return Vec::new();
    }

    match AtlasDocument::load(&atlas_path) {
        Ok(doc) => {
            let mapped = map_document(&doc, width, height);
            debug!(
                path = %atlas_path.display(),
                rects = mapped.rects.len(),
                dropped = mapped.dropped.len(),
                "Mapped atlas document"
            );
            mapped.rects
        }
        Err(err) => {
            warn!(path = %atlas_path.display(), "Ignoring atlas document: {}", err);
            Vec::new()
        }
    }
}
