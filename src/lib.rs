//! Klei Texture Decoder
//!
//! Decodes Klei KTEX textures into RGBA images and maps their atlas
//! documents onto pixel rectangles.
//!
//! # Examples
//!
//! ```rust,no_run
//! use klei_tex::{OpenOptions, TexTool};
//!
//! let mut tool = TexTool::new(OpenOptions::default());
//! let current = tool.open_file("inventoryimages.tex", &mut ())?;
//!
//! println!("Size: {}", current.output.info.size);
//! for rect in &current.output.rects {
//!     println!("{}: {} {} {} {}", rect.name, rect.left, rect.top, rect.right, rect.bottom);
//! }
//!
//! tool.save_to_path("inventoryimages.png")?;
//! # Ok::<(), klei_tex::TexError>(())
//! ```

// Re-export from core, binary and atlas crates
pub use klei_tex_core::{ParseStage, Result, TexError, constants::*};

pub use klei_tex_atlas::{AtlasDocument, AtlasRect, PixelBounds, UvRect, atlas_path_for};
pub use klei_tex_binary::{
    DecodedImage, FileSink, ImageSink, MipLevel, PixelFormat, Platform, TexFile, TextureExporter,
    TextureHeader, TextureType, WriterSink,
};

pub mod decode;
pub mod events;
pub mod options;
pub mod tool;

pub use decode::{DecodeOutput, open, open_path};
pub use events::{DecodeListener, TextureInfo};
pub use options::OpenOptions;
pub use tool::{CurrentTexture, TexTool};
