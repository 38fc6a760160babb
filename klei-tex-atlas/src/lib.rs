//! Klei Texture Atlas
//!
//! Reads the XML atlas documents that sit next to KTEX textures and maps
//! their normalized UV rectangles onto pixel-space rectangles of the
//! decoded (top-left origin) image.
//!
//! # Examples
//!
//! ```rust
//! use klei_tex_atlas::{AtlasDocument, map_document};
//!
//! let xml = r#"
//! <Atlas>
//!     <Texture filename="hud.tex" />
//!     <Elements>
//!         <Element name="icon.tex" u1="0.25" u2="0.75" v1="0.1" v2="0.9" />
//!     </Elements>
//! </Atlas>
//! "#;
//!
//! let doc = AtlasDocument::parse_str(xml)?;
//! let mapped = map_document(&doc, 100, 100);
//! assert_eq!(mapped.rects[0].name, "icon.tex");
//! # Ok::<(), klei_tex_core::TexError>(())
//! ```

// Re-export core types
pub use klei_tex_core::{Result, TexError};

// Core modules
pub mod document;
pub mod mapper;
pub mod types;

// Re-export main types
pub use document::{AtlasDocument, atlas_path_for};
pub use mapper::{MappedAtlas, map_all, map_document, map_entry};
pub use types::{AtlasRect, PixelBounds, RawAtlasEntry, UvRect};
