//! KTEX container module
//!
//! The module is organized into several sub-modules:
//! - `header` - fixed header parsing and the legacy-revision predicate
//! - `types` - header enumerations, mip levels and the parsed file
//! - `parser` - mip chain parsing
//!
//! # Examples
//!
//! ```rust,no_run
//! use klei_tex_binary::container::ContainerParser;
//!
//! let data = std::fs::read("inventoryimages.tex")?;
//! let file = ContainerParser::parse(&data)?;
//!
//! println!("Format: {}", file.header.pixel_format);
//! println!("Main mip: {}", file.main_mipmap().size_string());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod header;
pub mod parser;
pub mod types;

// Re-export main types for easy access
pub use header::TextureHeader;
pub use parser::ContainerParser;
pub use types::{MipLevel, Platform, TexFile, TextureType};
