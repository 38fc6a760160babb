//! Constants shared across the KTEX crates
//!
//! Magic markers, default file extensions and sanity limits used by the
//! container parser, the atlas loader and the orchestrator.

/// Magic marker at the start of every KTEX container
pub const KTEX_MAGIC: [u8; 4] = *b"KTEX";

/// Size of the fixed header: magic + platform + pixel format + mip count + texture type
pub const HEADER_SIZE: usize = 4 + 4 + 4 + 4 + 4;

/// Size of a mip record prefix: width + height + data size
pub const MIP_RECORD_SIZE: usize = 4 + 4 + 4;

/// Extension of the atlas document that sits next to a texture
pub const DEFAULT_ATLAS_EXTENSION: &str = "xml";

/// Largest width or height accepted before allocating pixel buffers
pub const DEFAULT_MAX_DIMENSION: u32 = 16384;

/// Half-pixel correction subtracted from every mapped atlas bound
pub const ATLAS_PIXEL_MARGIN: f64 = 0.5;

/// Edge length of a block-compressed block, in pixels
pub const BLOCK_DIMENSION: u32 = 4;

/// Bytes per pixel in the canonical RGBA output
pub const RGBA_BYTES_PER_PIXEL: usize = 4;
