//! Texture helper utilities
//!
//! Output sinks for decoded images.

pub mod export;

pub use export::{FileSink, ImageSink, TextureExporter, WriterSink};
