//! KTEX Core
//!
//! Error types and constants shared by the container parser, the atlas
//! mapper and the decode orchestrator.

pub mod constants;
pub mod error;

// Re-export main types
pub use constants::*;
pub use error::{ParseStage, Result, TexError};
