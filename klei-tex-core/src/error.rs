//! Error types for KTEX decoding

use std::fmt;
use std::io;
use thiserror::Error;

/// Result type alias for KTEX operations
pub type Result<T> = std::result::Result<T, TexError>;

/// Where in the container a structural problem was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseStage {
    /// The leading magic marker
    Magic,
    /// The fixed header fields
    Header,
    /// The width/height/size prefix of a mip record
    MipRecord(usize),
    /// The data blob of a mip record
    MipData(usize),
}

impl fmt::Display for ParseStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseStage::Magic => write!(f, "magic"),
            ParseStage::Header => write!(f, "header"),
            ParseStage::MipRecord(index) => write!(f, "mip record {}", index),
            ParseStage::MipData(index) => write!(f, "mip data {}", index),
        }
    }
}

/// Main error type for texture decoding operations
#[derive(Error, Debug)]
pub enum TexError {
    /// Bad magic, truncated stream or inconsistent mip table
    #[error("Malformed container at {stage}: {reason}")]
    MalformedContainer { stage: ParseStage, reason: String },

    /// Pixel format value outside DXT1/DXT3/DXT5/ARGB
    #[error("Unsupported pixel format: {value}")]
    UnsupportedFormat { value: u32 },

    /// A single atlas entry could not be read
    #[error("Atlas entry {index} ({}): {reason}", .name.as_deref().unwrap_or("<unnamed>"))]
    AtlasEntryParse {
        index: usize,
        name: Option<String>,
        reason: String,
    },

    /// The atlas document as a whole could not be read
    #[error("Atlas document error: {0}")]
    AtlasDocument(String),

    /// Writing a decoded image to an output sink failed
    #[error("Export error: {0}")]
    Export(String),

    /// IO errors when reading the source stream
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl TexError {
    /// Create a malformed container error
    pub fn malformed<S: Into<String>>(stage: ParseStage, reason: S) -> Self {
        Self::MalformedContainer {
            stage,
            reason: reason.into(),
        }
    }

    /// Create a truncation error for the given stage
    pub fn truncated(stage: ParseStage, expected: usize, actual: usize) -> Self {
        Self::malformed(
            stage,
            format!(
                "stream truncated: expected {} bytes, {} remaining",
                expected, actual
            ),
        )
    }

    /// Create an unsupported format error
    pub fn unsupported_format(value: u32) -> Self {
        Self::UnsupportedFormat { value }
    }

    /// Create an atlas entry error
    pub fn atlas_entry<S: Into<String>>(index: usize, name: Option<String>, reason: S) -> Self {
        Self::AtlasEntryParse {
            index,
            name,
            reason: reason.into(),
        }
    }

    /// Create an atlas document error
    pub fn atlas_document<S: Into<String>>(message: S) -> Self {
        Self::AtlasDocument(message.into())
    }

    /// Create an export error
    pub fn export<S: Into<String>>(message: S) -> Self {
        Self::Export(message.into())
    }

    /// Move a container error to `stage`; other errors are returned unchanged
    pub fn at_stage(self, stage: ParseStage) -> Self {
        match self {
            TexError::MalformedContainer { reason, .. } => Self::malformed(stage, reason),
            other => other,
        }
    }

    /// Whether this error aborts a decode.
    ///
    /// Atlas problems are recovered locally by dropping entries, everything
    /// else ends the decode without a partial result.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            TexError::AtlasEntryParse { .. } | TexError::AtlasDocument(_)
        )
    }

    /// Stage that failed, for container errors
    pub fn stage(&self) -> Option<ParseStage> {
        match self {
            TexError::MalformedContainer { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}
