//! Options for opening a texture

use klei_tex_core::{DEFAULT_ATLAS_EXTENSION, DEFAULT_MAX_DIMENSION};

/// Options controlling [`crate::open`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenOptions {
    /// Extension of the atlas document looked up next to the texture
    pub atlas_extension: String,
    /// Whether to look for an atlas document at all
    pub load_atlas: bool,
    /// Largest accepted width or height of the primary mip
    pub max_dimension: u32,
}

impl Default for OpenOptions {
    fn default() -> Self {
        Self {
            atlas_extension: DEFAULT_ATLAS_EXTENSION.to_string(),
            load_atlas: true,
            max_dimension: DEFAULT_MAX_DIMENSION,
        }
    }
}

impl OpenOptions {
    /// Create options with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the atlas document extension (without the dot)
    pub fn with_atlas_extension<S: Into<String>>(mut self, extension: S) -> Self {
        self.atlas_extension = extension.into();
        self
    }

    /// Enable or disable the atlas lookup
    pub fn with_load_atlas(mut self, load_atlas: bool) -> Self {
        self.load_atlas = load_atlas;
        self
    }

    /// Set the dimension limit
    pub fn with_max_dimension(mut self, max_dimension: u32) -> Self {
        self.max_dimension = max_dimension;
        self
    }
}
