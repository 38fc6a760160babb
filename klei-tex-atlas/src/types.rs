//! Atlas entry types
//!
//! `RawAtlasEntry` is what the document reader collects, `UvRect` is an entry
//! whose coordinates parsed, and `AtlasRect` is the mapped pixel rectangle.

use klei_tex_core::{Result, TexError};
use serde::{Deserialize, Serialize};

/// An atlas element as it appears in the document, attributes still textual
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawAtlasEntry {
    /// Position among the element's siblings
    pub index: usize,
    pub name: Option<String>,
    pub u1: Option<String>,
    pub u2: Option<String>,
    pub v1: Option<String>,
    pub v2: Option<String>,
}

impl RawAtlasEntry {
    /// Create an empty entry at `index`
    pub fn new(index: usize) -> Self {
        Self {
            index,
            ..Default::default()
        }
    }

    /// Store a known attribute, ignoring anything else
    pub fn set_attribute(&mut self, key: &str, value: String) {
        match key {
            "name" => self.name = Some(value),
            "u1" => self.u1 = Some(value),
            "u2" => self.u2 = Some(value),
            "v1" => self.v1 = Some(value),
            "v2" => self.v2 = Some(value),
            _ => {}
        }
    }

    /// Parse the textual attributes
    ///
    /// Fails with [`TexError::AtlasEntryParse`] on a missing attribute or a
    /// non-numeric coordinate.
    pub fn to_uv_rect(&self) -> Result<UvRect> {
        let name = self
            .name
            .clone()
            .ok_or_else(|| self.error("missing attribute 'name'"))?;

        Ok(UvRect {
            u1: self.coordinate("u1", &self.u1)?,
            u2: self.coordinate("u2", &self.u2)?,
            v1: self.coordinate("v1", &self.v1)?,
            v2: self.coordinate("v2", &self.v2)?,
            name,
        })
    }

    fn coordinate(&self, key: &str, value: &Option<String>) -> Result<f64> {
        let text = value
            .as_deref()
            .ok_or_else(|| self.error(format!("missing attribute '{}'", key)))?;
        text.trim()
            .parse::<f64>()
            .map_err(|_| self.error(format!("attribute '{}' is not a number: {:?}", key, text)))
    }

    fn error<S: Into<String>>(&self, reason: S) -> TexError {
        TexError::atlas_entry(self.index, self.name.clone(), reason)
    }
}

/// A named rectangle in normalized texture coordinates
///
/// `v` follows the texture convention with its origin at the bottom edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UvRect {
    pub name: String,
    pub u1: f64,
    pub u2: f64,
    pub v1: f64,
    pub v2: f64,
}

impl UvRect {
    pub fn new<S: Into<String>>(name: S, u1: f64, u2: f64, v1: f64, v2: f64) -> Self {
        Self {
            name: name.into(),
            u1,
            u2,
            v1,
            v2,
        }
    }
}

/// A named rectangle in pixel coordinates, origin at the top-left.
///
/// `left`/`right` come from `u1`/`u2`, `top`/`bottom` from `v1`/`v2`. The
/// values keep the half-pixel margin, so they may be fractional, negative,
/// or past the image edge by up to half a pixel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtlasRect {
    pub name: String,
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

/// Integer crop window inside an image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelBounds {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl AtlasRect {
    /// Horizontal extent in pixels
    pub fn width(&self) -> f32 {
        (self.right - self.left).abs()
    }

    /// Vertical extent in pixels
    pub fn height(&self) -> f32 {
        (self.bottom - self.top).abs()
    }

    /// Pixels whose centres fall inside the rectangle, clamped to the image.
    ///
    /// Returns `None` when the rectangle covers no pixel of a
    /// `width` x `height` image.
    pub fn pixel_bounds(&self, width: u32, height: u32) -> Option<PixelBounds> {
        let (x, w) = covered_span(self.left, self.right, width)?;
        let (y, h) = covered_span(self.top, self.bottom, height)?;
        Some(PixelBounds {
            x,
            y,
            width: w,
            height: h,
        })
    }
}

fn covered_span(a: f32, b: f32, limit: u32) -> Option<(u32, u32)> {
    if !a.is_finite() || !b.is_finite() || limit == 0 {
        return None;
    }
    let first = a.min(b).ceil().max(0.0);
    let last = a.max(b).floor().min((limit - 1) as f32);
    if last < first {
        return None;
    }
    let start = first as u32;
    Some((start, last as u32 - start + 1))
}
