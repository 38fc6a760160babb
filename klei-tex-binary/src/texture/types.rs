//! Decoded image data structures
//!
//! `DecodedImage` is the canonical output: tightly packed RGBA rows with a
//! top-left origin.

use klei_tex_core::RGBA_BYTES_PER_PIXEL;
use image::RgbaImage;

/// A fully decoded texture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl DecodedImage {
    /// Wrap an RGBA buffer, `None` if its length does not match the dimensions
    pub fn from_raw(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        if rgba_len(width, height) != Some(pixels.len()) {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get dimensions as tuple
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Raw RGBA bytes, row-major
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Take the RGBA bytes, row-major
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// RGBA value at `(x, y)`, `None` when out of bounds
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * RGBA_BYTES_PER_PIXEL;
        let mut rgba = [0u8; 4];
        rgba.copy_from_slice(&self.pixels[offset..offset + RGBA_BYTES_PER_PIXEL]);
        Some(rgba)
    }

    /// A copy with the row order reversed
    pub fn flipped_vertical(&self) -> Self {
        Self {
            width: self.width,
            height: self.height,
            pixels: flip_rows(&self.pixels, self.width, self.height, |_| {}),
        }
    }

    /// Copy a sub-rectangle, `None` if it is empty or leaves the image
    pub fn crop(&self, x: u32, y: u32, width: u32, height: u32) -> Option<Self> {
        if width == 0
            || height == 0
            || x.checked_add(width)? > self.width
            || y.checked_add(height)? > self.height
        {
            return None;
        }

        let src_stride = self.width as usize * RGBA_BYTES_PER_PIXEL;
        let row_len = width as usize * RGBA_BYTES_PER_PIXEL;
        let mut pixels = Vec::with_capacity(row_len * height as usize);
        for row in y as usize..(y + height) as usize {
            let start = row * src_stride + x as usize * RGBA_BYTES_PER_PIXEL;
            pixels.extend_from_slice(&self.pixels[start..start + row_len]);
        }

        Some(Self {
            width,
            height,
            pixels,
        })
    }

    /// Convert to an `image` buffer for encoding
    pub fn to_rgba_image(&self) -> RgbaImage {
        // Length was checked at construction
        RgbaImage::from_raw(self.width, self.height, self.pixels.clone())
            .unwrap_or_else(|| RgbaImage::new(self.width, self.height))
    }
}

/// Length in bytes of an RGBA buffer with the given dimensions, `None`
/// when it does not fit in `usize`
pub fn rgba_len(width: u32, height: u32) -> Option<usize> {
    (width as usize)
        .checked_mul(height as usize)?
        .checked_mul(RGBA_BYTES_PER_PIXEL)
}

/// Reverse the row order of an RGBA buffer.
///
/// `progress` receives the percentage of rows written after each row; the
/// values never decrease and the last one is 100.
pub fn flip_rows<F>(pixels: &[u8], width: u32, height: u32, mut progress: F) -> Vec<u8>
where
    F: FnMut(u8),
{
    let stride = width as usize * RGBA_BYTES_PER_PIXEL;
    let rows = height as usize;
    let mut flipped = vec![0u8; stride * rows];

    for y in 0..rows {
        let src = &pixels[y * stride..(y + 1) * stride];
        let dst_row = rows - 1 - y;
        flipped[dst_row * stride..(dst_row + 1) * stride].copy_from_slice(src);
        progress(((y + 1) * 100 / rows) as u8);
    }

    flipped
}
