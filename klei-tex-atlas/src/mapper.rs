//! UV to pixel coordinate mapping

use crate::document::AtlasDocument;
use crate::types::{AtlasRect, UvRect};
use klei_tex_core::{ATLAS_PIXEL_MARGIN, TexError};
use tracing::warn;

/// Map one UV rectangle onto a `width` x `height` image.
///
/// Both `v` bounds are inverted (`v = 1 - v`) to move the origin to the
/// top-left, then every bound becomes `coord * dimension - 0.5`. No
/// clamping is applied.
pub fn map_entry(entry: &UvRect, width: u32, height: u32) -> AtlasRect {
    let w = f64::from(width);
    let h = f64::from(height);
    let to_pixel = |coord: f64, dimension: f64| (coord * dimension - ATLAS_PIXEL_MARGIN) as f32;

    AtlasRect {
        name: entry.name.clone(),
        left: to_pixel(entry.u1, w),
        right: to_pixel(entry.u2, w),
        top: to_pixel(1.0 - entry.v1, h),
        bottom: to_pixel(1.0 - entry.v2, h),
    }
}

/// Map every entry and sort the result by name.
///
/// The sort is stable and ordinal, so duplicate names keep their input
/// order.
pub fn map_all(entries: &[UvRect], width: u32, height: u32) -> Vec<AtlasRect> {
    let mut rects: Vec<AtlasRect> = entries
        .iter()
        .map(|entry| map_entry(entry, width, height))
        .collect();
    sort_by_name(&mut rects);
    rects
}

fn sort_by_name(rects: &mut [AtlasRect]) {
    rects.sort_by(|a, b| a.name.cmp(&b.name));
}

/// Result of mapping a whole document
#[derive(Debug, Default)]
pub struct MappedAtlas {
    /// Mapped rectangles, sorted by name
    pub rects: Vec<AtlasRect>,
    /// Entries that could not be parsed, in document order
    pub dropped: Vec<TexError>,
}

/// Map every parseable entry of `doc`.
///
/// Entries with a missing or non-numeric attribute are dropped with a
/// warning; the remaining entries are still mapped.
pub fn map_document(doc: &AtlasDocument, width: u32, height: u32) -> MappedAtlas {
    let mut mapped = MappedAtlas::default();

    for raw in doc.entries() {
        match raw.to_uv_rect() {
            Ok(uv) => mapped.rects.push(map_entry(&uv, width, height)),
            Err(err) => {
                warn!(index = raw.index, "Dropping atlas entry: {}", err);
                mapped.dropped.push(err);
            }
        }
    }

    sort_by_name(&mut mapped.rects);
    mapped
}
