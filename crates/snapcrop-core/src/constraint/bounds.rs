//! Bounds constraint solver.
//!
//! Forces a candidate rectangle inside the image bounds while honouring a
//! minimum size. The three steps are order-dependent:
//!
//! 1. Raise width and height to at least `min_size`.
//! 2. Shift the rectangle so its far edges sit inside the bounds, then its
//!    near edges (the near edge wins when the rectangle is too large).
//! 3. Cap width and height at the bounds' extent.
//!
//! When the bounds are smaller than `min_size` on an axis the result spans
//! exactly the bounds on that axis.

use crate::geometry::{clamp, CropRect, ImageBounds, Point};

/// Constrain `rect` to lie within `bounds` with both sides at least
/// `min(min_size, bounds extent)`.
pub fn constrain_to_bounds(rect: CropRect, bounds: &ImageBounds, min_size: f64) -> CropRect {
    let mut result = rect;

    // Minimum size first, before position clamping
    result.width = result.width.max(min_size);
    result.height = result.height.max(min_size);

    result.x = clamp_position(result.x, result.width, bounds.x, bounds.width);
    result.y = clamp_position(result.y, result.height, bounds.y, bounds.height);

    // Bounds smaller than the minimum size
    result.width = result.width.min(bounds.width);
    result.height = result.height.min(bounds.height);

    result
}

/// Move `rect` so its origin is at `to`, clamped so the whole rectangle
/// stays inside `bounds`. The size never changes.
pub fn translate_within_bounds(rect: CropRect, to: Point, bounds: &ImageBounds) -> CropRect {
    rect.with_origin(
        clamp_position(to.x, rect.width, bounds.x, bounds.width),
        clamp_position(to.y, rect.height, bounds.y, bounds.height),
    )
}

/// Slide a span `[pos, pos + len]` into `[origin, origin + extent]`.
///
/// When the span is longer than the extent it is pinned to `origin`.
#[inline]
pub(crate) fn clamp_position(pos: f64, len: f64, origin: f64, extent: f64) -> f64 {
    clamp(pos, origin, origin + extent - len)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
