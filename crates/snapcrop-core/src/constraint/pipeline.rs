//! The full constraint pipeline: bounds, then aspect ratio, then a rescale
//! pass when the ratio pushed an edge back out of bounds.

use crate::aspect::AspectRatio;
use crate::geometry::{CropRect, ImageBounds};
use crate::handles::Handle;

use super::bounds::{clamp_position, constrain_to_bounds};

/// Validate a candidate crop rectangle.
///
/// `handle` is the handle being dragged (`None` for translation, which
/// only receives the bounds pass). The result is always contained in
/// `bounds`. With a fixed ratio and bounds large enough to hold a
/// `min_size` region at that ratio, `width / height` equals the ratio and
/// both sides are at least `min_size`; on smaller bounds containment wins
/// over the ratio. A zero, negative or non-finite ratio is ignored.
pub fn apply_constraints(
    rect: CropRect,
    bounds: &ImageBounds,
    ratio: AspectRatio,
    handle: Option<Handle>,
    min_size: f64,
) -> CropRect {
    let bounded = constrain_to_bounds(rect, bounds, min_size);

    // An unusable ratio gets the same treatment as free mode
    let target = match (ratio.value(), handle) {
        (Some(target), Some(_)) if ratio.is_valid() => target,
        _ => return bounded,
    };

    let mut result = ratio.enforce(bounded, handle);

    // Smallest width keeping both sides at or above min_size
    let min_width = min_size.max(min_size * target);
    if result.width < min_width {
        result.width = min_width;
        result.height = min_width / target;
    }

    // Rescale pass: shrink uniformly to fit from the current top-left corner
    let max_width = bounds.right() - result.x;
    let max_height = bounds.bottom() - result.y;
    if result.width > max_width || result.height > max_height {
        let scale = slack(max_width, result.width).min(slack(max_height, result.height));
        result.width = (result.width * scale).max(min_width);
        result.height = result.width / target;
    }

    result.x = clamp_position(result.x, result.width, bounds.x, bounds.width);
    result.y = clamp_position(result.y, result.height, bounds.y, bounds.height);

    // Only bites when the bounds cannot hold min_size at this ratio
    result.width = result.width.min(bounds.width);
    result.height = result.height.min(bounds.height);

    result
}

/// How far `len` may scale before reaching `max`. Zero-length spans never limit.
#[inline]
fn slack(max: f64, len: f64) -> f64 {
    if len > 0.0 {
        (max / len).max(0.0)
    } else {
        f64::INFINITY
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    const MIN: f64 = 20.0;
    const EPS: f64 = 1e-6;

    /// Bounds comfortably larger than a min-size region at any tested ratio.
    fn bounds_strategy() -> impl Strategy<Value = ImageBounds> {
        (-200.0f64..200.0, -200.0f64..200.0, 200.0f64..2500.0, 200.0f64..2500.0)
            .prop_map(|(x, y, w, h)| ImageBounds::new(x, y, w, h))
    }

    fn rect_strategy() -> impl Strategy<Value = CropRect> {
        (
            -3000.0f64..3000.0,
            -3000.0f64..3000.0,
            0.0f64..4000.0,
            0.0f64..4000.0,
        )
            .prop_map(|(x, y, w, h)| CropRect::new(x, y, w, h))
    }

    fn ratio_strategy() -> impl Strategy<Value = f64> {
        0.25f64..4.0
    }

    fn handle_strategy() -> impl Strategy<Value = Handle> {
        prop::sample::select(Handle::ALL.to_vec())
    }

    fn contained(b: &ImageBounds, r: &CropRect) -> bool {
        r.x >= b.x - EPS
            && r.y >= b.y - EPS
            && r.right() <= b.right() + EPS
            && r.bottom() <= b.bottom() + EPS
    }

    fn approx_eq(a: &CropRect, b: &CropRect) -> bool {
        (a.x - b.x).abs() < EPS
            && (a.y - b.y).abs() < EPS
            && (a.width - b.width).abs() < EPS
            && (a.height - b.height).abs() < EPS
    }

    proptest! {
        /// Property: Fixed-ratio output is contained and honours the ratio.
        #[test]
        fn prop_fixed_ratio_holds(
            b in bounds_strategy(),
            r in rect_strategy(),
            ratio in ratio_strategy(),
            handle in handle_strategy(),
        ) {
            let result = apply_constraints(r, &b, AspectRatio::Fixed(ratio), Some(handle), MIN);

            prop_assert!(contained(&b, &result), "{:?} not inside {:?}", result, b);
            prop_assert!((result.width / result.height - ratio).abs() < EPS);
            prop_assert!(result.width >= MIN - EPS);
            prop_assert!(result.height >= MIN - EPS);
        }

        /// Property: The pipeline is a fixed point on its own output.
        #[test]
        fn prop_pipeline_idempotent(
            b in bounds_strategy(),
            r in rect_strategy(),
            ratio in ratio_strategy(),
            handle in handle_strategy(),
        ) {
            let mode = AspectRatio::Fixed(ratio);
            let once = apply_constraints(r, &b, mode, Some(handle), MIN);
            let twice = apply_constraints(once, &b, mode, Some(handle), MIN);
            prop_assert!(approx_eq(&once, &twice), "{:?} != {:?}", once, twice);
        }

        /// Property: Containment holds for any non-degenerate bounds, even
        /// ones too small for the ratio.
        #[test]
        fn prop_always_contained(
            (x, y, w, h) in (-100.0f64..100.0, -100.0f64..100.0, 1.0f64..500.0, 1.0f64..500.0),
            r in rect_strategy(),
            ratio in 0.05f64..20.0,
            handle in handle_strategy(),
        ) {
            let b = ImageBounds::new(x, y, w, h);
            let result = apply_constraints(r, &b, AspectRatio::Fixed(ratio), Some(handle), MIN);
            prop_assert!(contained(&b, &result), "{:?} not inside {:?}", result, b);
        }
    }
}
