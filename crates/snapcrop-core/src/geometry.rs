//! Rectangle and point value types.
//!
//! All coordinates live in the image-local space of the canvas: the same
//! units as the [`ImageBounds`] supplied by the capture backend. Origin is
//! the top-left corner, y grows downwards.

use serde::{Deserialize, Serialize};

/// Clamp `value` into `[low, high]`.
///
/// Unlike [`f64::clamp`] this never panics: when `low > high` the lower
/// bound wins, which keeps a rectangle anchored to the bounds origin when
/// it is wider than the bounds.
#[inline]
pub fn clamp(value: f64, low: f64, high: f64) -> f64 {
    value.min(high).max(low)
}

/// A point in image-local coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Both coordinates are finite (no NaN, no infinity).
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Component-wise difference `self - other`.
    #[inline]
    pub fn offset_from(&self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

/// An axis-aligned rectangle: the crop region.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CropRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CropRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build the rectangle spanned by two opposite corners, in any order.
    ///
    /// Dragging up-left from the anchor yields the same rectangle as
    /// dragging down-right to it.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: (b.x - a.x).abs(),
            height: (b.y - a.y).abs(),
        }
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    #[inline]
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Width divided by height, or `None` for a zero-height rectangle.
    pub fn aspect(&self) -> Option<f64> {
        (self.height > 0.0).then(|| self.width / self.height)
    }

    /// Point-in-rectangle test, edges inclusive.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    /// Whether `other` lies entirely inside `self`, edges inclusive.
    pub fn contains_rect(&self, other: &CropRect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Whether the two rectangles overlap with a non-empty area.
    pub fn intersects(&self, other: &CropRect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Same size, new origin.
    pub fn with_origin(&self, x: f64, y: f64) -> Self {
        Self { x, y, ..*self }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
    }

    /// The region expressed as fractions of `bounds`: `(left, top, width, height)`
    /// each in `[0, 1]`.
    ///
    /// Degenerate bounds map to the full unit square on that axis.
    pub fn to_normalized(&self, bounds: &ImageBounds) -> NormalizedRect {
        let axis = |pos: f64, len: f64, origin: f64, extent: f64| {
            if extent > 0.0 {
                let start = clamp((pos - origin) / extent, 0.0, 1.0);
                let size = clamp(len / extent, 0.0, 1.0 - start);
                (start, size)
            } else {
                (0.0, 1.0)
            }
        };
        let (left, width) = axis(self.x, self.width, bounds.x, bounds.width);
        let (top, height) = axis(self.y, self.height, bounds.y, bounds.height);
        NormalizedRect {
            left,
            top,
            width,
            height,
        }
    }
}

/// A crop region relative to its bounds, every field in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// The captured image as laid out on the canvas.
///
/// Immutable for one capture session. Negative or non-finite extents are
/// collapsed to zero on construction, so a degenerate bounds is a valid
/// (if useless) value rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImageBounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ImageBounds {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        let finite_or = |v: f64, fallback: f64| if v.is_finite() { v } else { fallback };
        Self {
            x: finite_or(x, 0.0),
            y: finite_or(y, 0.0),
            width: finite_or(width, 0.0).max(0.0),
            height: finite_or(height, 0.0).max(0.0),
        }
    }

    /// Bounds for an image of the given pixel size drawn at the canvas origin.
    pub fn from_size(width: u32, height: u32) -> Self {
        Self::new(0.0, 0.0, width as f64, height as f64)
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Zero width or zero height.
    pub fn is_degenerate(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    pub fn as_rect(&self) -> CropRect {
        CropRect::new(self.x, self.y, self.width, self.height)
    }

    /// Point-in-bounds test, edges inclusive.
    pub fn contains(&self, p: Point) -> bool {
        self.as_rect().contains(p)
    }

    /// The nearest point inside the bounds.
    pub fn clamp_point(&self, p: Point) -> Point {
        Point::new(
            clamp(p.x, self.x, self.right()),
            clamp(p.y, self.y, self.bottom()),
        )
    }
}
