//! Aspect ratio lock and its enforcement.
//!
//! A fixed ratio is stored as `width / height`. Enforcement rewrites one
//! dimension from the other; which one is primary depends on the handle
//! being dragged:
//!
//! | Handle              | Primary | Recomputed               |
//! |---------------------|---------|--------------------------|
//! | `Left`, `Right`     | width   | `height = width / ratio` |
//! | `Top`, `Bottom`     | height  | `width = height * ratio` |
//! | any corner          | width   | `height = width / ratio` |
//!
//! Pure translation has no handle and never touches the size.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::CropRect;
use crate::handles::{Handle, HandleAxis};

/// Error types for aspect ratio construction and parsing.
#[derive(Debug, Error, PartialEq)]
pub enum AspectRatioError {
    /// The ratio is zero, negative, NaN or infinite.
    #[error("Aspect ratio must be a finite positive number, got {0}")]
    InvalidRatio(f64),

    /// The label is neither `free`, `W:H`, nor a decimal number.
    #[error("Unrecognized aspect ratio: {0:?}")]
    Unrecognized(String),
}

/// Aspect ratio mode selected in the toolbar.
///
/// Deserialization goes through [`AspectRatio::fixed`], so a host cannot
/// hand over a zero, negative or non-finite ratio.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(
    tag = "mode",
    content = "ratio",
    rename_all = "lowercase",
    try_from = "AspectRatioRepr"
)]
pub enum AspectRatio {
    /// No ratio enforcement.
    #[default]
    Free,
    /// Locked `width / height` ratio, always finite and positive.
    Fixed(f64),
}

impl AspectRatio {
    /// Toolbar presets, in display order, with their labels.
    pub const PRESETS: [(&'static str, AspectRatio); 6] = [
        ("free", AspectRatio::Free),
        ("16:9", AspectRatio::Fixed(16.0 / 9.0)),
        ("4:3", AspectRatio::Fixed(4.0 / 3.0)),
        ("1:1", AspectRatio::Fixed(1.0)),
        ("9:16", AspectRatio::Fixed(9.0 / 16.0)),
        ("3:4", AspectRatio::Fixed(3.0 / 4.0)),
    ];

    /// Build a fixed ratio, rejecting non-finite or non-positive values.
    pub fn fixed(ratio: f64) -> Result<Self, AspectRatioError> {
        if ratio.is_finite() && ratio > 0.0 {
            Ok(AspectRatio::Fixed(ratio))
        } else {
            Err(AspectRatioError::InvalidRatio(ratio))
        }
    }

    /// Build a fixed ratio from `width : height` terms.
    pub fn from_terms(width: f64, height: f64) -> Result<Self, AspectRatioError> {
        Self::fixed(width / height)
    }

    /// The locked ratio, or `None` in free mode.
    #[inline]
    pub fn value(&self) -> Option<f64> {
        match *self {
            AspectRatio::Free => None,
            AspectRatio::Fixed(r) => Some(r),
        }
    }

    #[inline]
    pub fn is_free(&self) -> bool {
        matches!(self, AspectRatio::Free)
    }

    /// `Free`, or a finite positive `Fixed` ratio.
    #[inline]
    pub fn is_valid(&self) -> bool {
        match *self {
            AspectRatio::Free => true,
            AspectRatio::Fixed(r) => r.is_finite() && r > 0.0,
        }
    }

    /// The preset label for this ratio, if it is one of [`Self::PRESETS`].
    pub fn label(&self) -> Option<&'static str> {
        Self::PRESETS
            .iter()
            .find(|(_, preset)| preset == self)
            .map(|(label, _)| *label)
    }

    /// Rewrite one dimension of `rect` so that `width / height` equals the
    /// locked ratio.
    ///
    /// `handle` is the handle being dragged; `None` means the whole
    /// rectangle is being translated and the input is returned unchanged.
    /// Free mode also returns the input unchanged.
    pub fn enforce(&self, rect: CropRect, handle: Option<Handle>) -> CropRect {
        let (ratio, handle) = match (self.value(), handle) {
            (Some(ratio), Some(handle)) => (ratio, handle),
            _ => return rect,
        };

        let mut result = rect;
        match handle.axis() {
            HandleAxis::Vertical => result.width = result.height * ratio,
            HandleAxis::Horizontal | HandleAxis::Corner => result.height = result.width / ratio,
        }
        result
    }
}

/// Wire form of [`AspectRatio`], checked before it becomes one.
#[derive(Deserialize)]
#[serde(tag = "mode", content = "ratio", rename_all = "lowercase")]
enum AspectRatioRepr {
    Free,
    Fixed(f64),
}

impl TryFrom<AspectRatioRepr> for AspectRatio {
    type Error = AspectRatioError;

    fn try_from(repr: AspectRatioRepr) -> Result<Self, Self::Error> {
        match repr {
            AspectRatioRepr::Free => Ok(AspectRatio::Free),
            AspectRatioRepr::Fixed(r) => AspectRatio::fixed(r),
        }
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.label(), self) {
            (Some(label), _) => f.write_str(label),
            (None, AspectRatio::Fixed(r)) => write!(f, "{r}"),
            (None, AspectRatio::Free) => f.write_str("free"),
        }
    }
}

impl FromStr for AspectRatio {
    type Err = AspectRatioError;

    /// Accepts `free`, `W:H` (e.g. `16:9`) or a bare decimal ratio (`1.5`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("free") {
            return Ok(AspectRatio::Free);
        }

        let unrecognized = || AspectRatioError::Unrecognized(s.to_string());
        match s.split_once(':') {
            Some((w, h)) => {
                let w: f64 = w.trim().parse().map_err(|_| unrecognized())?;
                let h: f64 = h.trim().parse().map_err(|_| unrecognized())?;
                Self::from_terms(w, h)
            }
            None => {
                let r: f64 = s.parse().map_err(|_| unrecognized())?;
                Self::fixed(r)
            }
        }
    }
}
