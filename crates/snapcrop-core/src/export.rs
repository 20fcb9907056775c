//! Hand-off of the committed crop region to the export pipeline.
//!
//! The editor works in canvas units; the captured image may be drawn scaled
//! inside its bounds. This module maps the region onto the image's pixel
//! grid and cuts the pixels out. Encoding and saving happen elsewhere.
//!
//! # Example
//!
//! ```ignore
//! let region = PixelRegion::from_crop(&rect, &bounds, image.width(), image.height())?;
//! let cropped = crop_image(&image, &rect, &bounds)?;
//! ```

use image::RgbaImage;
use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::{CropRect, ImageBounds};

/// Error types for crop export.
#[derive(Debug, Error, PartialEq)]
pub enum ExportError {
    /// The source image has no pixels.
    #[error("Source image is empty ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },

    /// The crop bounds have zero width or height, so no pixel maps to them.
    #[error("Crop bounds are degenerate: {width}x{height}")]
    DegenerateBounds { width: f64, height: f64 },

    /// The crop region is not a finite rectangle.
    #[error("Crop region is not finite")]
    NonFiniteRegion,

    /// An RGBA buffer whose length does not match its dimensions.
    #[error("Pixel buffer has {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },
}

/// A crop region in integer pixel coordinates of the source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRegion {
    /// Map a crop rectangle in canvas units onto an `image_width` x
    /// `image_height` pixel grid displayed inside `bounds`.
    ///
    /// Edges are rounded to the nearest pixel and clamped to the image;
    /// the region is at least 1x1.
    pub fn from_crop(
        rect: &CropRect,
        bounds: &ImageBounds,
        image_width: u32,
        image_height: u32,
    ) -> Result<Self, ExportError> {
        if image_width == 0 || image_height == 0 {
            return Err(ExportError::EmptyImage {
                width: image_width,
                height: image_height,
            });
        }
        if bounds.is_degenerate() {
            return Err(ExportError::DegenerateBounds {
                width: bounds.width,
                height: bounds.height,
            });
        }
        if !rect.is_finite() {
            return Err(ExportError::NonFiniteRegion);
        }

        let n = rect.to_normalized(bounds);
        let src_w = image_width as f64;
        let src_h = image_height as f64;

        // Round both edges so adjacent regions share a boundary
        let px_left = ((n.left * src_w).round() as u32).min(image_width - 1);
        let px_top = ((n.top * src_h).round() as u32).min(image_height - 1);
        let px_right = (((n.left + n.width) * src_w).round() as u32).min(image_width);
        let px_bottom = (((n.top + n.height) * src_h).round() as u32).min(image_height);

        Ok(Self {
            x: px_left,
            y: px_top,
            width: px_right.saturating_sub(px_left).max(1),
            height: px_bottom.saturating_sub(px_top).max(1),
        })
    }

    /// Whether this region covers the whole `width` x `height` image.
    pub fn is_full(&self, width: u32, height: u32) -> bool {
        self.x == 0 && self.y == 0 && self.width == width && self.height == height
    }
}

/// Cut the crop region out of the captured image.
///
/// `bounds` is where `image` is drawn on the canvas; `rect` is the editor's
/// committed region in the same units.
pub fn crop_image(
    image: &RgbaImage,
    rect: &CropRect,
    bounds: &ImageBounds,
) -> Result<RgbaImage, ExportError> {
    let region = PixelRegion::from_crop(rect, bounds, image.width(), image.height())?;

    // Fast path: full crop returns a clone
    if region.is_full(image.width(), image.height()) {
        return Ok(image.clone());
    }

    debug!(
        "Cropping {}x{} capture to {}x{} at ({}, {})",
        image.width(),
        image.height(),
        region.width,
        region.height,
        region.x,
        region.y
    );
    Ok(image::imageops::crop_imm(image, region.x, region.y, region.width, region.height).to_image())
}

/// [`crop_image`] over a raw RGBA buffer (4 bytes per pixel, row-major).
pub fn crop_rgba(
    pixels: Vec<u8>,
    width: u32,
    height: u32,
    rect: &CropRect,
    bounds: &ImageBounds,
) -> Result<RgbaImage, ExportError> {
    let expected = width as usize * height as usize * 4;
    let actual = pixels.len();
    let image =
        RgbaImage::from_raw(width, height, pixels).ok_or(ExportError::BufferSize { expected, actual })?;
    crop_image(&image, rect, bounds)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
