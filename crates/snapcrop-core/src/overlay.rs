//! Render layout for the crop overlay.
//!
//! The renderer draws straight from [`OverlayLayout`]: a darkened mask made
//! of four strips around the crop region, the frame, and one square per
//! handle. The layout is recomputed from editor state on every update and
//! holds nothing the editor does not already know.

use serde::Serialize;

use crate::config::CropConfig;
use crate::geometry::{CropRect, ImageBounds};
use crate::handles::{Handle, HandleAnchor};
use crate::interaction::CropEditor;

/// The four mask strips outside the crop region.
///
/// Top and bottom span the full bounds width; left and right fill the rows
/// beside the region. Strips with nothing to cover have zero size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MaskStrips {
    pub top: CropRect,
    pub bottom: CropRect,
    pub left: CropRect,
    pub right: CropRect,
}

impl MaskStrips {
    pub fn new(bounds: &ImageBounds, crop: &CropRect) -> Self {
        Self {
            top: CropRect::new(
                bounds.x,
                bounds.y,
                bounds.width,
                (crop.y - bounds.y).max(0.0),
            ),
            bottom: CropRect::new(
                bounds.x,
                crop.bottom(),
                bounds.width,
                (bounds.bottom() - crop.bottom()).max(0.0),
            ),
            left: CropRect::new(
                bounds.x,
                crop.y,
                (crop.x - bounds.x).max(0.0),
                crop.height,
            ),
            right: CropRect::new(
                crop.right(),
                crop.y,
                (bounds.right() - crop.right()).max(0.0),
                crop.height,
            ),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &CropRect> {
        [&self.top, &self.bottom, &self.left, &self.right].into_iter()
    }

    /// Total masked area.
    pub fn area(&self) -> f64 {
        self.iter().map(|r| r.width * r.height).sum()
    }
}

/// A handle square as drawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HandleSquare {
    pub handle: Handle,
    pub rect: CropRect,
}

/// Everything the renderer needs to draw one frame of the crop overlay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlayLayout {
    pub mask: MaskStrips,
    pub mask_opacity: f64,
    pub frame: CropRect,
    pub handles: Vec<HandleSquare>,
}

impl OverlayLayout {
    pub fn new(bounds: &ImageBounds, crop: &CropRect, config: &CropConfig) -> Self {
        let handles = Handle::ALL
            .into_iter()
            .map(|handle| HandleSquare {
                handle,
                rect: handle.hit_zone(crop, config.handle_size),
            })
            .collect();

        Self {
            mask: MaskStrips::new(bounds, crop),
            mask_opacity: config.overlay_opacity,
            frame: *crop,
            handles,
        }
    }

    /// Layout for the editor's current region; `None` while there is none.
    pub fn for_editor(editor: &CropEditor) -> Option<Self> {
        editor
            .crop_area()
            .map(|crop| Self::new(editor.bounds(), &crop, editor.config()))
    }

    /// Handle anchors (square centres) in [`Handle::ALL`] order.
    pub fn anchors(&self) -> Vec<HandleAnchor> {
        self.handles
            .iter()
            .map(|sq| HandleAnchor {
                handle: sq.handle,
                position: sq.rect.center(),
            })
            .collect()
    }
}
