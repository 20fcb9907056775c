//! The eight resize handles: anchor layout, hit-testing and edge-update rules.
//!
//! Anchors are a pure function of the crop rectangle and are recomputed on
//! every render. Each handle owns a rule mapping the handle's new position
//! to a candidate rectangle; candidates are always passed through the
//! constraint pipeline before they become state.

use serde::{Deserialize, Serialize};

use crate::geometry::{CropRect, Point};

/// A draggable anchor on the crop frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Handle {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Top,
    Bottom,
    Left,
    Right,
}

/// Which dimension a handle primarily drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleAxis {
    /// Corners move two edges at once.
    Corner,
    /// `Left` and `Right` move a vertical edge, changing the width.
    Horizontal,
    /// `Top` and `Bottom` move a horizontal edge, changing the height.
    Vertical,
}

impl Handle {
    /// All handles, corners first. Hit-testing walks this order so corners
    /// win where zones overlap on a small rectangle.
    pub const ALL: [Handle; 8] = [
        Handle::TopLeft,
        Handle::TopRight,
        Handle::BottomLeft,
        Handle::BottomRight,
        Handle::Top,
        Handle::Bottom,
        Handle::Left,
        Handle::Right,
    ];

    pub fn axis(self) -> HandleAxis {
        match self {
            Handle::TopLeft | Handle::TopRight | Handle::BottomLeft | Handle::BottomRight => {
                HandleAxis::Corner
            }
            Handle::Left | Handle::Right => HandleAxis::Horizontal,
            Handle::Top | Handle::Bottom => HandleAxis::Vertical,
        }
    }

    /// Anchor position of this handle on `rect`.
    pub fn anchor(self, rect: &CropRect) -> Point {
        let cx = rect.x + rect.width / 2.0;
        let cy = rect.y + rect.height / 2.0;
        match self {
            Handle::TopLeft => Point::new(rect.x, rect.y),
            Handle::TopRight => Point::new(rect.right(), rect.y),
            Handle::BottomLeft => Point::new(rect.x, rect.bottom()),
            Handle::BottomRight => Point::new(rect.right(), rect.bottom()),
            Handle::Top => Point::new(cx, rect.y),
            Handle::Bottom => Point::new(cx, rect.bottom()),
            Handle::Left => Point::new(rect.x, cy),
            Handle::Right => Point::new(rect.right(), cy),
        }
    }

    /// Square hit zone of side `size` centred on the anchor.
    pub fn hit_zone(self, rect: &CropRect, size: f64) -> CropRect {
        let a = self.anchor(rect);
        CropRect::new(a.x - size / 2.0, a.y - size / 2.0, size, size)
    }

    /// Candidate rectangle after moving this handle to `to`.
    ///
    /// Edges opposite the handle stay anchored. A moved left or top edge is
    /// stopped `min_size` short of the opposite edge; a moved right or bottom
    /// edge yields at least `min_size` of extent.
    pub fn drag_to(self, rect: &CropRect, to: Point, min_size: f64) -> CropRect {
        let mut r = *rect;
        let right = rect.right();
        let bottom = rect.bottom();

        let move_left = |r: &mut CropRect| {
            r.x = to.x.min(right - min_size);
            r.width = right - r.x;
        };
        let move_top = |r: &mut CropRect| {
            r.y = to.y.min(bottom - min_size);
            r.height = bottom - r.y;
        };
        let move_right = |r: &mut CropRect| r.width = (to.x - rect.x).max(min_size);
        let move_bottom = |r: &mut CropRect| r.height = (to.y - rect.y).max(min_size);

        match self {
            Handle::TopLeft => {
                move_left(&mut r);
                move_top(&mut r);
            }
            Handle::TopRight => {
                move_top(&mut r);
                move_right(&mut r);
            }
            Handle::BottomLeft => {
                move_left(&mut r);
                move_bottom(&mut r);
            }
            Handle::BottomRight => {
                move_right(&mut r);
                move_bottom(&mut r);
            }
            Handle::Top => move_top(&mut r),
            Handle::Bottom => move_bottom(&mut r),
            Handle::Left => move_left(&mut r),
            Handle::Right => move_right(&mut r),
        }
        r
    }
}

/// Anchor points of all eight handles for one rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HandleAnchor {
    pub handle: Handle,
    pub position: Point,
}

/// Lay out the eight handle anchors of `rect`, in [`Handle::ALL`] order.
pub fn handle_layout(rect: &CropRect) -> [HandleAnchor; 8] {
    Handle::ALL.map(|handle| HandleAnchor {
        handle,
        position: handle.anchor(rect),
    })
}

/// The handle whose hit zone contains `p`, corners first.
pub fn hit_test(rect: &CropRect, p: Point, handle_size: f64) -> Option<Handle> {
    Handle::ALL
        .into_iter()
        .find(|h| h.hit_zone(rect, handle_size).contains(p))
}
