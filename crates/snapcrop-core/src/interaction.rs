//! Pointer-driven crop editing state machine.
//!
//! [`CropEditor`] is the single owner of the crop region. The host feeds it
//! pointer events in image-local coordinates and redraws from
//! [`CropEditor::crop_area`] (or the overlay layout) after each event; it
//! never writes geometry back. Every rectangle stored in the state has been
//! through the constraint pipeline.
//!
//! ```text
//!            down in bounds              up
//!   Idle ───────────────────▶ Drawing ─────────▶ Defined ◀──────────┐
//!    ▲                         │  ▲ move           │  │              │ up
//!    │ up without a move       └──┘                │  │ down on      │
//!    └─────────────────────────┘       down inside │  │ a handle     │
//!                                                  ▼  ▼              │
//!                                        Dragging   Resizing ────────┘
//! ```
//!
//! `reset` returns to `Idle` from any state and discards the region.

use log::{debug, trace, warn};
use serde::Serialize;

use crate::aspect::AspectRatio;
use crate::config::{ConfigError, CropConfig};
use crate::constraint::{apply_constraints, translate_within_bounds};
use crate::geometry::{CropRect, ImageBounds, Point};
use crate::handles::{handle_layout, hit_test, Handle, HandleAnchor};

/// Handle semantics used while drawing a fresh region: width primary.
const DRAW_HANDLE: Handle = Handle::BottomRight;

/// Current phase of the crop interaction.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum InteractionState {
    /// No crop region.
    #[default]
    Idle,
    /// Pointer held since `anchor`; `rect` appears on the first move.
    Drawing {
        anchor: Point,
        rect: Option<CropRect>,
    },
    /// A committed region, ready for export.
    Defined { rect: CropRect },
    /// Translating the region; `grab_offset` is pointer minus region origin.
    Dragging { rect: CropRect, grab_offset: Point },
    /// Resizing via `handle`; `grab_offset` is pointer minus handle anchor.
    Resizing {
        rect: CropRect,
        handle: Handle,
        grab_offset: Point,
    },
}

impl InteractionState {
    /// The crop region held by this state, if any.
    pub fn rect(&self) -> Option<CropRect> {
        match *self {
            InteractionState::Idle => None,
            InteractionState::Drawing { rect, .. } => rect,
            InteractionState::Defined { rect }
            | InteractionState::Dragging { rect, .. }
            | InteractionState::Resizing { rect, .. } => Some(rect),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            InteractionState::Idle => "idle",
            InteractionState::Drawing { .. } => "drawing",
            InteractionState::Defined { .. } => "defined",
            InteractionState::Dragging { .. } => "dragging",
            InteractionState::Resizing { .. } => "resizing",
        }
    }

    /// A pointer gesture is in progress.
    pub fn is_interacting(&self) -> bool {
        matches!(
            self,
            InteractionState::Drawing { .. }
                | InteractionState::Dragging { .. }
                | InteractionState::Resizing { .. }
        )
    }
}

/// A pointer event in image-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(Point),
    Move(Point),
    Up(Point),
}

/// The interactive crop-region editor for one capture session.
#[derive(Debug, Clone)]
pub struct CropEditor {
    bounds: ImageBounds,
    aspect_ratio: AspectRatio,
    config: CropConfig,
    state: InteractionState,
}

impl CropEditor {
    /// Create an editor with the default configuration and free ratio.
    pub fn new(bounds: ImageBounds) -> Self {
        Self {
            bounds,
            aspect_ratio: AspectRatio::Free,
            config: CropConfig::default(),
            state: InteractionState::Idle,
        }
    }

    /// Create an editor with a custom configuration.
    ///
    /// # Errors
    /// Returns the first invalid field of `config`.
    pub fn with_config(bounds: ImageBounds, config: CropConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::new(bounds)
        })
    }

    pub fn bounds(&self) -> &ImageBounds {
        &self.bounds
    }

    pub fn aspect_ratio(&self) -> AspectRatio {
        self.aspect_ratio
    }

    pub fn config(&self) -> &CropConfig {
        &self.config
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    /// The current (always validated) crop region.
    pub fn crop_area(&self) -> Option<CropRect> {
        self.state.rect()
    }

    pub fn is_interacting(&self) -> bool {
        self.state.is_interacting()
    }

    /// Handle anchors for the current region, for rendering.
    pub fn handles(&self) -> Option<[HandleAnchor; 8]> {
        self.crop_area().map(|rect| handle_layout(&rect))
    }

    /// Discard the region and return to `Idle`.
    pub fn reset(&mut self) {
        debug!("Resetting crop editor from {}", self.state.name());
        self.state = InteractionState::Idle;
    }

    /// Same as [`reset`](Self::reset); the toolbar's "clear" action.
    pub fn clear_region(&mut self) {
        self.reset();
    }

    /// Start a new capture session on `bounds`. The old region is discarded.
    pub fn set_bounds(&mut self, bounds: ImageBounds) {
        debug!("New capture bounds {:?}", bounds);
        self.bounds = bounds;
        self.reset();
    }

    /// Switch the aspect ratio mode.
    ///
    /// A defined region is re-constrained immediately with corner semantics;
    /// during a gesture the new mode applies from the next pointer move.
    /// Returns the region when it was re-constrained. A zero, negative or
    /// non-finite ratio is rejected and the previous mode kept.
    pub fn set_aspect_ratio(&mut self, ratio: AspectRatio) -> Option<CropRect> {
        if !ratio.is_valid() {
            warn!("Ignoring invalid aspect ratio {:?}", ratio);
            return None;
        }
        debug!("Setting aspect ratio to {}", ratio);
        self.aspect_ratio = ratio;

        match self.state {
            InteractionState::Defined { rect } => {
                let rect = self.constrain(rect, Some(DRAW_HANDLE));
                self.state = InteractionState::Defined { rect };
                Some(rect)
            }
            _ => None,
        }
    }

    /// Replace the region programmatically, e.g. to restore a previous crop.
    pub fn set_crop_area(&mut self, rect: CropRect) -> Option<CropRect> {
        if !rect.is_finite() {
            warn!("Ignoring non-finite crop area {:?}", rect);
            return None;
        }
        let rect = self.constrain(rect, Some(DRAW_HANDLE));
        debug!("Crop area set to {:?}", rect);
        self.state = InteractionState::Defined { rect };
        Some(rect)
    }

    /// Dispatch a pointer event. Returns the crop region this event emitted.
    pub fn handle_event(&mut self, event: PointerEvent) -> Option<CropRect> {
        match event {
            PointerEvent::Down(p) => self.pointer_down(p),
            PointerEvent::Move(p) => self.pointer_move(p),
            PointerEvent::Up(p) => self.pointer_up(p),
        }
    }

    /// Pointer pressed at `p`.
    ///
    /// Starts drawing inside the bounds when no region exists, resizing on a
    /// handle, or dragging inside the region. Anything else is ignored.
    pub fn pointer_down(&mut self, p: Point) -> Option<CropRect> {
        if !p.is_finite() {
            warn!("Ignoring pointer down at non-finite position {:?}", p);
            return None;
        }

        match self.state {
            InteractionState::Idle => {
                if !self.bounds.contains(p) {
                    trace!("Pointer down outside bounds at {:?}", p);
                    return None;
                }
                debug!("Drawing crop region from ({}, {})", p.x, p.y);
                self.state = InteractionState::Drawing {
                    anchor: p,
                    rect: None,
                };
                None
            }
            InteractionState::Defined { rect } => {
                if let Some(handle) = hit_test(&rect, p, self.config.handle_size) {
                    debug!("Resizing crop region with {:?} handle", handle);
                    self.state = InteractionState::Resizing {
                        rect,
                        handle,
                        grab_offset: p.offset_from(handle.anchor(&rect)),
                    };
                    Some(rect)
                } else if rect.contains(p) {
                    debug!("Dragging crop region from ({}, {})", p.x, p.y);
                    self.state = InteractionState::Dragging {
                        rect,
                        grab_offset: p.offset_from(rect.origin()),
                    };
                    Some(rect)
                } else {
                    None
                }
            }
            // A second press while a gesture is live (lost release)
            _ => None,
        }
    }

    /// Pointer moved to `p`. Only meaningful during a gesture.
    ///
    /// Positions outside the bounds are accepted; the dragged corner or
    /// handle is clamped to the bounds before constraints run.
    pub fn pointer_move(&mut self, p: Point) -> Option<CropRect> {
        if !p.is_finite() {
            warn!("Ignoring pointer move to non-finite position {:?}", p);
            return None;
        }

        let (next, rect) = match self.state {
            InteractionState::Idle | InteractionState::Defined { .. } => return None,
            InteractionState::Drawing { anchor, .. } => {
                let rect = self.constrain_draw(anchor, self.bounds.clamp_point(p));
                (
                    InteractionState::Drawing {
                        anchor,
                        rect: Some(rect),
                    },
                    rect,
                )
            }
            InteractionState::Dragging { rect, grab_offset } => {
                let rect = translate_within_bounds(rect, p.offset_from(grab_offset), &self.bounds);
                (InteractionState::Dragging { rect, grab_offset }, rect)
            }
            InteractionState::Resizing {
                rect,
                handle,
                grab_offset,
            } => {
                let target = self.bounds.clamp_point(p.offset_from(grab_offset));
                let candidate = handle.drag_to(&rect, target, self.config.min_size);
                let rect = self.constrain(candidate, Some(handle));
                (
                    InteractionState::Resizing {
                        rect,
                        handle,
                        grab_offset,
                    },
                    rect,
                )
            }
        };

        trace!("{} -> {:?}", next.name(), rect);
        self.state = next;
        Some(rect)
    }

    /// Pointer released. Ends any gesture without moving the region.
    pub fn pointer_up(&mut self, _p: Point) -> Option<CropRect> {
        match self.state {
            InteractionState::Drawing { rect: None, .. } => {
                debug!("Released without drawing, back to idle");
                self.state = InteractionState::Idle;
                None
            }
            InteractionState::Drawing {
                rect: Some(rect), ..
            }
            | InteractionState::Dragging { rect, .. }
            | InteractionState::Resizing { rect, .. } => {
                debug!("Crop region defined at {:?}", rect);
                self.state = InteractionState::Defined { rect };
                Some(rect)
            }
            InteractionState::Idle | InteractionState::Defined { .. } => None,
        }
    }

    /// Constrain a region being drawn from `anchor` towards `corner`.
    ///
    /// The pipeline keeps the top-left corner fixed, so the region is solved
    /// in a frame mirrored to put `anchor` there, with the room between
    /// `anchor` and the bounds edges in the drawing direction as bounds.
    /// Mapped back, the press point stays a corner of the region unless
    /// that room is below the minimum size.
    fn constrain_draw(&self, anchor: Point, corner: Point) -> CropRect {
        let leftward = corner.x < anchor.x;
        let upward = corner.y < anchor.y;
        let room = ImageBounds::new(
            0.0,
            0.0,
            if leftward {
                anchor.x - self.bounds.x
            } else {
                self.bounds.right() - anchor.x
            },
            if upward {
                anchor.y - self.bounds.y
            } else {
                self.bounds.bottom() - anchor.y
            },
        );
        let drawn = CropRect::from_corners(anchor, corner);
        let local = apply_constraints(
            CropRect::new(0.0, 0.0, drawn.width, drawn.height),
            &room,
            self.aspect_ratio,
            Some(DRAW_HANDLE),
            self.config.min_size,
        );

        let x = if leftward { anchor.x - local.width } else { anchor.x };
        let y = if upward { anchor.y - local.height } else { anchor.y };
        self.constrain(CropRect::new(x, y, local.width, local.height), Some(DRAW_HANDLE))
    }

    fn constrain(&self, rect: CropRect, handle: Option<Handle>) -> CropRect {
        apply_constraints(
            rect,
            &self.bounds,
            self.aspect_ratio,
            handle,
            self.config.min_size,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor() -> CropEditor {
        CropEditor::new(ImageBounds::new(0.0, 0.0, 1000.0, 800.0))
    }

    fn pt(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    fn defined(rect: CropRect) -> CropEditor {
        let mut ed = editor();
        ed.set_crop_area(rect);
        ed
    }

    fn assert_rect_eq(actual: CropRect, expected: CropRect) {
        let close = |a: f64, b: f64| (a - b).abs() < 1e-6;
        assert!(
            close(actual.x, expected.x)
                && close(actual.y, expected.y)
                && close(actual.width, expected.width)
                && close(actual.height, expected.height),
            "expected {:?}, got {:?}",
            expected,
            actual
        );
    }

    #[test]
    fn test_starts_idle() {
        let ed = editor();
        assert_eq!(ed.state(), &InteractionState::Idle);
        assert_eq!(ed.crop_area(), None);
        assert!(ed.handles().is_none());
    }

    #[test]
    fn test_draw_reverse_direction() {
        let mut ed = editor();
        assert_eq!(ed.pointer_down(pt(100.0, 100.0)), None);
        assert_eq!(ed.state().name(), "drawing");

        let live = ed.pointer_move(pt(50.0, 50.0));
        assert_eq!(live, Some(CropRect::new(50.0, 50.0, 50.0, 50.0)));

        let done = ed.pointer_up(pt(50.0, 50.0));
        assert_eq!(done, live);
        assert_eq!(
            ed.state(),
            &InteractionState::Defined {
                rect: CropRect::new(50.0, 50.0, 50.0, 50.0)
            }
        );
    }

    #[test]
    fn test_draw_applies_min_size() {
        let mut ed = editor();
        ed.pointer_down(pt(100.0, 100.0));
        let live = ed.pointer_move(pt(105.0, 103.0)).unwrap();
        assert_eq!(live, CropRect::new(100.0, 100.0, 20.0, 20.0));
    }

    #[test]
    fn test_draw_with_ratio() {
        let mut ed = editor();
        ed.set_aspect_ratio(AspectRatio::Fixed(2.0));
        ed.pointer_down(pt(100.0, 100.0));
        let live = ed.pointer_move(pt(300.0, 400.0)).unwrap();
        assert_rect_eq(live, CropRect::new(100.0, 100.0, 200.0, 100.0));
    }

    #[test]
    fn test_draw_up_left_with_ratio_keeps_press_point() {
        let mut ed = editor();
        ed.set_aspect_ratio(AspectRatio::Fixed(1.0));
        ed.pointer_down(pt(900.0, 700.0));
        let live = ed.pointer_move(pt(100.0, 100.0)).unwrap();
        assert_rect_eq(live, CropRect::new(200.0, 0.0, 700.0, 700.0));
        assert_eq!(live.right(), 900.0);
        assert_eq!(live.bottom(), 700.0);
    }

    #[test]
    fn test_draw_min_size_grows_away_from_press() {
        let mut ed = editor();
        ed.pointer_down(pt(100.0, 100.0));
        let live = ed.pointer_move(pt(95.0, 97.0)).unwrap();
        assert_eq!(live, CropRect::new(80.0, 80.0, 20.0, 20.0));
    }

    #[test]
    fn test_draw_towards_near_edge_still_reaches_min_size() {
        let mut ed = editor();
        ed.pointer_down(pt(10.0, 10.0));
        let live = ed.pointer_move(pt(-50.0, -50.0)).unwrap();
        assert_eq!(live, CropRect::new(0.0, 0.0, 20.0, 20.0));
        assert!(live.contains(pt(10.0, 10.0)));
    }

    #[test]
    fn test_draw_past_bounds_clamps_corner() {
        let mut ed = editor();
        ed.pointer_down(pt(900.0, 700.0));
        let live = ed.pointer_move(pt(1500.0, 1200.0)).unwrap();
        assert_eq!(live, CropRect::new(900.0, 700.0, 100.0, 100.0));
    }

    #[test]
    fn test_down_outside_bounds_ignored() {
        let mut ed = editor();
        assert_eq!(ed.pointer_down(pt(-5.0, 10.0)), None);
        assert_eq!(ed.state(), &InteractionState::Idle);
        assert_eq!(ed.pointer_move(pt(50.0, 50.0)), None);
    }

    #[test]
    fn test_click_without_move_returns_to_idle() {
        let mut ed = editor();
        ed.pointer_down(pt(100.0, 100.0));
        assert_eq!(ed.pointer_up(pt(100.0, 100.0)), None);
        assert_eq!(ed.state(), &InteractionState::Idle);
    }

    #[test]
    fn test_non_finite_events_ignored() {
        let mut ed = editor();
        assert_eq!(ed.pointer_down(pt(f64::NAN, 10.0)), None);
        assert_eq!(ed.state(), &InteractionState::Idle);

        ed.pointer_down(pt(100.0, 100.0));
        ed.pointer_move(pt(200.0, 200.0));
        assert_eq!(ed.pointer_move(pt(f64::INFINITY, 0.0)), None);
        assert_eq!(ed.crop_area(), Some(CropRect::new(100.0, 100.0, 100.0, 100.0)));
    }

    #[test]
    fn test_drag_keeps_grab_offset() {
        let mut ed = defined(CropRect::new(100.0, 100.0, 200.0, 100.0));
        assert!(ed.pointer_down(pt(150.0, 130.0)).is_some());
        assert_eq!(ed.state().name(), "dragging");

        let moved = ed.pointer_move(pt(250.0, 330.0)).unwrap();
        assert_eq!(moved, CropRect::new(200.0, 300.0, 200.0, 100.0));

        ed.pointer_up(pt(250.0, 330.0));
        assert_eq!(ed.crop_area(), Some(moved));
        assert_eq!(ed.state().name(), "defined");
    }

    #[test]
    fn test_drag_clamps_to_bounds_and_keeps_size() {
        let mut ed = defined(CropRect::new(100.0, 100.0, 200.0, 100.0));
        ed.set_aspect_ratio(AspectRatio::Fixed(1.0));
        let before = ed.crop_area().unwrap();

        ed.pointer_down(pt(200.0, 150.0));
        let moved = ed.pointer_move(pt(5000.0, -5000.0)).unwrap();
        assert_eq!(moved.width, before.width);
        assert_eq!(moved.height, before.height);
        assert_eq!(moved.right(), 1000.0);
        assert_eq!(moved.y, 0.0);
    }

    #[test]
    fn test_down_outside_region_ignored() {
        let mut ed = defined(CropRect::new(100.0, 100.0, 200.0, 100.0));
        assert_eq!(ed.pointer_down(pt(600.0, 600.0)), None);
        assert_eq!(ed.state().name(), "defined");
    }

    #[test]
    fn test_handle_takes_priority_over_body() {
        let mut ed = defined(CropRect::new(100.0, 100.0, 200.0, 100.0));
        ed.pointer_down(pt(102.0, 102.0));
        assert!(matches!(
            ed.state(),
            InteractionState::Resizing {
                handle: Handle::TopLeft,
                ..
            }
        ));
    }

    #[test]
    fn test_resize_right_with_16_9() {
        let mut ed = defined(CropRect::new(100.0, 100.0, 200.0, 100.0));
        ed.aspect_ratio = AspectRatio::Fixed(16.0 / 9.0);

        ed.pointer_down(pt(300.0, 150.0));
        let live = ed.pointer_move(pt(950.0, 150.0)).unwrap();
        assert_rect_eq(live, CropRect::new(100.0, 100.0, 850.0, 478.125));
    }

    #[test]
    fn test_resize_right_far_outside_bounds() {
        let mut ed = defined(CropRect::new(100.0, 100.0, 200.0, 100.0));
        ed.aspect_ratio = AspectRatio::Fixed(16.0 / 9.0);

        ed.pointer_down(pt(300.0, 150.0));
        let live = ed.pointer_move(pt(2000.0, 150.0)).unwrap();
        assert_rect_eq(live, CropRect::new(100.0, 100.0, 900.0, 506.25));
    }

    #[test]
    fn test_resize_preserves_handle_grab_offset() {
        let mut ed = defined(CropRect::new(100.0, 100.0, 200.0, 100.0));
        // Grab the bottom-right handle 3 units off its anchor
        ed.pointer_down(pt(303.0, 203.0));
        let live = ed.pointer_move(pt(403.0, 253.0)).unwrap();
        assert_eq!(live, CropRect::new(100.0, 100.0, 300.0, 150.0));
    }

    #[test]
    fn test_resize_top_left_floors_at_min_size() {
        let mut ed = defined(CropRect::new(100.0, 100.0, 200.0, 100.0));
        ed.pointer_down(pt(100.0, 100.0));
        let live = ed.pointer_move(pt(900.0, 700.0)).unwrap();
        assert_eq!(live, CropRect::new(280.0, 180.0, 20.0, 20.0));
    }

    #[test]
    fn test_release_without_move_keeps_rect() {
        let mut ed = defined(CropRect::new(100.0, 100.0, 200.0, 100.0));
        ed.pointer_down(pt(300.0, 150.0));
        let live = ed.pointer_move(pt(420.0, 150.0)).unwrap();
        let released = ed.pointer_up(pt(999.0, 999.0)).unwrap();
        assert_eq!(released, live);
        assert_eq!(ed.state(), &InteractionState::Defined { rect: live });
    }

    #[test]
    fn test_press_and_release_handle_keeps_rect() {
        let rect = CropRect::new(100.0, 100.0, 200.0, 100.0);
        let mut ed = defined(rect);
        for handle in Handle::ALL {
            let anchor = handle.anchor(&rect);
            ed.pointer_down(anchor);
            assert_eq!(ed.pointer_up(anchor), Some(rect), "{:?}", handle);
        }
    }

    #[test]
    fn test_ratio_change_reconstrains_defined() {
        let mut ed = defined(CropRect::new(100.0, 100.0, 400.0, 100.0));
        let rect = ed.set_aspect_ratio(AspectRatio::Fixed(1.0)).unwrap();
        assert_rect_eq(rect, CropRect::new(100.0, 100.0, 400.0, 400.0));

        assert_eq!(ed.set_aspect_ratio(AspectRatio::Free), Some(rect));
    }

    #[test]
    fn test_invalid_ratio_rejected() {
        let rect = CropRect::new(100.0, 100.0, 200.0, 100.0);
        let mut ed = defined(rect);
        ed.set_aspect_ratio(AspectRatio::Fixed(2.0));

        for bad in [-1.0, 0.0, f64::NAN, f64::INFINITY] {
            assert_eq!(ed.set_aspect_ratio(AspectRatio::Fixed(bad)), None);
            assert_eq!(ed.aspect_ratio(), AspectRatio::Fixed(2.0));
            assert_eq!(ed.crop_area(), Some(rect));
        }
    }

    #[test]
    fn test_ratio_change_mid_gesture_deferred() {
        let mut ed = editor();
        ed.pointer_down(pt(100.0, 100.0));
        ed.pointer_move(pt(300.0, 200.0));
        assert_eq!(ed.set_aspect_ratio(AspectRatio::Fixed(1.0)), None);
        let live = ed.pointer_move(pt(300.0, 200.0)).unwrap();
        assert_rect_eq(live, CropRect::new(100.0, 100.0, 200.0, 200.0));
    }

    #[test]
    fn test_reset_from_any_state() {
        let mut ed = defined(CropRect::new(100.0, 100.0, 200.0, 100.0));
        ed.pointer_down(pt(200.0, 150.0));
        assert!(ed.is_interacting());
        ed.reset();
        assert_eq!(ed.state(), &InteractionState::Idle);
        assert_eq!(ed.crop_area(), None);

        let mut ed = defined(CropRect::new(100.0, 100.0, 200.0, 100.0));
        ed.clear_region();
        assert_eq!(ed.crop_area(), None);
    }

    #[test]
    fn test_set_bounds_starts_new_session() {
        let mut ed = defined(CropRect::new(100.0, 100.0, 200.0, 100.0));
        ed.set_bounds(ImageBounds::new(0.0, 0.0, 640.0, 480.0));
        assert_eq!(ed.crop_area(), None);
        assert_eq!(ed.bounds().width, 640.0);
    }

    #[test]
    fn test_with_config_validates() {
        let mut config = CropConfig::default();
        config.min_size = -1.0;
        assert!(CropEditor::with_config(ImageBounds::from_size(100, 100), config).is_err());

        config.min_size = 50.0;
        let mut ed = CropEditor::with_config(ImageBounds::from_size(100, 100), config).unwrap();
        ed.pointer_down(pt(10.0, 10.0));
        let live = ed.pointer_move(pt(12.0, 12.0)).unwrap();
        assert_eq!(live, CropRect::new(10.0, 10.0, 50.0, 50.0));
    }

    #[test]
    fn test_degenerate_bounds_collapse() {
        let mut ed = CropEditor::new(ImageBounds::new(0.0, 0.0, 0.0, 100.0));
        ed.pointer_down(pt(0.0, 10.0));
        let live = ed.pointer_move(pt(0.0, 50.0)).unwrap();
        assert_eq!(live.width, 0.0);
        assert_eq!(live.height, 40.0);
    }

    #[test]
    fn test_handle_event_dispatch() {
        let mut ed = editor();
        let events = [
            PointerEvent::Down(pt(10.0, 10.0)),
            PointerEvent::Move(pt(110.0, 60.0)),
            PointerEvent::Up(pt(110.0, 60.0)),
        ];
        let emitted: Vec<_> = events.into_iter().map(|e| ed.handle_event(e)).collect();
        assert_eq!(emitted[0], None);
        assert_eq!(emitted[2], Some(CropRect::new(10.0, 10.0, 100.0, 50.0)));
    }

    #[test]
    fn test_handles_follow_state() {
        let ed = defined(CropRect::new(0.0, 0.0, 100.0, 50.0));
        let handles = ed.handles().unwrap();
        assert_eq!(handles[3].handle, Handle::BottomRight);
        assert_eq!(handles[3].position, pt(100.0, 50.0));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn event_strategy() -> impl Strategy<Value = PointerEvent> {
        let point = (-300.0f64..1300.0, -300.0f64..1100.0).prop_map(|(x, y)| Point::new(x, y));
        prop_oneof![
            point.clone().prop_map(PointerEvent::Down),
            point.clone().prop_map(PointerEvent::Move),
            point.clone().prop_map(PointerEvent::Move),
            point.prop_map(PointerEvent::Up),
        ]
    }

    fn ratio_strategy() -> impl Strategy<Value = AspectRatio> {
        prop::sample::select(AspectRatio::PRESETS.iter().map(|(_, r)| *r).collect::<Vec<_>>())
    }

    proptest! {
        /// Property: No event sequence makes an out-of-bounds or
        /// wrong-ratio region observable.
        #[test]
        fn prop_events_keep_region_valid(
            ratio in ratio_strategy(),
            events in prop::collection::vec(event_strategy(), 1..60),
        ) {
            let bounds = ImageBounds::new(0.0, 0.0, 1000.0, 800.0);
            let mut ed = CropEditor::new(bounds);
            ed.set_aspect_ratio(ratio);

            for event in events {
                let translating = matches!(ed.state(), InteractionState::Dragging { .. });
                let before = ed.crop_area();
                ed.handle_event(event);

                if let Some(rect) = ed.crop_area() {
                    prop_assert!(rect.x >= 0.0 && rect.y >= 0.0);
                    prop_assert!(rect.right() <= 1000.0 + 1e-6);
                    prop_assert!(rect.bottom() <= 800.0 + 1e-6);
                    prop_assert!(rect.width >= 20.0 - 1e-6 && rect.height >= 20.0 - 1e-6);
                    if let Some(r) = ratio.value() {
                        prop_assert!((rect.width / rect.height - r).abs() < 1e-6);
                    }
                    if translating {
                        let before = before.unwrap();
                        prop_assert_eq!(rect.width, before.width);
                        prop_assert_eq!(rect.height, before.height);
                    }
                }
            }
        }
    }
}
