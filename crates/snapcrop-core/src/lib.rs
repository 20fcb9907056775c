//! Snapcrop Core - Interactive crop-region editor
//!
//! This crate provides the geometry and interaction model behind Snapcrop's
//! crop tool: drawing, dragging and resizing a rectangular region over a
//! captured image while it stays inside the image, above a minimum size and
//! (optionally) at a locked aspect ratio.
//!
//! # Module Structure
//!
//! - `geometry` - Rectangle, point and bounds value types
//! - `aspect` - Aspect ratio modes and enforcement
//! - `constraint` - Bounds solver and the full constraint pipeline
//! - `handles` - The eight resize handles, hit-testing and edge rules
//! - `interaction` - The pointer-driven state machine ([`CropEditor`])
//! - `overlay` - Render layout: darkened mask, frame and handle squares
//! - `export` - Mapping the committed region to image pixels
//!
//! Rendering, pointer dispatch, encoding and capture belong to the host.

pub mod aspect;
pub mod config;
pub mod constraint;
pub mod export;
pub mod geometry;
pub mod handles;
pub mod interaction;
pub mod overlay;

pub use aspect::{AspectRatio, AspectRatioError};
pub use config::{ConfigError, CropConfig};
pub use constraint::{apply_constraints, constrain_to_bounds, translate_within_bounds};
pub use export::{crop_image, crop_rgba, ExportError, PixelRegion};
pub use geometry::{CropRect, ImageBounds, NormalizedRect, Point};
pub use handles::{handle_layout, hit_test, Handle, HandleAnchor};
pub use interaction::{CropEditor, InteractionState, PointerEvent};
pub use overlay::{MaskStrips, OverlayLayout};
