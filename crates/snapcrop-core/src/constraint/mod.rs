//! Crop-region constraint solving.
//!
//! Every candidate rectangle produced by the interaction controller goes
//! through this module before it becomes observable state.
//!
//! # Pipeline
//!
//! 1. Bounds pass: minimum size, position clamp, extent cap
//! 2. Aspect ratio enforcement (skipped in free mode and for translation)
//! 3. Rescale pass if the ratio pushed an edge out of bounds
//! 4. Final position clamp and extent cap
//!
//! # Coordinate System
//!
//! - All values are in image-local canvas units
//! - Origin is top-left corner

mod bounds;
mod pipeline;

pub use bounds::{constrain_to_bounds, translate_within_bounds};
pub use pipeline::apply_constraints;
