//! Editor configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default minimum crop extent on each axis, in image-local units.
pub const DEFAULT_MIN_SIZE: f64 = 20.0;

/// Default side length of a resize handle's square hit zone.
pub const DEFAULT_HANDLE_SIZE: f64 = 10.0;

/// Default opacity of the mask drawn over the area outside the crop region.
pub const DEFAULT_OVERLAY_OPACITY: f64 = 0.5;

/// Error types for invalid editor configuration.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// Minimum size must be a finite number greater than zero.
    #[error("Invalid minimum crop size: {0}")]
    InvalidMinSize(f64),

    /// Handle size must be a finite, non-negative number.
    #[error("Invalid handle size: {0}")]
    InvalidHandleSize(f64),

    /// Overlay opacity must lie in [0, 1].
    #[error("Overlay opacity out of range [0, 1]: {0}")]
    InvalidOverlayOpacity(f64),
}

/// Tunables for the crop editor.
///
/// Deserializing a partial object fills the missing fields with their
/// defaults, so a host can send `{ "min_size": 32 }` alone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CropConfig {
    /// Minimum width and height of a materialized crop region.
    pub min_size: f64,
    /// Side of the square hit zone centred on each handle anchor.
    pub handle_size: f64,
    /// Opacity of the darkened mask outside the crop region (0.0 to 1.0).
    pub overlay_opacity: f64,
}

impl Default for CropConfig {
    fn default() -> Self {
        Self {
            min_size: DEFAULT_MIN_SIZE,
            handle_size: DEFAULT_HANDLE_SIZE,
            overlay_opacity: DEFAULT_OVERLAY_OPACITY,
        }
    }
}

impl CropConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check every field, returning the first violation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.min_size.is_finite() || self.min_size <= 0.0 {
            return Err(ConfigError::InvalidMinSize(self.min_size));
        }
        if !self.handle_size.is_finite() || self.handle_size < 0.0 {
            return Err(ConfigError::InvalidHandleSize(self.handle_size));
        }
        if !(0.0..=1.0).contains(&self.overlay_opacity) {
            return Err(ConfigError::InvalidOverlayOpacity(self.overlay_opacity));
        }
        Ok(())
    }
}
