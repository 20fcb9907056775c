//! Snapcrop WASM - WebAssembly bindings for Snapcrop
//!
//! This crate exposes the snapcrop-core crop editor to the TypeScript
//! canvas frontend, which owns rendering and pointer dispatch.
//!
//! # Module Structure
//!
//! - `editor` - The crop editor state machine and aspect ratio selection
//! - `types` - WASM-compatible wrapper types for rectangles and image data
//! - `export` - Cutting the committed region out of the captured pixels
//! - `logging` - `log` records forwarded to the browser console
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsCropEditor, export_crop } from '@snapcrop/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const editor = new JsCropEditor(0, 0, capture.width, capture.height);
//! // ... forward pointer events ...
//! const cropped = export_crop(capture, editor);
//! ```

use wasm_bindgen::prelude::*;

mod editor;
mod export;
mod logging;
mod types;

// Re-export public types
pub use editor::{aspect_ratio_presets, JsCropEditor};
pub use export::{crop_pixel_region, export_crop};
pub use logging::set_log_level;
pub use types::{JsCapturedImage, JsCropRect};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    logging::init();
    log::info!("Snapcrop WASM {} ready", version());
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
