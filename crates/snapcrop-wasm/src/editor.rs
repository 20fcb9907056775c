//! Crop editor WASM bindings.
//!
//! The canvas frontend owns rendering and pointer dispatch. It forwards
//! pointer events here and redraws from `crop_area()` / `overlay()` after
//! each event that returns `true`.

use snapcrop_core::{
    AspectRatio, AspectRatioError, CropConfig, CropEditor, CropRect, ImageBounds, OverlayLayout,
    Point,
};
use wasm_bindgen::prelude::*;

use crate::types::JsCropRect;

/// JavaScript-accessible crop editor for one capture session.
///
/// # Example (TypeScript)
/// ```typescript
/// const editor = new JsCropEditor(imageX, imageY, imageWidth, imageHeight);
/// editor.set_aspect_ratio('16:9');
///
/// stage.on('mousedown', (e) => editor.pointer_down(e.x, e.y) && redraw());
/// stage.on('mousemove', (e) => editor.pointer_move(e.x, e.y) && redraw());
/// stage.on('mouseup', (e) => editor.pointer_up(e.x, e.y) && redraw());
///
/// function redraw() {
///   const layout = editor.overlay(); // undefined when there is no region
///   ...
/// }
/// ```
#[wasm_bindgen]
pub struct JsCropEditor {
    inner: CropEditor,
}

#[wasm_bindgen]
impl JsCropEditor {
    /// Create an editor for an image laid out at `(x, y, width, height)` on
    /// the canvas, with the default configuration.
    #[wasm_bindgen(constructor)]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> JsCropEditor {
        JsCropEditor {
            inner: CropEditor::new(ImageBounds::new(x, y, width, height)),
        }
    }

    /// Create an editor with a configuration object.
    ///
    /// # Arguments
    /// * `config` - `{ min_size?, handle_size?, overlay_opacity? }`; missing
    ///   fields take their defaults
    ///
    /// # Errors
    /// Returns error if the object cannot be deserialized or a value is invalid
    pub fn with_config(
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        config: JsValue,
    ) -> Result<JsCropEditor, JsValue> {
        let config: CropConfig = serde_wasm_bindgen::from_value(config)
            .map_err(|e| JsValue::from_str(&format!("Invalid crop config: {}", e)))?;
        let inner = CropEditor::with_config(ImageBounds::new(x, y, width, height), config)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(JsCropEditor { inner })
    }

    /// Select the aspect ratio by toolbar label (`free`, `16:9`, `1.5`, ...).
    ///
    /// Returns `true` when a defined region was re-constrained and needs a redraw.
    ///
    /// # Errors
    /// Returns error if the label is not a valid ratio
    pub fn set_aspect_ratio(&mut self, label: &str) -> Result<bool, JsValue> {
        self.apply_aspect_label(label)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Label of the current ratio (`free`, a preset label, or a decimal).
    pub fn aspect_ratio_label(&self) -> String {
        self.inner.aspect_ratio().to_string()
    }

    /// Pointer pressed. Returns `true` if the event changed the editor.
    pub fn pointer_down(&mut self, x: f64, y: f64) -> bool {
        self.track(|ed| ed.pointer_down(Point::new(x, y)))
    }

    /// Pointer moved. Returns `true` if the region changed.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        self.track(|ed| ed.pointer_move(Point::new(x, y)))
    }

    /// Pointer released. Returns `true` if a gesture ended.
    pub fn pointer_up(&mut self, x: f64, y: f64) -> bool {
        self.track(|ed| ed.pointer_up(Point::new(x, y)))
    }

    /// Discard the region (cancel crop).
    pub fn reset(&mut self) {
        self.inner.reset();
    }

    /// Discard the region; alias of `reset` for the toolbar's clear button.
    pub fn clear_region(&mut self) {
        self.inner.clear_region();
    }

    /// Start a new capture session with new image bounds.
    pub fn set_bounds(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.inner.set_bounds(ImageBounds::new(x, y, width, height));
    }

    /// Restore a region, validated against the current bounds and ratio.
    pub fn set_crop_area(&mut self, x: f64, y: f64, width: f64, height: f64) -> Option<JsCropRect> {
        self.inner
            .set_crop_area(CropRect::new(x, y, width, height))
            .map(JsCropRect::from)
    }

    /// The current crop region, or `undefined` if none.
    pub fn crop_area(&self) -> Option<JsCropRect> {
        self.inner.crop_area().map(JsCropRect::from)
    }

    /// `idle`, `drawing`, `defined`, `dragging` or `resizing`.
    pub fn state_name(&self) -> String {
        self.inner.state().name().to_string()
    }

    /// The full interaction state, e.g.
    /// `{ state: "resizing", rect: {...}, handle: "top_left", grab_offset: {...} }`.
    ///
    /// # Errors
    /// Returns error if serialization fails
    pub fn state(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.inner.state())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// A pointer gesture is in progress.
    pub fn is_interacting(&self) -> bool {
        self.inner.is_interacting()
    }

    /// Handle anchors as `[{ handle, position: { x, y } }]`, or `undefined`.
    ///
    /// # Errors
    /// Returns error if serialization fails
    pub fn handles(&self) -> Result<JsValue, JsValue> {
        let handles = self.inner.handles().map(|h| h.to_vec());
        serde_wasm_bindgen::to_value(&handles).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Full overlay layout (mask strips, frame, handle squares), or `undefined`.
    ///
    /// # Errors
    /// Returns error if serialization fails
    pub fn overlay(&self) -> Result<JsValue, JsValue> {
        let layout = OverlayLayout::for_editor(&self.inner);
        serde_wasm_bindgen::to_value(&layout).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Explicitly free WASM memory.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsCropEditor {
    pub(crate) fn inner(&self) -> &CropEditor {
        &self.inner
    }

    fn apply_aspect_label(&mut self, label: &str) -> Result<bool, AspectRatioError> {
        let ratio: AspectRatio = label.parse()?;
        Ok(self.inner.set_aspect_ratio(ratio).is_some())
    }

    /// Run an event and report whether it emitted a region or changed state.
    fn track(
        &mut self,
        event: impl FnOnce(&mut CropEditor) -> Option<CropRect>,
    ) -> bool {
        let before = *self.inner.state();
        let emitted = event(&mut self.inner);
        emitted.is_some() || *self.inner.state() != before
    }
}

/// Labels of the toolbar aspect ratio presets, in display order.
#[wasm_bindgen]
pub fn aspect_ratio_presets() -> Vec<String> {
    AspectRatio::PRESETS
        .iter()
        .map(|(label, _)| label.to_string())
        .collect()
}
