//! WASM bindings for handing the committed crop to the export pipeline.
//!
//! Encoding stays on the JavaScript side; these functions only cut the
//! selected pixels out of the captured buffer.

use snapcrop_core::{crop_rgba, CropRect, ExportError, PixelRegion};
use wasm_bindgen::prelude::*;

use crate::editor::JsCropEditor;
use crate::types::JsCapturedImage;

/// Crop a captured image to the editor's current region.
///
/// The editor's bounds describe where `image` is drawn on the canvas, so a
/// scaled preview maps back onto full-resolution pixels.
///
/// # Returns
///
/// New `JsCapturedImage` with the cropped pixels.
///
/// # Errors
///
/// Returns error if there is no crop region, the buffer does not match the
/// image dimensions, or the bounds are degenerate.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const cropped = export_crop(capture, editor);
/// const png = await encodePng(cropped.pixels(), cropped.width, cropped.height);
/// ```
#[wasm_bindgen]
pub fn export_crop(
    image: &JsCapturedImage,
    editor: &JsCropEditor,
) -> Result<JsCapturedImage, JsValue> {
    let rect = editor
        .inner()
        .crop_area()
        .ok_or_else(|| JsValue::from_str("No crop region selected"))?;
    crop_captured(image, &rect, editor).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Pixel coordinates of the editor's region on a `width` x `height` capture,
/// as `[x, y, width, height]`. Empty when there is no region or it cannot map.
#[wasm_bindgen]
pub fn crop_pixel_region(editor: &JsCropEditor, width: u32, height: u32) -> Vec<u32> {
    let inner = editor.inner();
    inner
        .crop_area()
        .and_then(|rect| PixelRegion::from_crop(&rect, inner.bounds(), width, height).ok())
        .map(|r| vec![r.x, r.y, r.width, r.height])
        .unwrap_or_default()
}

fn crop_captured(
    image: &JsCapturedImage,
    rect: &CropRect,
    editor: &JsCropEditor,
) -> Result<JsCapturedImage, ExportError> {
    let (width, height, pixels) = image.clone_parts();
    let cropped = crop_rgba(pixels, width, height, rect, editor.inner().bounds())?;
    let (out_w, out_h) = cropped.dimensions();
    Ok(JsCapturedImage::new(out_w, out_h, cropped.into_raw()))
}
