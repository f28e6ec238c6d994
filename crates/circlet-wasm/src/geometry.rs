//! WASM bindings for the pure geometry functions.
//!
//! These let the panel preview an arrangement without touching the document.

use circlet_core::{BoundingBox, Point2D};
use wasm_bindgen::prelude::*;

/// Compute the placements of `count` copies around a center.
///
/// # Returns
///
/// An array of `{ position: { x, y }, angle }` objects, `count` long.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const placements = positions_around(0, 0, 100, 4, 0);
/// // [{ position: { x: 100, y: 0 }, angle: 0 }, ...]
/// ```
#[wasm_bindgen]
pub fn positions_around(
    center_x: f64,
    center_y: f64,
    radius: f64,
    count: u32,
    angle_offset_deg: f64,
) -> Result<JsValue, JsValue> {
    let placements = circlet_core::positions_around(
        Point2D::new(center_x, center_y),
        radius,
        count,
        angle_offset_deg,
    );
    serde_wasm_bindgen::to_value(&placements).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Compute the relative transform that rotates a node about its center.
///
/// # Arguments
///
/// * `bounds` - `{ x, y, width, height, rotation }`; other fields are ignored
/// * `target_angle_deg` - Rotation the node should end up with
///
/// # Returns
///
/// The matrix `[[a, b, tx], [c, d, ty]]`.
#[wasm_bindgen]
pub fn rotation_about(bounds: JsValue, target_angle_deg: f64) -> Result<JsValue, JsValue> {
    let bounds: BoundingBox = serde_wasm_bindgen::from_value(bounds)
        .map_err(|e| JsValue::from_str(&format!("Invalid bounding box: {}", e)))?;
    let transform = circlet_core::rotation_about(&bounds, target_angle_deg);
    serde_wasm_bindgen::to_value(&transform).map_err(|e| JsValue::from_str(&e.to_string()))
}
