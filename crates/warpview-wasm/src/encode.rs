//! Image encoding WASM bindings for exporting the destination raster.
//!
//! # Example
//!
//! ```typescript
//! import { encode_png, encode_jpeg } from '@warpview/wasm';
//!
//! const png = encode_png(session.destination());
//! const jpeg = encode_jpeg(session.destination(), 90);
//! ```

use crate::types::JsRaster;
use warpview_core::encode;
use wasm_bindgen::prelude::*;

/// Encode a raster to PNG bytes, keeping its alpha channel if present.
///
/// # Errors
///
/// Returns an error if the raster is empty or encoding fails.
#[wasm_bindgen]
pub fn encode_png(image: &JsRaster) -> Result<Vec<u8>, JsValue> {
    encode::encode_png(image.raster()).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Encode a raster to JPEG bytes.
///
/// # Arguments
///
/// * `image` - The raster to encode. Alpha is dropped.
/// * `quality` - JPEG quality, clamped to 1-100 (recommended: 90)
///
/// # Errors
///
/// Returns an error if the raster is empty or encoding fails.
#[wasm_bindgen]
pub fn encode_jpeg(image: &JsRaster, quality: u8) -> Result<Vec<u8>, JsValue> {
    encode::encode_jpeg(image.raster(), quality).map_err(|e| JsValue::from_str(&e.to_string()))
}
