//! Image decoding WASM bindings.
//!
//! # Example
//!
//! ```typescript
//! import { decode_image } from '@warpview/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_image(bytes);
//! console.log(`Decoded ${image.width}x${image.height} image`);
//! ```

use crate::types::JsRaster;
use warpview_core::decode;
use wasm_bindgen::prelude::*;

/// Decode PNG or JPEG bytes into a raster.
///
/// The format is detected from the content. Images with an alpha channel
/// decode to RGBA, everything else to RGB.
///
/// # Errors
///
/// Returns an error if:
/// - The bytes are not a recognized image format
/// - The image is corrupted or truncated
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsRaster, JsValue> {
    decode::decode_image(bytes)
        .map(JsRaster::from_raster)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
