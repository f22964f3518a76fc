//! WASM-compatible wrapper types for raster data.
//!
//! This module provides a JavaScript-friendly type that wraps the core
//! `Raster`, handling the conversion between Rust and JavaScript data
//! representations.

use js_sys::Uint8ClampedArray;
use warpview_core::{PixelFormat, Raster};
use wasm_bindgen::prelude::*;

/// A raster wrapper for JavaScript.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. `pixels()`, `rgba_pixels()` and
/// `image_data()` copy it into JavaScript memory. Keep rasters in WASM
/// memory between slider events and only extract pixels for drawing.
#[wasm_bindgen]
pub struct JsRaster {
    inner: Raster,
}

#[wasm_bindgen]
impl JsRaster {
    /// Create a raster from dimensions and pixel data.
    ///
    /// # Arguments
    /// * `width` - Raster width in pixels
    /// * `height` - Raster height in pixels
    /// * `pixels` - Row-major pixel data, 3 bytes per pixel (RGB) or 4 (RGBA)
    /// * `has_alpha` - Whether `pixels` is RGBA
    ///
    /// # Errors
    /// Returns an error if `pixels` does not match the dimensions.
    #[wasm_bindgen(constructor)]
    pub fn new(
        width: u32,
        height: u32,
        pixels: Vec<u8>,
        has_alpha: bool,
    ) -> Result<JsRaster, JsValue> {
        let format = if has_alpha {
            PixelFormat::Rgba8
        } else {
            PixelFormat::Rgb8
        };
        Raster::from_raw(width, height, format, pixels)
            .map(JsRaster::from_raster)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Get the raster width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width()
    }

    /// Get the raster height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height()
    }

    /// Whether the pixel data carries an alpha channel
    #[wasm_bindgen(getter)]
    pub fn has_alpha(&self) -> bool {
        self.inner.format().has_alpha()
    }

    /// Get the number of bytes in the pixel buffer
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.byte_size()
    }

    /// Returns the pixel data in its own format as a Uint8Array.
    pub fn pixels(&self) -> Vec<u8> {
        self.inner.pixels().to_vec()
    }

    /// Returns the pixel data as RGBA (4 bytes per pixel).
    pub fn rgba_pixels(&self) -> Vec<u8> {
        self.inner.to_rgba_bytes()
    }

    /// Returns RGBA pixel data ready for `new ImageData(data, width, height)`.
    pub fn image_data(&self) -> Uint8ClampedArray {
        Uint8ClampedArray::from(self.inner.to_rgba_bytes().as_slice())
    }
}

impl JsRaster {
    pub(crate) fn from_raster(inner: Raster) -> Self {
        Self { inner }
    }

    pub(crate) fn raster(&self) -> &Raster {
        &self.inner
    }

    pub(crate) fn raster_mut(&mut self) -> &mut Raster {
        &mut self.inner
    }
}


/// WASM-specific tests that require JsValue.
///
/// Use `wasm-pack test` to run these.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_new_rejects_wrong_length() {
        let result = JsRaster::new(10, 10, vec![0u8; 10], false);
        assert!(result.is_err());
    }

    #[wasm_bindgen_test]
    fn test_image_data_is_rgba() {
        let img = JsRaster::new(2, 2, vec![9u8; 12], false).unwrap();
        assert_eq!(img.image_data().length(), 16);
    }
}
