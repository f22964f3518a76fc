//! WASM bindings for the slider-driven editing session.
//!
//! # Example
//!
//! ```typescript
//! const session = new JsEditSession(image);
//! const ranges = session.slider_ranges();
//! rotation.min = ranges.rotation.min;
//! rotation.max = ranges.rotation.max;
//!
//! rotation.oninput = (e) => {
//!   session.set_rotation(Number(e.target.value));
//!   draw(session.destination());
//! };
//! ```

use crate::types::JsRaster;
use warpview_core::EditSession;
use wasm_bindgen::prelude::*;

/// Editing session wrapper for JavaScript.
///
/// Slider values are integers in the units the core session uses:
/// thousandths of a degree for rotation, tenths of a pixel for translation
/// and tenths of a percent for scale.
#[wasm_bindgen]
pub struct JsEditSession {
    inner: EditSession,
}

#[wasm_bindgen]
impl JsEditSession {
    /// Start a session on a copy of `source`
    #[wasm_bindgen(constructor)]
    pub fn new(source: &JsRaster) -> JsEditSession {
        Self {
            inner: EditSession::new(source.raster().clone()),
        }
    }

    /// Replace the source image and clear all transform state
    pub fn load(&mut self, source: &JsRaster) {
        self.inner.load(source.raster().clone());
    }

    /// Clear all transform state, keeping the current source
    pub fn reset(&mut self) {
        self.inner.reset();
    }

    /// Apply a rotation slider position
    pub fn set_rotation(&mut self, value: i32) {
        self.inner.set_rotation(value);
    }

    /// Apply a horizontal translation slider position
    pub fn set_translation_x(&mut self, value: i32) {
        self.inner.set_translation_x(value);
    }

    /// Apply a vertical translation slider position
    pub fn set_translation_y(&mut self, value: i32) {
        self.inner.set_translation_y(value);
    }

    /// Apply a scale slider position.
    ///
    /// # Errors
    /// Returns an error if the resulting scale factor is rejected. The
    /// session is unchanged in that case.
    pub fn set_scale(&mut self, value: i32) -> Result<(), JsValue> {
        self.inner
            .set_scale(value)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Copy of the current destination raster
    pub fn destination(&self) -> JsRaster {
        JsRaster::from_raster(self.inner.destination().clone())
    }

    /// Copy of the current source raster
    pub fn source(&self) -> JsRaster {
        JsRaster::from_raster(self.inner.source().clone())
    }

    /// Destination width in pixels
    #[wasm_bindgen(getter)]
    pub fn destination_width(&self) -> u32 {
        self.inner.destination().width()
    }

    /// Destination height in pixels
    #[wasm_bindgen(getter)]
    pub fn destination_height(&self) -> u32 {
        self.inner.destination().height()
    }

    /// Current matrix as 9 row-major numbers
    pub fn matrix(&self) -> Vec<f64> {
        self.inner.matrix().to_flat().to_vec()
    }

    /// Slider ranges for the current source, as
    /// `{ rotation, translation_x, translation_y, scale }` of `{ min, max }`
    pub fn slider_ranges(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.slider_ranges())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Slider positions matching the applied values, for restoring a UI
    pub fn slider_positions(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.slider_positions())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use warpview_core::{PixelFormat, Raster, Rgba};

    fn grid() -> JsRaster {
        JsRaster::from_raster(Raster::from_fn(4, 4, PixelFormat::Rgb8, |x, y| {
            Rgba::gray((x + 10 * y) as u8)
        }))
    }

    #[test]
    fn test_new_session_copies_source() {
        let src = grid();
        let session = JsEditSession::new(&src);
        assert_eq!(session.destination().pixels(), src.pixels());
        assert_eq!(session.source().pixels(), src.pixels());
        assert_eq!(
            session.matrix(),
            vec![1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]
        );
    }

    #[test]
    fn test_translation_x() {
        let mut session = JsEditSession::new(&grid());
        session.set_translation_x(10);
        assert_eq!(session.matrix()[2], -1.0);

        let dst = session.destination();
        assert_eq!(dst.raster().get(0, 0).r, 0);
        assert_eq!(dst.raster().get(1, 1).r, 10);
    }

    #[test]
    fn test_scale_resizes_destination() {
        let mut session = JsEditSession::new(&grid());
        session.set_scale(2_000).ok().unwrap();
        assert_eq!(session.destination_width(), 8);
        assert_eq!(session.destination_height(), 8);
    }

    #[test]
    fn test_reset_and_load() {
        let mut session = JsEditSession::new(&grid());
        session.set_rotation(45_000);
        session.reset();
        assert_eq!(session.matrix()[1], 0.0);

        let next = JsRaster::from_raster(Raster::new(2, 3, PixelFormat::Rgba8));
        session.load(&next);
        assert_eq!(session.destination_width(), 2);
        assert_eq!(session.destination_height(), 3);
        assert!(session.source().has_alpha());
    }
}
