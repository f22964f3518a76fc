//! WASM bindings for the transform accumulator and resampler.
//!
//! These give JavaScript direct access to the matrix-level API, for UIs that
//! want their own control scheme instead of [`JsEditSession`](crate::JsEditSession).

use crate::types::JsRaster;
use warpview_core::resample::resample_into_new;
use warpview_core::{Matrix3, TransformAccumulator};
use wasm_bindgen::prelude::*;

/// Transform accumulator wrapper for JavaScript
#[wasm_bindgen]
pub struct JsTransformAccumulator {
    inner: TransformAccumulator,
}

impl Default for JsTransformAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl JsTransformAccumulator {
    /// Create an accumulator holding the identity matrix
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            inner: TransformAccumulator::new(),
        }
    }

    /// Reset to the identity matrix
    pub fn reset(&mut self) {
        self.inner.reset();
    }

    /// Shift image content by (dx, dy) pixels
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.inner.translate(dx, dy);
    }

    /// Rotate by `angle_degrees` about the origin
    pub fn rotate(&mut self, angle_degrees: f64) {
        self.inner.rotate(angle_degrees);
    }

    /// Rotate by `angle_degrees` about (cx, cy)
    pub fn rotate_about(&mut self, cx: f64, cy: f64, angle_degrees: f64) {
        self.inner.rotate_about(cx, cy, angle_degrees);
    }

    /// Fold in a uniform scale and resize `canvas` to `floor(size / factor)`.
    ///
    /// # Errors
    /// Returns an error if `factor` is not a finite positive number. Nothing
    /// is modified in that case.
    pub fn scale_by(&mut self, factor: f64, canvas: &mut JsRaster) -> Result<(), JsValue> {
        self.inner
            .scale_by(factor, canvas.raster_mut())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// The current matrix as 9 row-major numbers
    pub fn matrix(&self) -> Vec<f64> {
        self.inner.matrix().to_flat().to_vec()
    }

    /// Replace the current matrix with 9 row-major numbers.
    ///
    /// # Errors
    /// Returns an error unless exactly 9 values are given. The previous
    /// matrix is kept in that case.
    pub fn set_matrix(&mut self, values: Vec<f64>) -> Result<(), JsValue> {
        let matrix = Matrix3::from_flat(&values).ok_or_else(|| {
            JsValue::from_str(&format!("Expected 9 matrix values, got {}", values.len()))
        })?;
        self.inner.set_matrix(matrix);
        Ok(())
    }
}

impl JsTransformAccumulator {
    pub(crate) fn inner(&self) -> &TransformAccumulator {
        &self.inner
    }
}

/// Resample `source` into a new `width` x `height` raster through the
/// accumulator's current matrix.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const acc = new JsTransformAccumulator();
/// acc.rotate_about(image.width / 2, image.height / 2, 15.0);
/// const out = resample(image, acc, image.width, image.height);
/// ```
#[wasm_bindgen]
pub fn resample(
    source: &JsRaster,
    accumulator: &JsTransformAccumulator,
    width: u32,
    height: u32,
) -> JsRaster {
    let matrix = accumulator.inner().matrix();
    JsRaster::from_raster(resample_into_new(source.raster(), width, height, &matrix))
}
