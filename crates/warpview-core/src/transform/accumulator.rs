//! Accumulation of elementary transforms into one destination→source matrix.
//!
//! Every operation builds an elementary matrix `E` and replaces the current
//! matrix `M` with `E · M`, never `M · E`. `M` maps destination pixels back
//! to source coordinates.
//!
//! Rotating about a pivot is therefore written as
//!
//! ```text
//! translate(cx, cy); rotate(θ); translate(-cx, -cy)
//! ```

use thiserror::Error;

use super::matrix::Matrix3;
use crate::raster::Raster;

/// Errors raised by accumulator operations.
///
/// A failing operation leaves both the matrix and any canvas untouched.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TransformError {
    /// Scale factor is zero, negative, or not finite.
    #[error("Invalid scale factor: {0} (must be finite and greater than zero)")]
    InvalidScaleFactor(f64),

    /// The resized canvas would not fit in memory.
    #[error("Canvas too large: scaling {width}x{height} by {factor} exceeds the maximum raster size")]
    CanvasTooLarge { width: u32, height: u32, factor: f64 },
}

/// Owns the single composed transform of an editing session.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TransformAccumulator {
    matrix: Matrix3,
}

impl TransformAccumulator {
    /// Create an accumulator holding the identity matrix.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current destination→source matrix.
    #[inline]
    pub fn matrix(&self) -> Matrix3 {
        self.matrix
    }

    /// Replace the whole matrix at once.
    pub fn set_matrix(&mut self, matrix: Matrix3) {
        self.matrix = matrix;
    }

    /// Reset to the identity matrix.
    pub fn reset(&mut self) {
        log::trace!("reset transform");
        self.matrix = Matrix3::IDENTITY;
    }

    /// Shift image content by `(dx, dy)` pixels.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        log::trace!("translate dx={} dy={}", dx, dy);
        self.premultiply(&Matrix3::translation(dx, dy));
    }

    /// Rotate the sampling grid by `angle_degrees` about the origin.
    pub fn rotate(&mut self, angle_degrees: f64) {
        log::trace!("rotate angle={}°", angle_degrees);
        self.premultiply(&Matrix3::rotation(angle_degrees));
    }

    /// Rotate about the point `(cx, cy)`.
    pub fn rotate_about(&mut self, cx: f64, cy: f64, angle_degrees: f64) {
        self.translate(cx, cy);
        self.rotate(angle_degrees);
        self.translate(-cx, -cy);
    }

    /// Fold in a uniform scale and resize the destination canvas.
    ///
    /// The canvas becomes `floor(current / factor)` in each dimension. This
    /// divides the canvas's current size, not an original reference size, so
    /// repeated calls compound their rounding.
    ///
    /// # Errors
    ///
    /// Returns `TransformError::InvalidScaleFactor` if `factor` is not a
    /// finite positive number, and `TransformError::CanvasTooLarge` if the
    /// resized canvas cannot be allocated. Neither the matrix nor the canvas
    /// is modified in either case.
    pub fn scale_by(&mut self, factor: f64, canvas: &mut Raster) -> Result<(), TransformError> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(TransformError::InvalidScaleFactor(factor));
        }

        let (width, height) = canvas.dimensions();
        let too_large = TransformError::CanvasTooLarge {
            width,
            height,
            factor,
        };
        let new_width = scaled_dimension(width, factor).ok_or_else(|| too_large.clone())?;
        let new_height = scaled_dimension(height, factor).ok_or_else(|| too_large.clone())?;
        log::debug!(
            "scale factor={} canvas {}x{} -> {}x{}",
            factor,
            width,
            height,
            new_width,
            new_height
        );
        canvas
            .resize(new_width, new_height)
            .map_err(|_| too_large)?;

        self.premultiply(&Matrix3::scaling(factor));
        Ok(())
    }

    #[inline]
    fn premultiply(&mut self, elementary: &Matrix3) {
        self.matrix = elementary.multiply(&self.matrix);
    }
}

/// `floor(dimension / factor)`, or `None` if it does not fit in a `u32`.
fn scaled_dimension(dimension: u32, factor: f64) -> Option<u32> {
    let scaled = (dimension as f64 / factor).floor();
    (scaled <= u32::MAX as f64).then_some(scaled as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::PixelFormat;

    #[test]
    fn test_new_is_identity() {
        assert_eq!(TransformAccumulator::new().matrix(), Matrix3::IDENTITY);
    }

    #[test]
    fn test_reset_restores_identity_exactly() {
        let mut acc = TransformAccumulator::new();
        acc.translate(3.0, 4.0);
        acc.rotate(33.0);
        acc.reset();
        assert_eq!(acc.matrix(), Matrix3::IDENTITY);
    }

    #[test]
    fn test_translate_negated_column() {
        let mut acc = TransformAccumulator::new();
        acc.translate(1.0, 0.0);
        assert_eq!(acc.matrix().apply(1.0, 0.0), (0.0, 0.0));
        assert_eq!(acc.matrix()[0][2], -1.0);
    }

    #[test]
    fn test_translations_add() {
        let mut acc = TransformAccumulator::new();
        acc.translate(1.0, 2.0);
        acc.translate(3.0, -5.0);
        let m = acc.matrix();
        assert_eq!(m[0][2], -4.0);
        assert_eq!(m[1][2], 3.0);
    }

    #[test]
    fn test_premultiply_order() {
        // translate then scale: S · T, the translation column is scaled
        let mut canvas = Raster::new(8, 8, PixelFormat::Rgb8);
        let mut acc = TransformAccumulator::new();
        acc.translate(2.0, 0.0);
        acc.scale_by(2.0, &mut canvas).unwrap();
        assert_eq!(acc.matrix()[0][2], -4.0);

        // scale then translate: T · S, it is not
        let mut canvas = Raster::new(8, 8, PixelFormat::Rgb8);
        let mut acc = TransformAccumulator::new();
        acc.scale_by(2.0, &mut canvas).unwrap();
        acc.translate(2.0, 0.0);
        assert_eq!(acc.matrix()[0][2], -2.0);
    }

    #[test]
    fn test_rotate_sign_convention() {
        let mut acc = TransformAccumulator::new();
        acc.rotate(90.0);
        let (xp, yp) = acc.matrix().apply(1.0, 0.0);
        assert!(xp.abs() < 1e-12);
        assert!((yp + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_rotate_about_keeps_pivot_fixed() {
        let mut acc = TransformAccumulator::new();
        acc.rotate_about(10.0, 20.0, 37.0);
        let (xp, yp) = acc.matrix().apply(10.0, 20.0);
        assert!((xp - 10.0).abs() < 1e-9, "xp = {}", xp);
        assert!((yp - 20.0).abs() < 1e-9, "yp = {}", yp);
    }

    #[test]
    fn test_rotate_inverse_round_trip() {
        let mut acc = TransformAccumulator::new();
        acc.translate(5.0, 7.0);
        let before = acc.matrix();
        acc.rotate(23.5);
        acc.rotate(-23.5);
        assert!(acc.matrix().approx_eq(&before, 1e-5));
    }

    #[test]
    fn test_scale_resizes_canvas_with_floor() {
        let mut canvas = Raster::new(10, 7, PixelFormat::Rgba8);
        let mut acc = TransformAccumulator::new();
        acc.scale_by(3.0, &mut canvas).unwrap();
        assert_eq!(canvas.dimensions(), (3, 2));
        assert_eq!(acc.matrix()[0][0], 3.0);
        assert_eq!(acc.matrix()[1][1], 3.0);
    }

    #[test]
    fn test_scale_compounds_from_current_size() {
        let mut canvas = Raster::new(10, 10, PixelFormat::Rgb8);
        let mut acc = TransformAccumulator::new();

        // 10 / 3 = 3, then 3 / (1/3) = 9, not the original 10
        acc.scale_by(3.0, &mut canvas).unwrap();
        acc.scale_by(1.0 / 3.0, &mut canvas).unwrap();
        assert_eq!(canvas.dimensions(), (9, 9));
    }

    #[test]
    fn test_scale_rejects_invalid_factor_atomically() {
        let mut canvas = Raster::new(10, 10, PixelFormat::Rgb8);
        let mut acc = TransformAccumulator::new();
        acc.translate(1.0, 1.0);
        let before = acc.matrix();

        for factor in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = acc.scale_by(factor, &mut canvas).unwrap_err();
            assert!(matches!(err, TransformError::InvalidScaleFactor(_)));
            assert_eq!(acc.matrix(), before);
            assert_eq!(canvas.dimensions(), (10, 10));
        }
    }

    #[test]
    fn test_scale_rejects_canvas_overflow_atomically() {
        let mut canvas = Raster::new(10, 10, PixelFormat::Rgb8);
        let mut acc = TransformAccumulator::new();
        acc.rotate(30.0);
        let before = acc.matrix();

        // 10 / 1e-12 does not fit in a u32
        let err = acc.scale_by(1e-12, &mut canvas).unwrap_err();
        assert_eq!(
            err,
            TransformError::CanvasTooLarge {
                width: 10,
                height: 10,
                factor: 1e-12
            }
        );
        assert_eq!(acc.matrix(), before);
        assert_eq!(canvas.dimensions(), (10, 10));
        assert_eq!(canvas.byte_size(), 300);
    }

    #[test]
    fn test_scale_rejects_buffer_overflow_atomically() {
        // Each dimension fits in a u32, the byte count does not
        let mut canvas = Raster::new(4, 4, PixelFormat::Rgba8);
        let mut acc = TransformAccumulator::new();
        let factor = 4.0 / u32::MAX as f64;

        let err = acc.scale_by(factor, &mut canvas).unwrap_err();
        assert!(matches!(err, TransformError::CanvasTooLarge { .. }));
        assert_eq!(acc.matrix(), Matrix3::IDENTITY);
        assert_eq!(canvas.dimensions(), (4, 4));
    }

    #[test]
    fn test_scaled_dimension() {
        assert_eq!(scaled_dimension(10, 3.0), Some(3));
        assert_eq!(scaled_dimension(7, 0.5), Some(14));
        assert_eq!(scaled_dimension(0, 1e-300), Some(0));
        assert_eq!(scaled_dimension(1, 1e-12), None);
    }

    #[test]
    fn test_error_display() {
        let err = TransformError::InvalidScaleFactor(0.0);
        assert_eq!(
            err.to_string(),
            "Invalid scale factor: 0 (must be finite and greater than zero)"
        );
    }

    #[test]
    fn test_set_matrix() {
        let mut acc = TransformAccumulator::new();
        let m = Matrix3::translation(4.0, 4.0);
        acc.set_matrix(m);
        assert_eq!(acc.matrix(), m);
    }
}
