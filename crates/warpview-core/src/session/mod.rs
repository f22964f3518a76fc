//! Slider-driven editing session.
//!
//! An [`EditSession`] ties a loaded source raster to a destination canvas and
//! a [`TransformAccumulator`]. Each control change is converted from integer
//! slider units, applied to the accumulator as a delta from the previously
//! applied value, and followed by a full resample of the source into the
//! destination.
//!
//! # Example
//!
//! ```ignore
//! use warpview_core::session::EditSession;
//!
//! let mut session = EditSession::new(source);
//! session.set_rotation(15_000); // 15°
//! session.set_translation_x(25); // 2.5 px
//! session.set_scale(2_000)?; // 200%
//! display(session.destination());
//! ```

mod controls;

pub use controls::{
    AppliedControls, SliderPositions, SliderRange, SliderRanges, NEUTRAL_SCALE_PERCENT,
    ROTATION_RANGE, ROTATION_UNITS_PER_DEGREE, SCALE_RANGE, SCALE_UNITS_PER_PERCENT,
    TRANSLATION_UNITS_PER_PIXEL,
};

use controls::from_units;

use crate::raster::Raster;
use crate::resample::resample;
use crate::transform::{Matrix3, TransformAccumulator, TransformError};

/// Editing state for one loaded source image.
#[derive(Debug, Clone)]
pub struct EditSession {
    source: Raster,
    destination: Raster,
    accumulator: TransformAccumulator,
    applied: AppliedControls,
}

impl EditSession {
    /// Start a session on `source`. The destination starts as a copy of it.
    pub fn new(source: Raster) -> Self {
        let destination = source.clone();
        log::debug!(
            "session started on {}x{} source",
            source.width(),
            source.height()
        );
        Self {
            source,
            destination,
            accumulator: TransformAccumulator::new(),
            applied: AppliedControls::default(),
        }
    }

    /// Replace the source image and clear all transform state.
    pub fn load(&mut self, source: Raster) {
        *self = Self::new(source);
    }

    /// Clear all transform state, keeping the current source.
    pub fn reset(&mut self) {
        log::debug!("session reset");
        self.accumulator.reset();
        self.applied = AppliedControls::default();
        self.destination = self.source.clone();
    }

    /// Apply a rotation slider position (thousandths of a degree).
    ///
    /// The rotation is about the center of the current destination canvas.
    pub fn set_rotation(&mut self, value: i32) {
        let angle = from_units(ROTATION_RANGE.clamp(value), ROTATION_UNITS_PER_DEGREE);
        let (width, height) = self.destination.dimensions();

        self.accumulator.rotate_about(
            width as f64 / 2.0,
            height as f64 / 2.0,
            angle - self.applied.rotation_degrees,
        );
        self.applied.rotation_degrees = angle;

        self.render();
    }

    /// Apply a horizontal translation slider position (tenths of a pixel).
    pub fn set_translation_x(&mut self, value: i32) {
        let range = SliderRange::translation(self.source.width());
        let offset = from_units(range.clamp(value), TRANSLATION_UNITS_PER_PIXEL);

        self.translate_on_screen(offset - self.applied.offset_x, 0.0);
        self.applied.offset_x = offset;

        self.render();
    }

    /// Apply a vertical translation slider position (tenths of a pixel).
    pub fn set_translation_y(&mut self, value: i32) {
        let range = SliderRange::translation(self.source.height());
        let offset = from_units(range.clamp(value), TRANSLATION_UNITS_PER_PIXEL);

        self.translate_on_screen(0.0, offset - self.applied.offset_y);
        self.applied.offset_y = offset;

        self.render();
    }

    /// Apply a scale slider position (tenths of a percent).
    ///
    /// The factor folded into the transform is `previous% / new%`, which
    /// also resizes the destination canvas.
    ///
    /// # Errors
    ///
    /// Propagates `TransformError` from the accumulator; the session is left
    /// unchanged in that case.
    pub fn set_scale(&mut self, value: i32) -> Result<(), TransformError> {
        let percent = from_units(SCALE_RANGE.clamp(value), SCALE_UNITS_PER_PERCENT);
        let factor = self.applied.scale_percent / percent;

        self.accumulator.scale_by(factor, &mut self.destination)?;
        self.applied.scale_percent = percent;

        self.render();
        Ok(())
    }

    pub fn source(&self) -> &Raster {
        &self.source
    }

    pub fn destination(&self) -> &Raster {
        &self.destination
    }

    pub fn matrix(&self) -> Matrix3 {
        self.accumulator.matrix()
    }

    pub fn applied(&self) -> &AppliedControls {
        &self.applied
    }

    /// Slider ranges for the current source.
    pub fn slider_ranges(&self) -> SliderRanges {
        SliderRanges::for_source(self.source.width(), self.source.height())
    }

    /// Slider positions matching the applied values.
    pub fn slider_positions(&self) -> SliderPositions {
        self.applied.positions()
    }

    /// Translate along destination axes by undoing the applied rotation
    /// around the shift.
    fn translate_on_screen(&mut self, dx: f64, dy: f64) {
        let angle = self.applied.rotation_degrees;
        self.accumulator.rotate(-angle);
        self.accumulator.translate(dx, dy);
        self.accumulator.rotate(angle);
    }

    fn render(&mut self) {
        resample(&self.source, &mut self.destination, &self.accumulator.matrix());
    }
}
