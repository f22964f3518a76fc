//! Integer control units and ranges.
//!
//! UI widgets report integer positions. These are converted to transform
//! quantities with fixed unit factors:
//!
//! | Control     | Units                | Range                     |
//! |-------------|----------------------|---------------------------|
//! | Rotation    | degrees × 1000       | -180000 ..= 180000        |
//! | Translation | pixels × 10          | ±source dimension × 10    |
//! | Scale       | percent × 10         | 100 ..= 5000 (10%..500%)  |

use serde::{Deserialize, Serialize};

pub const ROTATION_UNITS_PER_DEGREE: f64 = 1000.0;
pub const TRANSLATION_UNITS_PER_PIXEL: f64 = 10.0;
pub const SCALE_UNITS_PER_PERCENT: f64 = 10.0;

pub const ROTATION_RANGE: SliderRange = SliderRange::new(-180_000, 180_000);
pub const SCALE_RANGE: SliderRange = SliderRange::new(100, 5_000);

/// Neutral scale, in percent.
pub const NEUTRAL_SCALE_PERCENT: f64 = 100.0;

/// Inclusive integer range of a slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliderRange {
    pub min: i32,
    pub max: i32,
}

impl SliderRange {
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    /// Symmetric translation range for a source dimension.
    pub fn translation(dimension: u32) -> Self {
        let span = (dimension as i64 * TRANSLATION_UNITS_PER_PIXEL as i64).min(i32::MAX as i64) as i32;
        Self::new(-span, span)
    }

    /// Clamp a reported position into the range.
    #[inline]
    pub fn clamp(&self, value: i32) -> i32 {
        value.clamp(self.min, self.max)
    }
}

/// Ranges a UI must configure its sliders with for a given source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliderRanges {
    pub rotation: SliderRange,
    pub translation_x: SliderRange,
    pub translation_y: SliderRange,
    pub scale: SliderRange,
}

impl SliderRanges {
    pub fn for_source(width: u32, height: u32) -> Self {
        Self {
            rotation: ROTATION_RANGE,
            translation_x: SliderRange::translation(width),
            translation_y: SliderRange::translation(height),
            scale: SCALE_RANGE,
        }
    }
}

/// Integer slider positions matching the applied control values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliderPositions {
    pub rotation: i32,
    pub translation_x: i32,
    pub translation_y: i32,
    pub scale: i32,
}

/// The control values already folded into the transform.
///
/// Each new slider position is applied as a delta from these.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AppliedControls {
    pub rotation_degrees: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    pub scale_percent: f64,
}

impl Default for AppliedControls {
    fn default() -> Self {
        Self {
            rotation_degrees: 0.0,
            offset_x: 0.0,
            offset_y: 0.0,
            scale_percent: NEUTRAL_SCALE_PERCENT,
        }
    }
}

impl AppliedControls {
    /// Check if all values are neutral.
    pub fn is_neutral(&self) -> bool {
        *self == Self::default()
    }

    /// Slider positions for these values, rounded to the nearest unit.
    pub fn positions(&self) -> SliderPositions {
        SliderPositions {
            rotation: to_units(self.rotation_degrees, ROTATION_UNITS_PER_DEGREE),
            translation_x: to_units(self.offset_x, TRANSLATION_UNITS_PER_PIXEL),
            translation_y: to_units(self.offset_y, TRANSLATION_UNITS_PER_PIXEL),
            scale: to_units(self.scale_percent, SCALE_UNITS_PER_PERCENT),
        }
    }
}

#[inline]
pub(crate) fn from_units(value: i32, units: f64) -> f64 {
    value as f64 / units
}

#[inline]
fn to_units(value: f64, units: f64) -> i32 {
    (value * units).round() as i32
}
