//! Warpview Core - interactive affine transforms for raster images
//!
//! This crate accumulates translate/rotate/scale operations into a single
//! destination→source matrix and resamples a source raster through it with
//! bilinear interpolation. A slider-driven [`EditSession`] ties both
//! together for interactive use.

pub mod decode;
pub mod encode;
pub mod raster;
pub mod resample;
pub mod session;
pub mod transform;

pub use raster::{PixelFormat, Raster, RasterError, Rgba};
pub use resample::{bilinear_weights, resample, resample_into_new};
pub use session::EditSession;
pub use transform::{Matrix3, TransformAccumulator, TransformError};
