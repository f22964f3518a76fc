//! Affine transform state: homogeneous matrices and their accumulation.
//!
//! # Mapping Direction
//!
//! The accumulated matrix maps destination pixels to source coordinates
//! (inverse mapping). Elementary operations are folded in on the left of the
//! current matrix, and `translate` negates its offsets, so that issuing
//! `translate(+dx, 0)` moves the visible image content right by `dx`.
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner, x grows right, y grows down
//! - Rotation angles are in degrees
//! - Scale factors are ratios (> 0)

mod accumulator;
mod matrix;

pub use accumulator::{TransformAccumulator, TransformError};
pub use matrix::{Matrix3, SNAP_EPSILON};
