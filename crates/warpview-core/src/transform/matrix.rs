//! Fixed-size 3×3 homogeneous matrices for 2D affine maps.
//!
//! A [`Matrix3`] maps a point `(x, y, 1)` as
//!
//! ```text
//! | m00 m01 m02 |   | x |
//! | m10 m11 m12 | · | y |
//! |  0   0   1  |   | 1 |
//! ```
//!
//! Row 2 stays `[0, 0, 1]` as long as matrices are only built from the
//! elementary constructors and combined with [`Matrix3::multiply`].

use std::ops::Index;

use serde::{Deserialize, Serialize};

/// Values whose magnitude falls below this after an accumulation step are
/// snapped to exactly zero.
pub const SNAP_EPSILON: f64 = 1e-5;

/// A 3×3 matrix of `f64`, stored row-major.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Matrix3 {
    rows: [[f64; 3]; 3],
}

impl Default for Matrix3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix3 {
    pub const IDENTITY: Matrix3 = Matrix3 {
        rows: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
    };

    pub const fn from_rows(rows: [[f64; 3]; 3]) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[[f64; 3]; 3] {
        &self.rows
    }

    /// Elementary translation for a destination→source map.
    ///
    /// The offsets are negated: moving content by `+dx` means a destination
    /// pixel reads from `dx` further to the left in the source.
    pub fn translation(dx: f64, dy: f64) -> Self {
        Self::from_rows([[1.0, 0.0, -dx], [0.0, 1.0, -dy], [0.0, 0.0, 1.0]])
    }

    /// Elementary rotation by `angle_degrees` for a destination→source map.
    pub fn rotation(angle_degrees: f64) -> Self {
        let (sin, cos) = angle_degrees.to_radians().sin_cos();
        Self::from_rows([[cos, sin, 0.0], [-sin, cos, 0.0], [0.0, 0.0, 1.0]])
    }

    /// Elementary uniform scaling.
    pub fn scaling(factor: f64) -> Self {
        Self::from_rows([[factor, 0.0, 0.0], [0.0, factor, 0.0], [0.0, 0.0, 1.0]])
    }

    /// Standard matrix product `self · rhs` with epsilon snapping.
    ///
    /// Each cell is accumulated over `k` in order, and after every
    /// accumulation step a partial sum with `|v| < SNAP_EPSILON` is replaced
    /// by `0.0`.
    pub fn multiply(&self, rhs: &Matrix3) -> Matrix3 {
        let mut out = [[0.0f64; 3]; 3];
        for (i, row) in out.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                let mut acc = 0.0;
                for k in 0..3 {
                    acc += self.rows[i][k] * rhs.rows[k][j];
                    if acc.abs() < SNAP_EPSILON {
                        acc = 0.0;
                    }
                }
                *cell = acc;
            }
        }
        Matrix3 { rows: out }
    }

    /// Map the point `(x, y)` through the affine part of the matrix.
    #[inline]
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        let m = &self.rows;
        (
            m[0][0] * x + m[0][1] * y + m[0][2],
            m[1][0] * x + m[1][1] * y + m[1][2],
        )
    }

    /// Element-wise comparison within `tolerance`.
    pub fn approx_eq(&self, other: &Matrix3, tolerance: f64) -> bool {
        self.rows
            .iter()
            .flatten()
            .zip(other.rows.iter().flatten())
            .all(|(a, b)| (a - b).abs() <= tolerance)
    }

    /// True if the last row is exactly `[0, 0, 1]`.
    pub fn is_affine(&self) -> bool {
        self.rows[2] == [0.0, 0.0, 1.0]
    }

    /// Row-major flat copy.
    pub fn to_flat(&self) -> [f64; 9] {
        let m = &self.rows;
        [
            m[0][0], m[0][1], m[0][2], m[1][0], m[1][1], m[1][2], m[2][0], m[2][1], m[2][2],
        ]
    }

    /// Build from a row-major slice. Returns `None` unless it has exactly 9 values.
    pub fn from_flat(values: &[f64]) -> Option<Matrix3> {
        let values: &[f64; 9] = values.try_into().ok()?;
        Some(Self::from_rows([
            [values[0], values[1], values[2]],
            [values[3], values[4], values[5]],
            [values[6], values[7], values[8]],
        ]))
    }
}

impl Index<usize> for Matrix3 {
    type Output = [f64; 3];

    fn index(&self, row: usize) -> &[f64; 3] {
        &self.rows[row]
    }
}
