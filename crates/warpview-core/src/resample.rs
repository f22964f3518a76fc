//! Inverse-mapped bilinear resampling.
//!
//! For each destination pixel `(x, y)` the transform gives a continuous source
//! coordinate `(xp, yp)`. The four source pixels around it are blended with
//! bilinear weights:
//!
//! ```text
//! tx = xp - floor(xp)        ty = yp - floor(yp)
//! w00 = (1-tx)(1-ty)         w01 = tx(1-ty)
//! w10 = (1-tx)ty             w11 = tx·ty
//! ```
//!
//! A sample is only taken when all four neighbours lie inside the source;
//! otherwise the destination pixel is zeroed. The test is strict, so a
//! coordinate whose right or bottom neighbour would fall one past the last
//! row or column is rejected rather than clamped.

use crate::raster::{Raster, Rgba};
use crate::transform::Matrix3;

/// Bilinear weights `[w00, w01, w10, w11]` for fractional offsets `(tx, ty)`.
///
/// `w01` weights the right neighbour and `w10` the bottom neighbour.
#[inline]
pub fn bilinear_weights(tx: f64, ty: f64) -> [f64; 4] {
    [
        (1.0 - tx) * (1.0 - ty),
        tx * (1.0 - ty),
        (1.0 - tx) * ty,
        tx * ty,
    ]
}

/// Fill `destination` by sampling `source` through `matrix`.
///
/// `destination` keeps its size and format. Sampled pixels are written
/// opaque, and pixels whose neighbourhood falls outside the source are
/// written as [`Rgba::TRANSPARENT`]. Source alpha is never read.
pub fn resample(source: &Raster, destination: &mut Raster, matrix: &Matrix3) {
    let (dst_w, dst_h) = destination.dimensions();
    let mut outside = 0usize;

    for y in 0..dst_h {
        for x in 0..dst_w {
            let (xp, yp) = matrix.apply(x as f64, y as f64);
            let pixel = match sample_bilinear(source, xp, yp) {
                Some(pixel) => pixel,
                None => {
                    outside += 1;
                    Rgba::TRANSPARENT
                }
            };
            destination.set(x, y, pixel);
        }
    }

    log::trace!(
        "resampled {}x{} from {}x{} ({} pixels outside source)",
        dst_w,
        dst_h,
        source.width(),
        source.height(),
        outside
    );
}

/// Resample into a newly allocated raster in the source's format.
pub fn resample_into_new(source: &Raster, width: u32, height: u32, matrix: &Matrix3) -> Raster {
    let mut destination = Raster::new(width, height, source.format());
    resample(source, &mut destination, matrix);
    destination
}

/// Sample `source` at `(xp, yp)`, or `None` if a neighbour is out of bounds.
fn sample_bilinear(source: &Raster, xp: f64, yp: f64) -> Option<Rgba> {
    let x0 = xp.floor();
    let y0 = yp.floor();

    // NaN coordinates fail every comparison and land here too
    let inside = x0 >= 0.0
        && y0 >= 0.0
        && x0 + 1.0 < source.width() as f64
        && y0 + 1.0 < source.height() as f64;
    if !inside {
        return None;
    }

    let tx = xp - x0;
    let ty = yp - y0;
    let (x0, y0) = (x0 as u32, y0 as u32);

    let p00 = source.get(x0, y0);
    let p01 = source.get(x0 + 1, y0);
    let p10 = source.get(x0, y0 + 1);
    let p11 = source.get(x0 + 1, y0 + 1);

    let channel = |c: fn(&Rgba) -> u8| -> u8 {
        let v = blend(tx, ty, [c(&p00), c(&p01), c(&p10), c(&p11)]);
        // Truncation, no clamping: v is a convex combination of u8 values
        v as u8
    };

    Some(Rgba::opaque(
        channel(|p| p.r),
        channel(|p| p.g),
        channel(|p| p.b),
    ))
}

/// Bilinear blend of `[p00, p01, p10, p11]`.
///
/// Evaluated as two horizontal lerps and one vertical lerp, which equals the
/// weighted sum with [`bilinear_weights`] and is exact when all four inputs
/// are equal.
#[inline]
fn blend(tx: f64, ty: f64, [p00, p01, p10, p11]: [u8; 4]) -> f64 {
    let (p00, p01, p10, p11) = (p00 as f64, p01 as f64, p10 as f64, p11 as f64);
    let top = p00 + tx * (p01 - p00);
    let bottom = p10 + tx * (p11 - p10);
    top + ty * (bottom - top)
}
