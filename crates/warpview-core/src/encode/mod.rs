//! Raster export.
//!
//! - PNG: lossless, keeps alpha
//! - JPEG: configurable quality, alpha dropped
//!
//! # Examples
//!
//! ```ignore
//! use warpview_core::encode::encode_png;
//!
//! let png_bytes = encode_png(session.destination()).unwrap();
//! std::fs::write("out.png", png_bytes).unwrap();
//! ```

mod jpeg;
mod png;

pub use jpeg::encode_jpeg;
pub use png::encode_png;

use thiserror::Error;

/// Errors that can occur during encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The encoder rejected the image
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
}

fn check_dimensions(width: u32, height: u32) -> Result<(), EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }
    Ok(())
}
