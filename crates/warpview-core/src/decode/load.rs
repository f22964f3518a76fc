//! PNG and JPEG decoding with format detection.

use std::io::Cursor;

use image::ImageReader;
use thiserror::Error;

use crate::raster::Raster;

/// Error types for image decoding operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The file format is not recognized or supported.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// The image file is corrupted or incomplete.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),
}

/// Decode PNG or JPEG bytes into a raster.
///
/// The format is guessed from the content. Images with an alpha channel
/// decode to RGBA, everything else to RGB.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the format cannot be recognized.
/// Returns `DecodeError::CorruptedFile` if decoding fails.
pub fn decode_image(bytes: &[u8]) -> Result<Raster, DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }

    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let raster = Raster::from_dynamic(img);
    log::debug!(
        "decoded {}x{} {:?} image",
        raster.width(),
        raster.height(),
        raster.format()
    );
    Ok(raster)
}
