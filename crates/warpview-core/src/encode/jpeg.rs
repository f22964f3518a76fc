use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder};

use super::{check_dimensions, EncodeError};
use crate::raster::{PixelFormat, Raster};

/// Encode a raster to JPEG bytes.
///
/// `quality` is clamped to 1..=100. Alpha, if present, is dropped.
///
/// # Errors
///
/// Returns `EncodeError::InvalidDimensions` for an empty raster and
/// `EncodeError::EncodingFailed` if the JPEG encoder fails.
pub fn encode_jpeg(raster: &Raster, quality: u8) -> Result<Vec<u8>, EncodeError> {
    let (width, height) = raster.dimensions();
    check_dimensions(width, height)?;

    let quality = quality.clamp(1, 100);

    let rgb: Vec<u8> = match raster.format() {
        PixelFormat::Rgb8 => raster.pixels().to_vec(),
        PixelFormat::Rgba8 => raster
            .pixels()
            .chunks_exact(4)
            .flat_map(|p| [p[0], p[1], p[2]])
            .collect(),
    };

    let mut buffer = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut buffer, quality)
        .write_image(&rgb, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::Rgba;

    #[test]
    fn test_encode_jpeg_markers() {
        let raster = Raster::filled(100, 100, PixelFormat::Rgb8, Rgba::gray(128));
        let jpeg = encode_jpeg(&raster, 90).unwrap();

        // SOI and EOI markers
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
        assert_eq!(&jpeg[jpeg.len() - 2..], &[0xFF, 0xD9]);
    }

    #[test]
    fn test_encode_jpeg_drops_alpha() {
        let raster = Raster::filled(8, 8, PixelFormat::Rgba8, Rgba::new(10, 20, 30, 0));
        assert!(encode_jpeg(&raster, 80).is_ok());
    }

    #[test]
    fn test_encode_jpeg_quality_clamping() {
        let raster = Raster::filled(10, 10, PixelFormat::Rgb8, Rgba::gray(128));

        // Quality 0 should be clamped to 1
        assert!(encode_jpeg(&raster, 0).is_ok());
        // Quality 255 should be clamped to 100
        assert!(encode_jpeg(&raster, 255).is_ok());
    }

    #[test]
    fn test_encode_jpeg_empty() {
        let raster = Raster::new(10, 0, PixelFormat::Rgb8);
        assert!(matches!(
            encode_jpeg(&raster, 90),
            Err(EncodeError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_encode_error_display() {
        let err = EncodeError::InvalidDimensions {
            width: 0,
            height: 7,
        };
        assert_eq!(
            err.to_string(),
            "Invalid dimensions: width (0) and height (7) must be non-zero"
        );
    }
}
