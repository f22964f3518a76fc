//! Raster images with bounds-checked pixel access.
//!
//! A [`Raster`] is a row-major grid of 8-bit pixels in either RGB or RGBA
//! layout. The resampler only ever talks to rasters through [`Raster::get`]
//! and [`Raster::set`], so nothing outside this module depends on the byte
//! layout of the buffer.

use image::DynamicImage;
use thiserror::Error;

/// Errors raised when building a raster from existing pixel data.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RasterError {
    /// Pixel data length doesn't match the dimensions and format.
    #[error("Invalid pixel data: expected {expected} bytes, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    /// The pixel buffer for these dimensions would not fit in memory.
    #[error("Raster too large: {width}x{height}")]
    TooLarge { width: u32, height: u32 },
}

/// Memory layout of a single pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PixelFormat {
    /// 3 bytes per pixel, no alpha.
    #[default]
    Rgb8,
    /// 4 bytes per pixel, straight alpha.
    Rgba8,
}

impl PixelFormat {
    /// Number of bytes per pixel.
    #[inline]
    pub fn channels(self) -> usize {
        match self {
            PixelFormat::Rgb8 => 3,
            PixelFormat::Rgba8 => 4,
        }
    }

    /// Returns true if the format carries an alpha channel.
    #[inline]
    pub fn has_alpha(self) -> bool {
        matches!(self, PixelFormat::Rgba8)
    }

    /// Bytes needed for a `width` x `height` buffer, or `None` if that
    /// overflows or exceeds the largest possible allocation.
    pub fn buffer_len(self, width: u32, height: u32) -> Option<usize> {
        (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(self.channels())
            .filter(|&len| len <= isize::MAX as usize)
    }
}

/// A single pixel value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Fully zero pixel: black and, where the format has alpha, transparent.
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from RGB components.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Opaque gray with the same value in every color channel.
    pub const fn gray(v: u8) -> Self {
        Self::opaque(v, v, v)
    }
}

/// A raster image: `width × height` pixels in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    format: PixelFormat,
    pixels: Vec<u8>,
}

impl Raster {
    /// Create a zero-filled raster.
    ///
    /// # Panics
    ///
    /// Panics if the buffer size overflows, like `Vec::with_capacity`.
    /// Use [`Raster::try_new`] for sizes that come from untrusted input.
    pub fn new(width: u32, height: u32, format: PixelFormat) -> Self {
        match Self::try_new(width, height, format) {
            Ok(raster) => raster,
            Err(e) => panic!("{}", e),
        }
    }

    /// Create a zero-filled raster, or fail if the buffer would not fit.
    ///
    /// # Errors
    ///
    /// Returns `RasterError::TooLarge` if the buffer size overflows.
    pub fn try_new(width: u32, height: u32, format: PixelFormat) -> Result<Self, RasterError> {
        let len = format
            .buffer_len(width, height)
            .ok_or(RasterError::TooLarge { width, height })?;
        Ok(Self {
            width,
            height,
            format,
            pixels: vec![0u8; len],
        })
    }

    /// Create a raster where every pixel has the same value.
    pub fn filled(width: u32, height: u32, format: PixelFormat, pixel: Rgba) -> Self {
        Self::from_fn(width, height, format, |_, _| pixel)
    }

    /// Create a raster by evaluating `f(x, y)` for every pixel.
    pub fn from_fn<F>(width: u32, height: u32, format: PixelFormat, mut f: F) -> Self
    where
        F: FnMut(u32, u32) -> Rgba,
    {
        let mut raster = Self::new(width, height, format);
        for y in 0..height {
            for x in 0..width {
                raster.set(x, y, f(x, y));
            }
        }
        raster
    }

    /// Wrap an existing pixel buffer.
    ///
    /// # Errors
    ///
    /// Returns `RasterError::BufferSizeMismatch` if `pixels` is not exactly
    /// `width * height * format.channels()` bytes long, and
    /// `RasterError::TooLarge` if that size overflows.
    pub fn from_raw(
        width: u32,
        height: u32,
        format: PixelFormat,
        pixels: Vec<u8>,
    ) -> Result<Self, RasterError> {
        let expected = format
            .buffer_len(width, height)
            .ok_or(RasterError::TooLarge { width, height })?;
        if pixels.len() != expected {
            return Err(RasterError::BufferSizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            format,
            pixels,
        })
    }

    /// Convert a decoded image, keeping alpha only if the image has it.
    pub fn from_dynamic(img: DynamicImage) -> Self {
        if img.color().has_alpha() {
            let rgba = img.into_rgba8();
            let (width, height) = rgba.dimensions();
            Self {
                width,
                height,
                format: PixelFormat::Rgba8,
                pixels: rgba.into_raw(),
            }
        } else {
            let rgb = img.into_rgb8();
            let (width, height) = rgb.dimensions();
            Self {
                width,
                height,
                format: PixelFormat::Rgb8,
                pixels: rgb.into_raw(),
            }
        }
    }

    /// Convert to an `image::DynamicImage` for encoding.
    pub fn to_dynamic(&self) -> Option<DynamicImage> {
        match self.format {
            PixelFormat::Rgb8 => {
                image::RgbImage::from_raw(self.width, self.height, self.pixels.clone())
                    .map(DynamicImage::ImageRgb8)
            }
            PixelFormat::Rgba8 => {
                image::RgbaImage::from_raw(self.width, self.height, self.pixels.clone())
                    .map(DynamicImage::ImageRgba8)
            }
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[inline]
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Raw pixel bytes in row-major order.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Consume the raster and return its pixel buffer.
    pub fn into_raw(self) -> Vec<u8> {
        self.pixels
    }

    /// Size of the pixel buffer in bytes.
    pub fn byte_size(&self) -> usize {
        self.pixels.len()
    }

    /// Check if the raster has no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Read the pixel at `(x, y)`.
    ///
    /// RGB rasters report an alpha of 255.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the raster.
    pub fn get(&self, x: u32, y: u32) -> Rgba {
        match self.get_checked(x, y) {
            Some(pixel) => pixel,
            None => panic!(
                "pixel ({}, {}) out of bounds for {}x{} raster",
                x, y, self.width, self.height
            ),
        }
    }

    /// Read the pixel at `(x, y)`, or `None` if it is outside the raster.
    pub fn get_checked(&self, x: u32, y: u32) -> Option<Rgba> {
        let idx = self.index_of(x, y)?;
        let p = &self.pixels[idx..idx + self.format.channels()];
        Some(match self.format {
            PixelFormat::Rgb8 => Rgba::opaque(p[0], p[1], p[2]),
            PixelFormat::Rgba8 => Rgba::new(p[0], p[1], p[2], p[3]),
        })
    }

    /// Write the pixel at `(x, y)`. RGB rasters drop the alpha component.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the raster.
    pub fn set(&mut self, x: u32, y: u32, pixel: Rgba) {
        let Some(idx) = self.index_of(x, y) else {
            panic!(
                "pixel ({}, {}) out of bounds for {}x{} raster",
                x, y, self.width, self.height
            );
        };
        self.pixels[idx] = pixel.r;
        self.pixels[idx + 1] = pixel.g;
        self.pixels[idx + 2] = pixel.b;
        if self.format.has_alpha() {
            self.pixels[idx + 3] = pixel.a;
        }
    }

    /// Change the raster size, discarding its content.
    ///
    /// The format is kept and every pixel of the new buffer is zero.
    ///
    /// # Errors
    ///
    /// Returns `RasterError::TooLarge` if the new buffer size overflows.
    /// The raster is unchanged in that case.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), RasterError> {
        *self = Self::try_new(width, height, self.format)?;
        Ok(())
    }

    /// Copy of the pixels in RGBA layout, as expected by canvas `ImageData`.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        match self.format {
            PixelFormat::Rgba8 => self.pixels.clone(),
            PixelFormat::Rgb8 => self
                .pixels
                .chunks_exact(3)
                .flat_map(|p| [p[0], p[1], p[2], 255])
                .collect(),
        }
    }

    #[inline]
    fn index_of(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        // Below the buffer length, which was checked when it was allocated
        Some((y as usize * self.width as usize + x as usize) * self.format.channels())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_zeroed() {
        let raster = Raster::new(4, 3, PixelFormat::Rgba8);
        assert_eq!(raster.dimensions(), (4, 3));
        assert_eq!(raster.byte_size(), 4 * 3 * 4);
        assert!(raster.pixels().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_from_raw_size_mismatch() {
        let err = Raster::from_raw(10, 10, PixelFormat::Rgb8, vec![0u8; 299]).unwrap_err();
        assert_eq!(
            err,
            RasterError::BufferSizeMismatch {
                expected: 300,
                actual: 299
            }
        );
        assert_eq!(
            err.to_string(),
            "Invalid pixel data: expected 300 bytes, got 299"
        );
    }

    #[test]
    fn test_get_set_rgb() {
        let mut raster = Raster::new(2, 2, PixelFormat::Rgb8);
        raster.set(1, 0, Rgba::new(10, 20, 30, 7));

        // Alpha is not stored for RGB
        assert_eq!(raster.get(1, 0), Rgba::opaque(10, 20, 30));
        assert_eq!(&raster.pixels()[3..6], &[10, 20, 30]);
    }

    #[test]
    fn test_get_set_rgba() {
        let mut raster = Raster::new(2, 2, PixelFormat::Rgba8);
        raster.set(0, 1, Rgba::new(1, 2, 3, 4));
        assert_eq!(raster.get(0, 1), Rgba::new(1, 2, 3, 4));
        assert_eq!(&raster.pixels()[8..12], &[1, 2, 3, 4]);
    }

    #[test]
    fn test_get_checked_out_of_bounds() {
        let raster = Raster::new(3, 2, PixelFormat::Rgb8);
        assert!(raster.get_checked(2, 1).is_some());
        assert!(raster.get_checked(3, 0).is_none());
        assert!(raster.get_checked(0, 2).is_none());
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_set_out_of_bounds_panics() {
        let mut raster = Raster::new(3, 2, PixelFormat::Rgb8);
        raster.set(3, 0, Rgba::gray(1));
    }

    #[test]
    fn test_from_fn_row_major() {
        let raster = Raster::from_fn(3, 2, PixelFormat::Rgb8, |x, y| Rgba::gray((x + 10 * y) as u8));
        assert_eq!(raster.get(2, 1), Rgba::gray(12));
        assert_eq!(raster.pixels()[(3 + 2) * 3], 12);
    }

    #[test]
    fn test_resize_discards_content() {
        let mut raster = Raster::filled(4, 4, PixelFormat::Rgba8, Rgba::gray(200));
        raster.resize(2, 3).unwrap();
        assert_eq!(raster.dimensions(), (2, 3));
        assert_eq!(raster.format(), PixelFormat::Rgba8);
        assert_eq!(raster.byte_size(), 2 * 3 * 4);
        assert!(raster.pixels().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_resize_to_zero() {
        let mut raster = Raster::new(4, 4, PixelFormat::Rgb8);
        raster.resize(0, 4).unwrap();
        assert!(raster.is_empty());
        assert_eq!(raster.byte_size(), 0);
    }

    #[test]
    fn test_buffer_len_overflow() {
        assert_eq!(PixelFormat::Rgba8.buffer_len(4, 3), Some(48));
        assert_eq!(PixelFormat::Rgb8.buffer_len(0, u32::MAX), Some(0));
        assert_eq!(PixelFormat::Rgba8.buffer_len(u32::MAX, u32::MAX), None);
    }

    #[test]
    fn test_try_new_too_large() {
        let err = Raster::try_new(u32::MAX, u32::MAX, PixelFormat::Rgb8).unwrap_err();
        assert_eq!(
            err,
            RasterError::TooLarge {
                width: u32::MAX,
                height: u32::MAX
            }
        );
        assert_eq!(
            err.to_string(),
            "Raster too large: 4294967295x4294967295"
        );
    }

    #[test]
    fn test_from_raw_too_large() {
        let err = Raster::from_raw(u32::MAX, u32::MAX, PixelFormat::Rgba8, Vec::new()).unwrap_err();
        assert!(matches!(err, RasterError::TooLarge { .. }));
    }

    #[test]
    fn test_resize_too_large_keeps_raster() {
        let mut raster = Raster::filled(2, 2, PixelFormat::Rgb8, Rgba::gray(5));
        let before = raster.clone();
        assert!(raster.resize(u32::MAX, u32::MAX).is_err());
        assert_eq!(raster, before);
    }

    #[test]
    fn test_to_rgba_bytes_from_rgb() {
        let raster = Raster::from_raw(2, 1, PixelFormat::Rgb8, vec![1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(raster.to_rgba_bytes(), vec![1, 2, 3, 255, 4, 5, 6, 255]);
    }

    #[test]
    fn test_dynamic_round_trip_keeps_alpha_presence() {
        let rgba = Raster::filled(3, 3, PixelFormat::Rgba8, Rgba::new(9, 8, 7, 6));
        let back = Raster::from_dynamic(rgba.to_dynamic().unwrap());
        assert_eq!(back, rgba);

        let rgb = Raster::filled(3, 3, PixelFormat::Rgb8, Rgba::gray(50));
        let back = Raster::from_dynamic(rgb.to_dynamic().unwrap());
        assert_eq!(back.format(), PixelFormat::Rgb8);
        assert_eq!(back, rgb);
    }

    #[test]
    fn test_pixel_format_channels() {
        assert_eq!(PixelFormat::Rgb8.channels(), 3);
        assert_eq!(PixelFormat::Rgba8.channels(), 4);
        assert!(!PixelFormat::Rgb8.has_alpha());
        assert!(PixelFormat::Rgba8.has_alpha());
    }
}
