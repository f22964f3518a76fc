//! Image decoding into [`Raster`](crate::raster::Raster)s.
//!
//! Decoding sits outside the transform pipeline: a UI decodes the picked
//! file once, starts an [`EditSession`](crate::session::EditSession) on the
//! result, and never touches the bytes again.
//!
//! # Examples
//!
//! ```ignore
//! use warpview_core::decode::decode_image;
//!
//! let bytes = std::fs::read("photo.png").unwrap();
//! let raster = decode_image(&bytes).unwrap();
//! println!("Decoded {}x{} image", raster.width(), raster.height());
//! ```

mod load;

pub use load::{decode_image, DecodeError};
