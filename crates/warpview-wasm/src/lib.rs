//! Warpview WASM - WebAssembly bindings for Warpview
//!
//! This crate exposes warpview-core to JavaScript/TypeScript so a browser UI
//! can drive transforms from sliders and draw the result on a canvas.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper for rasters
//! - `transform` - Transform accumulator and resampling bindings
//! - `session` - Slider-driven editing session
//! - `decode` / `encode` - Image decoding and export
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_image, JsEditSession } from '@warpview/wasm';
//!
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const session = new JsEditSession(decode_image(bytes));
//!
//! rotationSlider.oninput = (e) => {
//!   session.set_rotation(Number(e.target.value));
//!   const dst = session.destination();
//!   ctx.putImageData(new ImageData(dst.image_data(), dst.width, dst.height), 0, 0);
//! };
//! ```

use wasm_bindgen::prelude::*;

mod decode;
mod encode;
mod session;
mod transform;
mod types;

// Re-export public types
pub use decode::decode_image;
pub use encode::{encode_jpeg, encode_png};
pub use session::JsEditSession;
pub use transform::{resample, JsTransformAccumulator};
pub use types::JsRaster;

#[cfg(debug_assertions)]
const LOG_LEVEL: log::Level = log::Level::Debug;
#[cfg(not(debug_assertions))]
const LOG_LEVEL: log::Level = log::Level::Info;

/// Initialize the WASM module (called automatically on load).
///
/// Routes `log` records from warpview-core to the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    // A logger installed by the host page takes precedence
    if console_log::init_with_level(LOG_LEVEL).is_ok() {
        log::info!("warpview-wasm {} ready", version());
    }
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
