//! SquareCrop WASM - WebAssembly bindings for the crop editor
//!
//! This crate exposes squarecrop-core to the editor page. DOM work, file
//! reading and ZIP packaging stay in JavaScript.
//!
//! # Module Structure
//!
//! - `session` - `CropSession` class: batch, selection, confirmation, gestures
//! - `geometry` - Stateless crop operations and display helpers
//! - `types` - WASM-compatible wrapper types
//! - `decode` - Image decoding and dimension probing
//! - `encode` / `export` - Crop rendering and PNG output
//!
//! # Usage
//!
//! ```typescript
//! import init, { CropSession, probe_dimensions } from '@squarecrop/wasm';
//!
//! await init();
//!
//! const session = new CropSession();
//! const dims = await Promise.all(files.map(async (f) =>
//!   probe_dimensions(new Uint8Array(await f.arrayBuffer()))));
//! session.load_batch(files.map((f) => f.name), dims.map((d) => d[0]), dims.map((d) => d[1]));
//! ```

use wasm_bindgen::prelude::*;

mod decode;
mod encode;
mod export;
mod geometry;
mod session;
mod types;

pub use decode::{decode_image, probe_dimensions};
pub use encode::{encode_png, encode_png_from_image};
pub use export::{export_crop, output_dimensions, output_size, render_crop};
pub use geometry::{
    compute_initial_crop, custom_ratio, display_scale, is_preset_ratio, ratio_presets,
    resize_crop, thumbnail_guide, translate_crop,
};
pub use session::{default_settings, CropSession};
pub use types::{JsCropRect, JsDecodedImage, JsGuideRect};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::log_1(&JsValue::from_str(&format!(
        "squarecrop-wasm {} ready",
        version()
    )));
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(version(), env!("CARGO_PKG_VERSION"));
    }
}
