//! Image encoding WASM bindings.

use squarecrop_core::encode;
use wasm_bindgen::prelude::*;

use crate::types::JsDecodedImage;

/// Encode raw RGB pixels as PNG.
///
/// # Errors
///
/// Returns an error for zero dimensions or a buffer that is not
/// `width * height * 3` bytes long.
#[wasm_bindgen]
pub fn encode_png(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, JsValue> {
    encode::encode_png(pixels, width, height).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Encode a decoded or rendered image as PNG.
#[wasm_bindgen]
pub fn encode_png_from_image(image: &JsDecodedImage) -> Result<Vec<u8>, JsValue> {
    encode_png(image.raw_pixels(), image.width(), image.height())
}
