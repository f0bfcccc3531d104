//! Image decoding WASM bindings.
//!
//! # Example
//!
//! ```typescript
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const [width, height] = probe_dimensions(bytes);
//! const image = decode_image(bytes); // kept for export
//! ```

use squarecrop_core::decode;
use wasm_bindgen::prelude::*;

use crate::types::JsDecodedImage;

/// Decode a JPEG or PNG image, applying EXIF orientation.
///
/// # Errors
///
/// Returns an error if the format is not recognized or the file is corrupted.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsDecodedImage, JsValue> {
    decode::decode_image(bytes)
        .map(JsDecodedImage::from_decoded)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Oriented `[width, height]` of an image, read from its header.
///
/// # Errors
///
/// Returns an error if the format is not recognized or the header is corrupted.
#[wasm_bindgen]
pub fn probe_dimensions(bytes: &[u8]) -> Result<Vec<u32>, JsValue> {
    decode::probe_dimensions(bytes)
        .map(|dims| vec![dims.width, dims.height])
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let pixels = vec![64u8; (width * height * 3) as usize];
        squarecrop_core::encode::encode_png(&pixels, width, height).unwrap()
    }

    #[test]
    fn test_decode_png() {
        let image = decode_image(&png_bytes(12, 7)).unwrap();
        assert_eq!((image.width(), image.height()), (12, 7));
        assert_eq!(image.byte_length(), 12 * 7 * 3);
    }

    #[test]
    fn test_probe_dimensions() {
        assert_eq!(probe_dimensions(&png_bytes(30, 40)).unwrap(), vec![30, 40]);
    }
}
