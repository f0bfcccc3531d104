//! Export WASM bindings.
//!
//! The page decides which files go into the archive with
//! `CropSession.export_plan`, renders each crop here, and zips the results
//! itself.
//!
//! # Example
//!
//! ```typescript
//! const size = output_size(sizePreset.value, customSize.value);
//! const plan = session.export_plan(size);
//! for (const item of plan.items) {
//!   const png = export_crop(images[item.entry_index], session.crop(item.entry_index),
//!                           item.width, item.height, 2);
//!   zip.file(item.crop_name, png);
//!   if (item.original_name) zip.file(item.original_name, files[item.entry_index]);
//! }
//! ```

use squarecrop_core::export::{self, OutputSize};
use squarecrop_core::parse_crop_mode;
use wasm_bindgen::prelude::*;

use crate::types::{filter_from_u8, JsCropRect, JsDecodedImage};

/// Resolve the size selector (`"1080"`, `"custom"`, ...) and the custom field.
///
/// # Errors
///
/// Returns an error if a non-custom preset is not a positive integer.
#[wasm_bindgen]
pub fn output_size(preset: &str, custom: &str) -> Result<u32, JsValue> {
    OutputSize::from_inputs(preset, custom)
        .map(OutputSize::get)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Output `[width, height]` for a crop exported at `size`.
#[wasm_bindgen]
pub fn output_dimensions(
    mode: &str,
    ratio_w: f64,
    ratio_h: f64,
    size: u32,
) -> Result<Vec<u32>, JsValue> {
    let mode =
        parse_crop_mode(mode, ratio_w, ratio_h).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let size = OutputSize::new(size).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let (width, height) = export::output_dimensions(mode, size);
    Ok(vec![width, height])
}

/// Sample `rect` from `image` and scale it to `width × height`.
///
/// `filter`: 0 = Nearest, 1 = Bilinear, 2 = Lanczos3.
#[wasm_bindgen]
pub fn render_crop(
    image: &JsDecodedImage,
    rect: &JsCropRect,
    width: u32,
    height: u32,
    filter: u8,
) -> Result<JsDecodedImage, JsValue> {
    export::render_crop(
        &image.to_decoded(),
        rect.inner(),
        width,
        height,
        filter_from_u8(filter),
    )
    .map(JsDecodedImage::from_decoded)
    .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Render a crop and encode it as PNG in one call.
#[wasm_bindgen]
pub fn export_crop(
    image: &JsDecodedImage,
    rect: &JsCropRect,
    width: u32,
    height: u32,
    filter: u8,
) -> Result<Vec<u8>, JsValue> {
    let rendered = render_crop(image, rect, width, height, filter)?;
    crate::encode::encode_png_from_image(&rendered)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_size() {
        assert_eq!(output_size("2048", "").unwrap(), 2048);
        assert_eq!(output_size("custom", "").unwrap(), 1080);
    }

    #[test]
    fn test_output_dimensions() {
        assert_eq!(output_dimensions("square", 9.0, 16.0, 500).unwrap(), vec![500, 500]);
        assert_eq!(output_dimensions("ratio", 9.0, 16.0, 1080).unwrap(), vec![608, 1080]);
    }

    #[test]
    fn test_render_and_export_crop() {
        let image = JsDecodedImage::new(40, 20, vec![10u8; 40 * 20 * 3]);
        let rect = JsCropRect::new(10.0, 0.0, 20.0, 20.0, 1.0, 1.0).unwrap();

        let rendered = render_crop(&image, &rect, 8, 8, 1).unwrap();
        assert_eq!((rendered.width(), rendered.height()), (8, 8));

        let png = export_crop(&image, &rect, 8, 8, 2).unwrap();
        assert_eq!(&png[1..4], b"PNG");
    }
}
