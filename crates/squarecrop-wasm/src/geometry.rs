//! Crop geometry WASM bindings.
//!
//! Stateless wrappers around the geometry engine for callers that keep crop
//! state in JavaScript. [`crate::CropSession`] covers the stateful flow.
//!
//! # Example
//!
//! ```typescript
//! const rect = compute_initial_crop(img.width, img.height, 'ratio', 9, 16);
//! const moved = translate_crop(rect, img.width, img.height, dx / scale, dy / scale);
//! ```

use std::str::FromStr;

use squarecrop_core::geometry;
use squarecrop_core::viewport;
use squarecrop_core::{parse_crop_mode, AspectRatio, CropMode, Delta, Handle, ImageDimensions};
use wasm_bindgen::prelude::*;

use crate::types::{JsCropRect, JsGuideRect};

/// Initial centered crop for an image.
///
/// # Arguments
///
/// * `width`, `height` - Oriented image size in pixels
/// * `mode` - `"square"` or `"ratio"`
/// * `ratio_w`, `ratio_h` - Target ratio (ignored in square mode, but validated)
///
/// # Errors
///
/// Returns an error for an unknown mode or a non-positive ratio.
#[wasm_bindgen]
pub fn compute_initial_crop(
    width: u32,
    height: u32,
    mode: &str,
    ratio_w: f64,
    ratio_h: f64,
) -> Result<JsCropRect, JsValue> {
    let mode =
        parse_crop_mode(mode, ratio_w, ratio_h).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let rect = geometry::compute_initial_crop(ImageDimensions::new(width, height), mode);
    Ok(rect.into())
}

/// Move `rect` by a cumulative image-space delta, clamped to the image.
#[wasm_bindgen]
pub fn translate_crop(rect: &JsCropRect, width: u32, height: u32, dx: f64, dy: f64) -> JsCropRect {
    geometry::translate(
        rect.inner(),
        ImageDimensions::new(width, height),
        Delta::new(dx, dy),
    )
    .into()
}

/// Resize `rect` by dragging `handle` (`"ne"`, `"nw"`, `"se"`, `"sw"`).
///
/// The delta is cumulative from gesture start and already in image pixels.
/// The ratio carried by `rect` is kept.
///
/// # Errors
///
/// Returns an error for an unknown handle name.
#[wasm_bindgen]
pub fn resize_crop(
    rect: &JsCropRect,
    width: u32,
    height: u32,
    dx: f64,
    dy: f64,
    handle: &str,
) -> Result<JsCropRect, JsValue> {
    let handle = Handle::from_str(handle).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let start = rect.inner();
    let resized = geometry::resize(
        start,
        ImageDimensions::new(width, height),
        Delta::new(dx, dy),
        handle,
        CropMode::Ratio(start.ratio),
    );
    Ok(resized.into())
}

/// Scale at which to display an image inside the editor.
///
/// Pass `0` for `container_width` when unknown (falls back to 800 px).
#[wasm_bindgen]
pub fn display_scale(width: u32, height: u32, container_width: f64, max_height: f64) -> f64 {
    viewport::display_scale(
        ImageDimensions::new(width, height),
        container_width,
        max_height,
    )
}

/// 3:4 guide inside a crop box of the given on-screen size.
#[wasm_bindgen]
pub fn thumbnail_guide(width: f64, height: f64) -> JsGuideRect {
    viewport::thumbnail_guide(width, height).into()
}

/// Preset ratios as `"w:h"` strings, in menu order.
#[wasm_bindgen]
pub fn ratio_presets() -> js_sys::Array {
    AspectRatio::PRESETS
        .iter()
        .map(|ratio| JsValue::from_str(&ratio.to_string()))
        .collect()
}

/// Whether `w:h` is one of the preset ratios.
///
/// Decides whether the ratio selector shows a preset or the custom fields.
/// Invalid ratios are never presets.
#[wasm_bindgen]
pub fn is_preset_ratio(w: f64, h: f64) -> bool {
    AspectRatio::new(w, h).is_ok_and(|ratio| ratio.is_preset())
}

/// Parse the two custom ratio inputs into `[w, h]`.
///
/// Empty or zero fields fall back to the 9:16 default.
///
/// # Errors
///
/// Returns an error for negative values.
#[wasm_bindgen]
pub fn custom_ratio(w: &str, h: &str) -> Result<Vec<f64>, JsValue> {
    let ratio = AspectRatio::from_inputs(w, h).map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(vec![ratio.w, ratio.h])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_preset_ratio() {
        assert!(is_preset_ratio(9.0, 16.0));
        assert!(is_preset_ratio(1.0, 1.0));
        assert!(!is_preset_ratio(21.0, 9.0));
        assert!(!is_preset_ratio(0.0, 16.0));
    }

    #[test]
    fn test_compute_initial_crop_square() {
        let rect = compute_initial_crop(2000, 1000, "square", 9.0, 16.0).unwrap();
        assert_eq!((rect.x(), rect.y()), (500.0, 0.0));
        assert_eq!((rect.width(), rect.height()), (1000.0, 1000.0));
    }

    #[test]
    fn test_translate_crop_clamps() {
        let rect = compute_initial_crop(2000, 1000, "square", 1.0, 1.0).unwrap();
        let moved = translate_crop(&rect, 2000, 1000, 5000.0, -50.0);
        assert_eq!((moved.x(), moved.y()), (1000.0, 0.0));
    }

    #[test]
    fn test_resize_crop_keeps_ratio() {
        let rect = compute_initial_crop(2000, 1000, "ratio", 9.0, 16.0).unwrap();
        let resized = resize_crop(&rect, 2000, 1000, -100.0, -100.0, "se").unwrap();
        assert!(resized.width() < rect.width());
        assert!((resized.width() / resized.height() - 9.0 / 16.0).abs() < 1e-6);
        assert_eq!((resized.x(), resized.y()), (rect.x(), rect.y()));
    }

    #[test]
    fn test_display_scale_and_guide() {
        assert_eq!(display_scale(400, 300, 800.0, 500.0), 1.0);
        let guide = thumbnail_guide(90.0, 160.0);
        assert!((guide.height() - 120.0).abs() < 1e-9);
    }

    #[test]
    fn test_custom_ratio_fallback() {
        assert_eq!(custom_ratio("", "").unwrap(), vec![9.0, 16.0]);
        assert_eq!(custom_ratio("4", "5").unwrap(), vec![4.0, 5.0]);
    }
}
