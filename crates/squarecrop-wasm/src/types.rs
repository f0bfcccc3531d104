//! WASM-compatible wrapper types.
//!
//! These wrap core types so that JavaScript can hold them as opaque objects
//! and read their fields through getters.

use squarecrop_core::decode::{DecodedImage, FilterType};
use squarecrop_core::viewport::GuideRect;
use squarecrop_core::{AspectRatio, CropRect};
use wasm_bindgen::prelude::*;

/// A decoded image wrapper for JavaScript.
///
/// The pixel data lives in WASM memory; `pixels()` copies it out as a
/// `Uint8Array`.
#[wasm_bindgen]
pub struct JsDecodedImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsDecodedImage {
    /// Create a new JsDecodedImage from dimensions and RGB pixel data.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsDecodedImage {
        JsDecodedImage {
            width,
            height,
            pixels,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of bytes in the pixel buffer (width * height * 3)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns RGB pixel data as Uint8Array (a copy).
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Explicitly free WASM memory.
    ///
    /// Optional; wasm-bindgen's finalizer releases it otherwise.
    pub fn free(self) {}
}

impl JsDecodedImage {
    pub(crate) fn from_decoded(img: DecodedImage) -> Self {
        Self {
            width: img.width,
            height: img.height,
            pixels: img.pixels,
        }
    }

    /// Borrow the pixels as a core image. Clones the pixel data.
    pub(crate) fn to_decoded(&self) -> DecodedImage {
        DecodedImage {
            width: self.width,
            height: self.height,
            pixels: self.pixels.clone(),
        }
    }

    pub(crate) fn raw_pixels(&self) -> &[u8] {
        &self.pixels
    }
}

/// A crop rectangle in source-image pixels, with the ratio it was built for.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JsCropRect {
    inner: CropRect,
}

#[wasm_bindgen]
impl JsCropRect {
    /// Create a rectangle carrying the ratio `ratio_w:ratio_h`.
    #[wasm_bindgen(constructor)]
    pub fn new(
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        ratio_w: f64,
        ratio_h: f64,
    ) -> Result<JsCropRect, JsValue> {
        let ratio =
            AspectRatio::new(ratio_w, ratio_h).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self {
            inner: CropRect::new(x, y, width, height, ratio),
        })
    }

    #[wasm_bindgen(getter)]
    pub fn x(&self) -> f64 {
        self.inner.x
    }

    #[wasm_bindgen(getter)]
    pub fn y(&self) -> f64 {
        self.inner.y
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> f64 {
        self.inner.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> f64 {
        self.inner.height
    }

    #[wasm_bindgen(getter)]
    pub fn ratio_w(&self) -> f64 {
        self.inner.ratio.w
    }

    #[wasm_bindgen(getter)]
    pub fn ratio_h(&self) -> f64 {
        self.inner.ratio.h
    }

    /// The rectangle in screen pixels for a display `scale`.
    pub fn scaled(&self, scale: f64) -> JsCropRect {
        Self::from(self.inner.scaled(scale))
    }

    /// Serialize to a plain object
    pub fn to_json(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Deserialize from a plain object
    pub fn from_json(value: JsValue) -> Result<JsCropRect, JsValue> {
        let inner: CropRect =
            serde_wasm_bindgen::from_value(value).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self { inner })
    }
}

impl JsCropRect {
    pub(crate) fn inner(&self) -> &CropRect {
        &self.inner
    }
}

impl From<CropRect> for JsCropRect {
    fn from(inner: CropRect) -> Self {
        Self { inner }
    }
}

/// The 3:4 thumbnail guide, relative to the crop box's top-left corner.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy)]
pub struct JsGuideRect {
    inner: GuideRect,
}

#[wasm_bindgen]
impl JsGuideRect {
    #[wasm_bindgen(getter)]
    pub fn left(&self) -> f64 {
        self.inner.left
    }

    #[wasm_bindgen(getter)]
    pub fn top(&self) -> f64 {
        self.inner.top
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> f64 {
        self.inner.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> f64 {
        self.inner.height
    }
}

impl From<GuideRect> for JsGuideRect {
    fn from(inner: GuideRect) -> Self {
        Self { inner }
    }
}

/// Convert a u8 filter value to the core FilterType enum.
///
/// Values:
/// - 0 = Nearest
/// - 1 = Bilinear
/// - 2 = Lanczos3
///
/// Any other value defaults to Lanczos3, the export default.
pub(crate) fn filter_from_u8(value: u8) -> FilterType {
    match value {
        0 => FilterType::Nearest,
        1 => FilterType::Bilinear,
        _ => FilterType::Lanczos3,
    }
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_crop_rect_rejects_bad_ratio() {
        assert!(JsCropRect::new(0.0, 0.0, 10.0, 10.0, 0.0, 1.0).is_err());
    }

    #[wasm_bindgen_test]
    fn test_crop_rect_json_round_trip() {
        let rect = JsCropRect::new(1.0, 2.0, 30.0, 40.0, 3.0, 4.0).unwrap();
        let json = rect.to_json().unwrap();
        let back = JsCropRect::from_json(json).unwrap();
        assert_eq!(back, rect);
    }
}
