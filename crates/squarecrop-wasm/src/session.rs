//! Batch session WASM bindings.
//!
//! Wraps the core `CropSession` so that the editor page keeps a single
//! handle to all crop state and forwards pointer events to it.
//!
//! # Example
//!
//! ```typescript
//! const session = CropSession.from_settings({ mode: 'ratio', ratio: { w: 9, h: 16 } });
//! session.load_batch(names, widths, heights);
//!
//! handle.onpointerdown = (e) => session.begin_resize('se', e.clientX, e.clientY);
//! window.onpointermove = (e) => {
//!   const rect = session.pointer_moved(e.clientX, e.clientY, scale);
//!   if (rect) drawCropBox(rect.scaled(scale));
//! };
//! window.onpointerup = () => session.end_gesture();
//! ```

use std::str::FromStr;

use serde::Serialize;
use squarecrop_core::export::OutputSize;
use squarecrop_core::{AspectRatio, EditorMode, EditorSettings, Handle, ImageEntry, Point};
use wasm_bindgen::prelude::*;

use crate::types::JsCropRect;

#[derive(Serialize)]
struct SessionSnapshot<'a> {
    mode: EditorMode,
    ratio: AspectRatio,
    ratio_is_preset: bool,
    output_size: OutputSize,
    current: usize,
    entries: &'a [ImageEntry],
}

/// Crop session wrapper for JavaScript
#[wasm_bindgen]
pub struct CropSession {
    inner: squarecrop_core::CropSession,
}

#[wasm_bindgen]
impl CropSession {
    /// Create an empty session with default settings (square mode, 9:16)
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            inner: squarecrop_core::CropSession::default(),
        }
    }

    /// Create an empty session from an `EditorSettings` object
    pub fn from_settings(value: JsValue) -> Result<CropSession, JsValue> {
        let settings: EditorSettings =
            serde_wasm_bindgen::from_value(value).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self {
            inner: squarecrop_core::CropSession::new(&settings),
        })
    }

    /// Replace the batch. The three arrays are parallel.
    pub fn load_batch(
        &mut self,
        names: Vec<String>,
        widths: Vec<u32>,
        heights: Vec<u32>,
    ) -> Result<(), JsValue> {
        self.inner
            .load_columns(names, &widths, &heights)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(getter)]
    pub fn length(&self) -> usize {
        self.inner.len()
    }

    #[wasm_bindgen(getter)]
    pub fn current_index(&self) -> usize {
        self.inner.current_index()
    }

    #[wasm_bindgen(getter)]
    pub fn mode(&self) -> String {
        self.inner.mode().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn ratio_w(&self) -> f64 {
        self.inner.ratio().w
    }

    #[wasm_bindgen(getter)]
    pub fn ratio_h(&self) -> f64 {
        self.inner.ratio().h
    }

    #[wasm_bindgen(getter)]
    pub fn confirmed_count(&self) -> usize {
        self.inner.confirmed_count()
    }

    #[wasm_bindgen(getter)]
    pub fn output_size(&self) -> u32 {
        self.inner.output_size().get()
    }

    /// Set the long-side length used for export
    pub fn set_output_size(&mut self, size: u32) -> Result<(), JsValue> {
        let size = OutputSize::new(size).map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.inner.set_output_size(size);
        Ok(())
    }

    /// Whether the image at `index` has a side below the minimum crop size
    pub fn is_undersized(&self, index: usize) -> Option<bool> {
        self.inner
            .entries()
            .get(index)
            .map(|e| e.dims.is_degenerate())
    }

    /// Switch between `"square"` and `"ratio"`, recomputing every crop
    pub fn set_mode(&mut self, mode: &str) -> Result<(), JsValue> {
        let mode = EditorMode::from_str(mode).map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.inner.set_mode(mode);
        Ok(())
    }

    /// Set the active ratio; returns whether the selected crop was recomputed
    pub fn set_ratio(&mut self, w: f64, h: f64) -> Result<bool, JsValue> {
        let ratio = AspectRatio::new(w, h).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(self.inner.set_ratio(ratio))
    }

    pub fn select(&mut self, index: usize) -> bool {
        self.inner.select(index)
    }

    pub fn next(&mut self) -> bool {
        self.inner.next()
    }

    pub fn prev(&mut self) -> bool {
        self.inner.prev()
    }

    /// Toggle confirmation on the selected image.
    ///
    /// Returns the new state, or `undefined` for an empty batch. Confirming
    /// advances the selection when a next image exists.
    pub fn toggle_confirm(&mut self) -> Option<bool> {
        self.inner.toggle_confirm().map(|outcome| outcome.confirmed)
    }

    pub fn is_confirmed(&self, index: usize) -> Option<bool> {
        self.inner.entries().get(index).map(|e| e.confirmed)
    }

    /// Crop of the image at `index`, in source pixels
    pub fn crop(&self, index: usize) -> Option<JsCropRect> {
        self.inner.entries().get(index).map(|e| e.crop.into())
    }

    /// Crop of the selected image, in source pixels
    pub fn current_crop(&self) -> Option<JsCropRect> {
        self.inner.current().map(|e| e.crop.into())
    }

    /// Start dragging the crop body at screen position `(x, y)`
    pub fn begin_translate(&mut self, x: f64, y: f64) -> bool {
        self.inner.begin_translate(Point::new(x, y))
    }

    /// Start dragging a corner handle at screen position `(x, y)`
    pub fn begin_resize(&mut self, handle: &str, x: f64, y: f64) -> Result<bool, JsValue> {
        let handle = Handle::from_str(handle).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(self.inner.begin_resize(handle, Point::new(x, y)))
    }

    /// Feed a pointer position; returns the updated crop while adjusting
    pub fn pointer_moved(&mut self, x: f64, y: f64, scale: f64) -> Option<JsCropRect> {
        self.inner.pointer_moved(Point::new(x, y), scale).map(Into::into)
    }

    pub fn end_gesture(&mut self) -> Option<JsCropRect> {
        self.inner.end_gesture().map(Into::into)
    }

    #[wasm_bindgen(getter)]
    pub fn is_adjusting(&self) -> bool {
        self.inner.gesture().is_active()
    }

    /// Export plan for all confirmed crops as a plain object.
    ///
    /// A given `size` replaces the session's output size first.
    pub fn export_plan(&mut self, size: Option<u32>) -> Result<JsValue, JsValue> {
        if let Some(size) = size {
            self.set_output_size(size)?;
        }
        let plan = self.inner.export_plan();
        serde_wasm_bindgen::to_value(&plan).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Serialize mode, ratio, selection and entries
    pub fn to_json(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.snapshot()).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl Default for CropSession {
    fn default() -> Self {
        Self::new()
    }
}

impl CropSession {
    fn snapshot(&self) -> SessionSnapshot<'_> {
        SessionSnapshot {
            mode: self.inner.mode(),
            ratio: self.inner.ratio(),
            ratio_is_preset: self.inner.ratio().is_preset(),
            output_size: self.inner.output_size(),
            current: self.inner.current_index(),
            entries: self.inner.entries(),
        }
    }
}

/// Default editor settings as a plain object
#[wasm_bindgen]
pub fn default_settings() -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&EditorSettings::default())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_from_settings_fills_defaults() {
        let value = serde_wasm_bindgen::to_value(&ModeOnly { mode: "ratio" }).unwrap();
        let session = CropSession::from_settings(value).unwrap();
        assert_eq!(session.mode(), "ratio");
        assert_eq!(session.ratio_h(), 16.0);
    }

    #[wasm_bindgen_test]
    fn test_bad_inputs_are_errors() {
        let mut session = CropSession::new();
        assert!(session.set_mode("circle").is_err());
        assert!(session.set_ratio(0.0, 1.0).is_err());
        assert!(session.begin_resize("up", 0.0, 0.0).is_err());
        assert!(session
            .load_batch(vec!["a".to_string()], vec![], vec![])
            .is_err());
        assert!(session.export_plan(Some(0)).is_err());
        assert!(session.set_output_size(0).is_err());
    }

    #[wasm_bindgen_test]
    fn test_export_plan_object() {
        let mut session = CropSession::new();
        session
            .load_batch(vec!["a.jpg".to_string()], vec![100], vec![100])
            .unwrap();
        session.toggle_confirm();

        let plan = session.export_plan(None).unwrap();
        let archive = js_sys::Reflect::get(&plan, &"archive_name".into()).unwrap();
        assert_eq!(archive.as_string().unwrap(), "square-crop.zip");

        session.export_plan(Some(512)).unwrap();
        assert_eq!(session.output_size(), 512);
    }

    #[derive(Serialize)]
    struct ModeOnly<'a> {
        mode: &'a str,
    }
}
