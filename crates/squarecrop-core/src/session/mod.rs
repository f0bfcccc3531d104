//! Batch crop session.
//!
//! A session is the caller side of the geometry engine: it owns the loaded
//! [`ImageEntry`] records, the active mode and ratio, the selected index and
//! the gesture state, and forwards every geometric change to the engine.
//!
//! # Ratio handling
//!
//! Changing the active ratio recomputes only the selected entry. Other
//! entries keep the ratio their crop was computed with until they are
//! selected and changed individually, so a ratio change never discards
//! unrelated confirmations. Selecting an entry in ratio mode makes its
//! carried ratio the active one.

mod gesture;

pub use gesture::{GestureKind, GestureState};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::entry::ImageEntry;
use crate::export::{plan_export, ExportPlan, OutputSize};
use crate::geometry::{
    recompute_for_mode_change, recompute_for_ratio_change, AspectRatio, CropMode, CropRect, Handle,
    ImageDimensions, Point,
};
use crate::settings::{EditorMode, EditorSettings};

/// Errors raised while loading a batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Parallel name/width/height columns have different lengths.
    #[error("Batch columns differ in length: {names} names, {widths} widths, {heights} heights")]
    ColumnLengthMismatch {
        names: usize,
        widths: usize,
        heights: usize,
    },
}

/// Result of toggling confirmation on the selected entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmOutcome {
    /// Index of the entry that was toggled.
    pub index: usize,
    /// Its new confirmation state.
    pub confirmed: bool,
    /// Whether the selection moved on to the next entry.
    pub advanced: bool,
}

/// A loaded batch of images and the editor state around it.
#[derive(Debug, Clone)]
pub struct CropSession {
    entries: Vec<ImageEntry>,
    mode: EditorMode,
    ratio: AspectRatio,
    current: usize,
    gesture: GestureState,
    output_size: OutputSize,
}

impl Default for CropSession {
    fn default() -> Self {
        Self::new(&EditorSettings::default())
    }
}

impl CropSession {
    /// Create an empty session using the mode and ratio from `settings`.
    pub fn new(settings: &EditorSettings) -> Self {
        Self {
            entries: Vec::new(),
            mode: settings.mode,
            ratio: settings.ratio,
            current: 0,
            gesture: GestureState::Idle,
            output_size: settings.output_size,
        }
    }

    /// Replace the batch with freshly loaded images.
    ///
    /// Every image gets its initial crop under the active mode; the selection
    /// returns to the first image and any gesture is dropped.
    pub fn load_batch<I, S>(&mut self, images: I)
    where
        I: IntoIterator<Item = (S, ImageDimensions)>,
        S: Into<String>,
    {
        let mode = self.crop_mode();
        self.entries = images
            .into_iter()
            .map(|(name, dims)| ImageEntry::new(name, dims, mode))
            .collect();
        self.current = 0;
        self.gesture = GestureState::Idle;
        self.sync_active_ratio();

        let undersized = self.undersized_count();
        if undersized > 0 {
            tracing::warn!(undersized, "images smaller than the minimum crop size");
        }
        tracing::debug!(count = self.entries.len(), mode = %self.mode, "loaded batch");
    }

    /// Replace the batch from parallel name, width and height columns.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::ColumnLengthMismatch` if the columns differ in
    /// length; the current batch is left untouched.
    pub fn load_columns(
        &mut self,
        names: Vec<String>,
        widths: &[u32],
        heights: &[u32],
    ) -> Result<(), SessionError> {
        if names.len() != widths.len() || names.len() != heights.len() {
            return Err(SessionError::ColumnLengthMismatch {
                names: names.len(),
                widths: widths.len(),
                heights: heights.len(),
            });
        }
        let images = names
            .into_iter()
            .zip(widths.iter().zip(heights))
            .map(|(name, (&w, &h))| (name, ImageDimensions::new(w, h)));
        self.load_batch(images);
        Ok(())
    }

    pub fn entries(&self) -> &[ImageEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    /// Active ratio (remembered while in square mode).
    pub fn ratio(&self) -> AspectRatio {
        self.ratio
    }

    /// Geometry mode for new crops under the active settings.
    pub fn crop_mode(&self) -> CropMode {
        self.mode.crop_mode(self.ratio)
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> Option<&ImageEntry> {
        self.entries.get(self.current)
    }

    pub fn gesture(&self) -> &GestureState {
        &self.gesture
    }

    pub fn confirmed_count(&self) -> usize {
        self.entries.iter().filter(|e| e.confirmed).count()
    }

    /// Number of images with a side below [`crate::MIN_CROP_SIZE`].
    pub fn undersized_count(&self) -> usize {
        self.entries.iter().filter(|e| e.dims.is_degenerate()).count()
    }

    /// Long-side length used by [`CropSession::export_plan`].
    pub fn output_size(&self) -> OutputSize {
        self.output_size
    }

    pub fn set_output_size(&mut self, size: OutputSize) {
        self.output_size = size;
    }

    /// Switch mode and recompute every crop.
    ///
    /// Confirmations survive a mode change; only positions and sizes are
    /// recomputed.
    pub fn set_mode(&mut self, mode: EditorMode) {
        self.mode = mode;
        self.gesture = GestureState::Idle;
        if self.entries.is_empty() {
            return;
        }

        let crop_mode = self.crop_mode();
        recompute_for_mode_change(&mut self.entries, crop_mode);
        tracing::debug!(mode = %mode, count = self.entries.len(), "recomputed crops for mode");
    }

    /// Set the active ratio.
    ///
    /// In ratio mode the selected entry is recomputed (and unconfirmed) when
    /// its carried ratio differs. Returns whether that happened.
    pub fn set_ratio(&mut self, ratio: AspectRatio) -> bool {
        self.ratio = ratio;
        if self.mode != EditorMode::Ratio {
            return false;
        }

        let Some(entry) = self.entries.get_mut(self.current) else {
            return false;
        };
        if entry.crop.ratio == ratio {
            return false;
        }

        recompute_for_ratio_change(entry, ratio);
        self.gesture = GestureState::Idle;
        tracing::debug!(index = self.current, ratio = %ratio, "recomputed crop for ratio");
        true
    }

    /// Select the entry at `index`. Out-of-range indices are ignored.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.entries.len() {
            return false;
        }
        if index != self.current {
            self.gesture = GestureState::Idle;
        }
        self.current = index;
        self.sync_active_ratio();
        true
    }

    pub fn next(&mut self) -> bool {
        self.current + 1 < self.entries.len() && self.select(self.current + 1)
    }

    pub fn prev(&mut self) -> bool {
        self.current > 0 && self.select(self.current - 1)
    }

    /// Flip confirmation on the selected entry.
    ///
    /// Confirming moves the selection to the next entry when there is one.
    pub fn toggle_confirm(&mut self) -> Option<ConfirmOutcome> {
        let index = self.current;
        let entry = self.entries.get_mut(index)?;
        entry.confirmed = !entry.confirmed;
        let confirmed = entry.confirmed;
        self.gesture = GestureState::Idle;

        let advanced = confirmed && self.next();
        tracing::debug!(index, confirmed, advanced, "toggled confirmation");

        Some(ConfirmOutcome {
            index,
            confirmed,
            advanced,
        })
    }

    /// Start dragging the crop body at screen position `origin`.
    pub fn begin_translate(&mut self, origin: Point) -> bool {
        self.begin(GestureKind::Translate, origin)
    }

    /// Start dragging a corner `handle` at screen position `origin`.
    pub fn begin_resize(&mut self, handle: Handle, origin: Point) -> bool {
        self.begin(GestureKind::Resize(handle), origin)
    }

    /// Enter `Adjusting`, snapshotting the selected crop.
    ///
    /// Refused while another gesture is active, when nothing is loaded, or
    /// when the selected crop is confirmed.
    fn begin(&mut self, kind: GestureKind, origin: Point) -> bool {
        if self.gesture.is_active() {
            return false;
        }
        let Some(entry) = self.entries.get(self.current) else {
            return false;
        };
        if entry.confirmed {
            return false;
        }

        self.gesture = GestureState::Adjusting {
            kind,
            start_rect: entry.crop,
            origin,
        };
        tracing::trace!(?kind, index = self.current, "gesture started");
        true
    }

    /// Apply a pointer move to the active gesture.
    ///
    /// `scale` is the display scale of the editor (screen px per image px).
    /// Returns the updated crop, or `None` when idle or `scale` is not a
    /// positive finite number.
    pub fn pointer_moved(&mut self, pointer: Point, scale: f64) -> Option<CropRect> {
        if !(scale.is_finite() && scale > 0.0) {
            return None;
        }
        let mode = self.gesture_mode()?;
        let entry = self.entries.get_mut(self.current)?;
        let rect = self.gesture.apply(pointer, scale, entry.dims, mode)?;
        entry.crop = rect;
        Some(rect)
    }

    /// Return to `Idle`, keeping the latest crop.
    pub fn end_gesture(&mut self) -> Option<CropRect> {
        if !self.gesture.is_active() {
            return None;
        }
        self.gesture = GestureState::Idle;
        tracing::trace!(index = self.current, "gesture finished");
        self.current().map(|e| e.crop)
    }

    /// Plan the export of every confirmed crop at the session's output size.
    pub fn export_plan(&self) -> ExportPlan {
        plan_export(&self.entries, self.mode, self.output_size)
    }

    /// Mode used for resizing the selected entry: its own carried ratio in
    /// ratio mode.
    fn gesture_mode(&self) -> Option<CropMode> {
        let entry = self.current()?;
        Some(self.mode.crop_mode(entry.crop.ratio))
    }

    fn sync_active_ratio(&mut self) {
        if self.mode != EditorMode::Ratio {
            return;
        }
        if let Some(entry) = self.entries.get(self.current) {
            self.ratio = entry.crop.ratio;
        }
    }
}
