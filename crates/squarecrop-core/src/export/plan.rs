//! Export planning: output sizes and archive entry names.

use serde::{Deserialize, Serialize};

use super::ExportError;
use crate::entry::ImageEntry;
use crate::geometry::{CropMode, PixelRect};
use crate::settings::{EditorMode, DEFAULT_OUTPUT_SIZE};

/// Extension used for originals whose name has none.
const FALLBACK_EXTENSION: &str = "png";

/// Long-side pixel length of exported crops. Never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct OutputSize(u32);

impl OutputSize {
    pub fn new(size: u32) -> Result<Self, ExportError> {
        if size == 0 {
            return Err(ExportError::InvalidOutputSize(size.to_string()));
        }
        Ok(Self(size))
    }

    /// Resolve the size selector and its custom field.
    ///
    /// A `preset` of `"custom"` reads `custom`, falling back to
    /// [`DEFAULT_OUTPUT_SIZE`] when it is empty, zero or not a number. Any
    /// other preset must itself be a positive integer.
    pub fn from_inputs(preset: &str, custom: &str) -> Result<Self, ExportError> {
        let preset = preset.trim();
        if preset.eq_ignore_ascii_case("custom") {
            let size = custom
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|&size| size > 0)
                .unwrap_or(DEFAULT_OUTPUT_SIZE);
            return Self::new(size);
        }

        preset
            .parse::<u32>()
            .map_err(|_| ExportError::InvalidOutputSize(preset.to_string()))
            .and_then(Self::new)
    }

    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for OutputSize {
    fn default() -> Self {
        Self(DEFAULT_OUTPUT_SIZE)
    }
}

impl TryFrom<u32> for OutputSize {
    type Error = ExportError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<OutputSize> for u32 {
    fn from(size: OutputSize) -> Self {
        size.0
    }
}

/// Pixel size of an exported crop.
///
/// Square mode exports `size × size`. Ratio mode puts `size` on the long side
/// (width when `w >= h`) and scales the other side by the ratio, rounded and
/// never below 1.
pub fn output_dimensions(mode: CropMode, size: OutputSize) -> (u32, u32) {
    let size = size.get();
    match mode {
        CropMode::Square => (size, size),
        CropMode::Ratio(ratio) => {
            let short = |scale: f64| ((size as f64 * scale).round() as u32).max(1);
            if ratio.is_landscape() {
                (size, short(ratio.h / ratio.w))
            } else {
                (short(ratio.w / ratio.h), size)
            }
        }
    }
}

/// One confirmed entry's share of the archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportItem {
    /// Index of the entry in the batch.
    pub entry_index: usize,
    /// Archive name for the rendered crop.
    pub crop_name: String,
    /// Archive name for the untouched original (square mode only).
    pub original_name: Option<String>,
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Source pixels to sample.
    pub source: PixelRect,
}

/// Everything needed to assemble the export archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportPlan {
    pub archive_name: String,
    pub items: Vec<ExportItem>,
}

impl ExportPlan {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of files the archive will hold.
    pub fn file_count(&self) -> usize {
        self.items
            .iter()
            .map(|item| 1 + usize::from(item.original_name.is_some()))
            .sum()
    }
}

/// Archive file name for an editor mode.
pub fn archive_name(mode: EditorMode) -> &'static str {
    match mode {
        EditorMode::Square => "square-crop.zip",
        EditorMode::Ratio => "x-crop.zip",
    }
}

/// Plan the export of every confirmed entry.
///
/// Unconfirmed entries are skipped and do not consume a number. In ratio mode
/// each entry is sized by the ratio its crop carries, not the active one.
pub fn plan_export(entries: &[ImageEntry], mode: EditorMode, size: OutputSize) -> ExportPlan {
    let items: Vec<ExportItem> = entries
        .iter()
        .enumerate()
        .filter(|(_, entry)| entry.confirmed)
        .zip(1..)
        .map(|((entry_index, entry), n)| {
            let (width, height) = output_dimensions(mode.crop_mode(entry.crop.ratio), size);
            let (crop_name, original_name) = match mode {
                EditorMode::Square => (format!("{n}-1.png"), Some(original_name(entry, n))),
                EditorMode::Ratio => (format!("{n}.png"), None),
            };
            ExportItem {
                entry_index,
                crop_name,
                original_name,
                width,
                height,
                source: entry.crop.to_pixel_rect(entry.dims),
            }
        })
        .collect();

    tracing::debug!(mode = %mode, count = items.len(), size = size.get(), "planned export");

    ExportPlan {
        archive_name: archive_name(mode).to_string(),
        items,
    }
}

fn original_name(entry: &ImageEntry, n: usize) -> String {
    let ext = entry.extension().unwrap_or_else(|| {
        tracing::warn!(name = %entry.name, "source has no extension, naming original as png");
        FALLBACK_EXTENSION
    });
    format!("{n}-2.{ext}")
}
