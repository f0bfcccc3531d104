//! Editor settings supplied by the front end.
//!
//! Settings arrive as a plain object (via `serde`), so every field has a
//! default and missing fields are filled in.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::export::OutputSize;
use crate::geometry::{AspectRatio, CropMode, GeometryError};

/// Default long-side length of exported crops, in pixels.
pub const DEFAULT_OUTPUT_SIZE: u32 = 1080;

/// Errors raised while reading editor settings from the front end.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettingsError {
    /// A mode name other than `square` or `ratio`.
    #[error("Unknown editor mode: {0}")]
    UnknownMode(String),

    /// The ratio accompanying a mode is invalid.
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// Which output mode the editor is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditorMode {
    /// 1:1 crops, exported together with the original files.
    #[default]
    Square,
    /// Fixed `w:h` crops, exported alone.
    Ratio,
}

impl EditorMode {
    /// The geometry mode for this editor mode under the given ratio.
    pub fn crop_mode(self, ratio: AspectRatio) -> CropMode {
        match self {
            EditorMode::Square => CropMode::Square,
            EditorMode::Ratio => CropMode::Ratio(ratio),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EditorMode::Square => "square",
            EditorMode::Ratio => "ratio",
        }
    }
}

impl fmt::Display for EditorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EditorMode {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "square" => Ok(EditorMode::Square),
            "ratio" => Ok(EditorMode::Ratio),
            other => Err(SettingsError::UnknownMode(other.to_string())),
        }
    }
}

/// Parse a mode name and ratio components into a geometry mode.
///
/// The ratio is validated in both modes so that a bad custom ratio is
/// reported even while square mode is active.
pub fn parse_crop_mode(mode: &str, ratio_w: f64, ratio_h: f64) -> Result<CropMode, SettingsError> {
    let mode = mode.parse::<EditorMode>()?;
    let ratio = AspectRatio::new(ratio_w, ratio_h)?;
    Ok(mode.crop_mode(ratio))
}

/// Settings used to seed a [`crate::CropSession`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorSettings {
    /// Active output mode
    #[serde(default)]
    pub mode: EditorMode,
    /// Active ratio for ratio mode (kept while in square mode)
    #[serde(default)]
    pub ratio: AspectRatio,
    /// Long-side length of exported crops
    #[serde(default)]
    pub output_size: OutputSize,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            mode: EditorMode::default(),
            ratio: AspectRatio::default(),
            output_size: OutputSize::default(),
        }
    }
}

impl EditorSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// The geometry mode these settings select.
    pub fn crop_mode(&self) -> CropMode {
        self.mode.crop_mode(self.ratio)
    }
}
