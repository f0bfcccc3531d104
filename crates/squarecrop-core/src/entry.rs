//! Per-image record owned by a crop batch.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::geometry::{compute_initial_crop, CropMode, CropRect, ImageDimensions};

/// One loaded image: its dimensions, its crop, and whether the crop is confirmed.
///
/// The entry exclusively owns its [`CropRect`]. The crop is recomputed
/// wholesale on load and on mode or ratio changes, and mutated by gestures
/// only while `confirmed` is false.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageEntry {
    /// Source file name, used when naming export files.
    pub name: String,
    /// Oriented pixel dimensions of the decoded image.
    pub dims: ImageDimensions,
    /// Current crop rectangle in source pixels.
    pub crop: CropRect,
    /// Whether the user has confirmed this crop for export.
    pub confirmed: bool,
}

impl ImageEntry {
    /// Create an unconfirmed entry with its initial crop for `mode`.
    pub fn new(name: impl Into<String>, dims: ImageDimensions, mode: CropMode) -> Self {
        Self {
            name: name.into(),
            dims,
            crop: compute_initial_crop(dims, mode),
            confirmed: false,
        }
    }

    /// File extension of the source name, if it has one.
    pub fn extension(&self) -> Option<&str> {
        Path::new(&self.name)
            .extension()
            .and_then(|ext| ext.to_str())
            .filter(|ext| !ext.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_entry_is_unconfirmed_with_initial_crop() {
        let dims = ImageDimensions::new(2000, 1000);
        let entry = ImageEntry::new("a.jpg", dims, CropMode::Square);

        assert!(!entry.confirmed);
        assert_eq!(entry.crop, compute_initial_crop(dims, CropMode::Square));
    }

    #[test]
    fn test_extension() {
        let dims = ImageDimensions::new(100, 100);
        assert_eq!(
            ImageEntry::new("photo.JPG", dims, CropMode::Square).extension(),
            Some("JPG")
        );
        assert_eq!(
            ImageEntry::new("archive.tar.png", dims, CropMode::Square).extension(),
            Some("png")
        );
        assert_eq!(ImageEntry::new("README", dims, CropMode::Square).extension(), None);
        assert_eq!(ImageEntry::new(".hidden", dims, CropMode::Square).extension(), None);
    }
}
