//! Initial crop placement and wholesale recomputation.
//!
//! A fresh crop is the largest rectangle of the target aspect ratio that
//! fits the image, centered on both axes.

use super::types::{AspectRatio, CropMode, CropRect, ImageDimensions};
use crate::entry::ImageEntry;

/// Largest `aspect`-shaped rectangle inside a `width × height` box, centered.
///
/// Returns `(x, y, w, h)` relative to the box's top-left corner. When the
/// box is relatively wider than `aspect` the fit is by height, otherwise by
/// width.
pub fn fit_centered(width: f64, height: f64, aspect: f64) -> (f64, f64, f64, f64) {
    let (w, h) = if width / height > aspect {
        (height * aspect, height)
    } else {
        (width, width / aspect)
    };
    ((width - w) / 2.0, (height - h) / 2.0, w, h)
}

/// Compute the initial crop for a freshly decoded image.
///
/// Square mode yields a centered `min(W, H)` square; ratio mode fits the
/// ratio by height when the image is relatively wider than the target,
/// otherwise by width. The result carries the ratio it was computed with.
///
/// Images smaller than [`crate::MIN_CROP_SIZE`] on either side produce a crop
/// below the minimum; this is not corrected here.
pub fn compute_initial_crop(dims: ImageDimensions, mode: CropMode) -> CropRect {
    let (x, y, width, height) = match mode {
        CropMode::Square => {
            let size = dims.w().min(dims.h());
            ((dims.w() - size) / 2.0, (dims.h() - size) / 2.0, size, size)
        }
        CropMode::Ratio(ratio) => fit_centered(dims.w(), dims.h(), ratio.value()),
    };
    CropRect::new(x, y, width, height, mode.ratio())
}

/// Recenter and resize every entry for a new mode.
///
/// Each entry is recomputed from its own dimensions. Confirmation flags are
/// left as they are.
pub fn recompute_for_mode_change(entries: &mut [ImageEntry], mode: CropMode) {
    for entry in entries.iter_mut() {
        entry.crop = compute_initial_crop(entry.dims, mode);
    }
}

/// Recompute a single entry for a new ratio and clear its confirmation.
///
/// Only the entry passed in is touched; other entries keep their previous
/// ratio and rectangle.
pub fn recompute_for_ratio_change(entry: &mut ImageEntry, ratio: AspectRatio) {
    entry.crop = compute_initial_crop(entry.dims, CropMode::Ratio(ratio));
    entry.confirmed = false;
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn entry(width: u32, height: u32) -> ImageEntry {
        ImageEntry::new("img.png", ImageDimensions::new(width, height), CropMode::Square)
    }

    #[test]
    fn test_square_landscape_is_centered() {
        let rect = compute_initial_crop(ImageDimensions::new(2000, 1000), CropMode::Square);
        assert_eq!(
            rect,
            CropRect::new(500.0, 0.0, 1000.0, 1000.0, AspectRatio::SQUARE)
        );
    }

    #[test]
    fn test_square_portrait_is_centered() {
        let rect = compute_initial_crop(ImageDimensions::new(600, 900), CropMode::Square);
        assert_eq!((rect.x, rect.y), (0.0, 150.0));
        assert_eq!((rect.width, rect.height), (600.0, 600.0));
    }

    #[test]
    fn test_ratio_fit_by_width() {
        // 1000/2000 = 0.5 < 9/16 so the width is the limiting side
        let ratio = AspectRatio::DEFAULT;
        let rect = compute_initial_crop(ImageDimensions::new(1000, 2000), CropMode::Ratio(ratio));

        assert_eq!(rect.x, 0.0);
        assert_eq!(rect.width, 1000.0);
        assert_eq!(rect.height.round(), 1778.0);
        assert_eq!(rect.y.round(), 111.0);
        assert!((rect.width / rect.height - ratio.value()).abs() < 1e-6);
        assert_eq!(rect.ratio, ratio);
    }

    #[test]
    fn test_ratio_fit_by_height() {
        let ratio = AspectRatio::new(4.0, 5.0).unwrap();
        let rect = compute_initial_crop(ImageDimensions::new(3000, 1000), CropMode::Ratio(ratio));

        assert_eq!(rect.height, 1000.0);
        assert_eq!(rect.width, 800.0);
        assert_eq!(rect.x, 1100.0);
        assert_eq!(rect.y, 0.0);
    }

    #[test]
    fn test_ratio_exact_match_fills_image() {
        let ratio = AspectRatio::new(16.0, 9.0).unwrap();
        let rect = compute_initial_crop(ImageDimensions::new(1920, 1080), CropMode::Ratio(ratio));
        assert!((rect.x).abs() < EPS);
        assert!((rect.y).abs() < EPS);
        assert!((rect.width - 1920.0).abs() < EPS);
        assert!((rect.height - 1080.0).abs() < EPS);
    }

    #[test]
    fn test_degenerate_image_not_corrected() {
        let rect = compute_initial_crop(ImageDimensions::new(30, 400), CropMode::Square);
        assert_eq!(rect.width, 30.0);
        assert!(rect.width < crate::MIN_CROP_SIZE);
    }

    #[test]
    fn test_initial_crop_is_deterministic() {
        let dims = ImageDimensions::new(1234, 777);
        let mode = CropMode::Ratio(AspectRatio::new(3.0, 2.0).unwrap());
        assert_eq!(compute_initial_crop(dims, mode), compute_initial_crop(dims, mode));
    }

    #[test]
    fn test_fit_centered_guide() {
        // A 3:4 guide inside a 900x400 box is height-limited
        let (x, y, w, h) = fit_centered(900.0, 400.0, 0.75);
        assert_eq!((w, h), (300.0, 400.0));
        assert_eq!((x, y), (300.0, 0.0));
    }

    #[test]
    fn test_mode_change_keeps_confirmation() {
        let mut entries = vec![entry(2000, 1000), entry(800, 1200)];
        entries[1].confirmed = true;

        let ratio = AspectRatio::DEFAULT;
        recompute_for_mode_change(&mut entries, CropMode::Ratio(ratio));

        assert!(!entries[0].confirmed);
        assert!(entries[1].confirmed);
        for e in &entries {
            assert_eq!(e.crop.ratio, ratio);
            assert!((e.crop.width / e.crop.height - ratio.value()).abs() < 1e-6);
        }

        recompute_for_mode_change(&mut entries, CropMode::Square);
        assert_eq!(entries[0].crop.width, 1000.0);
        assert_eq!(entries[1].crop.width, 800.0);
        assert_eq!(entries[1].crop.ratio, AspectRatio::SQUARE);
    }

    #[test]
    fn test_ratio_change_resets_confirmation() {
        let mut e = entry(1000, 1000);
        e.confirmed = true;

        let ratio = AspectRatio::new(16.0, 9.0).unwrap();
        recompute_for_ratio_change(&mut e, ratio);

        assert!(!e.confirmed);
        assert_eq!(e.crop.ratio, ratio);
        assert_eq!(e.crop.width, 1000.0);
        assert!((e.crop.height - 562.5).abs() < EPS);
    }
}
