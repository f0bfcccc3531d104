//! Drag-translation of a crop rectangle.

use super::types::{CropRect, Delta, ImageDimensions};

/// Move `rect` by `delta`, keeping it inside the image.
///
/// Each axis is clamped on its own against `[0, dim - size]`. Width and
/// height are unchanged. A rectangle larger than the image on some axis is
/// pinned to 0 on that axis.
pub fn translate(rect: &CropRect, dims: ImageDimensions, delta: Delta) -> CropRect {
    let x = (rect.x + delta.x).min(dims.w() - rect.width).max(0.0);
    let y = (rect.y + delta.y).min(dims.h() - rect.height).max(0.0);
    CropRect { x, y, ..*rect }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::AspectRatio;

    fn square(x: f64, y: f64, size: f64) -> CropRect {
        CropRect::new(x, y, size, size, AspectRatio::SQUARE)
    }

    #[test]
    fn test_translate_clamps_each_axis() {
        let dims = ImageDimensions::new(1000, 1000);
        let moved = translate(&square(0.0, 0.0, 300.0), dims, Delta::new(-50.0, 1500.0));
        assert_eq!(moved, square(0.0, 700.0, 300.0));
    }

    #[test]
    fn test_translate_within_bounds() {
        let dims = ImageDimensions::new(800, 600);
        let moved = translate(&square(100.0, 100.0, 200.0), dims, Delta::new(25.5, -40.0));
        assert_eq!(moved, square(125.5, 60.0, 200.0));
    }

    #[test]
    fn test_translate_zero_delta_is_identity() {
        let dims = ImageDimensions::new(800, 600);
        let rect = square(10.0, 20.0, 100.0);
        assert_eq!(translate(&rect, dims, Delta::default()), rect);
    }

    #[test]
    fn test_translate_keeps_size_and_ratio() {
        let dims = ImageDimensions::new(1000, 2000);
        let ratio = AspectRatio::DEFAULT;
        let rect = CropRect::new(0.0, 111.0, 1000.0, 1777.0, ratio);
        let moved = translate(&rect, dims, Delta::new(300.0, 5000.0));

        assert_eq!(moved.x, 0.0);
        assert_eq!(moved.y, 223.0);
        assert_eq!((moved.width, moved.height), (1000.0, 1777.0));
        assert_eq!(moved.ratio, ratio);
    }

    #[test]
    fn test_translate_oversized_rect_pins_to_origin() {
        // Degenerate image narrower than the crop
        let dims = ImageDimensions::new(40, 400);
        let moved = translate(&square(0.0, 10.0, 50.0), dims, Delta::new(20.0, 20.0));
        assert_eq!(moved.x, 0.0);
        assert_eq!(moved.y, 30.0);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::geometry::{compute_initial_crop, AspectRatio, CropMode};
    use proptest::prelude::*;

    proptest! {
        /// Property: translation never leaves the image and never changes size.
        #[test]
        fn prop_translate_contained(
            (width, height) in (50u32..=4000, 50u32..=4000),
            (dx, dy) in (-10000.0f64..10000.0, -10000.0f64..10000.0),
            square in any::<bool>(),
        ) {
            let dims = ImageDimensions::new(width, height);
            let mode = if square {
                CropMode::Square
            } else {
                CropMode::Ratio(AspectRatio::DEFAULT)
            };
            let start = compute_initial_crop(dims, mode);
            let moved = translate(&start, dims, Delta::new(dx, dy));

            prop_assert!(moved.is_within(dims, 1e-9));
            prop_assert_eq!(moved.width, start.width);
            prop_assert_eq!(moved.height, start.height);
        }
    }
}
