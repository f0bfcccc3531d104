//! Corner-anchored proportional resize.
//!
//! # Algorithm
//!
//! 1. Pick the growth along the width axis from whichever delta component
//!    pushes the dragged corner outward; the vertical component is projected
//!    through the ratio so one scalar drives both sides
//! 2. `width = start_width + growth`, floored at [`MIN_CROP_SIZE`];
//!    `height = width / ratio`
//! 3. Place the rectangle so the corner opposite the handle (the anchor)
//!    stays where it was at gesture start
//! 4. Trim against the left, top, right and bottom image edges in that order.
//!    Every trim shrinks one side and re-derives the other through the ratio,
//!    and the rectangle is re-placed against the anchor before the next check
//!
//! Square mode is the same computation with a ratio of 1.

use super::types::{CropMode, CropRect, Delta, Handle, ImageDimensions};
use crate::MIN_CROP_SIZE;

/// A rectangle described by its fixed corner, the direction it extends in,
/// and its current size.
struct AnchoredFrame {
    anchor_x: f64,
    anchor_y: f64,
    dir_x: f64,
    dir_y: f64,
    aspect: f64,
    width: f64,
    height: f64,
}

impl AnchoredFrame {
    #[inline]
    fn x(&self) -> f64 {
        if self.dir_x > 0.0 {
            self.anchor_x
        } else {
            self.anchor_x - self.width
        }
    }

    #[inline]
    fn y(&self) -> f64 {
        if self.dir_y > 0.0 {
            self.anchor_y
        } else {
            self.anchor_y - self.height
        }
    }

    fn set_width(&mut self, width: f64) {
        self.width = width;
        self.height = width / self.aspect;
    }

    fn set_height(&mut self, height: f64) {
        self.height = height;
        self.width = height * self.aspect;
    }
}

/// Resize `start` by dragging `handle` through the cumulative `delta`.
///
/// `start` is the rectangle captured when the gesture began; the delta is
/// measured from the same moment. The corner opposite `handle` does not move.
///
/// In square mode the result is always square. In ratio mode `width / height`
/// equals the mode's ratio after every trim. The width never drops below
/// [`MIN_CROP_SIZE`] unless the image cannot hold a crop that wide at the
/// mode's ratio, either because it is small or because the ratio is extreme.
pub fn resize(
    start: &CropRect,
    dims: ImageDimensions,
    delta: Delta,
    handle: Handle,
    mode: CropMode,
) -> CropRect {
    let ratio = mode.ratio();
    let aspect = ratio.value();
    let (dir_x, dir_y) = handle.direction();
    let (anchor_x, anchor_y) = handle.anchor(start);

    let growth = (dir_x * delta.x).max(dir_y * delta.y * aspect);

    let mut frame = AnchoredFrame {
        anchor_x,
        anchor_y,
        dir_x,
        dir_y,
        aspect,
        width: 0.0,
        height: 0.0,
    };
    frame.set_width((start.width + growth).max(MIN_CROP_SIZE));

    let (img_w, img_h) = (dims.w(), dims.h());

    let x = frame.x();
    if x < 0.0 {
        frame.set_width(frame.width + x);
    }
    let y = frame.y();
    if y < 0.0 {
        frame.set_height(frame.height + y);
    }
    let x = frame.x();
    if x + frame.width > img_w {
        frame.set_width(img_w - x);
    }
    let y = frame.y();
    if y + frame.height > img_h {
        frame.set_height(img_h - y);
    }

    CropRect {
        x: frame.x().max(0.0),
        y: frame.y().max(0.0),
        width: frame.width,
        height: frame.height,
        ratio,
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::geometry::{compute_initial_crop, translate, AspectRatio};
    use proptest::prelude::*;

    fn handle_strategy() -> impl Strategy<Value = Handle> {
        prop_oneof![
            Just(Handle::Ne),
            Just(Handle::Nw),
            Just(Handle::Se),
            Just(Handle::Sw),
        ]
    }

    fn ratio_strategy() -> impl Strategy<Value = AspectRatio> {
        (1u32..=16, 1u32..=16).prop_map(|(w, h)| AspectRatio {
            w: w as f64,
            h: h as f64,
        })
    }

    /// A valid starting rectangle: the initial crop, shifted somewhere inside the image.
    fn start_rect(
        dims: ImageDimensions,
        mode: CropMode,
        shrink: f64,
        shift: (f64, f64),
    ) -> CropRect {
        let initial = compute_initial_crop(dims, mode);
        let shrunk = resize(&initial, dims, Delta::new(-shrink, -shrink), Handle::Se, mode);
        translate(&shrunk, dims, Delta::new(shift.0, shift.1))
    }

    proptest! {
        /// Property: square resizes are contained, square, and at least the minimum size.
        #[test]
        fn prop_square_resize_invariants(
            (width, height) in (200u32..=3000, 200u32..=3000),
            shrink in 0.0f64..2000.0,
            shift in (-3000.0f64..3000.0, -3000.0f64..3000.0),
            (dx, dy) in (-5000.0f64..5000.0, -5000.0f64..5000.0),
            handle in handle_strategy(),
        ) {
            let dims = ImageDimensions::new(width, height);
            let start = start_rect(dims, CropMode::Square, shrink, shift);
            let rect = resize(&start, dims, Delta::new(dx, dy), handle, CropMode::Square);

            prop_assert!(rect.is_within(dims, 1e-6), "{:?} escapes {:?}", rect, dims);
            prop_assert_eq!(rect.width, rect.height);
            prop_assert!(rect.width >= MIN_CROP_SIZE - 1e-9);
        }

        /// Property: ratio resizes are contained, exact-ratio, and at least the minimum width.
        #[test]
        fn prop_ratio_resize_invariants(
            (width, height) in (200u32..=3000, 200u32..=3000),
            ratio in ratio_strategy().prop_filter("min width reachable", |r| r.value() >= 0.25 && r.value() <= 4.0),
            shrink in 0.0f64..2000.0,
            shift in (-3000.0f64..3000.0, -3000.0f64..3000.0),
            (dx, dy) in (-5000.0f64..5000.0, -5000.0f64..5000.0),
            handle in handle_strategy(),
        ) {
            let dims = ImageDimensions::new(width, height);
            let mode = CropMode::Ratio(ratio);
            let start = start_rect(dims, mode, shrink, shift);
            let rect = resize(&start, dims, Delta::new(dx, dy), handle, mode);

            prop_assert!(rect.is_within(dims, 1e-6), "{:?} escapes {:?}", rect, dims);
            prop_assert!((rect.width / rect.height - ratio.value()).abs() < 1e-6);
            prop_assert!(rect.width >= MIN_CROP_SIZE - 1e-6);
            prop_assert!(rect.height > 0.0);
        }

        /// Property: the corner opposite the handle never moves.
        #[test]
        fn prop_anchor_invariant(
            (width, height) in (200u32..=3000, 200u32..=3000),
            shrink in 0.0f64..2000.0,
            shift in (-3000.0f64..3000.0, -3000.0f64..3000.0),
            (dx, dy) in (-5000.0f64..5000.0, -5000.0f64..5000.0),
            handle in handle_strategy(),
            square in any::<bool>(),
        ) {
            let dims = ImageDimensions::new(width, height);
            let mode = if square {
                CropMode::Square
            } else {
                CropMode::Ratio(AspectRatio::DEFAULT)
            };
            let start = start_rect(dims, mode, shrink, shift);
            let rect = resize(&start, dims, Delta::new(dx, dy), handle, mode);

            let (ax, ay) = handle.anchor(&start);
            let (bx, by) = handle.anchor(&rect);
            prop_assert!((ax - bx).abs() < 1e-6, "anchor x moved: {} -> {}", ax, bx);
            prop_assert!((ay - by).abs() < 1e-6, "anchor y moved: {} -> {}", ay, by);
        }

        /// Property: resizing is a pure function of its inputs.
        #[test]
        fn prop_resize_is_deterministic(
            (width, height) in (200u32..=3000, 200u32..=3000),
            (dx, dy) in (-5000.0f64..5000.0, -5000.0f64..5000.0),
            handle in handle_strategy(),
        ) {
            let dims = ImageDimensions::new(width, height);
            let start = compute_initial_crop(dims, CropMode::Square);
            let a = resize(&start, dims, Delta::new(dx, dy), handle, CropMode::Square);
            let b = resize(&start, dims, Delta::new(dx, dy), handle, CropMode::Square);
            prop_assert_eq!(a, b);
        }
    }
}
