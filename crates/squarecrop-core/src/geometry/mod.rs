//! Crop geometry engine.
//!
//! Computes, constrains and updates crop rectangles under two mutually
//! exclusive modes: fixed 1:1 (square) and an arbitrary `w:h` ratio.
//!
//! # Operations
//!
//! - [`compute_initial_crop`] - Centered, largest-fit crop for a new image
//! - [`recompute_for_mode_change`] - Recompute every entry for a new mode
//! - [`recompute_for_ratio_change`] - Recompute one entry for a new ratio
//! - [`translate`] - Drag the crop, clamped per axis
//! - [`resize`] - Drag a corner handle, anchored on the opposite corner
//!
//! # Coordinate System
//!
//! - All rectangles are in source-image pixels, stored as `f64`
//! - Origin is the top-left corner
//! - Gesture deltas are cumulative from gesture start, already divided by the
//!   display scale
//!
//! The engine holds no state. Every call takes the rectangle, the image
//! dimensions and the mode explicitly and returns a new rectangle; clamping
//! replaces rejection, so none of these functions fail.

mod placement;
mod resize;
mod translate;
mod types;

pub use placement::{
    compute_initial_crop, fit_centered, recompute_for_mode_change, recompute_for_ratio_change,
};
pub use resize::resize;
pub use translate::translate;
pub use types::{
    AspectRatio, CropMode, CropRect, Delta, GeometryError, Handle, ImageDimensions, PixelRect,
    Point,
};
