//! Display scaling between screen and image coordinates.
//!
//! The editor shows each image downscaled (never upscaled) to fit the
//! container. Pointer offsets arrive in screen pixels and are converted to
//! image pixels here before reaching the geometry engine.

use serde::{Deserialize, Serialize};

use crate::geometry::{fit_centered, Delta, ImageDimensions};

/// Container width assumed when the front end reports none.
pub const FALLBACK_CONTAINER_WIDTH: f64 = 800.0;

/// Aspect ratio (`w / h`) of the thumbnail guide drawn inside ratio crops.
pub const GUIDE_RATIO: f64 = 3.0 / 4.0;

/// Scale at which an image is displayed.
///
/// `min(1, container_width / W, max_height / H)`. A non-positive or
/// non-finite `container_width` falls back to [`FALLBACK_CONTAINER_WIDTH`];
/// a non-positive or non-finite `max_height` leaves height unconstrained.
/// Empty images display at scale 1.
pub fn display_scale(dims: ImageDimensions, container_width: f64, max_height: f64) -> f64 {
    if dims.is_empty() {
        return 1.0;
    }

    let container_width = if container_width.is_finite() && container_width > 0.0 {
        container_width
    } else {
        FALLBACK_CONTAINER_WIDTH
    };

    let mut scale = (container_width / dims.w()).min(1.0);
    if max_height.is_finite() && max_height > 0.0 {
        scale = scale.min(max_height / dims.h());
    }
    scale
}

/// Convert a screen-space pointer offset to image pixels.
#[inline]
pub fn to_image_delta(delta: Delta, scale: f64) -> Delta {
    Delta::new(delta.x / scale, delta.y / scale)
}

/// Guide rectangle relative to the crop box's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GuideRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Largest centered 3:4 rectangle inside a crop box of `width × height`.
///
/// Marks the area a feed thumbnail will show. Purely visual; it never
/// constrains the crop.
pub fn thumbnail_guide(width: f64, height: f64) -> GuideRect {
    if !(width > 0.0 && height > 0.0) {
        return GuideRect {
            left: 0.0,
            top: 0.0,
            width: 0.0,
            height: 0.0,
        };
    }
    let (left, top, width, height) = fit_centered(width, height, GUIDE_RATIO);
    GuideRect {
        left,
        top,
        width,
        height,
    }
}
