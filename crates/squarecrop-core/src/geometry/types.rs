//! Core types for crop geometry.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for geometry inputs that fail validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// A ratio component is zero, negative, or not finite.
    #[error("Aspect ratio components must be positive and finite, got {w}:{h}")]
    InvalidRatio { w: f64, h: f64 },

    /// A ratio string could not be parsed as `W:H`.
    #[error("Malformed aspect ratio: {0}")]
    MalformedRatio(String),

    /// A handle name other than `ne`, `nw`, `se` or `sw`.
    #[error("Unknown resize handle: {0}")]
    UnknownHandle(String),
}

/// Pixel dimensions of a decoded source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageDimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl ImageDimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub(crate) fn w(self) -> f64 {
        self.width as f64
    }

    #[inline]
    pub(crate) fn h(self) -> f64 {
        self.height as f64
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// True when either side is shorter than [`crate::MIN_CROP_SIZE`].
    ///
    /// Initial crops for such images fall below the minimum and are left as-is.
    pub fn is_degenerate(&self) -> bool {
        self.w() < crate::MIN_CROP_SIZE || self.h() < crate::MIN_CROP_SIZE
    }
}

/// Target aspect ratio `w:h`.
///
/// Components are positive and finite but not necessarily integers once a
/// custom ratio is entered. Use [`AspectRatio::new`] or the `FromStr`
/// implementation to construct one from untrusted input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RatioRepr")]
pub struct AspectRatio {
    pub w: f64,
    pub h: f64,
}

#[derive(Deserialize)]
struct RatioRepr {
    w: f64,
    h: f64,
}

impl TryFrom<RatioRepr> for AspectRatio {
    type Error = GeometryError;

    fn try_from(repr: RatioRepr) -> Result<Self, Self::Error> {
        AspectRatio::new(repr.w, repr.h)
    }
}

impl AspectRatio {
    /// 1:1, carried by every square-mode crop.
    pub const SQUARE: AspectRatio = AspectRatio { w: 1.0, h: 1.0 };

    /// 9:16, the initial ratio-mode selection.
    pub const DEFAULT: AspectRatio = AspectRatio { w: 9.0, h: 16.0 };

    /// Ratios offered in the preset selector, in display order.
    pub const PRESETS: [AspectRatio; 8] = [
        AspectRatio { w: 9.0, h: 16.0 },
        AspectRatio { w: 16.0, h: 9.0 },
        AspectRatio { w: 4.0, h: 5.0 },
        AspectRatio { w: 3.0, h: 4.0 },
        AspectRatio { w: 4.0, h: 3.0 },
        AspectRatio { w: 2.0, h: 3.0 },
        AspectRatio { w: 3.0, h: 2.0 },
        AspectRatio { w: 1.0, h: 1.0 },
    ];

    /// Create a validated ratio.
    pub fn new(w: f64, h: f64) -> Result<Self, GeometryError> {
        if w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0 {
            Ok(Self { w, h })
        } else {
            Err(GeometryError::InvalidRatio { w, h })
        }
    }

    /// Build a ratio from the two free-form custom inputs.
    ///
    /// Empty, unparseable or zero fields fall back to the matching component
    /// of [`AspectRatio::DEFAULT`]. Negative values are rejected.
    pub fn from_inputs(w: &str, h: &str) -> Result<Self, GeometryError> {
        fn component(input: &str, fallback: f64) -> f64 {
            match input.trim().parse::<f64>() {
                Ok(v) if v != 0.0 && v.is_finite() => v,
                _ => fallback,
            }
        }
        Self::new(
            component(w, Self::DEFAULT.w),
            component(h, Self::DEFAULT.h),
        )
    }

    /// The ratio value `w / h`.
    #[inline]
    pub fn value(self) -> f64 {
        self.w / self.h
    }

    /// Whether this ratio is one of [`AspectRatio::PRESETS`].
    pub fn is_preset(&self) -> bool {
        Self::PRESETS.contains(self)
    }

    /// Whether the long side of this ratio is its width (ties count as wide).
    pub fn is_landscape(&self) -> bool {
        self.w >= self.h
    }
}

impl Default for AspectRatio {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.w, self.h)
    }
}

impl FromStr for AspectRatio {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = s
            .split_once(':')
            .ok_or_else(|| GeometryError::MalformedRatio(s.to_string()))?;
        let w = w
            .trim()
            .parse::<f64>()
            .map_err(|_| GeometryError::MalformedRatio(s.to_string()))?;
        let h = h
            .trim()
            .parse::<f64>()
            .map_err(|_| GeometryError::MalformedRatio(s.to_string()))?;
        Self::new(w, h)
    }
}

/// Crop shape constraint: fixed 1:1 or an arbitrary `w:h`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "ratio", rename_all = "lowercase")]
pub enum CropMode {
    Square,
    Ratio(AspectRatio),
}

impl CropMode {
    /// The ratio a crop computed under this mode carries.
    pub fn ratio(self) -> AspectRatio {
        match self {
            CropMode::Square => AspectRatio::SQUARE,
            CropMode::Ratio(ratio) => ratio,
        }
    }
}

/// A cumulative pointer displacement in source-image pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Delta {
    pub x: f64,
    pub y: f64,
}

impl Delta {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A pointer position, in whatever space the caller reports events in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Displacement from `origin` to this point.
    pub fn delta_from(self, origin: Point) -> Delta {
        Delta::new(self.x - origin.x, self.y - origin.y)
    }
}

/// Corner grip being dragged during a resize.
///
/// The diagonally opposite corner is the anchor and stays fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Handle {
    Ne,
    Nw,
    Se,
    Sw,
}

impl Handle {
    pub const ALL: [Handle; 4] = [Handle::Ne, Handle::Nw, Handle::Se, Handle::Sw];

    /// Direction of the moving corner away from the anchor, per axis.
    ///
    /// `+1.0` means the corner sits on the right/bottom edge.
    #[inline]
    pub(crate) fn direction(self) -> (f64, f64) {
        match self {
            Handle::Se => (1.0, 1.0),
            Handle::Sw => (-1.0, 1.0),
            Handle::Ne => (1.0, -1.0),
            Handle::Nw => (-1.0, -1.0),
        }
    }

    /// The corner of `rect` that stays fixed while this handle is dragged.
    pub fn anchor(self, rect: &CropRect) -> (f64, f64) {
        let (sx, sy) = self.direction();
        let ax = if sx > 0.0 { rect.x } else { rect.right() };
        let ay = if sy > 0.0 { rect.y } else { rect.bottom() };
        (ax, ay)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Handle::Ne => "ne",
            Handle::Nw => "nw",
            Handle::Se => "se",
            Handle::Sw => "sw",
        }
    }
}

impl FromStr for Handle {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ne" => Ok(Handle::Ne),
            "nw" => Ok(Handle::Nw),
            "se" => Ok(Handle::Se),
            "sw" => Ok(Handle::Sw),
            _ => Err(GeometryError::UnknownHandle(s.to_string())),
        }
    }
}

/// Crop rectangle in source-image pixel coordinates.
///
/// Carries the ratio that produced it so that entries computed under
/// different ratios can coexist in one batch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub ratio: AspectRatio,
}

impl CropRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64, ratio: AspectRatio) -> Self {
        Self {
            x,
            y,
            width,
            height,
            ratio,
        }
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// This rectangle multiplied by a display scale (for the on-screen box).
    pub fn scaled(&self, scale: f64) -> CropRect {
        CropRect {
            x: self.x * scale,
            y: self.y * scale,
            width: self.width * scale,
            height: self.height * scale,
            ratio: self.ratio,
        }
    }

    /// Whether the rectangle lies inside `dims`, allowing `tolerance` of
    /// floating-point overshoot on the far edges.
    pub fn is_within(&self, dims: ImageDimensions, tolerance: f64) -> bool {
        self.x >= 0.0
            && self.y >= 0.0
            && self.right() <= dims.w() + tolerance
            && self.bottom() <= dims.h() + tolerance
    }

    /// Round to an integer sampling rectangle clamped to the image.
    ///
    /// The result is never empty for a non-empty image.
    pub fn to_pixel_rect(&self, dims: ImageDimensions) -> PixelRect {
        let left = (self.x.max(0.0).round() as u32).min(dims.width.saturating_sub(1));
        let top = (self.y.max(0.0).round() as u32).min(dims.height.saturating_sub(1));
        let right = (self.right().max(0.0).round() as u32).min(dims.width);
        let bottom = (self.bottom().max(0.0).round() as u32).min(dims.height);

        PixelRect {
            x: left,
            y: top,
            width: right.saturating_sub(left).max(1),
            height: bottom.saturating_sub(top).max(1),
        }
    }
}

/// Integer sub-rectangle of a source image, used when sampling pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}
