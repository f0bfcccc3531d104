//! SquareCrop Core - Batch crop geometry for the square/ratio cropping tool
//!
//! This crate holds everything behind the crop editor that is not DOM work:
//! the crop geometry engine, the per-image records and batch session, display
//! scaling, export planning, and the decode/encode steps around them.
//!
//! # Architecture
//!
//! - [`geometry`] - Stateless engine: initial placement, translate, resize
//! - [`session`] - Batch state, selection, confirmation and pointer gestures
//! - [`viewport`] - Screen/image scale conversion and the thumbnail guide
//! - [`export`] - Output sizes, archive naming and crop rendering
//! - [`decode`] / [`encode`] - Image bytes in, PNG bytes out
//!
//! All operations are synchronous and single-threaded. Events are emitted
//! through `tracing`; no subscriber is installed here.

pub mod decode;
pub mod encode;
pub mod entry;
pub mod export;
pub mod geometry;
pub mod session;
pub mod settings;
pub mod viewport;

pub use entry::ImageEntry;
pub use geometry::{
    compute_initial_crop, recompute_for_mode_change, recompute_for_ratio_change, resize,
    translate, AspectRatio, CropMode, CropRect, Delta, GeometryError, Handle, ImageDimensions,
    PixelRect, Point,
};
pub use session::{ConfirmOutcome, CropSession, GestureKind, GestureState, SessionError};
pub use settings::{parse_crop_mode, EditorMode, EditorSettings, SettingsError, DEFAULT_OUTPUT_SIZE};

/// Smallest crop width (in source pixels) a resize may produce.
pub const MIN_CROP_SIZE: f64 = 50.0;
