//! Pointer gesture state machine.
//!
//! Exactly two states: `Idle` and `Adjusting`. Entering `Adjusting` snapshots
//! the crop; every pointer event is then computed from that snapshot and the
//! cumulative pointer offset, never accumulated incrementally.

use serde::{Deserialize, Serialize};

use crate::geometry::{resize, translate, CropMode, CropRect, Handle, ImageDimensions, Point};

/// What the active gesture does to the crop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "handle", rename_all = "lowercase")]
pub enum GestureKind {
    /// Dragging the body of the crop box.
    Translate,
    /// Dragging one of the corner handles.
    Resize(Handle),
}

/// Gesture state for the selected entry.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    Adjusting {
        kind: GestureKind,
        /// Crop as it was when the gesture began.
        start_rect: CropRect,
        /// Pointer position when the gesture began, in screen units.
        origin: Point,
    },
}

impl GestureState {
    pub fn is_active(&self) -> bool {
        matches!(self, GestureState::Adjusting { .. })
    }

    pub fn kind(&self) -> Option<GestureKind> {
        match self {
            GestureState::Idle => None,
            GestureState::Adjusting { kind, .. } => Some(*kind),
        }
    }

    /// Crop for the pointer at `pointer`, given the display `scale`.
    ///
    /// Returns `None` when idle. Screen offsets are divided by `scale` to get
    /// image pixels.
    pub(crate) fn apply(
        &self,
        pointer: Point,
        scale: f64,
        dims: ImageDimensions,
        mode: CropMode,
    ) -> Option<CropRect> {
        let GestureState::Adjusting {
            kind,
            start_rect,
            origin,
        } = self
        else {
            return None;
        };

        let delta = crate::viewport::to_image_delta(pointer.delta_from(*origin), scale);
        let rect = match kind {
            GestureKind::Translate => translate(start_rect, dims, delta),
            GestureKind::Resize(handle) => resize(start_rect, dims, delta, *handle, mode),
        };
        Some(rect)
    }
}
