//! Interactive move, resize and rotate.
//!
//! A drag is an [`EditSession`]: it starts with the cursor on the overlay
//! body, on a corner handle or on the rotation handle, receives each pointer
//! move as a geographic point, and ends with an [`OverlayChange`] for the
//! host to persist.
//!
//! # Rules
//!
//! - **Move**: every step translates the bounds captured at drag start by the
//!   cursor's total offset from the start point. Steps never build on each
//!   other, so many small moves land exactly where one big move would.
//! - **Resize**: a corner handle replaces exactly one latitude and one
//!   longitude; the opposite corner never moves.
//! - **Rotate**: the rotation becomes the absolute bearing from the box center
//!   to the cursor, optionally snapped.

use serde::{Deserialize, Serialize};

use crate::geo::{Corner, LatLng, LatLngBounds};
use crate::host::OverlayHost;
use crate::overlay::RotatableOverlay;
use crate::rotation::{calculate_rotation_angle, normalize_angle, snap_angle};

/// Translate `start_bounds` by the offset from `start` to `cursor`.
pub fn translate_bounds(
    start_bounds: &LatLngBounds,
    start: LatLng,
    cursor: LatLng,
) -> LatLngBounds {
    let (d_lat, d_lng) = start.delta_to(cursor);
    start_bounds.translate(d_lat, d_lng)
}

/// Move one corner of `bounds` to `cursor`, holding the opposite corner.
pub fn resize_bounds(bounds: &LatLngBounds, corner: Corner, cursor: LatLng) -> LatLngBounds {
    bounds.with_corner(corner, cursor)
}

/// Rotation for a rotation-handle drag: bearing from the box center to the
/// cursor, in `[0, 360)`.
pub fn rotation_for_cursor(bounds: &LatLngBounds, cursor: LatLng) -> f64 {
    calculate_rotation_angle(bounds.center(), cursor)
}

/// What the drag started on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "corner")]
pub enum DragTarget {
    Body,
    Corner(Corner),
    RotationHandle,
}

/// Result of one drag step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditStep {
    Bounds(LatLngBounds),
    Rotation(f64),
}

/// Final outcome of a drag, reported upward for persistence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum OverlayChange {
    Moved { bounds: LatLngBounds },
    Resized { corner: Corner, bounds: LatLngBounds },
    Rotated { rotation: f64 },
}

/// State captured when a drag starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditSession {
    target: DragTarget,
    start: LatLng,
    start_bounds: LatLngBounds,
    start_rotation: f64,
    snap: Option<f64>,
}

impl EditSession {
    /// Begin a drag at `cursor` against the current bounds and rotation.
    pub fn begin(target: DragTarget, cursor: LatLng, bounds: LatLngBounds, rotation: f64) -> Self {
        Self {
            target,
            start: cursor,
            start_bounds: bounds,
            start_rotation: normalize_angle(rotation),
            snap: None,
        }
    }

    /// Begin a drag against an overlay's current state.
    pub fn begin_on<H: OverlayHost>(
        overlay: &RotatableOverlay<H>,
        target: DragTarget,
        cursor: LatLng,
    ) -> Self {
        Self::begin(target, cursor, overlay.bounds(), overlay.rotation())
    }

    /// Snap rotation-handle drags to multiples of `increment` degrees.
    pub fn with_snap(mut self, increment: f64) -> Self {
        self.snap = Some(increment);
        self
    }

    pub fn target(&self) -> DragTarget {
        self.target
    }

    pub fn start_bounds(&self) -> LatLngBounds {
        self.start_bounds
    }

    /// Rotation at drag start.
    pub fn start_rotation(&self) -> f64 {
        self.start_rotation
    }

    /// Compute the new value for a cursor position.
    pub fn update(&self, cursor: LatLng) -> EditStep {
        match self.target {
            DragTarget::Body => {
                EditStep::Bounds(translate_bounds(&self.start_bounds, self.start, cursor))
            }
            DragTarget::Corner(corner) => {
                EditStep::Bounds(resize_bounds(&self.start_bounds, corner, cursor))
            }
            DragTarget::RotationHandle => {
                let bearing = rotation_for_cursor(&self.start_bounds, cursor);
                let angle = match self.snap {
                    Some(increment) => normalize_angle(snap_angle(bearing, increment)),
                    None => bearing,
                };
                EditStep::Rotation(angle)
            }
        }
    }

    /// Compute the step for `cursor` and push it into the overlay.
    pub fn drag<H: OverlayHost>(
        &self,
        overlay: &mut RotatableOverlay<H>,
        cursor: LatLng,
    ) -> EditStep {
        let step = self.update(cursor);
        match step {
            EditStep::Bounds(bounds) => overlay.set_bounds(bounds),
            EditStep::Rotation(angle) => overlay.set_rotation(angle),
        }
        step
    }

    /// Apply the final cursor position and report the change.
    pub fn finish<H: OverlayHost>(
        self,
        overlay: &mut RotatableOverlay<H>,
        cursor: LatLng,
    ) -> OverlayChange {
        self.drag(overlay, cursor);
        match self.target {
            DragTarget::Body => OverlayChange::Moved {
                bounds: overlay.bounds(),
            },
            DragTarget::Corner(corner) => OverlayChange::Resized {
                corner,
                bounds: overlay.bounds(),
            },
            DragTarget::RotationHandle => OverlayChange::Rotated {
                rotation: overlay.rotation(),
            },
        }
    }

    /// Abandon the drag and put back what it changed.
    pub fn cancel<H: OverlayHost>(self, overlay: &mut RotatableOverlay<H>) {
        match self.target {
            DragTarget::Body | DragTarget::Corner(_) => overlay.set_bounds(self.start_bounds),
            DragTarget::RotationHandle => overlay.set_rotation(self.start_rotation),
        }
    }
}
