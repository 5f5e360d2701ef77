//! Where to draw the editing handles of a rotated overlay.
//!
//! The stored bounds are unrotated, but the user sees the rotated image, so
//! every handle is placed by rotating its unrotated position around the box
//! center by the overlay's rotation. The rotation handle sits beyond the north
//! edge, [`ROTATION_HANDLE_OFFSET`] of the half-height past it.

use serde::{Deserialize, Serialize};

use crate::geo::{Corner, LatLng, LatLngBounds};
use crate::rotation::rotate_about;

/// Distance of the rotation handle beyond the north edge, as a fraction of
/// the half-height.
pub const ROTATION_HANDLE_OFFSET: f64 = 0.2;

/// A corner handle and its on-map position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CornerHandle {
    pub corner: Corner,
    pub position: LatLng,
}

/// Display positions of all handles for one overlay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HandleLayout {
    /// Counter-clockwise from south-west.
    pub corners: [CornerHandle; 4],
    pub rotation: LatLng,
}

impl HandleLayout {
    /// Lay out handles for `bounds` rotated by `rotation` degrees.
    pub fn new(bounds: &LatLngBounds, rotation: f64) -> Self {
        let center = bounds.center();
        let corners = Corner::ALL.map(|corner| CornerHandle {
            corner,
            position: rotate_about(center, bounds.corner(corner), rotation),
        });

        let reach = bounds.half_height() * (1.0 + ROTATION_HANDLE_OFFSET);
        let unrotated = center.offset(reach, 0.0);

        Self {
            corners,
            rotation: rotate_about(center, unrotated, rotation),
        }
    }

    pub fn corner(&self, corner: Corner) -> LatLng {
        self.corners
            .iter()
            .find(|h| h.corner == corner)
            .map(|h| h.position)
            .unwrap_or(self.corners[0].position)
    }
}
