//! Editing WASM bindings.
//!
//! The editing layer listens to pointer events on the map, converts them to
//! `lat`/`lng`, and drives a [`JsEditSession`] per drag. Rotation math helpers
//! are exported on their own for callers that place handles themselves.
//!
//! # Example (TypeScript)
//!
//! ```typescript
//! let session: JsEditSession | null = null;
//!
//! cornerMarker.addListener('dragstart', (e) => {
//!   session = JsEditSession.begin_resize(overlay, 'sw', e.latLng.lat(), e.latLng.lng());
//! });
//! cornerMarker.addListener('drag', (e) => {
//!   session?.drag(overlay, e.latLng.lat(), e.latLng.lng());
//! });
//! cornerMarker.addListener('dragend', (e) => {
//!   const change = session?.finish(overlay, e.latLng.lat(), e.latLng.lng());
//!   saveOverlay(overlay.snapshot(), change);
//!   session = null;
//! });
//! ```

use crate::overlay::JsGroundOverlay;
use crate::types::{parse_bounds, to_js};
use groundlay_core::rotation::{
    calculate_rotation_angle as core_rotation_angle, snap_angle as core_snap_angle,
    DEFAULT_SNAP_INCREMENT,
};
use groundlay_core::{Corner, DragTarget, EditSession, HandleLayout, LatLng};
use wasm_bindgen::prelude::*;

/// One move, resize or rotate drag.
#[wasm_bindgen]
pub struct JsEditSession {
    inner: EditSession,
}

#[wasm_bindgen]
impl JsEditSession {
    /// Start moving the whole overlay from the cursor position.
    pub fn begin_move(overlay: &JsGroundOverlay, lat: f64, lng: f64) -> JsEditSession {
        Self::begin(overlay, DragTarget::Body, lat, lng)
    }

    /// Start dragging a corner handle: `"sw"`, `"nw"`, `"ne"` or `"se"`.
    pub fn begin_resize(
        overlay: &JsGroundOverlay,
        corner: &str,
        lat: f64,
        lng: f64,
    ) -> Result<JsEditSession, JsValue> {
        let corner: Corner = corner
            .parse()
            .map_err(|e: groundlay_core::OverlayError| JsValue::from_str(&e.to_string()))?;
        Ok(Self::begin(overlay, DragTarget::Corner(corner), lat, lng))
    }

    /// Start dragging the rotation handle, optionally snapping to
    /// `snap_increment` degrees.
    pub fn begin_rotate(
        overlay: &JsGroundOverlay,
        lat: f64,
        lng: f64,
        snap_increment: Option<f64>,
    ) -> JsEditSession {
        let mut session = Self::begin(overlay, DragTarget::RotationHandle, lat, lng);
        if let Some(increment) = snap_increment {
            session.inner = session.inner.with_snap(increment);
        }
        session
    }

    /// Apply a pointer move.
    pub fn drag(&self, overlay: &mut JsGroundOverlay, lat: f64, lng: f64) {
        self.inner.drag(overlay.inner_mut(), LatLng::new(lat, lng));
    }

    /// Apply the final pointer position and return the change to persist.
    pub fn finish(
        &self,
        overlay: &mut JsGroundOverlay,
        lat: f64,
        lng: f64,
    ) -> Result<JsValue, JsValue> {
        let change = self.inner.finish(overlay.inner_mut(), LatLng::new(lat, lng));
        to_js(&change)
    }

    /// Abandon the drag, restoring the bounds or rotation it started with.
    pub fn cancel(&self, overlay: &mut JsGroundOverlay) {
        self.inner.cancel(overlay.inner_mut());
    }

    /// Rotation when the drag started.
    #[wasm_bindgen(getter)]
    pub fn start_rotation(&self) -> f64 {
        self.inner.start_rotation()
    }
}

impl JsEditSession {
    fn begin(overlay: &JsGroundOverlay, target: DragTarget, lat: f64, lng: f64) -> Self {
        Self {
            inner: EditSession::begin_on(overlay.inner(), target, LatLng::new(lat, lng)),
        }
    }
}

/// Bearing in degrees from a center to a point: 0 = north, 90 = east.
#[wasm_bindgen]
pub fn calculate_rotation_angle(center_lat: f64, center_lng: f64, lat: f64, lng: f64) -> f64 {
    core_rotation_angle(LatLng::new(center_lat, center_lng), LatLng::new(lat, lng))
}

/// Round an angle to the nearest multiple of `increment` (default 15 degrees).
#[wasm_bindgen]
pub fn snap_angle(angle: f64, increment: Option<f64>) -> f64 {
    core_snap_angle(angle, increment.unwrap_or(DEFAULT_SNAP_INCREMENT))
}

/// Handle positions for arbitrary bounds and rotation.
#[wasm_bindgen]
pub fn handle_layout(bounds: JsValue, rotation: f64) -> Result<JsValue, JsValue> {
    let bounds = parse_bounds(bounds)?;
    to_js(&HandleLayout::new(&bounds, rotation))
}

#[cfg(test)]
mod tests {
    use super::*;
    use groundlay_core::{LatLngBounds, OverlayOptions};

    fn overlay() -> JsGroundOverlay {
        JsGroundOverlay::from_options(OverlayOptions::new(
            "plan.png",
            LatLngBounds::from_edges(51.50, -0.13, 51.51, -0.12),
        ))
    }

    #[test]
    fn test_calculate_rotation_angle_cardinals() {
        assert!((calculate_rotation_angle(0.0, 0.0, 1.0, 0.0) - 0.0).abs() < 1e-9);
        assert!((calculate_rotation_angle(0.0, 0.0, 0.0, 1.0) - 90.0).abs() < 1e-9);
        assert!((calculate_rotation_angle(0.0, 0.0, -1.0, 0.0) - 180.0).abs() < 1e-9);
        assert!((calculate_rotation_angle(0.0, 0.0, 0.0, -1.0) - 270.0).abs() < 1e-9);
    }

    #[test]
    fn test_snap_angle_default() {
        assert_eq!(snap_angle(22.0, None), 15.0);
        assert_eq!(snap_angle(23.0, None), 30.0);
        assert_eq!(snap_angle(23.0, Some(10.0)), 20.0);
    }

    #[test]
    fn test_move_session() {
        let mut ov = overlay();
        let session = JsEditSession::begin_move(&ov, 51.505, -0.125);
        session.drag(&mut ov, 51.515, -0.125);
        let bounds = ov.inner().bounds();
        assert!((bounds.south() - 51.51).abs() < 1e-9);
        assert!((bounds.north() - 51.52).abs() < 1e-9);
        assert_eq!(bounds.west(), -0.13);
    }

    #[test]
    fn test_resize_session_anchors_north_east() {
        let mut ov = overlay();
        let session = JsEditSession::begin_resize(&ov, "sw", 51.50, -0.13)
            .unwrap_or_else(|_| panic!("sw is a valid corner"));
        session.drag(&mut ov, 51.49, -0.14);
        let bounds = ov.inner().bounds();
        assert_eq!(bounds.north(), 51.51);
        assert_eq!(bounds.east(), -0.12);
        assert_eq!(bounds.south(), 51.49);
        assert_eq!(bounds.west(), -0.14);
    }

    #[test]
    fn test_rotate_session_with_snap() {
        let mut ov = overlay();
        ov.set_rotation(10.0);
        let session = JsEditSession::begin_rotate(&ov, 51.51, -0.125, Some(15.0));
        assert_eq!(session.start_rotation(), 10.0);

        // Due east of the center, nudged north: about 84 degrees snaps to 90
        session.drag(&mut ov, 51.5059, -0.115);
        assert_eq!(ov.rotation(), 90.0);

        session.cancel(&mut ov);
        assert_eq!(ov.rotation(), 10.0);
    }
}
