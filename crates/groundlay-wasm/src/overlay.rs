//! Ground overlay WASM bindings.
//!
//! [`JsGroundOverlay`] wraps the core overlay with a DOM host. The host map
//! calls `set_map` when the overlay is added or removed and `draw` whenever
//! its view changes; the editing layer calls the setters.
//!
//! # Example (TypeScript)
//!
//! ```typescript
//! const overlay = new JsGroundOverlay(
//!   {
//!     id: 'plan-7',
//!     image_url: '/uploads/masterplan.png',
//!     bounds: [[51.50, -0.13], [51.51, -0.12]],
//!     opacity: 0.7,
//!     clickable: true,
//!   },
//!   () => openOverlayPanel('plan-7'),
//! );
//!
//! overlay.set_map(host);
//! map.addListener('bounds_changed', () => overlay.draw());
//! overlay.set_rotation(45);
//! ```

use std::rc::Rc;

use crate::host::{DomHost, MapHost};
use crate::types::{parse_bounds, parse_options, to_js};
use groundlay_core::{ClickHandler, HandleLayout, OverlayOptions, RotatableOverlay};
use wasm_bindgen::prelude::*;
use web_sys::console;

/// Wrap a JavaScript click callback. Exceptions it throws are logged and
/// never reach the DOM listener.
fn click_handler(callback: js_sys::Function) -> ClickHandler {
    Rc::new(move || {
        if let Err(err) = callback.call0(&JsValue::NULL) {
            console::error_2(&JsValue::from_str("groundlay: click handler threw"), &err);
        }
    })
}

/// A rotatable image overlay for JavaScript.
#[wasm_bindgen]
pub struct JsGroundOverlay {
    inner: RotatableOverlay<DomHost>,
}

#[wasm_bindgen]
impl JsGroundOverlay {
    /// Create an overlay from an options object.
    ///
    /// `image_url` and `bounds` are required; `id`, `rotation`, `opacity`,
    /// `clickable` and `visible` are optional. `on_click` only fires for
    /// clickable overlays, and clicks it handles do not reach the map.
    #[wasm_bindgen(constructor)]
    pub fn new(
        options: JsValue,
        on_click: Option<js_sys::Function>,
    ) -> Result<JsGroundOverlay, JsValue> {
        let options = parse_options(options)?;
        let mut overlay = Self::from_options(options);
        if let Some(callback) = on_click {
            overlay.inner = overlay.inner.with_click_handler(click_handler(callback));
        }
        Ok(overlay)
    }

    /// Attach to a host map, or detach with `null`.
    pub fn set_map(&mut self, host: Option<MapHost>) {
        self.inner.set_map(host.map(DomHost::new));
    }

    /// Reposition for the host's current view.
    pub fn draw(&mut self) {
        self.inner.draw();
    }

    /// Replace the bounds with `[[south, west], [north, east]]`.
    pub fn set_bounds(&mut self, bounds: JsValue) -> Result<(), JsValue> {
        let bounds = parse_bounds(bounds)?;
        self.inner.set_bounds(bounds);
        Ok(())
    }

    pub fn set_rotation(&mut self, angle_degrees: f64) {
        self.inner.set_rotation(angle_degrees);
    }

    pub fn set_opacity(&mut self, opacity: f64) {
        self.inner.set_opacity(opacity);
    }

    pub fn set_image_url(&mut self, url: String) {
        self.inner.set_image_url(url);
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.inner.set_visible(visible);
    }

    /// Current bounds as `[[south, west], [north, east]]`.
    pub fn get_bounds(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.bounds())
    }

    /// Center of the unrotated bounds as `[lat, lng]`.
    pub fn get_center(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.center())
    }

    /// Persistent state for the host to store.
    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.snapshot())
    }

    /// Positions of the corner and rotation handles for the current state.
    pub fn handles(&self) -> Result<JsValue, JsValue> {
        to_js(&HandleLayout::new(&self.inner.bounds(), self.inner.rotation()))
    }

    #[wasm_bindgen(getter)]
    pub fn id(&self) -> String {
        self.inner.id().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn rotation(&self) -> f64 {
        self.inner.rotation()
    }

    #[wasm_bindgen(getter)]
    pub fn opacity(&self) -> f64 {
        self.inner.opacity()
    }

    #[wasm_bindgen(getter)]
    pub fn image_url(&self) -> String {
        self.inner.image_url().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn visible(&self) -> bool {
        self.inner.is_visible()
    }

    #[wasm_bindgen(getter)]
    pub fn clickable(&self) -> bool {
        self.inner.is_clickable()
    }

    #[wasm_bindgen(getter)]
    pub fn attached(&self) -> bool {
        self.inner.is_attached()
    }
}

impl JsGroundOverlay {
    /// Build from already-parsed options, without a click callback.
    pub(crate) fn from_options(options: OverlayOptions) -> Self {
        Self {
            inner: RotatableOverlay::new(options),
        }
    }

    pub(crate) fn inner(&self) -> &RotatableOverlay<DomHost> {
        &self.inner
    }

    pub(crate) fn inner_mut(&mut self) -> &mut RotatableOverlay<DomHost> {
        &mut self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use groundlay_core::LatLngBounds;

    fn overlay() -> JsGroundOverlay {
        let mut options = OverlayOptions::new(
            "plan.png",
            LatLngBounds::from_edges(51.50, -0.13, 51.51, -0.12),
        );
        options.opacity = 0.7;
        JsGroundOverlay::from_options(options)
    }

    #[test]
    fn test_detached_setters_do_not_panic() {
        let mut ov = overlay();
        ov.draw();
        ov.set_rotation(45.0);
        ov.set_opacity(0.3);
        ov.set_image_url("next.png".to_string());
        ov.set_visible(false);
        assert!(!ov.attached());
        assert!(!ov.clickable());
        assert_eq!(ov.rotation(), 45.0);
        assert_eq!(ov.opacity(), 0.3);
        assert_eq!(ov.image_url(), "next.png");
        assert!(!ov.visible());
    }

    #[test]
    fn test_rotation_wraps() {
        let mut ov = overlay();
        ov.set_rotation(-45.0);
        assert_eq!(ov.rotation(), 315.0);
    }
}
