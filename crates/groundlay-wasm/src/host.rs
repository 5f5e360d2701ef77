//! DOM implementation of the overlay host.
//!
//! The JavaScript side hands us a host object shaped like the map library's
//! overlay view: it can return the current projection and the pane overlays
//! live in. Either may be missing (the map has not been laid out yet), and a
//! call into the host may throw; both cases are treated as "nothing to do".
//!
//! The map library's projection takes a `LatLng` object, so the host wraps
//! it to accept two numbers:
//!
//! ```typescript
//! const host: GroundlayHost = {
//!   getProjection: () => {
//!     const p = view.getProjection();
//!     return p && {
//!       fromLatLngToDivPixel: (lat, lng) =>
//!         p.fromLatLngToDivPixel(new google.maps.LatLng(lat, lng)),
//!     };
//!   },
//!   getOverlayPane: () => view.getPanes()?.overlayMouseTarget ?? null,
//! };
//! overlay.set_map(host);
//! ```

use groundlay_core::style;
use groundlay_core::{
    ElementSetup, LatLng, OverlayElement, OverlayHost, PixelPoint, PixelRect, Projection,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{console, Element, Event, HtmlElement, HtmlImageElement};

#[wasm_bindgen(typescript_custom_section)]
const HOST_TYPES: &str = r#"
export interface GroundlayProjection {
  fromLatLngToDivPixel(lat: number, lng: number): { x: number; y: number } | null;
}

export interface GroundlayHost {
  getProjection(): GroundlayProjection | null;
  getOverlayPane(): HTMLElement | null;
}
"#;

#[wasm_bindgen]
extern "C" {
    /// Host map object supplied from JavaScript.
    #[wasm_bindgen(typescript_type = "GroundlayHost")]
    #[derive(Clone)]
    pub type MapHost;

    #[wasm_bindgen(method, catch, js_name = getProjection)]
    fn get_projection(this: &MapHost) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method, catch, js_name = getOverlayPane)]
    fn get_overlay_pane(this: &MapHost) -> Result<JsValue, JsValue>;

    /// Projection object returned by the host for the current view.
    #[wasm_bindgen(typescript_type = "GroundlayProjection")]
    pub type HostProjection;

    #[wasm_bindgen(method, catch, js_name = fromLatLngToDivPixel)]
    fn from_lat_lng_to_div_pixel(
        this: &HostProjection,
        lat: f64,
        lng: f64,
    ) -> Result<JsValue, JsValue>;
}

fn is_missing(value: &JsValue) -> bool {
    value.is_null() || value.is_undefined()
}

/// Projection borrowed from the host for a single redraw.
pub struct DomProjection(HostProjection);

impl Projection for DomProjection {
    fn project(&self, point: LatLng) -> Option<PixelPoint> {
        let value = self.0.from_lat_lng_to_div_pixel(point.lat, point.lng).ok()?;
        if is_missing(&value) {
            return None;
        }
        serde_wasm_bindgen::from_value(value).ok()
    }
}

/// [`OverlayHost`] backed by a JavaScript host object and the real DOM.
#[derive(Clone)]
pub struct DomHost {
    map: MapHost,
}

impl DomHost {
    pub fn new(map: MapHost) -> Self {
        Self { map }
    }
}

impl OverlayHost for DomHost {
    type Projection = DomProjection;
    type Element = DomElement;

    fn projection(&self) -> Option<DomProjection> {
        let value = self.map.get_projection().ok()?;
        if is_missing(&value) {
            return None;
        }
        Some(DomProjection(value.unchecked_into()))
    }

    fn create_element(&self, setup: &ElementSetup<'_>) -> Option<DomElement> {
        let pane = self
            .map
            .get_overlay_pane()
            .ok()
            .and_then(|value| value.dyn_into::<Element>().ok());
        let Some(pane) = pane else {
            console::warn_1(&JsValue::from_str(
                "groundlay: host has no overlay pane, overlay not attached",
            ));
            return None;
        };
        DomElement::build(&pane, setup)
    }
}

fn set_style(element: &HtmlElement, name: &str, value: &str) {
    let _ = element.style().set_property(name, value);
}

/// A positioned container holding one `<img>`.
pub struct DomElement {
    container: HtmlElement,
    image: HtmlImageElement,
    click: Option<Closure<dyn FnMut(Event)>>,
}

impl DomElement {
    fn build(pane: &Element, setup: &ElementSetup<'_>) -> Option<Self> {
        let document = pane.owner_document()?;
        let container: HtmlElement = document.create_element("div").ok()?.dyn_into().ok()?;
        let image: HtmlImageElement = document.create_element("img").ok()?.dyn_into().ok()?;

        set_style(&container, "position", "absolute");
        set_style(&container, "transform-origin", style::TRANSFORM_ORIGIN);
        if setup.clickable {
            set_style(&container, "cursor", "pointer");
            set_style(&container, "pointer-events", "auto");
        } else {
            set_style(&container, "pointer-events", "none");
        }

        image.set_src(setup.image_url);
        image.set_draggable(false);
        let image_el: &HtmlElement = image.as_ref();
        set_style(image_el, "position", "absolute");
        set_style(image_el, "left", "0");
        set_style(image_el, "top", "0");
        set_style(image_el, "width", "100%");
        set_style(image_el, "height", "100%");
        set_style(image_el, "opacity", setup.opacity);
        container.append_child(&image).ok()?;

        let click = setup.on_click.clone().map(|handler| {
            Closure::<dyn FnMut(Event)>::new(move |event: Event| {
                event.stop_propagation();
                handler();
            })
        });
        if let Some(closure) = &click {
            container
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
                .ok()?;
        }

        pane.append_child(&container).ok()?;
        Some(Self {
            container,
            image,
            click,
        })
    }

    fn image_element(&self) -> &HtmlElement {
        self.image.as_ref()
    }
}

impl OverlayElement for DomElement {
    fn set_frame(&mut self, rect: PixelRect) {
        set_style(&self.container, "left", &style::px(rect.left));
        set_style(&self.container, "top", &style::px(rect.top));
        set_style(&self.container, "width", &style::px(rect.width));
        set_style(&self.container, "height", &style::px(rect.height));
    }

    fn set_transform(&mut self, transform: &str) {
        set_style(&self.container, "transform", transform);
    }

    fn set_image_opacity(&mut self, opacity: &str) {
        set_style(self.image_element(), "opacity", opacity);
    }

    fn set_image_url(&mut self, url: &str) {
        self.image.set_src(url);
    }

    fn set_visible(&mut self, visible: bool) {
        if visible {
            let _ = self.container.style().remove_property("display");
        } else {
            set_style(&self.container, "display", "none");
        }
    }

    fn remove(self) {
        if let Some(closure) = &self.click {
            let _ = self
                .container
                .remove_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        }
        self.container.remove();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_clone<T: Clone>() {}

    #[test]
    fn test_host_handles_are_clone() {
        // One map object may back several overlays
        assert_clone::<MapHost>();
        assert_clone::<DomHost>();
    }
}
