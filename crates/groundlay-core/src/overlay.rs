//! Rotatable ground overlay.
//!
//! An image anchored to a geographic box, drawn on a host map and rotated
//! around its own center. The stored box is always the unrotated one;
//! rotation only ever reaches the screen as a CSS transform.
//!
//! # Lifecycle
//!
//! 1. Construct from [`OverlayOptions`]; nothing is rendered yet
//! 2. [`RotatableOverlay::set_map`] with a host builds the element and draws
//! 3. The host calls [`RotatableOverlay::draw`] on every pan or zoom
//! 4. [`RotatableOverlay::set_map`] with `None` removes the element
//!
//! Every method is a no-op when there is nothing to draw on, so callers never
//! need to check whether the host is ready.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geo::{LatLng, LatLngBounds};
use crate::host::{ClickHandler, ElementSetup, OverlayElement, OverlayHost};
use crate::projection::project_bounds;
use crate::rotation::normalize_angle;
use crate::style;

/// Host-chosen identity of an overlay, typically the owning record's key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OverlayId(pub String);

impl fmt::Display for OverlayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OverlayId {
    fn from(s: &str) -> Self {
        OverlayId(s.to_string())
    }
}

fn default_opacity() -> f64 {
    1.0
}

fn default_visible() -> bool {
    true
}

/// Construction options, usually deserialized from a JavaScript object.
///
/// Only `image_url` and `bounds` are required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayOptions {
    #[serde(default)]
    pub id: OverlayId,
    pub image_url: String,
    pub bounds: LatLngBounds,
    /// Degrees, clockwise from north
    #[serde(default)]
    pub rotation: f64,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    #[serde(default)]
    pub clickable: bool,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

impl OverlayOptions {
    pub fn new(image_url: impl Into<String>, bounds: LatLngBounds) -> Self {
        Self {
            id: OverlayId::default(),
            image_url: image_url.into(),
            bounds,
            rotation: 0.0,
            opacity: default_opacity(),
            clickable: false,
            visible: default_visible(),
        }
    }
}

/// Persistent state of an overlay, reported upward for the host to store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlaySnapshot {
    pub id: OverlayId,
    pub image_url: String,
    pub bounds: LatLngBounds,
    pub rotation: f64,
    pub opacity: f64,
    pub visible: bool,
}

impl From<OverlaySnapshot> for OverlayOptions {
    fn from(s: OverlaySnapshot) -> Self {
        OverlayOptions {
            id: s.id,
            image_url: s.image_url,
            bounds: s.bounds,
            rotation: s.rotation,
            opacity: s.opacity,
            clickable: false,
            visible: s.visible,
        }
    }
}

fn clamp_opacity(value: f64) -> f64 {
    if value.is_nan() {
        return 1.0;
    }
    value.clamp(0.0, 1.0)
}

/// The host an overlay is attached to, together with the element it owns there.
struct Attachment<H: OverlayHost> {
    host: H,
    element: H::Element,
}

/// An image overlay with geographic bounds, rotation and opacity.
pub struct RotatableOverlay<H: OverlayHost> {
    id: OverlayId,
    image_url: String,
    bounds: LatLngBounds,
    rotation: f64,
    opacity: f64,
    visible: bool,
    clickable: bool,
    on_click: Option<ClickHandler>,
    attachment: Option<Attachment<H>>,
}

impl<H: OverlayHost> RotatableOverlay<H> {
    /// Create a detached overlay. Rotation is wrapped into `[0, 360)` and
    /// opacity clamped into `[0, 1]`.
    pub fn new(options: OverlayOptions) -> Self {
        Self {
            id: options.id,
            image_url: options.image_url,
            bounds: options.bounds,
            rotation: normalize_angle(options.rotation),
            opacity: clamp_opacity(options.opacity),
            visible: options.visible,
            clickable: options.clickable,
            on_click: None,
            attachment: None,
        }
    }

    /// Set the callback for clicks on a clickable overlay.
    ///
    /// Takes effect on the next attach.
    pub fn with_click_handler(mut self, handler: ClickHandler) -> Self {
        self.on_click = Some(handler);
        self
    }

    /// Attach to a host, or detach with `None`.
    ///
    /// Attaching while already attached removes the old element first, so an
    /// overlay never has more than one element on screen. If the host cannot
    /// provide a pane the overlay stays detached.
    pub fn set_map(&mut self, host: Option<H>) {
        if let Some(previous) = self.attachment.take() {
            previous.element.remove();
        }
        let Some(host) = host else {
            return;
        };

        let opacity = style::opacity(self.opacity);
        let setup = ElementSetup {
            image_url: &self.image_url,
            opacity: &opacity,
            clickable: self.clickable,
            on_click: if self.clickable {
                self.on_click.clone()
            } else {
                None
            },
        };
        let Some(mut element) = host.create_element(&setup) else {
            return;
        };
        element.set_visible(self.visible);
        self.attachment = Some(Attachment { host, element });
        self.draw();
    }

    pub fn is_attached(&self) -> bool {
        self.attachment.is_some()
    }

    /// Reposition the element for the host's current view.
    ///
    /// Places the unrotated pixel rectangle of the bounds, rotates it around
    /// its center and reapplies visibility. Skipped silently when detached or
    /// when the host cannot project yet.
    pub fn draw(&mut self) {
        let Some(attachment) = self.attachment.as_mut() else {
            return;
        };
        let Some(projection) = attachment.host.projection() else {
            return;
        };
        let Some(rect) = project_bounds(&projection, &self.bounds) else {
            return;
        };
        attachment.element.set_frame(rect);
        attachment.element.set_transform(&style::rotate(self.rotation));
        attachment.element.set_visible(self.visible);
    }

    /// Replace the bounds and redraw.
    pub fn set_bounds(&mut self, bounds: LatLngBounds) {
        self.bounds = bounds;
        self.draw();
    }

    /// Replace the rotation. Only the transform is touched; position and size
    /// stay as they are.
    pub fn set_rotation(&mut self, angle_degrees: f64) {
        self.rotation = normalize_angle(angle_degrees);
        if let Some(attachment) = self.attachment.as_mut() {
            attachment
                .element
                .set_transform(&style::rotate(self.rotation));
        }
    }

    /// Replace the image opacity, clamped into `[0, 1]`.
    pub fn set_opacity(&mut self, opacity: f64) {
        self.opacity = clamp_opacity(opacity);
        if let Some(attachment) = self.attachment.as_mut() {
            attachment
                .element
                .set_image_opacity(&style::opacity(self.opacity));
        }
    }

    /// Swap the image source in place.
    pub fn set_image_url(&mut self, url: impl Into<String>) {
        self.image_url = url.into();
        if let Some(attachment) = self.attachment.as_mut() {
            attachment.element.set_image_url(&self.image_url);
        }
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        if let Some(attachment) = self.attachment.as_mut() {
            attachment.element.set_visible(visible);
        }
    }

    pub fn id(&self) -> &OverlayId {
        &self.id
    }

    pub fn bounds(&self) -> LatLngBounds {
        self.bounds
    }

    /// Rotation in degrees, in `[0, 360)`.
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_clickable(&self) -> bool {
        self.clickable
    }

    /// Midpoint of the unrotated bounds; rotation does not move it.
    pub fn center(&self) -> LatLng {
        self.bounds.center()
    }

    pub fn snapshot(&self) -> OverlaySnapshot {
        OverlaySnapshot {
            id: self.id.clone(),
            image_url: self.image_url.clone(),
            bounds: self.bounds,
            rotation: self.rotation,
            opacity: self.opacity,
            visible: self.visible,
        }
    }
}

impl<H: OverlayHost> fmt::Debug for RotatableOverlay<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RotatableOverlay")
            .field("id", &self.id)
            .field("image_url", &self.image_url)
            .field("bounds", &self.bounds)
            .field("rotation", &self.rotation)
            .field("opacity", &self.opacity)
            .field("visible", &self.visible)
            .field("clickable", &self.clickable)
            .field("attached", &self.is_attached())
            .finish()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::host::mock::MockHost;
    use proptest::prelude::*;

    proptest! {
        /// Property: rotating never changes the stored bounds or the center.
        #[test]
        fn prop_center_invariant_under_rotation(
            south in -60.0f64..60.0,
            west in -170.0f64..170.0,
            h in 0.0001f64..1.0,
            w in 0.0001f64..1.0,
            angle in -720.0f64..720.0,
        ) {
            let bounds = LatLngBounds::from_edges(south, west, south + h, west + w);
            let mut ov: RotatableOverlay<MockHost> =
                RotatableOverlay::new(OverlayOptions::new("x.png", bounds));
            let center = ov.center();
            ov.set_map(Some(MockHost::new()));
            ov.set_rotation(angle);
            prop_assert_eq!(ov.center(), center);
            prop_assert_eq!(ov.bounds(), bounds);
        }

        /// Property: the stored rotation is always in [0, 360).
        #[test]
        fn prop_rotation_in_range(angle in -1.0e6f64..1.0e6) {
            let mut ov: RotatableOverlay<MockHost> = RotatableOverlay::new(OverlayOptions::new(
                "x.png",
                LatLngBounds::from_edges(0.0, 0.0, 1.0, 1.0),
            ));
            ov.set_rotation(angle);
            prop_assert!((0.0..360.0).contains(&ov.rotation()));
        }
    }
}
