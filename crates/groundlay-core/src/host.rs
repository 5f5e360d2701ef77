//! The seam between an overlay and the map that displays it.
//!
//! A host map calls three hooks on an overlay: attach, draw and detach. In
//! return it provides a projection for the current view and a layer (pane) to
//! put the overlay's element into. [`OverlayHost`] is that contract from the
//! overlay's side, and [`OverlayElement`] is the single screen element an
//! attached overlay owns.

use std::rc::Rc;

use crate::geo::PixelRect;
use crate::projection::Projection;

/// Callback fired when a clickable overlay is clicked.
pub type ClickHandler = Rc<dyn Fn()>;

/// Everything a host needs to build an overlay's element.
pub struct ElementSetup<'a> {
    pub image_url: &'a str,
    /// Opacity as a CSS value for the image.
    pub opacity: &'a str,
    /// Show a pointer cursor and accept pointer events.
    pub clickable: bool,
    /// Set only when the overlay is clickable and has a callback. The element
    /// must stop click propagation to the map and call this instead.
    pub on_click: Option<ClickHandler>,
}

/// A map that overlays can be attached to.
pub trait OverlayHost {
    type Projection: Projection;
    type Element: OverlayElement;

    /// The projection for the current view, or `None` if the host is not
    /// ready to project yet.
    fn projection(&self) -> Option<Self::Projection>;

    /// Build an element and put it in the overlay pane.
    ///
    /// The element is a positioned container with its transform origin at its
    /// center, holding an image that fills it. Returns `None` if the host has
    /// nowhere to put it.
    fn create_element(&self, setup: &ElementSetup<'_>) -> Option<Self::Element>;
}

/// The screen element owned by an attached overlay.
///
/// Each setter touches only its own property so mutators can update the
/// screen without rebuilding anything.
pub trait OverlayElement {
    /// Position and size of the unrotated container.
    fn set_frame(&mut self, rect: PixelRect);

    /// Container transform, e.g. `rotate(45deg)`.
    fn set_transform(&mut self, transform: &str);

    /// Opacity of the image only.
    fn set_image_opacity(&mut self, opacity: &str);

    fn set_image_url(&mut self, url: &str);

    fn set_visible(&mut self, visible: bool);

    /// Take the element out of the document and release it.
    fn remove(self);
}
