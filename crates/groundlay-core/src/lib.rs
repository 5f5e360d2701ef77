//! Groundlay Core - rotatable ground overlays for web maps
//!
//! This crate holds everything about a ground overlay that does not depend on
//! a browser: the geographic and pixel geometry, the projection seam, bearing
//! math, the overlay's attach/draw/detach state, and the move/resize/rotate
//! editing protocol. `groundlay-wasm` plugs it into the DOM.
//!
//! # Module Structure
//!
//! - `geo` - Points, bounding boxes, corners and pixel rectangles
//! - `projection` - The [`Projection`] trait and a standalone Web Mercator
//! - `rotation` - Bearing, snapping and rotate-about-center helpers
//! - `host` - The [`OverlayHost`] / [`OverlayElement`] traits a map implements
//! - `overlay` - [`RotatableOverlay`] itself
//! - `handles` - Display positions of the editing handles
//! - `edit` - Drag sessions for move, corner resize and rotate

pub mod edit;
pub mod error;
pub mod geo;
pub mod handles;
pub mod host;
pub mod overlay;
pub mod projection;
pub mod rotation;
pub mod style;

pub use edit::{DragTarget, EditSession, EditStep, OverlayChange};
pub use error::OverlayError;
pub use geo::{Corner, LatLng, LatLngBounds, PixelPoint, PixelRect};
pub use handles::HandleLayout;
pub use host::{ClickHandler, ElementSetup, OverlayElement, OverlayHost};
pub use overlay::{OverlayId, OverlayOptions, OverlaySnapshot, RotatableOverlay};
pub use projection::{project_bounds, Projection, WebMercator};
pub use rotation::{calculate_rotation_angle, snap_angle, DEFAULT_SNAP_INCREMENT};
