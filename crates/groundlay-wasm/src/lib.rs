//! Groundlay WASM - WebAssembly bindings for Groundlay
//!
//! This crate puts groundlay-core overlays into a browser: a DOM-backed host
//! renders each overlay as a positioned, rotated `<img>` container inside the
//! map's overlay pane, and the editing layer drives drags from TypeScript.
//!
//! # Module Structure
//!
//! - `host` - DOM implementation of the overlay host and element
//! - `overlay` - `JsGroundOverlay`, the overlay class exposed to JavaScript
//! - `edit` - Drag sessions and rotation helpers
//! - `types` - Conversions between JavaScript values and core types
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsGroundOverlay } from '@groundlay/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const overlay = new JsGroundOverlay({
//!   image_url: '/uploads/masterplan.png',
//!   bounds: [[51.50, -0.13], [51.51, -0.12]],
//! });
//! overlay.set_map(host);
//! ```

use wasm_bindgen::prelude::*;

mod edit;
mod host;
mod overlay;
mod types;

// Re-export public types
pub use edit::{calculate_rotation_angle, handle_layout, snap_angle, JsEditSession};
pub use host::{DomElement, DomHost, DomProjection, HostProjection, MapHost};
pub use overlay::JsGroundOverlay;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
