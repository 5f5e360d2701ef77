//! Conversions between JavaScript values and core types.
//!
//! Plain objects and arrays cross the boundary through `serde_wasm_bindgen`;
//! failures become string `JsValue`s like the rest of the bindings.

use groundlay_core::{LatLngBounds, OverlayError, OverlayOptions};
use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;

fn from_js<T: DeserializeOwned>(value: JsValue) -> Result<T, String> {
    serde_wasm_bindgen::from_value(value).map_err(|e| e.to_string())
}

/// Parse overlay options from a JavaScript object.
pub(crate) fn parse_options(value: JsValue) -> Result<OverlayOptions, JsValue> {
    from_js(value).map_err(|e| JsValue::from_str(&OverlayError::InvalidOptions(e).to_string()))
}

/// Parse `[[south, west], [north, east]]`.
pub(crate) fn parse_bounds(value: JsValue) -> Result<LatLngBounds, JsValue> {
    from_js(value).map_err(|e| JsValue::from_str(&format!("Invalid bounds: {}", e)))
}

/// Serialize a core value into a plain JavaScript value.
pub(crate) fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}
