//! WebAssembly bindings.

use wasm_bindgen::prelude::*;

use crate::api::{handle, Request};
use crate::distance::haversine_km;
use crate::models::Location;

fn js_error(message: impl std::fmt::Display) -> JsValue {
    JsValue::from(js_sys::Error::new(&message.to_string()))
}

/// Executes a request object (`{ op: "...", ... }`) and returns its result.
///
/// Throws a JS `Error` for malformed requests and planning errors.
#[wasm_bindgen(js_name = handleRequest)]
pub fn handle_request(request: JsValue) -> Result<JsValue, JsValue> {
    let request: Request = serde_wasm_bindgen::from_value(request).map_err(js_error)?;
    let response = handle(request).map_err(js_error)?;
    serde_wasm_bindgen::to_value(&response).map_err(JsValue::from)
}

/// Great-circle distance in km between two points.
#[wasm_bindgen(js_name = distanceKm)]
pub fn distance_km(from_lat: f64, from_lng: f64, to_lat: f64, to_lng: f64) -> f64 {
    haversine_km(Location::new(from_lat, from_lng), Location::new(to_lat, to_lng))
}
