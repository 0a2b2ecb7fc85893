//! Direct browser API adapters: device acquisition and still extraction.

pub mod media;
pub mod snapshot;

use wasm_bindgen::JsValue;

/// Human-readable text from a thrown JS value.
pub(crate) fn js_message(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    js_sys::Reflect::get(value, &JsValue::from_str("message"))
        .ok()
        .and_then(|m| m.as_string())
        .unwrap_or_else(|| String::from("unknown error"))
}
