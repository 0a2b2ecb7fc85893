//! Invoke bridge to the native camera host.
//!
//! The host injects `window.__TAURI__.core.invoke` when it embeds this
//! frontend; in a plain browser the global is absent. Commands are looked
//! up through `Reflect` at call time instead of imported statically, so
//! the same bundle runs in both environments and absence degrades into
//! [`BridgeError::HostUnavailable`].

use js_sys::{Function, Promise, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use crate::error::BridgeError;
use crate::platform::js_message;

fn lookup(path: &[&str]) -> Option<JsValue> {
    let mut current: JsValue = js_sys::global().into();
    for key in path {
        current = Reflect::get(&current, &JsValue::from_str(key)).ok()?;
        if current.is_undefined() || current.is_null() {
            return None;
        }
    }
    Some(current)
}

/// `{}` or `{ dir: "..." }`, the only argument shape the host commands take.
fn dir_args(dir: Option<&str>) -> JsValue {
    let obj = js_sys::Object::new();
    if let Some(dir) = dir {
        let _ = Reflect::set(&obj, &JsValue::from_str("dir"), &JsValue::from_str(dir));
    }
    obj.into()
}

async fn invoke(name: &'static str, args: JsValue) -> Result<JsValue, BridgeError> {
    let invoke = lookup(&["__TAURI__", "core", "invoke"]).ok_or(BridgeError::HostUnavailable)?;
    let invoke: Function = invoke
        .dyn_into()
        .map_err(|_| BridgeError::HostUnavailable)?;
    log::debug!("invoke {name}");
    let promise: Promise = invoke
        .call2(&JsValue::NULL, &JsValue::from_str(name), &args)
        .map_err(|e| BridgeError::Command { name, message: js_message(&e) })?
        .dyn_into()
        .map_err(|_| BridgeError::Decode {
            name,
            message: String::from("invoke did not return a promise"),
        })?;
    JsFuture::from(promise)
        .await
        .map_err(|e| BridgeError::Command { name, message: js_message(&e) })
}

fn decode_string(name: &'static str, value: JsValue) -> Result<String, BridgeError> {
    value.as_string().ok_or_else(|| BridgeError::Decode {
        name,
        message: String::from("expected a string"),
    })
}

fn decode_string_list(name: &'static str, value: JsValue) -> Result<Vec<String>, BridgeError> {
    let text: String = js_sys::JSON::stringify(&value)
        .map_err(|e| BridgeError::Decode { name, message: js_message(&e) })?
        .into();
    serde_json::from_str(&text).map_err(|e| BridgeError::Decode {
        name,
        message: e.to_string(),
    })
}

/// Backend probe. Every failure mode collapses to `false`: no host, probe
/// rejection, or an honest "no camera found" all mean the browser path.
pub async fn check_rpicam() -> bool {
    match invoke("check_rpicam", dir_args(None)).await {
        Ok(value) => value.as_bool().unwrap_or(false),
        Err(err) => {
            log::info!("rpicam probe failed: {err}");
            false
        }
    }
}

pub async fn start_preview() -> Result<(), BridgeError> {
    invoke("start_preview", dir_args(None)).await.map(|_| ())
}

pub async fn stop_preview() -> Result<(), BridgeError> {
    invoke("stop_preview", dir_args(None)).await.map(|_| ())
}

/// Capture one still; resolves to the written file's path.
pub async fn capture_still(dir: Option<&str>) -> Result<String, BridgeError> {
    let value = invoke("capture_still", dir_args(dir)).await?;
    decode_string("capture_still", value)
}

/// Begin a video recording; resolves to the output file's path.
pub async fn start_video(dir: Option<&str>) -> Result<String, BridgeError> {
    let value = invoke("start_video", dir_args(dir)).await?;
    decode_string("start_video", value)
}

pub async fn stop_video() -> Result<(), BridgeError> {
    invoke("stop_video", dir_args(None)).await.map(|_| ())
}

/// Full recursive listing of the capture directory, newest first.
pub async fn list_media(dir: Option<&str>) -> Result<Vec<String>, BridgeError> {
    let value = invoke("list_media", dir_args(dir)).await?;
    decode_string_list("list_media", value)
}

/// Photo names served by the media server, newest first.
pub async fn get_photos() -> Result<Vec<String>, BridgeError> {
    let value = invoke("get_photos", dir_args(None)).await?;
    decode_string_list("get_photos", value)
}

/// Hand a file to the host platform's default application. The opener is
/// an optional host extra, resolved lazily on first use.
pub async fn open_externally(path: &str) -> Result<(), BridgeError> {
    let open = lookup(&["__TAURI__", "opener", "openPath"])
        .ok_or(BridgeError::HostUnavailable)?;
    let open: Function = open.dyn_into().map_err(|_| BridgeError::HostUnavailable)?;
    let promise: Promise = open
        .call1(&JsValue::NULL, &JsValue::from_str(path))
        .map_err(|e| BridgeError::Command { name: "openPath", message: js_message(&e) })?
        .dyn_into()
        .map_err(|_| BridgeError::Decode {
            name: "openPath",
            message: String::from("opener did not return a promise"),
        })?;
    JsFuture::from(promise)
        .await
        .map(|_| ())
        .map_err(|e| BridgeError::Command { name: "openPath", message: js_message(&e) })
}
