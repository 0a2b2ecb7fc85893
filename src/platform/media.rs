//! Camera acquisition through the browser's media-device stack.

use js_sys::Reflect;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlVideoElement, MediaStream, MediaStreamConstraints};

use crate::constants::capture;
use crate::error::MediaError;
use crate::platform::js_message;

fn ideal(value: u32) -> JsValue {
    let obj = js_sys::Object::new();
    let _ = Reflect::set(
        &obj,
        &JsValue::from_str("ideal"),
        &JsValue::from_f64(f64::from(value)),
    );
    obj.into()
}

/// `{ width: { ideal }, height: { ideal }, facingMode }`. Resolution is a
/// hint, the rear-camera preference a soft constraint. The device decides.
fn video_constraints() -> JsValue {
    let video = js_sys::Object::new();
    let _ = Reflect::set(
        &video,
        &JsValue::from_str("width"),
        &ideal(capture::IDEAL_WIDTH),
    );
    let _ = Reflect::set(
        &video,
        &JsValue::from_str("height"),
        &ideal(capture::IDEAL_HEIGHT),
    );
    let _ = Reflect::set(
        &video,
        &JsValue::from_str("facingMode"),
        &JsValue::from_str(capture::FACING_MODE),
    );
    video.into()
}

/// Ask the browser for a camera stream. Fails loudly; the caller decides
/// how to surface it (this is the manual-retry error path).
pub async fn acquire() -> Result<MediaStream, MediaError> {
    let window = web_sys::window().ok_or(MediaError::Unsupported)?;
    let devices = window
        .navigator()
        .media_devices()
        .map_err(|_| MediaError::Unsupported)?;
    let constraints = MediaStreamConstraints::new();
    constraints.set_video(&video_constraints());
    let pending = devices
        .get_user_media_with_constraints(&constraints)
        .map_err(|e| MediaError::Acquire(js_message(&e)))?;
    let stream = JsFuture::from(pending)
        .await
        .map_err(|e| MediaError::Acquire(js_message(&e)))?;
    stream
        .dyn_into::<MediaStream>()
        .map_err(|_| MediaError::Acquire(String::from("no media stream returned")))
}

pub fn attach(video: &HtmlVideoElement, stream: &MediaStream) {
    // Autoplay needs the muted property; the markup attribute stops
    // applying once the element is live. playsInline keeps iOS from
    // hijacking the preview into a fullscreen player.
    video.set_muted(true);
    // web-sys has no binding for playsInline; set the property directly.
    let _ = Reflect::set(
        video,
        &JsValue::from_str("playsInline"),
        &JsValue::from_bool(true),
    );
    video.set_src_object(Some(stream));
}

pub fn detach(video: &HtmlVideoElement) {
    video.set_src_object(None);
}

/// Stop every track so the camera light goes out immediately.
pub fn release(stream: &MediaStream) {
    for track in stream.get_tracks().iter() {
        if let Ok(track) = track.dyn_into::<web_sys::MediaStreamTrack>() {
            track.stop();
        }
    }
}
