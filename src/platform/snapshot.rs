//! Still-frame extraction from a live `<video>` element.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlAnchorElement, HtmlCanvasElement, HtmlVideoElement};

use crate::constants::capture;
use crate::error::MediaError;
use crate::platform::js_message;
use crate::util::capture_file_name_now;

/// One encoded still, named after its local capture time.
pub struct Snapshot {
    pub name: String,
    pub data_url: String,
}

/// Draw the current video frame onto an offscreen canvas at the video's
/// native resolution and encode it as JPEG. A video that has not produced
/// a frame yet reports zero dimensions and is rejected.
pub fn take(video: &HtmlVideoElement) -> Result<Snapshot, MediaError> {
    let width = video.video_width();
    let height = video.video_height();
    if width == 0 || height == 0 {
        return Err(MediaError::NoFrame);
    }

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or(MediaError::Unsupported)?;
    let canvas: HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|e| MediaError::Encode(js_message(&e)))?
        .dyn_into()
        .map_err(|_| MediaError::Encode(String::from("canvas element type")))?;
    canvas.set_width(width);
    canvas.set_height(height);

    let context = canvas
        .get_context("2d")
        .map_err(|e| MediaError::Encode(js_message(&e)))?
        .ok_or_else(|| MediaError::Encode(String::from("2d context unavailable")))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| MediaError::Encode(String::from("2d context type")))?;
    context
        .draw_image_with_html_video_element(video, 0.0, 0.0)
        .map_err(|e| MediaError::Encode(js_message(&e)))?;

    let data_url = canvas
        .to_data_url_with_type_and_encoder_options(
            "image/jpeg",
            &JsValue::from_f64(capture::JPEG_QUALITY),
        )
        .map_err(|e| MediaError::Encode(js_message(&e)))?;

    Ok(Snapshot {
        name: capture_file_name_now(),
        data_url,
    })
}

/// Hand the snapshot to the browser's download pipeline through a
/// transient anchor element.
pub fn download(snapshot: &Snapshot) -> Result<(), MediaError> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or(MediaError::Unsupported)?;
    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(|e| MediaError::Encode(js_message(&e)))?
        .dyn_into()
        .map_err(|_| MediaError::Encode(String::from("anchor element type")))?;
    anchor.set_href(&snapshot.data_url);
    anchor.set_download(&snapshot.name);
    anchor.click();
    Ok(())
}
