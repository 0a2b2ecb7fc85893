use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::camera_view::CameraView;
use super::error_banner::ErrorBanner;
use super::gallery_view::GalleryView;
use crate::bridge;
use crate::model::{Backend, CaptureMode, MediaItem, MediaKind};
use crate::state::session::{CaptureSession, SessionAction};

/// Merged host listings: the photo index from the media server plus the
/// recordings from the full media listing, both newest first. A failed
/// listing means an empty section, not an error.
pub(crate) async fn refresh_native_listing() -> Vec<MediaItem> {
    let photos = match bridge::get_photos().await {
        Ok(names) => names,
        Err(err) => {
            log::warn!("photo listing failed: {err}");
            Vec::new()
        }
    };
    let media = match bridge::list_media(None).await {
        Ok(paths) => paths,
        Err(err) => {
            log::warn!("media listing failed: {err}");
            Vec::new()
        }
    };
    let mut items: Vec<MediaItem> = photos.iter().map(|name| MediaItem::native(name)).collect();
    items.extend(
        media
            .iter()
            .map(|path| MediaItem::native(path))
            .filter(|item| item.kind == MediaKind::Clip),
    );
    items
}

#[function_component(App)]
pub fn app() -> Html {
    let session = use_reducer(CaptureSession::new);

    // One probe per session; its outcome is final.
    {
        let session = session.clone();
        use_effect_with((), move |_| {
            session.dispatch(SessionAction::ProbeStarted);
            spawn_local(async move {
                let backend = if bridge::check_rpicam().await {
                    Backend::Native
                } else {
                    Backend::Browser
                };
                log::info!("backend resolved: {}", backend.label());
                session.dispatch(SessionAction::BackendDetected(backend));
                if backend.is_native() {
                    let items = refresh_native_listing().await;
                    session.dispatch(SessionAction::Listed(items));
                }
            });
            || ()
        });
    }

    let dismiss = {
        let session = session.clone();
        Callback::from(move |_| session.dispatch(SessionAction::ErrorCleared))
    };

    let banner = match session.error.clone() {
        Some(message) => html! {<ErrorBanner message={message} on_dismiss={dismiss} />},
        None => html! {},
    };

    let content = match session.mode {
        CaptureMode::Camera => html! {<CameraView session={session.clone()} />},
        CaptureMode::Gallery => html! {<GalleryView session={session.clone()} />},
    };

    html! {<>
        { banner }
        { content }
    </>}
}
