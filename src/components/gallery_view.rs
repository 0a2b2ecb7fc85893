use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::app::refresh_native_listing;
use super::image_viewer::ImageViewer;
use crate::bridge;
use crate::model::{Backend, CaptureMode, MediaItem, MediaKind};
use crate::state::session::{CaptureSession, SessionAction};

#[derive(Properties, PartialEq, Clone)]
pub struct GalleryViewProps {
    pub session: UseReducerHandle<CaptureSession>,
}

fn open_button(session: &UseReducerHandle<CaptureSession>, item: &MediaItem) -> Html {
    let Some(path) = item.path.clone() else {
        return html! {};
    };
    let session = session.clone();
    let open = Callback::from(move |_| {
        let session = session.clone();
        let path = path.clone();
        spawn_local(async move {
            if let Err(err) = bridge::open_externally(&path).await {
                session.dispatch(SessionAction::ErrorRaised(format!(
                    "could not open {path}: {err}"
                )));
            }
        });
    });
    html! {<button onclick={open} style="background:#21262d; border:1px solid #30363d; border-radius:6px; padding:6px 12px; color:#e6edf3; cursor:pointer;">{"Open externally"}</button>}
}

#[function_component(GalleryView)]
pub fn gallery_view(props: &GalleryViewProps) -> Html {
    let session = props.session.clone();
    let info_open = use_state(|| false);

    // Entering the gallery re-reads the host listings; the browser list
    // only ever grows through capture.
    {
        let session = session.clone();
        use_effect_with((), move |_| {
            if session.backend == Some(Backend::Native) {
                let session = session.clone();
                spawn_local(async move {
                    let items = refresh_native_listing().await;
                    session.dispatch(SessionAction::Listed(items));
                });
            }
            || ()
        });
    }

    let Some(backend) = session.backend else {
        return html! {};
    };

    let back = {
        let session = session.clone();
        Callback::from(move |_| session.dispatch(SessionAction::ModeSet(CaptureMode::Camera)))
    };

    let photos: Vec<MediaItem> = session
        .gallery
        .items()
        .iter()
        .filter(|i| i.kind == MediaKind::Photo)
        .cloned()
        .collect();
    let clips: Vec<MediaItem> = session
        .gallery
        .items()
        .iter()
        .filter(|i| i.kind == MediaKind::Clip)
        .cloned()
        .collect();

    let thumbs = photos
        .iter()
        .map(|item| {
            let select = {
                let session = session.clone();
                let id = item.id.clone();
                Callback::from(move |_| session.dispatch(SessionAction::Selected(id.clone())))
            };
            let body = match item.display_url(backend) {
                Some(src) => html! {<img src={src} alt={item.id.clone()} loading="lazy" style="width:100%; height:100%; object-fit:cover; display:block;" />},
                None => html! {<span>{"?"}</span>},
            };
            html! {<button key={item.id.clone()} onclick={select} style="aspect-ratio:1; padding:0; border:1px solid #30363d; border-radius:6px; overflow:hidden; background:#0d1117; cursor:pointer;">{ body }</button>}
        })
        .collect::<Html>();

    let recordings = if clips.is_empty() {
        html! {}
    } else {
        let rows = clips
            .iter()
            .map(|item| {
                html! {<div key={item.id.clone()} style="display:flex; justify-content:space-between; align-items:center; padding:8px 12px; border:1px solid #30363d; border-radius:6px; background:#161b22;">
                    <span style="overflow:hidden; text-overflow:ellipsis; white-space:nowrap;">{ format!("🎬 {}", item.id) }</span>
                    { open_button(&session, item) }
                </div>}
            })
            .collect::<Html>();
        html! {<div style="display:flex; flex-direction:column; gap:8px; margin-top:20px;">
            <span style="color:#8b949e; font-size:13px;">{"Recordings"}</span>
            { rows }
        </div>}
    };

    let overlay = if let Some(item) = session.gallery.selected() {
        let item = item.clone();
        let close = {
            let session = session.clone();
            let info_open = info_open.clone();
            Callback::from(move |_| {
                info_open.set(false);
                session.dispatch(SessionAction::SelectionCleared);
            })
        };
        match (item.kind, item.display_url(backend)) {
            (MediaKind::Photo, Some(src)) => {
                let on_prev = {
                    let session = session.clone();
                    Callback::from(move |_| session.dispatch(SessionAction::PrevItem))
                };
                let on_next = {
                    let session = session.clone();
                    Callback::from(move |_| session.dispatch(SessionAction::NextItem))
                };
                let on_info = {
                    let info_open = info_open.clone();
                    Callback::from(move |_| info_open.set(!*info_open))
                };
                let info_panel = if *info_open {
                    let close_info = {
                        let info_open = info_open.clone();
                        Callback::from(move |_| info_open.set(false))
                    };
                    let location = item.path.clone().unwrap_or_else(|| match backend {
                        Backend::Native => String::from("served from the camera host"),
                        Backend::Browser => String::from("captured this session (download only)"),
                    });
                    html! {<div style="position:fixed; bottom:0; left:0; right:0; z-index:35; background:#161b22; border-top:1px solid #30363d; padding:16px; display:flex; flex-direction:column; gap:8px; color:#e6edf3;">
                        <div style="display:flex; justify-content:space-between; align-items:center;">
                            <span style="font-weight:600;">{ item.id.clone() }</span>
                            <button onclick={close_info} style="background:none; border:none; color:#8b949e; cursor:pointer; font-size:16px;">{"×"}</button>
                        </div>
                        <span style="color:#8b949e; font-size:13px;">{ location }</span>
                        { open_button(&session, &item) }
                    </div>}
                } else {
                    html! {}
                };
                html! {<>
                    <ImageViewer
                        src={src}
                        title={item.id.clone()}
                        can_prev={session.gallery.has_prev()}
                        can_next={session.gallery.has_next()}
                        on_prev={on_prev}
                        on_next={on_next}
                        on_info={on_info}
                        on_close={close}
                    />
                    { info_panel }
                </>}
            }
            _ => {
                let close = Callback::from(move |_| close.emit(()));
                html! {<div style="position:fixed; inset:0; z-index:30; background:#010409; display:flex; flex-direction:column; align-items:center; justify-content:center; gap:16px; color:#e6edf3;">
                    <span style="font-size:40px;">{"🎬"}</span>
                    <span>{ item.id.clone() }</span>
                    { open_button(&session, &item) }
                    <button onclick={close} style="background:none; border:1px solid #30363d; border-radius:6px; padding:6px 16px; color:#8b949e; cursor:pointer;">{"Close"}</button>
                </div>}
            },
        }
    } else {
        html! {}
    };

    let empty = photos.is_empty() && clips.is_empty();

    html! {<div style="min-height:100vh; background:#0d1117; color:#e6edf3; font-family:system-ui, sans-serif;">
        <div style="display:flex; align-items:center; gap:12px; padding:12px 16px; border-bottom:1px solid #30363d; position:sticky; top:0; background:#0d1117; z-index:10;">
            <button onclick={back} style="background:none; border:none; color:#e6edf3; cursor:pointer; font-size:18px;">{"←"}</button>
            <span style="font-weight:600;">{"Gallery"}</span>
            <span style="color:#8b949e; font-size:13px;">{ format!("{} items", session.gallery.len()) }</span>
        </div>
        <div style="padding:16px;">
            {
                if empty {
                    html! {<div style="text-align:center; color:#8b949e; padding:48px 0;">{"No captures yet"}</div>}
                } else {
                    html! {<>
                        <div style="display:grid; grid-template-columns:repeat(auto-fill, minmax(110px, 1fr)); gap:8px;">
                            { thumbs }
                        </div>
                        { recordings }
                    </>}
                }
            }
        </div>
        { overlay }
    </div>}
}
