use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Interval;
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Event, HtmlVideoElement, MediaStream};
use yew::prelude::*;

use crate::bridge;
use crate::model::{Backend, CaptureMode, MediaItem, MediaKind};
use crate::platform::{media, snapshot};
use crate::state::session::{CaptureSession, SessionAction, SessionPhase};
use crate::state::stream::{StreamSupervisor, Verdict};
use crate::util::format_elapsed;

#[derive(Properties, PartialEq, Clone)]
pub struct CameraViewProps {
    pub session: UseReducerHandle<CaptureSession>,
}

fn start_native_preview(session: &UseReducerHandle<CaptureSession>) {
    let session = session.clone();
    spawn_local(async move {
        match bridge::start_preview().await {
            Ok(()) => session.dispatch(SessionAction::PreviewStarted),
            Err(err) => session.dispatch(SessionAction::PreviewFailed(err.to_string())),
        }
    });
}

fn start_browser_preview(
    session: &UseReducerHandle<CaptureSession>,
    video_ref: &NodeRef,
    device_stream: &Rc<RefCell<Option<MediaStream>>>,
) {
    if device_stream.borrow().is_some() {
        return;
    }
    let session = session.clone();
    let video_ref = video_ref.clone();
    let device_stream = device_stream.clone();
    spawn_local(async move {
        match media::acquire().await {
            Ok(stream) => {
                if let Some(video) = video_ref.cast::<HtmlVideoElement>() {
                    media::attach(&video, &stream);
                }
                *device_stream.borrow_mut() = Some(stream);
                session.dispatch(SessionAction::PreviewStarted);
            }
            Err(err) => session.dispatch(SessionAction::PreviewFailed(err.to_string())),
        }
    });
}

#[function_component(CameraView)]
pub fn camera_view(props: &CameraViewProps) -> Html {
    let session = props.session.clone();
    let video_ref = use_node_ref();
    let supervisor = use_mut_ref(StreamSupervisor::default);
    // Bumped whenever the stream (re)starts or stops, so a retry timer
    // from a previous viewing session cannot resurrect the image.
    let stream_epoch = use_mut_ref(|| 0u64);
    let stream_url = use_state(|| None::<String>);
    let device_stream = use_mut_ref(|| None::<MediaStream>);
    let rec_secs = use_state(|| 0u64);
    let rec_counter = use_mut_ref(|| 0u64);
    // Refreshed every render so the unmount cleanup sees the live value,
    // not the snapshot from the render that installed the effect.
    let recording_live = use_mut_ref(|| false);
    *recording_live.borrow_mut() = session.is_recording();

    let backend = session.backend;
    let phase = session.phase;

    // Preview follows the view: starts when the camera view is up and the
    // backend is known, stops when the view goes away.
    {
        let session = session.clone();
        let video_ref = video_ref.clone();
        let device_stream = device_stream.clone();
        let recording_live = recording_live.clone();
        use_effect_with(backend, move |backend| {
            match backend {
                Some(Backend::Native) => start_native_preview(&session),
                Some(Backend::Browser) => {
                    start_browser_preview(&session, &video_ref, &device_stream)
                }
                None => {}
            }
            let backend = *backend;
            move || match backend {
                Some(Backend::Native) => {
                    let recording = *recording_live.borrow();
                    spawn_local(async move {
                        if recording {
                            if let Err(err) = bridge::stop_video().await {
                                log::warn!("stop_video failed: {err}");
                            }
                        }
                        if let Err(err) = bridge::stop_preview().await {
                            log::warn!("stop_preview failed: {err}");
                        }
                    });
                    session.dispatch(SessionAction::PreviewStopped);
                }
                Some(Backend::Browser) => {
                    if let Some(video) = video_ref.cast::<HtmlVideoElement>() {
                        media::detach(&video);
                    }
                    if let Some(stream) = device_stream.borrow_mut().take() {
                        media::release(&stream);
                    }
                    session.dispatch(SessionAction::PreviewStopped);
                }
                None => {}
            }
        });
    }

    // The stream image exists only while the native preview runs. A still
    // capture keeps it up.
    {
        let supervisor = supervisor.clone();
        let stream_url = stream_url.clone();
        let stream_epoch = stream_epoch.clone();
        let active = backend == Some(Backend::Native)
            && matches!(phase, SessionPhase::Previewing | SessionPhase::Capturing);
        use_effect_with(active, move |active| {
            *stream_epoch.borrow_mut() += 1;
            if *active {
                let mut sup = supervisor.borrow_mut();
                sup.restart();
                stream_url.set(Some(sup.url()));
            } else {
                stream_url.set(None);
            }
            let stream_epoch = stream_epoch.clone();
            move || {
                *stream_epoch.borrow_mut() += 1;
            }
        });
    }

    // Recording clock.
    {
        let rec_secs = rec_secs.clone();
        let rec_counter = rec_counter.clone();
        let recording = session.is_recording();
        use_effect_with(recording, move |rec| {
            let mut ticker = None;
            if *rec {
                *rec_counter.borrow_mut() = 0;
                rec_secs.set(0);
                let rec_secs = rec_secs.clone();
                let rec_counter = rec_counter.clone();
                ticker = Some(Interval::new(1_000, move || {
                    let mut c = rec_counter.borrow_mut();
                    *c += 1;
                    rec_secs.set(*c);
                }));
            }
            move || drop(ticker)
        });
    }

    let on_stream_load = {
        let supervisor = supervisor.clone();
        Callback::from(move |_e: Event| {
            supervisor.borrow_mut().on_loaded();
        })
    };
    let on_stream_error = {
        let supervisor = supervisor.clone();
        let stream_url = stream_url.clone();
        let stream_epoch = stream_epoch.clone();
        Callback::from(move |_e: Event| {
            let verdict = supervisor.borrow_mut().on_error();
            match verdict {
                Verdict::Retry { delay_ms } => {
                    let supervisor = supervisor.clone();
                    let stream_url = stream_url.clone();
                    let stream_epoch = stream_epoch.clone();
                    let epoch = *stream_epoch.borrow();
                    spawn_local(async move {
                        TimeoutFuture::new(delay_ms).await;
                        if *stream_epoch.borrow() != epoch {
                            return;
                        }
                        let url = supervisor.borrow().url();
                        stream_url.set(Some(url));
                    });
                }
                Verdict::GiveUp => {
                    log::warn!(
                        "preview stream abandoned after {} failures",
                        supervisor.borrow().failures()
                    );
                }
            }
        })
    };

    let shutter = {
        let session = session.clone();
        let video_ref = video_ref.clone();
        Callback::from(move |_| {
            if !session.can_capture() {
                return;
            }
            match session.backend {
                Some(Backend::Native) => {
                    session.dispatch(SessionAction::CaptureBegan);
                    let session = session.clone();
                    spawn_local(async move {
                        match bridge::capture_still(None).await {
                            Ok(path) => session
                                .dispatch(SessionAction::CaptureFinished(MediaItem::native(&path))),
                            Err(err) => {
                                session.dispatch(SessionAction::CaptureFailed(err.to_string()))
                            }
                        }
                    });
                }
                Some(Backend::Browser) => {
                    session.dispatch(SessionAction::CaptureBegan);
                    let Some(video) = video_ref.cast::<HtmlVideoElement>() else {
                        session.dispatch(SessionAction::CaptureFailed(String::from(
                            "video element not ready",
                        )));
                        return;
                    };
                    let result = snapshot::take(&video).and_then(|snap| {
                        snapshot::download(&snap)?;
                        Ok(snap)
                    });
                    match result {
                        Ok(snap) => session.dispatch(SessionAction::CaptureFinished(
                            MediaItem::browser(snap.name, snap.data_url),
                        )),
                        Err(err) => session.dispatch(SessionAction::CaptureFailed(err.to_string())),
                    }
                }
                None => {}
            }
        })
    };

    let record = {
        let session = session.clone();
        Callback::from(move |_| {
            let session = session.clone();
            if session.is_recording() {
                spawn_local(async move {
                    if let Err(err) = bridge::stop_video().await {
                        session.dispatch(SessionAction::ErrorRaised(format!(
                            "stop recording: {err}"
                        )));
                    }
                    session.dispatch(SessionAction::RecordingStopped);
                });
            } else {
                // Recording only starts from a settled preview; the reducer
                // enforces the same bound.
                if session.phase != SessionPhase::Previewing {
                    return;
                }
                spawn_local(async move {
                    match bridge::start_video(None).await {
                        Ok(path) => {
                            session.dispatch(SessionAction::RecordingStarted { output: path })
                        }
                        Err(err) => session.dispatch(SessionAction::ErrorRaised(format!(
                            "start recording: {err}"
                        ))),
                    }
                });
            }
        })
    };

    let to_gallery = {
        let session = session.clone();
        Callback::from(move |_| session.dispatch(SessionAction::ModeSet(CaptureMode::Gallery)))
    };

    let Some(backend) = backend else {
        return html! {<div style="min-height:100vh; background:#010409; display:flex; align-items:center; justify-content:center; color:#8b949e; font-family:system-ui, sans-serif;">{"Looking for a camera…"}</div>};
    };

    let surface = match backend {
        Backend::Native => match (*stream_url).clone() {
            Some(url) => {
                html! {<img src={url} alt="camera preview" onload={on_stream_load} onerror={on_stream_error} style="width:100%; height:100%; object-fit:contain;" />}
            }
            None => html! {},
        },
        Backend::Browser => {
            html! {<video ref={video_ref.clone()} autoplay=true muted=true style="width:100%; height:100%; object-fit:contain;" />}
        }
    };

    let idle_overlay = if phase == SessionPhase::Idle {
        let retry = {
            let session = session.clone();
            let video_ref = video_ref.clone();
            let device_stream = device_stream.clone();
            Callback::from(move |_| match backend {
                Backend::Native => start_native_preview(&session),
                Backend::Browser => start_browser_preview(&session, &video_ref, &device_stream),
            })
        };
        let hint = match backend {
            Backend::Native => "Preview is not running",
            Backend::Browser => "Camera is not available",
        };
        html! {<div style="position:absolute; inset:0; display:flex; flex-direction:column; gap:12px; align-items:center; justify-content:center; background:rgba(1,4,9,0.7); z-index:5;">
            <span style="color:#8b949e;">{ hint }</span>
            <button onclick={retry} style="background:#238636; border:none; border-radius:6px; padding:8px 20px; color:#fff; cursor:pointer;">{"Start camera"}</button>
        </div>}
    } else {
        html! {}
    };

    let recording_badge = if session.is_recording() {
        html! {<div style="position:absolute; top:14px; right:14px; display:flex; align-items:center; gap:8px; background:rgba(22,27,34,0.8); border-radius:14px; padding:4px 12px; color:#f85149; z-index:5;">
            <span style="width:10px; height:10px; border-radius:50%; background:#f85149;"></span>
            <span style="font-variant-numeric:tabular-nums;">{ format_elapsed(*rec_secs) }</span>
        </div>}
    } else {
        html! {}
    };

    let latest = session
        .gallery
        .items()
        .iter()
        .find(|i| i.kind == MediaKind::Photo)
        .cloned();
    let thumb = match latest.and_then(|item| item.display_url(backend)) {
        Some(src) => {
            html! {<img src={src} alt="latest capture" style="width:100%; height:100%; object-fit:cover; display:block;" />}
        }
        None => html! {<span style="color:#8b949e; font-size:18px;">{"▦"}</span>},
    };

    let record_button = if backend.is_native() {
        let style = if session.is_recording() {
            "width:52px; height:52px; border-radius:50%; border:3px solid #f85149; background:#f85149; cursor:pointer;"
        } else {
            "width:52px; height:52px; border-radius:50%; border:3px solid #e6edf3; background:#0d1117; cursor:pointer;"
        };
        html! {<button onclick={record} title="record" style={style}>
            <span style={if session.is_recording() {"display:block; width:16px; height:16px; margin:auto; background:#fff;"} else {"display:block; width:16px; height:16px; margin:auto; border-radius:50%; background:#f85149;"}}></span>
        </button>}
    } else {
        html! {}
    };

    html! {<div style="position:relative; height:100vh; background:#010409; overflow:hidden; font-family:system-ui, sans-serif;">
        <div style="position:absolute; inset:0; display:flex; align-items:center; justify-content:center;">
            { surface }
        </div>
        <div style="position:absolute; top:14px; left:14px; background:rgba(22,27,34,0.8); border-radius:14px; padding:4px 12px; color:#8b949e; font-size:12px; z-index:5;">
            { backend.label() }
        </div>
        { recording_badge }
        { idle_overlay }
        <div style="position:absolute; bottom:0; left:0; right:0; display:flex; align-items:center; justify-content:center; gap:28px; padding:20px 24px; background:linear-gradient(transparent, rgba(1,4,9,0.85)); z-index:5;">
            <button onclick={to_gallery} title="gallery" style="width:48px; height:48px; padding:0; border:1px solid #30363d; border-radius:8px; overflow:hidden; background:#0d1117; cursor:pointer; display:flex; align-items:center; justify-content:center;">
                { thumb }
            </button>
            <button onclick={shutter} disabled={!session.can_capture()} title="capture" style="width:68px; height:68px; border-radius:50%; border:4px solid #e6edf3; background:#fff; cursor:pointer;"></button>
            { record_button }
        </div>
    </div>}
}
