use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{HtmlElement, MouseEvent, TouchEvent, TouchList, WheelEvent};
use yew::prelude::*;

use crate::state::viewer::{GestureEngine, SwipeAction, Transform, touch_distance};

#[derive(Properties, PartialEq, Clone)]
pub struct ImageViewerProps {
    pub src: String,
    pub title: String,
    pub can_prev: bool,
    pub can_next: bool,
    pub on_prev: Callback<()>,
    pub on_next: Callback<()>,
    pub on_info: Callback<()>,
    pub on_close: Callback<()>,
}

fn pinch_span(touches: &TouchList) -> Option<f64> {
    let a = touches.item(0)?;
    let b = touches.item(1)?;
    Some(touch_distance(
        a.client_x() as f64,
        a.client_y() as f64,
        b.client_x() as f64,
        b.client_y() as f64,
    ))
}

/// Fullscreen photo viewer. Pinch (or wheel) zooms, dragging pans once
/// zoomed in, and at rest scale a released drag past the threshold turns
/// into prev/next/info navigation.
#[function_component(ImageViewer)]
pub fn image_viewer(props: &ImageViewerProps) -> Html {
    let surface_ref = use_node_ref();
    let engine = use_mut_ref(GestureEngine::new);
    // (transform, animate) actually applied to the element.
    let view = use_state_eq(|| (Transform::default(), true));

    // A new image starts from the neutral transform.
    {
        let engine = engine.clone();
        let view = view.clone();
        use_effect_with(props.src.clone(), move |_| {
            engine.borrow_mut().reset();
            view.set((Transform::default(), true));
            || ()
        });
    }

    {
        let engine = engine.clone();
        let view = view.clone();
        let surface_ref = surface_ref.clone();
        let on_prev = props.on_prev.clone();
        let on_next = props.on_next.clone();
        let on_info = props.on_info.clone();
        use_effect_with((), move |_| -> Box<dyn FnOnce()> {
            let Some(surface) = surface_ref.cast::<HtmlElement>() else {
                return Box::new(|| {});
            };

            let publish = {
                let engine = engine.clone();
                let view = view.clone();
                move || {
                    let engine = engine.borrow();
                    view.set((engine.transform(), engine.animate()));
                }
            };
            // Release shared by mouseup, mouseleave and last-finger-up.
            let finish = {
                let engine = engine.clone();
                let publish = publish.clone();
                move || {
                    let action = engine.borrow_mut().pointer_up();
                    publish();
                    match action {
                        Some(SwipeAction::Next) => on_next.emit(()),
                        Some(SwipeAction::Prev) => on_prev.emit(()),
                        Some(SwipeAction::Info) => on_info.emit(()),
                        None => {}
                    }
                }
            };

            let mousedown_cb = {
                let engine = engine.clone();
                let publish = publish.clone();
                Closure::wrap(Box::new(move |e: MouseEvent| {
                    e.prevent_default();
                    engine
                        .borrow_mut()
                        .pointer_down(e.client_x() as f64, e.client_y() as f64);
                    publish();
                }) as Box<dyn FnMut(_)>)
            };
            let mousemove_cb = {
                let engine = engine.clone();
                let publish = publish.clone();
                Closure::wrap(Box::new(move |e: MouseEvent| {
                    engine
                        .borrow_mut()
                        .pointer_move(e.client_x() as f64, e.client_y() as f64);
                    publish();
                }) as Box<dyn FnMut(_)>)
            };
            let mouseup_cb = {
                let finish = finish.clone();
                Closure::wrap(Box::new(move |_e: MouseEvent| {
                    finish();
                }) as Box<dyn FnMut(_)>)
            };
            let wheel_cb = {
                let engine = engine.clone();
                let publish = publish.clone();
                Closure::wrap(Box::new(move |e: WheelEvent| {
                    e.prevent_default();
                    engine.borrow_mut().wheel(e.delta_y());
                    publish();
                }) as Box<dyn FnMut(_)>)
            };
            let touch_start_cb = {
                let engine = engine.clone();
                let publish = publish.clone();
                Closure::wrap(Box::new(move |e: TouchEvent| {
                    e.prevent_default();
                    let touches = e.touches();
                    if touches.length() >= 2 {
                        if let Some(span) = pinch_span(&touches) {
                            engine.borrow_mut().pinch_begin(span);
                        }
                    } else if let Some(t0) = touches.item(0) {
                        engine
                            .borrow_mut()
                            .pointer_down(t0.client_x() as f64, t0.client_y() as f64);
                    }
                    publish();
                }) as Box<dyn FnMut(_)>)
            };
            let touch_move_cb = {
                let engine = engine.clone();
                let publish = publish.clone();
                Closure::wrap(Box::new(move |e: TouchEvent| {
                    e.prevent_default();
                    let touches = e.touches();
                    if touches.length() >= 2 {
                        if let Some(span) = pinch_span(&touches) {
                            engine.borrow_mut().pinch_move(span);
                        }
                    } else if let Some(t0) = touches.item(0) {
                        engine
                            .borrow_mut()
                            .pointer_move(t0.client_x() as f64, t0.client_y() as f64);
                    }
                    publish();
                }) as Box<dyn FnMut(_)>)
            };
            let touch_end_cb = {
                let engine = engine.clone();
                let publish = publish.clone();
                Closure::wrap(Box::new(move |e: TouchEvent| {
                    e.prevent_default();
                    let remaining = e.touches().length();
                    if remaining < 2 {
                        engine.borrow_mut().pinch_end();
                    }
                    if remaining == 0 {
                        finish();
                    } else {
                        publish();
                    }
                }) as Box<dyn FnMut(_)>)
            };

            surface
                .add_event_listener_with_callback(
                    "mousedown",
                    mousedown_cb.as_ref().unchecked_ref(),
                )
                .ok();
            surface
                .add_event_listener_with_callback(
                    "mousemove",
                    mousemove_cb.as_ref().unchecked_ref(),
                )
                .ok();
            surface
                .add_event_listener_with_callback("mouseup", mouseup_cb.as_ref().unchecked_ref())
                .ok();
            surface
                .add_event_listener_with_callback("mouseleave", mouseup_cb.as_ref().unchecked_ref())
                .ok();
            surface
                .add_event_listener_with_callback("wheel", wheel_cb.as_ref().unchecked_ref())
                .ok();
            surface
                .add_event_listener_with_callback(
                    "touchstart",
                    touch_start_cb.as_ref().unchecked_ref(),
                )
                .ok();
            surface
                .add_event_listener_with_callback(
                    "touchmove",
                    touch_move_cb.as_ref().unchecked_ref(),
                )
                .ok();
            surface
                .add_event_listener_with_callback("touchend", touch_end_cb.as_ref().unchecked_ref())
                .ok();
            surface
                .add_event_listener_with_callback(
                    "touchcancel",
                    touch_end_cb.as_ref().unchecked_ref(),
                )
                .ok();

            Box::new(move || {
                let _ = surface.remove_event_listener_with_callback(
                    "mousedown",
                    mousedown_cb.as_ref().unchecked_ref(),
                );
                let _ = surface.remove_event_listener_with_callback(
                    "mousemove",
                    mousemove_cb.as_ref().unchecked_ref(),
                );
                let _ = surface.remove_event_listener_with_callback(
                    "mouseup",
                    mouseup_cb.as_ref().unchecked_ref(),
                );
                let _ = surface.remove_event_listener_with_callback(
                    "mouseleave",
                    mouseup_cb.as_ref().unchecked_ref(),
                );
                let _ = surface.remove_event_listener_with_callback(
                    "wheel",
                    wheel_cb.as_ref().unchecked_ref(),
                );
                let _ = surface.remove_event_listener_with_callback(
                    "touchstart",
                    touch_start_cb.as_ref().unchecked_ref(),
                );
                let _ = surface.remove_event_listener_with_callback(
                    "touchmove",
                    touch_move_cb.as_ref().unchecked_ref(),
                );
                let _ = surface.remove_event_listener_with_callback(
                    "touchend",
                    touch_end_cb.as_ref().unchecked_ref(),
                );
                let _ = surface.remove_event_listener_with_callback(
                    "touchcancel",
                    touch_end_cb.as_ref().unchecked_ref(),
                );
            })
        });
    }

    let (transform, animate) = *view;
    let transition = if animate { "transform 0.25s ease" } else { "none" };
    let img_style = format!(
        "max-width:100%; max-height:100%; transform:translate({}px, {}px) scale({}); transition:{}; user-select:none; -webkit-user-drag:none; pointer-events:none;",
        transform.x, transform.y, transform.scale, transition
    );

    let close = {
        let cb = props.on_close.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let prev = {
        let cb = props.on_prev.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let next = {
        let cb = props.on_next.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let info = {
        let cb = props.on_info.clone();
        Callback::from(move |_| cb.emit(()))
    };

    let nav_style = "position:absolute; top:50%; transform:translateY(-50%); background:rgba(22,27,34,0.8); border:1px solid #30363d; border-radius:50%; width:40px; height:40px; color:#e6edf3; cursor:pointer; font-size:18px;";

    html! {<div style="position:fixed; inset:0; background:#010409; z-index:30;">
        <div ref={surface_ref} style="position:absolute; inset:0; display:flex; align-items:center; justify-content:center; overflow:hidden; touch-action:none; cursor:grab;">
            <img src={props.src.clone()} alt={props.title.clone()} style={img_style} />
        </div>
        <div style="position:absolute; top:0; left:0; right:0; padding:10px 14px; display:flex; justify-content:space-between; align-items:center; background:linear-gradient(rgba(1,4,9,0.8), transparent); color:#e6edf3;">
            <span style="font-size:14px;">{ props.title.clone() }</span>
            <button onclick={close} style="background:none; border:none; color:#e6edf3; cursor:pointer; font-size:22px;">{"×"}</button>
        </div>
        <button onclick={prev} disabled={!props.can_prev} style={format!("{} left:12px;", nav_style)}>{"‹"}</button>
        <button onclick={next} disabled={!props.can_next} style={format!("{} right:12px;", nav_style)}>{"›"}</button>
        <button onclick={info} style="position:absolute; bottom:16px; left:50%; transform:translateX(-50%); background:rgba(22,27,34,0.8); border:1px solid #30363d; border-radius:16px; padding:6px 16px; color:#e6edf3; cursor:pointer;">{"Info"}</button>
    </div>}
}
