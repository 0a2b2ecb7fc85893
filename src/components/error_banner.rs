use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ErrorBannerProps {
    pub message: String,
    pub on_dismiss: Callback<()>,
}

/// Fixed banner for failures the user must see. Stays up until dismissed
/// or replaced by the next error.
#[function_component(ErrorBanner)]
pub fn error_banner(props: &ErrorBannerProps) -> Html {
    let dismiss = {
        let cb = props.on_dismiss.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {<div style="position:fixed; top:12px; left:50%; transform:translateX(-50%); z-index:40; background:rgba(22,27,34,0.95); border:1px solid #f85149; border-radius:8px; padding:10px 14px; display:flex; gap:12px; align-items:center; color:#f85149; max-width:80vw;">
        <span style="overflow:hidden; text-overflow:ellipsis; white-space:nowrap;">{ props.message.clone() }</span>
        <button onclick={dismiss} style="background:none; border:none; color:#f85149; cursor:pointer; font-size:16px;">{"×"}</button>
    </div>}
}
