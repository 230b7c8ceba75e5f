use crate::core::ui::{TOAST_AUTOHIDE_MS, TOAST_FADE_MS};
use crate::features::toasts::state::{Toast, ToastPhase};
use gloo::timers::callback::Timeout;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct ToastHostProps {
    pub toasts: Vec<Toast>,
    /// Start hiding a toast.
    pub on_hide: Callback<u64>,
    /// Drop a toast once its fade has finished.
    pub on_remove: Callback<u64>,
}

#[function_component(ToastHost)]
pub(crate) fn toast_host(props: &ToastHostProps) -> Html {
    html! {
        <div class="toast-container position-fixed bottom-0 end-0 p-3" aria-live="polite" aria-atomic="true">
            {for props.toasts.iter().map(|toast| html! {
                <ToastCard
                    key={toast.id}
                    toast={toast.clone()}
                    on_hide={props.on_hide.clone()}
                    on_remove={props.on_remove.clone()}
                />
            })}
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct ToastCardProps {
    toast: Toast,
    on_hide: Callback<u64>,
    on_remove: Callback<u64>,
}

/// One toast. Auto-hides after a fixed delay and removes itself after the
/// fade; timers are per card so new arrivals do not restart them.
#[function_component(ToastCard)]
fn toast_card(props: &ToastCardProps) -> Html {
    let id = props.toast.id;
    {
        let on_hide = props.on_hide.clone();
        let on_remove = props.on_remove.clone();
        use_effect_with_deps(
            move |phase: &ToastPhase| {
                let handle = match phase {
                    ToastPhase::Shown => Timeout::new(TOAST_AUTOHIDE_MS, move || on_hide.emit(id)),
                    ToastPhase::Hiding => Timeout::new(TOAST_FADE_MS, move || on_remove.emit(id)),
                };
                move || drop(handle)
            },
            props.toast.phase,
        );
    }

    let on_close = {
        let on_hide = props.on_hide.clone();
        Callback::from(move |_| on_hide.emit(id))
    };
    let class = classes!(
        "toast",
        "fade",
        (props.toast.phase == ToastPhase::Shown).then_some("show")
    );

    html! {
        <div class={class} role="alert" aria-live="assertive" aria-atomic="true">
            <div class="toast-header">
                <strong class="me-auto">{props.toast.title.clone()}</strong>
                <small class="text-body-secondary">{props.toast.timestamp.clone()}</small>
                <button type="button" class="btn-close" aria-label="Close" onclick={on_close}></button>
            </div>
            <div class="toast-body">{props.toast.message.clone()}</div>
        </div>
    }
}
