//! Settings modal view.

use crate::components::modal::Modal;
use crate::features::settings::state::SettingsState;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct SettingsModalProps {
    pub state: SettingsState,
    pub on_close: Callback<()>,
    pub on_edit: Callback<(&'static str, String)>,
    pub on_save: Callback<()>,
}

#[function_component(SettingsModal)]
pub(crate) fn settings_modal(props: &SettingsModalProps) -> Html {
    let state = &props.state;
    let on_save = {
        let on_save = props.on_save.clone();
        Callback::from(move |_| on_save.emit(()))
    };
    let footer = html! {
        <>
            if state.notice_visible() {
                <span class="text-success me-auto">{"Settings saved"}</span>
            }
            <button type="button" class="btn btn-primary" onclick={on_save}>{"Save"}</button>
        </>
    };

    html! {
        <Modal title="Settings" open={state.open} on_close={props.on_close.clone()} footer={footer}>
            if state.loading {
                <div class="spinner-border spinner-border-sm mb-2" role="status">
                    <span class="visually-hidden">{"Loading..."}</span>
                </div>
            }
            {for state.fields.iter().map(|field| {
                let key = field.key;
                let on_edit = props.on_edit.clone();
                let oninput = Callback::from(move |event: InputEvent| {
                    if let Some(input) = event.target_dyn_into::<web_sys::HtmlInputElement>() {
                        on_edit.emit((key, input.value()));
                    }
                });
                html! {
                    <div class="mb-3" key={key}>
                        <label class="form-label" for={key}>{field.label}</label>
                        <input class="form-control" type="text" id={key} value={field.value.clone()} oninput={oninput} />
                    </div>
                }
            })}
        </Modal>
    }
}
