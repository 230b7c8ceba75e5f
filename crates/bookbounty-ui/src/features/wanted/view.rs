//! Wanted-list card.

use crate::components::checkbox::Checkbox;
use crate::features::wanted::state::WantedState;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct WantedPanelProps {
    pub state: WantedState,
    /// Submit button disabled while the selection is being queued.
    pub submitting: bool,
    pub on_fetch: Callback<()>,
    pub on_stop: Callback<()>,
    pub on_reset: Callback<()>,
    pub on_toggle_all: Callback<bool>,
    pub on_toggle_item: Callback<(usize, bool)>,
    pub on_submit: Callback<()>,
}

#[function_component(WantedPanel)]
pub(crate) fn wanted_panel(props: &WantedPanelProps) -> Html {
    let state = &props.state;
    let click = |callback: &Callback<()>| {
        let callback = callback.clone();
        Callback::from(move |_: MouseEvent| callback.emit(()))
    };

    html! {
        <section class="card mb-3">
            <div class="card-header d-flex align-items-center gap-2">
                <span class="me-auto fw-semibold">{"Readarr wanted list"}</span>
                <div class={classes!("spinner-border", "spinner-border-sm", (!state.busy).then_some("d-none"))} role="status">
                    <span class="visually-hidden">{"Loading..."}</span>
                </div>
                <button type="button" class="btn btn-primary btn-sm" disabled={state.busy} onclick={click(&props.on_fetch)}>
                    {"Get wanted"}
                </button>
                <button type="button" class="btn btn-warning btn-sm" onclick={click(&props.on_stop)}>{"Stop"}</button>
                <button type="button" class="btn btn-secondary btn-sm" onclick={click(&props.on_reset)}>{"Reset"}</button>
            </div>
            <div class="card-body">
                if state.select_all_visible {
                    <Checkbox
                        id="select-all"
                        label="Select all"
                        class="mb-2 fw-semibold"
                        checked={state.select_all}
                        onchange={props.on_toggle_all.clone()}
                    />
                }
                <div class="wanted-list">
                    {for state.items.iter().enumerate().map(|(index, item)| {
                        let on_toggle_item = props.on_toggle_item.clone();
                        html! {
                            <Checkbox
                                key={index}
                                id={format!("wanted-{index}")}
                                label={item.label.clone()}
                                checked={item.checked}
                                onchange={Callback::from(move |checked| on_toggle_item.emit((index, checked)))}
                            />
                        }
                    })}
                </div>
                if let Some(line) = state.status_line.clone() {
                    <p class="text-danger small mt-2 mb-0">{line}</p>
                }
            </div>
            <div class="card-footer">
                <button type="button" class="btn btn-success btn-sm" disabled={props.submitting} onclick={click(&props.on_submit)}>
                    {"Add selected to download list"}
                </button>
            </div>
        </section>
    }
}
