//! Job progress card.

use crate::components::progress::Progress;
use crate::features::job::state::JobState;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct JobPanelProps {
    pub state: JobState,
    pub on_stop: Callback<()>,
    pub on_reset: Callback<()>,
}

#[function_component(JobPanel)]
pub(crate) fn job_panel(props: &JobPanelProps) -> Html {
    let state = &props.state;
    let on_stop = {
        let on_stop = props.on_stop.clone();
        Callback::from(move |_| on_stop.emit(()))
    };
    let on_reset = {
        let on_reset = props.on_reset.clone();
        Callback::from(move |_| on_reset.emit(()))
    };
    let status = state
        .status
        .as_ref()
        .map_or_else(String::new, |status| status.label().to_string());

    html! {
        <section class="card mb-3">
            <div class="card-header d-flex align-items-center gap-2">
                <span class="me-auto fw-semibold">{"Download progress"}</span>
                <span class="text-body-secondary small">{status}</span>
                <button type="button" class="btn btn-warning btn-sm" onclick={on_stop}>{"Stop"}</button>
                <button type="button" class="btn btn-secondary btn-sm" onclick={on_reset}>{"Reset"}</button>
            </div>
            <div class="card-body">
                <Progress bar={state.bar} class="mb-3" />
                if let Some(message) = state.message.clone() {
                    <p class="small mb-2">{message}</p>
                }
                <table class="table table-sm mb-0">
                    <thead>
                        <tr><th scope="col">{"Item"}</th><th scope="col">{"Status"}</th></tr>
                    </thead>
                    <tbody>
                        {for state.rows.iter().map(|row| html! {
                            <tr><td>{row.label.clone()}</td><td>{row.status.clone()}</td></tr>
                        })}
                    </tbody>
                </table>
            </div>
        </section>
    }
}
