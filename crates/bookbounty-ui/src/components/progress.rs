use crate::features::job::state::ProgressBar;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct ProgressProps {
    pub bar: ProgressBar,
    #[prop_or_default]
    pub class: Classes,
}

/// Striped Bootstrap progress bar with a single tone class.
#[function_component(Progress)]
pub(crate) fn progress(props: &ProgressProps) -> Html {
    let bar = props.bar;
    html! {
        <div class={classes!("progress", props.class.clone())}>
            <div
                class={classes!(bar.classes())}
                role="progressbar"
                style={bar.width_style()}
                aria-valuenow={bar.aria_value()}
                aria-valuemin="0"
                aria-valuemax="100"
            ></div>
        </div>
    }
}
