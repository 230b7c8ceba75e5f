use crate::core::connection::ConnectionState;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct NavbarProps {
    pub switch_on: bool,
    pub connection: ConnectionState,
    pub on_toggle_theme: Callback<()>,
    pub on_open_settings: Callback<()>,
}

#[function_component(Navbar)]
pub(crate) fn navbar(props: &NavbarProps) -> Html {
    let on_toggle = {
        let on_toggle_theme = props.on_toggle_theme.clone();
        Callback::from(move |_: Event| on_toggle_theme.emit(()))
    };
    let on_settings = {
        let on_open_settings = props.on_open_settings.clone();
        Callback::from(move |_| on_open_settings.emit(()))
    };

    html! {
        <nav class="navbar bg-body-tertiary mb-3">
            <div class="container-fluid">
                <span class="navbar-brand">{"BookBounty"}</span>
                <div class="d-flex align-items-center gap-3">
                    <span class={classes!("badge", props.connection.badge_class())}>
                        {props.connection.label()}
                    </span>
                    <div class="form-check form-switch mb-0">
                        <input
                            class="form-check-input"
                            type="checkbox"
                            role="switch"
                            id="themeSwitch"
                            checked={props.switch_on}
                            onchange={on_toggle}
                        />
                        <label class="form-check-label" for="themeSwitch">{"Dark mode"}</label>
                    </div>
                    <button type="button" class="btn btn-outline-secondary btn-sm" onclick={on_settings}>
                        {"Settings"}
                    </button>
                </div>
            </div>
        </nav>
    }
}
