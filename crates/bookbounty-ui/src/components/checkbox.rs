use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct CheckboxProps {
    pub id: AttrValue,
    pub label: AttrValue,
    #[prop_or_default]
    pub checked: bool,
    #[prop_or_default]
    pub disabled: bool,
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub onchange: Callback<bool>,
}

#[function_component(Checkbox)]
pub(crate) fn checkbox(props: &CheckboxProps) -> Html {
    let onchange = {
        let onchange = props.onchange.clone();
        Callback::from(move |event: Event| {
            if let Some(input) = event.target_dyn_into::<web_sys::HtmlInputElement>() {
                onchange.emit(input.checked());
            }
        })
    };

    html! {
        <div class={classes!("form-check", props.class.clone())}>
            <input
                type="checkbox"
                class="form-check-input"
                id={props.id.clone()}
                disabled={props.disabled}
                checked={props.checked}
                onchange={onchange}
            />
            <label class="form-check-label" for={props.id.clone()}>{props.label.clone()}</label>
        </div>
    }
}
