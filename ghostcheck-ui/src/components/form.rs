//! Form Components

use leptos::*;

use ghostcheck::Message;

use super::theme::{self, ButtonVariant};
use crate::state::use_app;

#[component]
pub fn Button(
    #[prop(optional)]
    variant: ButtonVariant,
    #[prop(default = "button")]
    button_type: &'static str,
    #[prop(into, default = false.into())]
    disabled: MaybeSignal<bool>,
    #[prop(optional, into)]
    on_click: Option<Callback<ev::MouseEvent>>,
    children: Children,
) -> impl IntoView {
    view! {
        <button
            type=button_type
            class=variant.class()
            disabled=move || disabled.get()
            on:click=move |ev| {
                if let Some(on_click) = on_click {
                    on_click.call(ev);
                }
            }
        >
            {children()}
        </button>
    }
}

#[component]
pub fn Label(children: Children) -> impl IntoView {
    view! { <label class=theme::LABEL>{children()}</label> }
}

/// Text input bound to a signal; `on_input` receives every edit
#[component]
pub fn Input(
    #[prop(into)]
    value: Signal<String>,
    #[prop(into)]
    on_input: Callback<String>,
    #[prop(default = "text")]
    input_type: &'static str,
    #[prop(optional)]
    placeholder: &'static str,
    #[prop(optional)]
    autocomplete: &'static str,
) -> impl IntoView {
    view! {
        <input
            type=input_type
            class=theme::FIELD
            placeholder=placeholder
            autocomplete=autocomplete
            prop:value=move || value.get()
            on:input=move |ev| on_input.call(event_target_value(&ev))
        />
    }
}

#[component]
pub fn Textarea(
    #[prop(into)]
    value: Signal<String>,
    #[prop(into)]
    on_input: Callback<String>,
    #[prop(optional)]
    placeholder: &'static str,
    #[prop(default = 10)]
    rows: u32,
) -> impl IntoView {
    view! {
        <textarea
            class=format!("{} resize-y", theme::FIELD)
            rows=rows
            placeholder=placeholder
            prop:value=move || value.get()
            on:input=move |ev| on_input.call(event_target_value(&ev))
        />
    }
}

/// Renders nothing while `message` is `None`
#[component]
pub fn ErrorBanner(
    #[prop(into)]
    message: Signal<Option<String>>,
) -> impl IntoView {
    let label = use_app().locale().text(Message::ErrorLabel);

    move || {
        message.get().map(|message| {
            view! {
                <div class=theme::DANGER_PANEL>
                    <b>{label}</b>" "{message}
                </div>
            }
        })
    }
}
