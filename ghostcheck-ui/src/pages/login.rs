//! Login Page

use leptos::*;
use std::rc::Rc;

use ghostcheck::{LoginView, Route};

use crate::components::{AuthShell, Button, ButtonVariant, ErrorBanner, Input, Label};
use crate::components::theme;
use crate::state::{mirror, use_app};

#[component]
pub fn LoginPage() -> impl IntoView {
    let app = use_app();
    let controller = Rc::new(LoginView::new(app.ctx.clone()));
    let state = mirror(controller.state(), |listener| controller.subscribe(listener));

    let on_submit = {
        let controller = Rc::clone(&controller);
        move |ev: ev::SubmitEvent| {
            ev.prevent_default();
            let controller = Rc::clone(&controller);
            spawn_local(async move {
                controller.submit().await;
            });
        }
    };
    let on_email = {
        let controller = Rc::clone(&controller);
        move |email: String| controller.set_email(&email)
    };
    let on_password = {
        let controller = Rc::clone(&controller);
        move |password: String| controller.set_password(&password)
    };
    let navigator = app.ctx.navigator.clone();

    let hint = view! {
        <div class="opacity-75">
            "No account yet? "<a href=Route::Register.path() class=theme::LINK>"Register"</a>
        </div>
    }
    .into_view();

    view! {
        <AuthShell title="Login" subtitle="Sign in to your account" hint=hint>
            <ErrorBanner message=Signal::derive(move || state.with(|s| s.error.clone())) />

            <form on:submit=on_submit class="flex flex-col gap-3">
                <div>
                    <Label>"Email"</Label>
                    <Input
                        value=Signal::derive(move || state.with(|s| s.email.clone()))
                        on_input=on_email
                        placeholder="kadak@example.com"
                        autocomplete="email"
                    />
                </div>

                <div>
                    <Label>"Password"</Label>
                    <Input
                        value=Signal::derive(move || state.with(|s| s.password.clone()))
                        on_input=on_password
                        input_type="password"
                        placeholder="••••••••"
                        autocomplete="current-password"
                    />
                </div>

                <div class="flex gap-2.5 mt-1.5">
                    <Button
                        button_type="submit"
                        disabled=Signal::derive(move || !state.with(|s| s.can_submit()))
                    >
                        {move || if state.with(|s| s.loading) { "Logging in..." } else { "Login" }}
                    </Button>
                    <Button
                        variant=ButtonVariant::Ghost
                        disabled=Signal::derive(move || state.with(|s| s.loading))
                        on_click=move |_: ev::MouseEvent| navigator.navigate(Route::Register)
                    >
                        "Register →"
                    </Button>
                </div>
            </form>
        </AuthShell>
    }
}
