//! App Root Component
//!
//! Routing and the session guard for the dashboard.

use leptos::*;
use leptos_router::*;

use ghostcheck::{Route as AppRoute, RouteDecision};

use crate::components::{Button, Page};
use crate::pages::{DashboardPage, LoginPage, RegisterPage};
use crate::state::{provide_app_context, use_app};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    provide_app_context();

    view! {
        <Router>
            <Routes>
                <Route path="/login" view=LoginPage />
                <Route path="/register" view=RegisterPage />
                <Route path="/" view=Root />
                <Route path="/*any" view=NotFound />
            </Routes>
        </Router>
    }
}

/// `/`: dashboard when a token is stored, otherwise off to the login page.
/// Evaluated once per render; a login elsewhere needs a full page load.
#[component]
fn Root() -> impl IntoView {
    let app = use_app();

    match app.guard.resolve(AppRoute::Dashboard.path()) {
        RouteDecision::Render(_) => view! { <DashboardPage /> }.into_view(),
        _ => view! { <Redirect path=AppRoute::Login.path() /> }.into_view(),
    }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <Page>
            <div class="flex flex-col items-center justify-center min-h-[60vh] text-center">
                <div class="text-6xl mb-4">"👻"</div>
                <h1 class="text-3xl font-bold mb-2">"Page Not Found"</h1>
                <p class="text-gray-400 mb-6">"The page you're looking for doesn't exist."</p>
                <A href="/">
                    <Button>"Go to Dashboard"</Button>
                </A>
            </div>
        </Page>
    }
}
