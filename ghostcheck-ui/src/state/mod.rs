//! State Management
//!
//! The app-wide context: one session, one API client, one route guard.
//! Page state lives in the view controllers and is mirrored into signals.

pub mod session;

use leptos::*;
use std::sync::Arc;

use ghostcheck::{ApiClient, Locale, RouteGuard, Session, ViewContext};

use crate::api::{self, BrowserTransport};
use session::{stored_item, BrowserNavigator, LocalStorageSession};

const LOCALE_KEY: &str = "ghostcheck_locale";

/// Shared collaborators provided to every page
#[derive(Clone)]
pub struct AppContext {
    pub ctx: ViewContext,
    pub guard: RouteGuard,
}

impl AppContext {
    pub fn locale(&self) -> Locale {
        self.ctx.locale
    }
}

/// Provide the app context to all components
pub fn provide_app_context() {
    let session = Session::new(Arc::new(LocalStorageSession));
    let api = ApiClient::new(&api::get_api_base(), Arc::new(BrowserTransport), session.clone());
    let locale = stored_item(LOCALE_KEY)
        .and_then(|l| l.parse().ok())
        .unwrap_or_default();

    provide_context(AppContext {
        ctx: ViewContext::new(api, Arc::new(BrowserNavigator), locale),
        guard: RouteGuard::new(session),
    });
}

pub fn use_app() -> AppContext {
    use_context::<AppContext>().expect("AppContext not found")
}

/// Mirror a controller's state into a signal that follows every change
pub fn mirror<S>(initial: S, subscribe: impl FnOnce(Box<dyn Fn(&S) + Send + Sync>)) -> RwSignal<S>
where
    S: Clone + Send + Sync + 'static,
{
    let signal = create_rw_signal(initial);
    subscribe(Box::new(move |state: &S| {
        // The page may be gone by the time a request finishes
        let _ = signal.try_set(state.clone());
    }));
    signal
}
