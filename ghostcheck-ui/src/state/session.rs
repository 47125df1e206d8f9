//! Browser session storage and navigation

use ghostcheck::session::TOKEN_KEY;
use ghostcheck::{Navigator, Route, SessionError, SessionStore};

fn local_storage() -> Result<web_sys::Storage, SessionError> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .ok_or_else(|| SessionError::Unavailable("localStorage is not available".to_string()))
}

/// Read a `localStorage` item, treating any failure as absent
pub fn stored_item(key: &str) -> Option<String> {
    local_storage().ok()?.get_item(key).ok().flatten()
}

/// Token slot in `localStorage` under `accessToken`
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageSession;

impl SessionStore for LocalStorageSession {
    fn load(&self) -> Option<String> {
        stored_item(TOKEN_KEY)
    }

    fn save(&self, token: &str) -> Result<(), SessionError> {
        local_storage()?
            .set_item(TOKEN_KEY, token)
            .map_err(|e| SessionError::Unavailable(format!("{:?}", e)))
    }

    fn remove(&self) -> Result<(), SessionError> {
        local_storage()?
            .remove_item(TOKEN_KEY)
            .map_err(|e| SessionError::Unavailable(format!("{:?}", e)))
    }
}

/// Full page loads, so the route guard runs again on arrival
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn navigate(&self, route: Route) {
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.location().set_href(route.path()) {
                tracing::error!(error = ?e, path = route.path(), "Navigation failed");
            }
        }
    }
}
