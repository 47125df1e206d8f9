//! Backend access from the browser
//!
//! The analyzer base URL can be overridden per browser through
//! `localStorage` (`ghostcheck_api_url`); the request logic itself is the
//! shared [`ghostcheck::ApiClient`].

pub mod transport;

pub use transport::BrowserTransport;

use ghostcheck::DEFAULT_API_BASE;

use crate::state::session::stored_item;

const API_URL_KEY: &str = "ghostcheck_api_url";

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    normalize_base(stored_item(API_URL_KEY).as_deref())
}

/// Blank overrides fall back to the default; trailing slashes are dropped
fn normalize_base(stored: Option<&str>) -> String {
    let url = stored
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .unwrap_or(DEFAULT_API_BASE);
    url.trim_end_matches('/').to_string()
}
