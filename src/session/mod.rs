//! Session Store
//!
//! Holds the single bearer token the client persists. The token is opaque:
//! it is written on login, cleared on logout and read on every route
//! decision and every API call. It is never verified or refreshed locally.

#[cfg(feature = "native")]
mod file;

#[cfg(feature = "native")]
pub use file::FileSessionStore;

use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Storage key used by the browser client for the token slot
pub const TOKEN_KEY: &str = "accessToken";

/// A single persistent key-value slot for the access token
pub trait SessionStore: Send + Sync {
    /// Read the stored token, if any
    fn load(&self) -> Option<String>;

    /// Replace the stored token
    fn save(&self, token: &str) -> Result<(), SessionError>;

    /// Remove the stored token
    fn remove(&self) -> Result<(), SessionError>;
}

/// Errors raised by a session backend
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Session storage unavailable: {0}")]
    Unavailable(String),

    #[error("Failed to write session to {path}: {error}")]
    Write { path: String, error: String },

    #[error("Failed to remove session at {path}: {error}")]
    Remove { path: String, error: String },
}

/// Session context shared by the API client, route guard and views
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn SessionStore>,
}

impl Session {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Session backed by process memory only
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemorySessionStore::default()))
    }

    /// Store a new token
    pub fn set(&self, token: &str) -> Result<(), SessionError> {
        self.store.save(token)?;
        tracing::debug!("Session token stored");
        Ok(())
    }

    /// Current token, or an empty string when none is stored
    pub fn get(&self) -> String {
        self.store.load().unwrap_or_default()
    }

    /// Forget the stored token
    pub fn clear(&self) -> Result<(), SessionError> {
        self.store.remove()?;
        tracing::debug!("Session token cleared");
        Ok(())
    }

    /// True when a non-blank token is stored
    pub fn is_authenticated(&self) -> bool {
        !self.get().trim().is_empty()
    }

    /// Token to attach as a bearer credential, if authenticated
    pub fn bearer(&self) -> Option<String> {
        let token = self.get();
        if token.trim().is_empty() {
            None
        } else {
            Some(token)
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

/// In-memory token slot
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    token: Mutex<Option<String>>,
}

impl MemorySessionStore {
    pub fn with_token(token: &str) -> Self {
        Self {
            token: Mutex::new(Some(token.to_string())),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Option<String> {
        self.token
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn save(&self, token: &str) -> Result<(), SessionError> {
        *self
            .token
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(token.to_string());
        Ok(())
    }

    fn remove(&self) -> Result<(), SessionError> {
        *self
            .token
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
        Ok(())
    }
}
