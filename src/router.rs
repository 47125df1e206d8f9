//! Routing
//!
//! Three routes; the root route is gated on the session. The guard is a
//! one-shot evaluation: callers re-resolve on every navigation.

use std::sync::Mutex;

use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    Dashboard,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Register => "/register",
            Route::Dashboard => "/",
        }
    }

    /// Match a path, ignoring query string, fragment and trailing slashes
    pub fn from_path(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" => Some(Route::Dashboard),
            "/login" => Some(Route::Login),
            "/register" => Some(Route::Register),
            _ => None,
        }
    }
}

/// Result of resolving a path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    Render(Route),
    Redirect(Route),
    NotFound,
}

/// Gates the dashboard behind an authenticated session
#[derive(Debug, Clone)]
pub struct RouteGuard {
    session: Session,
}

impl RouteGuard {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    pub fn resolve(&self, path: &str) -> RouteDecision {
        match Route::from_path(path) {
            Some(Route::Dashboard) if !self.session.is_authenticated() => {
                tracing::debug!("No session; redirecting to login");
                RouteDecision::Redirect(Route::Login)
            }
            Some(route) => RouteDecision::Render(route),
            None => RouteDecision::NotFound,
        }
    }
}

/// Performs full navigations (page loads, not in-app route changes)
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// Navigator that only records where it was sent
#[derive(Debug, Default)]
pub struct HistoryNavigator {
    visited: Mutex<Vec<Route>>,
}

impl HistoryNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visited(&self) -> Vec<Route> {
        self.visited
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn last(&self) -> Option<Route> {
        self.visited().last().copied()
    }
}

impl Navigator for HistoryNavigator {
    fn navigate(&self, route: Route) {
        tracing::debug!(path = route.path(), "Navigating");
        self.visited
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(route);
    }
}
