//! View Controllers
//!
//! Each view owns its local state (form fields, loading flag, error string)
//! and talks to the backend through the [`ApiClient`]. Renderers (the
//! browser pages, the CLI) drive the actions and read state snapshots.

pub mod dashboard;
pub mod login;
pub mod register;
mod slot;

pub use dashboard::{DashboardState, DashboardView};
pub use login::{LoginState, LoginView};
pub use register::{RegisterState, RegisterView, MIN_PASSWORD_LEN};
pub use slot::LatestSlot;

use std::sync::{Arc, Mutex, MutexGuard};

use crate::api::ApiClient;
use crate::messages::{Locale, Message};
use crate::router::Navigator;
use crate::session::Session;

/// How a view action ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Preconditions not met; nothing was sent
    Skipped,
    Completed,
    /// An error message is now showing
    Failed,
    /// A newer request of the same kind replaced this one
    Superseded,
}

/// Collaborators every view needs
#[derive(Clone)]
pub struct ViewContext {
    pub api: ApiClient,
    pub navigator: Arc<dyn Navigator>,
    pub locale: Locale,
}

impl ViewContext {
    pub fn new(api: ApiClient, navigator: Arc<dyn Navigator>, locale: Locale) -> Self {
        Self {
            api,
            navigator,
            locale,
        }
    }

    pub fn session(&self) -> &Session {
        self.api.session()
    }

    pub fn text(&self, message: Message) -> &'static str {
        self.locale.text(message)
    }
}

type Listener<S> = Arc<dyn Fn(&S) + Send + Sync>;

/// View state plus change listeners. Listeners run after the lock is released.
pub(crate) struct StateCell<S> {
    state: Mutex<S>,
    listeners: Mutex<Vec<Listener<S>>>,
}

impl<S: Clone> StateCell<S> {
    pub(crate) fn new(state: S) -> Self {
        Self {
            state: Mutex::new(state),
            listeners: Mutex::new(Vec::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, S> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub(crate) fn snapshot(&self) -> S {
        self.lock().clone()
    }

    pub(crate) fn read<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.lock())
    }

    pub(crate) fn update<R>(&self, f: impl FnOnce(&mut S) -> R) -> R {
        let (out, snapshot) = {
            let mut state = self.lock();
            let out = f(&mut state);
            (out, state.clone())
        };

        let listeners: Vec<Listener<S>> = self
            .listeners
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone();
        for listener in listeners {
            listener(&snapshot);
        }

        out
    }

    pub(crate) fn subscribe(&self, listener: impl Fn(&S) + Send + Sync + 'static) {
        self.listeners
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(Arc::new(listener));
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::api::transport::testing::ScriptedTransport;
    use crate::router::HistoryNavigator;

    pub(crate) struct Harness {
        pub transport: Arc<ScriptedTransport>,
        pub navigator: Arc<HistoryNavigator>,
        pub session: Session,
        pub ctx: ViewContext,
    }

    pub(crate) fn harness() -> Harness {
        let transport = Arc::new(ScriptedTransport::new());
        let navigator = Arc::new(HistoryNavigator::new());
        let session = Session::in_memory();
        let api = ApiClient::new("http://backend.test", transport.clone(), session.clone());
        let ctx = ViewContext::new(api, navigator.clone(), Locale::En);

        Harness {
            transport,
            navigator,
            session,
            ctx,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_state_cell_notifies_with_snapshot() {
        let cell = StateCell::new(0u32);
        let seen = Arc::new(AtomicUsize::new(0));
        let seen_clone = Arc::clone(&seen);
        cell.subscribe(move |value| {
            seen_clone.store(*value as usize, Ordering::SeqCst);
        });

        let returned = cell.update(|v| {
            *v = 7;
            "done"
        });
        assert_eq!(returned, "done");
        assert_eq!(seen.load(Ordering::SeqCst), 7);
        assert_eq!(cell.snapshot(), 7);
        assert_eq!(cell.read(|v| *v + 1), 8);
    }

    #[test]
    fn test_listener_may_read_state() {
        let cell = Arc::new(StateCell::new(String::new()));
        let inner = Arc::clone(&cell);
        let len = Arc::new(AtomicUsize::new(0));
        let len_clone = Arc::clone(&len);
        cell.subscribe(move |_| {
            // Lock must already be released here
            len_clone.store(inner.snapshot().len(), Ordering::SeqCst);
        });

        cell.update(|s| s.push_str("abc"));
        assert_eq!(len.load(Ordering::SeqCst), 3);
    }
}
