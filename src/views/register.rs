//! Register View

use serde::Serialize;

use super::{ActionOutcome, StateCell, ViewContext};
use crate::api::RegisterRequest;
use crate::messages::Message;
use crate::router::Route;

/// Shortest password the form will submit, in UTF-16 code units
pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RegisterState {
    pub name: String,
    pub email: String,
    #[serde(skip)]
    pub password: String,
    pub loading: bool,
    pub error: Option<String>,
}

impl RegisterState {
    pub fn can_submit(&self) -> bool {
        !self.loading && !self.email.trim().is_empty() && password_ok(&self.password)
    }
}

/// Length in UTF-16 code units, as the browser's form validation counts it
fn password_ok(password: &str) -> bool {
    password.encode_utf16().count() >= MIN_PASSWORD_LEN
}

pub struct RegisterView {
    ctx: ViewContext,
    state: StateCell<RegisterState>,
}

impl RegisterView {
    pub fn new(ctx: ViewContext) -> Self {
        Self {
            ctx,
            state: StateCell::new(RegisterState::default()),
        }
    }

    pub fn state(&self) -> RegisterState {
        self.state.snapshot()
    }

    pub fn subscribe(&self, listener: impl Fn(&RegisterState) + Send + Sync + 'static) {
        self.state.subscribe(listener);
    }

    pub fn set_name(&self, name: &str) {
        self.state.update(|s| s.name = name.to_string());
    }

    pub fn set_email(&self, email: &str) {
        self.state.update(|s| s.email = email.to_string());
    }

    pub fn set_password(&self, password: &str) {
        self.state.update(|s| s.password = password.to_string());
    }

    /// Create the account, then send the user to the login page.
    ///
    /// Registration never authenticates; the session is left untouched.
    pub async fn submit(&self) -> ActionOutcome {
        let request = self.state.read(|s| RegisterRequest {
            name: s.name.trim().to_string(),
            email: s.email.trim().to_string(),
            password: s.password.clone(),
        });
        if request.email.is_empty() || !password_ok(&request.password) {
            return ActionOutcome::Skipped;
        }

        self.state.update(|s| {
            s.loading = true;
            s.error = None;
        });

        let outcome = match self.ctx.api.register(&request).await {
            Ok(()) => {
                tracing::info!(email = %request.email, "Account created");
                self.ctx.navigator.navigate(Route::Login);
                ActionOutcome::Completed
            }
            Err(e) => {
                let message = e.user_message(self.ctx.text(Message::RegisterFailed));
                self.state.update(|s| s.error = Some(message));
                ActionOutcome::Failed
            }
        };

        self.state.update(|s| s.loading = false);
        outcome
    }
}
