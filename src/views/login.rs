//! Login View
//!
//! Exchanges email + password for an access token, stores it in the
//! session and fully navigates to the dashboard.

use serde::Serialize;

use super::{ActionOutcome, StateCell, ViewContext};
use crate::api::LoginRequest;
use crate::messages::Message;
use crate::router::Route;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoginState {
    pub email: String,
    #[serde(skip)]
    pub password: String,
    pub loading: bool,
    pub error: Option<String>,
}

impl LoginState {
    /// Both fields present and nothing in flight
    pub fn can_submit(&self) -> bool {
        !self.loading && !self.email.trim().is_empty() && !self.password.is_empty()
    }
}

pub struct LoginView {
    ctx: ViewContext,
    state: StateCell<LoginState>,
}

impl LoginView {
    pub fn new(ctx: ViewContext) -> Self {
        Self {
            ctx,
            state: StateCell::new(LoginState::default()),
        }
    }

    pub fn state(&self) -> LoginState {
        self.state.snapshot()
    }

    pub fn subscribe(&self, listener: impl Fn(&LoginState) + Send + Sync + 'static) {
        self.state.subscribe(listener);
    }

    pub fn set_email(&self, email: &str) {
        self.state.update(|s| s.email = email.to_string());
    }

    pub fn set_password(&self, password: &str) {
        self.state.update(|s| s.password = password.to_string());
    }

    pub async fn submit(&self) -> ActionOutcome {
        let request = self.state.read(|s| LoginRequest {
            email: s.email.trim().to_string(),
            password: s.password.clone(),
        });
        if request.email.is_empty() || request.password.is_empty() {
            return ActionOutcome::Skipped;
        }

        self.state.update(|s| {
            s.loading = true;
            s.error = None;
        });

        let outcome = match self.ctx.api.login(&request).await {
            Ok(response) => match response.into_token() {
                None => {
                    tracing::warn!("Login succeeded but no token was returned");
                    self.fail(self.ctx.text(Message::TokenNotReceived).to_string())
                }
                Some(token) => match self.ctx.session().set(&token) {
                    Ok(()) => {
                        tracing::info!(email = %request.email, "Logged in");
                        self.ctx.navigator.navigate(Route::Dashboard);
                        ActionOutcome::Completed
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Could not persist session");
                        self.fail(e.to_string())
                    }
                },
            },
            Err(e) => self.fail(e.user_message(self.ctx.text(Message::LoginFailed))),
        };

        self.state.update(|s| s.loading = false);
        outcome
    }

    fn fail(&self, message: String) -> ActionOutcome {
        self.state.update(|s| s.error = Some(message));
        ActionOutcome::Failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Method, RequestBody, LOGIN_PATH};
    use crate::views::testing::harness;

    #[tokio::test]
    async fn test_access_token_is_stored_and_navigates() {
        let h = harness();
        h.transport
            .respond(Method::Post, LOGIN_PATH, 200, r#"{"accessToken":"jwt-a"}"#);

        let view = LoginView::new(h.ctx.clone());
        view.set_email("  kadak@example.com ");
        view.set_password("hunter22");

        assert_eq!(view.submit().await, ActionOutcome::Completed);
        assert_eq!(h.session.get(), "jwt-a");
        assert_eq!(h.navigator.last(), Some(Route::Dashboard));

        let sent = &h.transport.requests()[0];
        assert_eq!(
            sent.body,
            RequestBody::Json(serde_json::json!({
                "email": "kadak@example.com",
                "password": "hunter22"
            }))
        );

        let state = view.state();
        assert!(!state.loading);
        assert!(state.error.is_none());
    }

    #[tokio::test]
    async fn test_missing_token_shows_message_without_navigation() {
        let h = harness();
        h.transport
            .respond(Method::Post, LOGIN_PATH, 200, r#"{"user":"x"}"#);

        let view = LoginView::new(h.ctx.clone());
        view.set_email("a@b.c");
        view.set_password("pw");

        assert_eq!(view.submit().await, ActionOutcome::Failed);
        assert_eq!(
            view.state().error.as_deref(),
            Some("Token not received (unexpected backend response).")
        );
        assert!(h.navigator.visited().is_empty());
        assert!(!h.session.is_authenticated());
    }

    #[tokio::test]
    async fn test_blank_fields_are_a_silent_no_op() {
        let h = harness();
        let view = LoginView::new(h.ctx.clone());

        view.set_email("   ");
        view.set_password("pw");
        assert_eq!(view.submit().await, ActionOutcome::Skipped);

        view.set_email("a@b.c");
        view.set_password("");
        assert_eq!(view.submit().await, ActionOutcome::Skipped);

        assert!(h.transport.requests().is_empty());
        assert!(view.state().error.is_none());
    }

    #[tokio::test]
    async fn test_server_message_is_preferred() {
        let h = harness();
        h.transport.respond(
            Method::Post,
            LOGIN_PATH,
            401,
            r#"{"message":"Invalid email or password"}"#,
        );

        let view = LoginView::new(h.ctx.clone());
        view.set_email("a@b.c");
        view.set_password("pw");

        assert_eq!(view.submit().await, ActionOutcome::Failed);
        assert_eq!(
            view.state().error.as_deref(),
            Some("Invalid email or password")
        );
    }

    #[tokio::test]
    async fn test_transport_message_then_generic_fallback() {
        let h = harness();
        h.transport
            .fail(Method::Post, LOGIN_PATH, "Network Error")
            .fail(Method::Post, LOGIN_PATH, "");

        let view = LoginView::new(h.ctx.clone());
        view.set_email("a@b.c");
        view.set_password("pw");

        view.submit().await;
        assert_eq!(view.state().error.as_deref(), Some("Network Error"));

        view.submit().await;
        assert_eq!(view.state().error.as_deref(), Some("Login failed"));
    }

    #[tokio::test]
    async fn test_new_attempt_clears_previous_error() {
        let h = harness();
        h.transport
            .respond(Method::Post, LOGIN_PATH, 500, "")
            .respond(Method::Post, LOGIN_PATH, 200, r#"{"token":"legacy"}"#);

        let view = LoginView::new(h.ctx.clone());
        view.set_email("a@b.c");
        view.set_password("pw");

        assert_eq!(view.submit().await, ActionOutcome::Failed);
        assert!(view.state().error.is_some());

        assert_eq!(view.submit().await, ActionOutcome::Completed);
        assert!(view.state().error.is_none());
        assert_eq!(h.session.get(), "legacy");
    }

    #[test]
    fn test_can_submit() {
        let mut state = LoginState {
            email: "a@b.c".into(),
            password: "x".into(),
            ..Default::default()
        };
        assert!(state.can_submit());
        state.loading = true;
        assert!(!state.can_submit());
    }
}
