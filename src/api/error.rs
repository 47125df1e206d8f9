//! API Error Types
//!
//! Client-side failures of a backend call. Authentication failures are not
//! told apart from any other status; callers only ever render a message.

use serde::Deserialize;
use thiserror::Error;

use super::transport::TransportError;

/// Errors returned by [`super::ApiClient`]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// No response was received
    #[error("Network error: {0}")]
    Transport(String),

    /// Backend answered with a non-2xx status
    #[error("Request failed with status code {status}")]
    Status {
        status: u16,
        /// `message` field of a JSON error body, when present
        message: Option<String>,
    },

    /// 2xx response whose body could not be decoded
    #[error("Parse error: {0}")]
    Decode(String),

    /// Request body could not be encoded
    #[error("Request build error: {0}")]
    Encode(String),
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

impl ApiError {
    /// Build a status error, pulling `message` out of a JSON error body
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.message)
            .filter(|m| !m.trim().is_empty());

        ApiError::Status { status, message }
    }

    /// Message supplied by the server, if any
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Status {
                message: Some(m), ..
            } => Some(m),
            _ => None,
        }
    }

    /// HTTP status, if a response was received
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Text to show the user: the server's message, then this error's own
    /// message, then `fallback`
    pub fn user_message(&self, fallback: &str) -> String {
        if let Some(message) = self.server_message() {
            return message.to_string();
        }
        match self {
            ApiError::Transport(m) if m.trim().is_empty() => fallback.to_string(),
            ApiError::Transport(m) => m.clone(),
            other => other.to_string(),
        }
    }
}

impl From<TransportError> for ApiError {
    fn from(e: TransportError) -> Self {
        ApiError::Transport(e.0)
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_extracts_message() {
        let err = ApiError::from_status(401, r#"{"message":"Bad credentials"}"#);
        assert_eq!(err.server_message(), Some("Bad credentials"));
        assert_eq!(err.status(), Some(401));
    }

    #[test]
    fn test_from_status_without_json_body() {
        let err = ApiError::from_status(500, "<html>oops</html>");
        assert_eq!(err.server_message(), None);
        assert_eq!(err.to_string(), "Request failed with status code 500");
    }

    #[test]
    fn test_blank_server_message_is_ignored() {
        let err = ApiError::from_status(400, r#"{"message":"  "}"#);
        assert_eq!(err.server_message(), None);
    }

    #[test]
    fn test_user_message_tiers() {
        let server = ApiError::from_status(401, r#"{"message":"Invalid password"}"#);
        assert_eq!(server.user_message("Login failed"), "Invalid password");

        let transport = ApiError::Transport("connection refused".into());
        assert_eq!(transport.user_message("Login failed"), "connection refused");

        let silent = ApiError::Transport(String::new());
        assert_eq!(silent.user_message("Login failed"), "Login failed");

        let status = ApiError::from_status(401, "");
        assert_eq!(
            status.user_message("Login failed"),
            "Request failed with status code 401"
        );
    }
}
