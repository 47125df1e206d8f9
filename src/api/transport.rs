//! HTTP transport seam
//!
//! The API client builds fully-resolved requests and hands them to a
//! [`Transport`]. Native builds use reqwest, the browser client uses fetch,
//! tests use a scripted fake.

use async_trait::async_trait;

/// HTTP verbs the client issues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

/// A file to send as a multipart part
#[derive(Debug, Clone, PartialEq)]
pub struct UploadFile {
    pub filename: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        let filename = filename.into();
        let content_type = guess_content_type(&filename).map(str::to_string);
        Self {
            filename,
            content_type,
            bytes,
        }
    }
}

/// Content types for the résumé formats the upload form accepts
fn guess_content_type(filename: &str) -> Option<&'static str> {
    let ext = filename.rsplit_once('.')?.1.to_ascii_lowercase();
    match ext.as_str() {
        "pdf" => Some("application/pdf"),
        "doc" => Some("application/msword"),
        "docx" => Some("application/vnd.openxmlformats-officedocument.wordprocessingml.document"),
        "txt" => Some("text/plain"),
        _ => None,
    }
}

/// Request payload
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(serde_json::Value),
    /// Single-file multipart form; bypasses JSON encoding
    Multipart { field: String, file: UploadFile },
}

/// A fully-resolved outgoing request
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    /// Bearer credential to attach, if any
    pub bearer: Option<String>,
    pub body: RequestBody,
}

/// Raw response as seen by the client
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Failure before any response was received
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Sends requests over the wire
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError>;
}

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted transport for controller tests.

    use super::*;
    use std::collections::{HashMap, VecDeque};
    use std::sync::{Arc, Mutex};
    use tokio::sync::Notify;

    type Key = (Method, String);

    struct Scripted {
        result: Result<ApiResponse, TransportError>,
        gate: Option<Arc<Notify>>,
    }

    /// Replies with queued responses per method + path and records every request
    #[derive(Default)]
    pub struct ScriptedTransport {
        routes: Mutex<HashMap<Key, VecDeque<Scripted>>>,
        sticky: Mutex<HashMap<Key, ApiResponse>>,
        requests: Mutex<Vec<ApiRequest>>,
    }

    fn path_of(url: &str) -> String {
        let without_scheme = url.split_once("://").map(|(_, rest)| rest).unwrap_or(url);
        match without_scheme.find('/') {
            Some(idx) => without_scheme[idx..].to_string(),
            None => "/".to_string(),
        }
    }

    impl ScriptedTransport {
        pub fn new() -> Self {
            Self::default()
        }

        /// Queue a one-shot response
        pub fn respond(&self, method: Method, path: &str, status: u16, body: &str) -> &Self {
            self.push(method, path, Ok(ApiResponse::new(status, body)), None);
            self
        }

        /// Queue a one-shot response released only when `gate` is notified
        pub fn respond_gated(
            &self,
            method: Method,
            path: &str,
            status: u16,
            body: &str,
            gate: Arc<Notify>,
        ) -> &Self {
            self.push(method, path, Ok(ApiResponse::new(status, body)), Some(gate));
            self
        }

        /// Queue a one-shot transport failure
        pub fn fail(&self, method: Method, path: &str, message: &str) -> &Self {
            self.push(method, path, Err(TransportError(message.to_string())), None);
            self
        }

        /// Response used whenever the queue for this route is empty
        pub fn always(&self, method: Method, path: &str, status: u16, body: &str) -> &Self {
            self.sticky
                .lock()
                .unwrap()
                .insert((method, path.to_string()), ApiResponse::new(status, body));
            self
        }

        fn push(
            &self,
            method: Method,
            path: &str,
            result: Result<ApiResponse, TransportError>,
            gate: Option<Arc<Notify>>,
        ) {
            self.routes
                .lock()
                .unwrap()
                .entry((method, path.to_string()))
                .or_default()
                .push_back(Scripted { result, gate });
        }

        pub fn requests(&self) -> Vec<ApiRequest> {
            self.requests.lock().unwrap().clone()
        }

        pub fn count(&self, method: Method, path: &str) -> usize {
            self.requests
                .lock()
                .unwrap()
                .iter()
                .filter(|r| r.method == method && path_of(&r.url) == path)
                .count()
        }
    }

    #[async_trait]
    impl Transport for ScriptedTransport {
        async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
            let key = (request.method, path_of(&request.url));
            self.requests.lock().unwrap().push(request);

            let scripted = self
                .routes
                .lock()
                .unwrap()
                .get_mut(&key)
                .and_then(|queue| queue.pop_front());

            match scripted {
                Some(Scripted { result, gate }) => {
                    if let Some(gate) = gate {
                        gate.notified().await;
                    }
                    result
                }
                None => match self.sticky.lock().unwrap().get(&key) {
                    Some(response) => Ok(response.clone()),
                    None => Ok(ApiResponse::new(404, r#"{"message":"no scripted response"}"#)),
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_file_guesses_content_type() {
        assert_eq!(
            UploadFile::new("cv.PDF", vec![]).content_type.as_deref(),
            Some("application/pdf")
        );
        assert!(UploadFile::new("cv", vec![]).content_type.is_none());
        assert!(UploadFile::new("cv.bin", vec![]).content_type.is_none());
    }

    #[test]
    fn test_response_success_range() {
        assert!(ApiResponse::new(200, "").is_success());
        assert!(ApiResponse::new(204, "").is_success());
        assert!(!ApiResponse::new(302, "").is_success());
        assert!(!ApiResponse::new(401, "").is_success());
    }
}
