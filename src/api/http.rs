//! reqwest-backed transport for native builds.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use std::time::Duration;

use super::transport::{ApiRequest, ApiResponse, Method, RequestBody, Transport, TransportError};

/// HTTP transport over a shared reqwest client
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Build a transport; `timeout` of `None` leaves requests unbounded
    pub fn new(timeout: Option<Duration>) -> Result<Self, TransportError> {
        let mut builder = Client::builder().user_agent(concat!("ghostcheck/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| TransportError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

fn describe(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError("Request timeout".to_string())
    } else if e.is_connect() {
        TransportError(format!("Backend unavailable: {}", e))
    } else {
        TransportError(e.to_string())
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let mut builder = match request.method {
            Method::Get => self.client.get(&request.url),
            Method::Post => self.client.post(&request.url),
        };

        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }

        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart { field, file } => {
                let mut part = Part::bytes(file.bytes).file_name(file.filename);
                if let Some(content_type) = &file.content_type {
                    part = part.mime_str(content_type).map_err(describe)?;
                }
                builder.multipart(Form::new().part(field, part))
            }
        };

        let response = builder.send().await.map_err(describe)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(describe)?;

        Ok(ApiResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiClient, LoginRequest, UploadFile};
    use crate::session::Session;
    use axum::http::{header, HeaderMap, StatusCode};
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use std::sync::Arc;

    async fn list_cvs(headers: HeaderMap) -> Json<Value> {
        let auth = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("none")
            .to_string();
        Json(json!([{ "cvId": auth, "filename": "cv.pdf", "createdAt": "2024-05-01T10:00:00Z" }]))
    }

    async fn upload_cv(headers: HeaderMap, body: String) -> StatusCode {
        let content_type = headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");
        if content_type.starts_with("multipart/form-data")
            && body.contains("name=\"file\"")
            && body.contains("filename=\"cv.pdf\"")
            && body.contains("%PDF-1.4")
        {
            StatusCode::CREATED
        } else {
            StatusCode::BAD_REQUEST
        }
    }

    async fn login(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
        if body["password"] == "secret1" {
            (StatusCode::OK, Json(json!({ "accessToken": "jwt-1" })))
        } else {
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "message": "Bad credentials" })),
            )
        }
    }

    async fn spawn_backend() -> String {
        let app = Router::new()
            .route("/api/cvs", get(list_cvs).post(upload_cv))
            .route("/api/auth/login", post(login));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{}", addr)
    }

    fn client(base: &str, session: Session) -> ApiClient {
        let transport = ReqwestTransport::new(Some(Duration::from_secs(5))).unwrap();
        ApiClient::new(base, Arc::new(transport), session)
    }

    #[tokio::test]
    async fn test_bearer_header_on_the_wire() {
        let base = spawn_backend().await;
        let session = Session::in_memory();
        session.set("jwt-1").unwrap();

        let cvs = client(&base, session).list_cvs().await.unwrap();
        assert_eq!(cvs[0].cv_id, "Bearer jwt-1");
    }

    #[tokio::test]
    async fn test_anonymous_request_has_no_authorization() {
        let base = spawn_backend().await;

        let cvs = client(&base, Session::in_memory()).list_cvs().await.unwrap();
        assert_eq!(cvs[0].cv_id, "none");
    }

    #[tokio::test]
    async fn test_multipart_upload() {
        let base = spawn_backend().await;
        let file = UploadFile::new("cv.pdf", b"%PDF-1.4 resume".to_vec());

        client(&base, Session::in_memory())
            .upload_cv(file)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_login_error_message_from_body() {
        let base = spawn_backend().await;
        let api = client(&base, Session::in_memory());

        let ok = api
            .login(&LoginRequest {
                email: "a@b.c".into(),
                password: "secret1".into(),
            })
            .await
            .unwrap();
        assert_eq!(ok.into_token().as_deref(), Some("jwt-1"));

        let err = api
            .login(&LoginRequest {
                email: "a@b.c".into(),
                password: "wrong".into(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(401));
        assert_eq!(err.server_message(), Some("Bad credentials"));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_transport_error() {
        // Bind and drop to get a port nobody listens on
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client(&format!("http://{}", addr), Session::in_memory())
            .list_cvs()
            .await
            .unwrap_err();
        assert!(matches!(err, crate::api::ApiError::Transport(_)));
    }
}
