//! Analyzer Backend Client
//!
//! Thin HTTP wrapper over the analyzer backend. Every request carries the
//! current session token as a bearer credential when one is stored.
//!
//! # Endpoints
//!
//! - `POST /api/auth/login` - Exchange credentials for an access token
//! - `POST /api/auth/register` - Create an account
//! - `GET /api/cvs` - List uploaded résumés
//! - `POST /api/cvs` - Upload a résumé (multipart field `file`)
//! - `GET /api/analyses` - Analysis history
//! - `POST /api/analyses` - Run an analysis

pub mod dto;
pub mod error;
#[cfg(feature = "native")]
pub mod http;
pub mod transport;

pub use dto::{AnalysisRecord, AnalyzeRequest, CvSummary, LoginRequest, LoginResponse, RegisterRequest};
pub use error::{ApiError, ApiResult};
#[cfg(feature = "native")]
pub use http::ReqwestTransport;
pub use transport::{
    ApiRequest, ApiResponse, Method, RequestBody, Transport, TransportError, UploadFile,
};

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

use crate::session::Session;

pub const LOGIN_PATH: &str = "/api/auth/login";
pub const REGISTER_PATH: &str = "/api/auth/register";
pub const CVS_PATH: &str = "/api/cvs";
pub const ANALYSES_PATH: &str = "/api/analyses";

/// Multipart field the backend reads the résumé from
pub const UPLOAD_FIELD: &str = "file";

/// Default backend URL
pub const DEFAULT_API_BASE: &str = "http://localhost:8080";

/// Analyzer backend client
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    transport: Arc<dyn Transport>,
    session: Session,
}

impl ApiClient {
    pub fn new(base_url: &str, transport: Arc<dyn Transport>, session: Session) -> Self {
        Self {
            // Normalize: remove trailing slash
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
            session,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Send a request and return the raw successful response
    async fn execute(&self, method: Method, path: &str, body: RequestBody) -> ApiResult<ApiResponse> {
        let request = ApiRequest {
            method,
            url: self.url(path),
            bearer: self.session.bearer(),
            body,
        };

        tracing::debug!(method = method.as_str(), path, "Sending request");

        let response = self.transport.send(request).await.map_err(|e| {
            tracing::warn!(method = method.as_str(), path, error = %e, "Request failed");
            ApiError::from(e)
        })?;

        if !response.is_success() {
            tracing::warn!(
                method = method.as_str(),
                path,
                status = response.status,
                "Backend returned an error status"
            );
            return Err(ApiError::from_status(response.status, &response.body));
        }

        Ok(response)
    }

    fn decode<R: DeserializeOwned>(response: &ApiResponse) -> ApiResult<R> {
        serde_json::from_str(&response.body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    fn encode<B: Serialize>(body: &B) -> ApiResult<RequestBody> {
        serde_json::to_value(body)
            .map(RequestBody::Json)
            .map_err(|e| ApiError::Encode(e.to_string()))
    }

    /// `GET` a path and decode the JSON body
    pub async fn get<R: DeserializeOwned>(&self, path: &str) -> ApiResult<R> {
        let response = self.execute(Method::Get, path, RequestBody::Empty).await?;
        Self::decode(&response)
    }

    /// `POST` a JSON body and decode the JSON reply
    pub async fn post<B: Serialize, R: DeserializeOwned>(&self, path: &str, body: &B) -> ApiResult<R> {
        let body = Self::encode(body)?;
        let response = self.execute(Method::Post, path, body).await?;
        Self::decode(&response)
    }

    /// `POST` a JSON body, ignoring the reply beyond its status
    pub async fn post_unit<B: Serialize>(&self, path: &str, body: &B) -> ApiResult<()> {
        let body = Self::encode(body)?;
        self.execute(Method::Post, path, body).await?;
        Ok(())
    }

    /// `POST` a single file as `multipart/form-data`, ignoring the reply beyond its status
    pub async fn post_multipart(&self, path: &str, field: &str, file: UploadFile) -> ApiResult<()> {
        let body = RequestBody::Multipart {
            field: field.to_string(),
            file,
        };
        self.execute(Method::Post, path, body).await?;
        Ok(())
    }

    // ============ Endpoints ============

    pub async fn login(&self, request: &LoginRequest) -> ApiResult<LoginResponse> {
        self.post(LOGIN_PATH, request).await
    }

    pub async fn register(&self, request: &RegisterRequest) -> ApiResult<()> {
        self.post_unit(REGISTER_PATH, request).await
    }

    pub async fn list_cvs(&self) -> ApiResult<Vec<CvSummary>> {
        self.get(CVS_PATH).await
    }

    pub async fn upload_cv(&self, file: UploadFile) -> ApiResult<()> {
        tracing::info!(filename = %file.filename, bytes = file.bytes.len(), "Uploading CV");
        self.post_multipart(CVS_PATH, UPLOAD_FIELD, file).await
    }

    pub async fn list_analyses(&self) -> ApiResult<Vec<AnalysisRecord>> {
        self.get(ANALYSES_PATH).await
    }

    pub async fn create_analysis(&self, request: &AnalyzeRequest) -> ApiResult<AnalysisRecord> {
        tracing::info!(cv_id = %request.cv_id, "Requesting analysis");
        self.post(ANALYSES_PATH, request).await
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("session", &self.session)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::transport::testing::ScriptedTransport;
    use super::*;

    fn client(transport: Arc<ScriptedTransport>, session: Session) -> ApiClient {
        ApiClient::new("http://backend.test/", transport, session)
    }

    #[tokio::test]
    async fn test_bearer_attached_when_authenticated() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.respond(Method::Get, CVS_PATH, 200, "[]");
        let session = Session::in_memory();
        session.set("tok-1").unwrap();

        let cvs = client(transport.clone(), session).list_cvs().await.unwrap();
        assert!(cvs.is_empty());

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url, "http://backend.test/api/cvs");
        assert_eq!(requests[0].bearer.as_deref(), Some("tok-1"));
    }

    #[tokio::test]
    async fn test_no_bearer_for_blank_session() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.respond(Method::Post, LOGIN_PATH, 200, r#"{"accessToken":"x"}"#);
        let session = Session::in_memory();
        session.set("   ").unwrap();

        let request = LoginRequest {
            email: "a@b.c".into(),
            password: "secret".into(),
        };
        client(transport.clone(), session).login(&request).await.unwrap();

        let sent = &transport.requests()[0];
        assert!(sent.bearer.is_none());
        assert_eq!(
            sent.body,
            RequestBody::Json(serde_json::json!({"email": "a@b.c", "password": "secret"}))
        );
    }

    #[tokio::test]
    async fn test_error_status_carries_server_message() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.respond(Method::Get, ANALYSES_PATH, 403, r#"{"message":"Forbidden"}"#);

        let err = client(transport, Session::in_memory())
            .list_analyses()
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(403));
        assert_eq!(err.server_message(), Some("Forbidden"));
    }

    #[tokio::test]
    async fn test_transport_failure() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.fail(Method::Get, CVS_PATH, "connection refused");

        let err = client(transport, Session::in_memory()).list_cvs().await.unwrap_err();
        assert_eq!(err, ApiError::Transport("connection refused".into()));
    }

    #[tokio::test]
    async fn test_malformed_success_body_is_decode_error() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.respond(Method::Get, CVS_PATH, 200, "not json");

        let err = client(transport, Session::in_memory()).list_cvs().await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn test_upload_uses_multipart_body() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.respond(Method::Post, CVS_PATH, 200, "");

        let file = UploadFile::new("cv.pdf", b"%PDF-1.4".to_vec());
        client(transport.clone(), Session::in_memory())
            .upload_cv(file.clone())
            .await
            .unwrap();

        assert_eq!(
            transport.requests()[0].body,
            RequestBody::Multipart {
                field: "file".into(),
                file
            }
        );
    }

    #[tokio::test]
    async fn test_register_ignores_reply_body() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.respond(Method::Post, REGISTER_PATH, 200, "");

        let request = RegisterRequest {
            name: String::new(),
            email: "a@b.c".into(),
            password: "secret1".into(),
        };
        client(transport, Session::in_memory())
            .register(&request)
            .await
            .unwrap();
    }
}
