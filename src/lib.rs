//! # Ghostcheck
//!
//! Client for a CV ghosting analyzer backend: upload a résumé, paste a job
//! description, and read back a match / ATS-readability report with the
//! likely reasons an application would be silently rejected.
//!
//! The analysis itself happens server-side. This crate holds the client
//! core shared by the command-line tool and the browser app.
//!
//! ## Modules
//!
//! - [`session`]: The persisted bearer token
//! - [`api`]: HTTP client for the analyzer backend
//! - [`router`]: Routes and the authenticated-root guard
//! - [`views`]: Login, register and dashboard controllers
//! - [`report`]: Defensive parsing of stored analysis results
//! - [`messages`]: Localized user-facing strings
//! - [`config`]: File + environment configuration (native only)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ghostcheck::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let session = Session::in_memory();
//!     let transport = Arc::new(ReqwestTransport::new(None)?);
//!     let api = ApiClient::new(DEFAULT_API_BASE, transport, session.clone());
//!     let navigator = Arc::new(HistoryNavigator::new());
//!     let ctx = ViewContext::new(api, navigator, Locale::En);
//!
//!     let login = LoginView::new(ctx.clone());
//!     login.set_email("me@example.com");
//!     login.set_password("secret1");
//!     login.submit().await;
//!
//!     let dashboard = DashboardView::new(ctx);
//!     dashboard.mount().await;
//!     dashboard.set_job_description("Senior Rust engineer, Istanbul");
//!     dashboard.analyze().await;
//!
//!     if let Some(report) = dashboard.state().displayed_report() {
//!         println!("Ghosting probability: {:?}%", report.ghosting_percent());
//!     }
//!     Ok(())
//! }
//! ```

pub mod api;
#[cfg(feature = "native")]
pub mod config;
pub mod messages;
pub mod report;
pub mod router;
pub mod session;
pub mod views;

pub use api::{
    AnalysisRecord, AnalyzeRequest, ApiClient, ApiError, ApiResult, CvSummary, Transport,
    TransportError, UploadFile, DEFAULT_API_BASE,
};

#[cfg(feature = "native")]
pub use api::ReqwestTransport;

#[cfg(feature = "native")]
pub use config::{Config, ConfigError};

pub use messages::{Locale, Message};

pub use report::{AnalysisResult, Fix, GhostingReport, RejectionReason, RewriteSuggestion};

pub use router::{HistoryNavigator, Navigator, Route, RouteDecision, RouteGuard};

#[cfg(feature = "native")]
pub use session::FileSessionStore;
pub use session::{MemorySessionStore, Session, SessionError, SessionStore};

pub use views::{
    ActionOutcome, DashboardState, DashboardView, LoginState, LoginView, RegisterState,
    RegisterView, ViewContext,
};
