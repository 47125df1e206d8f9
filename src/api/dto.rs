//! Wire types for the analyzer backend.
//!
//! Field names follow the backend's camelCase JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login reply; the backend has shipped the token under two names
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
}

impl LoginResponse {
    /// `accessToken` wins over `token`; blank values count as missing
    pub fn into_token(self) -> Option<String> {
        let access = self.access_token.filter(|t| !t.trim().is_empty());
        if access.is_some() {
            return access;
        }
        let legacy = self.token.filter(|t| !t.trim().is_empty());
        if legacy.is_some() {
            tracing::warn!("Login response carried `token` instead of `accessToken`");
        }
        legacy
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// One uploaded résumé
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CvSummary {
    pub cv_id: String,
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub cv_id: String,
    pub job_description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

/// A stored analysis; `result_json` is the backend's raw report string
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRecord {
    pub analysis_id: String,
    #[serde(default)]
    pub cv_id: String,
    #[serde(default)]
    pub result_json: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}
