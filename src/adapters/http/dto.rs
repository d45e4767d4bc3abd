//! Request/response DTOs for the HTTP surface.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Error body for every failed request.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// `POST /credentials/generate` request.
#[derive(Debug, Deserialize)]
pub struct GenerateCredentialsRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub plan_duration: i64,
}

/// `POST /credentials/generate` response.
#[derive(Debug, Serialize)]
pub struct GenerateCredentialsResponse {
    pub success: bool,
    pub email: String,
    pub created: bool,
    pub expires_at: DateTime<Utc>,
}

/// `GET /` liveness response.
#[derive(Debug, Serialize)]
pub struct ServiceStatusResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub timestamp: DateTime<Utc>,
}
