//! HTTP handlers for the webhook and credential endpoints.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use subtle::ConstantTimeEq;

use crate::application::handlers::{
    CredentialsError, GenerateCredentialsCommand, GenerateCredentialsHandler,
    ProcessWebhookHandler,
};
use crate::domain::webhook::WebhookError;

use super::dto::{
    ErrorResponse, GenerateCredentialsRequest, GenerateCredentialsResponse,
    ServiceStatusResponse,
};

/// Signature header on the primary webhook endpoint.
pub const SIGNATURE_HEADER: &str = "x-perfectpay-signature";
/// Static shared-secret header on the alternate endpoint.
pub const SHARED_SECRET_HEADER: &str = "x-perfectpay-webhook-secret";

/// Shared state for all routes.
#[derive(Clone)]
pub struct AppState {
    pub webhook_handler: Arc<ProcessWebhookHandler>,
    pub credentials_handler: Arc<GenerateCredentialsHandler>,
    /// Secret checked against [`SHARED_SECRET_HEADER`] on `/api/webhook`.
    pub webhook_shared_secret: String,
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// Wraps pipeline errors for conversion into HTTP responses.
pub struct ApiError(WebhookError);

impl From<WebhookError> for ApiError {
    fn from(err: WebhookError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.0.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "webhook processing failed");
        }
        (status, Json(ErrorResponse::new(self.0.to_string()))).into_response()
    }
}

/// Wraps credential-issuance errors.
pub struct CredentialsApiError(CredentialsError);

impl From<CredentialsError> for CredentialsApiError {
    fn from(err: CredentialsError) -> Self {
        Self(err)
    }
}

impl IntoResponse for CredentialsApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.0.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "credential issuance failed");
        }
        (status, Json(ErrorResponse::new(self.0.to_string()))).into_response()
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET / - liveness probe.
pub async fn service_status() -> impl IntoResponse {
    Json(ServiceStatusResponse {
        status: "online",
        service: "queima-gateway",
        timestamp: Utc::now(),
    })
}

/// POST /webhook/perfectpay - primary, HMAC-verified webhook endpoint.
pub async fn handle_perfectpay_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok());

    let outcome = state.webhook_handler.handle(&body, signature).await?;

    // Business rejections get a 400 so the provider stops retrying them.
    let status = if outcome.success {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    };
    Ok((status, Json(outcome)))
}

/// POST /api/webhook - alternate entry point guarded by a static shared
/// secret before running the same pipeline.
pub async fn handle_api_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let provided = headers
        .get(SHARED_SECRET_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    let authorized: bool = provided
        .as_bytes()
        .ct_eq(state.webhook_shared_secret.as_bytes())
        .into();
    if state.webhook_shared_secret.is_empty() || !authorized {
        return Err(WebhookError::Unauthorized.into());
    }

    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok());

    let outcome = state.webhook_handler.handle(&body, signature).await?;
    let status = if outcome.success {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    };
    Ok((status, Json(outcome)))
}

/// POST /credentials/generate - manual credential issuance.
pub async fn generate_credentials(
    State(state): State<AppState>,
    Json(request): Json<GenerateCredentialsRequest>,
) -> Result<impl IntoResponse, CredentialsApiError> {
    let result = state
        .credentials_handler
        .handle(GenerateCredentialsCommand {
            email: request.email,
            plan_duration: request.plan_duration,
        })
        .await?;

    Ok(Json(GenerateCredentialsResponse {
        success: true,
        email: result.email,
        created: result.created,
        expires_at: result.expires_at,
    }))
}
