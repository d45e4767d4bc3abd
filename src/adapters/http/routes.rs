//! Axum router configuration.
//!
//! # Routes
//! - `GET /` - liveness probe
//! - `POST /webhook/perfectpay` - primary webhook endpoint (HMAC verified)
//! - `POST /api/webhook` - alternate webhook endpoint (static shared secret)
//! - `POST /credentials/generate` - manual credential issuance
//!
//! Non-POST requests to the POST routes get 405 from axum's method routing.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{
    generate_credentials, handle_api_webhook, handle_perfectpay_webhook, service_status,
    AppState,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(service_status))
        .route("/webhook/perfectpay", post(handle_perfectpay_webhook))
        .route("/api/webhook", post(handle_api_webhook))
        .route("/credentials/generate", post(generate_credentials))
        .with_state(state)
}
