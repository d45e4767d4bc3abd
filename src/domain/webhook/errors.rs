//! Webhook processing errors and their HTTP mapping.

use axum::http::StatusCode;
use thiserror::Error;

use crate::ports::StoreError;

/// Transport-level failures of the webhook pipeline.
///
/// Business outcomes (unrecognized event, plan not found, missing
/// subscription data) are NOT errors; they surface as `success: false`
/// results with HTTP 400 so the provider does not retry them.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// Payload failed schema or structural validation.
    #[error("Dados do webhook inválidos: {0}")]
    Validation(String),

    /// Body was not parseable JSON.
    #[error("Payload inválido: {0}")]
    Parse(String),

    /// No signature header on a non-sandbox request.
    #[error("Assinatura do webhook não encontrada")]
    MissingSignature,

    /// Signature header present but did not match.
    #[error("Assinatura do webhook inválida")]
    InvalidSignature,

    /// No webhook secret configured; verification cannot run.
    #[error("Segredo do webhook não configurado")]
    MissingSecret,

    /// Static shared-secret header mismatch on the alternate entry point.
    #[error("Não autorizado")]
    Unauthorized,

    /// A store or registry call failed.
    #[error("Erro interno: {0}")]
    Store(String),

    /// User provisioning failed after a verified approval.
    #[error("Erro ao provisionar usuário: {0}")]
    Provisioning(String),
}

impl WebhookError {
    /// HTTP status this error maps to at the edge.
    pub fn status_code(&self) -> StatusCode {
        match self {
            WebhookError::Validation(_) | WebhookError::Parse(_) => StatusCode::BAD_REQUEST,
            WebhookError::MissingSignature
            | WebhookError::InvalidSignature
            | WebhookError::MissingSecret
            | WebhookError::Unauthorized => StatusCode::UNAUTHORIZED,
            WebhookError::Store(_) | WebhookError::Provisioning(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<StoreError> for WebhookError {
    fn from(err: StoreError) -> Self {
        WebhookError::Store(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_400() {
        let err = WebhookError::Validation("Amount must be positive".to_string());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn signature_failures_map_to_401() {
        assert_eq!(
            WebhookError::MissingSignature.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            WebhookError::InvalidSignature.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            WebhookError::MissingSecret.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            WebhookError::Unauthorized.status_code(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn internal_failures_map_to_500() {
        assert_eq!(
            WebhookError::Store("db down".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn messages_stay_in_portuguese() {
        assert_eq!(
            WebhookError::InvalidSignature.to_string(),
            "Assinatura do webhook inválida"
        );
    }
}
