//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid PerfectPay base URL")]
    InvalidBaseUrl,

    #[error("Sandbox mode must not be enabled in production")]
    SandboxInProduction,

    #[error("Invalid SMTP port")]
    InvalidSmtpPort,

    #[error("Invalid from email address")]
    InvalidFromEmail,
}
