//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Values are read with the `QUEIMA` prefix
//! and nested sections use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use queima_gateway::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod email;
mod error;
mod payment;
mod server;

pub use email::EmailConfig;
pub use error::{ConfigError, ValidationError};
pub use payment::PaymentConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Payment provider configuration (PerfectPay)
    pub payment: PaymentConfig,

    /// Email configuration (SMTP transport)
    pub email: EmailConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Environment Variable Format
    ///
    /// - `QUEIMA__SERVER__PORT=3000` -> `server.port = 3000`
    /// - `QUEIMA__PAYMENT__WEBHOOK_SECRET=...` -> `payment.webhook_secret = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values
    /// cannot be parsed into the expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("QUEIMA")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.payment.validate(&self.server.environment)?;
        self.email.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn set_minimal_env() {
        env::set_var("QUEIMA__PAYMENT__API_KEY", "pk_test_123");
        env::set_var("QUEIMA__PAYMENT__WEBHOOK_SECRET", "whsec_test");
        env::set_var("QUEIMA__EMAIL__SMTP_HOST", "smtp.hostinger.com");
        env::set_var("QUEIMA__EMAIL__SMTP_USER", "suporte@queimadefinitiva.shop");
        env::set_var("QUEIMA__EMAIL__SMTP_PASSWORD", "secret");
    }

    fn clear_env() {
        env::remove_var("QUEIMA__PAYMENT__API_KEY");
        env::remove_var("QUEIMA__PAYMENT__WEBHOOK_SECRET");
        env::remove_var("QUEIMA__EMAIL__SMTP_HOST");
        env::remove_var("QUEIMA__EMAIL__SMTP_USER");
        env::remove_var("QUEIMA__EMAIL__SMTP_PASSWORD");
        env::remove_var("QUEIMA__SERVER__PORT");
        env::remove_var("QUEIMA__SERVER__ENVIRONMENT");
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.payment.webhook_secret, "whsec_test");
        assert_eq!(config.email.smtp_host, "smtp.hostinger.com");
    }

    #[test]
    fn test_validate_full_config() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_server_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.environment, Environment::Development);
    }

    #[test]
    fn test_is_production() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("QUEIMA__SERVER__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.is_production());
    }
}
