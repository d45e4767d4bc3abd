//! Payment provider configuration

use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

fn default_base_url() -> String {
    "https://api.perfectpay.com.br".to_string()
}

/// Payment configuration (PerfectPay)
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// PerfectPay API key
    pub api_key: String,

    /// Shared secret used to sign webhook payloads
    pub webhook_secret: String,

    /// PerfectPay API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Disable signature verification for sandbox smoke tests.
    ///
    /// This is a deployment-environment flag only; request content (test
    /// transaction ids and the like) never influences verification.
    #[serde(default)]
    pub sandbox: bool,
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            webhook_secret: String::new(),
            base_url: default_base_url(),
            sandbox: false,
        }
    }
}

impl PaymentConfig {
    /// Validate payment configuration
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.api_key.is_empty() {
            return Err(ValidationError::MissingRequired("PAYMENT__API_KEY"));
        }
        if self.webhook_secret.is_empty() {
            return Err(ValidationError::MissingRequired("PAYMENT__WEBHOOK_SECRET"));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidBaseUrl);
        }
        if self.sandbox && *environment == Environment::Production {
            return Err(ValidationError::SandboxInProduction);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> PaymentConfig {
        PaymentConfig {
            api_key: "pk_abc123".to_string(),
            webhook_secret: "whsec_xyz".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_validation_missing_api_key() {
        let config = PaymentConfig::default();
        assert!(config.validate(&Environment::Development).is_err());
    }

    #[test]
    fn test_validation_missing_webhook_secret() {
        let config = PaymentConfig {
            api_key: "pk_abc123".to_string(),
            webhook_secret: String::new(),
            ..Default::default()
        };
        assert!(config.validate(&Environment::Development).is_err());
    }

    #[test]
    fn test_validation_invalid_base_url() {
        let config = PaymentConfig {
            base_url: "perfectpay.com.br".to_string(),
            ..valid_config()
        };
        assert!(config.validate(&Environment::Development).is_err());
    }

    #[test]
    fn test_sandbox_rejected_in_production() {
        let config = PaymentConfig {
            sandbox: true,
            ..valid_config()
        };
        assert!(matches!(
            config.validate(&Environment::Production),
            Err(ValidationError::SandboxInProduction)
        ));
        assert!(config.validate(&Environment::Development).is_ok());
    }

    #[test]
    fn test_validation_valid_config() {
        assert!(valid_config().validate(&Environment::Production).is_ok());
    }
}
