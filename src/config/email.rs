//! Email configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Email configuration (SMTP)
#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
    /// SMTP server hostname
    pub smtp_host: String,

    /// SMTP server port
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,

    /// SMTP username
    pub smtp_user: String,

    /// SMTP password
    pub smtp_password: String,

    /// From email address
    #[serde(default = "default_from_email")]
    pub from_email: String,

    /// From name
    #[serde(default = "default_from_name")]
    pub from_name: String,

    /// Login URL included in the credentials email
    #[serde(default = "default_login_url")]
    pub login_url: String,
}

impl EmailConfig {
    /// Get formatted "From" header value
    pub fn from_header(&self) -> String {
        format!("{} <{}>", self.from_name, self.from_email)
    }

    /// Validate email configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.smtp_host.is_empty() {
            return Err(ValidationError::MissingRequired("EMAIL__SMTP_HOST"));
        }
        if self.smtp_port == 0 {
            return Err(ValidationError::InvalidSmtpPort);
        }
        if self.smtp_user.is_empty() {
            return Err(ValidationError::MissingRequired("EMAIL__SMTP_USER"));
        }
        if self.smtp_password.is_empty() {
            return Err(ValidationError::MissingRequired("EMAIL__SMTP_PASSWORD"));
        }
        if !self.from_email.contains('@') {
            return Err(ValidationError::InvalidFromEmail);
        }
        Ok(())
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            smtp_host: String::new(),
            smtp_port: default_smtp_port(),
            smtp_user: String::new(),
            smtp_password: String::new(),
            from_email: default_from_email(),
            from_name: default_from_name(),
            login_url: default_login_url(),
        }
    }
}

fn default_smtp_port() -> u16 {
    465
}

fn default_from_email() -> String {
    "suporte@queimadefinitiva.shop".to_string()
}

fn default_from_name() -> String {
    "App Queima".to_string()
}

fn default_login_url() -> String {
    "https://secaexpress.io/login".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_config_defaults() {
        let config = EmailConfig::default();
        assert_eq!(config.smtp_port, 465);
        assert_eq!(config.from_email, "suporte@queimadefinitiva.shop");
        assert_eq!(config.from_name, "App Queima");
    }

    #[test]
    fn test_from_header() {
        let config = EmailConfig {
            from_email: "suporte@example.com".to_string(),
            from_name: "Suporte".to_string(),
            ..Default::default()
        };
        assert_eq!(config.from_header(), "Suporte <suporte@example.com>");
    }

    #[test]
    fn test_validation_missing_host() {
        let config = EmailConfig::default();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_invalid_from_email() {
        let config = EmailConfig {
            smtp_host: "smtp.hostinger.com".to_string(),
            smtp_user: "suporte@queimadefinitiva.shop".to_string(),
            smtp_password: "secret".to_string(),
            from_email: "not-an-address".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_valid_config() {
        let config = EmailConfig {
            smtp_host: "smtp.hostinger.com".to_string(),
            smtp_user: "suporte@queimadefinitiva.shop".to_string(),
            smtp_password: "secret".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
