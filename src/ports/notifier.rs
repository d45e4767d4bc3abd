//! CredentialNotifier port - delivery of login credentials to the user.

use async_trait::async_trait;
use thiserror::Error;

/// Content of a credentials email.
#[derive(Debug, Clone)]
pub struct CredentialsEmail {
    pub to_email: String,
    pub to_name: String,
    pub password: String,
}

/// Delivery failure. The webhook path logs and swallows this; the
/// credentials endpoint propagates it.
#[derive(Debug, Error)]
#[error("credential delivery failed: {0}")]
pub struct NotifyError(pub String);

/// Port for sending credentials to a freshly provisioned user.
#[async_trait]
pub trait CredentialNotifier: Send + Sync {
    async fn send_credentials(&self, message: &CredentialsEmail) -> Result<(), NotifyError>;
}
