//! CredentialStore port - transient audit trail of issued credentials.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::StoreError;

/// Audit record of credentials issued to a user, keyed by email.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialRecord {
    pub email: String,
    pub password: String,
    pub app_username: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Port for the credential audit collection.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<CredentialRecord>, StoreError>;

    /// Insert or replace the record for this email.
    async fn save(&self, record: CredentialRecord) -> Result<(), StoreError>;
}
