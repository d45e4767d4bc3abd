//! Recording CredentialNotifier.
//!
//! Captures outgoing credential emails instead of sending them. Used by
//! tests and by local runs without SMTP configured.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::ports::{CredentialNotifier, CredentialsEmail, NotifyError};

#[derive(Default)]
pub struct RecordingNotifier {
    sent: Arc<RwLock<Vec<CredentialsEmail>>>,
    fail_next: Arc<RwLock<bool>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emails captured so far.
    pub async fn sent(&self) -> Vec<CredentialsEmail> {
        self.sent.read().await.clone()
    }

    pub async fn sent_count(&self) -> usize {
        self.sent.read().await.len()
    }

    /// Makes every subsequent send fail. Test helper.
    pub async fn fail_deliveries(&self) {
        *self.fail_next.write().await = true;
    }
}

#[async_trait]
impl CredentialNotifier for RecordingNotifier {
    async fn send_credentials(&self, message: &CredentialsEmail) -> Result<(), NotifyError> {
        if *self.fail_next.read().await {
            return Err(NotifyError("smtp unavailable".to_string()));
        }
        self.sent.write().await.push(message.clone());
        Ok(())
    }
}
