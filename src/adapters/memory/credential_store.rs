//! In-memory CredentialStore.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::ports::{CredentialRecord, CredentialStore, StoreError};

#[derive(Default)]
pub struct InMemoryCredentialStore {
    records: Arc<RwLock<HashMap<String, CredentialRecord>>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<CredentialRecord>, StoreError> {
        let records = self.records.read().await;
        Ok(records.get(email).cloned())
    }

    async fn save(&self, record: CredentialRecord) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        records.insert(record.email.clone(), record);
        Ok(())
    }
}
