//! In-memory UserPlanStore.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::ports::{StoreError, UserPlanRecord, UserPlanStore};

#[derive(Default)]
pub struct InMemoryUserPlanStore {
    records: Arc<RwLock<HashMap<String, UserPlanRecord>>>,
}

impl InMemoryUserPlanStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }
}

#[async_trait]
impl UserPlanStore for InMemoryUserPlanStore {
    async fn find_by_uid(&self, uid: &str) -> Result<Option<UserPlanRecord>, StoreError> {
        let records = self.records.read().await;
        Ok(records.get(uid).cloned())
    }

    async fn save(&self, record: UserPlanRecord) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        records.insert(record.uid.clone(), record);
        Ok(())
    }
}
