//! In-memory PaymentStore.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::ports::{PaymentRecord, PaymentStatus, PaymentStore, SaveResult, StoreError};

/// HashMap-backed payment store. The write lock held across the
/// contains/insert pair makes `insert_if_absent` atomic.
#[derive(Default)]
pub struct InMemoryPaymentStore {
    records: Arc<RwLock<HashMap<String, PaymentRecord>>>,
}

impl InMemoryPaymentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records. Test helper.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }
}

#[async_trait]
impl PaymentStore for InMemoryPaymentStore {
    async fn find_by_transaction_id(
        &self,
        transaction_id: &str,
    ) -> Result<Option<PaymentRecord>, StoreError> {
        let records = self.records.read().await;
        Ok(records.get(transaction_id).cloned())
    }

    async fn insert_if_absent(&self, record: PaymentRecord) -> Result<SaveResult, StoreError> {
        let mut records = self.records.write().await;
        if records.contains_key(&record.transaction_id) {
            Ok(SaveResult::AlreadyExists)
        } else {
            records.insert(record.transaction_id.clone(), record);
            Ok(SaveResult::Inserted)
        }
    }

    async fn update_status(
        &self,
        transaction_id: &str,
        status: PaymentStatus,
    ) -> Result<bool, StoreError> {
        let mut records = self.records.write().await;
        match records.get_mut(transaction_id) {
            Some(record) => {
                record.status = status;
                record.processed_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
