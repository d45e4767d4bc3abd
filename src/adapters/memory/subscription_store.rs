//! In-memory SubscriptionStore.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::domain::webhook::SubscriptionStatus;
use crate::ports::{SubscriptionPatch, SubscriptionRecord, SubscriptionStore, StoreError};

#[derive(Default)]
pub struct InMemorySubscriptionStore {
    records: Arc<RwLock<HashMap<String, SubscriptionRecord>>>,
}

impl InMemorySubscriptionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }
}

#[async_trait]
impl SubscriptionStore for InMemorySubscriptionStore {
    async fn find_by_id(&self, id: &str) -> Result<Option<SubscriptionRecord>, StoreError> {
        let records = self.records.read().await;
        Ok(records.get(id).cloned())
    }

    async fn upsert(&self, record: SubscriptionRecord) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        records.insert(record.id.clone(), record);
        Ok(())
    }

    async fn merge(&self, id: &str, patch: SubscriptionPatch) -> Result<bool, StoreError> {
        let mut records = self.records.write().await;
        let Some(record) = records.get_mut(id) else {
            return Ok(false);
        };

        if let Some(status) = patch.status {
            record.status = status;
        }
        if let Some(plan_type) = patch.plan_type {
            record.plan_type = plan_type;
        }
        if let Some(price) = patch.price {
            record.price = price;
        }
        if let Some(end_date) = patch.end_date {
            record.end_date = Some(end_date);
        }
        if let Some(last_payment_date) = patch.last_payment_date {
            record.last_payment_date = Some(last_payment_date);
        }
        if let Some(next_payment_date) = patch.next_payment_date {
            record.next_payment_date = Some(next_payment_date);
        }
        if let Some(billing_cycle) = patch.billing_cycle {
            record.billing_cycle = Some(billing_cycle);
        }
        if let Some(payment_method) = patch.payment_method {
            record.payment_method = Some(payment_method);
        }
        record.updated_at = Utc::now();
        Ok(true)
    }

    async fn set_status(
        &self,
        id: &str,
        status: SubscriptionStatus,
        at: DateTime<Utc>,
    ) -> Result<bool, StoreError> {
        let mut records = self.records.write().await;
        let Some(record) = records.get_mut(id) else {
            return Ok(false);
        };

        record.status = status;
        match status {
            SubscriptionStatus::Cancelled => record.cancelled_at = Some(at),
            SubscriptionStatus::Expired => record.expired_at = Some(at),
            _ => {}
        }
        record.updated_at = at;
        Ok(true)
    }
}
