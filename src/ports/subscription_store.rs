//! SubscriptionStore port - provider-side subscription lifecycle records.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::webhook::SubscriptionStatus;

use super::StoreError;

/// Persistent record of a provider subscription, keyed by its id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionRecord {
    pub id: String,
    pub status: SubscriptionStatus,
    pub plan_type: String,
    pub price: f64,
    pub customer_email: String,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub last_payment_date: Option<DateTime<Utc>>,
    pub next_payment_date: Option<DateTime<Utc>>,
    pub billing_cycle: Option<String>,
    pub payment_method: Option<String>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub expired_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update applied by subscription.updated events. Only the fields
/// present in the payload are overwritten.
#[derive(Debug, Clone, Default)]
pub struct SubscriptionPatch {
    pub status: Option<SubscriptionStatus>,
    pub plan_type: Option<String>,
    pub price: Option<f64>,
    pub end_date: Option<DateTime<Utc>>,
    pub last_payment_date: Option<DateTime<Utc>>,
    pub next_payment_date: Option<DateTime<Utc>>,
    pub billing_cycle: Option<String>,
    pub payment_method: Option<String>,
}

/// Port for the subscription record collection.
#[async_trait]
pub trait SubscriptionStore: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<SubscriptionRecord>, StoreError>;

    /// Insert or fully replace the record with this id. A duplicate
    /// subscription.created updates in place; it never duplicate-inserts.
    async fn upsert(&self, record: SubscriptionRecord) -> Result<(), StoreError>;

    /// Merge a patch into an existing record, bumping updated_at.
    ///
    /// Returns `false` when no record with that id exists.
    async fn merge(&self, id: &str, patch: SubscriptionPatch) -> Result<bool, StoreError>;

    /// Set a terminal status, stamping cancelled_at or expired_at.
    ///
    /// Returns `false` when no record with that id exists.
    async fn set_status(
        &self,
        id: &str,
        status: SubscriptionStatus,
        at: DateTime<Utc>,
    ) -> Result<bool, StoreError>;
}
