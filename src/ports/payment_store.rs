//! PaymentStore port - one record per provider transaction.
//!
//! PerfectPay may deliver the same webhook multiple times (timeouts, 5xx
//! retries, acknowledged responses the provider never saw). The store closes
//! the duplicate-delivery race with a conditional insert: callers ask for
//! insert-if-absent and get told whether they won.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::plan::PlanKind;

use super::StoreError;

/// Lifecycle status of a payment record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Approved,
    Rejected,
    Cancelled,
    Refunded,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Approved => "approved",
            PaymentStatus::Rejected => "rejected",
            PaymentStatus::Cancelled => "cancelled",
            PaymentStatus::Refunded => "refunded",
        }
    }
}

/// Persistent record of a processed payment. Never deleted; status is
/// mutated in place by follow-up events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub transaction_id: String,
    pub status: PaymentStatus,
    pub amount: f64,
    pub payment_method: String,
    pub customer_email: String,
    pub customer_name: String,
    pub plan: Option<PlanKind>,
    pub created_at: DateTime<Utc>,
    pub processed_at: DateTime<Utc>,
}

/// Result of a conditional insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveResult {
    /// Record was inserted (first time seeing this transaction).
    Inserted,
    /// Record already exists (duplicate delivery).
    AlreadyExists,
}

/// Port for the payment record collection.
///
/// Implementations must make `insert_if_absent` atomic (unique constraint on
/// transaction_id) so concurrent duplicate deliveries cannot both insert.
#[async_trait]
pub trait PaymentStore: Send + Sync {
    /// Find a payment by its provider transaction id.
    async fn find_by_transaction_id(
        &self,
        transaction_id: &str,
    ) -> Result<Option<PaymentRecord>, StoreError>;

    /// Insert the record unless one with the same transaction id exists.
    async fn insert_if_absent(&self, record: PaymentRecord) -> Result<SaveResult, StoreError>;

    /// Update the status (and processed_at) of an existing record.
    ///
    /// Returns `false` when no record with that transaction id exists.
    async fn update_status(
        &self,
        transaction_id: &str,
        status: PaymentStatus,
    ) -> Result<bool, StoreError>;
}
