//! UserPlanStore port - the plan a user currently holds.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::plan::PlanKind;

use super::StoreError;

/// Access level granted with a plan. Every paid plan grants full access;
/// access control downstream is binary (unexpired plan or nothing).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
    Full,
}

/// The plan assignment for a provisioned user, keyed by uid.
/// Overwritten wholesale on each approved payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPlanRecord {
    pub uid: String,
    pub email: String,
    pub name: String,
    pub phone: String,
    pub plan: PlanKind,
    pub access_level: AccessLevel,
    pub plan_expiration: DateTime<Utc>,
    pub features: Vec<String>,
    pub plan_duration_days: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Port for the user plan collection.
#[async_trait]
pub trait UserPlanStore: Send + Sync {
    async fn find_by_uid(&self, uid: &str) -> Result<Option<UserPlanRecord>, StoreError>;

    /// Insert or replace the plan record for this uid.
    async fn save(&self, record: UserPlanRecord) -> Result<(), StoreError>;
}
