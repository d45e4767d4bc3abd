//! UserRegistry port - the external identity provider.
//!
//! Wraps whatever identity backend the deployment uses (the reference
//! deployment uses a managed auth service). Exposes only the three
//! operations provisioning needs: lookup by email, create, and custom
//! claim assignment.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// An identity known to the registry.
#[derive(Debug, Clone)]
pub struct RegisteredUser {
    pub uid: String,
    pub email: String,
    pub display_name: Option<String>,
    pub phone: Option<String>,
}

/// Request to create a new identity.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub display_name: String,
    pub phone: Option<String>,
}

/// Custom claims attached to an identity after a plan purchase. These are
/// what the app reads to decide access.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanClaims {
    pub plan_duration: i64,
    pub expires_at: DateTime<Utc>,
    pub role: String,
}

impl PlanClaims {
    pub fn for_plan(duration_days: i64, expires_at: DateTime<Utc>) -> Self {
        Self {
            plan_duration: duration_days,
            expires_at,
            role: "user".to_string(),
        }
    }
}

/// Registry failures. `AlreadyExists` is separated out so callers can fall
/// back to the existing identity when a create races a concurrent delivery.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("user already exists: {0}")]
    AlreadyExists(String),

    #[error("registry operation failed: {0}")]
    Other(String),
}

/// Port for the identity provider.
#[async_trait]
pub trait UserRegistry: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<RegisteredUser>, RegistryError>;

    /// Create a new identity. Fails with [`RegistryError::AlreadyExists`]
    /// when the email is taken.
    async fn create_user(&self, user: NewUser) -> Result<RegisteredUser, RegistryError>;

    /// Replace the password on an existing identity.
    async fn update_password(&self, uid: &str, password: &str) -> Result<(), RegistryError>;

    /// Replace the plan claims on an identity.
    async fn set_plan_claims(&self, uid: &str, claims: &PlanClaims) -> Result<(), RegistryError>;
}
