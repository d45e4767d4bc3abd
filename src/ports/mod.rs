//! Ports layer: async trait interfaces to the outside world.
//!
//! The document store is opaque to the domain; each collection gets its own
//! narrow port. Adapters (in-memory for tests and local runs, real backends
//! in deployment) implement these traits.

pub mod credential_store;
pub mod notifier;
pub mod payment_store;
pub mod subscription_store;
pub mod user_plan_store;
pub mod user_registry;

use thiserror::Error;

/// Failure of a document store operation.
#[derive(Debug, Error)]
#[error("store operation failed: {0}")]
pub struct StoreError(pub String);

pub use credential_store::{CredentialRecord, CredentialStore};
pub use notifier::{CredentialNotifier, CredentialsEmail, NotifyError};
pub use payment_store::{PaymentRecord, PaymentStatus, PaymentStore, SaveResult};
pub use subscription_store::{SubscriptionPatch, SubscriptionRecord, SubscriptionStore};
pub use user_plan_store::{AccessLevel, UserPlanRecord, UserPlanStore};
pub use user_registry::{NewUser, PlanClaims, RegisteredUser, RegistryError, UserRegistry};
