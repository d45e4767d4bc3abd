//! In-memory reference adapters.
//!
//! Implement every store and registry port over `RwLock<HashMap>`. They back
//! the test suite and local runs; deployments swap in real backends behind
//! the same ports.

pub mod credential_store;
pub mod notifier;
pub mod payment_store;
pub mod subscription_store;
pub mod user_plan_store;
pub mod user_registry;

pub use credential_store::InMemoryCredentialStore;
pub use notifier::RecordingNotifier;
pub use payment_store::InMemoryPaymentStore;
pub use subscription_store::InMemorySubscriptionStore;
pub use user_plan_store::InMemoryUserPlanStore;
pub use user_registry::InMemoryUserRegistry;
