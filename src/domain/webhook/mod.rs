//! Webhook domain: event schema, signature verification, error mapping.

pub mod errors;
pub mod event;
pub mod verifier;

pub use errors::WebhookError;
pub use event::{
    Customer, EventKind, Product, SubscriptionPayload, SubscriptionStatus, WebhookEvent,
};
pub use verifier::SignatureVerifier;
