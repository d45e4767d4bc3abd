//! PerfectPay webhook event schema.
//!
//! The provider posts a flat JSON document whose `event` field selects one of
//! eight notification kinds. Payment events always carry customer + product
//! data; subscription events additionally carry a `subscription` object.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::plan::identify_plan;

/// Typed view over the `event` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    PaymentApproved,
    PaymentRejected,
    PaymentCancelled,
    PaymentRefunded,
    SubscriptionCreated,
    SubscriptionUpdated,
    SubscriptionCancelled,
    SubscriptionExpired,
    /// Anything the dispatcher does not recognize. Never mutates state.
    Unknown,
}

impl EventKind {
    pub fn from_str(event: &str) -> Self {
        match event {
            "payment.approved" => EventKind::PaymentApproved,
            "payment.rejected" => EventKind::PaymentRejected,
            "payment.cancelled" => EventKind::PaymentCancelled,
            "payment.refunded" => EventKind::PaymentRefunded,
            "subscription.created" => EventKind::SubscriptionCreated,
            "subscription.updated" => EventKind::SubscriptionUpdated,
            "subscription.cancelled" => EventKind::SubscriptionCancelled,
            "subscription.expired" => EventKind::SubscriptionExpired,
            _ => EventKind::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::PaymentApproved => "payment.approved",
            EventKind::PaymentRejected => "payment.rejected",
            EventKind::PaymentCancelled => "payment.cancelled",
            EventKind::PaymentRefunded => "payment.refunded",
            EventKind::SubscriptionCreated => "subscription.created",
            EventKind::SubscriptionUpdated => "subscription.updated",
            EventKind::SubscriptionCancelled => "subscription.cancelled",
            EventKind::SubscriptionExpired => "subscription.expired",
            EventKind::Unknown => "unknown",
        }
    }

    /// True for the subscription.* family, which requires a subscription
    /// payload to act on.
    pub fn is_subscription_event(&self) -> bool {
        matches!(
            self,
            EventKind::SubscriptionCreated
                | EventKind::SubscriptionUpdated
                | EventKind::SubscriptionCancelled
                | EventKind::SubscriptionExpired
        )
    }
}

/// Buyer identity as sent by the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Purchased product as sent by the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub price: f64,
}

/// Lifecycle status of a provider-side subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    Active,
    Cancelled,
    Expired,
    Pending,
    Failed,
}

impl SubscriptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionStatus::Active => "active",
            SubscriptionStatus::Cancelled => "cancelled",
            SubscriptionStatus::Expired => "expired",
            SubscriptionStatus::Pending => "pending",
            SubscriptionStatus::Failed => "failed",
        }
    }
}

/// Subscription object attached to subscription.* events (and sometimes to
/// payment events for recurring plans).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionPayload {
    pub id: String,
    pub status: SubscriptionStatus,
    pub start_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_payment_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_payment_date: Option<DateTime<Utc>>,
    /// Provider-side plan name; matched exactly against the catalog.
    pub plan_type: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_cycle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
}

/// A full webhook notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookEvent {
    pub event: String,
    pub transaction_id: String,
    pub status: String,
    pub amount: f64,
    pub payment_method: String,
    pub created_at: DateTime<Utc>,
    pub customer: Customer,
    pub product: Product,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checkout_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription: Option<SubscriptionPayload>,
}

impl WebhookEvent {
    pub fn kind(&self) -> EventKind {
        EventKind::from_str(&self.event)
    }

    /// Structural validation beyond what deserialization enforces.
    ///
    /// Runs before signature verification and dispatch; a failure here means
    /// the request is rejected with no store mutation.
    pub fn validate(&self) -> Result<(), String> {
        if self.transaction_id.trim().is_empty() {
            return Err("Transaction ID is required".to_string());
        }
        if self.amount <= 0.0 {
            return Err("Amount must be positive".to_string());
        }
        if self.payment_method.trim().is_empty() {
            return Err("Payment method is required".to_string());
        }
        if self.customer.name.trim().is_empty() {
            return Err("Customer name is required".to_string());
        }
        if !is_valid_email(&self.customer.email) {
            return Err("Invalid email format".to_string());
        }
        if !is_valid_phone(&self.customer.phone) {
            return Err("Invalid phone format".to_string());
        }
        if self.product.price <= 0.0 {
            return Err("Product price must be positive".to_string());
        }
        if identify_plan(&self.product.name).is_none() {
            return Err("Unknown product name".to_string());
        }
        Ok(())
    }
}

/// Minimal well-formedness check: one `@`, non-empty local part, and a
/// dotted domain.
fn is_valid_email(email: &str) -> bool {
    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let domain = parts.next().unwrap_or("");
    !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

/// Normalized international format: `+` followed by 12 or 13 digits.
fn is_valid_phone(phone: &str) -> bool {
    let Some(digits) = phone.strip_prefix('+') else {
        return false;
    };
    (12..=13).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit())
}
