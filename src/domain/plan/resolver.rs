//! Plan resolution from webhook payloads.
//!
//! PerfectPay identifies the purchased plan inconsistently across payload
//! shapes, so resolution tries three sources in a fixed order:
//!
//! 1. the checkout URL's final path segment against catalog checkout ids,
//! 2. the subscription object's `plan_type` against exact display names,
//! 3. the product name through the fuzzy matcher below.
//!
//! First match wins; resolution is deterministic and side-effect free.

use crate::domain::webhook::WebhookEvent;

use super::catalog::{PlanCatalog, PlanDetails};
use super::kind::PlanKind;

/// Fuzzy plan identification from a product name.
///
/// Strips emoji/pictographs and surrounding whitespace, then matches the
/// duration markers the provider embeds in its product names. Falls back to
/// an exact display-name match so future catalog entries without a marker
/// still resolve.
pub fn identify_plan(product_name: &str) -> Option<PlanKind> {
    let normalized = normalize_product_name(product_name);

    if normalized.contains("30 DIAS") {
        return Some(PlanKind::ThirtyDay);
    }
    if normalized.contains("3 Meses") {
        return Some(PlanKind::NinetyDay);
    }
    if normalized.contains("6 Meses") {
        return Some(PlanKind::HundredEightyDay);
    }

    PlanCatalog::global()
        .by_display_name(product_name)
        .map(|p| p.kind)
}

/// Strips pictographic characters (U+1F300..U+1F9FF) and trims whitespace.
fn normalize_product_name(name: &str) -> String {
    name.chars()
        .filter(|c| !('\u{1F300}'..='\u{1F9FF}').contains(c))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Resolves the plan a webhook event refers to, or `None` when no source
/// identifies one.
pub fn resolve_plan<'a>(
    catalog: &'a PlanCatalog,
    event: &WebhookEvent,
) -> Option<&'a PlanDetails> {
    if let Some(url) = event.checkout_url.as_deref() {
        if let Some(segment) = url.rsplit('/').find(|s| !s.is_empty()) {
            if let Some(plan) = catalog.by_checkout_id(segment) {
                return Some(plan);
            }
        }
    }

    if let Some(subscription) = &event.subscription {
        if let Some(plan) = catalog.by_display_name(&subscription.plan_type) {
            return Some(plan);
        }
    }

    identify_plan(&event.product.name).map(|kind| catalog.details(kind))
}
