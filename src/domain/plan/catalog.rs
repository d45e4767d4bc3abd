//! Static plan catalog.
//!
//! One immutable table holding the provider-facing details for every
//! [`PlanKind`]: display name (as it appears in PerfectPay payloads,
//! emoji included), checkout id, price and feature list. Built once at
//! startup and shared by reference.

use once_cell::sync::Lazy;

use super::kind::PlanKind;

/// Full details for a single plan.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanDetails {
    pub kind: PlanKind,
    /// Name exactly as the provider sends it, emoji and all.
    pub display_name: &'static str,
    pub duration_days: i64,
    /// Final path segment of the provider checkout URL.
    pub checkout_id: &'static str,
    pub price: f64,
    pub features: &'static [&'static str],
}

/// Immutable lookup table over the three plans.
#[derive(Debug)]
pub struct PlanCatalog {
    plans: [PlanDetails; 3],
}

static CATALOG: Lazy<PlanCatalog> = Lazy::new(|| PlanCatalog {
    plans: [
        PlanDetails {
            kind: PlanKind::ThirtyDay,
            display_name: "30 DIAS - APP QUEIMA DEFINITIVA",
            duration_days: 30,
            checkout_id: "PPU38CPIB8O",
            price: 27.00,
            features: &["Acesso básico por 30 dias", "Suporte básico"],
        },
        PlanDetails {
            kind: PlanKind::NinetyDay,
            display_name: "💪 Plano Evolução (3 Meses)",
            duration_days: 90,
            checkout_id: "PPU38CPIR95",
            price: 39.90,
            features: &["Acesso completo por 3 meses", "Suporte prioritário"],
        },
        PlanDetails {
            kind: PlanKind::HundredEightyDay,
            display_name: "🔥 Plano Transformação (6 Meses)",
            duration_days: 180,
            checkout_id: "PPU38CPIEN1",
            price: 47.00,
            features: &["Acesso completo por 6 meses", "Suporte VIP"],
        },
    ],
});

impl PlanCatalog {
    /// The process-wide catalog instance.
    pub fn global() -> &'static PlanCatalog {
        &CATALOG
    }

    /// Details for a given kind. Always present.
    pub fn details(&self, kind: PlanKind) -> &PlanDetails {
        // plans[] is ordered like PlanKind::all(), but match on kind so the
        // table order is not load-bearing.
        self.plans
            .iter()
            .find(|p| p.kind == kind)
            .unwrap_or(&self.plans[0])
    }

    /// Look up a plan by its checkout id (the final path segment of the
    /// provider checkout URL).
    pub fn by_checkout_id(&self, checkout_id: &str) -> Option<&PlanDetails> {
        self.plans.iter().find(|p| p.checkout_id == checkout_id)
    }

    /// Look up a plan by the exact provider display name.
    pub fn by_display_name(&self, name: &str) -> Option<&PlanDetails> {
        self.plans.iter().find(|p| p.display_name == name)
    }

    /// Iterate over all plans.
    pub fn iter(&self) -> impl Iterator<Item = &PlanDetails> {
        self.plans.iter()
    }
}
