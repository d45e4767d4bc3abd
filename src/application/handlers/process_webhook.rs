//! ProcessWebhookHandler - the webhook pipeline and event dispatcher.
//!
//! Pipeline: parse → validate → verify signature → resolve plan → dispatch.
//! Transport failures (bad payload, bad signature) are errors and map to
//! 4xx/5xx; business outcomes ("plan not found", "unrecognized event") are
//! `success: false` results returned with 200-level handling so the provider
//! does not retry deliveries we have already judged.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;

use crate::domain::plan::{resolve_plan, PlanCatalog, PlanDetails};
use crate::domain::webhook::{
    EventKind, SignatureVerifier, SubscriptionPayload, SubscriptionStatus, WebhookError,
    WebhookEvent,
};
use crate::ports::{
    PaymentRecord, PaymentStatus, PaymentStore, SaveResult, SubscriptionPatch,
    SubscriptionRecord, SubscriptionStore,
};

use super::provision_user::UserProvisioner;

/// Outcome of processing one delivery.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessOutcome {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl ProcessOutcome {
    fn ok(message: impl Into<String>, data: Option<serde_json::Value>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
        }
    }

    fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
        }
    }
}

/// Processes verified webhook deliveries against the stores.
pub struct ProcessWebhookHandler {
    verifier: SignatureVerifier,
    payments: Arc<dyn PaymentStore>,
    subscriptions: Arc<dyn SubscriptionStore>,
    provisioner: Arc<UserProvisioner>,
}

impl ProcessWebhookHandler {
    pub fn new(
        verifier: SignatureVerifier,
        payments: Arc<dyn PaymentStore>,
        subscriptions: Arc<dyn SubscriptionStore>,
        provisioner: Arc<UserProvisioner>,
    ) -> Self {
        Self {
            verifier,
            payments,
            subscriptions,
            provisioner,
        }
    }

    /// Runs the full pipeline on a raw delivery.
    pub async fn handle(
        &self,
        raw_body: &[u8],
        signature_header: Option<&str>,
    ) -> Result<ProcessOutcome, WebhookError> {
        // 1. Parse.
        let parsed: serde_json::Value = serde_json::from_slice(raw_body)
            .map_err(|e| WebhookError::Parse(e.to_string()))?;
        let event: WebhookEvent = serde_json::from_value(parsed.clone())
            .map_err(|e| WebhookError::Validation(e.to_string()))?;

        // 2. Validate structure before touching anything.
        event.validate().map_err(WebhookError::Validation)?;

        // 3. Verify authenticity over the raw bytes as received.
        if !self.verifier.verify(Some(raw_body), &parsed, signature_header) {
            return Err(match signature_header {
                None => WebhookError::MissingSignature,
                Some(_) => WebhookError::InvalidSignature,
            });
        }

        let kind = event.kind();
        tracing::info!(
            event = %event.event,
            transaction_id = %event.transaction_id,
            "webhook verified"
        );

        // 4. Dispatch.
        match kind {
            EventKind::PaymentApproved => self.payment_approved(&event).await,
            EventKind::PaymentRejected => {
                self.payment_status(&event, PaymentStatus::Rejected).await
            }
            EventKind::PaymentCancelled => {
                self.payment_status(&event, PaymentStatus::Cancelled).await
            }
            EventKind::PaymentRefunded => {
                self.payment_status(&event, PaymentStatus::Refunded).await
            }
            EventKind::SubscriptionCreated
            | EventKind::SubscriptionUpdated
            | EventKind::SubscriptionCancelled
            | EventKind::SubscriptionExpired => self.subscription_event(&event, kind).await,
            EventKind::Unknown => {
                tracing::warn!(event = %event.event, "unrecognized webhook event");
                Ok(ProcessOutcome::rejected("Evento não reconhecido"))
            }
        }
    }

    async fn payment_approved(&self, event: &WebhookEvent) -> Result<ProcessOutcome, WebhookError> {
        let Some(plan) = resolve_plan(PlanCatalog::global(), event) else {
            tracing::warn!(
                transaction_id = %event.transaction_id,
                product = %event.product.name,
                "no plan identified for approved payment"
            );
            return Ok(ProcessOutcome::rejected("Não foi possível identificar o plano"));
        };

        // Re-delivery of an already approved payment is an idempotent skip.
        if let Some(existing) = self
            .payments
            .find_by_transaction_id(&event.transaction_id)
            .await?
        {
            if existing.status == PaymentStatus::Approved {
                tracing::info!(
                    transaction_id = %event.transaction_id,
                    "duplicate approval, skipping"
                );
                return Ok(ProcessOutcome::ok(
                    "Pagamento já processado anteriormente",
                    Some(serde_json::json!({ "transaction_id": event.transaction_id })),
                ));
            }
        }

        let outcome = self
            .provisioner
            .provision(
                &event.customer.name,
                &event.customer.email,
                &event.customer.phone,
                plan.kind,
            )
            .await
            .map_err(|e| WebhookError::Provisioning(e.to_string()))?;

        // Conditional insert closes the race against a concurrent duplicate
        // delivery; losing it is fine because provisioning converges.
        let saved = self
            .payments
            .insert_if_absent(self.payment_record(event, plan))
            .await?;
        if saved == SaveResult::AlreadyExists {
            tracing::info!(
                transaction_id = %event.transaction_id,
                "concurrent delivery already recorded this payment"
            );
        }

        Ok(ProcessOutcome::ok(
            "Pagamento processado com sucesso",
            Some(serde_json::json!({
                "transaction_id": event.transaction_id,
                "uid": outcome.uid,
                "plan": outcome.plan,
                "account_created": outcome.created,
            })),
        ))
    }

    fn payment_record(&self, event: &WebhookEvent, plan: &PlanDetails) -> PaymentRecord {
        PaymentRecord {
            transaction_id: event.transaction_id.clone(),
            status: PaymentStatus::Approved,
            amount: event.amount,
            payment_method: event.payment_method.clone(),
            customer_email: event.customer.email.clone(),
            customer_name: event.customer.name.clone(),
            plan: Some(plan.kind),
            created_at: event.created_at,
            processed_at: Utc::now(),
        }
    }

    async fn payment_status(
        &self,
        event: &WebhookEvent,
        status: PaymentStatus,
    ) -> Result<ProcessOutcome, WebhookError> {
        let updated = self
            .payments
            .update_status(&event.transaction_id, status)
            .await?;

        if !updated {
            tracing::info!(
                transaction_id = %event.transaction_id,
                status = status.as_str(),
                "status update for unknown payment, nothing to do"
            );
            return Ok(ProcessOutcome::ok(
                "Pagamento não encontrado, nenhuma ação necessária",
                None,
            ));
        }

        Ok(ProcessOutcome::ok(
            format!("Status do pagamento atualizado para {}", status.as_str()),
            Some(serde_json::json!({
                "transaction_id": event.transaction_id,
                "status": status.as_str(),
            })),
        ))
    }

    async fn subscription_event(
        &self,
        event: &WebhookEvent,
        kind: EventKind,
    ) -> Result<ProcessOutcome, WebhookError> {
        let Some(payload) = &event.subscription else {
            return Ok(ProcessOutcome::rejected("Dados da assinatura não encontrados"));
        };

        match kind {
            EventKind::SubscriptionCreated => {
                self.subscriptions
                    .upsert(subscription_record(event, payload))
                    .await?;
                Ok(ProcessOutcome::ok(
                    "Assinatura criada",
                    Some(serde_json::json!({ "subscription_id": payload.id })),
                ))
            }
            EventKind::SubscriptionUpdated => {
                let merged = self
                    .subscriptions
                    .merge(&payload.id, subscription_patch(payload))
                    .await?;
                if merged {
                    Ok(ProcessOutcome::ok(
                        "Assinatura atualizada",
                        Some(serde_json::json!({ "subscription_id": payload.id })),
                    ))
                } else {
                    Ok(ProcessOutcome::ok(
                        "Assinatura não encontrada, nenhuma ação necessária",
                        None,
                    ))
                }
            }
            EventKind::SubscriptionCancelled | EventKind::SubscriptionExpired => {
                let status = if kind == EventKind::SubscriptionCancelled {
                    SubscriptionStatus::Cancelled
                } else {
                    SubscriptionStatus::Expired
                };
                let updated = self
                    .subscriptions
                    .set_status(&payload.id, status, Utc::now())
                    .await?;
                if updated {
                    Ok(ProcessOutcome::ok(
                        format!("Assinatura marcada como {}", status.as_str()),
                        Some(serde_json::json!({ "subscription_id": payload.id })),
                    ))
                } else {
                    Ok(ProcessOutcome::ok(
                        "Assinatura não encontrada, nenhuma ação necessária",
                        None,
                    ))
                }
            }
            _ => Ok(ProcessOutcome::rejected("Evento não reconhecido")),
        }
    }
}

fn subscription_record(event: &WebhookEvent, payload: &SubscriptionPayload) -> SubscriptionRecord {
    let now = Utc::now();
    SubscriptionRecord {
        id: payload.id.clone(),
        status: SubscriptionStatus::Active,
        plan_type: payload.plan_type.clone(),
        price: payload.price,
        customer_email: event.customer.email.clone(),
        start_date: payload.start_date,
        end_date: payload.end_date,
        last_payment_date: payload.last_payment_date,
        next_payment_date: payload.next_payment_date,
        billing_cycle: payload.billing_cycle.clone(),
        payment_method: payload.payment_method.clone(),
        cancelled_at: None,
        expired_at: None,
        created_at: now,
        updated_at: now,
    }
}

fn subscription_patch(payload: &SubscriptionPayload) -> SubscriptionPatch {
    SubscriptionPatch {
        status: Some(payload.status),
        plan_type: Some(payload.plan_type.clone()),
        price: Some(payload.price),
        end_date: payload.end_date,
        last_payment_date: payload.last_payment_date,
        next_payment_date: payload.next_payment_date,
        billing_cycle: payload.billing_cycle.clone(),
        payment_method: payload.payment_method.clone(),
    }
}
