//! End-to-end webhook pipeline tests over the in-memory adapters.

use std::sync::Arc;

use queima_gateway::adapters::memory::{
    InMemoryCredentialStore, InMemoryPaymentStore, InMemorySubscriptionStore,
    InMemoryUserPlanStore, InMemoryUserRegistry, RecordingNotifier,
};
use queima_gateway::application::handlers::{ProcessWebhookHandler, UserProvisioner};
use queima_gateway::domain::plan::PlanKind;
use queima_gateway::domain::webhook::verifier::sign;
use queima_gateway::domain::webhook::{SignatureVerifier, WebhookError};
use queima_gateway::ports::{
    PaymentStatus, PaymentStore, SubscriptionStore, UserPlanStore, UserRegistry,
};

const SECRET: &str = "whsec_integration";

struct Gateway {
    payments: Arc<InMemoryPaymentStore>,
    subscriptions: Arc<InMemorySubscriptionStore>,
    user_plans: Arc<InMemoryUserPlanStore>,
    registry: Arc<InMemoryUserRegistry>,
    notifier: Arc<RecordingNotifier>,
    handler: ProcessWebhookHandler,
}

fn gateway() -> Gateway {
    let payments = Arc::new(InMemoryPaymentStore::new());
    let subscriptions = Arc::new(InMemorySubscriptionStore::new());
    let user_plans = Arc::new(InMemoryUserPlanStore::new());
    let registry = Arc::new(InMemoryUserRegistry::new());
    let notifier = Arc::new(RecordingNotifier::new());

    let provisioner = Arc::new(UserProvisioner::new(
        registry.clone(),
        user_plans.clone(),
        Arc::new(InMemoryCredentialStore::new()),
        notifier.clone(),
    ));
    let handler = ProcessWebhookHandler::new(
        SignatureVerifier::new(SECRET, false),
        payments.clone(),
        subscriptions.clone(),
        provisioner,
    );

    Gateway {
        payments,
        subscriptions,
        user_plans,
        registry,
        notifier,
        handler,
    }
}

fn approved_payment(transaction_id: &str, product_name: &str) -> serde_json::Value {
    serde_json::json!({
        "event": "payment.approved",
        "transaction_id": transaction_id,
        "status": "approved",
        "amount": 27.00,
        "payment_method": "pix",
        "created_at": "2024-06-10T14:30:00Z",
        "customer": {
            "name": "Maria Silva",
            "email": "maria@example.com",
            "phone": "+5511999887766"
        },
        "product": {
            "name": product_name,
            "price": 27.00
        }
    })
}

fn deliver(payload: &serde_json::Value) -> (Vec<u8>, String) {
    let body = serde_json::to_vec(payload).unwrap();
    let signature = sign(SECRET, &body);
    (body, signature)
}

#[tokio::test]
async fn thirty_day_purchase_provisions_account() {
    let gw = gateway();
    let (body, signature) = deliver(&approved_payment(
        "TRX-30D",
        "30 DIAS - APP QUEIMA DEFINITIVA",
    ));

    let outcome = gw.handler.handle(&body, Some(&signature)).await.unwrap();

    assert!(outcome.success);
    assert_eq!(outcome.message, "Pagamento processado com sucesso");

    let payment = gw
        .payments
        .find_by_transaction_id("TRX-30D")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(payment.status, PaymentStatus::Approved);
    assert_eq!(payment.plan, Some(PlanKind::ThirtyDay));

    let user = gw
        .registry
        .find_by_email("maria@example.com")
        .await
        .unwrap()
        .unwrap();
    let plan = gw.user_plans.find_by_uid(&user.uid).await.unwrap().unwrap();
    assert_eq!(plan.plan, PlanKind::ThirtyDay);
    assert_eq!(plan.plan_duration_days, 30);

    let claims = gw.registry.claims_for(&user.uid).await.unwrap();
    assert_eq!(claims.plan_duration, 30);
    assert_eq!(gw.notifier.sent_count().await, 1);
}

#[tokio::test]
async fn checkout_id_overrides_mismatched_product_name() {
    let gw = gateway();
    let mut payload = approved_payment("TRX-180D", "30 DIAS - APP QUEIMA DEFINITIVA");
    payload["checkout_url"] =
        serde_json::json!("https://checkout.perfectpay.com.br/pay/PPU38CPIEN1");
    let (body, signature) = deliver(&payload);

    gw.handler.handle(&body, Some(&signature)).await.unwrap();

    let payment = gw
        .payments
        .find_by_transaction_id("TRX-180D")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(payment.plan, Some(PlanKind::HundredEightyDay));

    let user = gw
        .registry
        .find_by_email("maria@example.com")
        .await
        .unwrap()
        .unwrap();
    let plan = gw.user_plans.find_by_uid(&user.uid).await.unwrap().unwrap();
    assert_eq!(plan.plan_duration_days, 180);
}

#[tokio::test]
async fn duplicate_delivery_is_idempotent() {
    let gw = gateway();
    let (body, signature) = deliver(&approved_payment(
        "TRX-DUP",
        "30 DIAS - APP QUEIMA DEFINITIVA",
    ));

    let first = gw.handler.handle(&body, Some(&signature)).await.unwrap();
    let second = gw.handler.handle(&body, Some(&signature)).await.unwrap();

    assert!(first.success);
    assert!(second.success);
    assert_eq!(second.message, "Pagamento já processado anteriormente");

    assert_eq!(gw.payments.len().await, 1);
    assert_eq!(gw.registry.user_count().await, 1);
    assert_eq!(gw.user_plans.len().await, 1);
    assert_eq!(gw.notifier.sent_count().await, 1);
}

#[tokio::test]
async fn rejection_for_unseen_transaction_is_a_noop() {
    let gw = gateway();
    let mut payload = approved_payment("TRX-NEVER-SEEN", "30 DIAS - APP QUEIMA DEFINITIVA");
    payload["event"] = serde_json::json!("payment.rejected");
    payload["status"] = serde_json::json!("rejected");
    let (body, signature) = deliver(&payload);

    let outcome = gw.handler.handle(&body, Some(&signature)).await.unwrap();

    assert!(outcome.success);
    assert_eq!(gw.payments.len().await, 0);
    assert_eq!(gw.registry.user_count().await, 0);
}

#[tokio::test]
async fn unknown_event_changes_nothing() {
    let gw = gateway();
    let mut payload = approved_payment("TRX-ODD", "30 DIAS - APP QUEIMA DEFINITIVA");
    payload["event"] = serde_json::json!("payment.disputed");
    let (body, signature) = deliver(&payload);

    let outcome = gw.handler.handle(&body, Some(&signature)).await.unwrap();

    assert!(!outcome.success);
    assert_eq!(outcome.message, "Evento não reconhecido");
    assert_eq!(gw.payments.len().await, 0);
    assert_eq!(gw.subscriptions.len().await, 0);
}

#[tokio::test]
async fn missing_signature_is_rejected_before_any_write() {
    let gw = gateway();
    let payload = approved_payment("TRX-NOSIG", "30 DIAS - APP QUEIMA DEFINITIVA");
    let body = serde_json::to_vec(&payload).unwrap();

    let err = gw.handler.handle(&body, None).await.unwrap_err();

    assert!(matches!(err, WebhookError::MissingSignature));
    assert_eq!(gw.payments.len().await, 0);
    assert_eq!(gw.registry.user_count().await, 0);
}

#[tokio::test]
async fn subscription_lifecycle_is_tracked() {
    let gw = gateway();
    let mut payload = approved_payment("TRX-SUB", "💪 Plano Evolução (3 Meses)");
    payload["event"] = serde_json::json!("subscription.created");
    payload["amount"] = serde_json::json!(39.90);
    payload["product"]["price"] = serde_json::json!(39.90);
    payload["subscription"] = serde_json::json!({
        "id": "sub_100",
        "status": "active",
        "start_date": "2024-06-10T14:30:00Z",
        "plan_type": "💪 Plano Evolução (3 Meses)",
        "price": 39.90,
        "billing_cycle": "monthly"
    });
    let (body, signature) = deliver(&payload);
    let outcome = gw.handler.handle(&body, Some(&signature)).await.unwrap();
    assert!(outcome.success);

    payload["event"] = serde_json::json!("subscription.cancelled");
    payload["subscription"]["status"] = serde_json::json!("cancelled");
    let (body, signature) = deliver(&payload);
    let outcome = gw.handler.handle(&body, Some(&signature)).await.unwrap();
    assert!(outcome.success);

    let record = gw
        .subscriptions
        .find_by_id("sub_100")
        .await
        .unwrap()
        .unwrap();
    assert!(record.cancelled_at.is_some());
    assert_eq!(gw.subscriptions.len().await, 1);
}
