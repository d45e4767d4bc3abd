//! queima-gateway entry point: load config, wire adapters, serve.

use std::sync::Arc;
use std::time::Duration;

use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use queima_gateway::adapters::email::SmtpNotifier;
use queima_gateway::adapters::http::{router, AppState};
use queima_gateway::adapters::memory::{
    InMemoryCredentialStore, InMemoryPaymentStore, InMemorySubscriptionStore,
    InMemoryUserPlanStore, InMemoryUserRegistry,
};
use queima_gateway::application::handlers::{
    GenerateCredentialsHandler, ProcessWebhookHandler, UserProvisioner,
};
use queima_gateway::config::AppConfig;
use queima_gateway::domain::webhook::SignatureVerifier;
use queima_gateway::ports::{
    CredentialNotifier, CredentialStore, PaymentStore, SubscriptionStore, UserPlanStore,
    UserRegistry,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.server.log_level.clone())),
        )
        .init();

    tracing::info!(
        environment = ?config.server.environment,
        sandbox = config.payment.sandbox,
        "starting queima-gateway"
    );

    // Stores and registry. In-memory reference adapters; deployments swap
    // real backends in behind the same ports.
    let payments: Arc<dyn PaymentStore> = Arc::new(InMemoryPaymentStore::new());
    let subscriptions: Arc<dyn SubscriptionStore> = Arc::new(InMemorySubscriptionStore::new());
    let user_plans: Arc<dyn UserPlanStore> = Arc::new(InMemoryUserPlanStore::new());
    let credentials: Arc<dyn CredentialStore> = Arc::new(InMemoryCredentialStore::new());
    let registry: Arc<dyn UserRegistry> = Arc::new(InMemoryUserRegistry::new());
    let notifier: Arc<dyn CredentialNotifier> = Arc::new(SmtpNotifier::new(&config.email)?);

    let provisioner = Arc::new(UserProvisioner::new(
        registry.clone(),
        user_plans,
        credentials.clone(),
        notifier.clone(),
    ));
    let webhook_handler = Arc::new(ProcessWebhookHandler::new(
        SignatureVerifier::new(config.payment.webhook_secret.clone(), config.payment.sandbox),
        payments,
        subscriptions,
        provisioner,
    ));
    let credentials_handler = Arc::new(GenerateCredentialsHandler::new(
        registry, credentials, notifier,
    ));

    let state = AppState {
        webhook_handler,
        credentials_handler,
        webhook_shared_secret: config.payment.webhook_secret.clone(),
    };

    let app = router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )));

    let addr = config.server.socket_addr()?;
    tracing::info!(%addr, "listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
