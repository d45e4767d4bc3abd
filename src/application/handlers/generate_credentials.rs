//! GenerateCredentialsHandler - manual credential issuance.
//!
//! Support-facing operation behind `POST /credentials/generate`: issues (or
//! reissues) app credentials for an email, sets the plan claims, and emails
//! the password. Unlike webhook provisioning, a delivery failure here fails
//! the request, because delivering credentials is the whole point.

use std::sync::Arc;

use axum::http::StatusCode;
use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

use crate::domain::provisioning::generate_password;
use crate::ports::{
    CredentialNotifier, CredentialRecord, CredentialStore, CredentialsEmail, NewUser, PlanClaims,
    RegistryError, StoreError, UserRegistry,
};

#[derive(Debug, Clone)]
pub struct GenerateCredentialsCommand {
    pub email: String,
    /// Plan length in days; drives the claim expiration.
    pub plan_duration: i64,
}

#[derive(Debug, Clone)]
pub struct GeneratedCredentials {
    pub email: String,
    /// True when a new identity was created (vs a password reset).
    pub created: bool,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Error)]
pub enum CredentialsError {
    #[error("E-mail é obrigatório")]
    MissingEmail,

    #[error("Duração do plano inválida")]
    InvalidDuration,

    #[error("Erro no provedor de identidade: {0}")]
    Registry(String),

    #[error("Erro interno: {0}")]
    Store(#[from] StoreError),

    #[error("Falha ao enviar credenciais: {0}")]
    Delivery(String),
}

impl CredentialsError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            CredentialsError::MissingEmail | CredentialsError::InvalidDuration => {
                StatusCode::BAD_REQUEST
            }
            CredentialsError::Registry(_)
            | CredentialsError::Store(_)
            | CredentialsError::Delivery(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<RegistryError> for CredentialsError {
    fn from(err: RegistryError) -> Self {
        CredentialsError::Registry(err.to_string())
    }
}

pub struct GenerateCredentialsHandler {
    registry: Arc<dyn UserRegistry>,
    credentials: Arc<dyn CredentialStore>,
    notifier: Arc<dyn CredentialNotifier>,
}

impl GenerateCredentialsHandler {
    pub fn new(
        registry: Arc<dyn UserRegistry>,
        credentials: Arc<dyn CredentialStore>,
        notifier: Arc<dyn CredentialNotifier>,
    ) -> Self {
        Self {
            registry,
            credentials,
            notifier,
        }
    }

    pub async fn handle(
        &self,
        cmd: GenerateCredentialsCommand,
    ) -> Result<GeneratedCredentials, CredentialsError> {
        let email = cmd.email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(CredentialsError::MissingEmail);
        }
        if cmd.plan_duration <= 0 {
            return Err(CredentialsError::InvalidDuration);
        }

        let password = generate_password();
        let now = Utc::now();
        let expires_at = now + Duration::days(cmd.plan_duration);

        let (uid, created) = match self.registry.find_by_email(email).await? {
            Some(existing) => {
                self.registry.update_password(&existing.uid, &password).await?;
                (existing.uid, false)
            }
            None => {
                let user = self
                    .registry
                    .create_user(NewUser {
                        email: email.to_string(),
                        password: password.clone(),
                        display_name: email.to_string(),
                        phone: None,
                    })
                    .await?;
                (user.uid, true)
            }
        };

        self.registry
            .set_plan_claims(&uid, &PlanClaims::for_plan(cmd.plan_duration, expires_at))
            .await?;

        self.credentials
            .save(CredentialRecord {
                email: email.to_string(),
                password: password.clone(),
                app_username: email.to_string(),
                created_at: now,
                expires_at,
            })
            .await?;

        self.notifier
            .send_credentials(&CredentialsEmail {
                to_email: email.to_string(),
                to_name: email.to_string(),
                password,
            })
            .await
            .map_err(|e| CredentialsError::Delivery(e.to_string()))?;

        tracing::info!(email = %email, created = created, "credentials issued");

        Ok(GeneratedCredentials {
            email: email.to_string(),
            created,
            expires_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{
        InMemoryCredentialStore, InMemoryUserRegistry, RecordingNotifier,
    };
    use crate::ports::CredentialStore;

    struct Fixture {
        registry: Arc<InMemoryUserRegistry>,
        credentials: Arc<InMemoryCredentialStore>,
        notifier: Arc<RecordingNotifier>,
        handler: GenerateCredentialsHandler,
    }

    fn fixture() -> Fixture {
        let registry = Arc::new(InMemoryUserRegistry::new());
        let credentials = Arc::new(InMemoryCredentialStore::new());
        let notifier = Arc::new(RecordingNotifier::new());
        let handler = GenerateCredentialsHandler::new(
            registry.clone(),
            credentials.clone(),
            notifier.clone(),
        );
        Fixture {
            registry,
            credentials,
            notifier,
            handler,
        }
    }

    fn command(email: &str, plan_duration: i64) -> GenerateCredentialsCommand {
        GenerateCredentialsCommand {
            email: email.to_string(),
            plan_duration,
        }
    }

    #[tokio::test]
    async fn creates_identity_and_emails_password() {
        let f = fixture();

        let result = f.handler.handle(command("ana@example.com", 90)).await.unwrap();

        assert!(result.created);
        assert_eq!(f.registry.user_count().await, 1);
        assert_eq!(f.notifier.sent_count().await, 1);

        let record = f
            .credentials
            .find_by_email("ana@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.app_username, "ana@example.com");
        assert_eq!(record.password, f.notifier.sent().await[0].password);
    }

    #[tokio::test]
    async fn existing_identity_gets_password_reset() {
        let f = fixture();
        f.handler.handle(command("ana@example.com", 30)).await.unwrap();

        let second = f.handler.handle(command("ana@example.com", 180)).await.unwrap();

        assert!(!second.created);
        assert_eq!(f.registry.user_count().await, 1);
        assert_eq!(f.notifier.sent_count().await, 2);

        let user = f
            .registry
            .find_by_email("ana@example.com")
            .await
            .unwrap()
            .unwrap();
        let claims = f.registry.claims_for(&user.uid).await.unwrap();
        assert_eq!(claims.plan_duration, 180);
    }

    #[tokio::test]
    async fn rejects_missing_or_malformed_email() {
        let f = fixture();

        let err = f.handler.handle(command("", 30)).await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let err = f.handler.handle(command("not-an-email", 30)).await.unwrap_err();
        assert!(matches!(err, CredentialsError::MissingEmail));
    }

    #[tokio::test]
    async fn rejects_non_positive_duration() {
        let f = fixture();

        let err = f.handler.handle(command("ana@example.com", 0)).await.unwrap_err();

        assert!(matches!(err, CredentialsError::InvalidDuration));
        assert_eq!(f.registry.user_count().await, 0);
    }

    #[tokio::test]
    async fn delivery_failure_fails_the_request() {
        let f = fixture();
        f.notifier.fail_deliveries().await;

        let err = f.handler.handle(command("ana@example.com", 30)).await.unwrap_err();

        assert!(matches!(err, CredentialsError::Delivery(_)));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
