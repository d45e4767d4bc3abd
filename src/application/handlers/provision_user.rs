//! UserProvisioner - creates or reuses an identity after an approved payment.

use std::sync::Arc;

use chrono::{Duration, Utc};
use thiserror::Error;

use crate::domain::plan::{PlanCatalog, PlanKind};
use crate::domain::provisioning::{generate_password, normalize_phone};
use crate::ports::{
    AccessLevel, CredentialNotifier, CredentialRecord, CredentialStore, CredentialsEmail, NewUser,
    PlanClaims, RegistryError, StoreError, UserPlanRecord, UserPlanStore, UserRegistry,
};

/// How the credentials email went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailDelivery {
    Sent,
    Failed(String),
    /// Existing identity reused; there are no new credentials to deliver.
    NotAttempted,
}

/// Result of provisioning one user for one plan.
#[derive(Debug, Clone)]
pub struct ProvisionOutcome {
    pub uid: String,
    pub plan: PlanKind,
    /// True when a new identity (and password) was created.
    pub created: bool,
    pub email: EmailDelivery,
}

#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error("identity provider error: {0}")]
    Registry(String),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl From<RegistryError> for ProvisionError {
    fn from(err: RegistryError) -> Self {
        ProvisionError::Registry(err.to_string())
    }
}

/// Provisions app access for a paying customer: identity, plan record,
/// custom claims, and (on creation) a credentials email.
///
/// Provisioning is idempotent per email: an existing identity is reused and
/// its plan simply overwritten, so duplicate approvals converge.
pub struct UserProvisioner {
    registry: Arc<dyn UserRegistry>,
    user_plans: Arc<dyn UserPlanStore>,
    credentials: Arc<dyn CredentialStore>,
    notifier: Arc<dyn CredentialNotifier>,
}

impl UserProvisioner {
    pub fn new(
        registry: Arc<dyn UserRegistry>,
        user_plans: Arc<dyn UserPlanStore>,
        credentials: Arc<dyn CredentialStore>,
        notifier: Arc<dyn CredentialNotifier>,
    ) -> Self {
        Self {
            registry,
            user_plans,
            credentials,
            notifier,
        }
    }

    pub async fn provision(
        &self,
        name: &str,
        email: &str,
        phone: &str,
        plan: PlanKind,
    ) -> Result<ProvisionOutcome, ProvisionError> {
        let normalized_phone = normalize_phone(phone);
        let details = PlanCatalog::global().details(plan);
        let now = Utc::now();
        let expires_at = now + Duration::days(details.duration_days);

        // 1. Find or create the identity.
        let (uid, created, email_delivery) = match self.registry.find_by_email(email).await? {
            Some(existing) => {
                tracing::info!(uid = %existing.uid, email = %email, "reusing existing identity");
                (existing.uid, false, EmailDelivery::NotAttempted)
            }
            None => self.create_identity(name, email, &normalized_phone, expires_at).await?,
        };

        // 2. Overwrite the plan record.
        self.user_plans
            .save(UserPlanRecord {
                uid: uid.clone(),
                email: email.to_string(),
                name: name.to_string(),
                phone: normalized_phone,
                plan,
                access_level: AccessLevel::Full,
                plan_expiration: expires_at,
                features: details.features.iter().map(|f| f.to_string()).collect(),
                plan_duration_days: details.duration_days,
                created_at: now,
                updated_at: now,
            })
            .await?;

        // 3. Replace the custom claims the app reads for access control.
        self.registry
            .set_plan_claims(&uid, &PlanClaims::for_plan(details.duration_days, expires_at))
            .await?;

        tracing::info!(
            uid = %uid,
            plan = %plan,
            created = created,
            "user provisioned"
        );

        Ok(ProvisionOutcome {
            uid,
            plan,
            created,
            email: email_delivery,
        })
    }

    async fn create_identity(
        &self,
        name: &str,
        email: &str,
        phone: &str,
        expires_at: chrono::DateTime<Utc>,
    ) -> Result<(String, bool, EmailDelivery), ProvisionError> {
        let password = generate_password();
        let new_user = NewUser {
            email: email.to_string(),
            password: password.clone(),
            display_name: name.to_string(),
            phone: Some(phone.to_string()),
        };

        let uid = match self.registry.create_user(new_user).await {
            Ok(user) => user.uid,
            // A concurrent delivery won the create; fall back to its identity.
            Err(RegistryError::AlreadyExists(_)) => {
                let existing = self
                    .registry
                    .find_by_email(email)
                    .await?
                    .ok_or_else(|| {
                        ProvisionError::Registry(format!(
                            "identity for {email} reported as existing but not found"
                        ))
                    })?;
                return Ok((existing.uid, false, EmailDelivery::NotAttempted));
            }
            Err(other) => return Err(other.into()),
        };

        self.credentials
            .save(CredentialRecord {
                email: email.to_string(),
                password: password.clone(),
                app_username: email.to_string(),
                created_at: Utc::now(),
                expires_at,
            })
            .await?;

        // Credentials email is best-effort: a delivery failure must not fail
        // the webhook, or the provider would retry a succeeded provisioning.
        let delivery = match self
            .notifier
            .send_credentials(&CredentialsEmail {
                to_email: email.to_string(),
                to_name: name.to_string(),
                password,
            })
            .await
        {
            Ok(()) => EmailDelivery::Sent,
            Err(err) => {
                tracing::warn!(email = %email, error = %err, "credentials email failed");
                EmailDelivery::Failed(err.to_string())
            }
        };

        Ok((uid, true, delivery))
    }
}
