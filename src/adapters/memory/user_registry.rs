//! In-memory UserRegistry.
//!
//! Stands in for the managed identity provider in tests and local runs.
//! Keyed by email; uids are random v4 UUIDs.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::ports::{NewUser, PlanClaims, RegisteredUser, RegistryError, UserRegistry};

#[derive(Default)]
pub struct InMemoryUserRegistry {
    users: Arc<RwLock<HashMap<String, RegisteredUser>>>,
    claims: Arc<RwLock<HashMap<String, PlanClaims>>>,
    passwords: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryUserRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims currently set for a uid. Test helper.
    pub async fn claims_for(&self, uid: &str) -> Option<PlanClaims> {
        self.claims.read().await.get(uid).cloned()
    }

    pub async fn user_count(&self) -> usize {
        self.users.read().await.len()
    }
}

#[async_trait]
impl UserRegistry for InMemoryUserRegistry {
    async fn find_by_email(&self, email: &str) -> Result<Option<RegisteredUser>, RegistryError> {
        let users = self.users.read().await;
        Ok(users.get(email).cloned())
    }

    async fn create_user(&self, user: NewUser) -> Result<RegisteredUser, RegistryError> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.email) {
            return Err(RegistryError::AlreadyExists(user.email));
        }

        let registered = RegisteredUser {
            uid: Uuid::new_v4().to_string(),
            email: user.email.clone(),
            display_name: Some(user.display_name),
            phone: user.phone,
        };
        users.insert(user.email, registered.clone());
        Ok(registered)
    }

    async fn update_password(&self, uid: &str, password: &str) -> Result<(), RegistryError> {
        let mut passwords = self.passwords.write().await;
        passwords.insert(uid.to_string(), password.to_string());
        Ok(())
    }

    async fn set_plan_claims(&self, uid: &str, claims: &PlanClaims) -> Result<(), RegistryError> {
        let mut map = self.claims.write().await;
        map.insert(uid.to_string(), claims.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            email: email.to_string(),
            password: "s3cret".to_string(),
            display_name: "Maria Silva".to_string(),
            phone: Some("+5511999887766".to_string()),
        }
    }

    #[tokio::test]
    async fn create_then_find() {
        let registry = InMemoryUserRegistry::new();

        let created = registry.create_user(new_user("maria@example.com")).await.unwrap();
        let found = registry.find_by_email("maria@example.com").await.unwrap();

        assert_eq!(found.unwrap().uid, created.uid);
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let registry = InMemoryUserRegistry::new();
        registry.create_user(new_user("maria@example.com")).await.unwrap();

        let err = registry
            .create_user(new_user("maria@example.com"))
            .await
            .unwrap_err();

        assert!(matches!(err, RegistryError::AlreadyExists(_)));
    }

    #[tokio::test]
    async fn claims_are_replaced_per_uid() {
        let registry = InMemoryUserRegistry::new();
        let user = registry.create_user(new_user("maria@example.com")).await.unwrap();

        let first = PlanClaims::for_plan(30, chrono::Utc::now());
        let second = PlanClaims::for_plan(180, chrono::Utc::now());
        registry.set_plan_claims(&user.uid, &first).await.unwrap();
        registry.set_plan_claims(&user.uid, &second).await.unwrap();

        let stored = registry.claims_for(&user.uid).await.unwrap();
        assert_eq!(stored.plan_duration, 180);
        assert_eq!(stored.role, "user");
    }
}
