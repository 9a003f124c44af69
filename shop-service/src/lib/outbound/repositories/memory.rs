use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::NewProfile;
use crate::domain::account::models::PrincipalKind;
use crate::domain::account::models::Profile;
use crate::domain::account::models::ProfileId;
use crate::domain::account::ports::EntityStore;

/// Process-local profile store.
///
/// Mirrors the relational store's guarantees: identifiers are assigned
/// sequentially per principal kind and emails are unique per kind. Used for
/// tests and for running the service without a database.
#[derive(Debug, Default)]
pub struct InMemoryEntityStore {
    tables: RwLock<HashMap<PrincipalKind, Vec<Profile>>>,
}

impl InMemoryEntityStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EntityStore for InMemoryEntityStore {
    async fn find_by_email(
        &self,
        kind: PrincipalKind,
        email: &EmailAddress,
    ) -> Result<Option<Profile>, AccountError> {
        Ok(self
            .tables
            .read()
            .await
            .get(&kind)
            .and_then(|profiles| profiles.iter().find(|p| p.email == *email))
            .cloned())
    }

    async fn find_by_id(
        &self,
        kind: PrincipalKind,
        id: ProfileId,
    ) -> Result<Option<Profile>, AccountError> {
        Ok(self
            .tables
            .read()
            .await
            .get(&kind)
            .and_then(|profiles| profiles.iter().find(|p| p.id == id))
            .cloned())
    }

    async fn create(&self, profile: NewProfile) -> Result<Profile, AccountError> {
        let mut tables = self.tables.write().await;
        let profiles = tables.entry(profile.kind).or_default();

        if profiles.iter().any(|p| p.email == profile.email) {
            return Err(AccountError::DuplicateEmail(profile.email.to_string()));
        }

        let next_id = profiles.last().map_or(1, |p| p.id.0 + 1);
        let created = Profile {
            id: ProfileId(next_id),
            kind: profile.kind,
            email: profile.email,
            password_hash: profile.password_hash,
            details: profile.details,
            created_at: Utc::now(),
        };
        profiles.push(created.clone());

        Ok(created)
    }

    async fn list(&self, kind: PrincipalKind) -> Result<Vec<Profile>, AccountError> {
        Ok(self
            .tables
            .read()
            .await
            .get(&kind)
            .cloned()
            .unwrap_or_default())
    }
}
