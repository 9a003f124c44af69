use std::sync::Arc;

use async_trait::async_trait;
use auth::CredentialHasher;
use auth::Identity;
use auth::PasswordPolicy;
use auth::Role;
use auth::TokenService;
use auth::DEFAULT_TTL_HOURS;
use chrono::Duration;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::AdminAllowlist;
use crate::domain::account::models::LoginCommand;
use crate::domain::account::models::LoginOutcome;
use crate::domain::account::models::NewProfile;
use crate::domain::account::models::PrincipalKind;
use crate::domain::account::models::Profile;
use crate::domain::account::models::ProfileId;
use crate::domain::account::models::RegisterCommand;
use crate::domain::account::ports::AccountServicePort;
use crate::domain::account::ports::EntityStore;

/// Domain service implementing registration, login and token introspection.
///
/// Concrete implementation of AccountServicePort with dependency injection.
pub struct AuthFlowService<S>
where
    S: EntityStore,
{
    store: Arc<S>,
    token_service: Arc<TokenService>,
    policy: PasswordPolicy,
    hasher: CredentialHasher,
    admins: AdminAllowlist,
    token_ttl: Duration,
}

impl<S> AuthFlowService<S>
where
    S: EntityStore,
{
    /// Create a new service with injected dependencies and default settings.
    ///
    /// # Arguments
    /// * `store` - Profile persistence implementation
    /// * `token_service` - Shared token issuer/verifier
    ///
    /// # Returns
    /// Service using the default password policy, bcrypt cost 14, the
    /// default admin allowlist and a two hour token lifetime
    pub fn new(store: Arc<S>, token_service: Arc<TokenService>) -> Self {
        Self {
            store,
            token_service,
            policy: PasswordPolicy::new(),
            hasher: CredentialHasher::new(),
            admins: AdminAllowlist::default(),
            token_ttl: Duration::hours(DEFAULT_TTL_HOURS),
        }
    }

    pub fn with_policy(mut self, policy: PasswordPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_hasher(mut self, hasher: CredentialHasher) -> Self {
        self.hasher = hasher;
        self
    }

    pub fn with_admins(mut self, admins: AdminAllowlist) -> Self {
        self.admins = admins;
        self
    }

    pub fn with_token_ttl(mut self, token_ttl: Duration) -> Self {
        self.token_ttl = token_ttl;
        self
    }

    /// bcrypt is CPU-bound; keep it off the async workers.
    async fn hash_password(&self, password: &str) -> Result<String, AccountError> {
        let hasher = self.hasher;
        let password = password.to_string();

        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AccountError::Unknown(format!("Hashing task failed: {}", e)))?
            .map_err(|e| AccountError::Hashing(e.to_string()))
    }

    async fn verify_password(&self, password: &str, hash: &str) -> Result<bool, AccountError> {
        let hasher = self.hasher;
        let password = password.to_string();
        let hash = hash.to_string();

        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| AccountError::Unknown(format!("Verification task failed: {}", e)))
    }
}

#[async_trait]
impl<S> AccountServicePort for AuthFlowService<S>
where
    S: EntityStore,
{
    async fn register(&self, command: RegisterCommand) -> Result<Profile, AccountError> {
        self.policy.validate(&command.password)?;

        // Enrolling an allowlisted employee email mints an admin account.
        if command.kind == PrincipalKind::Employee
            && self.admins.contains(command.email.as_str())
            && command.requested_by != Some(Role::Admin)
        {
            tracing::warn!(
                requested_by = ?command.requested_by,
                "Registration refused: reserved administrator email"
            );
            return Err(AccountError::ReservedEmail(command.email.to_string()));
        }

        if self
            .store
            .find_by_email(command.kind, &command.email)
            .await?
            .is_some()
        {
            return Err(AccountError::DuplicateEmail(command.email.to_string()));
        }

        let password_hash = self.hash_password(&command.password).await?;

        let profile = self
            .store
            .create(NewProfile {
                kind: command.kind,
                email: command.email,
                password_hash,
                details: command.details,
            })
            .await?;

        tracing::info!(
            kind = %profile.kind,
            profile_id = %profile.id,
            "Account registered"
        );

        Ok(profile)
    }

    async fn login(&self, command: LoginCommand) -> Result<LoginOutcome, AccountError> {
        let profile = match self
            .store
            .find_by_email(command.kind, &command.email)
            .await?
        {
            Some(profile) => profile,
            None => {
                tracing::warn!(kind = %command.kind, "Login failed: unknown email");
                return Err(AccountError::NotFound(command.email.to_string()));
            }
        };

        if !self
            .verify_password(&command.password, &profile.password_hash)
            .await?
        {
            tracing::warn!(
                kind = %command.kind,
                profile_id = %profile.id,
                "Login failed: incorrect password"
            );
            return Err(AccountError::BadPassword);
        }

        let role = self.admins.role_for(profile.kind, profile.email.as_str());
        let identity = Identity::new(profile.id.0, profile.email.as_str(), role);

        let token = self
            .token_service
            .issue(&identity, self.token_ttl)
            .map_err(|e| AccountError::Token(e.to_string()))?;

        tracing::info!(
            kind = %profile.kind,
            profile_id = %profile.id,
            role = %role,
            expires_at = %token.expires_at,
            "Token issued"
        );

        Ok(LoginOutcome {
            profile,
            identity,
            token,
        })
    }

    async fn introspect(&self, token: &str) -> Result<Identity, AccountError> {
        let identity = self
            .token_service
            .verify(token.trim())
            .map_err(AccountError::Unauthenticated)?;

        let kind = PrincipalKind::for_role(identity.role);
        self.store
            .find_by_id(kind, ProfileId(identity.subject_id))
            .await?
            .ok_or_else(|| AccountError::NotFound(identity.subject_id.to_string()))?;

        Ok(identity)
    }

    async fn get_profile(
        &self,
        kind: PrincipalKind,
        id: ProfileId,
    ) -> Result<Profile, AccountError> {
        self.store
            .find_by_id(kind, id)
            .await?
            .ok_or(AccountError::NotFound(id.to_string()))
    }

    async fn list_profiles(&self, kind: PrincipalKind) -> Result<Vec<Profile>, AccountError> {
        self.store.list(kind).await
    }
}
