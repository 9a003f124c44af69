use async_trait::async_trait;
use auth::Identity;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::LoginCommand;
use crate::domain::account::models::LoginOutcome;
use crate::domain::account::models::NewProfile;
use crate::domain::account::models::PrincipalKind;
use crate::domain::account::models::Profile;
use crate::domain::account::models::ProfileId;
use crate::domain::account::models::RegisterCommand;

/// Port for account and authentication operations.
#[async_trait]
pub trait AccountServicePort: Send + Sync + 'static {
    /// Register a new customer or employee.
    ///
    /// # Arguments
    /// * `command` - Principal kind, validated email, raw password and profile details
    ///
    /// # Returns
    /// Created profile (carries the password hash, never the plaintext)
    ///
    /// # Errors
    /// * `Validation` - Password fails the policy (every failed rule included)
    /// * `DuplicateEmail` - Email is already registered for this principal kind
    /// * `Hashing` - Password hashing failed
    /// * `Database` - Entity store operation failed
    async fn register(&self, command: RegisterCommand) -> Result<Profile, AccountError>;

    /// Check credentials and issue a token.
    ///
    /// # Arguments
    /// * `command` - Principal kind, email and raw password
    ///
    /// # Returns
    /// Issued token, the identity it carries and the profile
    ///
    /// # Errors
    /// * `NotFound` - No account with this email for the principal kind
    /// * `BadPassword` - Password does not match
    /// * `Token` - Token issuance failed
    /// * `Database` - Entity store operation failed
    async fn login(&self, command: LoginCommand) -> Result<LoginOutcome, AccountError>;

    /// Verify a token and confirm its subject still exists.
    ///
    /// # Arguments
    /// * `token` - Raw token string
    ///
    /// # Returns
    /// Identity carried by the token
    ///
    /// # Errors
    /// * `Unauthenticated` - Token is malformed, forged or expired
    /// * `NotFound` - Token subject no longer exists
    /// * `Database` - Entity store operation failed
    async fn introspect(&self, token: &str) -> Result<Identity, AccountError>;

    /// Retrieve a profile by identifier.
    ///
    /// # Errors
    /// * `NotFound` - Profile does not exist
    /// * `Database` - Entity store operation failed
    async fn get_profile(&self, kind: PrincipalKind, id: ProfileId)
        -> Result<Profile, AccountError>;

    /// Retrieve every profile of a principal kind.
    ///
    /// # Errors
    /// * `Database` - Entity store operation failed
    async fn list_profiles(&self, kind: PrincipalKind) -> Result<Vec<Profile>, AccountError>;
}

/// Persistence operations for customer and employee profiles.
#[async_trait]
pub trait EntityStore: Send + Sync + 'static {
    /// Retrieve a profile by email within one principal kind.
    ///
    /// # Returns
    /// Optional profile (None if not found)
    ///
    /// # Errors
    /// * `Database` - Database operation failed
    async fn find_by_email(
        &self,
        kind: PrincipalKind,
        email: &EmailAddress,
    ) -> Result<Option<Profile>, AccountError>;

    /// Retrieve a profile by identifier within one principal kind.
    ///
    /// # Returns
    /// Optional profile (None if not found)
    ///
    /// # Errors
    /// * `Database` - Database operation failed
    async fn find_by_id(
        &self,
        kind: PrincipalKind,
        id: ProfileId,
    ) -> Result<Option<Profile>, AccountError>;

    /// Persist a new profile.
    ///
    /// # Returns
    /// Created profile with its assigned identifier
    ///
    /// # Errors
    /// * `DuplicateEmail` - Email is already registered (unique constraint)
    /// * `Database` - Database operation failed
    async fn create(&self, profile: NewProfile) -> Result<Profile, AccountError>;

    /// Retrieve every profile of a principal kind, oldest first.
    ///
    /// # Errors
    /// * `Database` - Database operation failed
    async fn list(&self, kind: PrincipalKind) -> Result<Vec<Profile>, AccountError>;
}
