use std::collections::HashSet;

use thiserror::Error;

use crate::identity::Identity;
use crate::identity::Role;
use crate::token::TokenError;
use crate::token::TokenService;

/// Admission failures.
///
/// `Invalid` deliberately renders the same message whatever the underlying
/// token failure was; the cause is only reachable through `source()` for
/// logging.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AdmissionError {
    #[error("Missing auth token")]
    MissingToken,

    #[error("Invalid or expired token")]
    Invalid(#[source] TokenError),

    #[error("Role {0} is not authorized for this resource")]
    Forbidden(Role),
}

/// Role-gated admission check.
///
/// One gate per accepted role set; protected route groups each hold their
/// own instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleGate {
    accepted: HashSet<Role>,
}

impl RoleGate {
    /// Gate admitting any of the given roles.
    pub fn new(accepted: impl IntoIterator<Item = Role>) -> Self {
        Self {
            accepted: accepted.into_iter().collect(),
        }
    }

    /// Gate for customer-facing routes: CUSTOMER or ADMIN.
    pub fn customers() -> Self {
        Self::new([Role::Customer, Role::Admin])
    }

    /// Gate for staff routes: EMPLOYEE or ADMIN.
    pub fn employees() -> Self {
        Self::new([Role::Employee, Role::Admin])
    }

    pub fn accepts(&self, role: Role) -> bool {
        self.accepted.contains(&role)
    }

    /// Decide whether a raw token is admitted.
    ///
    /// # Arguments
    /// * `tokens` - Service used to verify the token
    /// * `raw_token` - Token as supplied by the client (surrounding whitespace allowed)
    ///
    /// # Returns
    /// Verified identity to attach to the request
    ///
    /// # Errors
    /// * `MissingToken` - Empty after trimming
    /// * `Invalid` - Verification failed (malformed, bad signature or expired)
    /// * `Forbidden` - Valid token whose role is outside the accepted set
    pub fn admit(&self, tokens: &TokenService, raw_token: &str) -> Result<Identity, AdmissionError> {
        let token = raw_token.trim();
        if token.is_empty() {
            return Err(AdmissionError::MissingToken);
        }

        let identity = tokens.verify(token).map_err(AdmissionError::Invalid)?;

        if !self.accepts(identity.role) {
            return Err(AdmissionError::Forbidden(identity.role));
        }

        Ok(identity)
    }
}
