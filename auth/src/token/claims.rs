use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::identity::Identity;
use crate::identity::Role;

/// JWT payload carried by shop tokens.
///
/// Field names are part of the wire contract with existing clients:
/// `Id`, `Email`, `Role` and the registered `exp` claim (Unix seconds).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IdentityClaims {
    #[serde(rename = "Id")]
    pub id: i64,

    #[serde(rename = "Email")]
    pub email: String,

    #[serde(rename = "Role")]
    pub role: Role,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl IdentityClaims {
    /// Claims for an identity expiring `ttl` from now.
    pub fn for_identity(identity: &Identity, ttl: Duration) -> Self {
        let expiration = Utc::now() + ttl;
        Self::with_expiration(identity, expiration.timestamp())
    }

    /// Claims for an identity with an absolute expiry.
    pub fn with_expiration(identity: &Identity, exp: i64) -> Self {
        Self {
            id: identity.subject_id,
            email: identity.email.clone(),
            role: identity.role,
            exp,
        }
    }

    /// Check if the claims are expired at the given instant.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp > self.exp
    }

    pub fn into_identity(self) -> Identity {
        Identity {
            subject_id: self.id,
            email: self.email,
            role: self.role,
        }
    }
}
