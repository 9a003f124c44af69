use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::IdentityClaims;
use super::errors::TokenError;
use crate::identity::Identity;

/// Token lifetime used when the service is not configured otherwise.
pub const DEFAULT_TTL_HOURS: i64 = 2;

/// Issues and verifies signed, expiring identity tokens.
///
/// Tokens are HS256 JWTs. The signing secret is fixed for the lifetime of the
/// service; there is no server-side session state, so a token stays valid
/// until its `exp` passes.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

/// Result of a successful issuance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    /// Signed JWT
    pub access_token: String,
    /// Absolute expiry embedded in the token
    pub expires_at: DateTime<Utc>,
}

impl TokenService {
    /// Create a new token service with a signing secret.
    ///
    /// # Arguments
    /// * `secret` - Shared HMAC secret (should be at least 32 bytes)
    ///
    /// # Security Notes
    /// - Load the secret from configuration, never from code
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Issue a token for an identity.
    ///
    /// # Arguments
    /// * `identity` - Subject, email and role to embed
    /// * `ttl` - Lifetime; expiry is `now + ttl` and is never extended
    ///
    /// # Errors
    /// * `Encoding` - Token encoding failed
    pub fn issue(&self, identity: &Identity, ttl: Duration) -> Result<IssuedToken, TokenError> {
        let claims = IdentityClaims::for_identity(identity, ttl);
        let expires_at = DateTime::<Utc>::from_timestamp(claims.exp, 0)
            .ok_or_else(|| TokenError::Encoding(format!("expiry out of range: {}", claims.exp)))?;

        let access_token = encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Encoding(e.to_string()))?;

        Ok(IssuedToken {
            access_token,
            expires_at,
        })
    }

    /// Verify a token and recover its identity.
    ///
    /// The signature is checked (in constant time) before the expiry.
    ///
    /// # Errors
    /// * `Malformed` - Not a three-part signed structure, or undecodable claims
    /// * `BadSignature` - Signature or algorithm does not match
    /// * `Expired` - Current time is past `exp`
    pub fn verify(&self, token: &str) -> Result<Identity, TokenError> {
        let token_data = decode::<IdentityClaims>(token, &self.decoding_key, &self.validation())?;

        Ok(token_data.claims.into_identity())
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);
        validation
    }
}
