use super::errors::PasswordError;

/// Password hashing implementation.
///
/// Salted one-way hashing with bcrypt. The salt and cost are embedded in the
/// produced hash, so verification needs nothing but the stored string.
#[derive(Debug, Clone, Copy)]
pub struct CredentialHasher {
    cost: u32,
}

impl CredentialHasher {
    /// Default bcrypt work factor.
    pub const DEFAULT_COST: u32 = 14;

    /// Create a hasher with the default cost.
    pub fn new() -> Self {
        Self::with_cost(Self::DEFAULT_COST)
    }

    /// Create a hasher with a custom cost.
    ///
    /// # Arguments
    /// * `cost` - bcrypt work factor (4..=31)
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a plaintext password.
    ///
    /// Every call draws a fresh salt, so two hashes of the same password
    /// differ.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// Modular crypt format hash (`$2b$<cost>$<salt+hash>`)
    ///
    /// # Errors
    /// * `HashingFailed` - Cost out of range or the hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        ::bcrypt::hash(password, self.cost).map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored hash.
    ///
    /// A mismatch and a malformed hash are both plain `false`.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `hash` - Stored hash produced by [`CredentialHasher::hash`]
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        ::bcrypt::verify(password, hash).unwrap_or(false)
    }
}

impl Default for CredentialHasher {
    fn default() -> Self {
        Self::new()
    }
}
