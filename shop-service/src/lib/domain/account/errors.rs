use auth::PolicyViolations;
use auth::TokenError;
use thiserror::Error;

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Top-level error for account and authentication operations
#[derive(Debug, Clone, Error)]
pub enum AccountError {
    // Input validation errors
    #[error("Invalid password: {0}")]
    Validation(#[from] PolicyViolations),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    // Domain-level errors
    #[error("Email already registered: {0}")]
    DuplicateEmail(String),

    #[error("Profile not found: {0}")]
    NotFound(String),

    #[error("Incorrect password")]
    BadPassword,

    #[error("Email {0} is reserved for administrators")]
    ReservedEmail(String),

    #[error("Invalid or expired token")]
    Unauthenticated(#[source] TokenError),

    // Infrastructure errors
    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error("Token issuance failed: {0}")]
    Token(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for AccountError {
    fn from(err: anyhow::Error) -> Self {
        AccountError::Unknown(err.to_string())
    }
}
