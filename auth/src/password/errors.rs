use std::fmt;

use thiserror::Error;

/// Error type for password hashing.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
}

/// A single password policy rule that a candidate failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PolicyViolation {
    #[error("Lowercase letter missing")]
    MissingLowercase,

    #[error("Uppercase letter missing")]
    MissingUppercase,

    #[error("At least one numeric character required")]
    MissingDigit,

    #[error("Special character missing")]
    MissingSpecial,

    #[error("Password length must be between {min} to {max} characters long")]
    Length { min: usize, max: usize },
}

/// Every rule a candidate password failed, in rule order.
///
/// Displays as the individual reasons joined by `", "`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyViolations(Vec<PolicyViolation>);

impl PolicyViolations {
    pub(crate) fn new(violations: Vec<PolicyViolation>) -> Self {
        Self(violations)
    }

    pub fn as_slice(&self) -> &[PolicyViolation] {
        &self.0
    }

    pub fn contains(&self, violation: &PolicyViolation) -> bool {
        self.0.contains(violation)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Human-readable reason for each violation.
    pub fn reasons(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }
}

impl fmt::Display for PolicyViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reasons().join(", "))
    }
}

impl std::error::Error for PolicyViolations {}
