use unicode_general_category::get_general_category;
use unicode_general_category::GeneralCategory;

use super::errors::PolicyViolation;
use super::errors::PolicyViolations;

/// Password strength rules applied at registration.
///
/// A candidate must contain a lowercase letter, an uppercase letter, a digit
/// and a punctuation/symbol character, and its countable length must fall
/// within `[min_length, max_length]`. Countable characters are letters,
/// digits, punctuation/symbols and the plain space; other whitespace and
/// control characters are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordPolicy {
    min_length: usize,
    max_length: usize,
}

impl PasswordPolicy {
    pub const MIN_LENGTH: usize = 8;
    pub const MAX_LENGTH: usize = 15;

    /// Policy with the default 8..=15 length bounds.
    pub fn new() -> Self {
        Self::with_length(Self::MIN_LENGTH, Self::MAX_LENGTH)
    }

    /// Policy with custom inclusive length bounds.
    pub fn with_length(min_length: usize, max_length: usize) -> Self {
        Self {
            min_length,
            max_length,
        }
    }

    /// Check a candidate password against every rule.
    ///
    /// # Arguments
    /// * `candidate` - Plaintext password
    ///
    /// # Errors
    /// * `PolicyViolations` - All failed rules, not only the first
    pub fn validate(&self, candidate: &str) -> Result<(), PolicyViolations> {
        let mut lowercase = false;
        let mut uppercase = false;
        let mut digit = false;
        let mut special = false;
        let mut length = 0usize;

        for ch in candidate.chars() {
            if ch.is_numeric() {
                digit = true;
            } else if ch.is_uppercase() {
                uppercase = true;
            } else if ch.is_lowercase() {
                lowercase = true;
            } else if ch.is_alphabetic() {
                // Uncased letters count toward length only.
            } else if is_special(ch) {
                special = true;
            } else if ch != ' ' {
                continue;
            }
            length += 1;
        }

        let mut violations = Vec::new();
        if !lowercase {
            violations.push(PolicyViolation::MissingLowercase);
        }
        if !uppercase {
            violations.push(PolicyViolation::MissingUppercase);
        }
        if !digit {
            violations.push(PolicyViolation::MissingDigit);
        }
        if !special {
            violations.push(PolicyViolation::MissingSpecial);
        }
        if !(self.min_length..=self.max_length).contains(&length) {
            violations.push(PolicyViolation::Length {
                min: self.min_length,
                max: self.max_length,
            });
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(PolicyViolations::new(violations))
        }
    }
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self::new()
    }
}

/// Unicode punctuation (P*) or symbol (S*).
fn is_special(ch: char) -> bool {
    matches!(
        get_general_category(ch),
        GeneralCategory::ConnectorPunctuation
            | GeneralCategory::DashPunctuation
            | GeneralCategory::OpenPunctuation
            | GeneralCategory::ClosePunctuation
            | GeneralCategory::InitialPunctuation
            | GeneralCategory::FinalPunctuation
            | GeneralCategory::OtherPunctuation
            | GeneralCategory::MathSymbol
            | GeneralCategory::CurrencySymbol
            | GeneralCategory::ModifierSymbol
            | GeneralCategory::OtherSymbol
    )
}
