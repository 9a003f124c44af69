use std::fmt;
use std::str::FromStr;

use auth::Identity;
use auth::IssuedToken;
use auth::Role;
use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::account::errors::EmailError;

/// Which kind of principal an account belongs to.
///
/// Customers and employees live in separate stores; the same email may be
/// registered once per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrincipalKind {
    Customer,
    Employee,
}

impl PrincipalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrincipalKind::Customer => "customer",
            PrincipalKind::Employee => "employee",
        }
    }

    /// Store holding the subject of a token with the given role.
    pub fn for_role(role: Role) -> Self {
        match role {
            Role::Customer => PrincipalKind::Customer,
            Role::Employee | Role::Admin => PrincipalKind::Employee,
        }
    }
}

impl fmt::Display for PrincipalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Profile unique identifier (per principal kind)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProfileId(pub i64);

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser. Stored trimmed and
/// lowercased, so equality and per-kind uniqueness ignore letter case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Arguments
    /// * `email` - Raw email string
    ///
    /// # Returns
    /// Validated, lowercased EmailAddress value object
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        let email = email.trim().to_lowercase();
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    /// Get email as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Descriptive profile fields.
///
/// `salary` and `position` only apply to employees and are always `None`
/// for customers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileDetails {
    pub first_name: String,
    pub last_name: String,
    pub designation: String,
    pub address: String,
    pub dob: Option<NaiveDate>,
    pub salary: Option<f64>,
    pub position: Option<String>,
}

/// Stored customer or employee record, including the credential hash.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub id: ProfileId,
    pub kind: PrincipalKind,
    pub email: EmailAddress,
    pub password_hash: String,
    pub details: ProfileDetails,
    pub created_at: DateTime<Utc>,
}

/// Record handed to the entity store for creation.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProfile {
    pub kind: PrincipalKind,
    pub email: EmailAddress,
    pub password_hash: String,
    pub details: ProfileDetails,
}

/// Command to register a new account
#[derive(Debug)]
pub struct RegisterCommand {
    pub kind: PrincipalKind,
    pub email: EmailAddress,
    pub password: String,
    pub details: ProfileDetails,
    /// Role of the authenticated caller, for gated enrolment
    pub requested_by: Option<Role>,
}

impl RegisterCommand {
    /// Construct a new register command.
    ///
    /// Employee-only details are dropped for customers.
    ///
    /// # Arguments
    /// * `kind` - Principal kind to register
    /// * `email` - Validated email address
    /// * `password` - Plain text password (checked and hashed by the service)
    /// * `details` - Descriptive profile fields
    pub fn new(
        kind: PrincipalKind,
        email: EmailAddress,
        password: String,
        mut details: ProfileDetails,
    ) -> Self {
        if kind == PrincipalKind::Customer {
            details.salary = None;
            details.position = None;
        }
        Self {
            kind,
            email,
            password,
            details,
            requested_by: None,
        }
    }

    /// Record the role of the caller performing the registration.
    pub fn requested_by(mut self, role: Role) -> Self {
        self.requested_by = Some(role);
        self
    }
}

/// Command to log in with email and password
#[derive(Debug)]
pub struct LoginCommand {
    pub kind: PrincipalKind,
    pub email: EmailAddress,
    pub password: String,
}

impl LoginCommand {
    pub fn new(kind: PrincipalKind, email: EmailAddress, password: String) -> Self {
        Self {
            kind,
            email,
            password,
        }
    }
}

/// Successful login: the issued token and who it was issued to.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub profile: Profile,
    pub identity: Identity,
    pub token: IssuedToken,
}

/// Employee emails that receive the ADMIN role at login.
///
/// Matching is case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminAllowlist(Vec<String>);

impl AdminAllowlist {
    pub const DEFAULT_ADMIN_EMAIL: &'static str = "admin@gmail.com";

    pub fn new<I, E>(emails: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: AsRef<str>,
    {
        Self(
            emails
                .into_iter()
                .map(|email| email.as_ref().trim().to_lowercase())
                .filter(|email| !email.is_empty())
                .collect(),
        )
    }

    pub fn contains(&self, email: &str) -> bool {
        let email = email.trim().to_lowercase();
        self.0.iter().any(|admin| *admin == email)
    }

    /// Role granted to a principal of `kind` logging in as `email`.
    pub fn role_for(&self, kind: PrincipalKind, email: &str) -> Role {
        match kind {
            PrincipalKind::Customer => Role::Customer,
            PrincipalKind::Employee if self.contains(email) => Role::Admin,
            PrincipalKind::Employee => Role::Employee,
        }
    }
}

impl Default for AdminAllowlist {
    fn default() -> Self {
        Self::new([Self::DEFAULT_ADMIN_EMAIL])
    }
}
