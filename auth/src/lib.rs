//! Authentication and access-control library
//!
//! Provides the credential and token primitives the shop services build on:
//! - Password policy checks
//! - Password hashing (bcrypt)
//! - Signed identity tokens (JWT, HS256)
//! - Role-gated admission
//!
//! Nothing in this crate performs I/O. Services own persistence and transport
//! and call into these types through plain `Result`-returning methods.
//!
//! # Examples
//!
//! ## Password Policy
//! ```
//! use auth::PasswordPolicy;
//!
//! let policy = PasswordPolicy::new();
//! assert!(policy.validate("Abcdef1!").is_ok());
//!
//! let violations = policy.validate("weak").unwrap_err();
//! assert!(violations.to_string().contains("Uppercase letter missing"));
//! ```
//!
//! ## Password Hashing
//! ```
//! use auth::CredentialHasher;
//!
//! let hasher = CredentialHasher::with_cost(4);
//! let hash = hasher.hash("Abcdef1!").unwrap();
//! assert!(hasher.verify("Abcdef1!", &hash));
//! assert!(!hasher.verify("Abcdef1?", &hash));
//! ```
//!
//! ## Tokens and Admission
//! ```
//! use auth::{Identity, Role, RoleGate, TokenService};
//! use chrono::Duration;
//!
//! let tokens = TokenService::new(b"secret_key_at_least_32_bytes_long!");
//! let identity = Identity::new(7, "a@x.com", Role::Customer);
//! let issued = tokens.issue(&identity, Duration::hours(2)).unwrap();
//!
//! let admitted = RoleGate::customers()
//!     .admit(&tokens, &issued.access_token)
//!     .unwrap();
//! assert_eq!(admitted, identity);
//!
//! assert!(RoleGate::employees()
//!     .admit(&tokens, &issued.access_token)
//!     .is_err());
//! ```

pub mod access;
pub mod identity;
pub mod password;
pub mod token;

// Re-export commonly used items
pub use access::AdmissionError;
pub use access::RoleGate;
pub use identity::Identity;
pub use identity::Role;
pub use identity::RoleParseError;
pub use password::CredentialHasher;
pub use password::PasswordError;
pub use password::PasswordPolicy;
pub use password::PolicyViolation;
pub use password::PolicyViolations;
pub use token::IdentityClaims;
pub use token::IssuedToken;
pub use token::TokenError;
pub use token::TokenService;
pub use token::DEFAULT_TTL_HOURS;
