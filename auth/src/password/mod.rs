pub mod bcrypt;
pub mod errors;
pub mod policy;

pub use bcrypt::CredentialHasher;
pub use errors::PasswordError;
pub use errors::PolicyViolation;
pub use errors::PolicyViolations;
pub use policy::PasswordPolicy;
