pub mod claims;
pub mod errors;
pub mod service;

pub use claims::IdentityClaims;
pub use errors::TokenError;
pub use service::IssuedToken;
pub use service::TokenService;
pub use service::DEFAULT_TTL_HOURS;
