use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;
use serde::Serialize;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Profile;

pub mod health;
pub mod login;
pub mod profiles;
pub mod register;
pub mod verify_token;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
    Forbidden(String),
}

impl ApiError {
    /// Message shared by every failed login, whatever the cause.
    pub const INVALID_CREDENTIALS: &'static str = "Invalid credentials";

    pub fn invalid_credentials() -> Self {
        ApiError::Unauthorized(Self::INVALID_CREDENTIALS.to_string())
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        Self::InternalServerError(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, details) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
        };

        (status, Json(ApiErrorBody::new(status, details))).into_response()
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::Validation(_) | AccountError::InvalidEmail(_) => {
                ApiError::UnprocessableEntity(err.to_string())
            }
            AccountError::DuplicateEmail(_) => ApiError::Conflict(err.to_string()),
            AccountError::NotFound(_) => ApiError::NotFound(err.to_string()),
            AccountError::BadPassword => ApiError::invalid_credentials(),
            AccountError::ReservedEmail(_) => ApiError::Forbidden(err.to_string()),
            AccountError::Unauthenticated(_) => ApiError::Unauthorized(err.to_string()),
            AccountError::Hashing(_)
            | AccountError::Token(_)
            | AccountError::Database(_)
            | AccountError::Unknown(_) => {
                tracing::error!(error = %err, "Request failed");
                ApiError::InternalServerError("Internal server error".to_string())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

/// Error envelope: a short label plus the specific reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorBody {
    pub error: String,
    pub details: String,
}

impl ApiErrorBody {
    pub fn new(status_code: StatusCode, details: String) -> Self {
        Self {
            error: status_code
                .canonical_reason()
                .unwrap_or("Error")
                .to_string(),
            details,
        }
    }
}

/// Outward-facing profile representation. Never carries the credential.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileData {
    pub id: i64,
    pub kind: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub designation: String,
    pub address: String,
    pub dob: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&Profile> for ProfileData {
    fn from(profile: &Profile) -> Self {
        Self {
            id: profile.id.0,
            kind: profile.kind.to_string(),
            email: profile.email.as_str().to_string(),
            first_name: profile.details.first_name.clone(),
            last_name: profile.details.last_name.clone(),
            designation: profile.details.designation.clone(),
            address: profile.details.address.clone(),
            dob: profile.details.dob,
            salary: profile.details.salary,
            position: profile.details.position.clone(),
            created_at: profile.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use auth::PasswordPolicy;

    use super::*;

    #[test]
    fn test_login_failures_are_indistinguishable() {
        let not_found = ApiError::from(AccountError::NotFound("a@x.com".to_string()));
        let bad_password = ApiError::from(AccountError::BadPassword);

        // The login handler maps NotFound to invalid credentials itself;
        // BadPassword never reveals more than that.
        assert_eq!(bad_password, ApiError::invalid_credentials());
        assert!(matches!(not_found, ApiError::NotFound(_)));
    }

    #[test]
    fn test_validation_lists_every_reason() {
        let violations = PasswordPolicy::new().validate("weak").unwrap_err();
        let error = ApiError::from(AccountError::Validation(violations));

        match error {
            ApiError::UnprocessableEntity(details) => {
                assert!(details.contains("Uppercase letter missing"));
                assert!(details.contains("At least one numeric character required"));
                assert!(details.contains("Special character missing"));
            }
            other => panic!("unexpected mapping: {:?}", other),
        }
    }

    #[test]
    fn test_reserved_email_is_forbidden() {
        let error = ApiError::from(AccountError::ReservedEmail("admin@gmail.com".to_string()));
        assert!(matches!(error, ApiError::Forbidden(ref details) if details.contains("reserved")));
    }

    #[test]
    fn test_internal_errors_are_not_leaked() {
        let error = ApiError::from(AccountError::Database("connection refused".to_string()));
        assert_eq!(
            error,
            ApiError::InternalServerError("Internal server error".to_string())
        );
    }

    #[test]
    fn test_error_body_label() {
        let body = ApiErrorBody::new(StatusCode::CONFLICT, "taken".to_string());
        assert_eq!(body.error, "Conflict");
        assert_eq!(body.details, "taken");
    }
}
