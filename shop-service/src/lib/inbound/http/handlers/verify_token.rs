use auth::Identity;
use auth::Role;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::account::errors::AccountError;
use crate::domain::account::models::PrincipalKind;
use crate::inbound::http::middleware::extract_token;
use crate::inbound::http::router::AppState;

/// Reports who a token belongs to, if the token is valid and its subject
/// still exists.
pub async fn verify_token(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<ApiSuccess<VerifyTokenResponseData>, ApiError> {
    let token = extract_token(&headers)
        .filter(|token| !token.trim().is_empty())
        .ok_or_else(|| ApiError::Unauthorized("Missing auth token".to_string()))?;

    state
        .account_service
        .introspect(token)
        .await
        .map_err(|e| match e {
            AccountError::NotFound(_) => {
                ApiError::Unauthorized("Token subject no longer exists".to_string())
            }
            _ => ApiError::from(e),
        })
        .map(|ref identity| ApiSuccess::new(StatusCode::OK, identity.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyTokenResponseData {
    pub id: i64,
    pub email: String,
    pub role: Role,
    pub kind: PrincipalKind,
}

impl From<&Identity> for VerifyTokenResponseData {
    fn from(identity: &Identity) -> Self {
        Self {
            id: identity.subject_id,
            email: identity.email.clone(),
            role: identity.role,
            kind: PrincipalKind::for_role(identity.role),
        }
    }
}
