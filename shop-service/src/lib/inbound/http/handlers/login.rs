use auth::Role;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::ProfileData;
use crate::domain::account::errors::AccountError;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::LoginCommand;
use crate::domain::account::models::LoginOutcome;
use crate::domain::account::models::PrincipalKind;
use crate::inbound::http::router::AppState;

pub async fn login_customer(
    State(state): State<AppState>,
    Json(body): Json<LoginRequestBody>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    login(&state, PrincipalKind::Customer, body).await
}

pub async fn login_employee(
    State(state): State<AppState>,
    Json(body): Json<LoginRequestBody>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    login(&state, PrincipalKind::Employee, body).await
}

async fn login(
    state: &AppState,
    kind: PrincipalKind,
    body: LoginRequestBody,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    // A malformed email cannot belong to anyone
    let email = EmailAddress::new(body.email).map_err(|_| ApiError::invalid_credentials())?;

    let outcome = state
        .account_service
        .login(LoginCommand::new(kind, email, body.password))
        .await
        .map_err(|e| match e {
            AccountError::NotFound(_) | AccountError::BadPassword => {
                ApiError::invalid_credentials()
            }
            _ => ApiError::from(e),
        })?;

    Ok(ApiSuccess::new(StatusCode::OK, (&outcome).into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    email: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponseData {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub role: Role,
    pub profile: ProfileData,
}

impl From<&LoginOutcome> for LoginResponseData {
    fn from(outcome: &LoginOutcome) -> Self {
        Self {
            token: outcome.token.access_token.clone(),
            expires_at: outcome.token.expires_at,
            role: outcome.identity.role,
            profile: (&outcome.profile).into(),
        }
    }
}
