use auth::Identity;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::ProfileData;
use crate::domain::account::errors::EmailError;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::PrincipalKind;
use crate::domain::account::models::ProfileDetails;
use crate::domain::account::models::RegisterCommand;
use crate::inbound::http::router::AppState;

pub async fn register_customer(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<ApiSuccess<ProfileData>, ApiError> {
    register(&state, body.try_into_command(PrincipalKind::Customer)?).await
}

/// Employee enrolment. Only reachable behind the employee gate.
pub async fn register_employee(
    State(state): State<AppState>,
    Extension(caller): Extension<Identity>,
    Json(body): Json<RegisterRequest>,
) -> Result<ApiSuccess<ProfileData>, ApiError> {
    tracing::info!(
        enrolled_by = caller.subject_id,
        role = %caller.role,
        "Employee enrolment requested"
    );

    let command = body
        .try_into_command(PrincipalKind::Employee)?
        .requested_by(caller.role);

    register(&state, command).await
}

async fn register(
    state: &AppState,
    command: RegisterCommand,
) -> Result<ApiSuccess<ProfileData>, ApiError> {
    state
        .account_service
        .register(command)
        .await
        .map_err(ApiError::from)
        .map(|ref profile| ApiSuccess::new(StatusCode::CREATED, profile.into()))
}

/// HTTP request body for registration (raw JSON)
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    email: String,
    password: String,
    #[serde(default)]
    first_name: String,
    #[serde(default)]
    last_name: String,
    #[serde(default)]
    designation: String,
    #[serde(default)]
    address: String,
    #[serde(default)]
    dob: Option<NaiveDate>,
    #[serde(default)]
    salary: Option<f64>,
    #[serde(default)]
    position: Option<String>,
}

impl RegisterRequest {
    fn try_into_command(self, kind: PrincipalKind) -> Result<RegisterCommand, EmailError> {
        let email = EmailAddress::new(self.email)?;
        let details = ProfileDetails {
            first_name: self.first_name,
            last_name: self.last_name,
            designation: self.designation,
            address: self.address,
            dob: self.dob,
            salary: self.salary,
            position: self.position,
        };
        Ok(RegisterCommand::new(kind, email, self.password, details))
    }
}

impl From<EmailError> for ApiError {
    fn from(err: EmailError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}
