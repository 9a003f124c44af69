use auth::Identity;
use auth::Role;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use super::ProfileData;
use crate::domain::account::models::PrincipalKind;
use crate::domain::account::models::ProfileId;
use crate::inbound::http::router::AppState;

/// A customer may read only their own profile; an admin may read any.
pub async fn get_customer(
    State(state): State<AppState>,
    Extension(caller): Extension<Identity>,
    Path(id): Path<i64>,
) -> Result<ApiSuccess<ProfileData>, ApiError> {
    if caller.role != Role::Admin && caller.subject_id != id {
        tracing::warn!(
            caller_id = caller.subject_id,
            requested_id = id,
            "Customer profile read denied"
        );
        return Err(ApiError::Forbidden(
            "Customers may only read their own profile".to_string(),
        ));
    }

    get_profile(&state, PrincipalKind::Customer, id).await
}

pub async fn list_customers(
    State(state): State<AppState>,
    Extension(caller): Extension<Identity>,
) -> Result<ApiSuccess<Vec<ProfileData>>, ApiError> {
    if caller.role != Role::Admin {
        return Err(ApiError::Forbidden(
            "Listing customers requires the ADMIN role".to_string(),
        ));
    }

    list_profiles(&state, PrincipalKind::Customer).await
}

pub async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<ApiSuccess<ProfileData>, ApiError> {
    get_profile(&state, PrincipalKind::Employee, id).await
}

pub async fn list_employees(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<ProfileData>>, ApiError> {
    list_profiles(&state, PrincipalKind::Employee).await
}

async fn get_profile(
    state: &AppState,
    kind: PrincipalKind,
    id: i64,
) -> Result<ApiSuccess<ProfileData>, ApiError> {
    state
        .account_service
        .get_profile(kind, ProfileId(id))
        .await
        .map_err(ApiError::from)
        .map(|ref profile| ApiSuccess::new(StatusCode::OK, profile.into()))
}

async fn list_profiles(
    state: &AppState,
    kind: PrincipalKind,
) -> Result<ApiSuccess<Vec<ProfileData>>, ApiError> {
    state
        .account_service
        .list_profiles(kind)
        .await
        .map_err(ApiError::from)
        .map(|profiles| {
            ApiSuccess::new(StatusCode::OK, profiles.iter().map(ProfileData::from).collect())
        })
}
