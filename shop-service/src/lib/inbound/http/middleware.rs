use std::sync::Arc;

use auth::AdmissionError;
use auth::RoleGate;
use auth::TokenService;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;

use super::handlers::ApiError;

/// Header carrying the token on gated routes.
pub const ACCESS_TOKEN_HEADER: &str = "x-access-token";

/// State for one role-gated route group.
#[derive(Clone)]
pub struct GateState {
    pub token_service: Arc<TokenService>,
    pub gate: Arc<RoleGate>,
}

impl GateState {
    pub fn new(token_service: Arc<TokenService>, gate: RoleGate) -> Self {
        Self {
            token_service,
            gate: Arc::new(gate),
        }
    }
}

/// Middleware that admits requests by token role and adds the verified
/// `auth::Identity` to request extensions.
///
/// Every rejection is a 403; invalid tokens are reported without saying why.
pub async fn require_role(
    State(state): State<GateState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let raw_token = extract_token(req.headers()).unwrap_or_default();

    let identity = state
        .gate
        .admit(&state.token_service, raw_token)
        .map_err(|e| {
            match &e {
                AdmissionError::Invalid(cause) => {
                    tracing::warn!(cause = %cause, uri = %req.uri(), "Token rejected")
                }
                AdmissionError::MissingToken | AdmissionError::Forbidden(_) => {
                    tracing::warn!(reason = %e, uri = %req.uri(), "Request not admitted")
                }
            }
            ApiError::Forbidden(e.to_string())
        })?;

    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}

/// Token from `x-access-token`, falling back to `Authorization: Bearer`.
pub fn extract_token(headers: &HeaderMap) -> Option<&str> {
    let access_token = headers
        .get(ACCESS_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.trim().is_empty());

    access_token.or_else(|| {
        headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(|value| strip_bearer(value.trim()))
    })
}

/// Drop an auth scheme of `Bearer`, matched case-insensitively.
fn strip_bearer(value: &str) -> &str {
    match value.split_once(' ') {
        Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") => token.trim_start(),
        _ => value,
    }
}
