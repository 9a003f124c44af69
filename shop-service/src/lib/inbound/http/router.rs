use std::sync::Arc;
use std::time::Duration;

use auth::RoleGate;
use auth::TokenService;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::health::health;
use super::handlers::login::login_customer;
use super::handlers::login::login_employee;
use super::handlers::profiles::get_customer;
use super::handlers::profiles::get_employee;
use super::handlers::profiles::list_customers;
use super::handlers::profiles::list_employees;
use super::handlers::register::register_customer;
use super::handlers::register::register_employee;
use super::handlers::verify_token::verify_token;
use super::middleware::require_role;
use super::middleware::GateState;
use crate::domain::account::ports::AccountServicePort;

#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<dyn AccountServicePort>,
    pub token_service: Arc<TokenService>,
}

pub fn create_router(
    account_service: Arc<dyn AccountServicePort>,
    token_service: Arc<TokenService>,
) -> Router {
    let state = AppState {
        account_service,
        token_service,
    };

    let public_routes = Router::new()
        .route("/api/health", get(health))
        .route("/register", post(register_customer))
        .route("/login", post(login_customer))
        .route("/verify", get(verify_token))
        .route("/employee/login", post(login_employee));

    let customer_routes = Router::new()
        .route("/customer/", get(list_customers))
        .route("/customer/:id", get(get_customer))
        .route_layer(middleware::from_fn_with_state(
            GateState::new(Arc::clone(&state.token_service), RoleGate::customers()),
            require_role,
        ));

    let employee_routes = Router::new()
        .route("/employee/register", post(register_employee))
        .route("/employee/", get(list_employees))
        .route("/employee/:id", get(get_employee))
        .route_layer(middleware::from_fn_with_state(
            GateState::new(Arc::clone(&state.token_service), RoleGate::employees()),
            require_role,
        ));

    // Headers are left out of the span: they carry access tokens.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(customer_routes)
        .merge(employee_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
