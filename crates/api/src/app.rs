//! HTTP application wiring (Axum router + gate layer).

use std::sync::Arc;

use axum::{
    Extension, Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::json;

use routeguard_auth::TokenValidator;
use routeguard_infra::{AccessLogStore, UserStore};

use crate::access_log::AccessLogRecorder;
use crate::config::{ConfigError, GateConfig};
use crate::context::AuthenticatedUser;
use crate::errors::json_message;
use crate::gate::Gate;
use crate::middleware::gate_middleware;

/// Build the gate from configuration and the two external stores.
pub fn build_gate(
    config: &GateConfig,
    users: Arc<dyn UserStore>,
    access_log: Arc<dyn AccessLogStore>,
) -> Result<Gate, ConfigError> {
    let routes = config.load_route_table()?;
    tracing::info!(routes = routes.len(), "route permission table loaded");

    Ok(Gate::new(
        TokenValidator::hs256(config.jwt_secret.as_bytes()),
        Arc::new(routes),
        users,
        AccessLogRecorder::new(access_log, config.access_log_service.clone()),
    ))
}

/// Put `downstream` (routes and fallback included) behind the gate.
pub fn build_app(gate: Arc<Gate>, downstream: Router) -> Router {
    downstream.layer(axum::middleware::from_fn_with_state(gate, gate_middleware))
}

/// Routes served by the standalone binary.
pub fn routes() -> Router {
    Router::new()
        .route("/", get(landing))
        .route("/whoami", get(whoami))
        .fallback(not_found)
}

async fn landing() -> Json<serde_json::Value> {
    Json(json!({
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn whoami(user: Option<Extension<AuthenticatedUser>>) -> Response {
    match user {
        Some(Extension(user)) => Json(json!({
            "cpf": user.cpf,
            "name": user.name,
            "role": user.role.name,
            "allowedActions": user.role.allowed_actions,
        }))
        .into_response(),
        None => json_message(StatusCode::NOT_FOUND, "no authenticated user"),
    }
}

async fn not_found() -> Response {
    json_message(StatusCode::NOT_FOUND, "not found")
}
