//! Shared REST state, error mapping, and operational endpoints.

use std::sync::Arc;
use std::time::Instant;

use adpilot_ads::AdsClient;
use adpilot_chat::ChatService;
use adpilot_core::AdpilotError;
use adpilot_identity::IdentityService;
use adpilot_insights::StrategyEngine;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

/// Shared application state for REST handlers. Every service is an
/// explicitly constructed, injected object; nothing is process-global.
#[derive(Clone)]
pub struct AppState {
    pub identity: Arc<IdentityService>,
    pub ads: Arc<AdsClient>,
    pub chat: Arc<ChatService>,
    pub strategies: Arc<StrategyEngine>,
    pub node_id: String,
    pub start_time: Instant,
}

/// JSON error body: a machine-readable code plus a human-readable detail.
/// Never carries stack traces or upstream credentials.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub detail: String,
}

/// Wrapper giving `AdpilotError` an HTTP shape at the API boundary.
#[derive(Debug)]
pub struct ApiError(pub AdpilotError);

impl From<AdpilotError> for ApiError {
    fn from(err: AdpilotError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self.0 {
            AdpilotError::Unauthenticated => (StatusCode::UNAUTHORIZED, "unauthorized"),
            AdpilotError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_failed"),
            AdpilotError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            AdpilotError::Upstream(_) => (StatusCode::INTERNAL_SERVER_ERROR, "upstream_failed"),
            AdpilotError::Config(_)
            | AdpilotError::IdentityStore(_)
            | AdpilotError::Serialization(_)
            | AdpilotError::Io(_)
            | AdpilotError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        };

        let body = ErrorResponse {
            error: code.to_string(),
            detail: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[derive(Serialize, ToSchema)]
pub struct RootResponse {
    pub message: String,
    pub version: String,
    pub docs: String,
}

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub node_id: String,
    pub uptime_secs: u64,
}

/// GET / — service banner.
#[utoipa::path(
    get,
    path = "/",
    tag = "Operations",
    responses((status = 200, description = "Service banner", body = RootResponse))
)]
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Welcome to the AdPilot API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        docs: "/docs".to_string(),
    })
}

/// GET /health — health check endpoint.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Operations",
    responses((status = 200, description = "Service is healthy", body = HealthResponse))
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        node_id: state.node_id.clone(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

/// GET /ready — readiness probe.
#[utoipa::path(
    get,
    path = "/ready",
    tag = "Operations",
    responses((status = 200, description = "Ready to accept traffic"))
)]
pub async fn readiness() -> StatusCode {
    StatusCode::OK
}

/// GET /live — liveness probe.
#[utoipa::path(
    get,
    path = "/live",
    tag = "Operations",
    responses((status = 200, description = "Process is live"))
)]
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}
