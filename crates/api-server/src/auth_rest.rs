//! Axum REST handlers for registration, login, and session management.

use adpilot_core::types::{Token, User};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use utoipa::ToSchema;

use adpilot_identity::{LoginRequest, RegisterRequest};

use crate::extract::{AuthSession, AuthUser};
use crate::rest::{ApiError, AppState};

#[derive(Debug, Deserialize, ToSchema)]
pub struct LinkAdsCredentialRequest {
    pub access_token: String,
    #[serde(default)]
    pub ads_user_id: Option<String>,
}

#[derive(Debug, serde::Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// POST /api/v1/auth/register — create a user account.
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Duplicate email or invalid input", body = crate::rest::ErrorResponse),
        (status = 500, description = "Directory failure", body = crate::rest::ErrorResponse),
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let user = state.identity.register(req)?;
    metrics::counter!("auth.registrations").increment(1);
    Ok((StatusCode::CREATED, Json(user)))
}

/// POST /api/v1/auth/login — authenticate and issue a bearer token.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued", body = Token),
        (status = 400, description = "Account inactive", body = crate::rest::ErrorResponse),
        (status = 401, description = "Bad email or password", body = crate::rest::ErrorResponse),
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<Token>, ApiError> {
    let token = state.identity.login(&req)?;
    metrics::counter!("auth.logins").increment(1);
    Ok(Json(token))
}

/// GET /api/v1/auth/me — the authenticated user's profile.
#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    tag = "Authentication",
    responses(
        (status = 200, description = "Current user", body = User),
        (status = 401, description = "Missing or invalid token", body = crate::rest::ErrorResponse),
    )
)]
pub async fn me(AuthUser(user): AuthUser) -> Json<User> {
    Json(user)
}

/// POST /api/v1/auth/refresh — issue a fresh token for the current session.
#[utoipa::path(
    post,
    path = "/api/v1/auth/refresh",
    tag = "Authentication",
    responses(
        (status = 200, description = "Fresh token", body = Token),
        (status = 401, description = "Missing or invalid token", body = crate::rest::ErrorResponse),
    )
)]
pub async fn refresh(State(state): State<AppState>, session: AuthSession) -> Json<Token> {
    // The old token stays valid until its own expiry; only issuance here.
    Json(state.identity.issue_token(session.user))
}

/// POST /api/v1/auth/logout — revoke the presented token.
#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    tag = "Authentication",
    responses(
        (status = 200, description = "Token revoked", body = MessageResponse),
        (status = 401, description = "Missing or invalid token", body = crate::rest::ErrorResponse),
    )
)]
pub async fn logout(State(state): State<AppState>, session: AuthSession) -> Json<MessageResponse> {
    state.identity.logout(&session.token);
    Json(MessageResponse {
        message: "Successfully logged out".to_string(),
    })
}

/// POST /api/v1/auth/ads-credential — link an ads-platform access token to
/// the caller's profile.
#[utoipa::path(
    post,
    path = "/api/v1/auth/ads-credential",
    tag = "Authentication",
    request_body = LinkAdsCredentialRequest,
    responses(
        (status = 200, description = "Updated user", body = User),
        (status = 401, description = "Missing or invalid token", body = crate::rest::ErrorResponse),
    )
)]
pub async fn link_ads_credential(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(req): Json<LinkAdsCredentialRequest>,
) -> Result<Json<User>, ApiError> {
    let updated = state
        .identity
        .link_ads_credential(user.id, req.access_token, req.ads_user_id)?;
    Ok(Json(updated))
}
