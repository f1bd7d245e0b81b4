//! Request extractors for authenticated routes.

use adpilot_core::types::User;
use adpilot_core::AdpilotError;
use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;

use crate::rest::{ApiError, AppState};

fn bearer_token(parts: &Parts) -> Result<&str, ApiError> {
    parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(ApiError(AdpilotError::Unauthenticated))
}

/// The authenticated caller, resolved from the `Authorization: Bearer`
/// header. Rejections are uniform 401s with no provider detail.
pub struct AuthUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        let user = state.identity.verify_token(token).map_err(ApiError)?;
        Ok(AuthUser(user))
    }
}

/// The raw bearer token alongside its verified user, for flows that act on
/// the session itself (logout, refresh).
pub struct AuthSession {
    pub user: User,
    pub token: String,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthSession {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?.to_string();
        let user = state.identity.verify_token(&token).map_err(ApiError)?;
        Ok(AuthSession { user, token })
    }
}
