//! Axum REST handlers for the chat assistant.

use adpilot_chat::service::{CampaignAnalysis, ChatMessageRequest};
use adpilot_chat::{ChatReply, ChatService};
use axum::extract::State;
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use crate::extract::AuthUser;
use crate::rest::AppState;

#[derive(Serialize, ToSchema)]
pub struct SuggestionsResponse {
    pub suggestions: Vec<String>,
}

/// POST /api/v1/chat/message — answer a free-text query over ads data.
#[utoipa::path(
    post,
    path = "/api/v1/chat/message",
    tag = "Chat",
    request_body = ChatMessageRequest,
    responses(
        (status = 200, description = "Composed reply with fetched data", body = ChatReply),
        (status = 401, description = "Missing or invalid token", body = crate::rest::ErrorResponse),
    )
)]
pub async fn send_message(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(req): Json<ChatMessageRequest>,
) -> Json<ChatReply> {
    metrics::counter!("chat.messages").increment(1);
    let reply = state.chat.handle_message(&user, &req.content).await;
    Json(reply)
}

/// GET /api/v1/chat/suggestions — starter questions for the chat UI.
#[utoipa::path(
    get,
    path = "/api/v1/chat/suggestions",
    tag = "Chat",
    responses(
        (status = 200, description = "Suggested questions", body = SuggestionsResponse),
        (status = 401, description = "Missing or invalid token", body = crate::rest::ErrorResponse),
    )
)]
pub async fn suggestions(AuthUser(_user): AuthUser) -> Json<SuggestionsResponse> {
    Json(SuggestionsResponse {
        suggestions: ChatService::suggestions()
            .into_iter()
            .map(str::to_string)
            .collect(),
    })
}

/// POST /api/v1/chat/analyze — campaign rollup for the caller's account.
#[utoipa::path(
    post,
    path = "/api/v1/chat/analyze",
    tag = "Chat",
    responses(
        (status = 200, description = "Summary, advisories, and chart", body = CampaignAnalysis),
        (status = 401, description = "Missing or invalid token", body = crate::rest::ErrorResponse),
    )
)]
pub async fn analyze(State(state): State<AppState>, AuthUser(user): AuthUser) -> Json<CampaignAnalysis> {
    metrics::counter!("chat.analyses").increment(1);
    Json(state.chat.analyze(&user).await)
}
