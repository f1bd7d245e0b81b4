//! Axum REST handlers proxying the external ads platform.
//!
//! Read routes mirror the client's degraded-read contract: upstream trouble
//! shows up as empty collections, not errors. Write routes convert the
//! client's boolean outcome into a 500 with a descriptive detail.

use adpilot_ads::PlatformUser;
use adpilot_core::types::{
    Ad, AdAccount, AdSet, Campaign, DateRange, EntityStatus, Insight, OptimizationStrategy,
};
use adpilot_core::AdpilotError;
use adpilot_insights::AccountPerformance;
use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::extract::AuthUser;
use crate::rest::{ApiError, AppState};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AccessTokenQuery {
    /// Ads-platform access token forwarded to the upstream API.
    pub access_token: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct InsightsQuery {
    pub access_token: String,
    /// Inclusive ISO start date. Applied only together with `end_date`.
    pub start_date: Option<NaiveDate>,
    /// Inclusive ISO end date. Applied only together with `start_date`.
    pub end_date: Option<NaiveDate>,
}

#[derive(Serialize, ToSchema)]
pub struct ValidateTokenResponse {
    pub valid: bool,
}

#[derive(Serialize, ToSchema)]
pub struct AccountsResponse {
    pub accounts: Vec<AdAccount>,
}

#[derive(Serialize, ToSchema)]
pub struct CampaignsResponse {
    pub campaigns: Vec<Campaign>,
}

#[derive(Serialize, ToSchema)]
pub struct InsightsResponse {
    pub insights: Vec<Insight>,
}

#[derive(Serialize, ToSchema)]
pub struct AdSetsResponse {
    pub ad_sets: Vec<AdSet>,
}

#[derive(Serialize, ToSchema)]
pub struct AdsResponse {
    pub ads: Vec<Ad>,
}

#[derive(Serialize, ToSchema)]
pub struct RealtimeInsightsResponse {
    pub insights: Vec<Insight>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Serialize, ToSchema)]
pub struct StrategiesResponse {
    pub strategies: Vec<OptimizationStrategy>,
}

#[derive(Serialize, ToSchema)]
pub struct MutationResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct StatusUpdateRequest {
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct BudgetUpdateRequest {
    #[serde(default)]
    pub daily_budget: Option<u64>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ExecuteStrategyRequest {
    pub strategy: OptimizationStrategy,
}

/// GET /api/v1/meta/validate-token — check an ads-platform access token.
#[utoipa::path(
    get,
    path = "/api/v1/meta/validate-token",
    tag = "Ads Platform",
    params(AccessTokenQuery),
    responses(
        (status = 200, description = "Validation outcome", body = ValidateTokenResponse),
        (status = 401, description = "Missing or invalid bearer token", body = crate::rest::ErrorResponse),
    )
)]
pub async fn validate_token(
    State(state): State<AppState>,
    AuthUser(_user): AuthUser,
    Query(query): Query<AccessTokenQuery>,
) -> Json<ValidateTokenResponse> {
    let valid = state.ads.validate_access_token(&query.access_token).await;
    Json(ValidateTokenResponse { valid })
}

/// GET /api/v1/meta/user-info — the platform identity behind a token.
#[utoipa::path(
    get,
    path = "/api/v1/meta/user-info",
    tag = "Ads Platform",
    params(AccessTokenQuery),
    responses(
        (status = 200, description = "Platform user", body = PlatformUser),
        (status = 404, description = "Token resolves to no user", body = crate::rest::ErrorResponse),
    )
)]
pub async fn user_info(
    State(state): State<AppState>,
    AuthUser(_user): AuthUser,
    Query(query): Query<AccessTokenQuery>,
) -> Result<Json<PlatformUser>, ApiError> {
    state
        .ads
        .get_platform_user(&query.access_token)
        .await
        .map(Json)
        .ok_or_else(|| ApiError(AdpilotError::NotFound("platform user".to_string())))
}

/// GET /api/v1/meta/ad-accounts — the credential's ad accounts.
#[utoipa::path(
    get,
    path = "/api/v1/meta/ad-accounts",
    tag = "Ads Platform",
    params(AccessTokenQuery),
    responses(
        (status = 200, description = "Ad accounts", body = AccountsResponse),
        (status = 401, description = "Missing or invalid bearer token", body = crate::rest::ErrorResponse),
    )
)]
pub async fn ad_accounts(
    State(state): State<AppState>,
    AuthUser(_user): AuthUser,
    Query(query): Query<AccessTokenQuery>,
) -> Json<AccountsResponse> {
    let accounts = state.ads.list_ad_accounts(&query.access_token).await;
    Json(AccountsResponse { accounts })
}

/// GET /api/v1/meta/campaigns/{id} — campaigns of an ad account.
#[utoipa::path(
    get,
    path = "/api/v1/meta/campaigns/{id}",
    tag = "Ads Platform",
    params(("id" = String, Path, description = "Ad account id"), AccessTokenQuery),
    responses(
        (status = 200, description = "Campaigns", body = CampaignsResponse),
        (status = 401, description = "Missing or invalid bearer token", body = crate::rest::ErrorResponse),
    )
)]
pub async fn campaigns(
    State(state): State<AppState>,
    AuthUser(_user): AuthUser,
    Path(account_id): Path<String>,
    Query(query): Query<AccessTokenQuery>,
) -> Json<CampaignsResponse> {
    let campaigns = state
        .ads
        .list_campaigns(&account_id, &query.access_token)
        .await;
    Json(CampaignsResponse { campaigns })
}

/// GET /api/v1/meta/insights/{id} — insights for an account, campaign,
/// ad set, or ad. A date range applies only when both bounds are given;
/// otherwise the trailing 30-day window is used.
#[utoipa::path(
    get,
    path = "/api/v1/meta/insights/{id}",
    tag = "Ads Platform",
    params(("id" = String, Path, description = "Object id"), InsightsQuery),
    responses(
        (status = 200, description = "Insights", body = InsightsResponse),
        (status = 401, description = "Missing or invalid bearer token", body = crate::rest::ErrorResponse),
    )
)]
pub async fn insights(
    State(state): State<AppState>,
    AuthUser(_user): AuthUser,
    Path(object_id): Path<String>,
    Query(query): Query<InsightsQuery>,
) -> Json<InsightsResponse> {
    let range = match (query.start_date, query.end_date) {
        (Some(start), Some(end)) => Some(DateRange { start, end }),
        _ => None,
    };
    let insights = state
        .ads
        .get_insights(&object_id, &query.access_token, range.as_ref())
        .await;
    Json(InsightsResponse { insights })
}

/// GET /api/v1/meta/ad-sets/{id} — ad sets of a campaign.
#[utoipa::path(
    get,
    path = "/api/v1/meta/ad-sets/{id}",
    tag = "Ads Platform",
    params(("id" = String, Path, description = "Campaign id"), AccessTokenQuery),
    responses(
        (status = 200, description = "Ad sets", body = AdSetsResponse),
        (status = 401, description = "Missing or invalid bearer token", body = crate::rest::ErrorResponse),
    )
)]
pub async fn ad_sets(
    State(state): State<AppState>,
    AuthUser(_user): AuthUser,
    Path(campaign_id): Path<String>,
    Query(query): Query<AccessTokenQuery>,
) -> Json<AdSetsResponse> {
    let ad_sets = state
        .ads
        .list_ad_sets(&campaign_id, &query.access_token)
        .await;
    Json(AdSetsResponse { ad_sets })
}

/// GET /api/v1/meta/ads/{id} — ads of an ad set.
#[utoipa::path(
    get,
    path = "/api/v1/meta/ads/{id}",
    tag = "Ads Platform",
    params(("id" = String, Path, description = "Ad set id"), AccessTokenQuery),
    responses(
        (status = 200, description = "Ads", body = AdsResponse),
        (status = 401, description = "Missing or invalid bearer token", body = crate::rest::ErrorResponse),
    )
)]
pub async fn ads(
    State(state): State<AppState>,
    AuthUser(_user): AuthUser,
    Path(adset_id): Path<String>,
    Query(query): Query<AccessTokenQuery>,
) -> Json<AdsResponse> {
    let ads = state.ads.list_ads(&adset_id, &query.access_token).await;
    Json(AdsResponse { ads })
}

/// POST /api/v1/meta/campaigns/{id}/status — update a campaign's status.
#[utoipa::path(
    post,
    path = "/api/v1/meta/campaigns/{id}/status",
    tag = "Ads Platform",
    params(("id" = String, Path, description = "Campaign id"), AccessTokenQuery),
    request_body = StatusUpdateRequest,
    responses(
        (status = 200, description = "Status updated", body = MutationResponse),
        (status = 400, description = "Status missing", body = crate::rest::ErrorResponse),
        (status = 500, description = "Upstream rejected the update", body = crate::rest::ErrorResponse),
    )
)]
pub async fn update_campaign_status(
    State(state): State<AppState>,
    AuthUser(_user): AuthUser,
    Path(campaign_id): Path<String>,
    Query(query): Query<AccessTokenQuery>,
    Json(req): Json<StatusUpdateRequest>,
) -> Result<Json<MutationResponse>, ApiError> {
    let status = req
        .status
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError(AdpilotError::Validation("Status is required".to_string())))?;

    let parsed = parse_status(&status);
    let ok = state
        .ads
        .set_campaign_status(&campaign_id, &query.access_token, parsed)
        .await;
    if !ok {
        return Err(ApiError(AdpilotError::Upstream(
            "Failed to update campaign status".to_string(),
        )));
    }

    metrics::counter!("ads.status_updates").increment(1);
    Ok(Json(MutationResponse {
        success: true,
        message: format!("Campaign status updated to {}", status),
    }))
}

/// POST /api/v1/meta/campaigns/{id}/budget — update a campaign's daily
/// budget (minor currency units).
#[utoipa::path(
    post,
    path = "/api/v1/meta/campaigns/{id}/budget",
    tag = "Ads Platform",
    params(("id" = String, Path, description = "Campaign id"), AccessTokenQuery),
    request_body = BudgetUpdateRequest,
    responses(
        (status = 200, description = "Budget updated", body = MutationResponse),
        (status = 400, description = "Budget missing or zero", body = crate::rest::ErrorResponse),
        (status = 500, description = "Upstream rejected the update", body = crate::rest::ErrorResponse),
    )
)]
pub async fn update_campaign_budget(
    State(state): State<AppState>,
    AuthUser(_user): AuthUser,
    Path(campaign_id): Path<String>,
    Query(query): Query<AccessTokenQuery>,
    Json(req): Json<BudgetUpdateRequest>,
) -> Result<Json<MutationResponse>, ApiError> {
    let budget = req.daily_budget.filter(|b| *b > 0).ok_or_else(|| {
        ApiError(AdpilotError::Validation("Daily budget is required".to_string()))
    })?;

    let ok = state
        .ads
        .set_campaign_budget(&campaign_id, &query.access_token, budget)
        .await;
    if !ok {
        return Err(ApiError(AdpilotError::Upstream(
            "Failed to update campaign budget".to_string(),
        )));
    }

    metrics::counter!("ads.budget_updates").increment(1);
    Ok(Json(MutationResponse {
        success: true,
        message: format!("Campaign budget updated to {}", budget),
    }))
}

/// GET /api/v1/meta/realtime/{id} — today's insights for an account.
#[utoipa::path(
    get,
    path = "/api/v1/meta/realtime/{id}",
    tag = "Ads Platform",
    params(("id" = String, Path, description = "Ad account id"), AccessTokenQuery),
    responses(
        (status = 200, description = "Today's insights", body = RealtimeInsightsResponse),
        (status = 401, description = "Missing or invalid bearer token", body = crate::rest::ErrorResponse),
    )
)]
pub async fn realtime_insights(
    State(state): State<AppState>,
    AuthUser(_user): AuthUser,
    Path(account_id): Path<String>,
    Query(query): Query<AccessTokenQuery>,
) -> Json<RealtimeInsightsResponse> {
    let insights = state
        .ads
        .realtime_insights(&account_id, &query.access_token)
        .await;
    Json(RealtimeInsightsResponse {
        insights,
        timestamp: Utc::now(),
    })
}

/// GET /api/v1/meta/strategies/{id} — optimization strategies for an
/// account's active campaigns.
#[utoipa::path(
    get,
    path = "/api/v1/meta/strategies/{id}",
    tag = "Ads Platform",
    params(("id" = String, Path, description = "Ad account id"), AccessTokenQuery),
    responses(
        (status = 200, description = "Generated strategies", body = StrategiesResponse),
        (status = 401, description = "Missing or invalid bearer token", body = crate::rest::ErrorResponse),
    )
)]
pub async fn strategies(
    State(state): State<AppState>,
    AuthUser(_user): AuthUser,
    Path(account_id): Path<String>,
    Query(query): Query<AccessTokenQuery>,
) -> Json<StrategiesResponse> {
    let strategies = state
        .strategies
        .generate(&account_id, &query.access_token)
        .await;
    Json(StrategiesResponse { strategies })
}

/// POST /api/v1/meta/strategies/execute — apply a strategy's actions.
#[utoipa::path(
    post,
    path = "/api/v1/meta/strategies/execute",
    tag = "Ads Platform",
    params(AccessTokenQuery),
    request_body = ExecuteStrategyRequest,
    responses(
        (status = 200, description = "Strategy executed", body = MutationResponse),
        (status = 500, description = "A mutation was rejected upstream", body = crate::rest::ErrorResponse),
    )
)]
pub async fn execute_strategy(
    State(state): State<AppState>,
    AuthUser(_user): AuthUser,
    Query(query): Query<AccessTokenQuery>,
    Json(req): Json<ExecuteStrategyRequest>,
) -> Result<Json<MutationResponse>, ApiError> {
    let ok = state
        .strategies
        .execute(&req.strategy, &query.access_token)
        .await;
    if !ok {
        return Err(ApiError(AdpilotError::Upstream(
            "Failed to execute strategy".to_string(),
        )));
    }

    metrics::counter!("ads.strategies_executed").increment(1);
    Ok(Json(MutationResponse {
        success: true,
        message: "Strategy executed successfully".to_string(),
    }))
}

/// GET /api/v1/meta/performance/{id} — account performance summary.
#[utoipa::path(
    get,
    path = "/api/v1/meta/performance/{id}",
    tag = "Ads Platform",
    params(("id" = String, Path, description = "Ad account id"), AccessTokenQuery),
    responses(
        (status = 200, description = "Account performance", body = AccountPerformance),
        (status = 401, description = "Missing or invalid bearer token", body = crate::rest::ErrorResponse),
    )
)]
pub async fn account_performance(
    State(state): State<AppState>,
    AuthUser(_user): AuthUser,
    Path(account_id): Path<String>,
    Query(query): Query<AccessTokenQuery>,
) -> Json<AccountPerformance> {
    let campaigns = state
        .ads
        .list_campaigns(&account_id, &query.access_token)
        .await;
    Json(adpilot_insights::account_performance(&account_id, &campaigns))
}

fn parse_status(status: &str) -> EntityStatus {
    match status.to_ascii_uppercase().as_str() {
        "ACTIVE" => EntityStatus::Active,
        "PAUSED" => EntityStatus::Paused,
        _ => EntityStatus::Other,
    }
}
