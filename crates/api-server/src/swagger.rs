//! OpenAPI specification and Swagger UI configuration.

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "AdPilot API",
        version = "0.1.0",
        description = "Conversational ads-management backend: authentication, an ads-platform proxy, and a keyword-dispatched chat assistant with charts and recommendations.",
        license(name = "MIT"),
    ),
    tags(
        (name = "Authentication", description = "Registration, login, and session management"),
        (name = "Chat", description = "Free-text queries over ads data with charts and advisories"),
        (name = "Ads Platform", description = "Pass-through to the external ads platform API"),
        (name = "Operations", description = "Health, readiness, and liveness probes"),
    ),
    paths(
        // Operations
        crate::rest::root,
        crate::rest::health_check,
        crate::rest::readiness,
        crate::rest::liveness,
        // Authentication
        crate::auth_rest::register,
        crate::auth_rest::login,
        crate::auth_rest::me,
        crate::auth_rest::refresh,
        crate::auth_rest::logout,
        crate::auth_rest::link_ads_credential,
        // Chat
        crate::chat_rest::send_message,
        crate::chat_rest::suggestions,
        crate::chat_rest::analyze,
        // Ads platform
        crate::ads_rest::validate_token,
        crate::ads_rest::user_info,
        crate::ads_rest::ad_accounts,
        crate::ads_rest::campaigns,
        crate::ads_rest::insights,
        crate::ads_rest::ad_sets,
        crate::ads_rest::ads,
        crate::ads_rest::update_campaign_status,
        crate::ads_rest::update_campaign_budget,
        crate::ads_rest::realtime_insights,
        crate::ads_rest::strategies,
        crate::ads_rest::execute_strategy,
        crate::ads_rest::account_performance,
    ),
    components(schemas(
        // Core domain types
        adpilot_core::types::User,
        adpilot_core::types::UserRole,
        adpilot_core::types::Token,
        adpilot_core::types::EntityStatus,
        adpilot_core::types::AdAccount,
        adpilot_core::types::Campaign,
        adpilot_core::types::AdSet,
        adpilot_core::types::Ad,
        adpilot_core::types::AdCreative,
        adpilot_core::types::Insight,
        adpilot_core::types::DateRange,
        adpilot_core::types::Recommendation,
        adpilot_core::types::RecommendationKind,
        adpilot_core::types::OptimizationStrategy,
        adpilot_core::types::StrategyRules,
        adpilot_core::types::StrategyActions,
        adpilot_core::types::MetricsSnapshot,
        adpilot_core::types::ChartSpec,
        adpilot_core::types::ChartType,
        adpilot_core::types::ChartData,
        adpilot_core::types::ChartDataset,
        adpilot_core::types::ChartOptions,
        adpilot_core::types::ChartPlugins,
        adpilot_core::types::ChartTitle,
        // Identity requests
        adpilot_identity::RegisterRequest,
        adpilot_identity::LoginRequest,
        // Chat types
        adpilot_chat::service::ChatTurn,
        adpilot_chat::service::ChatMessageRequest,
        adpilot_chat::service::ChatReply,
        adpilot_chat::service::CampaignAnalysis,
        adpilot_chat::compose::FetchedData,
        // Insights types
        adpilot_insights::CampaignSummary,
        adpilot_insights::AccountPerformance,
        // Ads platform types
        adpilot_ads::PlatformUser,
        // REST request/response types
        crate::rest::ErrorResponse,
        crate::rest::RootResponse,
        crate::rest::HealthResponse,
        crate::auth_rest::LinkAdsCredentialRequest,
        crate::auth_rest::MessageResponse,
        crate::chat_rest::SuggestionsResponse,
        crate::ads_rest::ValidateTokenResponse,
        crate::ads_rest::AccountsResponse,
        crate::ads_rest::CampaignsResponse,
        crate::ads_rest::InsightsResponse,
        crate::ads_rest::AdSetsResponse,
        crate::ads_rest::AdsResponse,
        crate::ads_rest::RealtimeInsightsResponse,
        crate::ads_rest::StrategiesResponse,
        crate::ads_rest::MutationResponse,
        crate::ads_rest::StatusUpdateRequest,
        crate::ads_rest::BudgetUpdateRequest,
        crate::ads_rest::ExecuteStrategyRequest,
    ))
)]
pub struct ApiDoc;
