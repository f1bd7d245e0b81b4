//! API server — router assembly, HTTP listener, and metrics exporter.

use adpilot_core::config::AppConfig;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::Router;
use std::net::SocketAddr;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::rest::AppState;
use crate::{ads_rest, auth_rest, chat_rest, rest, swagger};

/// Build the full application router. Exposed separately from [`ApiServer`]
/// so tests can drive it in-process.
pub fn build_router(config: &AppConfig, state: AppState) -> Router {
    let cors = cors_layer(&config.api.cors_origins);

    Router::new()
        // Operational endpoints
        .route("/", get(rest::root))
        .route("/health", get(rest::health_check))
        .route("/ready", get(rest::readiness))
        .route("/live", get(rest::liveness))
        // Auth
        .route("/api/v1/auth/register", post(auth_rest::register))
        .route("/api/v1/auth/login", post(auth_rest::login))
        .route("/api/v1/auth/me", get(auth_rest::me))
        .route("/api/v1/auth/refresh", post(auth_rest::refresh))
        .route("/api/v1/auth/logout", post(auth_rest::logout))
        .route("/api/v1/auth/ads-credential", post(auth_rest::link_ads_credential))
        // Chat
        .route("/api/v1/chat/message", post(chat_rest::send_message))
        .route("/api/v1/chat/suggestions", get(chat_rest::suggestions))
        .route("/api/v1/chat/analyze", post(chat_rest::analyze))
        // Ads platform proxy
        .route("/api/v1/meta/validate-token", get(ads_rest::validate_token))
        .route("/api/v1/meta/user-info", get(ads_rest::user_info))
        .route("/api/v1/meta/ad-accounts", get(ads_rest::ad_accounts))
        .route("/api/v1/meta/campaigns/:id", get(ads_rest::campaigns))
        .route("/api/v1/meta/campaigns/:id/status", post(ads_rest::update_campaign_status))
        .route("/api/v1/meta/campaigns/:id/budget", post(ads_rest::update_campaign_budget))
        .route("/api/v1/meta/insights/:id", get(ads_rest::insights))
        .route("/api/v1/meta/ad-sets/:id", get(ads_rest::ad_sets))
        .route("/api/v1/meta/ads/:id", get(ads_rest::ads))
        .route("/api/v1/meta/realtime/:id", get(ads_rest::realtime_insights))
        .route("/api/v1/meta/strategies/execute", post(ads_rest::execute_strategy))
        .route("/api/v1/meta/strategies/:id", get(ads_rest::strategies))
        .route("/api/v1/meta/performance/:id", get(ads_rest::account_performance))
        // API documentation
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", swagger::ApiDoc::openapi()))
        // Middleware
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    if parsed.is_empty() {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(parsed))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

/// Main API server managing the REST endpoint and the metrics exporter.
pub struct ApiServer {
    config: AppConfig,
    state: AppState,
}

impl ApiServer {
    pub fn new(config: AppConfig, state: AppState) -> Self {
        Self { config, state }
    }

    /// Start the HTTP server. Blocks until shutdown.
    pub async fn start_http(&self) -> anyhow::Result<()> {
        let app = build_router(&self.config, self.state.clone());

        let addr = SocketAddr::new(self.config.api.host.parse()?, self.config.api.http_port);
        info!(addr = %addr, "Starting HTTP server");

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }

    /// Start the Prometheus metrics exporter on its own port.
    pub async fn start_metrics(&self) -> anyhow::Result<()> {
        let addr = SocketAddr::new(self.config.api.host.parse()?, self.config.metrics.port);
        metrics_exporter_prometheus::PrometheusBuilder::new()
            .with_http_listener(addr)
            .install()?;

        info!(port = self.config.metrics.port, "Metrics exporter started");
        Ok(())
    }
}
