//! AdPilot — conversational ads-management backend.
//!
//! Main entry point that wires the identity, ads-client, insight, and chat
//! services into the API server.

use std::sync::Arc;
use std::time::Instant;

use adpilot_ads::AdsClient;
use adpilot_api::{ApiServer, AppState};
use adpilot_chat::ChatService;
use adpilot_core::config::AppConfig;
use adpilot_identity::IdentityService;
use adpilot_insights::StrategyEngine;
use clap::Parser;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "adpilot")]
#[command(about = "Conversational ads-management backend")]
#[command(version)]
struct Cli {
    /// Node identifier (overrides config)
    #[arg(long, env = "ADPILOT__NODE_ID")]
    node_id: Option<String>,

    /// HTTP port (overrides config)
    #[arg(long, env = "ADPILOT__API__HTTP_PORT")]
    http_port: Option<u16>,

    /// Metrics port (overrides config)
    #[arg(long, env = "ADPILOT__METRICS__PORT")]
    metrics_port: Option<u16>,

    /// Serve canned sandbox data instead of calling the ads platform
    #[arg(long, env = "ADPILOT__ADS__SANDBOX")]
    sandbox: Option<bool>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "adpilot=info,tower_http=info".into()),
        )
        .json()
        .init();

    let cli = Cli::parse();

    info!("AdPilot starting up");

    // Load configuration
    let mut config = AppConfig::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to load config, using defaults");
        AppConfig::default()
    });

    // Apply CLI overrides
    if let Some(node_id) = cli.node_id {
        config.node_id = node_id;
    }
    if let Some(port) = cli.http_port {
        config.api.http_port = port;
    }
    if let Some(port) = cli.metrics_port {
        config.metrics.port = port;
    }
    if let Some(sandbox) = cli.sandbox {
        config.ads.sandbox = sandbox;
    }

    info!(
        node_id = %config.node_id,
        http_port = config.api.http_port,
        metrics_port = config.metrics.port,
        sandbox = config.ads.sandbox,
        "Configuration loaded"
    );

    // Construct services explicitly; handlers only ever see these instances.
    let identity = Arc::new(IdentityService::new(&config.auth));
    let ads = Arc::new(AdsClient::from_config(&config.ads)?);
    let chat = Arc::new(ChatService::new(ads.clone()));
    let strategies = Arc::new(StrategyEngine::new(ads.clone()));

    let state = AppState {
        identity,
        ads,
        chat,
        strategies,
        node_id: config.node_id.clone(),
        start_time: Instant::now(),
    };

    let api_server = ApiServer::new(config, state.clone());

    // Start metrics exporter
    if let Err(e) = api_server.start_metrics().await {
        error!(error = %e, "Failed to start metrics exporter");
    }

    // Periodic session cleanup
    let identity_for_maintenance = state.identity.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_secs(300));
        loop {
            interval.tick().await;
            identity_for_maintenance.evict_expired_sessions();
        }
    });

    info!("AdPilot is ready to serve traffic");

    // Start HTTP server (blocks until shutdown)
    api_server.start_http().await?;

    Ok(())
}
