use serde::Deserialize;

/// Root application configuration. Loaded from environment variables
/// with the prefix `ADPILOT__`.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_node_id")]
    pub node_id: String,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub ads: AdsApiConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_http_port")]
    pub http_port: u16,
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "default_token_ttl_minutes")]
    pub token_ttl_minutes: i64,
}

/// Settings for the outbound ads-platform client.
///
/// `sandbox = true` serves canned fixture data instead of calling the
/// platform; flip it off and point `base_url` at the real Graph endpoint
/// for live traffic.
#[derive(Debug, Clone, Deserialize)]
pub struct AdsApiConfig {
    #[serde(default = "default_ads_base_url")]
    pub base_url: String,
    #[serde(default = "default_ads_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_ads_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_sandbox")]
    pub sandbox: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
    #[serde(default = "default_metrics_port")]
    pub port: u16,
}

// Default functions
fn default_node_id() -> String {
    "adpilot-01".to_string()
}
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_http_port() -> u16 {
    8080
}
fn default_cors_origins() -> Vec<String> {
    vec![
        "http://localhost:3000".to_string(),
        "http://localhost:3001".to_string(),
    ]
}
fn default_token_ttl_minutes() -> i64 {
    30
}
fn default_ads_base_url() -> String {
    "https://graph.facebook.com/v18.0".to_string()
}
fn default_ads_timeout_secs() -> u64 {
    30
}
fn default_ads_connect_timeout_secs() -> u64 {
    10
}
fn default_sandbox() -> bool {
    true
}
fn default_metrics_port() -> u16 {
    9091
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            http_port: default_http_port(),
            cors_origins: default_cors_origins(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_ttl_minutes: default_token_ttl_minutes(),
        }
    }
}

impl Default for AdsApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_ads_base_url(),
            timeout_secs: default_ads_timeout_secs(),
            connect_timeout_secs: default_ads_connect_timeout_secs(),
            sandbox: default_sandbox(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            port: default_metrics_port(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            node_id: default_node_id(),
            api: ApiConfig::default(),
            auth: AuthConfig::default(),
            ads: AdsApiConfig::default(),
            metrics: MetricsConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder().add_source(
            config::Environment::with_prefix("ADPILOT")
                .separator("__")
                .try_parsing(true)
                .list_separator(","),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_sandbox() {
        let config = AppConfig::default();
        assert!(config.ads.sandbox);
        assert_eq!(config.ads.timeout_secs, 30);
        assert_eq!(config.api.http_port, 8080);
    }
}
