//! The ads-platform client proper.

use std::time::Duration;

use adpilot_core::config::AdsApiConfig;
use adpilot_core::types::{Ad, AdAccount, AdSet, Campaign, DateRange, EntityStatus, Insight};
use adpilot_core::{AdpilotError, AdpilotResult};
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::sandbox::SampleCatalog;
use crate::wire::{
    self, ListEnvelope, PlatformUser, ACCOUNT_FIELDS, ADSET_FIELDS, AD_FIELDS, CAMPAIGN_FIELDS,
    INSIGHT_FIELDS, USER_FIELDS,
};

enum Backend {
    Http(HttpBackend),
    Sandbox(SampleCatalog),
}

struct HttpBackend {
    http: reqwest::Client,
    base_url: String,
}

/// Client for the external ads platform. One reusable connection pool per
/// process; every call is bounded by the configured timeouts.
pub struct AdsClient {
    backend: Backend,
}

impl AdsClient {
    /// Build from configuration: sandbox catalog or live HTTP backend.
    pub fn from_config(config: &AdsApiConfig) -> AdpilotResult<Self> {
        if config.sandbox {
            return Ok(Self::sandbox(SampleCatalog::default()));
        }

        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent("adpilot")
            .build()
            .map_err(|err| AdpilotError::Config(err.to_string()))?;

        Ok(Self {
            backend: Backend::Http(HttpBackend {
                http,
                base_url: config.base_url.trim_end_matches('/').to_string(),
            }),
        })
    }

    pub fn sandbox(catalog: SampleCatalog) -> Self {
        Self {
            backend: Backend::Sandbox(catalog),
        }
    }

    /// Whether the access token resolves to a platform identity.
    pub async fn validate_access_token(&self, credential: &str) -> bool {
        match &self.backend {
            Backend::Sandbox(_) => !credential.is_empty(),
            Backend::Http(http) => http.get_node("me", credential, &[]).await.is_some(),
        }
    }

    /// The platform user behind the access token, if any.
    pub async fn get_platform_user(&self, credential: &str) -> Option<PlatformUser> {
        match &self.backend {
            Backend::Sandbox(_) => Some(PlatformUser {
                id: "sandbox-user".to_string(),
                name: "Sandbox User".to_string(),
                email: Some("sandbox@adpilot.dev".to_string()),
            }),
            Backend::Http(http) => {
                let value = http
                    .get_node("me", credential, &[("fields", USER_FIELDS)])
                    .await?;
                serde_json::from_value(value).ok()
            }
        }
    }

    pub async fn list_ad_accounts(&self, credential: &str) -> Vec<AdAccount> {
        match &self.backend {
            Backend::Sandbox(catalog) => catalog.accounts(),
            Backend::Http(http) => {
                http.get_list("me/adaccounts", credential, &[("fields", ACCOUNT_FIELDS)])
                    .await
            }
        }
    }

    pub async fn list_campaigns(&self, account_id: &str, credential: &str) -> Vec<Campaign> {
        let campaigns = match &self.backend {
            Backend::Sandbox(catalog) => catalog.campaigns(account_id),
            Backend::Http(http) => {
                http.get_list(
                    &format!("{account_id}/campaigns"),
                    credential,
                    &[("fields", CAMPAIGN_FIELDS)],
                )
                .await
            }
        };
        campaigns
            .into_iter()
            .map(Campaign::with_derived_metrics)
            .collect()
    }

    pub async fn list_ad_sets(&self, campaign_id: &str, credential: &str) -> Vec<AdSet> {
        match &self.backend {
            Backend::Sandbox(catalog) => catalog.adsets(campaign_id),
            Backend::Http(http) => {
                http.get_list(
                    &format!("{campaign_id}/adsets"),
                    credential,
                    &[("fields", ADSET_FIELDS)],
                )
                .await
            }
        }
    }

    pub async fn list_ads(&self, adset_id: &str, credential: &str) -> Vec<Ad> {
        match &self.backend {
            Backend::Sandbox(catalog) => catalog.ads(adset_id),
            Backend::Http(http) => {
                http.get_list(
                    &format!("{adset_id}/ads"),
                    credential,
                    &[("fields", AD_FIELDS)],
                )
                .await
            }
        }
    }

    /// Insights for an account, campaign, ad set, or ad. Without an explicit
    /// range the trailing 30-day window applies.
    pub async fn get_insights(
        &self,
        object_id: &str,
        credential: &str,
        range: Option<&DateRange>,
    ) -> Vec<Insight> {
        match &self.backend {
            Backend::Sandbox(catalog) => catalog.insights(object_id, range),
            Backend::Http(http) => {
                let path = format!("{object_id}/insights");
                match range {
                    None => {
                        http.get_list(
                            &path,
                            credential,
                            &[("fields", INSIGHT_FIELDS), ("date_preset", "last_30d")],
                        )
                        .await
                    }
                    Some(range) => {
                        let time_range = wire::time_range_param(range);
                        http.get_list(
                            &path,
                            credential,
                            &[
                                ("fields", INSIGHT_FIELDS),
                                ("date_preset", "custom"),
                                ("time_range", &time_range),
                            ],
                        )
                        .await
                    }
                }
            }
        }
    }

    /// Today's insights for an account.
    pub async fn realtime_insights(&self, account_id: &str, credential: &str) -> Vec<Insight> {
        match &self.backend {
            Backend::Sandbox(catalog) => {
                catalog.insights(account_id, None).into_iter().rev().take(1).collect()
            }
            Backend::Http(http) => {
                http.get_list(
                    &format!("{account_id}/insights"),
                    credential,
                    &[("fields", INSIGHT_FIELDS), ("date_preset", "today")],
                )
                .await
            }
        }
    }

    pub async fn set_campaign_status(
        &self,
        campaign_id: &str,
        credential: &str,
        status: EntityStatus,
    ) -> bool {
        let status = status_param(status);
        match &self.backend {
            Backend::Sandbox(_) => true,
            Backend::Http(http) => {
                http.post_update(campaign_id, credential, &[("status", status)])
                    .await
            }
        }
    }

    pub async fn set_campaign_budget(
        &self,
        campaign_id: &str,
        credential: &str,
        daily_budget_minor: u64,
    ) -> bool {
        match &self.backend {
            Backend::Sandbox(_) => true,
            Backend::Http(http) => {
                http.post_update(
                    campaign_id,
                    credential,
                    &[("daily_budget", daily_budget_minor.to_string())],
                )
                .await
            }
        }
    }
}

fn status_param(status: EntityStatus) -> String {
    match status {
        EntityStatus::Active => "ACTIVE",
        EntityStatus::Paused => "PAUSED",
        EntityStatus::Other => "ARCHIVED",
    }
    .to_string()
}

impl HttpBackend {
    /// One GET returning a `data` list. Upstream failure of any shape
    /// (transport, non-2xx, error payload) degrades to an empty list.
    async fn get_list<T: DeserializeOwned>(
        &self,
        path: &str,
        credential: &str,
        params: &[(&str, &str)],
    ) -> Vec<T> {
        match self.try_get_list(path, credential, params).await {
            Ok(items) => items,
            Err(reason) => {
                warn!(path, reason, "Ads platform read failed, degrading to empty result");
                Vec::new()
            }
        }
    }

    async fn try_get_list<T: DeserializeOwned>(
        &self,
        path: &str,
        credential: &str,
        params: &[(&str, &str)],
    ) -> Result<Vec<T>, String> {
        let url = format!("{}/{}", self.base_url, path);
        let response = self
            .http
            .get(&url)
            .query(&[("access_token", credential)])
            .query(params)
            .send()
            .await
            .map_err(|err| scrub(&err))?;

        if !response.status().is_success() {
            return Err(format!("upstream status {}", response.status()));
        }

        let envelope: ListEnvelope<T> = response.json().await.map_err(|err| scrub(&err))?;
        envelope.into_data()
    }

    /// One GET returning a single node object (e.g. `/me`). `None` on any
    /// failure, including an error payload.
    async fn get_node(
        &self,
        path: &str,
        credential: &str,
        params: &[(&str, &str)],
    ) -> Option<serde_json::Value> {
        let url = format!("{}/{}", self.base_url, path);
        let response = self
            .http
            .get(&url)
            .query(&[("access_token", credential)])
            .query(params)
            .send()
            .await
            .ok()?;

        if !response.status().is_success() {
            return None;
        }
        let value: serde_json::Value = response.json().await.ok()?;
        if value.get("error").is_some() {
            return None;
        }
        Some(value)
    }

    /// One POST mutating a node. `false` on any failure.
    async fn post_update(&self, path: &str, credential: &str, form: &[(&str, String)]) -> bool {
        let url = format!("{}/{}", self.base_url, path);
        match self
            .http
            .post(&url)
            .query(&[("access_token", credential)])
            .form(form)
            .send()
            .await
        {
            Ok(response) if response.status().is_success() => true,
            Ok(response) => {
                warn!(path, status = %response.status(), "Ads platform write rejected");
                false
            }
            Err(err) => {
                warn!(path, reason = %scrub(&err), "Ads platform write failed");
                false
            }
        }
    }
}

/// Error text for logs. reqwest errors can embed the full request URL, which
/// carries the access token; keep only the error kind.
fn scrub(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        "timeout".to_string()
    } else if err.is_connect() {
        "connect error".to_string()
    } else if err.is_decode() {
        "decode error".to_string()
    } else {
        "request error".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> AdsClient {
        AdsClient::sandbox(SampleCatalog::default())
    }

    #[tokio::test]
    async fn sandbox_serves_accounts_and_campaigns() {
        let client = client();
        let accounts = client.list_ad_accounts("token").await;
        assert_eq!(accounts.len(), 2);
        assert_eq!(accounts[0].id, "act_123456789");

        let campaigns = client.list_campaigns(&accounts[0].id, "token").await;
        assert_eq!(campaigns.len(), 3);
    }

    #[tokio::test]
    async fn sandbox_writes_always_succeed() {
        let client = client();
        assert!(
            client
                .set_campaign_status("123456789", "token", EntityStatus::Paused)
                .await
        );
        assert!(client.set_campaign_budget("123456789", "token", 12_000).await);
    }

    #[tokio::test]
    async fn default_window_returns_all_sandbox_insights() {
        let client = client();
        let insights = client.get_insights("123456789", "token", None).await;
        assert_eq!(insights.len(), 5);
    }

    #[tokio::test]
    async fn config_selects_sandbox_backend() {
        let config = AdsApiConfig::default();
        assert!(config.sandbox);
        let client = AdsClient::from_config(&config).expect("client");
        assert!(client.validate_access_token("anything").await);
    }
}
