use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

// ─── Users ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Manager,
    Analyst,
    User,
}

impl Default for UserRole {
    fn default() -> Self {
        Self::User
    }
}

/// A registered user of the platform.
///
/// The optional `ads_access_token` links the account to the external ads
/// platform; it is carried verbatim and never logged.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub full_name: Option<String>,
    pub role: UserRole,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub ads_access_token: Option<String>,
    #[serde(default)]
    pub ads_user_id: Option<String>,
}

/// Bearer token issued on login/refresh.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub user: User,
}

// ─── Ads platform resources ────────────────────────────────────────────────

/// Status shared by accounts, campaigns, ad sets and ads. Upstream statuses
/// outside the active/paused pair collapse into `Other`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityStatus {
    Active,
    Paused,
    #[serde(other)]
    Other,
}

impl EntityStatus {
    pub fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

impl std::fmt::Display for EntityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Active => "ACTIVE",
            Self::Paused => "PAUSED",
            Self::Other => "OTHER",
        };
        f.write_str(s)
    }
}

/// Read-only mirror of an upstream ad account. Never persisted locally.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AdAccount {
    pub id: String,
    pub name: String,
    pub status: EntityStatus,
    pub currency: String,
    pub timezone_name: String,
}

/// A campaign with its metrics bundle. Budgets and spend are integer minor
/// currency units (cents).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Campaign {
    pub id: String,
    pub name: String,
    pub status: EntityStatus,
    #[serde(default)]
    pub objective: Option<String>,
    #[serde(default)]
    pub daily_budget: u64,
    #[serde(default)]
    pub lifetime_budget: u64,
    #[serde(default)]
    pub spend: u64,
    #[serde(default)]
    pub impressions: u64,
    #[serde(default)]
    pub clicks: u64,
    #[serde(default)]
    pub ctr: f64,
    #[serde(default)]
    pub cpc: f64,
}

impl Campaign {
    /// Fill in ctr/cpc from the raw counters when the upstream omitted them.
    ///
    /// Invariants: ctr = clicks/impressions×100 (0 when impressions = 0),
    /// cpc = spend/clicks (0 when clicks = 0).
    pub fn with_derived_metrics(mut self) -> Self {
        if self.ctr == 0.0 && self.impressions > 0 {
            self.ctr = self.clicks as f64 / self.impressions as f64 * 100.0;
        }
        if self.cpc == 0.0 && self.clicks > 0 {
            self.cpc = self.spend as f64 / self.clicks as f64;
        }
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AdSet {
    pub id: String,
    pub name: String,
    pub status: EntityStatus,
    pub campaign_id: String,
    #[serde(default)]
    pub daily_budget: u64,
    #[serde(default)]
    pub lifetime_budget: u64,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub targeting: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AdCreative {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Ad {
    pub id: String,
    pub name: String,
    pub status: EntityStatus,
    pub adset_id: String,
    #[serde(default)]
    pub creative: Option<AdCreative>,
}

/// A dated metrics snapshot for one entity (account/campaign/adset/ad).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Insight {
    #[serde(alias = "date_start")]
    pub date: NaiveDate,
    #[serde(default)]
    pub spend: u64,
    #[serde(default)]
    pub impressions: u64,
    #[serde(default)]
    pub clicks: u64,
    #[serde(default)]
    pub ctr: f64,
    #[serde(default)]
    pub cpc: f64,
    #[serde(default)]
    pub cpm: f64,
    #[serde(default)]
    pub reach: u64,
    #[serde(default)]
    pub frequency: f64,
}

/// Inclusive ISO date range for insight queries. Total by construction:
/// a lone start or end cannot be expressed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

// ─── Derived advisory types ────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    LowCtr,
    SpendReview,
}

/// A generated text advisory tied to one campaign.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Recommendation {
    pub campaign_id: String,
    pub campaign_name: String,
    pub kind: RecommendationKind,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StrategyRules {
    pub min_ctr: f64,
    pub max_cpc: f64,
    pub target_cpm: f64,
    pub budget_threshold: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct StrategyActions {
    pub pause_low_performing: bool,
    pub increase_budget: bool,
    pub adjust_bidding: bool,
    pub expand_audience: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MetricsSnapshot {
    pub spend: f64,
    pub impressions: u64,
    pub clicks: u64,
    pub ctr: f64,
    pub cpc: f64,
    pub cpm: f64,
}

/// Optimization plan for one campaign, derived synchronously from its latest
/// insight. Never stored; executed immediately on request.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OptimizationStrategy {
    pub campaign_id: String,
    pub campaign_name: String,
    pub strategy_type: String,
    pub status: String,
    pub rules: StrategyRules,
    pub actions: StrategyActions,
    pub performance_metrics: MetricsSnapshot,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ─── Chart specifications ──────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Line,
    Bar,
}

/// One labeled series, styled the way the chat UI's chart library expects.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataset {
    pub label: String,
    pub data: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tension: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<ChartDataset>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChartTitle {
    pub display: bool,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChartPlugins {
    pub title: ChartTitle,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChartOptions {
    pub responsive: bool,
    pub plugins: ChartPlugins,
}

/// Declarative chart description derived from campaign or insight records.
/// A projection only, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChartSpec {
    #[serde(rename = "type")]
    pub chart_type: ChartType,
    pub data: ChartData,
    pub options: ChartOptions,
}

impl ChartSpec {
    pub fn titled(chart_type: ChartType, title: &str, data: ChartData) -> Self {
        Self {
            chart_type,
            data,
            options: ChartOptions {
                responsive: true,
                plugins: ChartPlugins {
                    title: ChartTitle {
                        display: true,
                        text: title.to_string(),
                    },
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_metrics_fill_missing_fields() {
        let campaign = Campaign {
            id: "c1".into(),
            name: "Test".into(),
            status: EntityStatus::Active,
            objective: None,
            daily_budget: 10_000,
            lifetime_budget: 0,
            spend: 2_450,
            impressions: 125_000,
            clicks: 3_200,
            ctr: 0.0,
            cpc: 0.0,
        }
        .with_derived_metrics();

        assert!((campaign.ctr - 2.56).abs() < 0.01);
        assert!((campaign.cpc - 0.765625).abs() < 1e-9);
    }

    #[test]
    fn derived_metrics_guard_zero_denominators() {
        let campaign = Campaign {
            id: "c2".into(),
            name: "Empty".into(),
            status: EntityStatus::Paused,
            objective: None,
            daily_budget: 0,
            lifetime_budget: 0,
            spend: 500,
            impressions: 0,
            clicks: 0,
            ctr: 0.0,
            cpc: 0.0,
        }
        .with_derived_metrics();

        assert_eq!(campaign.ctr, 0.0);
        assert_eq!(campaign.cpc, 0.0);
    }

    #[test]
    fn entity_status_collapses_unknown_variants() {
        let status: EntityStatus = serde_json::from_str("\"ARCHIVED\"").expect("deserialize");
        assert_eq!(status, EntityStatus::Other);
        let status: EntityStatus = serde_json::from_str("\"ACTIVE\"").expect("deserialize");
        assert!(status.is_active());
    }

    #[test]
    fn chart_spec_serializes_chart_js_shape() {
        let spec = ChartSpec::titled(
            ChartType::Line,
            "Daily Ad Spend Trend",
            ChartData {
                labels: vec!["2024-01-01".into()],
                datasets: vec![ChartDataset {
                    label: "Daily Spend ($)".into(),
                    data: vec![1.0],
                    border_color: Some("rgb(59, 130, 246)".into()),
                    background_color: None,
                    border_width: None,
                    tension: Some(0.1),
                }],
            },
        );
        let json = serde_json::to_value(&spec).expect("serialize");
        assert_eq!(json["type"], "line");
        assert_eq!(json["data"]["datasets"][0]["borderColor"], "rgb(59, 130, 246)");
        assert_eq!(json["options"]["plugins"]["title"]["text"], "Daily Ad Spend Trend");
    }
}
