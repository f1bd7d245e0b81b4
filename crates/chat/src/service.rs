//! Chat orchestration: resolve the caller's account, fetch what the query
//! asks for, derive advisories, and compose the reply.

use std::sync::Arc;

use adpilot_ads::AdsClient;
use adpilot_core::types::{ChartSpec, Recommendation, User};
use adpilot_insights::{recommend, summarize_campaigns, CampaignSummary};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::charts::{campaign_performance_chart, spend_trend_chart};
use crate::compose::{compose_reply, FetchedData};
use crate::dispatch::{detect_intent, wants_chart, QueryIntent};

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ChatTurn {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ChatMessageRequest {
    pub content: String,
    /// Prior turns, accepted for API compatibility; composition is
    /// stateless and does not read them.
    #[serde(default)]
    pub history: Vec<ChatTurn>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ChatReply {
    pub response: String,
    pub data: FetchedData,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart_spec: Option<ChartSpec>,
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CampaignAnalysis {
    pub analysis: CampaignSummary,
    pub recommendations: Vec<Recommendation>,
    pub chart_spec: ChartSpec,
}

/// Stateless per-request chat handler over the ads client.
pub struct ChatService {
    ads: Arc<AdsClient>,
}

impl ChatService {
    pub fn new(ads: Arc<AdsClient>) -> Self {
        Self { ads }
    }

    /// Answer one free-text message for an authenticated user.
    pub async fn handle_message(&self, user: &User, content: &str) -> ChatReply {
        let credential = user.ads_access_token.clone().unwrap_or_default();
        let intent = detect_intent(content);
        let chart_wanted = wants_chart(content);
        debug!(?intent, chart_wanted, "Dispatched chat query");

        let mut chart: Option<ChartSpec> = None;
        let mut recommendations: Vec<Recommendation> = Vec::new();

        let data = match intent {
            None => FetchedData::Empty,
            Some(QueryIntent::Accounts) => {
                FetchedData::Accounts(self.ads.list_ad_accounts(&credential).await)
            }
            Some(QueryIntent::Campaigns) => {
                let campaigns = match self.primary_account_id(&credential).await {
                    Some(account_id) => self.ads.list_campaigns(&account_id, &credential).await,
                    None => Vec::new(),
                };
                recommendations = recommend(&campaigns);
                if chart_wanted && !campaigns.is_empty() {
                    chart = Some(campaign_performance_chart(&campaigns));
                }
                FetchedData::Campaigns(campaigns)
            }
            Some(QueryIntent::Insights) => {
                let insights = match self.primary_account_id(&credential).await {
                    Some(account_id) => {
                        self.ads.get_insights(&account_id, &credential, None).await
                    }
                    None => Vec::new(),
                };
                if chart_wanted && !insights.is_empty() {
                    chart = Some(spend_trend_chart(&insights));
                }
                FetchedData::Insights(insights)
            }
            Some(QueryIntent::AdSets) => {
                FetchedData::AdSets(match self.primary_campaign_id(&credential).await {
                    Some(campaign_id) => self.ads.list_ad_sets(&campaign_id, &credential).await,
                    None => Vec::new(),
                })
            }
            Some(QueryIntent::Ads) => {
                let adsets = match self.primary_campaign_id(&credential).await {
                    Some(campaign_id) => self.ads.list_ad_sets(&campaign_id, &credential).await,
                    None => Vec::new(),
                };
                FetchedData::Ads(match adsets.first() {
                    Some(adset) => self.ads.list_ads(&adset.id, &credential).await,
                    None => Vec::new(),
                })
            }
        };

        let response = compose_reply(content, &data, chart.as_ref(), &recommendations);
        ChatReply {
            response,
            data,
            chart_spec: chart,
            recommendations,
        }
    }

    /// Campaign rollup for the caller's primary account: summary,
    /// advisories, and the performance chart.
    pub async fn analyze(&self, user: &User) -> CampaignAnalysis {
        let credential = user.ads_access_token.clone().unwrap_or_default();
        let campaigns = match self.primary_account_id(&credential).await {
            Some(account_id) => self.ads.list_campaigns(&account_id, &credential).await,
            None => Vec::new(),
        };

        CampaignAnalysis {
            analysis: summarize_campaigns(&campaigns),
            recommendations: recommend(&campaigns),
            chart_spec: campaign_performance_chart(&campaigns),
        }
    }

    /// Suggested starter questions for the chat UI.
    pub fn suggestions() -> Vec<&'static str> {
        vec![
            "Show me my ad accounts",
            "What are my campaign performance metrics?",
            "Generate a chart of my daily spend",
            "Which campaigns have the best CTR?",
            "Show me impressions by campaign",
            "What are your recommendations for improving performance?",
            "Show me my ad sets and targeting",
            "What's my current ad spend trend?",
        ]
    }

    /// The caller's account, resolved from their linked credential rather
    /// than any fixed id.
    async fn primary_account_id(&self, credential: &str) -> Option<String> {
        self.ads
            .list_ad_accounts(credential)
            .await
            .into_iter()
            .next()
            .map(|account| account.id)
    }

    async fn primary_campaign_id(&self, credential: &str) -> Option<String> {
        let account_id = self.primary_account_id(credential).await?;
        self.ads
            .list_campaigns(&account_id, credential)
            .await
            .into_iter()
            .next()
            .map(|campaign| campaign.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adpilot_ads::SampleCatalog;
    use adpilot_core::types::{RecommendationKind, UserRole};
    use chrono::Utc;
    use uuid::Uuid;

    fn user() -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            email: "analyst@example.com".to_string(),
            full_name: None,
            role: UserRole::Analyst,
            is_active: true,
            created_at: now,
            updated_at: now,
            ads_access_token: Some("sandbox-access-token".to_string()),
            ads_user_id: None,
        }
    }

    fn service() -> ChatService {
        ChatService::new(Arc::new(AdsClient::sandbox(SampleCatalog::default())))
    }

    #[tokio::test]
    async fn campaign_query_fetches_recommends_and_charts() {
        let reply = service().handle_message(&user(), "Show me my campaigns").await;

        match &reply.data {
            FetchedData::Campaigns(campaigns) => assert_eq!(campaigns.len(), 3),
            other => panic!("expected campaigns, got {other:?}"),
        }
        // "show" is a chart keyword.
        let chart = reply.chart_spec.expect("chart");
        assert_eq!(chart.data.labels.len(), 3);
        // Sandbox: one paused low-CTR campaign, two active big spenders.
        assert_eq!(reply.recommendations.len(), 3);
        assert!(reply.response.starts_with("I found 3 campaign(s):"));
    }

    #[tokio::test]
    async fn account_query_does_not_recommend() {
        let reply = service().handle_message(&user(), "list my ad accounts").await;
        assert!(matches!(&reply.data, FetchedData::Accounts(a) if a.len() == 2));
        assert!(reply.recommendations.is_empty());
        assert!(reply.chart_spec.is_none());
    }

    #[tokio::test]
    async fn insight_query_with_chart_keyword_attaches_spend_trend() {
        let reply = service()
            .handle_message(&user(), "graph my spend trend")
            .await;
        assert!(matches!(&reply.data, FetchedData::Insights(i) if i.len() == 5));
        let chart = reply.chart_spec.expect("chart");
        assert_eq!(chart.data.datasets[0].label, "Daily Spend ($)");
        assert!(reply.response.contains("📊"));
    }

    #[tokio::test]
    async fn adset_and_ad_queries_walk_the_hierarchy() {
        let reply = service().handle_message(&user(), "show my ad sets").await;
        assert!(matches!(&reply.data, FetchedData::AdSets(s) if s.len() == 1));

        let reply = service().handle_message(&user(), "list my ads").await;
        assert!(matches!(&reply.data, FetchedData::Ads(a) if a.len() == 1));
    }

    #[tokio::test]
    async fn small_talk_gets_the_help_message() {
        let reply = service().handle_message(&user(), "good morning!").await;
        assert!(matches!(reply.data, FetchedData::Empty));
        assert!(reply.response.contains("I'm here to help"));
    }

    #[tokio::test]
    async fn two_campaign_fixture_yields_one_low_ctr_advisory() {
        use adpilot_core::types::{Campaign, EntityStatus};

        // The canonical acceptance fixture: an active high spender with a
        // healthy CTR, and a paused campaign below the CTR floor.
        let catalog = SampleCatalog::with_campaigns(vec![
            Campaign {
                id: "1".to_string(),
                name: "Summer Sale Campaign".to_string(),
                status: EntityStatus::Active,
                objective: None,
                daily_budget: 10_000,
                lifetime_budget: 0,
                spend: 2_450,
                impressions: 125_000,
                clicks: 3_200,
                ctr: 2.56,
                cpc: 0.77,
            },
            Campaign {
                id: "2".to_string(),
                name: "Brand Awareness".to_string(),
                status: EntityStatus::Paused,
                objective: None,
                daily_budget: 5_000,
                lifetime_budget: 0,
                spend: 1_890,
                impressions: 89_000,
                clicks: 1_200,
                ctr: 1.35,
                cpc: 1.58,
            },
        ]);
        let service = ChatService::new(Arc::new(AdsClient::sandbox(catalog)));

        let reply = service.handle_message(&user(), "Show me my campaigns").await;
        assert!(reply.response.contains("I found 2 campaign(s):"));

        let low_ctr: Vec<_> = reply
            .recommendations
            .iter()
            .filter(|r| r.kind == RecommendationKind::LowCtr)
            .collect();
        assert_eq!(low_ctr.len(), 1);
        assert_eq!(low_ctr[0].campaign_name, "Brand Awareness");
    }

    #[tokio::test]
    async fn analyze_summarizes_the_primary_account() {
        let analysis = service().analyze(&user()).await;
        assert_eq!(analysis.analysis.total_campaigns, 3);
        assert_eq!(analysis.analysis.active_campaigns, 2);
        assert_eq!(analysis.chart_spec.data.labels.len(), 3);
        assert!(!analysis.recommendations.is_empty());
    }
}
