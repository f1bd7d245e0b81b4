//! Per-campaign optimization strategies derived from the latest insight.

use std::sync::Arc;

use adpilot_ads::AdsClient;
use adpilot_core::types::{
    Campaign, DateRange, EntityStatus, Insight, MetricsSnapshot, OptimizationStrategy,
    StrategyActions, StrategyRules,
};
use chrono::{Duration, Utc};
use tracing::info;

const LOW_CTR_THRESHOLD: f64 = 1.0;
const HIGH_CPC_THRESHOLD: f64 = 2.0;
const TARGET_CPM: f64 = 15.0;
const LOW_REACH_THRESHOLD: u64 = 10_000;

/// How far back the engine looks when picking a campaign's latest insight.
const LOOKBACK_DAYS: i64 = 7;

/// Derive a strategy for one campaign from its latest insight. Action flags
/// are independent predicates; none excludes another.
pub fn build_strategy(campaign: &Campaign, insight: &Insight) -> OptimizationStrategy {
    let now = Utc::now();
    OptimizationStrategy {
        campaign_id: campaign.id.clone(),
        campaign_name: campaign.name.clone(),
        strategy_type: "performance_optimization".to_string(),
        status: "active".to_string(),
        rules: StrategyRules {
            min_ctr: LOW_CTR_THRESHOLD,
            max_cpc: HIGH_CPC_THRESHOLD,
            target_cpm: TARGET_CPM,
            budget_threshold: campaign.daily_budget as f64 * 0.8,
        },
        actions: StrategyActions {
            pause_low_performing: insight.ctr < LOW_CTR_THRESHOLD,
            increase_budget: insight.cpc < 1.5 && insight.ctr > 2.0,
            adjust_bidding: insight.cpc > HIGH_CPC_THRESHOLD,
            expand_audience: insight.reach < LOW_REACH_THRESHOLD,
        },
        performance_metrics: MetricsSnapshot {
            spend: insight.spend as f64,
            impressions: insight.impressions,
            clicks: insight.clicks,
            ctr: insight.ctr,
            cpc: insight.cpc,
            cpm: insight.cpm,
        },
        created_at: now,
        updated_at: now,
    }
}

/// Generates and executes strategies for an account's active campaigns.
pub struct StrategyEngine {
    ads: Arc<AdsClient>,
}

impl StrategyEngine {
    pub fn new(ads: Arc<AdsClient>) -> Self {
        Self { ads }
    }

    /// One strategy per active campaign with recent insight data. Campaigns
    /// are walked sequentially in listing order, so the output order is
    /// deterministic.
    pub async fn generate(&self, account_id: &str, credential: &str) -> Vec<OptimizationStrategy> {
        let campaigns = self.ads.list_campaigns(account_id, credential).await;
        let today = Utc::now().date_naive();
        let range = DateRange {
            start: today - Duration::days(LOOKBACK_DAYS),
            end: today,
        };

        let mut strategies = Vec::new();
        for campaign in campaigns.iter().filter(|c| c.status.is_active()) {
            let insights = self
                .ads
                .get_insights(&campaign.id, credential, Some(&range))
                .await;
            if let Some(latest) = insights.last() {
                strategies.push(build_strategy(campaign, latest));
            }
        }

        info!(
            account_id,
            count = strategies.len(),
            "Generated optimization strategies"
        );
        strategies
    }

    /// Apply a strategy's action flags as upstream mutations. Returns false
    /// as soon as one mutation is rejected; already-issued mutations are not
    /// rolled back.
    pub async fn execute(&self, strategy: &OptimizationStrategy, credential: &str) -> bool {
        if strategy.actions.pause_low_performing {
            let ok = self
                .ads
                .set_campaign_status(&strategy.campaign_id, credential, EntityStatus::Paused)
                .await;
            if !ok {
                return false;
            }
        }

        if strategy.actions.increase_budget {
            // 20% raise over the latest observed spend, in minor units.
            let new_budget = (strategy.performance_metrics.spend * 1.2).round() as u64;
            let ok = self
                .ads
                .set_campaign_budget(&strategy.campaign_id, credential, new_budget)
                .await;
            if !ok {
                return false;
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adpilot_ads::SampleCatalog;

    fn campaign(daily_budget: u64) -> Campaign {
        Campaign {
            id: "c-1".to_string(),
            name: "Strategy Target".to_string(),
            status: EntityStatus::Active,
            objective: None,
            daily_budget,
            lifetime_budget: 0,
            spend: 2_450,
            impressions: 125_000,
            clicks: 3_200,
            ctr: 2.56,
            cpc: 0.77,
        }
    }

    fn insight(ctr: f64, cpc: f64, reach: u64) -> Insight {
        Insight {
            date: Utc::now().date_naive(),
            spend: 140,
            impressions: 7_000,
            clicks: 210,
            ctr,
            cpc,
            cpm: 20.0,
            reach,
            frequency: 2.0,
        }
    }

    #[test]
    fn rules_carry_fixed_thresholds_and_budget_share() {
        let strategy = build_strategy(&campaign(10_000), &insight(3.0, 0.7, 50_000));
        assert_eq!(strategy.rules.min_ctr, 1.0);
        assert_eq!(strategy.rules.max_cpc, 2.0);
        assert_eq!(strategy.rules.target_cpm, 15.0);
        assert!((strategy.rules.budget_threshold - 8_000.0).abs() < 1e-9);
    }

    #[test]
    fn action_flags_are_independent_predicates() {
        // Low CTR and low reach fire together.
        let strategy = build_strategy(&campaign(10_000), &insight(0.5, 1.0, 5_000));
        assert!(strategy.actions.pause_low_performing);
        assert!(!strategy.actions.increase_budget);
        assert!(!strategy.actions.adjust_bidding);
        assert!(strategy.actions.expand_audience);

        // Strong CTR with cheap clicks asks for more budget.
        let strategy = build_strategy(&campaign(10_000), &insight(2.5, 1.2, 50_000));
        assert!(!strategy.actions.pause_low_performing);
        assert!(strategy.actions.increase_budget);

        // Expensive clicks ask for bid adjustment.
        let strategy = build_strategy(&campaign(10_000), &insight(1.5, 2.5, 50_000));
        assert!(strategy.actions.adjust_bidding);
        assert!(!strategy.actions.increase_budget);
    }

    #[tokio::test]
    async fn engine_generates_strategies_for_active_campaigns_only() {
        let engine = StrategyEngine::new(Arc::new(AdsClient::sandbox(SampleCatalog::default())));
        let strategies = engine.generate("act_123456789", "token").await;

        // The sandbox has three campaigns, one of them paused.
        assert_eq!(strategies.len(), 2);
        let names: Vec<_> = strategies.iter().map(|s| s.campaign_name.as_str()).collect();
        assert_eq!(names, vec!["Summer Sale Campaign", "Lead Generation"]);
    }

    #[tokio::test]
    async fn engine_executes_against_the_sandbox() {
        let engine = StrategyEngine::new(Arc::new(AdsClient::sandbox(SampleCatalog::default())));
        let strategy = build_strategy(&campaign(10_000), &insight(0.5, 1.0, 5_000));
        assert!(engine.execute(&strategy, "token").await);
    }
}
