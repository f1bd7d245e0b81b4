//! Aggregate views over campaign and insight lists.
//!
//! Every average is defined as 0 over an empty input; no summarization path
//! can divide by zero.

use adpilot_core::types::{Campaign, Insight};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// Whole-list rollup used by the chat analyze flow.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CampaignSummary {
    pub total_campaigns: usize,
    pub active_campaigns: usize,
    /// Minor currency units across all campaigns.
    pub total_spend: u64,
    /// Mean of per-campaign CTRs, 0 for an empty list.
    pub avg_ctr: f64,
}

pub fn summarize_campaigns(campaigns: &[Campaign]) -> CampaignSummary {
    let total_spend = campaigns.iter().map(|c| c.spend).sum();
    let active_campaigns = campaigns.iter().filter(|c| c.status.is_active()).count();
    let avg_ctr = if campaigns.is_empty() {
        0.0
    } else {
        campaigns.iter().map(|c| c.ctr).sum::<f64>() / campaigns.len() as f64
    };

    CampaignSummary {
        total_campaigns: campaigns.len(),
        active_campaigns,
        total_spend,
        avg_ctr,
    }
}

/// Active-only account rollup with averages recomputed from the raw
/// counters rather than averaged per campaign.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AccountPerformance {
    pub account_id: String,
    pub total_campaigns: usize,
    pub active_campaigns: usize,
    pub total_spend: u64,
    pub total_impressions: u64,
    pub total_clicks: u64,
    pub average_ctr: f64,
    pub average_cpc: f64,
    pub last_updated: DateTime<Utc>,
}

pub fn account_performance(account_id: &str, campaigns: &[Campaign]) -> AccountPerformance {
    let mut total_spend = 0u64;
    let mut total_impressions = 0u64;
    let mut total_clicks = 0u64;
    let mut active_campaigns = 0usize;

    for campaign in campaigns.iter().filter(|c| c.status.is_active()) {
        active_campaigns += 1;
        total_spend += campaign.spend;
        total_impressions += campaign.impressions;
        total_clicks += campaign.clicks;
    }

    let average_ctr = if total_impressions > 0 {
        total_clicks as f64 / total_impressions as f64 * 100.0
    } else {
        0.0
    };
    let average_cpc = if total_clicks > 0 {
        total_spend as f64 / total_clicks as f64
    } else {
        0.0
    };

    AccountPerformance {
        account_id: account_id.to_string(),
        total_campaigns: campaigns.len(),
        active_campaigns,
        total_spend,
        total_impressions,
        total_clicks,
        average_ctr,
        average_cpc,
        last_updated: Utc::now(),
    }
}

/// Rollup over a dated insight window.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct InsightSummary {
    pub total_spend: u64,
    pub avg_ctr: f64,
}

pub fn summarize_insights(insights: &[Insight]) -> InsightSummary {
    let total_spend = insights.iter().map(|i| i.spend).sum();
    let avg_ctr = if insights.is_empty() {
        0.0
    } else {
        insights.iter().map(|i| i.ctr).sum::<f64>() / insights.len() as f64
    };
    InsightSummary {
        total_spend,
        avg_ctr,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adpilot_core::types::EntityStatus;

    fn campaign(name: &str, status: EntityStatus, spend: u64, ctr: f64) -> Campaign {
        Campaign {
            id: name.to_lowercase(),
            name: name.to_string(),
            status,
            objective: None,
            daily_budget: 10_000,
            lifetime_budget: 0,
            spend,
            impressions: 100_000,
            clicks: 2_000,
            ctr,
            cpc: 1.0,
        }
    }

    #[test]
    fn empty_list_summarizes_to_zeroes() {
        let summary = summarize_campaigns(&[]);
        assert_eq!(summary.total_campaigns, 0);
        assert_eq!(summary.total_spend, 0);
        assert_eq!(summary.avg_ctr, 0.0);
    }

    #[test]
    fn summary_counts_active_and_averages_ctr() {
        let campaigns = vec![
            campaign("A", EntityStatus::Active, 2_450, 2.56),
            campaign("B", EntityStatus::Paused, 1_890, 1.35),
        ];
        let summary = summarize_campaigns(&campaigns);
        assert_eq!(summary.total_campaigns, 2);
        assert_eq!(summary.active_campaigns, 1);
        assert_eq!(summary.total_spend, 4_340);
        assert!((summary.avg_ctr - 1.955).abs() < 1e-9);
    }

    #[test]
    fn account_performance_only_counts_active_campaigns() {
        let campaigns = vec![
            campaign("A", EntityStatus::Active, 2_000, 2.0),
            campaign("B", EntityStatus::Paused, 9_999, 1.0),
        ];
        let perf = account_performance("act_1", &campaigns);
        assert_eq!(perf.total_campaigns, 2);
        assert_eq!(perf.active_campaigns, 1);
        assert_eq!(perf.total_spend, 2_000);
        assert!((perf.average_ctr - 2.0).abs() < 1e-9);
        assert!((perf.average_cpc - 1.0).abs() < 1e-9);
    }

    #[test]
    fn account_performance_with_no_active_campaigns_is_all_zero() {
        let campaigns = vec![campaign("B", EntityStatus::Paused, 9_999, 1.0)];
        let perf = account_performance("act_1", &campaigns);
        assert_eq!(perf.average_ctr, 0.0);
        assert_eq!(perf.average_cpc, 0.0);
    }
}
