//! Reply composition: fixed text blocks concatenated in a fixed order.

use adpilot_core::types::{Ad, AdAccount, AdSet, Campaign, ChartSpec, Insight, Recommendation};
use adpilot_insights::summarize_insights;
use serde::Serialize;
use utoipa::ToSchema;

use crate::dispatch;

/// What the dispatch fetched, tagged per resource kind so downstream
/// handling is exhaustive.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(tag = "kind", content = "items", rename_all = "snake_case")]
pub enum FetchedData {
    Accounts(Vec<AdAccount>),
    Campaigns(Vec<Campaign>),
    Insights(Vec<Insight>),
    AdSets(Vec<AdSet>),
    Ads(Vec<Ad>),
    Empty,
}

const HELP_MESSAGE: &str = "I'm here to help you with your ad campaigns! You can ask me about:\n\
     • Your ad accounts and campaigns\n\
     • Performance metrics and insights\n\
     • Optimization recommendations\n\
     • Data visualizations and charts";

const TIPS_BLOCK: &str = "💡 To improve performance, consider:\n\
     • Optimizing ad creative and copy\n\
     • Refining your target audience\n\
     • Testing different bidding strategies\n\
     • Monitoring and adjusting budgets based on performance";

/// Assemble the reply text. Block order: data listing, recommendations,
/// chart notice, tips, and the help message only when everything else was
/// empty.
pub fn compose_reply(
    query: &str,
    data: &FetchedData,
    chart: Option<&ChartSpec>,
    recommendations: &[Recommendation],
) -> String {
    let mut parts: Vec<String> = Vec::new();

    if let Some(block) = data_block(data) {
        parts.push(block);
    }

    if !recommendations.is_empty() {
        let mut block = String::from("💡 Recommendations:");
        for rec in recommendations {
            block.push_str("\n• ");
            block.push_str(&rec.message);
        }
        parts.push(block);
    }

    if chart.is_some() {
        parts.push("📊 I've generated a chart to visualize this data.".to_string());
    }

    if dispatch::wants_tips(query) {
        parts.push(TIPS_BLOCK.to_string());
    }

    if parts.is_empty() {
        parts.push(HELP_MESSAGE.to_string());
    }

    parts.join("\n\n")
}

fn data_block(data: &FetchedData) -> Option<String> {
    match data {
        FetchedData::Empty => None,
        FetchedData::Accounts(accounts) => {
            let mut block = format!("I found {} ad account(s):", accounts.len());
            for account in accounts {
                block.push_str(&format!(
                    "\n• {} ({}) - {}",
                    account.name, account.id, account.status
                ));
            }
            Some(block)
        }
        FetchedData::Campaigns(campaigns) => Some(campaigns_block(campaigns)),
        FetchedData::Insights(insights) => {
            let summary = summarize_insights(insights);
            Some(format!(
                "Performance insights: Total spend ${:.2}, Average CTR {:.2}%",
                summary.total_spend as f64 / 100.0,
                summary.avg_ctr
            ))
        }
        FetchedData::AdSets(adsets) => {
            let mut block = format!("I found {} ad set(s):", adsets.len());
            for adset in adsets {
                block.push_str(&format!("\n• {} - {}", adset.name, adset.status));
            }
            Some(block)
        }
        FetchedData::Ads(ads) => {
            let mut block = format!("I found {} ad(s):", ads.len());
            for ad in ads {
                block.push_str(&format!("\n• {} - {}", ad.name, ad.status));
            }
            Some(block)
        }
    }
}

fn campaigns_block(campaigns: &[Campaign]) -> String {
    let mut block = format!("I found {} campaign(s):", campaigns.len());
    for campaign in campaigns {
        block.push_str(&format!(
            "\n• {} - {} - CTR: {}% - Spend: ${:.2}",
            campaign.name,
            campaign.status,
            campaign.ctr,
            campaign.spend as f64 / 100.0
        ));
    }
    block
}
