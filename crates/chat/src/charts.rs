//! Chart projections over campaign and insight lists.
//!
//! Output is the chat UI's chart-library shape; each builder emits exactly
//! one label and one data point per input record, per series.

use adpilot_core::types::{
    Campaign, ChartData, ChartDataset, ChartSpec, ChartType, Insight,
};

const BLUE: &str = "rgb(59, 130, 246)";
const BLUE_FILL: &str = "rgba(59, 130, 246, 0.1)";
const BLUE_BAR: &str = "rgba(59, 130, 246, 0.8)";
const GREEN: &str = "rgb(34, 197, 94)";
const GREEN_BAR: &str = "rgba(34, 197, 94, 0.8)";

/// Bar chart: one CTR%/spend pair per campaign, spend in major units.
pub fn campaign_performance_chart(campaigns: &[Campaign]) -> ChartSpec {
    let labels = campaigns.iter().map(|c| c.name.clone()).collect();
    let ctr_series = campaigns.iter().map(|c| c.ctr).collect();
    let spend_series = campaigns.iter().map(|c| c.spend as f64 / 100.0).collect();

    ChartSpec::titled(
        ChartType::Bar,
        "Campaign Performance Overview",
        ChartData {
            labels,
            datasets: vec![
                ChartDataset {
                    label: "CTR (%)".to_string(),
                    data: ctr_series,
                    border_color: Some(GREEN.to_string()),
                    background_color: Some(GREEN_BAR.to_string()),
                    border_width: Some(1),
                    tension: None,
                },
                ChartDataset {
                    label: "Spend ($)".to_string(),
                    data: spend_series,
                    border_color: Some(BLUE.to_string()),
                    background_color: Some(BLUE_BAR.to_string()),
                    border_width: Some(1),
                    tension: None,
                },
            ],
        },
    )
}

/// Line chart: daily spend in major units over a dated insight window.
pub fn spend_trend_chart(insights: &[Insight]) -> ChartSpec {
    let labels = insights.iter().map(|i| i.date.to_string()).collect();
    let spend_series = insights.iter().map(|i| i.spend as f64 / 100.0).collect();

    ChartSpec::titled(
        ChartType::Line,
        "Daily Ad Spend Trend",
        ChartData {
            labels,
            datasets: vec![ChartDataset {
                label: "Daily Spend ($)".to_string(),
                data: spend_series,
                border_color: Some(BLUE.to_string()),
                background_color: Some(BLUE_FILL.to_string()),
                border_width: None,
                tension: Some(0.1),
            }],
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use adpilot_core::types::EntityStatus;
    use chrono::{Duration, Utc};

    fn campaigns(n: usize) -> Vec<Campaign> {
        (0..n)
            .map(|i| Campaign {
                id: format!("c{i}"),
                name: format!("Campaign {i}"),
                status: EntityStatus::Active,
                objective: None,
                daily_budget: 1_000,
                lifetime_budget: 0,
                spend: (i as u64 + 1) * 150,
                impressions: 10_000,
                clicks: 200,
                ctr: 2.0,
                cpc: 0.75,
            })
            .collect()
    }

    #[test]
    fn performance_chart_pairs_every_campaign() {
        let input = campaigns(4);
        let spec = campaign_performance_chart(&input);
        assert_eq!(spec.chart_type, ChartType::Bar);
        assert_eq!(spec.data.labels.len(), 4);
        assert_eq!(spec.data.datasets.len(), 2);
        for dataset in &spec.data.datasets {
            assert_eq!(dataset.data.len(), 4);
        }
        // Spend converts to major units.
        assert!((spec.data.datasets[1].data[0] - 1.5).abs() < 1e-9);
    }

    #[test]
    fn performance_chart_over_empty_list_is_empty_but_valid() {
        let spec = campaign_performance_chart(&[]);
        assert!(spec.data.labels.is_empty());
        assert!(spec.data.datasets.iter().all(|d| d.data.is_empty()));
    }

    #[test]
    fn spend_trend_uses_one_point_per_day() {
        let today = Utc::now().date_naive();
        let insights: Vec<Insight> = (0..3)
            .map(|i| Insight {
                date: today - Duration::days(2 - i),
                spend: 100 + (i as u64) * 20,
                impressions: 5_000,
                clicks: 150,
                ctr: 3.0,
                cpc: 0.67,
                cpm: 20.0,
                reach: 2_500,
                frequency: 2.0,
            })
            .collect();

        let spec = spend_trend_chart(&insights);
        assert_eq!(spec.chart_type, ChartType::Line);
        assert_eq!(spec.data.labels.len(), 3);
        assert_eq!(spec.data.datasets.len(), 1);
        assert_eq!(spec.data.datasets[0].data, vec![1.0, 1.2, 1.4]);
        assert_eq!(spec.options.plugins.title.text, "Daily Ad Spend Trend");
    }
}
