//! Canned fixture catalog serving the sandbox backend.
//!
//! The default catalog mirrors a small but realistic account: two ad
//! accounts, three campaigns at different performance levels, a five-day
//! insight window, one ad set, and one ad.

use adpilot_core::types::{
    Ad, AdAccount, AdCreative, AdSet, Campaign, DateRange, EntityStatus, Insight,
};
use chrono::{Duration, Utc};

/// In-memory stand-in for the ads platform. Credentials are accepted but
/// ignored; write operations always succeed.
#[derive(Debug, Clone)]
pub struct SampleCatalog {
    pub accounts: Vec<AdAccount>,
    pub campaigns: Vec<Campaign>,
    pub adsets: Vec<AdSet>,
    pub ads: Vec<Ad>,
    pub insights: Vec<Insight>,
}

impl SampleCatalog {
    /// A catalog with only the given campaigns; accounts and insights keep
    /// their defaults. Used by tests that need precise campaign metrics.
    pub fn with_campaigns(campaigns: Vec<Campaign>) -> Self {
        Self {
            campaigns,
            ..Self::default()
        }
    }

    pub fn accounts(&self) -> Vec<AdAccount> {
        self.accounts.clone()
    }

    pub fn campaigns(&self, _account_id: &str) -> Vec<Campaign> {
        self.campaigns.clone()
    }

    pub fn adsets(&self, campaign_id: &str) -> Vec<AdSet> {
        self.adsets
            .iter()
            .filter(|adset| adset.campaign_id == campaign_id || campaign_id.is_empty())
            .cloned()
            .collect()
    }

    pub fn ads(&self, adset_id: &str) -> Vec<Ad> {
        self.ads
            .iter()
            .filter(|ad| ad.adset_id == adset_id || adset_id.is_empty())
            .cloned()
            .collect()
    }

    pub fn insights(&self, _object_id: &str, range: Option<&DateRange>) -> Vec<Insight> {
        match range {
            None => self.insights.clone(),
            Some(range) => self
                .insights
                .iter()
                .filter(|insight| insight.date >= range.start && insight.date <= range.end)
                .cloned()
                .collect(),
        }
    }
}

impl Default for SampleCatalog {
    fn default() -> Self {
        // A trailing five-day window ending today, so date-bounded queries
        // (e.g. the strategy engine's 7-day lookback) see data.
        let today = Utc::now().date_naive();
        let insight = |days_ago: i64, spend: u64, impressions: u64, clicks: u64| Insight {
            date: today - Duration::days(days_ago),
            spend,
            impressions,
            clicks,
            ctr: 3.0,
            cpc: 0.67,
            cpm: 20.0,
            reach: impressions / 2,
            frequency: 2.0,
        };

        Self {
            accounts: vec![
                AdAccount {
                    id: "act_123456789".to_string(),
                    name: "Main Ad Account".to_string(),
                    status: EntityStatus::Active,
                    currency: "USD".to_string(),
                    timezone_name: "America/New_York".to_string(),
                },
                AdAccount {
                    id: "act_987654321".to_string(),
                    name: "Secondary Account".to_string(),
                    status: EntityStatus::Active,
                    currency: "USD".to_string(),
                    timezone_name: "America/Los_Angeles".to_string(),
                },
            ],
            campaigns: vec![
                Campaign {
                    id: "123456789".to_string(),
                    name: "Summer Sale Campaign".to_string(),
                    status: EntityStatus::Active,
                    objective: Some("CONVERSIONS".to_string()),
                    daily_budget: 10_000,
                    lifetime_budget: 0,
                    spend: 2_450,
                    impressions: 125_000,
                    clicks: 3_200,
                    ctr: 2.56,
                    cpc: 0.77,
                },
                Campaign {
                    id: "987654321".to_string(),
                    name: "Brand Awareness".to_string(),
                    status: EntityStatus::Paused,
                    objective: Some("BRAND_AWARENESS".to_string()),
                    daily_budget: 5_000,
                    lifetime_budget: 0,
                    spend: 1_890,
                    impressions: 89_000,
                    clicks: 1_200,
                    ctr: 1.35,
                    cpc: 1.58,
                },
                Campaign {
                    id: "456789123".to_string(),
                    name: "Lead Generation".to_string(),
                    status: EntityStatus::Active,
                    objective: Some("LEAD_GENERATION".to_string()),
                    daily_budget: 7_500,
                    lifetime_budget: 0,
                    spend: 3_200,
                    impressions: 156_000,
                    clicks: 4_100,
                    ctr: 2.63,
                    cpc: 0.78,
                },
            ],
            adsets: vec![AdSet {
                id: "23851234567890".to_string(),
                name: "Prospecting 25-45 US".to_string(),
                status: EntityStatus::Active,
                campaign_id: "123456789".to_string(),
                daily_budget: 5_000,
                lifetime_budget: 0,
                targeting: serde_json::json!({
                    "age_min": 25,
                    "age_max": 45,
                    "genders": [1, 2],
                    "geo_locations": { "countries": ["US"] }
                }),
            }],
            ads: vec![Ad {
                id: "23851234567891".to_string(),
                name: "Summer Sale Hero".to_string(),
                status: EntityStatus::Active,
                adset_id: "23851234567890".to_string(),
                creative: Some(AdCreative {
                    id: "23851234567892".to_string(),
                    title: Some("Summer Sale - 50% Off!".to_string()),
                    body: Some("Don't miss out on our biggest sale of the year".to_string()),
                    image_url: Some("https://example.com/image.jpg".to_string()),
                }),
            }],
            insights: vec![
                insight(4, 100, 5_000, 150),
                insight(3, 120, 6_000, 180),
                insight(2, 110, 5_500, 165),
                insight(1, 130, 6_500, 195),
                insight(0, 140, 7_000, 210),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_has_the_full_fixture_set() {
        let catalog = SampleCatalog::default();
        assert_eq!(catalog.accounts().len(), 2);
        assert_eq!(catalog.campaigns("act_123456789").len(), 3);
        assert_eq!(catalog.insights("123456789", None).len(), 5);
        assert_eq!(catalog.adsets("123456789").len(), 1);
        assert_eq!(catalog.ads("23851234567890").len(), 1);
    }

    #[test]
    fn insights_respect_an_explicit_range() {
        let catalog = SampleCatalog::default();
        let today = Utc::now().date_naive();
        let range = DateRange {
            start: today - Duration::days(3),
            end: today - Duration::days(1),
        };
        let window = catalog.insights("123456789", Some(&range));
        assert_eq!(window.len(), 3);
        assert!(window.iter().all(|i| i.date >= range.start && i.date <= range.end));
    }
}
