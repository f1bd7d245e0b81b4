//! Threshold-based campaign advisories.

use adpilot_core::types::{Campaign, Recommendation, RecommendationKind};

/// CTR below this (percent) earns a creative/targeting advisory.
const LOW_CTR_THRESHOLD: f64 = 1.5;

/// Spend above this (minor units) on an active campaign earns a budget
/// review advisory.
const SPEND_REVIEW_THRESHOLD: u64 = 2_000;

/// Generate advisories per campaign, input order preserved. Both checks are
/// independent; one campaign can earn two advisories.
pub fn recommend(campaigns: &[Campaign]) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    for campaign in campaigns {
        if campaign.ctr < LOW_CTR_THRESHOLD {
            recommendations.push(Recommendation {
                campaign_id: campaign.id.clone(),
                campaign_name: campaign.name.clone(),
                kind: RecommendationKind::LowCtr,
                message: format!(
                    "Campaign '{}' has a low CTR of {}%. Consider improving ad creative or targeting.",
                    campaign.name, campaign.ctr
                ),
            });
        }

        if campaign.spend > SPEND_REVIEW_THRESHOLD && campaign.status.is_active() {
            recommendations.push(Recommendation {
                campaign_id: campaign.id.clone(),
                campaign_name: campaign.name.clone(),
                kind: RecommendationKind::SpendReview,
                message: format!(
                    "Campaign '{}' has spent ${:.2}. Consider reviewing performance and adjusting budget if needed.",
                    campaign.name,
                    campaign.spend as f64 / 100.0
                ),
            });
        }
    }

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use adpilot_core::types::EntityStatus;

    fn campaign(name: &str, status: EntityStatus, spend: u64, ctr: f64) -> Campaign {
        Campaign {
            id: format!("id-{}", name.to_lowercase()),
            name: name.to_string(),
            status,
            objective: None,
            daily_budget: 5_000,
            lifetime_budget: 0,
            spend,
            impressions: 50_000,
            clicks: 1_000,
            ctr,
            cpc: 1.0,
        }
    }

    #[test]
    fn low_ctr_campaign_gets_exactly_one_low_ctr_advisory() {
        let campaigns = vec![campaign("Weak", EntityStatus::Paused, 100, 1.35)];
        let recs = recommend(&campaigns);
        let low_ctr: Vec<_> = recs
            .iter()
            .filter(|r| r.kind == RecommendationKind::LowCtr && r.campaign_name == "Weak")
            .collect();
        assert_eq!(low_ctr.len(), 1);
        assert!(low_ctr[0].message.contains("1.35%"));
    }

    #[test]
    fn high_spend_only_flags_active_campaigns() {
        let campaigns = vec![
            campaign("ActiveSpender", EntityStatus::Active, 2_450, 2.5),
            campaign("PausedSpender", EntityStatus::Paused, 9_000, 2.5),
        ];
        let recs = recommend(&campaigns);
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].kind, RecommendationKind::SpendReview);
        assert_eq!(recs[0].campaign_name, "ActiveSpender");
        assert!(recs[0].message.contains("$24.50"));
    }

    #[test]
    fn both_checks_can_fire_for_one_campaign() {
        let campaigns = vec![campaign("Struggling", EntityStatus::Active, 3_000, 0.9)];
        let recs = recommend(&campaigns);
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].kind, RecommendationKind::LowCtr);
        assert_eq!(recs[1].kind, RecommendationKind::SpendReview);
    }

    #[test]
    fn order_follows_the_input_list() {
        let campaigns = vec![
            campaign("First", EntityStatus::Paused, 0, 0.5),
            campaign("Second", EntityStatus::Paused, 0, 0.5),
        ];
        let recs = recommend(&campaigns);
        assert_eq!(recs[0].campaign_name, "First");
        assert_eq!(recs[1].campaign_name, "Second");
    }

    #[test]
    fn healthy_campaign_generates_nothing() {
        let campaigns = vec![campaign("Healthy", EntityStatus::Active, 1_500, 2.6)];
        assert!(recommend(&campaigns).is_empty());
    }

    #[test]
    fn boundary_values_do_not_fire() {
        // Exactly at the thresholds: ctr == 1.5 and spend == 2000.
        let campaigns = vec![campaign("Edge", EntityStatus::Active, 2_000, 1.5)];
        assert!(recommend(&campaigns).is_empty());
    }
}
