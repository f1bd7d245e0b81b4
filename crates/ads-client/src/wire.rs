//! Serde mirror of the upstream wire format.
//!
//! Every list endpoint wraps its payload in a `data` array; failures arrive
//! as 2xx bodies carrying an `error` object, so both paths are checked.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// Fixed field-selection lists, one per resource type.
pub const ACCOUNT_FIELDS: &str =
    "id,name,account_status,currency,timezone_name,business_name,account_type";
pub const CAMPAIGN_FIELDS: &str =
    "id,name,status,objective,daily_budget,lifetime_budget,spend,impressions,clicks,ctr,cpc,created_time,updated_time";
pub const INSIGHT_FIELDS: &str =
    "date_start,date_stop,spend,impressions,clicks,ctr,cpc,cpm,reach,frequency";
pub const ADSET_FIELDS: &str =
    "id,name,status,campaign_id,daily_budget,lifetime_budget,targeting,created_time,updated_time";
pub const AD_FIELDS: &str = "id,name,status,adset_id,creative,created_time,updated_time";
pub const USER_FIELDS: &str = "id,name,email";

/// The platform-side identity behind an access token.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PlatformUser {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireError {
    pub message: String,
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

/// Standard list envelope: `{"data": [...]}` on success, `{"error": {...}}`
/// on failure.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: serde::de::DeserializeOwned"))]
pub struct ListEnvelope<T> {
    #[serde(default)]
    pub data: Vec<T>,
    #[serde(default)]
    pub error: Option<WireError>,
}

impl<T> ListEnvelope<T> {
    /// Unwrap the data array, surfacing a payload-embedded error marker.
    pub fn into_data(self) -> Result<Vec<T>, String> {
        match self.error {
            Some(err) => Err(err.message),
            None => Ok(self.data),
        }
    }
}

/// Serialize an inclusive date range into the upstream `time_range`
/// parameter value.
pub fn time_range_param(range: &adpilot_core::types::DateRange) -> String {
    // NaiveDate renders as ISO `YYYY-MM-DD`, which is what the API expects.
    format!(
        "{{\"since\":\"{}\",\"until\":\"{}\"}}",
        range.start, range.end
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use adpilot_core::types::{Campaign, DateRange, Insight};
    use chrono::NaiveDate;

    #[test]
    fn list_envelope_unwraps_data() {
        let body = r#"{"data":[{"id":"1","name":"A","status":"ACTIVE"}]}"#;
        let envelope: ListEnvelope<Campaign> = serde_json::from_str(body).expect("parse");
        let campaigns = envelope.into_data().expect("data");
        assert_eq!(campaigns.len(), 1);
        assert_eq!(campaigns[0].id, "1");
    }

    #[test]
    fn list_envelope_surfaces_embedded_error() {
        let body = r#"{"error":{"message":"Invalid OAuth access token","code":190}}"#;
        let envelope: ListEnvelope<Campaign> = serde_json::from_str(body).expect("parse");
        let err = envelope.into_data().unwrap_err();
        assert!(err.contains("OAuth"));
    }

    #[test]
    fn insight_accepts_upstream_date_start_alias() {
        let body = r#"{"date_start":"2024-01-02","spend":120,"impressions":6000,"clicks":180,"ctr":3.0,"cpc":0.67,"cpm":20.0}"#;
        let insight: Insight = serde_json::from_str(body).expect("parse");
        assert_eq!(
            insight.date,
            NaiveDate::from_ymd_opt(2024, 1, 2).expect("date")
        );
        assert_eq!(insight.reach, 0);
    }

    #[test]
    fn time_range_param_renders_both_bounds() {
        let range = DateRange {
            start: NaiveDate::from_ymd_opt(2024, 1, 1).expect("date"),
            end: NaiveDate::from_ymd_opt(2024, 1, 31).expect("date"),
        };
        assert_eq!(
            time_range_param(&range),
            r#"{"since":"2024-01-01","until":"2024-01-31"}"#
        );
    }
}
