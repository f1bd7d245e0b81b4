//! Keyword dispatch for free-text queries.
//!
//! Groups are checked in a fixed priority order; the first hit wins and the
//! remaining groups are not evaluated. Matching is case-insensitive on word
//! boundaries, so "show" never triggers on "how" and "ads" never triggers on
//! "roads".

use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryIntent {
    Accounts,
    Campaigns,
    Insights,
    AdSets,
    Ads,
}

const ACCOUNT_KEYWORDS: &[&str] = &["account", "accounts"];
const CAMPAIGN_KEYWORDS: &[&str] = &["campaign", "campaigns"];
const INSIGHT_KEYWORDS: &[&str] = &["insight", "insights", "performance", "spend", "trend"];
const ADSET_KEYWORDS: &[&str] = &["adset", "adsets", "targeting"];
const ADSET_PHRASES: &[&str] = &["ad set", "ad sets"];
const AD_KEYWORDS: &[&str] = &["ad", "ads", "creative", "creatives"];
const CHART_KEYWORDS: &[&str] = &["chart", "graph", "visualize", "show"];

fn word_set(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

fn matches_any(words: &HashSet<String>, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| words.contains(*k))
}

/// Decide which upstream resource a query is about, if any.
/// Priority: accounts > campaigns > insights/performance > ad sets > ads.
pub fn detect_intent(text: &str) -> Option<QueryIntent> {
    let lower = text.to_lowercase();
    let words = word_set(&lower);

    if matches_any(&words, ACCOUNT_KEYWORDS) {
        Some(QueryIntent::Accounts)
    } else if matches_any(&words, CAMPAIGN_KEYWORDS) {
        Some(QueryIntent::Campaigns)
    } else if matches_any(&words, INSIGHT_KEYWORDS) {
        Some(QueryIntent::Insights)
    } else if matches_any(&words, ADSET_KEYWORDS) || ADSET_PHRASES.iter().any(|p| lower.contains(p))
    {
        Some(QueryIntent::AdSets)
    } else if matches_any(&words, AD_KEYWORDS) {
        Some(QueryIntent::Ads)
    } else {
        None
    }
}

/// Whether the query asks for a visualization alongside the data.
pub fn wants_chart(text: &str) -> bool {
    matches_any(&word_set(text), CHART_KEYWORDS)
}

/// Whether the query earns the generic performance-improvement tips block.
pub fn wants_tips(text: &str) -> bool {
    matches_any(&word_set(text), &["performance", "how"])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_order_is_accounts_campaigns_insights_adsets_ads() {
        // Each input contains keywords from two adjacent groups; the
        // higher-priority group must win.
        assert_eq!(
            detect_intent("list my accounts and campaigns"),
            Some(QueryIntent::Accounts)
        );
        assert_eq!(
            detect_intent("campaign insights please"),
            Some(QueryIntent::Campaigns)
        );
        assert_eq!(
            detect_intent("performance of my targeting"),
            Some(QueryIntent::Insights)
        );
        assert_eq!(
            detect_intent("targeting for my ads"),
            Some(QueryIntent::AdSets)
        );
        assert_eq!(detect_intent("list my ads"), Some(QueryIntent::Ads));
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(detect_intent("Show me my CAMPAIGNS"), Some(QueryIntent::Campaigns));
    }

    #[test]
    fn ad_set_phrase_matches_across_the_space() {
        assert_eq!(detect_intent("show my ad sets"), Some(QueryIntent::AdSets));
    }

    #[test]
    fn ad_keyword_requires_a_word_boundary() {
        // "roads" and "adverse" must not read as the ads group.
        assert_eq!(detect_intent("roads are adverse today"), None);
    }

    #[test]
    fn unrelated_text_has_no_intent() {
        assert_eq!(detect_intent("hello there"), None);
    }

    #[test]
    fn chart_keywords_include_show() {
        assert!(wants_chart("Show me my campaigns"));
        assert!(wants_chart("visualize spend"));
        assert!(!wants_chart("list my campaigns"));
    }

    #[test]
    fn tips_trigger_on_how_but_not_on_show() {
        assert!(wants_tips("how do I improve?"));
        assert!(wants_tips("performance overview"));
        assert!(!wants_tips("Show me my campaigns"));
    }
}
