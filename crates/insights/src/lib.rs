//! Aggregation of raw ads-platform records into derived metrics,
//! recommendations, and optimization strategies.

#![warn(clippy::unwrap_used)]

pub mod recommend;
pub mod strategy;
pub mod summary;

pub use recommend::recommend;
pub use strategy::{build_strategy, StrategyEngine};
pub use summary::{
    account_performance, summarize_campaigns, summarize_insights, AccountPerformance,
    CampaignSummary, InsightSummary,
};
