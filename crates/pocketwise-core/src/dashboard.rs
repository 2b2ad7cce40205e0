//! Dashboard orchestration
//!
//! Fetches every tracker's summary and category breakdown concurrently, then
//! runs the insight engine once per tracker and once for the combined view.

use async_trait::async_trait;
use futures_util::future::try_join_all;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::insights::{merge_category_spending, Insight, InsightEngine};
use crate::models::{CategorySpendingRow, Tracker, TrackerAnalysisInput, TrackerId, TrackerSummary};

/// Where tracker data comes from
#[async_trait]
pub trait InsightSource: Send + Sync {
    /// Trackers owned by a user
    async fn trackers(&self, user_id: &str) -> Result<Vec<Tracker>>;

    /// Income/expense totals for one tracker
    async fn summary(&self, tracker_id: &TrackerId) -> Result<TrackerSummary>;

    /// Expense totals by category label, largest first
    async fn category_spending(&self, tracker_id: &TrackerId) -> Result<Vec<CategorySpendingRow>>;
}

/// Surfaced insights for one tracker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackerInsights {
    pub tracker_id: TrackerId,
    pub tracker_name: String,
    pub insights: Vec<Insight>,
}

/// Everything the dashboard view shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub trackers: Vec<TrackerAnalysisInput>,
    /// Spending merged across trackers, keyed by original label
    pub category_spending: Vec<CategorySpendingRow>,
    /// Cross-tracker insights
    pub insights: Vec<Insight>,
    pub tracker_insights: Vec<TrackerInsights>,
}

/// Fetch one tracker's summary and spending concurrently
pub async fn load_tracker(
    source: &dyn InsightSource,
    tracker: &Tracker,
) -> Result<TrackerAnalysisInput> {
    let (summary, category_spending) = tokio::try_join!(
        source.summary(&tracker.id),
        source.category_spending(&tracker.id)
    )?;

    Ok(TrackerAnalysisInput {
        id: tracker.id.clone(),
        name: tracker.name.clone(),
        summary,
        category_spending,
    })
}

/// Build the dashboard for a user
pub async fn load_dashboard(source: &dyn InsightSource, user_id: &str) -> Result<Dashboard> {
    let trackers = source.trackers(user_id).await?;
    let inputs = try_join_all(trackers.iter().map(|t| load_tracker(source, t))).await?;

    let tracker_engine = InsightEngine::for_tracker();
    let tracker_insights: Vec<TrackerInsights> = inputs
        .iter()
        .map(|input| TrackerInsights {
            tracker_id: input.id.clone(),
            tracker_name: input.name.clone(),
            insights: tracker_engine.analyze_tracker(input),
        })
        .collect();

    let category_spending = merge_category_spending(&inputs);
    let insights = InsightEngine::for_dashboard().analyze_all(&inputs, &category_spending);

    tracing::debug!(
        user_id,
        trackers = inputs.len(),
        insights = insights.len(),
        "Dashboard loaded"
    );

    Ok(Dashboard {
        trackers: inputs,
        category_spending,
        insights,
        tracker_insights,
    })
}
