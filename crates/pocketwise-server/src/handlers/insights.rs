//! Insight handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use tracing::debug;

use pocketwise_core::{load_dashboard, Dashboard, Insight, TrackerAnalysisInput};

use super::{parse_tracker_id, HandlerResult, UserQuery};
use crate::{AppError, AppState};

#[derive(Debug, Default, Deserialize)]
pub struct InsightsQuery {
    /// Return every ranked candidate instead of the surfaced selection
    #[serde(default)]
    pub all: bool,
}

fn run_engine(state: &AppState, input: &TrackerAnalysisInput, all: bool) -> Vec<Insight> {
    if all {
        state.engine.candidates_for_tracker(input)
    } else {
        state.engine.analyze_tracker(input)
    }
}

/// GET /api/trackers/:id/insights?all=
pub async fn get_tracker_insights(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(query): Query<InsightsQuery>,
) -> HandlerResult<Vec<Insight>> {
    let input = state
        .ledger
        .analysis_input(&parse_tracker_id(&id))
        .map_err(AppError::from_core)?;

    let insights = run_engine(&state, &input, query.all);
    debug!(tracker = %input.id, count = insights.len(), "Tracker insights");
    Ok(Json(insights))
}

/// POST /api/insights/analyze?all=
///
/// Analyzes a caller-supplied tracker without touching the ledger.
pub async fn analyze_tracker(
    State(state): State<Arc<AppState>>,
    Query(query): Query<InsightsQuery>,
    Json(input): Json<TrackerAnalysisInput>,
) -> HandlerResult<Vec<Insight>> {
    Ok(Json(run_engine(&state, &input, query.all)))
}

/// GET /api/insights?user_id=
///
/// Cross-tracker insights only.
pub async fn get_dashboard_insights(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UserQuery>,
) -> HandlerResult<Vec<Insight>> {
    let user_id = query.require()?;
    let dashboard = load_dashboard(&state.ledger, &user_id)
        .await
        .map_err(AppError::from_core)?;
    Ok(Json(dashboard.insights))
}

/// GET /api/dashboard?user_id=
pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UserQuery>,
) -> HandlerResult<Dashboard> {
    let user_id = query.require()?;
    let dashboard = load_dashboard(&state.ledger, &user_id)
        .await
        .map_err(AppError::from_core)?;
    Ok(Json(dashboard))
}
