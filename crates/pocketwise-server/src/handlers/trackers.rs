//! Tracker handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use pocketwise_core::{CategorySpendingRow, Tracker, TrackerSummary, Transaction};

use super::{parse_tracker_id, HandlerResult, UserQuery};
use crate::{AppError, AppState};

/// GET /api/trackers?user_id=
pub async fn list_trackers(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UserQuery>,
) -> HandlerResult<Vec<Tracker>> {
    let user_id = query.require()?;
    let trackers = state
        .ledger
        .trackers_for(&user_id)
        .into_iter()
        .cloned()
        .collect();
    Ok(Json(trackers))
}

/// GET /api/trackers/:id/summary
pub async fn get_tracker_summary(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> HandlerResult<TrackerSummary> {
    let summary = state
        .ledger
        .summary(&parse_tracker_id(&id))
        .map_err(AppError::from_core)?;
    Ok(Json(summary))
}

/// GET /api/trackers/:id/categories
pub async fn get_tracker_categories(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> HandlerResult<Vec<CategorySpendingRow>> {
    let rows = state
        .ledger
        .category_spending_for(&parse_tracker_id(&id))
        .map_err(AppError::from_core)?;
    Ok(Json(rows))
}

#[derive(Debug, Deserialize)]
pub struct TransactionsQuery {
    pub limit: Option<usize>,
}

/// GET /api/trackers/:id/transactions?limit=
///
/// Newest first.
pub async fn list_tracker_transactions(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(query): Query<TransactionsQuery>,
) -> HandlerResult<Vec<Transaction>> {
    let id = parse_tracker_id(&id);
    if state.ledger.tracker(&id).is_none() {
        return Err(AppError::from_core(pocketwise_core::Error::NotFound(format!(
            "tracker {}",
            id
        ))));
    }

    let limit = query.limit.unwrap_or(usize::MAX);
    let txs = state
        .ledger
        .transactions_for(&id)
        .into_iter()
        .take(limit)
        .cloned()
        .collect();
    Ok(Json(txs))
}
