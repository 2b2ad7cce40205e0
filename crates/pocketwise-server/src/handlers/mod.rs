//! HTTP request handlers

pub mod insights;
pub mod trackers;

pub use insights::*;
pub use trackers::*;

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use pocketwise_core::TrackerId;

use crate::{AppError, AppState};

/// Query selecting a user's trackers
#[derive(Debug, Deserialize)]
pub struct UserQuery {
    pub user_id: Option<String>,
}

impl UserQuery {
    pub fn require(self) -> Result<String, AppError> {
        match self.user_id {
            Some(id) if !id.trim().is_empty() => Ok(id),
            _ => Err(AppError::bad_request("user_id is required")),
        }
    }
}

/// Path ids are numeric when they parse as integers, text otherwise
pub fn parse_tracker_id(raw: &str) -> TrackerId {
    match raw.parse() {
        Ok(id) => id,
        Err(never) => match never {},
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub trackers: usize,
    pub transactions: usize,
}

/// GET /api/health
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        trackers: state.ledger.trackers.len(),
        transactions: state.ledger.transactions.len(),
    })
}

/// Handlers return this on failure
pub type HandlerResult<T> = Result<Json<T>, AppError>;
