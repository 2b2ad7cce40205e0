//! Pocketwise Core Library
//!
//! Shared functionality for the Pocketwise personal finance tracker:
//! - Keyword classification of free-text spending categories
//! - Budget analysis against recommended income bands
//! - Insight synthesis, ranking and selection
//! - Ledger aggregation (tracker summaries, category breakdowns)
//! - Concurrent dashboard loading over a pluggable data source

pub mod config;
pub mod dashboard;
pub mod error;
pub mod insights;
pub mod ledger;
pub mod models;

pub use config::Config;
pub use dashboard::{load_dashboard, load_tracker, Dashboard, InsightSource, TrackerInsights};
pub use error::{Error, Result};
pub use insights::{
    classify, select, synthesize_for_all_trackers, synthesize_for_tracker, CategoryArchetype,
    Insight, InsightEngine, InsightKind, Priority,
};
pub use ledger::Ledger;
pub use models::{
    CategorySpendingRow, Tracker, TrackerAnalysisInput, TrackerId, TrackerSummary, Transaction,
    TransactionType,
};
