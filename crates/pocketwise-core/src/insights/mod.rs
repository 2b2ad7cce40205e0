//! Insight Engine - budget narratives from tracker totals
//!
//! Category labels are free text. The classifier maps them onto a fixed set of
//! spending archetypes, the analyzer compares each archetype's share of income
//! with a recommended band, and a set of independent rules turns the figures
//! into human-readable insights. The ranker then keeps the one or two worth
//! showing.
//!
//! ## Rules
//!
//! - **Budget Status** - over/within/under band feedback from the analyzer
//! - **Recommendation** - per-archetype pass over the raw totals
//! - **Savings** - savings rate praise or a nudge to start
//! - **Balance**, **Expense Ratio**, **Overspend** - whole-budget narratives
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pocketwise_core::insights::InsightEngine;
//!
//! let engine = InsightEngine::for_tracker();
//! let surfaced = engine.analyze_tracker(&input);
//! ```

pub mod aggregate;
pub mod analyzer;
pub mod archetypes;
pub mod budget;
pub mod cashflow;
pub mod classifier;
pub mod engine;
mod format;
pub mod ranker;
pub mod savings;
pub mod types;

pub use aggregate::{
    aggregate, find_tracker_with_category, merge_category_spending, AggregateView, CategoryTotals,
};
pub use analyzer::{analyze, analyze_rows, CategoryAnalysis, CategoryStatus};
pub use archetypes::{Band, CategoryArchetype};
pub use budget::{BudgetStatusRule, RecommendationRule};
pub use cashflow::{BalanceRule, ExpenseRatioRule, OverspendRule};
pub use classifier::{classify, find_labels_for_archetype, matches_archetype, normalize};
pub use engine::{
    synthesize_for_all_trackers, synthesize_for_tracker, AnalysisContext, InsightEngine,
    InsightRule, Scope,
};
pub use ranker::{rank, select, MAX_SURFACED};
pub use savings::SavingsRule;
pub use types::{Insight, InsightKind, Priority};
