//! Ranking and selection of candidate insights
//!
//! Only a handful of insights are worth showing at once. Selection keeps a
//! balance: the most pressing warning, one piece of encouragement, then a
//! suggestion if there is still room.

use super::types::{Insight, InsightKind};

/// Most insights surfaced per tracker or dashboard
pub const MAX_SURFACED: usize = 2;

/// Sort descending by priority, then kind, then percentage
///
/// The sort is stable, so candidates that tie keep the order rules produced
/// them in.
pub fn rank(mut candidates: Vec<Insight>) -> Vec<Insight> {
    candidates.sort_by(|a, b| {
        b.priority
            .rank()
            .cmp(&a.priority.rank())
            .then_with(|| b.kind.rank().cmp(&a.kind.rank()))
            .then_with(|| percentage_key(b).total_cmp(&percentage_key(a)))
    });
    candidates
}

/// NaN sorts as zero so it cannot break the ordering
fn percentage_key(insight: &Insight) -> f64 {
    let p = insight.sort_percentage();
    if p.is_nan() {
        0.0
    } else {
        p
    }
}

/// Pick at most [`MAX_SURFACED`] insights from the candidates
pub fn select(candidates: Vec<Insight>) -> Vec<Insight> {
    let ranked = rank(candidates);

    let first_of = |pred: fn(&InsightKind) -> bool| ranked.iter().find(|i| pred(&i.kind));
    let warning = first_of(|k| *k == InsightKind::Warning);
    let positive = first_of(InsightKind::is_positive);
    let suggestion = first_of(|k| *k == InsightKind::Suggestion);

    // Nothing to caution about: show the best news rather than a single item
    if warning.is_none() && suggestion.is_none() {
        return ranked
            .iter()
            .filter(|i| i.kind.is_positive())
            .take(MAX_SURFACED)
            .cloned()
            .collect();
    }

    let mut result: Vec<Insight> = [warning, positive, suggestion]
        .into_iter()
        .flatten()
        .cloned()
        .collect();
    result.truncate(MAX_SURFACED);
    result
}
