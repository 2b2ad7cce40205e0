//! Category totals and the cross-tracker aggregate view

use std::collections::HashMap;

use crate::models::{CategorySpendingRow, TrackerAnalysisInput, TrackerSummary, UNCATEGORIZED};

/// Insertion-ordered map of lowercased category label to summed spending
///
/// Order matters: the first label matched for an archetype is the one reported
/// on insights and used for cross-tracker attribution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryTotals {
    entries: Vec<(String, f64)>,
    index: HashMap<String, usize>,
}

impl CategoryTotals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sum rows by lowercased label
    pub fn from_rows(rows: &[CategorySpendingRow]) -> Self {
        let mut totals = Self::new();
        for row in rows {
            totals.add(&row.category_name, row.total);
        }
        totals
    }

    /// Add spending to a label; non-finite amounts count as zero
    pub fn add(&mut self, label: &str, amount: f64) {
        let key = if label.is_empty() {
            UNCATEGORIZED.to_lowercase()
        } else {
            label.to_lowercase()
        };
        let amount = if amount.is_finite() { amount } else { 0.0 };

        match self.index.get(&key) {
            Some(&i) => self.entries[i].1 += amount,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, amount));
            }
        }
    }

    pub fn get(&self, label: &str) -> Option<f64> {
        self.index
            .get(&label.to_lowercase())
            .map(|&i| self.entries[i].1)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(label, _)| label.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(label, total)| (label.as_str(), *total))
    }

    /// Sum of the totals for the given labels (unknown labels add nothing)
    pub fn sum_of<'a>(&self, labels: impl IntoIterator<Item = &'a str>) -> f64 {
        labels.into_iter().filter_map(|l| self.get(l)).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Combined figures for all of a user's trackers
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateView {
    pub summary: TrackerSummary,
    pub totals: CategoryTotals,
}

/// Sum income, expenses and category spending across trackers
///
/// The combined balance is recomputed from the sums rather than summed from
/// each tracker's reported balance. `rows` is the merged spending list (see
/// [`merge_category_spending`]); duplicate labels are summed again here.
pub fn aggregate(trackers: &[TrackerAnalysisInput], rows: &[CategorySpendingRow]) -> AggregateView {
    let total_income: f64 = trackers
        .iter()
        .map(|t| finite_or_zero(t.summary.total_income))
        .sum();
    let total_expenses: f64 = trackers
        .iter()
        .map(|t| finite_or_zero(t.summary.total_expenses))
        .sum();

    AggregateView {
        summary: TrackerSummary::new(total_income, total_expenses),
        totals: CategoryTotals::from_rows(rows),
    }
}

/// Merge every tracker's spending rows into one list, keyed by original label
pub fn merge_category_spending(trackers: &[TrackerAnalysisInput]) -> Vec<CategorySpendingRow> {
    let mut merged: Vec<CategorySpendingRow> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for row in trackers.iter().flat_map(|t| &t.category_spending) {
        let name = if row.category_name.is_empty() {
            UNCATEGORIZED
        } else {
            row.category_name.as_str()
        };
        let total = finite_or_zero(row.total);
        match index.get(name) {
            Some(&i) => merged[i].total += total,
            None => {
                index.insert(name.to_string(), merged.len());
                merged.push(CategorySpendingRow::new(name, total));
            }
        }
    }

    merged
}

/// First tracker whose own spending contains `label` (case-insensitive)
///
/// A category can span several trackers; this attribution is illustrative only.
pub fn find_tracker_with_category<'a>(
    trackers: &'a [TrackerAnalysisInput],
    label: &str,
) -> Option<&'a TrackerAnalysisInput> {
    let label = label.to_lowercase();
    trackers.iter().find(|t| {
        t.category_spending
            .iter()
            .any(|row| row.category_name.to_lowercase() == label)
    })
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker(id: i64, income: f64, expenses: f64, rows: &[(&str, f64)]) -> TrackerAnalysisInput {
        TrackerAnalysisInput {
            id: id.into(),
            name: format!("Tracker {}", id),
            summary: TrackerSummary::new(income, expenses),
            category_spending: rows
                .iter()
                .map(|(n, t)| CategorySpendingRow::new(*n, *t))
                .collect(),
        }
    }

    #[test]
    fn test_totals_sum_duplicates_case_insensitively() {
        let totals = CategoryTotals::from_rows(&[
            CategorySpendingRow::new("Rent", 1000.0),
            CategorySpendingRow::new("Coffee", 10.0),
            CategorySpendingRow::new("rent", 500.0),
        ]);

        assert_eq!(totals.len(), 2);
        assert_eq!(totals.get("RENT"), Some(1500.0));
        assert_eq!(totals.labels().collect::<Vec<_>>(), vec!["rent", "coffee"]);
    }

    #[test]
    fn test_totals_ignore_non_finite_amounts() {
        let mut totals = CategoryTotals::new();
        totals.add("Coffee", 12.0);
        totals.add("Coffee", f64::NAN);
        totals.add("Coffee", f64::INFINITY);
        assert_eq!(totals.get("coffee"), Some(12.0));
        assert_eq!(totals.sum_of(["coffee", "missing"]), 12.0);
    }

    #[test]
    fn test_aggregate_sums_summaries() {
        let trackers = vec![
            tracker(1, 3000.0, 1000.0, &[("Rent", 900.0)]),
            tracker(2, 2000.0, 2500.0, &[("Rent", 600.0), ("Coffee", 40.0)]),
        ];
        let rows = merge_category_spending(&trackers);
        let view = aggregate(&trackers, &rows);

        assert_eq!(view.summary.total_income, 5000.0);
        assert_eq!(view.summary.total_expenses, 3500.0);
        assert_eq!(view.summary.balance, 1500.0);
        assert_eq!(view.totals.get("rent"), Some(1500.0));
    }

    #[test]
    fn test_merge_keeps_original_labels() {
        let trackers = vec![
            tracker(1, 0.0, 0.0, &[("🏠 Rent", 900.0)]),
            tracker(2, 0.0, 0.0, &[("🏠 Rent", 100.0), ("", 5.0)]),
        ];
        let merged = merge_category_spending(&trackers);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0], CategorySpendingRow::new("🏠 Rent", 1000.0));
        assert_eq!(merged[1].category_name, UNCATEGORIZED);
    }

    #[test]
    fn test_find_tracker_with_category() {
        let trackers = vec![
            tracker(1, 0.0, 0.0, &[("Coffee", 10.0)]),
            tracker(2, 0.0, 0.0, &[("Rent", 900.0)]),
            tracker(3, 0.0, 0.0, &[("RENT", 100.0)]),
        ];
        let found = find_tracker_with_category(&trackers, "rent").unwrap();
        assert_eq!(found.id, crate::models::TrackerId::Number(2));
        assert!(find_tracker_with_category(&trackers, "travel").is_none());
    }
}
