//! Category budget analyzer
//!
//! Compares spending per archetype against the recommendation table. Output is
//! unrounded; formatting belongs to the rules that build messages.

use serde::{Deserialize, Serialize};

use super::aggregate::CategoryTotals;
use super::archetypes::{Band, CategoryArchetype};
use super::classifier::find_labels_for_archetype;
use crate::models::CategorySpendingRow;

/// Where spending sits relative to the recommended band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryStatus {
    High,
    Normal,
    Low,
}

impl CategoryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryStatus::High => "high",
            CategoryStatus::Normal => "normal",
            CategoryStatus::Low => "low",
        }
    }

    /// Strict comparisons: sitting exactly on a band edge is `Normal`
    pub fn for_percentage(percentage: f64, band: Band) -> Self {
        if percentage > band.max {
            CategoryStatus::High
        } else if percentage < band.min {
            CategoryStatus::Low
        } else {
            CategoryStatus::Normal
        }
    }
}

/// Spending for one archetype, relative to income
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryAnalysis {
    pub archetype: CategoryArchetype,
    /// First matching label, or the archetype's display name
    pub matched_label: String,
    pub total: f64,
    pub percentage: f64,
    pub status: CategoryStatus,
    pub band: Band,
}

impl CategoryAnalysis {
    /// Percentage points above the band maximum (zero when not above)
    pub fn excess_percentage(&self) -> f64 {
        (self.percentage - self.band.max).max(0.0)
    }
}

/// Total matched spending for one archetype and the labels that matched
#[derive(Debug, Clone, PartialEq)]
pub struct ArchetypeSpend<'a> {
    pub archetype: CategoryArchetype,
    pub labels: Vec<&'a str>,
    pub total: f64,
}

impl ArchetypeSpend<'_> {
    pub fn first_label_or(&self, fallback: &str) -> String {
        self.labels
            .first()
            .map(|l| l.to_string())
            .unwrap_or_else(|| fallback.to_string())
    }
}

/// Sum every label that matches `archetype`
pub fn archetype_spend(totals: &CategoryTotals, archetype: CategoryArchetype) -> ArchetypeSpend<'_> {
    let labels = find_labels_for_archetype(totals, archetype);
    let total = totals.sum_of(labels.iter().copied());
    ArchetypeSpend {
        archetype,
        labels,
        total,
    }
}

/// Analyze spending against the recommendation table
///
/// Returns nothing when income is not a positive number. Archetypes with no
/// matched spending are omitted.
pub fn analyze(total_income: f64, totals: &CategoryTotals) -> Vec<CategoryAnalysis> {
    if !(total_income.is_finite() && total_income > 0.0) {
        return Vec::new();
    }

    CategoryArchetype::all()
        .iter()
        .filter_map(|&archetype| {
            let spend = archetype_spend(totals, archetype);
            if spend.total <= 0.0 {
                return None;
            }

            let band = archetype.band();
            let percentage = spend.total / total_income * 100.0;
            Some(CategoryAnalysis {
                archetype,
                matched_label: spend.first_label_or(archetype.display_name()),
                total: spend.total,
                percentage,
                status: CategoryStatus::for_percentage(percentage, band),
                band,
            })
        })
        .collect()
}

/// Convenience wrapper building the label map from raw rows
pub fn analyze_rows(total_income: f64, rows: &[CategorySpendingRow]) -> Vec<CategoryAnalysis> {
    analyze(total_income, &CategoryTotals::from_rows(rows))
}
