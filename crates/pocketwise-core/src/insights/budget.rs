//! Budget rules comparing category spending with the recommendation bands
//!
//! Two passes exist. [`BudgetStatusRule`] works from the analyzer output and
//! adds summary feedback; [`RecommendationRule`] re-walks the raw totals for
//! every archetype and reports each one on its own. Their warnings overlap on
//! purpose and carry distinct ids.

use crate::error::Result;

use super::analyzer::{archetype_spend, CategoryAnalysis, CategoryStatus};
use super::archetypes::{Band, CategoryArchetype};
use super::engine::{AnalysisContext, InsightRule};
use super::format::{bound, money, pct};
use super::types::{Insight, InsightKind, Priority};

/// Below this share of the band minimum, low spending earns praise
const WELL_BELOW_FACTOR: f64 = 0.7;
/// Above this multiple of the band maximum, overspending is high priority
const SEVERE_FACTOR: f64 = 1.5;
/// Category counts that trigger the summary narratives
const SUMMARY_THRESHOLD: usize = 3;

fn overspend_priority(percentage: f64, band: Band) -> Priority {
    if percentage > band.max * SEVERE_FACTOR {
        Priority::High
    } else {
        Priority::Medium
    }
}

fn over_budget_text(archetype: CategoryArchetype, total: f64, percentage: f64, income: f64) -> String {
    let band = archetype.band();
    let excess = percentage - band.max;
    let excess_amount = excess / 100.0 * income;
    format!(
        "You're spending {} ({}% of income) on {}, which exceeds the recommended {}%. \
         Recommended range is {}-{}% of income. You're spending {}% more than recommended, \
         which is approximately {} extra per month.",
        money(total),
        pct(percentage),
        archetype.display_name().to_lowercase(),
        bound(band.max),
        bound(band.min),
        bound(band.max),
        pct(excess),
        money(excess_amount)
    )
}

fn within_range_text(archetype: CategoryArchetype, total: f64, percentage: f64) -> String {
    let band = archetype.band();
    format!(
        "You're spending {} ({}% of income) on {}, which is within the recommended {}-{}% range. \
         Great job maintaining a balanced budget!",
        money(total),
        pct(percentage),
        archetype.display_name().to_lowercase(),
        bound(band.min),
        bound(band.max)
    )
}

fn well_below_text(archetype: CategoryArchetype, total: f64, percentage: f64) -> String {
    let band = archetype.band();
    format!(
        "You're spending {} ({}% of income) on {}, which is well below the recommended {}-{}% range. \
         This shows excellent financial discipline and leaves more room for savings!",
        money(total),
        pct(percentage),
        archetype.display_name().to_lowercase(),
        bound(band.min),
        bound(band.max)
    )
}

fn is_well_below(percentage: f64, band: Band) -> bool {
    percentage < band.min * WELL_BELOW_FACTOR
}

/// First entry with the largest percentage
fn largest<'a>(entries: impl Iterator<Item = &'a CategoryAnalysis>) -> Option<&'a CategoryAnalysis> {
    entries.fold(None, |best, a| match best {
        Some(b) if b.percentage >= a.percentage => Some(b),
        _ => Some(a),
    })
}

/// First entry with the smallest percentage
fn smallest<'a>(entries: impl Iterator<Item = &'a CategoryAnalysis>) -> Option<&'a CategoryAnalysis> {
    entries.fold(None, |best, a| match best {
        Some(b) if b.percentage <= a.percentage => Some(b),
        _ => Some(a),
    })
}

/// Status narratives from the analyzer output
///
/// On the dashboard only the per-category overspending warnings are emitted.
pub struct BudgetStatusRule;

impl BudgetStatusRule {
    fn exceeded(&self, ctx: &AnalysisContext<'_>, a: &CategoryAnalysis) -> Insight {
        let message = format!(
            "{} Consider reducing spending in this category to improve your budget balance.",
            over_budget_text(a.archetype, a.total, a.percentage, ctx.income())
        );
        let insight = Insight::new(
            ctx.budget_id(&format!("budget-{}-high", a.archetype)),
            InsightKind::Warning,
            overspend_priority(a.percentage, a.band),
            format!("{} Spending is High", a.archetype.display_name()),
            message,
        )
        .with_category(&a.matched_label)
        .with_percentage(a.percentage);
        ctx.attribute(insight, Some(&a.matched_label))
    }
}

impl InsightRule for BudgetStatusRule {
    fn name(&self) -> &'static str {
        "Budget Status"
    }

    fn evaluate(&self, ctx: &AnalysisContext<'_>) -> Result<Vec<Insight>> {
        let with_status =
            |status: CategoryStatus| ctx.analysis.iter().filter(move |a| a.status == status);

        let high: Vec<&CategoryAnalysis> = with_status(CategoryStatus::High).collect();
        let mut insights: Vec<Insight> = high.iter().map(|a| self.exceeded(ctx, a)).collect();

        if ctx.is_dashboard() {
            return Ok(insights);
        }

        let normal_count = with_status(CategoryStatus::Normal).count();

        if high.is_empty() {
            // Savings on top leaves nothing to praise here
            let top = largest(with_status(CategoryStatus::Normal))
                .filter(|a| a.archetype != CategoryArchetype::Saving);
            if let Some(a) = top {
                let insight = Insight::new(
                    ctx.budget_id(&format!("budget-{}-normal", a.archetype)),
                    InsightKind::Success,
                    Priority::Low,
                    format!("Good {} Budgeting", a.archetype.display_name()),
                    within_range_text(a.archetype, a.total, a.percentage),
                )
                .with_category(&a.matched_label)
                .with_percentage(a.percentage);
                insights.push(ctx.attribute(insight, Some(&a.matched_label)));
            }
        }

        if high.len() <= 1 {
            let lowest = smallest(
                with_status(CategoryStatus::Low)
                    .filter(|a| a.archetype != CategoryArchetype::Saving)
                    .filter(|a| is_well_below(a.percentage, a.band)),
            );
            if let Some(a) = lowest {
                let insight = Insight::new(
                    ctx.budget_id(&format!("budget-{}-low", a.archetype)),
                    InsightKind::Success,
                    Priority::Low,
                    format!("Excellent {} Management!", a.archetype.display_name()),
                    well_below_text(a.archetype, a.total, a.percentage),
                )
                .with_category(&a.matched_label)
                .with_percentage(a.percentage);
                insights.push(ctx.attribute(insight, Some(&a.matched_label)));
            }
        }

        if high.len() >= SUMMARY_THRESHOLD {
            let insight = Insight::new(
                ctx.budget_id("budget-summary-multiple-high"),
                InsightKind::Warning,
                Priority::High,
                "Multiple Categories Over Budget",
                format!(
                    "You have {} categories exceeding recommended spending ranges. This indicates \
                     overspending across multiple areas. Consider reviewing your budget priorities \
                     and reducing expenses in high-spending categories to improve your overall \
                     financial health.",
                    high.len()
                ),
            );
            insights.push(ctx.attribute(insight, None));
        } else if high.is_empty() && normal_count >= SUMMARY_THRESHOLD {
            let insight = Insight::new(
                ctx.budget_id("budget-summary-good"),
                InsightKind::Success,
                Priority::Low,
                "Excellent Budget Management!",
                "Great job! Most of your spending categories are within recommended ranges. \
                 You're demonstrating strong budgeting habits and financial discipline. \
                 Keep up the excellent work!",
            );
            insights.push(ctx.attribute(insight, None));
        }

        Ok(insights)
    }
}

/// Per-archetype pass over the raw totals, one insight per matched archetype
pub struct RecommendationRule;

impl InsightRule for RecommendationRule {
    fn name(&self) -> &'static str {
        "Recommendation"
    }

    fn evaluate(&self, ctx: &AnalysisContext<'_>) -> Result<Vec<Insight>> {
        if ctx.is_dashboard() {
            return Ok(vec![]);
        }

        let income = ctx.income();
        let mut insights = vec![];

        for &archetype in CategoryArchetype::all() {
            let spend = archetype_spend(&ctx.totals, archetype);
            if spend.total <= 0.0 {
                continue;
            }

            let band = archetype.band();
            let percentage = spend.total / income * 100.0;
            let category = spend.first_label_or(archetype.display_name());
            let name = archetype.display_name();

            let insight = if percentage > band.max {
                Insight::new(
                    ctx.scoped_id(&format!("{}-exceeds", archetype)),
                    InsightKind::Warning,
                    overspend_priority(percentage, band),
                    format!("{} Exceeds Recommendation", name),
                    over_budget_text(archetype, spend.total, percentage, income),
                )
            } else if is_well_below(percentage, band) && archetype != CategoryArchetype::Saving {
                Insight::new(
                    ctx.scoped_id(&format!("{}-below", archetype)),
                    InsightKind::Success,
                    Priority::Low,
                    format!("Great {} Management!", name),
                    well_below_text(archetype, spend.total, percentage),
                )
            } else if band.contains(percentage) {
                Insight::new(
                    ctx.scoped_id(&format!("{}-optimal", archetype)),
                    InsightKind::Success,
                    Priority::Low,
                    format!("Optimal {} Spending", name),
                    within_range_text(archetype, spend.total, percentage),
                )
            } else {
                continue;
            };

            let insight = insight.with_category(&category).with_percentage(percentage);
            insights.push(ctx.attribute(insight, Some(&category)));
        }

        Ok(insights)
    }
}
