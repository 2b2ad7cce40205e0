//! Savings narrative: praise or nudge based on the saving archetype

use crate::error::Result;

use super::analyzer::archetype_spend;
use super::archetypes::CategoryArchetype;
use super::engine::{AnalysisContext, InsightRule};
use super::format::{money, pct};
use super::types::{Insight, InsightKind, Priority};

/// Savings rate recommended as a share of income
pub const TARGET_SAVINGS_RATE: f64 = 20.0;

fn savings_message(total: f64, percentage: f64) -> String {
    let amount = money(total);
    let rate = pct(percentage);
    if percentage >= 30.0 {
        format!(
            "Outstanding! You're saving {} ({}% of income). This exceeds the recommended 20%+ \
             and shows exceptional financial discipline! 🎉",
            amount, rate
        )
    } else if percentage >= TARGET_SAVINGS_RATE {
        format!(
            "Excellent! You're saving {} ({}% of income), which meets the recommended 20%+ \
             savings rate. Keep building your financial future! 💪",
            amount, rate
        )
    } else if percentage >= 10.0 {
        format!(
            "Good progress! You're saving {} ({}% of income). Aim for 20%+ to build a strong \
             financial foundation. Every dollar counts! ✨",
            amount, rate
        )
    } else {
        format!(
            "You're saving {} ({}% of income). Consider increasing savings to reach the \
             recommended 20%+ of income for better financial security. 🌟",
            amount, rate
        )
    }
}

/// Single-tracker savings narrative
pub struct SavingsRule;

impl InsightRule for SavingsRule {
    fn name(&self) -> &'static str {
        "Savings"
    }

    fn evaluate(&self, ctx: &AnalysisContext<'_>) -> Result<Vec<Insight>> {
        if ctx.is_dashboard() {
            return Ok(vec![]);
        }

        let income = ctx.income();
        let spend = archetype_spend(&ctx.totals, CategoryArchetype::Saving);

        let insight = if spend.total > 0.0 {
            let percentage = spend.total / income * 100.0;
            let (kind, priority) = if percentage >= TARGET_SAVINGS_RATE {
                (InsightKind::Success, Priority::Low)
            } else {
                (InsightKind::Suggestion, Priority::Medium)
            };
            Insight::new(
                ctx.scoped_id("saving-positive"),
                kind,
                priority,
                "Savings Analysis",
                savings_message(spend.total, percentage),
            )
            .with_category(spend.first_label_or("Savings"))
            .with_percentage(percentage)
        } else {
            Insight::new(
                ctx.scoped_id("saving-missing"),
                InsightKind::Suggestion,
                Priority::Medium,
                "Start Building Savings",
                format!(
                    "You're not currently tracking savings. Financial experts recommend saving at \
                     least 20% of your income ({} based on your current income). Start small and \
                     build the habit!",
                    money(income * TARGET_SAVINGS_RATE / 100.0)
                ),
            )
            .with_percentage(0.0)
        };

        Ok(vec![ctx.attribute(insight, None)])
    }
}
