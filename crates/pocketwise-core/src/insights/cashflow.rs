//! Whole-budget narratives: balance, expense ratio and overspending

use crate::error::Result;

use super::analyzer::archetype_spend;
use super::archetypes::CategoryArchetype;
use super::engine::{require_finite, AnalysisContext, InsightRule, Scope};
use super::format::{money, pct};
use super::savings::TARGET_SAVINGS_RATE;
use super::types::{Insight, InsightKind, Priority};

/// Expense ratio above which spending leaves too little room
const HIGH_EXPENSE_RATIO: f64 = 90.0;
/// Expense ratio below which the savings rate is praised
const GOOD_EXPENSE_RATIO: f64 = 50.0;
/// Expenses beyond this multiple of income are flagged as unsustainable
const OVERSPEND_FACTOR: f64 = 1.1;

fn positive_balance_message(balance: f64, rate: f64) -> String {
    let amount = money(balance);
    if rate >= 30.0 {
        format!(
            "Outstanding! You have a positive balance of {} and are saving {}% of your income. \
             This is exceptional financial management! 🎉",
            amount,
            pct(rate)
        )
    } else if rate >= 20.0 {
        format!(
            "Excellent work! You have a positive balance of {} and are saving {}% of your income. \
             You're building a strong financial foundation! 💪",
            amount,
            pct(rate)
        )
    } else if rate >= 10.0 {
        format!(
            "Great job! You have a positive balance of {} and are saving {}% of your income. \
             Keep up the good financial habits! ✨",
            amount,
            pct(rate)
        )
    } else {
        format!(
            "Good progress! You have a positive balance of {}. Every dollar saved counts toward \
             your financial goals! 🌟",
            amount
        )
    }
}

/// Negative balance warning, or positive balance praise for a single tracker
pub struct BalanceRule;

impl InsightRule for BalanceRule {
    fn name(&self) -> &'static str {
        "Balance"
    }

    fn evaluate(&self, ctx: &AnalysisContext<'_>) -> Result<Vec<Insight>> {
        let income = ctx.income();
        let balance = require_finite("balance", ctx.summary.balance)?;

        if balance < 0.0 {
            let message = match ctx.scope {
                Scope::Tracker { name, .. } => format!(
                    "Your balance in \"{}\" is negative ({}). You're spending more than you're \
                     earning. Consider reviewing your expenses and finding areas to cut back. \
                     This is not sustainable and will lead to financial problems.",
                    name,
                    money(balance.abs())
                ),
                Scope::Dashboard { .. } => format!(
                    "Your total balance is negative ({}). You're spending more than you're \
                     earning. Consider reviewing your expenses and finding areas to cut back.",
                    money(balance.abs())
                ),
            };
            let insight = Insight::new(
                ctx.narrative_id("negative-balance"),
                InsightKind::Warning,
                Priority::High,
                "Negative Balance Alert",
                message,
            )
            .with_percentage((balance / income * 100.0).abs());
            return Ok(vec![ctx.attribute(insight, None)]);
        }

        if balance > 0.0 && !ctx.is_dashboard() {
            let rate = balance / income * 100.0;
            let insight = Insight::new(
                ctx.narrative_id("positive-balance"),
                InsightKind::Success,
                Priority::Low,
                "Positive Balance",
                positive_balance_message(balance, rate),
            )
            .with_percentage(rate);
            return Ok(vec![ctx.attribute(insight, None)]);
        }

        Ok(vec![])
    }
}

/// Share of income going to expenses
pub struct ExpenseRatioRule;

impl InsightRule for ExpenseRatioRule {
    fn name(&self) -> &'static str {
        "Expense Ratio"
    }

    fn evaluate(&self, ctx: &AnalysisContext<'_>) -> Result<Vec<Insight>> {
        let income = ctx.income();
        let expenses = require_finite("total expenses", ctx.summary.total_expenses)?;
        let ratio = expenses / income * 100.0;

        if ctx.is_dashboard() {
            if ratio <= HIGH_EXPENSE_RATIO {
                return Ok(vec![]);
            }
            let insight = Insight::new(
                ctx.narrative_id("expense-ratio-high"),
                InsightKind::Warning,
                Priority::High,
                "High Expense Ratio",
                format!(
                    "Your total expenses are {}% of your income. This leaves little room for \
                     savings. Consider reducing discretionary spending to build a financial buffer.",
                    pct(ratio)
                ),
            )
            .with_percentage(ratio);
            return Ok(vec![insight]);
        }

        let savings = archetype_spend(&ctx.totals, CategoryArchetype::Saving).total;
        let savings_pct = savings / income * 100.0;
        let ratio_without_savings = (expenses - savings) / income * 100.0;
        tracing::debug!(ratio, ratio_without_savings, savings_pct, "Expense ratio");

        // savings are booked as expenses
        if savings > 0.0 && savings_pct >= TARGET_SAVINGS_RATE {
            return Ok(vec![]);
        }

        let insight = if ratio > HIGH_EXPENSE_RATIO {
            Insight::new(
                ctx.narrative_id("expense-ratio-high"),
                InsightKind::Warning,
                Priority::High,
                "High Expense Ratio",
                format!(
                    "Your total expenses are {}% of your income ({}). This leaves little room for \
                     savings. Consider reducing discretionary spending to build a financial buffer.",
                    pct(ratio),
                    money(expenses)
                ),
            )
        } else if ratio < GOOD_EXPENSE_RATIO {
            Insight::new(
                ctx.narrative_id("expense-ratio-good"),
                InsightKind::Success,
                Priority::Low,
                "Great Savings Rate!",
                format!(
                    "Your total expenses are only {}% of your income ({}). Excellent job \
                     maintaining a healthy savings rate!",
                    pct(ratio),
                    money(expenses)
                ),
            )
        } else {
            return Ok(vec![]);
        };

        Ok(vec![ctx.attribute(insight.with_percentage(ratio), None)])
    }
}

/// Expenses running well past income
pub struct OverspendRule;

impl InsightRule for OverspendRule {
    fn name(&self) -> &'static str {
        "Overspend"
    }

    fn evaluate(&self, ctx: &AnalysisContext<'_>) -> Result<Vec<Insight>> {
        let income = ctx.income();
        let expenses = require_finite("total expenses", ctx.summary.total_expenses)?;

        if expenses <= income * OVERSPEND_FACTOR {
            return Ok(vec![]);
        }

        let mut message = format!(
            "Your expenses ({}) exceed your income ({}) by {}. This is unsustainable. \
             Consider increasing income or reducing expenses.",
            money(expenses),
            money(income),
            money(expenses - income)
        );
        if !ctx.is_dashboard() {
            message.push_str(" This will lead to financial problems.");
        }

        let insight = Insight::new(
            ctx.narrative_id("income-expense-mismatch"),
            InsightKind::Warning,
            Priority::High,
            "Spending Exceeds Income",
            message,
        );
        Ok(vec![ctx.attribute(insight, None)])
    }
}
