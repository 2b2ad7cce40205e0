//! Insight Engine - runs every rule over one analysis context and ranks the result

use crate::error::{Error, Result};
use crate::models::{CategorySpendingRow, TrackerAnalysisInput, TrackerId, TrackerSummary};

use super::aggregate::{aggregate, find_tracker_with_category, CategoryTotals};
use super::analyzer::{analyze, CategoryAnalysis};
use super::ranker::{rank, select};
use super::types::Insight;
use super::{BalanceRule, BudgetStatusRule, ExpenseRatioRule, OverspendRule, RecommendationRule, SavingsRule};

/// Whose figures an analysis covers
#[derive(Debug, Clone, Copy)]
pub enum Scope<'a> {
    /// A single tracker; every insight is attributed to it
    Tracker { id: &'a TrackerId, name: &'a str },
    /// All of a user's trackers combined (dashboard view)
    Dashboard {
        trackers: &'a [TrackerAnalysisInput],
    },
}

/// Context provided to insight rules
pub struct AnalysisContext<'a> {
    pub scope: Scope<'a>,
    pub summary: TrackerSummary,
    pub totals: CategoryTotals,
    /// Analyzer output for `totals`, computed once per context
    pub analysis: Vec<CategoryAnalysis>,
}

impl<'a> AnalysisContext<'a> {
    /// Context for one tracker, or `None` when there is no positive income
    pub fn for_tracker(input: &'a TrackerAnalysisInput) -> Option<Self> {
        let totals = CategoryTotals::from_rows(&input.category_spending);
        Self::build(
            Scope::Tracker {
                id: &input.id,
                name: &input.name,
            },
            input.summary,
            totals,
        )
    }

    /// Context combining every tracker, or `None` when there are no trackers
    /// or no positive combined income
    pub fn for_dashboard(
        trackers: &'a [TrackerAnalysisInput],
        rows: &[CategorySpendingRow],
    ) -> Option<Self> {
        if trackers.is_empty() {
            return None;
        }
        let view = aggregate(trackers, rows);
        Self::build(Scope::Dashboard { trackers }, view.summary, view.totals)
    }

    fn build(scope: Scope<'a>, summary: TrackerSummary, totals: CategoryTotals) -> Option<Self> {
        let income = summary.total_income;
        if !(income.is_finite() && income > 0.0) {
            tracing::debug!(income, "No positive income, skipping insight analysis");
            return None;
        }

        let analysis = analyze(income, &totals);
        Some(Self {
            scope,
            summary,
            totals,
            analysis,
        })
    }

    pub fn income(&self) -> f64 {
        self.summary.total_income
    }

    pub fn is_dashboard(&self) -> bool {
        matches!(self.scope, Scope::Dashboard { .. })
    }

    /// Id for budget-status insights: `{base}-{tracker id}`, or `{base}-all`
    /// on the dashboard and for an unset tracker id (`0` or empty)
    pub fn budget_id(&self, base: &str) -> String {
        match self.scope {
            Scope::Tracker { id, .. } if !is_unset(id) => format!("{}-{}", base, id),
            _ => format!("{}-all", base),
        }
    }

    /// Id for per-category insights: `{base}-{tracker id}` or `{base}-all`
    pub fn scoped_id(&self, base: &str) -> String {
        match self.scope {
            Scope::Tracker { id, .. } => format!("{}-{}", base, id),
            Scope::Dashboard { .. } => format!("{}-all", base),
        }
    }

    /// Id for whole-budget narratives: `{base}-{tracker id}` or bare `{base}`
    pub fn narrative_id(&self, base: &str) -> String {
        match self.scope {
            Scope::Tracker { id, .. } => format!("{}-{}", base, id),
            Scope::Dashboard { .. } => base.to_string(),
        }
    }

    /// Attach provenance: the tracker itself, or on the dashboard the first
    /// tracker whose spending contains `category`
    pub fn attribute(&self, insight: Insight, category: Option<&str>) -> Insight {
        match self.scope {
            Scope::Tracker { id, name } => insight.with_tracker(id.clone(), name),
            Scope::Dashboard { trackers } => {
                match category.and_then(|c| find_tracker_with_category(trackers, c)) {
                    Some(tracker) => insight.with_tracker(tracker.id.clone(), &tracker.name),
                    None => insight,
                }
            }
        }
    }
}

fn is_unset(id: &TrackerId) -> bool {
    match id {
        TrackerId::Number(n) => *n == 0,
        TrackerId::Text(s) => s.is_empty(),
    }
}

/// Reject a summary field a rule cannot reason about
pub fn require_finite(field: &str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::InvalidData(format!("{} is not a finite number", field)))
    }
}

/// A single, independent narrative rule
pub trait InsightRule: Send + Sync {
    /// Human-readable name used in logs
    fn name(&self) -> &'static str;

    /// Produce candidate insights for this context
    fn evaluate(&self, ctx: &AnalysisContext<'_>) -> Result<Vec<Insight>>;
}

/// The main insight engine that orchestrates the rules
pub struct InsightEngine {
    rules: Vec<Box<dyn InsightRule>>,
}

impl Default for InsightEngine {
    fn default() -> Self {
        Self::for_tracker()
    }
}

impl InsightEngine {
    /// Engine with every built-in rule, for a single tracker
    pub fn for_tracker() -> Self {
        let mut engine = Self::empty();

        engine.register(Box::new(BudgetStatusRule));
        engine.register(Box::new(RecommendationRule));
        engine.register(Box::new(SavingsRule));
        engine.register(Box::new(BalanceRule));
        engine.register(Box::new(ExpenseRatioRule));
        engine.register(Box::new(OverspendRule));

        engine
    }

    /// Engine for the combined view across trackers
    ///
    /// The duplicate per-category pass and the savings narrative are left out;
    /// the remaining rules report only their warnings in dashboard scope.
    pub fn for_dashboard() -> Self {
        let mut engine = Self::empty();

        engine.register(Box::new(BudgetStatusRule));
        engine.register(Box::new(BalanceRule));
        engine.register(Box::new(ExpenseRatioRule));
        engine.register(Box::new(OverspendRule));

        engine
    }

    /// Create an engine with no rules registered
    pub fn empty() -> Self {
        Self { rules: vec![] }
    }

    pub fn register(&mut self, rule: Box<dyn InsightRule>) {
        self.rules.push(rule);
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Run every rule; a failing rule is logged and skipped
    pub fn evaluate(&self, ctx: &AnalysisContext<'_>) -> Vec<Insight> {
        let mut candidates = vec![];

        for rule in &self.rules {
            match rule.evaluate(ctx) {
                Ok(insights) => {
                    tracing::debug!(
                        rule = rule.name(),
                        count = insights.len(),
                        "Insight rule complete"
                    );
                    candidates.extend(insights);
                }
                Err(e) => {
                    tracing::warn!(rule = rule.name(), error = %e, "Insight rule failed");
                }
            }
        }

        candidates
    }

    /// Every candidate for one tracker, ranked (the panel view)
    pub fn candidates_for_tracker(&self, input: &TrackerAnalysisInput) -> Vec<Insight> {
        match AnalysisContext::for_tracker(input) {
            Some(ctx) => rank(self.evaluate(&ctx)),
            None => vec![],
        }
    }

    /// The one or two insights to surface for a tracker
    pub fn analyze_tracker(&self, input: &TrackerAnalysisInput) -> Vec<Insight> {
        select(self.candidates_for_tracker(input))
    }

    /// Every cross-tracker candidate, ranked
    pub fn candidates_for_all(
        &self,
        trackers: &[TrackerAnalysisInput],
        rows: &[CategorySpendingRow],
    ) -> Vec<Insight> {
        match AnalysisContext::for_dashboard(trackers, rows) {
            Some(ctx) => rank(self.evaluate(&ctx)),
            None => vec![],
        }
    }

    /// The one or two insights to surface on the dashboard
    pub fn analyze_all(
        &self,
        trackers: &[TrackerAnalysisInput],
        rows: &[CategorySpendingRow],
    ) -> Vec<Insight> {
        select(self.candidates_for_all(trackers, rows))
    }
}

/// Selected insights for one tracker using the built-in rules
pub fn synthesize_for_tracker(input: &TrackerAnalysisInput) -> Vec<Insight> {
    InsightEngine::for_tracker().analyze_tracker(input)
}

/// Selected dashboard insights across all trackers using the built-in rules
pub fn synthesize_for_all_trackers(
    trackers: &[TrackerAnalysisInput],
    rows: &[CategorySpendingRow],
) -> Vec<Insight> {
    InsightEngine::for_dashboard().analyze_all(trackers, rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::{InsightKind, Priority};

    struct FailingRule;

    impl InsightRule for FailingRule {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn evaluate(&self, _ctx: &AnalysisContext<'_>) -> Result<Vec<Insight>> {
            Err(Error::InvalidData("boom".to_string()))
        }
    }

    fn input(income: f64, expenses: f64, balance: f64, rows: &[(&str, f64)]) -> TrackerAnalysisInput {
        TrackerAnalysisInput {
            id: TrackerId::Number(1),
            name: "Household".to_string(),
            summary: TrackerSummary {
                total_income: income,
                total_expenses: expenses,
                balance,
            },
            category_spending: rows
                .iter()
                .map(|(n, t)| CategorySpendingRow::new(*n, *t))
                .collect(),
        }
    }

    fn ids(insights: &[Insight]) -> Vec<&str> {
        insights.iter().map(|i| i.id.as_str()).collect()
    }

    #[test]
    fn test_engine_registers_builtin_rules() {
        let engine = InsightEngine::for_tracker();
        assert_eq!(
            engine.rule_names(),
            vec![
                "Budget Status",
                "Recommendation",
                "Savings",
                "Balance",
                "Expense Ratio",
                "Overspend"
            ]
        );
        assert_eq!(
            InsightEngine::for_dashboard().rule_names(),
            vec!["Budget Status", "Balance", "Expense Ratio", "Overspend"]
        );
    }

    #[test]
    fn test_no_income_yields_nothing() {
        let tracker = input(0.0, 500.0, -500.0, &[("Rent", 500.0)]);
        assert!(synthesize_for_tracker(&tracker).is_empty());

        let negative = input(-10.0, 0.0, -10.0, &[]);
        assert!(synthesize_for_tracker(&negative).is_empty());

        let trackers = vec![tracker];
        let rows = trackers[0].category_spending.clone();
        assert!(synthesize_for_all_trackers(&trackers, &rows).is_empty());
        assert!(synthesize_for_all_trackers(&[], &[]).is_empty());
    }

    #[test]
    fn test_end_to_end_single_tracker() {
        let tracker = input(5000.0, 4000.0, 1000.0, &[("🏠 Rent", 2000.0)]);
        let engine = InsightEngine::for_tracker();

        let candidates = engine.candidates_for_tracker(&tracker);
        assert_eq!(
            ids(&candidates),
            vec![
                "budget-housing-high-1",
                "housing-exceeds-1",
                "saving-missing-1",
                "positive-balance-1"
            ]
        );

        let housing = &candidates[0];
        assert_eq!(housing.kind, InsightKind::Warning);
        assert_eq!(housing.priority, Priority::Medium);
        assert!(housing.message.contains("$2000.00"));
        assert!(housing.message.contains("40.0%"));
        assert!(housing.message.contains("10.0%"));
        assert!(housing.message.contains("$500.00"));
        assert_eq!(housing.category.as_deref(), Some("🏠 rent"));

        let savings = &candidates[2];
        assert_eq!(savings.kind, InsightKind::Suggestion);
        assert!(savings.message.contains("$1000.00"));

        let balance = &candidates[3];
        assert_eq!(balance.kind, InsightKind::Success);
        assert!(balance.message.starts_with("Excellent work!"));

        let selected = engine.analyze_tracker(&tracker);
        assert_eq!(ids(&selected), vec!["budget-housing-high-1", "positive-balance-1"]);
    }

    #[test]
    fn test_unset_tracker_id_uses_all_for_budget_ids() {
        let mut tracker = input(5000.0, 4000.0, 1000.0, &[("🏠 Rent", 2000.0)]);
        tracker.id = TrackerId::Number(0);

        let candidates = InsightEngine::for_tracker().candidates_for_tracker(&tracker);
        assert_eq!(
            ids(&candidates),
            vec![
                "budget-housing-high-all",
                "housing-exceeds-0",
                "saving-missing-0",
                "positive-balance-0"
            ]
        );
        // still attributed to the tracker itself
        assert_eq!(candidates[0].tracker_id, Some(TrackerId::Number(0)));

        tracker.id = TrackerId::Text(String::new());
        let candidates = InsightEngine::for_tracker().candidates_for_tracker(&tracker);
        assert_eq!(candidates[0].id, "budget-housing-high-all");
        assert_eq!(candidates[1].id, "housing-exceeds-");
    }

    #[test]
    fn test_overspending_emits_both_high_warnings() {
        let tracker = input(2000.0, 2500.0, -500.0, &[]);
        let candidates = InsightEngine::for_tracker().candidates_for_tracker(&tracker);

        let mismatch = candidates
            .iter()
            .find(|i| i.id == "income-expense-mismatch-1")
            .unwrap();
        assert_eq!(mismatch.priority, Priority::High);
        let negative = candidates
            .iter()
            .find(|i| i.id == "negative-balance-1")
            .unwrap();
        assert_eq!(negative.priority, Priority::High);
        assert_eq!(negative.percentage, Some(25.0));

        let selected = InsightEngine::for_tracker().analyze_tracker(&tracker);
        let warnings = selected
            .iter()
            .filter(|i| i.kind == InsightKind::Warning)
            .count();
        assert_eq!(warnings, 1);
    }

    #[test]
    fn test_failing_rule_does_not_block_others() {
        let mut engine = InsightEngine::empty();
        engine.register(Box::new(FailingRule));
        engine.register(Box::new(BalanceRule));

        let tracker = input(1000.0, 500.0, 500.0, &[]);
        let candidates = engine.candidates_for_tracker(&tracker);
        assert_eq!(ids(&candidates), vec!["positive-balance-1"]);
    }

    #[test]
    fn test_malformed_expenses_degrade_only_their_rules() {
        let tracker = input(1000.0, f64::NAN, 200.0, &[("Rent", 400.0)]);
        let candidates = InsightEngine::for_tracker().candidates_for_tracker(&tracker);

        assert!(candidates.iter().any(|i| i.id == "budget-housing-high-1"));
        assert!(candidates.iter().any(|i| i.id == "positive-balance-1"));
        assert!(!candidates.iter().any(|i| i.id.starts_with("expense-ratio")));
        assert!(!candidates.iter().any(|i| i.id.starts_with("income-expense")));
    }

    #[test]
    fn test_dashboard_attributes_categories_to_first_tracker() {
        let mut coffee = input(1000.0, 100.0, 900.0, &[("Coffee", 100.0)]);
        coffee.id = TrackerId::Number(7);
        coffee.name = "Daily".to_string();
        let mut second = input(1000.0, 0.0, 1000.0, &[("coffee", 50.0)]);
        second.id = TrackerId::Number(8);
        let trackers = vec![coffee, second];
        let rows = crate::insights::merge_category_spending(&trackers);

        let candidates = InsightEngine::for_dashboard().candidates_for_all(&trackers, &rows);
        let warning = candidates
            .iter()
            .find(|i| i.id == "budget-coffee-high-all")
            .unwrap();
        assert_eq!(warning.tracker_id, Some(TrackerId::Number(7)));
        assert_eq!(warning.tracker_name.as_deref(), Some("Daily"));
        // 150 / 2000 = 7.5% against a 3% max
        assert_eq!(warning.percentage, Some(7.5));
        assert_eq!(warning.priority, Priority::High);
    }

    #[test]
    fn test_dashboard_only_runs_reduced_rules() {
        let trackers = vec![
            input(1000.0, 1500.0, -500.0, &[("Rent", 1200.0), ("Savings", 300.0)]),
            input(1000.0, 600.0, 400.0, &[("Coffee", 10.0)]),
        ];
        let rows = crate::insights::merge_category_spending(&trackers);
        let candidates = InsightEngine::for_dashboard().candidates_for_all(&trackers, &rows);

        let found = ids(&candidates);
        // 2100 expenses against 2000 income: ratio 105%, under the 110% overspend line
        assert!(found.contains(&"budget-housing-high-all"));
        assert!(found.contains(&"expense-ratio-high"));
        assert!(found.contains(&"negative-balance"));
        assert!(!found.contains(&"income-expense-mismatch"));
        assert!(candidates.iter().all(|i| i.kind == InsightKind::Warning));
        assert!(!found.iter().any(|id| id.contains("saving")));
        assert!(!found.iter().any(|id| id.contains("exceeds")));
    }
}
