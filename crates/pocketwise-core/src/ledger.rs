//! In-memory ledger of trackers and transactions
//!
//! The ledger is the source the insight engine's inputs are derived from:
//! per-tracker income/expense summaries and expense totals grouped by category
//! label. It loads from a single JSON document:
//!
//! ```json
//! {
//!   "trackers": [{ "id": 1, "name": "Household", "user_id": "alice" }],
//!   "transactions": [
//!     { "tracker_id": 1, "type": "income", "amount": 5000,
//!       "category_name": "Salary", "transaction_date": "2024-03-01" }
//!   ]
//! }
//! ```

use std::collections::{HashMap, HashSet};
use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::dashboard::InsightSource;
use crate::error::{Error, Result};
use crate::models::{
    CategorySpendingRow, Tracker, TrackerAnalysisInput, TrackerId, TrackerSummary, Transaction,
    TransactionType, UNCATEGORIZED,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    #[serde(default)]
    pub trackers: Vec<Tracker>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

impl Ledger {
    pub fn new(trackers: Vec<Tracker>, transactions: Vec<Transaction>) -> Self {
        Self {
            trackers,
            transactions,
        }
    }

    /// Load and validate a ledger file
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let ledger = Self::from_json(&contents)?;
        tracing::debug!(
            path = %path.display(),
            trackers = ledger.trackers.len(),
            transactions = ledger.transactions.len(),
            "Loaded ledger"
        );
        Ok(ledger)
    }

    /// Parse and validate a ledger document
    pub fn from_json(json: &str) -> Result<Self> {
        let ledger: Self = serde_json::from_str(json)?;
        ledger.validate()?;
        Ok(ledger)
    }

    /// Check referential integrity and amounts
    pub fn validate(&self) -> Result<()> {
        let mut ids = HashSet::new();
        for tracker in &self.trackers {
            if !ids.insert(&tracker.id) {
                return Err(Error::InvalidData(format!(
                    "duplicate tracker id {}",
                    tracker.id
                )));
            }
        }

        for (i, tx) in self.transactions.iter().enumerate() {
            if !ids.contains(&tx.tracker_id) {
                return Err(Error::NotFound(format!(
                    "transaction {} references unknown tracker {}",
                    tx.id.unwrap_or(i as i64),
                    tx.tracker_id
                )));
            }
            if tx.amount < 0.0 {
                return Err(Error::InvalidData(format!(
                    "transaction {} has a negative amount ({})",
                    tx.id.unwrap_or(i as i64),
                    tx.amount
                )));
            }
        }

        Ok(())
    }

    pub fn tracker(&self, id: &TrackerId) -> Option<&Tracker> {
        self.trackers.iter().find(|t| &t.id == id)
    }

    fn require_tracker(&self, id: &TrackerId) -> Result<&Tracker> {
        self.tracker(id)
            .ok_or_else(|| Error::NotFound(format!("tracker {}", id)))
    }

    /// Trackers owned by a user, in ledger order
    pub fn trackers_for(&self, user_id: &str) -> Vec<&Tracker> {
        self.trackers
            .iter()
            .filter(|t| t.user_id == user_id)
            .collect()
    }

    /// A tracker's transactions, newest first
    ///
    /// Same-day entries put the most recently recorded (later in the ledger)
    /// first.
    pub fn transactions_for(&self, tracker_id: &TrackerId) -> Vec<&Transaction> {
        let mut txs: Vec<&Transaction> = self
            .transactions
            .iter()
            .rev()
            .filter(|t| &t.tracker_id == tracker_id)
            .collect();
        txs.sort_by(|a, b| b.transaction_date.cmp(&a.transaction_date));
        txs
    }

    pub fn summary(&self, tracker_id: &TrackerId) -> Result<TrackerSummary> {
        self.require_tracker(tracker_id)?;
        Ok(summarize(self.transactions_for(tracker_id)))
    }

    pub fn category_spending_for(&self, tracker_id: &TrackerId) -> Result<Vec<CategorySpendingRow>> {
        self.require_tracker(tracker_id)?;
        Ok(category_spending(self.transactions_for(tracker_id)))
    }

    /// Engine input for one tracker
    pub fn analysis_input(&self, tracker_id: &TrackerId) -> Result<TrackerAnalysisInput> {
        let tracker = self.require_tracker(tracker_id)?;
        let txs = self.transactions_for(tracker_id);
        Ok(TrackerAnalysisInput {
            id: tracker.id.clone(),
            name: tracker.name.clone(),
            summary: summarize(txs.iter().copied()),
            category_spending: category_spending(txs),
        })
    }
}

/// Income and expense totals; balance is income minus expenses
pub fn summarize<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> TrackerSummary {
    let (income, expenses) =
        transactions
            .into_iter()
            .fold((0.0, 0.0), |(income, expenses), tx| match tx.transaction_type {
                TransactionType::Income => (income + tx.amount, expenses),
                TransactionType::Expense => (income, expenses + tx.amount),
            });
    TrackerSummary::new(income, expenses)
}

/// Expense totals grouped by category label, largest first
///
/// Transactions without a category are grouped under "Uncategorized". Labels
/// whose total is zero are left out; equal totals keep first-seen order.
pub fn category_spending<'a>(
    transactions: impl IntoIterator<Item = &'a Transaction>,
) -> Vec<CategorySpendingRow> {
    let mut rows: Vec<CategorySpendingRow> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for tx in transactions {
        if tx.transaction_type != TransactionType::Expense {
            continue;
        }
        let label = tx
            .category_name
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(UNCATEGORIZED);
        match index.get(label) {
            Some(&i) => rows[i].total += tx.amount,
            None => {
                index.insert(label.to_string(), rows.len());
                rows.push(CategorySpendingRow::new(label, tx.amount));
            }
        }
    }

    rows.retain(|r| r.total != 0.0);
    rows.sort_by(|a, b| {
        b.total
            .partial_cmp(&a.total)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    rows
}

#[async_trait]
impl InsightSource for Ledger {
    async fn trackers(&self, user_id: &str) -> Result<Vec<Tracker>> {
        Ok(self.trackers_for(user_id).into_iter().cloned().collect())
    }

    async fn summary(&self, tracker_id: &TrackerId) -> Result<TrackerSummary> {
        Ledger::summary(self, tracker_id)
    }

    async fn category_spending(&self, tracker_id: &TrackerId) -> Result<Vec<CategorySpendingRow>> {
        self.category_spending_for(tracker_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn tx(tracker: i64, kind: TransactionType, amount: f64, category: Option<&str>, day: &str) -> Transaction {
        Transaction {
            id: None,
            tracker_id: TrackerId::Number(tracker),
            transaction_type: kind,
            amount,
            category_name: category.map(String::from),
            transaction_date: date(day),
            notes: None,
            repeat: None,
        }
    }

    fn tracker(id: i64, user: &str) -> Tracker {
        Tracker {
            id: TrackerId::Number(id),
            name: format!("Tracker {}", id),
            user_id: user.to_string(),
            icon: None,
            color: None,
        }
    }

    fn sample() -> Ledger {
        use TransactionType::*;
        Ledger::new(
            vec![tracker(1, "alice"), tracker(2, "bob"), tracker(3, "alice")],
            vec![
                tx(1, Income, 5000.0, Some("Salary"), "2024-03-01"),
                tx(1, Expense, 1500.0, Some("🏠 Rent"), "2024-03-02"),
                tx(1, Expense, 40.0, Some("Coffee"), "2024-03-05"),
                tx(1, Expense, 500.0, Some("🏠 Rent"), "2024-03-03"),
                tx(1, Expense, 25.0, None, "2024-03-04"),
                tx(2, Income, 100.0, None, "2024-03-01"),
            ],
        )
    }

    #[test]
    fn test_summary_and_category_spending() {
        let ledger = sample();
        let id = TrackerId::Number(1);

        let summary = ledger.summary(&id).unwrap();
        assert_eq!(summary.total_income, 5000.0);
        assert_eq!(summary.total_expenses, 2065.0);
        assert_eq!(summary.balance, 2935.0);

        let rows = ledger.category_spending_for(&id).unwrap();
        assert_eq!(
            rows,
            vec![
                CategorySpendingRow::new("🏠 Rent", 2000.0),
                CategorySpendingRow::new("Coffee", 40.0),
                CategorySpendingRow::new(UNCATEGORIZED, 25.0),
            ]
        );
    }

    #[test]
    fn test_zero_totals_dropped_and_ties_stable() {
        use TransactionType::*;
        let txs = vec![
            tx(1, Expense, 10.0, Some("B"), "2024-01-01"),
            tx(1, Expense, 0.0, Some("Zero"), "2024-01-01"),
            tx(1, Expense, 10.0, Some("A"), "2024-01-01"),
        ];
        let rows = category_spending(&txs);
        let labels: Vec<_> = rows.iter().map(|r| r.category_name.as_str()).collect();
        assert_eq!(labels, vec!["B", "A"]);
    }

    #[test]
    fn test_transactions_newest_first() {
        let ledger = sample();
        let dates: Vec<_> = ledger
            .transactions_for(&TrackerId::Number(1))
            .iter()
            .map(|t| t.transaction_date)
            .collect();
        assert_eq!(dates.first(), Some(&date("2024-03-05")));
        assert_eq!(dates.last(), Some(&date("2024-03-01")));
    }

    #[test]
    fn test_same_day_transactions_latest_recorded_first() {
        use TransactionType::*;
        let ledger = Ledger::new(
            vec![tracker(1, "alice")],
            vec![
                tx(1, Expense, 10.0, Some("Breakfast"), "2024-03-01"),
                tx(1, Expense, 20.0, Some("Lunch"), "2024-03-02"),
                tx(1, Expense, 30.0, Some("Dinner"), "2024-03-01"),
            ],
        );
        let labels: Vec<_> = ledger
            .transactions_for(&TrackerId::Number(1))
            .iter()
            .filter_map(|t| t.category_name.as_deref())
            .collect();
        assert_eq!(labels, vec!["Lunch", "Dinner", "Breakfast"]);
    }

    #[test]
    fn test_trackers_for_user() {
        let ledger = sample();
        let ids: Vec<_> = ledger
            .trackers_for("alice")
            .iter()
            .map(|t| t.id.clone())
            .collect();
        assert_eq!(ids, vec![TrackerId::Number(1), TrackerId::Number(3)]);
        assert!(ledger.trackers_for("nobody").is_empty());
    }

    #[test]
    fn test_unknown_tracker_is_not_found() {
        let ledger = sample();
        let err = ledger.summary(&TrackerId::Number(99)).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn test_validate_rejects_bad_transactions() {
        let mut ledger = sample();
        ledger
            .transactions
            .push(tx(42, TransactionType::Expense, 1.0, None, "2024-01-01"));
        assert!(matches!(ledger.validate(), Err(Error::NotFound(_))));

        let mut ledger = sample();
        ledger
            .transactions
            .push(tx(1, TransactionType::Expense, -5.0, None, "2024-01-01"));
        assert!(matches!(ledger.validate(), Err(Error::InvalidData(_))));

        let mut ledger = sample();
        ledger.trackers.push(tracker(1, "carol"));
        assert!(matches!(ledger.validate(), Err(Error::InvalidData(_))));
    }

    #[test]
    fn test_from_path() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "trackers": [{{"id": "guest-1", "name": "Guest", "user_id": "guest"}}],
                "transactions": [
                    {{"tracker_id": "guest-1", "type": "income", "amount": "1200.50",
                      "transaction_date": "2024-02-01"}},
                    {{"tracker_id": "guest-1", "type": "expense", "amount": 200,
                      "category_name": "Groceries", "transaction_date": "2024-02-03"}}
                ]
            }}"#
        )
        .unwrap();

        let ledger = Ledger::from_path(file.path()).unwrap();
        let input = ledger
            .analysis_input(&TrackerId::Text("guest-1".to_string()))
            .unwrap();
        assert_eq!(input.summary.total_income, 1200.5);
        assert_eq!(input.summary.balance, 1000.5);
        assert_eq!(input.category_spending[0].category_name, "Groceries");
    }

    #[test]
    fn test_from_path_rejects_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(Ledger::from_path(file.path()), Err(Error::Json(_))));
    }
}
