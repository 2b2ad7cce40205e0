//! Domain models for Pocketwise

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Label used when a row or transaction carries no category name
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Opaque tracker identifier (numeric ids from the database, strings for guests)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TrackerId {
    Number(i64),
    Text(String),
}

impl std::fmt::Display for TrackerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for TrackerId {
    fn from(id: i64) -> Self {
        Self::Number(id)
    }
}

impl From<&str> for TrackerId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_string())
    }
}

impl From<String> for TrackerId {
    fn from(id: String) -> Self {
        Self::Text(id)
    }
}

impl std::str::FromStr for TrackerId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s.parse::<i64>() {
            Ok(n) => Self::Number(n),
            Err(_) => Self::Text(s.to_string()),
        })
    }
}

/// Aggregate totals for one tracker
///
/// `balance` is expected to equal `total_income - total_expenses`; the producer
/// owns that invariant and nothing downstream re-checks it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackerSummary {
    #[serde(default, deserialize_with = "lenient_amount")]
    pub total_income: f64,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub total_expenses: f64,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub balance: f64,
}

impl TrackerSummary {
    /// Build a summary from income and expenses, deriving the balance
    pub fn new(total_income: f64, total_expenses: f64) -> Self {
        Self {
            total_income,
            total_expenses,
            balance: total_income - total_expenses,
        }
    }
}

/// Expense total for one category label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySpendingRow {
    #[serde(default = "uncategorized", deserialize_with = "lenient_label")]
    pub category_name: String,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub total: f64,
}

impl CategorySpendingRow {
    pub fn new(category_name: impl Into<String>, total: f64) -> Self {
        Self {
            category_name: category_name.into(),
            total,
        }
    }
}

/// Everything the insight engine needs to know about one tracker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackerAnalysisInput {
    pub id: TrackerId,
    pub name: String,
    #[serde(default)]
    pub summary: TrackerSummary,
    #[serde(default)]
    pub category_spending: Vec<CategorySpendingRow>,
}

/// A named tracker owned by a user (or guest identity)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tracker {
    pub id: TrackerId,
    pub name: String,
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl std::str::FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(format!("Unknown transaction type: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A recorded income or expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub tracker_id: TrackerId,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    #[serde(deserialize_with = "lenient_amount")]
    pub amount: f64,
    #[serde(default)]
    pub category_name: Option<String>,
    pub transaction_date: NaiveDate,
    #[serde(default)]
    pub notes: Option<String>,
    /// Recurrence label ("never", "weekly", "monthly", ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeat: Option<String>,
}

/// Coerce a loosely typed JSON amount into a finite number
///
/// Numbers pass through, numeric strings are parsed, null/empty become zero.
/// Anything that would not be a finite number contributes zero instead of
/// poisoning downstream sums.
pub fn coerce_amount(value: &Value) -> f64 {
    let n = match value {
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                0.0
            } else {
                s.parse::<f64>().unwrap_or(f64::NAN)
            }
        }
        Value::Bool(true) => 1.0,
        Value::Bool(false) | Value::Null => 0.0,
        Value::Array(_) | Value::Object(_) => f64::NAN,
    };

    if n.is_finite() {
        n
    } else {
        tracing::debug!(value = %value, "Non-numeric amount treated as zero");
        0.0
    }
}

fn lenient_amount<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_amount(&value))
}

fn lenient_label<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let label = Option::<String>::deserialize(deserializer)?;
    Ok(label
        .filter(|s| !s.is_empty())
        .unwrap_or_else(uncategorized))
}

fn uncategorized() -> String {
    UNCATEGORIZED.to_string()
}
