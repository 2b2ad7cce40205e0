//! CLI command tests

use std::io::Write;
use std::path::PathBuf;

use pocketwise_core::{CategoryArchetype, Config, InsightKind};
use tempfile::NamedTempFile;

use crate::commands;

const TRACKER_INPUT: &str = r#"{
    "id": 1,
    "name": "Household",
    "summary": {"totalIncome": 5000, "totalExpenses": 4000, "balance": 1000},
    "categorySpending": [{"category_name": "🏠 Rent", "total": "2000"}]
}"#;

const LEDGER: &str = r#"{
    "trackers": [
        {"id": 1, "name": "Household", "user_id": "alice"},
        {"id": 2, "name": "Travel Fund", "user_id": "alice"}
    ],
    "transactions": [
        {"tracker_id": 1, "type": "income", "amount": 4000, "transaction_date": "2024-06-01"},
        {"tracker_id": 1, "type": "expense", "amount": 1200, "category_name": "Rent", "transaction_date": "2024-06-02"},
        {"tracker_id": 2, "type": "income", "amount": 500, "transaction_date": "2024-06-01"},
        {"tracker_id": 2, "type": "expense", "amount": 300, "category_name": "Flights", "transaction_date": "2024-06-09"}
    ]
}"#;

fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", contents).unwrap();
    file
}

// ========== Analyze Command Tests ==========

#[test]
fn test_analyze_file_selects_two() {
    let file = write_temp(TRACKER_INPUT);
    let (tracker, insights) = commands::analyze_file(file.path(), false).unwrap();

    assert_eq!(tracker.name, "Household");
    assert_eq!(insights.len(), 2);
    assert_eq!(insights[0].id, "budget-housing-high-1");
    assert_eq!(insights[1].id, "positive-balance-1");
}

#[test]
fn test_analyze_file_all_candidates() {
    let file = write_temp(TRACKER_INPUT);
    let (_, insights) = commands::analyze_file(file.path(), true).unwrap();

    assert_eq!(insights.len(), 4);
    assert!(insights
        .iter()
        .any(|i| i.id == "saving-missing-1" && i.kind == InsightKind::Suggestion));
}

#[test]
fn test_analyze_file_rejects_bad_input() {
    let file = write_temp("{\"name\": \"missing id\"}");
    assert!(commands::analyze_file(file.path(), false).is_err());

    let missing = PathBuf::from("/nonexistent/tracker.json");
    assert!(commands::cmd_analyze(&missing, false, false).is_err());
}

#[test]
fn test_cmd_analyze_text_and_json() {
    let file = write_temp(TRACKER_INPUT);
    assert!(commands::cmd_analyze(file.path(), false, false).is_ok());
    assert!(commands::cmd_analyze(file.path(), true, true).is_ok());
}

// ========== Ledger Command Tests ==========

#[test]
fn test_resolve_ledger_prefers_flag() {
    let mut config = Config::default();
    config.ledger.path = Some(PathBuf::from("from-config.json"));

    let flag = PathBuf::from("from-flag.json");
    assert_eq!(
        commands::resolve_ledger(Some(&flag), &config).unwrap(),
        flag
    );
    assert_eq!(
        commands::resolve_ledger(None, &config).unwrap(),
        PathBuf::from("from-config.json")
    );
    assert!(commands::resolve_ledger(None, &Config::default()).is_err());
}

#[test]
fn test_open_ledger_reports_path() {
    let file = write_temp("{\"trackers\": 5}");
    let err = commands::open_ledger(file.path()).unwrap_err();
    assert!(err.to_string().contains("Failed to load ledger"));
}

#[tokio::test]
async fn test_cmd_dashboard() {
    let file = write_temp(LEDGER);
    assert!(commands::cmd_dashboard(file.path(), "alice", false)
        .await
        .is_ok());
    assert!(commands::cmd_dashboard(file.path(), "alice", true)
        .await
        .is_ok());
    assert!(commands::cmd_dashboard(file.path(), "nobody", false)
        .await
        .is_ok());
}

#[test]
fn test_cmd_summary() {
    let file = write_temp(LEDGER);
    assert!(commands::cmd_summary(file.path(), "alice").is_ok());
    assert!(commands::cmd_summary(file.path(), "nobody").is_ok());
}

// ========== Classify Command Tests ==========

#[test]
fn test_classify_labels() {
    let labels = vec![
        "🛒 Groceries".to_string(),
        "Flights".to_string(),
        "Random Nonsense Label".to_string(),
    ];
    let result = commands::classify_labels(&labels);

    assert_eq!(result[0], ("🛒 Groceries", Some(CategoryArchetype::Groceries)));
    assert_eq!(result[1], ("Flights", Some(CategoryArchetype::Travel)));
    assert_eq!(result[2], ("Random Nonsense Label", None));
    assert!(commands::cmd_classify(&labels).is_ok());
}

#[test]
fn test_cmd_budgets() {
    assert!(commands::cmd_budgets().is_ok());
}
