//! Ledger-backed commands (dashboard, summary)

use std::path::Path;

use anyhow::Result;
use pocketwise_core::load_dashboard;

use super::{open_ledger, print_insights};

pub async fn cmd_dashboard(ledger_path: &Path, user: &str, json: bool) -> Result<()> {
    let ledger = open_ledger(ledger_path)?;
    let dashboard = load_dashboard(&ledger, user).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&dashboard)?);
        return Ok(());
    }

    if dashboard.trackers.is_empty() {
        println!("No trackers found for user '{}'.", user);
        return Ok(());
    }

    println!();
    println!("╭─────────────────────────────────────────╮");
    println!("│        💰 Pocketwise Dashboard          │");
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!("  🌐 All trackers");
    print_insights(&dashboard.insights);

    for tracker in &dashboard.tracker_insights {
        println!();
        println!("  📁 {}", tracker.tracker_name);
        print_insights(&tracker.insights);
    }
    println!();

    Ok(())
}

pub fn cmd_summary(ledger_path: &Path, user: &str) -> Result<()> {
    let ledger = open_ledger(ledger_path)?;
    let trackers = ledger.trackers_for(user);

    if trackers.is_empty() {
        println!("No trackers found for user '{}'.", user);
        return Ok(());
    }

    for tracker in trackers {
        let input = ledger.analysis_input(&tracker.id)?;
        let summary = input.summary;

        println!();
        println!("📁 {} (tracker {})", tracker.name, tracker.id);
        println!("   ─────────────────────────────");
        println!("   Income:   ${:>10.2}", summary.total_income);
        println!("   Expenses: ${:>10.2}", summary.total_expenses);
        println!("   Balance:  ${:>10.2}", summary.balance);

        if !input.category_spending.is_empty() {
            println!();
            for row in &input.category_spending {
                println!("   {:<28} ${:>10.2}", row.category_name, row.total);
            }
        }
    }
    println!();

    Ok(())
}
