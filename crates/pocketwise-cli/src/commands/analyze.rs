//! Single-tracker analysis command

use std::path::Path;

use anyhow::{Context, Result};
use pocketwise_core::{Insight, InsightEngine, TrackerAnalysisInput};

use super::print_insights;

/// Read a tracker input file and run the engine over it
pub fn analyze_file(input: &Path, all_candidates: bool) -> Result<(TrackerAnalysisInput, Vec<Insight>)> {
    let contents = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let tracker: TrackerAnalysisInput = serde_json::from_str(&contents)
        .with_context(|| format!("Invalid tracker input in {}", input.display()))?;

    let engine = InsightEngine::for_tracker();
    let insights = if all_candidates {
        engine.candidates_for_tracker(&tracker)
    } else {
        engine.analyze_tracker(&tracker)
    };

    Ok((tracker, insights))
}

pub fn cmd_analyze(input: &Path, all_candidates: bool, json: bool) -> Result<()> {
    let (tracker, insights) = analyze_file(input, all_candidates)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&insights)?);
        return Ok(());
    }

    let summary = tracker.summary;
    println!();
    println!("📊 {} (tracker {})", tracker.name, tracker.id);
    println!("   ─────────────────────────────────────────────────────────────");
    println!(
        "   Income: ${:.2}   Expenses: ${:.2}   Balance: ${:.2}",
        summary.total_income, summary.total_expenses, summary.balance
    );
    println!();
    if all_candidates {
        println!("   All candidates ({}):", insights.len());
    }
    print_insights(&insights);
    println!();

    Ok(())
}
