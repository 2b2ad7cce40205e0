//! Classification commands (classify, budgets)

use anyhow::Result;
use pocketwise_core::{classify, CategoryArchetype};

/// Archetype for each label, `None` when nothing matches
pub fn classify_labels(labels: &[String]) -> Vec<(&str, Option<CategoryArchetype>)> {
    labels.iter().map(|l| (l.as_str(), classify(l))).collect()
}

pub fn cmd_classify(labels: &[String]) -> Result<()> {
    for (label, archetype) in classify_labels(labels) {
        match archetype {
            Some(a) => println!("{:<30} → {} ({})", label, a.display_name(), a),
            None => println!("{:<30} → (unclassified)", label),
        }
    }
    Ok(())
}

pub fn cmd_budgets() -> Result<()> {
    println!();
    println!("📋 Recommended budget bands (% of income)");
    println!("   ─────────────────────────────────────────────");
    for archetype in CategoryArchetype::all() {
        let band = archetype.band();
        println!(
            "   {:<28} {:>4}% - {:>3}%",
            archetype.display_name(),
            band.min,
            band.max
        );
    }
    println!();
    Ok(())
}
