//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `analyze` - Insights for a single tracker input file
//! - `dashboard` - Ledger-backed dashboard and summary commands
//! - `classify` - Category classification and budget band listing
//! - `serve` - Web server command

pub mod analyze;
pub mod classify;
pub mod dashboard;
pub mod serve;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use pocketwise_core::{Config, Insight, InsightKind, Ledger};

// Re-export command functions for main.rs
pub use analyze::*;
pub use classify::*;
pub use dashboard::*;
pub use serve::*;

/// Pick the ledger file: explicit flag, then configuration
pub fn resolve_ledger(flag: Option<&Path>, config: &Config) -> Result<PathBuf> {
    match flag.map(Path::to_path_buf).or_else(|| config.ledger.path.clone()) {
        Some(path) => Ok(path),
        None => bail!("No ledger file: pass --ledger or set POCKETWISE_LEDGER"),
    }
}

/// Load a ledger file with a helpful error
pub fn open_ledger(path: &Path) -> Result<Ledger> {
    Ledger::from_path(path).with_context(|| format!("Failed to load ledger {}", path.display()))
}

fn kind_icon(kind: InsightKind) -> &'static str {
    match kind {
        InsightKind::Warning => "⚠️ ",
        InsightKind::Suggestion => "💡",
        InsightKind::Info => "ℹ️ ",
        InsightKind::Success => "✅",
    }
}

/// Print insights as an indented list
pub fn print_insights(insights: &[Insight]) {
    if insights.is_empty() {
        println!("   (no insights - add income to see budget feedback)");
        return;
    }

    for insight in insights {
        println!(
            "   {} {} [{}]",
            kind_icon(insight.kind),
            insight.title,
            insight.priority
        );
        println!("      {}", insight.message);
        if let Some(name) = &insight.tracker_name {
            println!("      Tracker: {}", name);
        }
    }
}
