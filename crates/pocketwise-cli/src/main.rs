//! Pocketwise CLI - Budget insights for personal finance trackers
//!
//! Usage:
//!   pocketwise analyze --input tracker.json        Insights for one tracker
//!   pocketwise dashboard --ledger L --user alice   Insights across trackers
//!   pocketwise classify "🛒 Groceries"             Classify category labels
//!   pocketwise serve --port 3000                   Start web server

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use pocketwise_core::Config;

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    tracing::debug!(source = ?config.source, "Configuration loaded");

    match cli.command {
        Commands::Analyze {
            input,
            all_candidates,
            json,
        } => commands::cmd_analyze(&input, all_candidates, json),
        Commands::Dashboard { ledger, user, json } => {
            let path = commands::resolve_ledger(ledger.as_deref(), &config)?;
            commands::cmd_dashboard(&path, &user, json).await
        }
        Commands::Summary { ledger, user } => {
            let path = commands::resolve_ledger(ledger.as_deref(), &config)?;
            commands::cmd_summary(&path, &user)
        }
        Commands::Classify { labels } => commands::cmd_classify(&labels),
        Commands::Budgets => commands::cmd_budgets(),
        Commands::Serve { port, host, ledger } => {
            let path = commands::resolve_ledger(ledger.as_deref(), &config)?;
            commands::cmd_serve(&config, &path, host.as_deref(), port).await
        }
    }
}
