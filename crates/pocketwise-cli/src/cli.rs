//! CLI argument definitions using clap
//!
//! This module contains the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Pocketwise - Budget insights for your trackers
#[derive(Parser)]
#[command(name = "pocketwise")]
#[command(about = "Personal finance tracker with budget insights", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file (defaults to ~/.local/share/pocketwise/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate insights for one tracker from a JSON input file
    Analyze {
        /// JSON file with id, name, summary and categorySpending
        #[arg(short, long)]
        input: PathBuf,

        /// Show every ranked candidate instead of the surfaced one or two
        #[arg(long)]
        all_candidates: bool,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show per-tracker and combined insights for a user
    Dashboard {
        /// Ledger file (defaults to config / POCKETWISE_LEDGER)
        #[arg(short, long)]
        ledger: Option<PathBuf>,

        /// User id whose trackers to include
        #[arg(short, long)]
        user: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show tracker summaries and category breakdowns for a user
    Summary {
        /// Ledger file (defaults to config / POCKETWISE_LEDGER)
        #[arg(short, long)]
        ledger: Option<PathBuf>,

        /// User id whose trackers to include
        #[arg(short, long)]
        user: String,
    },

    /// Classify category labels into budget archetypes
    Classify {
        /// Labels to classify (e.g. "🛒 Groceries")
        #[arg(required = true)]
        labels: Vec<String>,
    },

    /// Show the recommended budget bands
    Budgets,

    /// Start the web server
    Serve {
        /// Port to listen on (defaults to config)
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (defaults to config)
        #[arg(long)]
        host: Option<String>,

        /// Ledger file (defaults to config / POCKETWISE_LEDGER)
        #[arg(short, long)]
        ledger: Option<PathBuf>,
    },
}
