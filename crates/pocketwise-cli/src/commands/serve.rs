//! Server command implementation

use std::path::Path;

use anyhow::Result;
use pocketwise_core::Config;
use pocketwise_server::ServerConfig;

use super::open_ledger;

pub async fn cmd_serve(
    config: &Config,
    ledger_path: &Path,
    host: Option<&str>,
    port: Option<u16>,
) -> Result<()> {
    let ledger = open_ledger(ledger_path)?;
    let host = host.unwrap_or(config.server.host.as_str());
    let port = port.unwrap_or(config.server.port);

    println!("🚀 Starting Pocketwise web server...");
    println!("   Ledger: {}", ledger_path.display());
    println!(
        "   Trackers: {}   Transactions: {}",
        ledger.trackers.len(),
        ledger.transactions.len()
    );
    println!("   Listening: http://{}:{}", host, port);
    if let Some(source) = &config.source {
        println!("   Config: {}", source.display());
    }
    if !config.server.allowed_origins.is_empty() {
        println!(
            "   🌐 Allowed origins: {}",
            config.server.allowed_origins.join(", ")
        );
    }
    println!();

    let server_config = ServerConfig {
        allowed_origins: config.server.allowed_origins.clone(),
    };
    pocketwise_server::serve(ledger, host, port, server_config).await
}
