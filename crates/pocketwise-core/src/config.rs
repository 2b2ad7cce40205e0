//! Application configuration
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a two-layer resolution:
//! 1. An explicit path, else the override in the data dir
//!    (~/.local/share/pocketwise/config.toml)
//! 2. Fall back to embedded defaults (compiled into binary)
//!
//! Environment variables then override individual keys:
//! `POCKETWISE_LEDGER` and `POCKETWISE_ALLOWED_ORIGINS` (comma-separated).

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/pocketwise.toml");

pub const LEDGER_ENV: &str = "POCKETWISE_LEDGER";
pub const ALLOWED_ORIGINS_ENV: &str = "POCKETWISE_ALLOWED_ORIGINS";

#[derive(Debug, Clone, PartialEq)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Allowed CORS origins (empty = same-origin only)
    pub allowed_origins: Vec<String>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            allowed_origins: vec![],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LedgerSettings {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub server: ServerSettings,
    pub ledger: LedgerSettings,
    /// File the config was read from (`None` = embedded defaults)
    pub source: Option<PathBuf>,
}

impl Config {
    /// Load configuration and apply environment overrides
    pub fn load(override_path: Option<&Path>) -> Result<Self> {
        let mut config = load_config(override_path)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Apply overrides from a key lookup (the process environment in practice)
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup(LEDGER_ENV).filter(|p| !p.trim().is_empty()) {
            self.ledger.path = Some(PathBuf::from(path.trim()));
        }
        if let Some(origins) = lookup(ALLOWED_ORIGINS_ENV) {
            self.server.allowed_origins = origins
                .split(',')
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect();
        }
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("pocketwise").join("config.toml"))
}

/// Load configuration (override first, then default)
fn load_config(override_path: Option<&Path>) -> Result<Config> {
    let candidate = match override_path {
        Some(path) => {
            if !path.exists() {
                tracing::warn!(path = %path.display(), "Config file not found, using defaults");
            }
            Some(path.to_path_buf())
        }
        None => default_config_path(),
    };

    match candidate.filter(|p| p.exists()) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .map_err(|e| Error::Config(format!("Failed to read config: {}", e)))?;
            let mut config = parse_config(&content)?;
            config.source = Some(path);
            Ok(config)
        }
        None => parse_config(DEFAULT_CONFIG),
    }
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    server: Option<RawServer>,
    ledger: Option<RawLedger>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawServer {
    host: Option<String>,
    port: Option<u16>,
    allowed_origins: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawLedger {
    path: Option<PathBuf>,
}

/// Parse config from TOML content
fn parse_config(content: &str) -> Result<Config> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

    let mut config = Config::default();

    if let Some(server) = raw.server {
        if let Some(host) = server.host {
            config.server.host = host;
        }
        if let Some(port) = server.port {
            config.server.port = port;
        }
        if let Some(origins) = server.allowed_origins {
            config.server.allowed_origins = origins;
        }
    }

    if let Some(ledger) = raw.ledger {
        config.ledger.path = ledger.path;
    }

    Ok(config)
}
