//! Server config loader (strict parsing).

pub mod schema;

use std::fs;

use gaswatch_core::error::{GasWatchError, Result};

pub use schema::{NearbySection, ServerConfig, ServerSection, SimulatorSection, TlsSection};

/// Environment variable that overrides the config file location.
pub const CONFIG_PATH_ENV: &str = "GASWATCH_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "gaswatch.yaml";

/// Resolve the config path from the environment, falling back to `gaswatch.yaml`.
pub fn config_path() -> String {
    std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string())
}

pub fn load_from_file(path: &str) -> Result<ServerConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| GasWatchError::Config(format!("read config {path} failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<ServerConfig> {
    let cfg: ServerConfig = serde_yaml::from_str(s)
        .map_err(|e| GasWatchError::Config(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
