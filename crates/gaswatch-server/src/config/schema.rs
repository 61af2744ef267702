use std::net::SocketAddr;
use std::time::Duration;

use serde::Deserialize;

use gaswatch_core::error::{GasWatchError, Result};
use gaswatch_core::geo::DEFAULT_NEARBY_LIMIT;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub simulator: SimulatorSection,

    #[serde(default)]
    pub nearby: NearbySection,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            version: 1,
            server: ServerSection::default(),
            simulator: SimulatorSection::default(),
            nearby: NearbySection::default(),
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(GasWatchError::Config(format!(
                "unsupported config version {} (expected 1)",
                self.version
            )));
        }

        self.server.validate()?;
        self.simulator.validate()?;
        self.nearby.validate()?;

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    #[serde(default)]
    pub tls: TlsSection,

    #[serde(default = "default_shutdown_grace_ms")]
    pub shutdown_grace_ms: u64,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            tls: TlsSection::default(),
            shutdown_grace_ms: default_shutdown_grace_ms(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr()?;
        self.tls.validate()?;
        if self.shutdown_grace_ms > 60_000 {
            return Err(GasWatchError::Config(
                "server.shutdown_grace_ms must be at most 60000".into(),
            ));
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen
            .parse()
            .map_err(|e| GasWatchError::Config(format!("server.listen {:?} is not a socket address: {e}", self.listen)))
    }

    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_millis(self.shutdown_grace_ms)
    }
}

fn default_listen() -> String {
    "0.0.0.0:443".into()
}
fn default_shutdown_grace_ms() -> u64 {
    5000
}

/// PEM files loaded once at startup.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TlsSection {
    #[serde(default = "default_cert_path")]
    pub cert_path: String,
    #[serde(default = "default_key_path")]
    pub key_path: String,
}

impl Default for TlsSection {
    fn default() -> Self {
        Self {
            cert_path: default_cert_path(),
            key_path: default_key_path(),
        }
    }
}

impl TlsSection {
    pub fn validate(&self) -> Result<()> {
        if self.cert_path.trim().is_empty() {
            return Err(GasWatchError::Config("server.tls.cert_path must not be empty".into()));
        }
        if self.key_path.trim().is_empty() {
            return Err(GasWatchError::Config("server.tls.key_path must not be empty".into()));
        }
        Ok(())
    }
}

fn default_cert_path() -> String {
    "server.crt".into()
}
fn default_key_path() -> String {
    "server.key".into()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulatorSection {
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    #[serde(default = "default_update_interval_ms")]
    pub update_interval_ms: u64,

    /// Half-width of the uniform price perturbation.
    #[serde(default = "default_max_delta")]
    pub max_delta: f64,
}

impl Default for SimulatorSection {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            update_interval_ms: default_update_interval_ms(),
            max_delta: default_max_delta(),
        }
    }
}

impl SimulatorSection {
    pub fn validate(&self) -> Result<()> {
        if !(100..=3_600_000).contains(&self.update_interval_ms) {
            return Err(GasWatchError::Config(
                "simulator.update_interval_ms must be between 100 and 3600000".into(),
            ));
        }
        if !self.max_delta.is_finite() || self.max_delta <= 0.0 || self.max_delta > 10.0 {
            return Err(GasWatchError::Config(
                "simulator.max_delta must be greater than 0 and at most 10".into(),
            ));
        }
        Ok(())
    }

    pub fn update_interval(&self) -> Duration {
        Duration::from_millis(self.update_interval_ms)
    }
}

fn default_enabled() -> bool {
    true
}
fn default_update_interval_ms() -> u64 {
    5000
}
fn default_max_delta() -> f64 {
    0.05
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NearbySection {
    #[serde(default = "default_nearby_limit")]
    pub limit: usize,
}

impl Default for NearbySection {
    fn default() -> Self {
        Self {
            limit: default_nearby_limit(),
        }
    }
}

impl NearbySection {
    pub fn validate(&self) -> Result<()> {
        if !(1..=100).contains(&self.limit) {
            return Err(GasWatchError::Config("nearby.limit must be between 1 and 100".into()));
        }
        Ok(())
    }
}

fn default_nearby_limit() -> usize {
    DEFAULT_NEARBY_LIMIT
}
