//! Shared application state for the gaswatch server.
//!
//! One store instance is shared by every request handler and the price
//! simulator.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::obs::ServerMetrics;
use crate::simulator::PriceSimulator;
use crate::store::{MemoryStore, Store};

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    store: Arc<dyn Store>,
    metrics: Arc<ServerMetrics>,
}

struct AppStateInner {
    cfg: ServerConfig,
}

impl AppState {
    /// State backed by a fresh in-memory store.
    pub fn new(cfg: ServerConfig) -> Self {
        Self::with_store(cfg, Arc::new(MemoryStore::new()))
    }

    pub fn with_store(cfg: ServerConfig, store: Arc<dyn Store>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { cfg }),
            store,
            metrics: Arc::new(ServerMetrics::default()),
        }
    }

    pub fn cfg(&self) -> &ServerConfig {
        &self.inner.cfg
    }

    pub fn store(&self) -> Arc<dyn Store> {
        Arc::clone(&self.store)
    }

    pub fn metrics(&self) -> Arc<ServerMetrics> {
        Arc::clone(&self.metrics)
    }

    pub fn set_draining(&self) {
        self.metrics.set_draining();
    }

    pub fn is_draining(&self) -> bool {
        self.metrics.is_draining()
    }

    /// Store-derived gauges appended to the `/metrics` output.
    pub fn metrics_extra(&self) -> Vec<(&'static str, u64)> {
        let users = self.store.user_count().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "user count unavailable for metrics");
            0
        });
        let stations = self.store.station_count().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "station count unavailable for metrics");
            0
        });
        vec![("gaswatch_users", users as u64), ("gaswatch_gas_stations", stations as u64)]
    }

    /// Simulator wired to this state's store, metrics and config.
    pub fn price_simulator(&self) -> PriceSimulator {
        let sim = &self.cfg().simulator;
        PriceSimulator::new(self.store(), self.metrics(), sim.update_interval(), sim.max_delta)
    }
}
