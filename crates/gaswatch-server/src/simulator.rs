//! Background price simulator.
//!
//! Every tick each station's prices are nudged by a uniform random delta and
//! committed through the store as one update (which also appends history).
//! A station that vanishes between snapshot and commit is logged and skipped.

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use gaswatch_core::error::Result;
use gaswatch_core::Prices;

use crate::obs::ServerMetrics;
use crate::store::Store;

/// Outcome of one simulation cycle.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CycleReport {
    pub updated: usize,
    pub skipped: usize,
}

/// Return `prices` with every fuel moved by `U(-max_delta, max_delta)`.
pub fn perturb<R: Rng>(prices: &Prices, max_delta: f64, rng: &mut R) -> Prices {
    prices
        .iter()
        .map(|(fuel, price)| {
            let delta = if max_delta > 0.0 {
                rng.random_range(-max_delta..=max_delta)
            } else {
                0.0
            };
            (fuel.clone(), price + delta)
        })
        .collect()
}

pub struct PriceSimulator {
    store: Arc<dyn Store>,
    metrics: Arc<ServerMetrics>,
    interval: Duration,
    max_delta: f64,
}

impl PriceSimulator {
    pub fn new(store: Arc<dyn Store>, metrics: Arc<ServerMetrics>, interval: Duration, max_delta: f64) -> Self {
        Self {
            store,
            metrics,
            interval,
            max_delta,
        }
    }

    /// One pass over a snapshot of all stations.
    pub fn run_cycle_with<R: Rng>(&self, rng: &mut R) -> Result<CycleReport> {
        let mut stations: Vec<_> = self.store.get_all_gas_stations()?.into_values().collect();
        stations.sort_by(|a, b| a.name.cmp(&b.name));

        let mut report = CycleReport::default();
        for station in stations {
            let update = perturb(&station.prices, self.max_delta, rng);
            match self.store.add_price_to_gas_station(&station.name, update.clone()) {
                Ok(()) => {
                    debug!(station = %station.name, prices = ?update, "price updated");
                    self.metrics.price_updates.inc(&[("outcome", "updated")]);
                    report.updated += 1;
                }
                Err(e) => {
                    warn!(station = %station.name, error = %e, "price update skipped");
                    self.metrics.price_updates.inc(&[("outcome", "skipped")]);
                    report.skipped += 1;
                }
            }
        }

        self.metrics.simulator_cycles.inc(&[]);
        Ok(report)
    }

    pub fn run_cycle(&self) -> Result<CycleReport> {
        self.run_cycle_with(&mut rand::rng())
    }

    /// Run until `cancel` fires. The first cycle runs immediately; each
    /// later one starts a full `interval` after the previous one finished.
    pub fn spawn(self, cancel: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(async move {
            info!(interval_ms = self.interval.as_millis() as u64, max_delta = self.max_delta, "price simulator started");

            while !cancel.is_cancelled() {
                match self.run_cycle() {
                    Ok(r) => debug!(updated = r.updated, skipped = r.skipped, "price cycle done"),
                    Err(e) => warn!(error = %e, "price cycle failed"),
                }

                tokio::select! {
                    _ = cancel.cancelled() => {}
                    _ = sleep(self.interval) => {}
                }
            }
            info!("price simulator cancelled, shutting down");
        })
    }
}
