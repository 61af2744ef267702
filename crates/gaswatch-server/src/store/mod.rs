//! Storage capabilities.
//!
//! Handlers and the price simulator only see these traits. `MemoryStore` is
//! the one adapter today; a persistent backend would implement the same three
//! traits and be handed to `AppState::with_store`.
//!
//! Every method is synchronous and returns a snapshot the caller owns.

mod memory;

use std::collections::HashMap;

use gaswatch_core::error::Result;
use gaswatch_core::{GasStation, GasStationWithHistory, History, Prices, User};

pub use memory::MemoryStore;

/// Users keyed by email.
pub trait UserStore: Send + Sync {
    /// Insert, or overwrite the user with the same email.
    fn create_user(&self, user: User) -> Result<()>;
    fn get_all_users(&self) -> Result<HashMap<String, User>>;
    fn user_count(&self) -> Result<usize>;
}

/// Gas stations keyed by name.
pub trait StationStore: Send + Sync {
    /// Insert, or overwrite the station with the same name.
    fn create_gas_station(&self, station: GasStation) -> Result<()>;
    fn get_gas_station(&self, name: &str) -> Result<GasStation>;
    /// Merge `update` into the station's prices and append one history record
    /// holding exactly `update`. Both happen under the same critical section.
    fn add_price_to_gas_station(&self, name: &str, update: Prices) -> Result<()>;
    fn get_all_gas_stations(&self) -> Result<HashMap<String, GasStation>>;
    fn station_count(&self) -> Result<usize>;
}

/// Append-only price histories keyed by station name.
pub trait HistoryStore: Send + Sync {
    fn get_history(&self, name: &str) -> Result<History>;
    fn get_all_histories(&self) -> Result<HashMap<String, History>>;
    /// Station and its history read together, so they describe the same moment.
    fn get_gas_station_with_history(&self, name: &str) -> Result<GasStationWithHistory>;
}

/// Everything the server needs from a backend.
pub trait Store: UserStore + StationStore + HistoryStore {}

impl<T> Store for T where T: UserStore + StationStore + HistoryStore {}
