use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::{SystemTime, UNIX_EPOCH};

use gaswatch_core::error::{GasWatchError, Result};
use gaswatch_core::{GasStation, GasStationWithHistory, History, HistoryRecord, Prices, User};

use super::{HistoryStore, StationStore, UserStore};

#[derive(Default)]
struct Tables {
    users: HashMap<String, User>,
    stations: HashMap<String, GasStation>,
    histories: HashMap<String, History>,
}

/// Process-lifetime store. One mutex guards all three tables.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>> {
        self.tables
            .lock()
            .map_err(|_| GasWatchError::Internal("store lock poisoned".into()))
    }
}

fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or_default()
}

impl UserStore for MemoryStore {
    fn create_user(&self, user: User) -> Result<()> {
        let mut t = self.lock()?;
        t.users.insert(user.email.clone(), user);
        Ok(())
    }

    fn get_all_users(&self) -> Result<HashMap<String, User>> {
        Ok(self.lock()?.users.clone())
    }

    fn user_count(&self) -> Result<usize> {
        Ok(self.lock()?.users.len())
    }
}

impl StationStore for MemoryStore {
    fn create_gas_station(&self, station: GasStation) -> Result<()> {
        let mut t = self.lock()?;
        // Re-creating a station keeps whatever history it already has.
        t.histories.entry(station.name.clone()).or_default();
        t.stations.insert(station.name.clone(), station);
        Ok(())
    }

    fn get_gas_station(&self, name: &str) -> Result<GasStation> {
        self.lock()?
            .stations
            .get(name)
            .cloned()
            .ok_or_else(|| GasWatchError::station_not_found(name))
    }

    fn add_price_to_gas_station(&self, name: &str, update: Prices) -> Result<()> {
        let mut guard = self.lock()?;
        let t = &mut *guard;

        let station = t
            .stations
            .get_mut(name)
            .ok_or_else(|| GasWatchError::station_not_found(name))?;
        station.merge_prices(&update);

        t.histories.entry(name.to_string()).or_default().push(HistoryRecord {
            timestamp: unix_now(),
            prices: update,
        });
        Ok(())
    }

    fn get_all_gas_stations(&self) -> Result<HashMap<String, GasStation>> {
        Ok(self.lock()?.stations.clone())
    }

    fn station_count(&self) -> Result<usize> {
        Ok(self.lock()?.stations.len())
    }
}

impl HistoryStore for MemoryStore {
    fn get_history(&self, name: &str) -> Result<History> {
        let t = self.lock()?;
        if !t.stations.contains_key(name) {
            return Err(GasWatchError::station_not_found(name));
        }
        Ok(t.histories.get(name).cloned().unwrap_or_default())
    }

    fn get_all_histories(&self) -> Result<HashMap<String, History>> {
        Ok(self.lock()?.histories.clone())
    }

    fn get_gas_station_with_history(&self, name: &str) -> Result<GasStationWithHistory> {
        let t = self.lock()?;
        let station = t
            .stations
            .get(name)
            .cloned()
            .ok_or_else(|| GasWatchError::station_not_found(name))?;
        let history = t.histories.get(name).cloned().unwrap_or_default();
        Ok(GasStationWithHistory { station, history })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::panic)]

    use std::panic::{catch_unwind, AssertUnwindSafe};

    use gaswatch_core::Location;

    use super::*;

    fn is_internal<T>(r: Result<T>) -> bool {
        matches!(r, Err(GasWatchError::Internal(_)))
    }

    #[test]
    fn poisoned_lock_surfaces_as_internal() {
        let store = MemoryStore::new();
        store
            .create_gas_station(GasStation::new("A", "", Location::new(0.0, 0.0), Prices::new()))
            .unwrap();

        let crashed = catch_unwind(AssertUnwindSafe(|| {
            let _guard = store.tables.lock().unwrap();
            panic!("writer died while holding the tables");
        }));
        assert!(crashed.is_err());
        assert!(store.tables.is_poisoned());

        assert!(is_internal(store.create_user(User::new("a", "a@x.io", "pw"))));
        assert!(is_internal(store.get_all_users()));
        assert!(is_internal(store.user_count()));
        assert!(is_internal(store.create_gas_station(GasStation::new(
            "B",
            "",
            Location::new(1.0, 1.0),
            Prices::new()
        ))));
        assert!(is_internal(store.get_gas_station("A")));
        assert!(is_internal(store.add_price_to_gas_station("A", Prices::new())));
        assert!(is_internal(store.get_all_gas_stations()));
        assert!(is_internal(store.station_count()));
        assert!(is_internal(store.get_history("A")));
        assert!(is_internal(store.get_all_histories()));
        assert!(is_internal(store.get_gas_station_with_history("A")));
    }
}
