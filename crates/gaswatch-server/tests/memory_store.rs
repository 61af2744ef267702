#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;
use std::thread;
use std::time::{SystemTime, UNIX_EPOCH};

use gaswatch_core::model::prices;
use gaswatch_core::{GasStation, GasWatchError, Location, User};
use gaswatch_server::store::{HistoryStore, MemoryStore, StationStore, UserStore};

fn station(name: &str, lat: f64, lon: f64, gas: f64) -> GasStation {
    GasStation::new(name, "Main St", Location::new(lat, lon), prices([("gas", gas)]))
}

fn now() -> i64 {
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_secs() as i64
}

#[test]
fn new_station_has_empty_history() {
    let store = MemoryStore::new();
    store.create_gas_station(station("A", 0.0, 0.0, 1.0)).unwrap();

    assert!(store.get_history("A").unwrap().is_empty());
    let all = store.get_all_histories().unwrap();
    assert_eq!(all.get("A").map(Vec::len), Some(0));
}

#[test]
fn add_price_merges_and_records_supplied_prices() {
    let store = MemoryStore::new();
    store.create_gas_station(station("A", 0.0, 0.0, 1.0)).unwrap();

    let before = now();
    let update = prices([("gas", 1.2), ("diesel", 0.9)]);
    store.add_price_to_gas_station("A", update.clone()).unwrap();
    let after = now();

    let st = store.get_gas_station("A").unwrap();
    assert_eq!(st.prices, prices([("gas", 1.2), ("diesel", 0.9)]));

    let history = store.get_history("A").unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].prices, update);
    assert!(history[0].timestamp >= before && history[0].timestamp <= after);
}

#[test]
fn partial_update_leaves_other_fuels_and_records_only_delta() {
    let store = MemoryStore::new();
    store
        .create_gas_station(GasStation::new(
            "A",
            "",
            Location::new(0.0, 0.0),
            prices([("gas", 1.0), ("diesel", 0.8)]),
        ))
        .unwrap();

    store.add_price_to_gas_station("A", prices([("gas", 1.1)])).unwrap();

    let st = store.get_gas_station("A").unwrap();
    assert_eq!(st.prices, prices([("gas", 1.1), ("diesel", 0.8)]));
    assert_eq!(store.get_history("A").unwrap()[0].prices, prices([("gas", 1.1)]));
}

#[test]
fn n_updates_give_last_writer_wins_and_n_records_in_order() {
    let store = MemoryStore::new();
    store.create_gas_station(station("A", 0.0, 0.0, 1.0)).unwrap();

    let updates = vec![
        prices([("gas", 1.1)]),
        prices([("diesel", 0.9), ("gas", 1.2)]),
        prices([("lpg", 0.5)]),
        prices([("diesel", 1.0)]),
    ];
    for u in &updates {
        store.add_price_to_gas_station("A", u.clone()).unwrap();
    }

    let st = store.get_gas_station("A").unwrap();
    assert_eq!(st.prices, prices([("gas", 1.2), ("diesel", 1.0), ("lpg", 0.5)]));

    let history = store.get_history("A").unwrap();
    let recorded: Vec<_> = history.iter().map(|r| r.prices.clone()).collect();
    assert_eq!(recorded, updates);
}

#[test]
fn add_price_to_missing_station_is_not_found_without_history() {
    let store = MemoryStore::new();
    let err = store
        .add_price_to_gas_station("missing", prices([("gas", 1.0)]))
        .expect_err("must fail");
    assert!(matches!(err, GasWatchError::NotFound(_)));
    assert!(store.get_all_histories().unwrap().is_empty());
}

#[test]
fn get_missing_station_is_not_found_without_side_effects() {
    let store = MemoryStore::new();
    store.create_gas_station(station("A", 0.0, 0.0, 1.0)).unwrap();

    assert!(matches!(store.get_gas_station("missing"), Err(GasWatchError::NotFound(_))));
    assert!(matches!(store.get_history("missing"), Err(GasWatchError::NotFound(_))));
    assert!(matches!(
        store.get_gas_station_with_history("missing"),
        Err(GasWatchError::NotFound(_))
    ));
    assert_eq!(store.station_count().unwrap(), 1);
    assert_eq!(store.get_all_histories().unwrap().len(), 1);
}

#[test]
fn snapshots_are_detached_from_store() {
    let store = MemoryStore::new();
    store.create_gas_station(station("A", 0.0, 0.0, 1.0)).unwrap();
    store.create_user(User::new("Ana", "ana@x.io", "pw")).unwrap();

    let mut stations = store.get_all_gas_stations().unwrap();
    stations.get_mut("A").unwrap().prices.insert("gas".into(), 99.0);
    stations.remove("A");

    let mut users = store.get_all_users().unwrap();
    users.clear();

    let mut histories = store.get_all_histories().unwrap();
    histories.get_mut("A").unwrap().push(gaswatch_core::HistoryRecord {
        timestamp: 0,
        prices: prices([("gas", 0.0)]),
    });

    assert_eq!(store.get_gas_station("A").unwrap().prices, prices([("gas", 1.0)]));
    assert_eq!(store.user_count().unwrap(), 1);
    assert!(store.get_history("A").unwrap().is_empty());
}

#[test]
fn duplicate_create_overwrites() {
    let store = MemoryStore::new();
    store.create_user(User::new("Ana", "ana@x.io", "pw1")).unwrap();
    store.create_user(User::new("Ana B", "ana@x.io", "pw2")).unwrap();
    store.create_user(User::new("Ana", "ANA@x.io", "pw3")).unwrap();

    let users = store.get_all_users().unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users["ana@x.io"].name, "Ana B");

    store.create_gas_station(station("A", 0.0, 0.0, 1.0)).unwrap();
    store.add_price_to_gas_station("A", prices([("gas", 1.5)])).unwrap();
    store.create_gas_station(station("A", 5.0, 5.0, 2.0)).unwrap();

    let with_history = store.get_gas_station_with_history("A").unwrap();
    assert_eq!(with_history.station.location, Location::new(5.0, 5.0));
    assert_eq!(with_history.station.prices, prices([("gas", 2.0)]));
    assert_eq!(with_history.history.len(), 1);
}

#[test]
fn concurrent_updates_keep_history_consistent() {
    let store = Arc::new(MemoryStore::new());
    store.create_gas_station(station("A", 0.0, 0.0, 1.0)).unwrap();

    let writers: Vec<_> = (0..8)
        .map(|i| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for j in 0..50 {
                    let fuel = format!("f{i}");
                    store
                        .add_price_to_gas_station("A", prices([(fuel, j as f64)]))
                        .unwrap();
                }
            })
        })
        .collect();

    let reader = {
        let store = Arc::clone(&store);
        thread::spawn(move || {
            for _ in 0..200 {
                let v = store.get_gas_station_with_history("A").unwrap();
                // Every recorded fuel is already merged into the station.
                for rec in &v.history {
                    for fuel in rec.prices.keys() {
                        assert!(v.station.prices.contains_key(fuel));
                    }
                }
            }
        })
    };

    for w in writers {
        w.join().unwrap();
    }
    reader.join().unwrap();

    let st = store.get_gas_station("A").unwrap();
    assert_eq!(store.get_history("A").unwrap().len(), 8 * 50);
    for i in 0..8 {
        assert_eq!(st.prices[&format!("f{i}")], 49.0);
    }
}
