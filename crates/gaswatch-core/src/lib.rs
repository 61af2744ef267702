//! gaswatch core: domain model, error taxonomy, and nearby-distance math.
//!
//! This crate carries no transport or runtime dependencies; the server crate
//! layers storage, simulation and HTTP on top of it.
//!
//! Panics, `unwrap`, and `expect` are compile-denied here. All fallible paths
//! surface as `GasWatchError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod geo;
pub mod model;
pub mod wire;

/// Shared result type.
pub use error::{ClientCode, GasWatchError, Result};
pub use model::{
    CreateUserRequest, GasStation, GasStationWithHistory, History, HistoryRecord, Location, Prices, User,
    UserResponse,
};
