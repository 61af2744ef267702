//! gaswatch server library entry.
//!
//! Wires the store, price simulator, HTTP handlers and ops endpoints into one
//! service. Consumed by the binary (`main.rs`) and by integration tests.

pub mod api;
pub mod app_state;
pub mod config;
pub mod obs;
pub mod ops;
pub mod router;
pub mod serve;
pub mod simulator;
pub mod store;
