//! Axum router wiring.
//!
//! `/gas-stations/nearby` is a static segment and wins over `/gas-stations/:name`.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::{api, app_state::AppState, obs, ops};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/users", post(api::users::create_user).get(api::users::list_users))
        .route("/gas-stations", post(api::stations::create_gas_station))
        .route("/gas-stations/nearby", get(api::stations::nearby))
        .route("/gas-stations/:name", get(api::stations::get_gas_station))
        .route("/healthz", get(ops::healthz))
        .route("/readyz", get(ops::readyz))
        .route("/metrics", get(ops::metrics))
        .route_layer(middleware::from_fn_with_state(state.clone(), obs::track_requests))
        .with_state(state)
}
