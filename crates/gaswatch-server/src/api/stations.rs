use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use gaswatch_core::geo;
use gaswatch_core::{GasStation, GasStationWithHistory, GasWatchError, Location};

use super::{decode_json, error::ApiError};
use crate::app_state::AppState;

/// Raw query; parsed by hand so a bad value yields "Invalid lat" rather than
/// a generic deserializer message.
#[derive(Debug, Deserialize)]
pub struct NearbyQuery {
    pub lat: Option<String>,
    pub lon: Option<String>,
}

fn parse_coord(raw: Option<&str>, field: &str) -> Result<f64, GasWatchError> {
    raw.and_then(|s| s.parse::<f64>().ok())
        .ok_or_else(|| GasWatchError::BadRequest(format!("Invalid {field}")))
}

/// `POST /gas-stations`
pub async fn create_gas_station(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<(StatusCode, Json<GasStation>), ApiError> {
    let station: GasStation = decode_json(body)?;

    state.store().create_gas_station(station.clone())?;
    tracing::info!(station = %station.name, fuels = station.prices.len(), "gas station created");

    Ok((StatusCode::CREATED, Json(station)))
}

/// `GET /gas-stations/nearby?lat=&lon=`
pub async fn nearby(
    State(state): State<AppState>,
    query: Result<Query<NearbyQuery>, QueryRejection>,
) -> Result<Json<Vec<GasStation>>, ApiError> {
    let Query(q) = query?;
    let lat = parse_coord(q.lat.as_deref(), "lat")?;
    let lon = parse_coord(q.lon.as_deref(), "lon")?;

    let stations = state.store().get_all_gas_stations()?;
    let out = geo::nearest(stations.into_values(), Location::new(lat, lon), state.cfg().nearby.limit);
    Ok(Json(out))
}

/// `GET /gas-stations/{name}`
pub async fn get_gas_station(
    State(state): State<AppState>,
    name: Result<Path<String>, PathRejection>,
) -> Result<Json<GasStationWithHistory>, ApiError> {
    let Path(name) = name?;
    let out = state.store().get_gas_station_with_history(&name)?;
    Ok(Json(out))
}
