//! JSON handlers over the store.

pub mod error;
pub mod stations;
pub mod users;

use axum::{body::Bytes, extract::rejection::BytesRejection};
use serde::de::DeserializeOwned;

use gaswatch_core::GasWatchError;

pub use error::{ApiError, ErrorBody};

/// Decode a request body as JSON whatever its `Content-Type` says.
pub(crate) fn decode_json<T: DeserializeOwned>(body: Result<Bytes, BytesRejection>) -> Result<T, ApiError> {
    let bytes = body?;
    serde_json::from_slice(&bytes).map_err(|e| {
        tracing::debug!(error = %e, "json body rejected");
        ApiError(GasWatchError::BadRequest("Invalid JSON".into()))
    })
}
