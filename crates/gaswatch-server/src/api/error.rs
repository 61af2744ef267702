//! HTTP error mapping.
//!
//! Every failure leaves the server as `{"Err": "...", "Status": <code>}` with
//! the matching status line.

use axum::{
    extract::rejection::{BytesRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use gaswatch_core::{ClientCode, GasWatchError};

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    #[serde(rename = "Err")]
    pub err: String,
    #[serde(rename = "Status")]
    pub status: u16,
}

#[derive(Debug)]
pub struct ApiError(pub GasWatchError);

impl From<GasWatchError> for ApiError {
    fn from(e: GasWatchError) -> Self {
        ApiError(e)
    }
}

impl From<BytesRejection> for ApiError {
    fn from(e: BytesRejection) -> Self {
        tracing::debug!(error = %e, "request body unreadable");
        ApiError(GasWatchError::BadRequest("Invalid JSON".into()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(e: QueryRejection) -> Self {
        ApiError(GasWatchError::BadRequest(format!("Invalid query: {e}")))
    }
}

impl From<PathRejection> for ApiError {
    fn from(e: PathRejection) -> Self {
        ApiError(GasWatchError::BadRequest(format!("Invalid path: {e}")))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.0.client_code();
        let status = StatusCode::from_u16(code.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let err = match code {
            ClientCode::Internal => {
                tracing::error!(error = %self.0, "request failed");
                "Error".to_string()
            }
            _ => {
                tracing::warn!(error = %self.0, code = code.as_str(), "request rejected");
                self.0.to_string()
            }
        };

        (status, Json(ErrorBody { err, status: status.as_u16() })).into_response()
    }
}
