//! Shared error type across gaswatch crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Unknown station (or other keyed entity).
    NotFound,
    /// Malformed body or query parameters.
    BadRequest,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in logs and metrics labels.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::NotFound => "NOT_FOUND",
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::Internal => "INTERNAL",
        }
    }

    /// HTTP status the code is reported with.
    pub fn http_status(self) -> u16 {
        match self {
            ClientCode::NotFound => 404,
            ClientCode::BadRequest => 400,
            ClientCode::Internal => 500,
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, GasWatchError>;

/// Unified error type used by core and server.
#[derive(Debug, Error)]
pub enum GasWatchError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("internal: {0}")]
    Internal(String),
    #[error("invalid config: {0}")]
    Config(String),
}

impl GasWatchError {
    /// Convenience constructor for the store's "unknown station" failure.
    pub fn station_not_found(name: &str) -> Self {
        GasWatchError::NotFound(format!("gas station not found: {name}"))
    }

    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            GasWatchError::NotFound(_) => ClientCode::NotFound,
            GasWatchError::BadRequest(_) => ClientCode::BadRequest,
            GasWatchError::Internal(_) | GasWatchError::Config(_) => ClientCode::Internal,
        }
    }
}
