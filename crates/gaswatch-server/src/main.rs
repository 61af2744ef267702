//! gaswatch server
//!
//! - Gas stations, fuel prices and price history over HTTPS/JSON
//! - Background price simulator
//! - Config from `$GASWATCH_CONFIG` (default `gaswatch.yaml`)

use std::process::ExitCode;

use tracing_subscriber::{fmt, EnvFilter};

use gaswatch_server::{config, serve};

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    let path = config::config_path();
    let cfg = match config::load_from_file(&path) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!(%path, error = %e, "config load failed");
            return ExitCode::FAILURE;
        }
    };

    match serve::run(cfg).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "gaswatch-server stopped");
            ExitCode::FAILURE
        }
    }
}
