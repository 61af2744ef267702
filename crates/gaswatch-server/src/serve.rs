//! TLS listener, background simulator and graceful shutdown.

use axum_server::tls_rustls::RustlsConfig;
use axum_server::Handle;
use tokio_util::sync::CancellationToken;

use gaswatch_core::error::{GasWatchError, Result};

use crate::app_state::AppState;
use crate::config::ServerConfig;
use crate::router;

/// Serve until Ctrl-C / SIGTERM, then drain.
pub async fn run(cfg: ServerConfig) -> Result<()> {
    let listen = cfg.server.listen_addr()?;
    let grace = cfg.server.shutdown_grace();

    let tls = RustlsConfig::from_pem_file(&cfg.server.tls.cert_path, &cfg.server.tls.key_path)
        .await
        .map_err(|e| {
            GasWatchError::Config(format!(
                "load tls cert {} / key {} failed: {e}",
                cfg.server.tls.cert_path, cfg.server.tls.key_path
            ))
        })?;

    let state = AppState::new(cfg);
    let cancel = CancellationToken::new();

    let simulator = if state.cfg().simulator.enabled {
        Some(state.price_simulator().spawn(cancel.clone()))
    } else {
        tracing::info!("price simulator disabled");
        None
    };

    let handle = Handle::new();
    tokio::spawn({
        let state = state.clone();
        let cancel = cancel.clone();
        let handle = handle.clone();
        async move {
            shutdown_signal().await;
            tracing::info!(grace_ms = grace.as_millis() as u64, "shutdown requested, draining");
            state.set_draining();
            cancel.cancel();
            handle.graceful_shutdown(Some(grace));
        }
    });

    tracing::info!(
        %listen,
        cert = %state.cfg().server.tls.cert_path,
        key = %state.cfg().server.tls.key_path,
        "gaswatch-server starting"
    );

    let app = router::build_router(state);
    let served = axum_server::bind_rustls(listen, tls)
        .handle(handle)
        .serve(app.into_make_service())
        .await
        .map_err(|e| GasWatchError::Internal(format!("server failed: {e}")));

    // Listener is gone either way; make sure the simulator stops too.
    cancel.cancel();
    if let Some(task) = simulator {
        if let Err(e) = task.await {
            tracing::warn!(error = %e, "price simulator task ended abnormally");
        }
    }

    served
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "ctrl-c handler unavailable");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "SIGTERM handler unavailable");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
