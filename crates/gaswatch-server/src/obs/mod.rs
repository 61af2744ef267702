//! Lightweight in-process metrics and the request-tracking middleware that
//! feeds them. Rendered by the `/metrics` handler.

pub mod metrics;

use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::Response,
};

use crate::app_state::AppState;

pub use metrics::ServerMetrics;

/// Count and time every routed request, labelled by route template.
pub async fn track_requests(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());
    let method = req.method().to_string();

    let started = Instant::now();
    let resp = next.run(req).await;
    let elapsed = started.elapsed();

    let status = resp.status().as_u16().to_string();
    let metrics = state.metrics();
    metrics
        .http_requests
        .inc(&[("route", &route), ("method", &method), ("status", &status)]);
    metrics.http_duration.observe(&[("route", &route)], elapsed);

    tracing::debug!(%method, %route, %status, elapsed_us = elapsed.as_micros() as u64, "request");
    resp
}
