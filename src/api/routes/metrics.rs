//! Prometheus scrape endpoint

use axum::{extract::State, http::header, response::IntoResponse};
use tracing::trace;

use crate::api::{ApiResult, ApiState};

/// GET /metrics
///
/// Encodes the current store snapshot plus the exporter's own metrics
pub async fn metrics(State(state): State<ApiState>) -> ApiResult<impl IntoResponse> {
    let neighbors = state.store.snapshot().await;
    trace!("rendering {} neighbors", neighbors.len());

    let body = state.metrics.render(&neighbors)?;

    Ok(([(header::CONTENT_TYPE, prometheus::TEXT_FORMAT)], body))
}
