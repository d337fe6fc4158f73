//! Health check endpoint

use axum::{Json, extract::State};
use tracing::warn;

use crate::api::{ApiState, HealthResponse, types::HealthStatus};

/// GET /health
///
/// Reports the outcome of the latest poll and how many neighbors are held
pub async fn health_check(State(state): State<ApiState>) -> Json<HealthResponse> {
    let poll = state.poller.status();
    if poll.is_none() {
        warn!("poller has stopped");
    }

    Json(HealthResponse {
        status: HealthStatus::from_poll_status(poll.as_ref()),
        timestamp: chrono::Utc::now().to_rfc3339(),
        neighbors: state.store.len().await,
        poll,
    })
}
