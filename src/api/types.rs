//! API response types

use serde::Serialize;

use crate::actors::messages::PollStatus;

/// Overall exporter health
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// Last poll succeeded (or no poll has finished yet)
    Ok,
    /// Last poll failed, samples may be stale
    Degraded,
    /// Poller is not reachable
    Down,
}

impl HealthStatus {
    pub fn from_poll_status(status: Option<&PollStatus>) -> Self {
        match status {
            None => HealthStatus::Down,
            Some(status) if status.last_error.is_some() => HealthStatus::Degraded,
            Some(_) => HealthStatus::Ok,
        }
    }
}

/// Response of `GET /health`
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub timestamp: String,
    pub neighbors: usize,
    pub poll: Option<PollStatus>,
}
