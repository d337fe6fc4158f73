//! Message types for the poller actor

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::oneshot;

/// Commands that can be sent to a PollerActor
#[derive(Debug)]
pub enum PollerCommand {
    /// Poll right away, outside the interval timer
    PollNow {
        respond_to: oneshot::Sender<anyhow::Result<PollReport>>,
    },

    /// Stop polling. Stored samples are left as they are.
    Shutdown,
}

/// Result of one successful poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollReport {
    /// Records committed by this poll
    pub committed: usize,

    /// Neighbors held by the store after the poll
    pub known: usize,

    pub duration: Duration,
}

/// Running summary of poll outcomes, served by the health endpoint
#[derive(Debug, Clone, Default, Serialize)]
pub struct PollStatus {
    pub polls: u64,
    pub failures: u64,
    pub last_success: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
    pub last_error_timestamp: Option<DateTime<Utc>>,
}

impl PollStatus {
    pub fn record_success(&mut self) {
        self.polls += 1;
        self.last_success = Some(Utc::now());
        self.last_error = None;
        self.last_error_timestamp = None;
    }

    pub fn record_failure(&mut self, error_message: String) {
        self.polls += 1;
        self.failures += 1;
        self.last_error = Some(error_message);
        self.last_error_timestamp = Some(Utc::now());
    }
}
