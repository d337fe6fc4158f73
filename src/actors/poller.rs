//! PollerActor - Samples BGP neighbor status at a fixed interval
//!
//! ## Message Flow
//!
//! ```text
//! Timer tick → Fetch router output → Parse neighbor blocks → NeighborStore::upsert_all
//!     ↑
//!     └─── Commands (PollNow, GetStatus, Shutdown)
//! ```
//!
//! Polls never overlap: the actor finishes a poll before it looks at the next
//! tick or command. A failed fetch skips the cycle and leaves the store alone.
//!
//! The poll status is published on a `watch` channel, so readers never wait
//! for an in-flight poll.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tokio::sync::{mpsc, oneshot, watch};
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, error, instrument, trace, warn};

use crate::bgp::parse_neighbors;
use crate::metrics::ExporterMetrics;
use crate::source::NeighborSource;
use crate::store::NeighborStore;

use super::messages::{PollReport, PollStatus, PollerCommand};

/// Actor that owns the poll loop
pub struct PollerActor {
    /// Where the router output comes from
    source: Arc<dyn NeighborSource>,

    /// Shared sample store (also read by the exposition layer)
    store: NeighborStore,

    metrics: ExporterMetrics,

    /// Command receiver for control messages
    command_rx: mpsc::Receiver<PollerCommand>,

    interval_duration: Duration,

    /// Latest poll outcome, shared with every handle
    status: watch::Sender<PollStatus>,
}

impl PollerActor {
    pub fn new(
        source: Arc<dyn NeighborSource>,
        store: NeighborStore,
        metrics: ExporterMetrics,
        interval_duration: Duration,
        command_rx: mpsc::Receiver<PollerCommand>,
    ) -> Self {
        Self {
            source,
            store,
            metrics,
            command_rx,
            interval_duration,
            status: watch::Sender::new(PollStatus::default()),
        }
    }

    /// Receiver for the published poll status
    pub fn status_receiver(&self) -> watch::Receiver<PollStatus> {
        self.status.subscribe()
    }

    /// Run the actor's main loop
    ///
    /// The first poll happens immediately. The loop runs until a Shutdown
    /// command is received or every handle has been dropped.
    #[instrument(skip(self), fields(source = %self.source.describe()))]
    pub async fn run(mut self) {
        debug!("starting poller with interval {:?}", self.interval_duration);

        let mut ticker = interval(self.interval_duration);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if let Err(e) = self.poll().await {
                        error!("poll failed, keeping previous samples: {:#}", e);
                    }
                }

                cmd = self.command_rx.recv() => {
                    match cmd {
                        Some(PollerCommand::PollNow { respond_to }) => {
                            debug!("received PollNow command");
                            let result = self.poll().await;
                            let _ = respond_to.send(result);
                        }

                        Some(PollerCommand::Shutdown) => {
                            debug!("received shutdown command");
                            break;
                        }

                        None => {
                            warn!("command channel closed, shutting down");
                            break;
                        }
                    }
                }
            }
        }

        debug!("poller stopped");
    }

    /// Fetch, parse and store one round of neighbor output
    async fn poll(&mut self) -> Result<PollReport> {
        let started = Instant::now();

        let text = match self.source.fetch().await {
            Ok(text) => text,
            Err(e) => {
                self.metrics
                    .record_poll_failure(started.elapsed().as_secs_f64());
                self.status
                    .send_modify(|status| status.record_failure(e.to_string()));
                return Err(e)
                    .with_context(|| format!("failed to fetch {}", self.source.describe()));
            }
        };

        let records = parse_neighbors(&text);
        if records.is_empty() && !text.trim().is_empty() {
            warn!("router output contained no complete neighbor block");
        }

        let committed = self.store.upsert_all(records).await;
        let known = self.store.len().await;
        let duration = started.elapsed();

        self.metrics
            .record_poll_success(duration.as_secs_f64(), known);
        self.status.send_modify(PollStatus::record_success);

        trace!("poll committed {committed} records in {duration:?}, {known} neighbors known");

        Ok(PollReport {
            committed,
            known,
            duration,
        })
    }
}

/// Handle for controlling a PollerActor
///
/// This handle can be cloned and shared across tasks.
#[derive(Clone)]
pub struct PollerHandle {
    sender: mpsc::Sender<PollerCommand>,
    status: watch::Receiver<PollStatus>,
}

impl PollerHandle {
    /// Create the actor, spawn it as a tokio task and return a handle to it
    pub fn spawn(
        source: Arc<dyn NeighborSource>,
        store: NeighborStore,
        metrics: ExporterMetrics,
        interval_duration: Duration,
    ) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel(32);

        let actor = PollerActor::new(source, store, metrics, interval_duration, cmd_rx);
        let status = actor.status_receiver();

        tokio::spawn(actor.run());

        Self {
            sender: cmd_tx,
            status,
        }
    }

    /// Trigger an immediate poll and wait for its outcome
    pub async fn poll_now(&self) -> Result<PollReport> {
        let (tx, rx) = oneshot::channel();
        self.sender
            .send(PollerCommand::PollNow { respond_to: tx })
            .await
            .context("failed to send PollNow command")?;

        rx.await.context("failed to receive response")?
    }

    /// Outcome of recent polls, or `None` once the actor has stopped
    ///
    /// Never waits for a poll in progress.
    pub fn status(&self) -> Option<PollStatus> {
        if self.sender.is_closed() {
            return None;
        }
        Some(self.status.borrow().clone())
    }

    /// Stop the poller
    pub async fn shutdown(&self) -> Result<()> {
        self.sender
            .send(PollerCommand::Shutdown)
            .await
            .context("failed to send Shutdown command")?;
        Ok(())
    }
}
