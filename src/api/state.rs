//! API shared state

use crate::actors::poller::PollerHandle;
use crate::metrics::ExporterMetrics;
use crate::store::NeighborStore;

/// Shared state passed to all API handlers
#[derive(Clone)]
pub struct ApiState {
    /// Neighbor samples, read on every scrape
    pub store: NeighborStore,

    /// Exporter self-metrics and the encoder
    pub metrics: ExporterMetrics,

    /// Poller handle for health reporting
    pub poller: PollerHandle,
}

impl ApiState {
    pub fn new(store: NeighborStore, metrics: ExporterMetrics, poller: PollerHandle) -> Self {
        Self {
            store,
            metrics,
            poller,
        }
    }
}
