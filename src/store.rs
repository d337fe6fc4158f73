//! Shared store of the latest committed record per BGP neighbor
//!
//! The poller is the only writer; the exposition layer reads snapshots at
//! scrape time. Records are replaced as whole values under a write lock, so a
//! reader never sees a mix of old and new fields for one neighbor.
//!
//! Entries never expire. A neighbor that vanishes from the router output keeps
//! its last known values until the process restarts.

use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::trace;

use crate::bgp::NeighborRecord;

/// Cloneable handle to the neighbor sample store
#[derive(Debug, Clone, Default)]
pub struct NeighborStore {
    records: Arc<RwLock<HashMap<IpAddr, NeighborRecord>>>,
}

impl NeighborStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert the record, or replace the one stored under the same address
    pub async fn upsert(&self, record: NeighborRecord) {
        let mut records = self.records.write().await;
        trace!("storing record for {}", record.address);
        records.insert(record.address, record);
    }

    /// Apply all records of one poll under a single write lock.
    ///
    /// Records are applied in order, so the last record for an address wins.
    pub async fn upsert_all(&self, batch: impl IntoIterator<Item = NeighborRecord>) -> usize {
        let mut records = self.records.write().await;
        let mut count = 0;
        for record in batch {
            records.insert(record.address, record);
            count += 1;
        }
        trace!("stored {count} records, {} neighbors known", records.len());
        count
    }

    /// Copy of every stored record, ordered by address
    pub async fn snapshot(&self) -> Vec<NeighborRecord> {
        let records = self.records.read().await;
        let mut snapshot: Vec<_> = records.values().cloned().collect();
        snapshot.sort_by_key(|record| record.address);
        snapshot
    }

    pub async fn get(&self, address: &IpAddr) -> Option<NeighborRecord> {
        self.records.read().await.get(address).cloned()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}
