//! Neighbor source trait definition

use async_trait::async_trait;

use super::error::SourceResult;

/// Provider of raw `show ip bgp neighbors` text
///
/// Implementations must be `Send + Sync` as the poller holds them across
/// await points. A failed fetch only skips the current poll, so
/// implementations should report errors rather than retry internally.
#[async_trait]
pub trait NeighborSource: Send + Sync {
    /// Obtain a fresh copy of the neighbor output
    async fn fetch(&self) -> SourceResult<String>;

    /// Short human readable description for logs
    fn describe(&self) -> String;
}
