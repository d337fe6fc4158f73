//! Actor running the poll loop
//!
//! The poller runs as an independent tokio task and is controlled through a
//! cloneable [`poller::PollerHandle`]:
//!
//! 1. **Commands**: mpsc channel for control messages
//! 2. **Request/Response**: oneshot channel for `PollNow`
//! 3. **Status**: `watch` channel carrying the latest `PollStatus`
//!
//! Results are written into the shared [`crate::store::NeighborStore`], which
//! the exposition layer reads independently.

pub mod messages;
pub mod poller;
