pub mod actors;
pub mod api;
pub mod bgp;
pub mod config;
pub mod metrics;
pub mod source;
pub mod store;
pub mod util;

pub use bgp::{NeighborRecord, SessionState, parse_neighbors};
pub use store::NeighborStore;
