//! Sources of raw router output
//!
//! The poller does not care where the text comes from. The default source
//! runs the routing daemon's shell; a file source replays a saved dump.

pub mod backend;
pub mod command;
pub mod error;
pub mod file;

pub use backend::NeighborSource;
pub use command::CommandSource;
pub use error::{SourceError, SourceResult};
pub use file::FileSource;
