//! Captured output read from disk
//!
//! Useful to run the exporter against a saved `show ip bgp neighbors` dump on
//! a machine without a routing daemon.

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::trace;

use super::backend::NeighborSource;
use super::error::{SourceError, SourceResult};

#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl NeighborSource for FileSource {
    async fn fetch(&self) -> SourceResult<String> {
        trace!("reading neighbor output from {}", self.path.display());

        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|source| SourceError::Io {
                origin: self.path.display().to_string(),
                source,
            })?;

        String::from_utf8(bytes).map_err(|source| SourceError::InvalidUtf8 {
            origin: self.path.display().to_string(),
            source,
        })
    }

    fn describe(&self) -> String {
        format!("file '{}'", self.path.display())
    }
}
