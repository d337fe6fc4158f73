//! Error types for acquiring router output

use std::process::ExitStatus;
use std::time::Duration;

/// Result type alias for source operations
pub type SourceResult<T> = Result<T, SourceError>;

/// Reasons the router text could not be obtained for a poll
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The command could not be started (missing binary, permissions, ...)
    #[error("failed to run '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The command did not finish in time and was killed
    #[error("'{program}' did not finish within {timeout:?}")]
    Timeout { program: String, timeout: Duration },

    /// The command finished with a non-zero status
    #[error("'{program}' exited with {status}: {stderr}")]
    ExitStatus {
        program: String,
        status: ExitStatus,
        stderr: String,
    },

    /// The output was not valid UTF-8
    #[error("output of '{origin}' is not valid UTF-8")]
    InvalidUtf8 {
        origin: String,
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// Reading the output failed
    #[error("failed to read output of '{origin}': {source}")]
    Io {
        origin: String,
        #[source]
        source: std::io::Error,
    },
}
