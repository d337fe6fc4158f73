//! Router shell command source (`vtysh -c "show ip bgp neighbors"`)

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{instrument, trace, warn};

use super::backend::NeighborSource;
use super::error::{SourceError, SourceResult};
use crate::config::CommandConfig;

/// Runs an external command and returns its stdout
///
/// The child is killed if it outlives `timeout`.
#[derive(Debug, Clone)]
pub struct CommandSource {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl CommandSource {
    pub fn new(program: impl Into<String>, args: Vec<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            args,
            timeout,
        }
    }

    pub fn from_config(config: &CommandConfig, timeout: Duration) -> Self {
        Self::new(config.program.clone(), config.args.clone(), timeout)
    }
}

#[async_trait]
impl NeighborSource for CommandSource {
    #[instrument(skip(self), fields(program = %self.program))]
    async fn fetch(&self) -> SourceResult<String> {
        trace!("running {:?} {:?}", self.program, self.args);

        let child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| SourceError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        // dropping the wait future on timeout drops the child, which kills it
        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| SourceError::Timeout {
                program: self.program.clone(),
                timeout: self.timeout,
            })?
            .map_err(|source| SourceError::Io {
                origin: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(SourceError::ExitStatus {
                program: self.program.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        if !output.stderr.is_empty() {
            warn!(
                "command wrote to stderr: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        String::from_utf8(output.stdout).map_err(|source| SourceError::InvalidUtf8 {
            origin: self.program.clone(),
            source,
        })
    }

    fn describe(&self) -> String {
        format!("command '{} {}'", self.program, self.args.join(" "))
    }
}
