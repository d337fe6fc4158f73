use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

use tracing::trace;

/// Command used to capture the neighbor output
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct CommandConfig {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl Default for CommandConfig {
    fn default() -> Self {
        Self {
            program: String::from("vtysh"),
            args: vec![
                String::from("-c"),
                String::from("show ip bgp neighbors"),
            ],
        }
    }
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Config {
    /// Address the exposition server binds to
    #[serde(default = "crate::util::get_addr")]
    pub listen: IpAddr,
    #[serde(default = "crate::util::get_port")]
    pub port: u16,

    /// Poll interval in seconds
    #[serde(default = "default_interval")]
    pub interval: u64,

    /// Timeout for a single capture of the router output, in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    #[serde(default)]
    pub command: CommandConfig,

    /// Replay a saved dump instead of running `command`
    pub input_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen: crate::util::get_addr(),
            port: crate::util::get_port(),
            interval: default_interval(),
            timeout: default_timeout(),
            command: CommandConfig::default(),
            input_file: None,
        }
    }
}

impl Config {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    /// Reject settings the exporter cannot run with
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.interval == 0 {
            anyhow::bail!("interval must be at least one second");
        }
        if self.timeout == 0 {
            anyhow::bail!("timeout must be at least one second");
        }
        if self.input_file.is_none() && self.command.program.trim().is_empty() {
            anyhow::bail!("command.program must not be empty");
        }
        Ok(())
    }
}

fn default_interval() -> u64 {
    10
}

fn default_timeout() -> u64 {
    5
}

pub fn read_config_file(path: &str) -> anyhow::Result<Config> {
    let file_content = std::fs::read_to_string(path)?;
    serde_json::from_str(&file_content)
        .map_err(|e| anyhow::anyhow!("Invalid configuration file provided: {e}"))
        .inspect(|config| trace!("loaded config: {config:?}"))
}
