//! Configuration type definitions

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{NotifyError, NotifyResult};
use crate::infrastructure::slack::DEFAULT_API_URL;
use crate::infrastructure::storage::FsBackend;

use super::loader;

/// Slack connection settings (the token is never read from a file)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlackConfig {
    /// Channel name or id to post in
    #[serde(default)]
    pub channel: Option<String>,

    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Whole-request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SlackConfig {
    fn default() -> Self {
        Self {
            channel: None,
            api_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Where message handles are kept between invocations
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateConfig {
    /// Defaults to `<temp dir>/deploy-notify`
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BehaviorConfig {
    /// Log failures and exit 0 instead of failing the pipeline
    #[serde(default)]
    pub ignore_errors: bool,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub slack: SlackConfig,

    #[serde(default)]
    pub state: StateConfig,

    #[serde(default)]
    pub behavior: BehaviorConfig,
}

impl Config {
    /// State directory, falling back to the OS temp dir
    pub fn state_dir(&self) -> PathBuf {
        self.state.dir.clone().unwrap_or_else(FsBackend::default_root)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.slack.timeout_secs)
    }

    /// Channel, or a config error naming every way to set it
    pub fn require_channel(&self) -> NotifyResult<&str> {
        self.slack
            .channel
            .as_deref()
            .filter(|channel| !channel.trim().is_empty())
            .ok_or_else(|| {
                NotifyError::config(format!(
                    "no channel configured (use --channel, {} or [slack] channel)",
                    loader::ENV_CHANNEL
                ))
            })
    }
}
