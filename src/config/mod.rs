//! Configuration module
//!
//! Resolution order (later wins):
//! 1. Built-in defaults
//! 2. Config file (`--config PATH`, else `<user config dir>/deploy-notify/config.toml`)
//! 3. Environment variables (`SLACK_*`, `DEPLOY_NOTIFY_*`)
//! 4. CLI flags (applied by the binary)
//!
//! The Slack token is only ever read from `SLACK_TOKEN`.

mod loader;
mod types;

pub use loader::{
    default_config_path, is_truthy, load, load_with_warnings, slack_token, with_env_overrides,
    ConfigWarning, ENV_API_URL, ENV_CHANNEL, ENV_IGNORE_ERRORS, ENV_STATE_DIR, ENV_TIMEOUT_SECS,
    ENV_TOKEN,
};
pub use types::{BehaviorConfig, Config, SlackConfig, StateConfig};
