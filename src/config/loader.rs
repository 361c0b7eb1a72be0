//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{NotifyError, NotifyResult};

use super::types::Config;

pub const ENV_TOKEN: &str = "SLACK_TOKEN";
pub const ENV_CHANNEL: &str = "SLACK_CHANNEL";
pub const ENV_API_URL: &str = "SLACK_API_URL";
pub const ENV_TIMEOUT_SECS: &str = "SLACK_TIMEOUT_SECS";
pub const ENV_STATE_DIR: &str = "DEPLOY_NOTIFY_STATE_DIR";
pub const ENV_IGNORE_ERRORS: &str = "DEPLOY_NOTIFY_IGNORE_ERRORS";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown config key '{}' in {}", self.key, self.file.display())?;
        if let Some(line) = self.line {
            write!(f, ":{line}")?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (did you mean '{suggestion}'?)")?;
        }
        Ok(())
    }
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> NotifyResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)
        .map_err(|e| NotifyError::config(format!("cannot read {}: {e}", path.display())))?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| NotifyError::config(format!("invalid config {}: {e}", path.display())))?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: line_of_key(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// `<user config dir>/deploy-notify/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("deploy-notify").join("config.toml"))
}

/// Resolve configuration: defaults, then file, then environment.
///
/// An explicit path must exist; the default user config is optional.
pub fn load(explicit: Option<&Path>) -> NotifyResult<Config> {
    let path = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => default_config_path().filter(|path| path.is_file()),
    };

    let config = match path {
        Some(path) => {
            let (config, warnings) = load_with_warnings(&path)?;
            for warning in &warnings {
                tracing::warn!("{warning}");
            }
            tracing::debug!(path = %path.display(), "loaded config file");
            config
        }
        None => Config::default(),
    };

    with_env_overrides(config, |key| std::env::var(key).ok())
}

/// Apply environment variable overrides using `lookup` to read variables.
pub fn with_env_overrides<F>(mut config: Config, lookup: F) -> NotifyResult<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let lookup = |key: &str| lookup(key).filter(|value| !value.is_empty());

    if let Some(channel) = lookup(ENV_CHANNEL) {
        config.slack.channel = Some(channel);
    }

    if let Some(api_url) = lookup(ENV_API_URL) {
        config.slack.api_url = api_url;
    }

    if let Some(timeout) = lookup(ENV_TIMEOUT_SECS) {
        config.slack.timeout_secs = timeout.trim().parse().map_err(|_| {
            NotifyError::config(format!(
                "{ENV_TIMEOUT_SECS} must be a whole number of seconds, got '{timeout}'"
            ))
        })?;
    }

    if let Some(dir) = lookup(ENV_STATE_DIR) {
        config.state.dir = Some(PathBuf::from(dir));
    }

    if let Some(val) = lookup(ENV_IGNORE_ERRORS) {
        config.behavior.ignore_errors = is_truthy(&val);
    }

    Ok(config)
}

/// Bot token from `SLACK_TOKEN`
pub fn slack_token<F>(lookup: F) -> NotifyResult<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(ENV_TOKEN)
        .filter(|token| !token.trim().is_empty())
        .ok_or_else(|| NotifyError::config(format!("{ENV_TOKEN} is not set")))
}

/// `1`, `true`, `yes` or `on`, case-insensitive
pub fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Every key `Config` understands, for typo suggestions
const KNOWN_KEYS: &[&str] = &[
    "slack",
    "channel",
    "api_url",
    "timeout_secs",
    "state",
    "dir",
    "behavior",
    "ignore_errors",
];

const MAX_SUGGESTION_DISTANCE: usize = 2;

/// 1-based line where `key` is assigned (`key = ...`) or opened as a table
fn line_of_key(content: &str, key: &str) -> Option<usize> {
    let table = format!("[{key}]");
    content
        .lines()
        .position(|line| {
            let line = line.trim();
            let assigned = line
                .strip_prefix(key)
                .is_some_and(|rest| rest.trim_start().starts_with('='));
            assigned || line == table
        })
        .map(|index| index + 1)
}

fn suggest_key(unknown: &str) -> Option<String> {
    KNOWN_KEYS
        .iter()
        .map(|known| (edit_distance(unknown, known), *known))
        .filter(|(distance, _)| *distance <= MAX_SUGGESTION_DISTANCE)
        .min()
        .map(|(_, known)| known.to_string())
}

/// Levenshtein distance over chars, one row at a time
fn edit_distance(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..=b.len()).collect();

    for (i, ca) in a.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if ca == cb {
                diagonal
            } else {
                1 + diagonal.min(above).min(row[j])
            };
            diagonal = above;
        }
    }

    row[b.len()]
}
