//! Error types for deploy-notify
//!
//! Uses `thiserror` for library errors. The binary wraps these in `anyhow`
//! at the top level.

use thiserror::Error;

/// Result type alias for deploy-notify operations
pub type NotifyResult<T> = Result<T, NotifyError>;

/// Main error type for deploy-notify operations
///
/// None of these are recovered internally. The CLI decides whether a failure
/// becomes a non-zero exit or (in ignore-errors mode) a log line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotifyError {
    /// Invalid step/environment/id input or missing configuration
    #[error("invalid configuration: {message}")]
    Config { message: String },

    /// No step entry matched in the targeted scope
    #[error("step '{step}' not found{}", scope_suffix(.environment))]
    StepNotFound {
        step: String,
        environment: Option<String>,
    },

    /// No stored handle for the deployment id
    #[error("no deployment message stored for '{deployment_id}' (run `create` first)")]
    NotFound { deployment_id: String },

    /// I/O failure or corrupt persisted state
    #[error("storage error at {location}: {message}")]
    Storage { location: String, message: String },

    /// Network, HTTP or response decoding failure
    #[error("{method} failed: {message}")]
    Transport { method: String, message: String },

    /// The chat API answered but refused the request
    #[error("{method} rejected by chat API: {reason}")]
    RemoteRejected { method: String, reason: String },
}

fn scope_suffix(environment: &Option<String>) -> String {
    environment
        .as_deref()
        .map(|env| format!(" in environment '{env}'"))
        .unwrap_or_default()
}

impl NotifyError {
    pub fn config(message: impl Into<String>) -> Self {
        NotifyError::Config {
            message: message.into(),
        }
    }

    pub fn storage(location: impl Into<String>, message: impl ToString) -> Self {
        NotifyError::Storage {
            location: location.into(),
            message: message.to_string(),
        }
    }

    pub fn transport(method: impl Into<String>, message: impl ToString) -> Self {
        NotifyError::Transport {
            method: method.into(),
            message: message.to_string(),
        }
    }

    /// Stable lowercase label, used as a structured log field
    pub fn kind(&self) -> &'static str {
        match self {
            NotifyError::Config { .. } => "config",
            NotifyError::StepNotFound { .. } => "step_not_found",
            NotifyError::NotFound { .. } => "not_found",
            NotifyError::Storage { .. } => "storage",
            NotifyError::Transport { .. } => "transport",
            NotifyError::RemoteRejected { .. } => "remote_rejected",
        }
    }
}
