//! Deployment Id Value Object
//!
//! The caller-chosen key that correlates every invocation of one deployment.
//! It doubles as a storage key (and, for the filesystem backend, a file name),
//! so anything that could escape a directory is rejected up front.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{NotifyError, NotifyResult};

/// Maximum accepted id length
pub const MAX_DEPLOYMENT_ID_LEN: usize = 128;

/// A validated deployment identifier
///
/// Allowed characters: ASCII letters, digits, `.`, `_` and `-`.
/// `.` and `..` on their own are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DeploymentId(String);

impl DeploymentId {
    pub fn new(raw: impl Into<String>) -> NotifyResult<Self> {
        let raw = raw.into();

        if raw.is_empty() {
            return Err(NotifyError::config("deployment id must not be empty"));
        }

        if raw.len() > MAX_DEPLOYMENT_ID_LEN {
            return Err(NotifyError::config(format!(
                "deployment id is {} characters long (max {MAX_DEPLOYMENT_ID_LEN})",
                raw.len()
            )));
        }

        if raw == "." || raw == ".." {
            return Err(NotifyError::config(format!(
                "deployment id '{raw}' is reserved"
            )));
        }

        if let Some(bad) = raw
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')))
        {
            return Err(NotifyError::config(format!(
                "deployment id '{raw}' contains unsupported character {bad:?} (allowed: A-Z a-z 0-9 . _ -)"
            )));
        }

        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeploymentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for DeploymentId {
    type Err = NotifyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for DeploymentId {
    type Error = NotifyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DeploymentId> for String {
    fn from(id: DeploymentId) -> Self {
        id.0
    }
}
