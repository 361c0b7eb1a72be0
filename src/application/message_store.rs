//! Message Store
//!
//! Persists one `MessageHandle` per deployment id through an injected
//! `StorageBackend`, as a versioned JSON record.

use serde::{Deserialize, Serialize};

use crate::domain::entities::{Document, MessageHandle};
use crate::domain::ports::StorageBackend;
use crate::domain::value_objects::DeploymentId;
use crate::error::{NotifyError, NotifyResult};

/// Current on-disk record format
pub const RECORD_VERSION: u32 = 1;

/// JSON representation of a stored handle
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredHandle {
    version: u32,
    deployment_id: DeploymentId,
    remote_message_id: String,
    channel: String,
    document: Document,
}

/// Last-writer-wins store of message handles
pub struct MessageStore<B: StorageBackend> {
    backend: B,
}

impl<B: StorageBackend> MessageStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Where the record for `deployment_id` lives
    pub fn location(&self, deployment_id: &DeploymentId) -> String {
        self.backend.location(deployment_id.as_str())
    }

    /// Persist `handle` under `deployment_id`, overwriting any prior record.
    pub fn save(&self, deployment_id: &DeploymentId, handle: &MessageHandle) -> NotifyResult<()> {
        if handle.deployment_id() != deployment_id {
            return Err(NotifyError::config(format!(
                "handle for '{}' cannot be stored under '{deployment_id}'",
                handle.deployment_id()
            )));
        }

        let record = StoredHandle {
            version: RECORD_VERSION,
            deployment_id: deployment_id.clone(),
            remote_message_id: handle.remote_message_id().to_string(),
            channel: handle.channel().to_string(),
            document: handle.document().clone(),
        };
        let content = serde_json::to_string_pretty(&record)
            .map_err(|e| NotifyError::storage(self.location(deployment_id), e))?;

        self.backend.write(deployment_id.as_str(), &content)?;
        tracing::debug!(
            deployment_id = %deployment_id,
            location = %self.location(deployment_id),
            "saved message handle"
        );
        Ok(())
    }

    /// Most recently saved handle for `deployment_id`.
    pub fn load(&self, deployment_id: &DeploymentId) -> NotifyResult<MessageHandle> {
        let location = self.location(deployment_id);
        let content =
            self.backend
                .read(deployment_id.as_str())?
                .ok_or_else(|| NotifyError::NotFound {
                    deployment_id: deployment_id.to_string(),
                })?;

        let record: StoredHandle = serde_json::from_str(&content)
            .map_err(|e| NotifyError::storage(&location, format!("corrupt record: {e}")))?;

        if record.version != RECORD_VERSION {
            return Err(NotifyError::storage(
                &location,
                format!(
                    "record format version {} is not supported (expected {RECORD_VERSION})",
                    record.version
                ),
            ));
        }

        if &record.deployment_id != deployment_id {
            return Err(NotifyError::storage(
                &location,
                format!(
                    "record belongs to deployment '{}', not '{deployment_id}'",
                    record.deployment_id
                ),
            ));
        }

        tracing::debug!(deployment_id = %deployment_id, %location, "loaded message handle");
        Ok(MessageHandle::new(
            record.deployment_id,
            record.remote_message_id,
            record.channel,
            record.document,
        ))
    }

    /// Whether a handle was ever saved for `deployment_id`
    pub fn contains(&self, deployment_id: &DeploymentId) -> NotifyResult<bool> {
        Ok(self.backend.read(deployment_id.as_str())?.is_some())
    }
}
