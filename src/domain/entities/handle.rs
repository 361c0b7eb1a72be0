//! MessageHandle entity - durable link from a deployment id to its remote message

use crate::domain::entities::Document;
use crate::domain::value_objects::DeploymentId;

/// Everything a later invocation needs to rewrite the remote message
///
/// `document` is the last-known rendered state. The chat API only accepts
/// whole-message replacement, so updates are computed from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageHandle {
    deployment_id: DeploymentId,
    remote_message_id: String,
    channel: String,
    document: Document,
}

impl MessageHandle {
    pub fn new(
        deployment_id: DeploymentId,
        remote_message_id: impl Into<String>,
        channel: impl Into<String>,
        document: Document,
    ) -> Self {
        Self {
            deployment_id,
            remote_message_id: remote_message_id.into(),
            channel: channel.into(),
            document,
        }
    }

    pub fn deployment_id(&self) -> &DeploymentId {
        &self.deployment_id
    }

    pub fn remote_message_id(&self) -> &str {
        &self.remote_message_id
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Same message, new content
    pub fn with_document(mut self, document: Document) -> Self {
        self.document = document;
        self
    }
}
