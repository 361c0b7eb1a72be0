//! ChatClient port - create and edit the remote deployment message
//!
//! Authentication and transport belong to the implementation; the domain only
//! hands over whole documents.

use crate::domain::entities::Document;
use crate::error::NotifyResult;

/// Identity of a freshly posted message, as reported by the chat API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostedMessage {
    /// Opaque id used to address later edits (Slack: `ts`)
    pub remote_message_id: String,
    /// Channel the API resolved the request to (Slack returns the channel id)
    pub channel: String,
}

/// Remote chat message API
///
/// Failures surface as `NotifyError::Transport` or `NotifyError::RemoteRejected`.
pub trait ChatClient {
    /// Post a new message rendering `document`.
    fn create(&self, channel: &str, document: &Document) -> NotifyResult<PostedMessage>;

    /// Replace the whole content of an existing message.
    fn edit(&self, channel: &str, remote_message_id: &str, document: &Document)
        -> NotifyResult<()>;
}

impl<C: ChatClient + ?Sized> ChatClient for &C {
    fn create(&self, channel: &str, document: &Document) -> NotifyResult<PostedMessage> {
        (**self).create(channel, document)
    }

    fn edit(
        &self,
        channel: &str,
        remote_message_id: &str,
        document: &Document,
    ) -> NotifyResult<()> {
        (**self).edit(channel, remote_message_id, document)
    }
}
