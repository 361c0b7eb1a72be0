//! Slack Web API client
//!
//! Implements the `ChatClient` port over `chat.postMessage` / `chat.update`
//! using blocking HTTP. Slack answers HTTP 200 with `"ok": false` for most
//! application errors; those become `NotifyError::RemoteRejected`.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::entities::Document;
use crate::domain::ports::{ChatClient, PostedMessage};
use crate::error::{NotifyError, NotifyResult};

use super::blocks::{fallback_text, to_blocks, Block};

pub const DEFAULT_API_URL: &str = "https://slack.com/api/";

const POST_MESSAGE: &str = "chat.postMessage";
const UPDATE_MESSAGE: &str = "chat.update";
const AUTH_TEST: &str = "auth.test";

#[derive(Debug, Serialize)]
struct PostMessageRequest<'a> {
    channel: &'a str,
    text: String,
    blocks: Vec<Block>,
}

#[derive(Debug, Serialize)]
struct UpdateMessageRequest<'a> {
    channel: &'a str,
    ts: &'a str,
    text: String,
    blocks: Vec<Block>,
}

#[derive(Debug, Deserialize)]
struct MessageReply {
    ts: String,
    #[serde(default)]
    channel: Option<String>,
}

/// Who the token belongs to, as reported by `auth.test`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthIdentity {
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub team_id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Blocking Slack client authenticated with a bot token
pub struct SlackClient {
    agent: ureq::Agent,
    token: String,
    api_url: String,
}

impl SlackClient {
    pub fn new(token: impl Into<String>, api_url: impl Into<String>, timeout: Duration) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .build()
            .into();

        let mut api_url = api_url.into();
        if !api_url.ends_with('/') {
            api_url.push('/');
        }

        Self {
            agent,
            token: token.into(),
            api_url,
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Verify the token (`auth.test`).
    pub fn auth_test(&self) -> NotifyResult<AuthIdentity> {
        let url = self.method_url(AUTH_TEST);
        tracing::debug!(%url, "calling Slack API");
        let response = self
            .agent
            .post(&url)
            .header("Authorization", self.bearer())
            .send_empty();
        read_reply(AUTH_TEST, response)
    }

    fn post_json<P: Serialize, R: DeserializeOwned>(
        &self,
        method: &str,
        payload: &P,
    ) -> NotifyResult<R> {
        let url = self.method_url(method);
        tracing::debug!(%url, "calling Slack API");
        let response = self
            .agent
            .post(&url)
            .header("Authorization", self.bearer())
            .send_json(payload);
        read_reply(method, response)
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}{}", self.api_url, method)
    }

    fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

impl ChatClient for SlackClient {
    fn create(&self, channel: &str, document: &Document) -> NotifyResult<PostedMessage> {
        let request = PostMessageRequest {
            channel,
            text: fallback_text(document),
            blocks: to_blocks(document),
        };
        let reply: MessageReply = self.post_json(POST_MESSAGE, &request)?;

        Ok(PostedMessage {
            remote_message_id: reply.ts,
            channel: reply.channel.unwrap_or_else(|| channel.to_string()),
        })
    }

    fn edit(
        &self,
        channel: &str,
        remote_message_id: &str,
        document: &Document,
    ) -> NotifyResult<()> {
        let request = UpdateMessageRequest {
            channel,
            ts: remote_message_id,
            text: fallback_text(document),
            blocks: to_blocks(document),
        };
        let _: MessageReply = self.post_json(UPDATE_MESSAGE, &request)?;
        Ok(())
    }
}

fn read_reply<R: DeserializeOwned>(
    method: &str,
    response: Result<ureq::http::Response<ureq::Body>, ureq::Error>,
) -> NotifyResult<R> {
    let mut response = response.map_err(|e| NotifyError::transport(method, e))?;
    let body: Value = response
        .body_mut()
        .read_json()
        .map_err(|e| NotifyError::transport(method, format!("unreadable response: {e}")))?;
    parse_reply(method, body)
}

/// Check Slack's `ok` envelope and decode the payload.
fn parse_reply<R: DeserializeOwned>(method: &str, body: Value) -> NotifyResult<R> {
    let ok = body.get("ok").and_then(Value::as_bool).unwrap_or(false);
    if !ok {
        let reason = body
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or("unknown_error")
            .to_string();
        tracing::debug!(method, response = %body, "Slack rejected request");
        return Err(NotifyError::RemoteRejected {
            method: method.to_string(),
            reason,
        });
    }

    serde_json::from_value(body)
        .map_err(|e| NotifyError::transport(method, format!("unexpected response: {e}")))
}
