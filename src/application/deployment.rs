//! Deployment Controller
//!
//! Orchestrates the two per-invocation flows:
//!
//! - `create`: render → post → save handle
//! - `update`: load handle → rewrite one step → edit → save handle
//!
//! Pure orchestration: document logic lives in `domain::services::addressor`,
//! I/O goes through the `StorageBackend` and `ChatClient` ports. No retries;
//! every error propagates unchanged.

use crate::domain::entities::MessageHandle;
use crate::domain::ports::{ChatClient, StorageBackend};
use crate::domain::services::{self, DEFAULT_BANNER, DEFAULT_INITIAL_STATE};
use crate::domain::value_objects::DeploymentId;
use crate::error::NotifyResult;

use super::message_store::MessageStore;

/// Banner written by `finish` when no text is given
pub const DEFAULT_FINISHED_BANNER: &str = "The deployment has been finished";

/// Inputs for creating a deployment message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateOptions {
    /// Channel to post in (name or id)
    pub channel: String,
    /// Banner text (defaults to `DEFAULT_BANNER`)
    pub banner: Option<String>,
    /// Environment scopes, in display order; empty means one implicit scope
    pub environments: Vec<String>,
    /// Step names, in display order
    pub steps: Vec<String>,
    /// State shown for every step until updated
    pub initial_state: String,
}

impl CreateOptions {
    pub fn new(channel: impl Into<String>, steps: Vec<String>) -> Self {
        Self {
            channel: channel.into(),
            banner: None,
            environments: Vec::new(),
            steps,
            initial_state: DEFAULT_INITIAL_STATE.to_string(),
        }
    }

    pub fn with_banner(mut self, banner: Option<String>) -> Self {
        self.banner = banner;
        self
    }

    pub fn with_environments(mut self, environments: Vec<String>) -> Self {
        self.environments = environments;
        self
    }

    pub fn with_initial_state(mut self, initial_state: impl Into<String>) -> Self {
        self.initial_state = initial_state.into();
        self
    }
}

/// Deployment controller - parameterized by its ports for testing
pub struct DeploymentController<B, C>
where
    B: StorageBackend,
    C: ChatClient,
{
    store: MessageStore<B>,
    chat: C,
}

impl<B, C> DeploymentController<B, C>
where
    B: StorageBackend,
    C: ChatClient,
{
    pub fn new(store: MessageStore<B>, chat: C) -> Self {
        Self { store, chat }
    }

    pub fn store(&self) -> &MessageStore<B> {
        &self.store
    }

    /// Post a new deployment message and remember it under `deployment_id`.
    ///
    /// Calling this twice for one id posts a second message and overwrites the
    /// stored handle; the first message is orphaned.
    pub fn create(
        &self,
        deployment_id: &DeploymentId,
        options: &CreateOptions,
    ) -> NotifyResult<MessageHandle> {
        let banner = options.banner.as_deref().unwrap_or(DEFAULT_BANNER);
        let document = services::render(
            banner,
            &options.environments,
            &options.steps,
            &options.initial_state,
        )?;

        if self.store.contains(deployment_id)? {
            tracing::warn!(
                deployment_id = %deployment_id,
                "a message already exists for this deployment; posting a new one and replacing the stored handle"
            );
        }

        let posted = self.chat.create(&options.channel, &document)?;
        tracing::info!(
            deployment_id = %deployment_id,
            channel = %posted.channel,
            remote_message_id = %posted.remote_message_id,
            steps = options.steps.len(),
            environments = options.environments.len(),
            "posted deployment message"
        );

        let handle = MessageHandle::new(
            deployment_id.clone(),
            posted.remote_message_id,
            posted.channel,
            document,
        );
        self.store.save(deployment_id, &handle)?;
        Ok(handle)
    }

    /// Set one step's state and push the whole message again.
    pub fn update(
        &self,
        deployment_id: &DeploymentId,
        environment: Option<&str>,
        step: &str,
        new_state: &str,
    ) -> NotifyResult<MessageHandle> {
        let handle = self.store.load(deployment_id)?;
        let document = services::set_state(handle.document(), environment, step, new_state)?;

        self.chat
            .edit(handle.channel(), handle.remote_message_id(), &document)?;
        tracing::info!(
            deployment_id = %deployment_id,
            environment = environment.unwrap_or("-"),
            step,
            state = new_state,
            "updated deployment step"
        );

        let handle = handle.with_document(document);
        self.store.save(deployment_id, &handle)?;
        Ok(handle)
    }

    /// Replace the banner text, e.g. to announce the deployment finished.
    pub fn set_banner(
        &self,
        deployment_id: &DeploymentId,
        text: &str,
    ) -> NotifyResult<MessageHandle> {
        let handle = self.store.load(deployment_id)?;
        let document = services::set_banner(handle.document(), text)?;

        self.chat
            .edit(handle.channel(), handle.remote_message_id(), &document)?;
        tracing::info!(deployment_id = %deployment_id, banner = text, "updated banner");

        let handle = handle.with_document(document);
        self.store.save(deployment_id, &handle)?;
        Ok(handle)
    }
}
