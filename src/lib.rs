//! deploy-notify - keep one chat message in sync with a multi-step deployment
//!
//! Every deployment step runs as its own process. `create` posts the message
//! and stores a handle keyed by a deployment id; each later `update` loads that
//! handle, rewrites exactly one step line and pushes the whole message again.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

// Re-exports for convenience
pub use application::{CreateOptions, DeploymentController, MessageStore};
pub use config::Config;
pub use domain::entities::{Document, MessageHandle, Section};
pub use domain::ports::{ChatClient, PostedMessage, StorageBackend};
pub use domain::value_objects::DeploymentId;
pub use error::{NotifyError, NotifyResult};
pub use infrastructure::{FsBackend, MemoryBackend, SlackClient};
