//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Components
//!
//! - `MessageStore` - versioned handle records over a `StorageBackend`
//! - `DeploymentController` - create / update / set_banner

pub mod deployment;
pub mod message_store;


pub use deployment::{CreateOptions, DeploymentController, DEFAULT_FINISHED_BANNER};
pub use message_store::{MessageStore, RECORD_VERSION};
