//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod chat_client;
pub mod storage_backend;

pub use chat_client::{ChatClient, PostedMessage};
pub use storage_backend::StorageBackend;
