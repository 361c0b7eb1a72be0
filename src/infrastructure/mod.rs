//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `storage/` - StorageBackend implementations (filesystem, in-memory)
//! - `slack/` - ChatClient over the Slack Web API

pub mod slack;
pub mod storage;

// Re-export for convenience
pub use slack::SlackClient;
pub use storage::{FsBackend, MemoryBackend};
