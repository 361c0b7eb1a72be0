//! StorageBackend implementations

mod fs;
mod memory;

pub use fs::{FsBackend, DEFAULT_STATE_DIR_NAME};
pub use memory::MemoryBackend;
