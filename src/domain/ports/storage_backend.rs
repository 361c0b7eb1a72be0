//! StorageBackend port - key/value slot that outlives a process
//!
//! `MessageStore` receives one of these at construction instead of reaching
//! for a global temp directory, so tests can swap in an in-memory map.

use crate::error::NotifyResult;

/// Durable string storage keyed by deployment id
///
/// Implementations:
/// - `FsBackend` - one file per key under a directory
/// - `MemoryBackend` - in-process map (tests)
///
/// There is no locking: the last `write` for a key wins.
pub trait StorageBackend {
    /// Read the value for `key`; `Ok(None)` when nothing was ever written.
    fn read(&self, key: &str) -> NotifyResult<Option<String>>;

    /// Store `contents` under `key`, replacing any previous value.
    fn write(&self, key: &str, contents: &str) -> NotifyResult<()>;

    /// Human-readable location of `key`, for logs and error messages.
    fn location(&self, key: &str) -> String;
}

impl<B: StorageBackend + ?Sized> StorageBackend for &B {
    fn read(&self, key: &str) -> NotifyResult<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, contents: &str) -> NotifyResult<()> {
        (**self).write(key, contents)
    }

    fn location(&self, key: &str) -> String {
        (**self).location(key)
    }
}
