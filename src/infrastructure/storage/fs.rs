//! Filesystem Storage Backend
//!
//! One `<key>.json` file per deployment under a state directory. The default
//! directory sits in the OS temp dir, so stale handles are cleaned up by the
//! host's temp retention policy.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use tempfile::NamedTempFile;

use crate::domain::ports::StorageBackend;
use crate::error::{NotifyError, NotifyResult};

/// Directory name used under the OS temp dir
pub const DEFAULT_STATE_DIR_NAME: &str = "deploy-notify";

/// Directory-backed storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `<temp dir>/deploy-notify`
    pub fn default_root() -> PathBuf {
        std::env::temp_dir().join(DEFAULT_STATE_DIR_NAME)
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl Default for FsBackend {
    fn default() -> Self {
        Self::new(Self::default_root())
    }
}

impl StorageBackend for FsBackend {
    fn read(&self, key: &str) -> NotifyResult<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(NotifyError::storage(path.display().to_string(), e)),
        }
    }

    fn write(&self, key: &str, contents: &str) -> NotifyResult<()> {
        let path = self.path_for(key);
        let fail = |e: io::Error| NotifyError::storage(path.display().to_string(), e);

        fs::create_dir_all(&self.root).map_err(fail)?;

        // Readers never observe a half-written record: write aside, then rename
        let mut tmp = NamedTempFile::new_in(&self.root).map_err(fail)?;
        tmp.write_all(contents.as_bytes()).map_err(fail)?;
        tmp.as_file().sync_all().map_err(fail)?;
        tmp.persist(&path).map_err(|e| fail(e.error))?;
        Ok(())
    }

    fn location(&self, key: &str) -> String {
        self.path_for(key).display().to_string()
    }
}
