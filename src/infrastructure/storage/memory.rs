//! In-memory Storage Backend
//!
//! Keeps records in a map for the lifetime of the value. Used as the test
//! double for `MessageStore` and `DeploymentController`.

use std::cell::RefCell;
use std::collections::BTreeMap;

use crate::domain::ports::StorageBackend;
use crate::error::NotifyResult;

#[derive(Debug, Default)]
pub struct MemoryBackend {
    records: RefCell<BTreeMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw stored value for `key`
    pub fn get(&self, key: &str) -> Option<String> {
        self.records.borrow().get(key).cloned()
    }
}

impl StorageBackend for MemoryBackend {
    fn read(&self, key: &str) -> NotifyResult<Option<String>> {
        Ok(self.get(key))
    }

    fn write(&self, key: &str, contents: &str) -> NotifyResult<()> {
        self.records
            .borrow_mut()
            .insert(key.to_string(), contents.to_string());
        Ok(())
    }

    fn location(&self, key: &str) -> String {
        format!("memory:{key}")
    }
}
