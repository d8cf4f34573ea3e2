//! Storage trait definitions.

use crate::StorageResult;

/// Synchronous, origin-scoped key-value store.
///
/// Values survive process restarts but may be cleared by the user or host at
/// any time, so readers must treat a missing key as normal.
pub trait DurableStore: Send + Sync {
    /// Retrieve the raw value stored under `key`, or `None` if never written.
    fn load(&self, key: &str) -> StorageResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn save(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Delete a value. Returns whether it existed.
    fn remove(&self, key: &str) -> StorageResult<bool>;

    /// Check if a key exists
    fn has(&self, key: &str) -> StorageResult<bool> {
        Ok(self.load(key)?.is_some())
    }
}
