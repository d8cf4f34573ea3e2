//! In-process store.

use crate::{DurableStore, StorageError, StorageResult};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

/// In-memory store with an optional byte quota and an off switch.
///
/// The quota counts value bytes across all keys, like [`FileStore`](crate::FileStore).
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: Mutex<HashMap<String, String>>,
    quota_bytes: Option<u64>,
    disabled: AtomicBool,
}

impl MemoryStore {
    /// Create an empty store with no quota.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store holding at most `quota_bytes` of values.
    pub fn with_quota(quota_bytes: u64) -> Self {
        Self {
            quota_bytes: Some(quota_bytes),
            ..Self::default()
        }
    }

    /// Simulate a host that blocks storage access. Existing data is kept.
    pub fn set_disabled(&self, disabled: bool) {
        self.disabled.store(disabled, Ordering::SeqCst);
    }

    /// Total value bytes currently stored.
    pub fn used_bytes(&self) -> u64 {
        self.data.lock().values().map(|v| v.len() as u64).sum()
    }

    fn check_enabled(&self) -> StorageResult<()> {
        if self.disabled.load(Ordering::SeqCst) {
            Err(StorageError::Disabled)
        } else {
            Ok(())
        }
    }
}

impl DurableStore for MemoryStore {
    fn load(&self, key: &str) -> StorageResult<Option<String>> {
        self.check_enabled()?;
        Ok(self.data.lock().get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> StorageResult<()> {
        self.check_enabled()?;
        let mut data = self.data.lock();

        if let Some(limit) = self.quota_bytes {
            let others: u64 = data
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(_, v)| v.len() as u64)
                .sum();
            let needed = others + value.len() as u64;
            if needed > limit {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    needed,
                    limit,
                });
            }
        }

        data.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<bool> {
        self.check_enabled()?;
        Ok(self.data.lock().remove(key).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();

        store.save("miznah-wishes", "[]").unwrap();
        assert_eq!(store.load("miznah-wishes").unwrap(), Some("[]".to_string()));

        assert!(store.has("miznah-wishes").unwrap());
        assert!(!store.has("nonexistent").unwrap());

        assert!(store.remove("miznah-wishes").unwrap());
        assert!(!store.remove("miznah-wishes").unwrap());
        assert_eq!(store.load("miznah-wishes").unwrap(), None);
    }

    #[test]
    fn test_save_overwrites() {
        let store = MemoryStore::new();
        store.save("k", "first").unwrap();
        store.save("k", "second").unwrap();
        assert_eq!(store.load("k").unwrap(), Some("second".to_string()));
        assert_eq!(store.used_bytes(), 6);
    }

    #[test]
    fn test_quota_counts_other_keys_and_replaces_own_value() {
        let store = MemoryStore::with_quota(10);
        store.save("a", "12345").unwrap();
        store.save("b", "12345").unwrap();

        // Replacing "b" with a value of the same size still fits.
        store.save("b", "abcde").unwrap();

        let err = store.save("b", "123456").unwrap_err();
        match err {
            StorageError::QuotaExceeded { key, needed, limit } => {
                assert_eq!(key, "b");
                assert_eq!(needed, 11);
                assert_eq!(limit, 10);
            }
            other => panic!("expected QuotaExceeded, got {other:?}"),
        }

        // The rejected write left the previous value in place.
        assert_eq!(store.load("b").unwrap(), Some("abcde".to_string()));
    }

    #[test]
    fn test_disabled_store_rejects_everything() {
        let store = MemoryStore::new();
        store.save("k", "v").unwrap();
        store.set_disabled(true);

        assert!(matches!(store.load("k"), Err(StorageError::Disabled)));
        assert!(matches!(store.save("k", "w"), Err(StorageError::Disabled)));
        assert!(matches!(store.remove("k"), Err(StorageError::Disabled)));

        store.set_disabled(false);
        assert_eq!(store.load("k").unwrap(), Some("v".to_string()));
    }
}
