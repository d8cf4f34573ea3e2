//! Durable key-value storage for Keepsake.
//!
//! Every collection is persisted as one string value under a fixed key
//! ([`StorageKeys`]). Backends:
//! - **[`FileStore`]**: one directory per origin, one file per key, with an
//!   optional byte quota
//! - **[`MemoryStore`]**: in-process map, used by tests and embedded hosts

mod file;
mod keys;
mod memory;
mod traits;

pub use file::FileStore;
pub use keys::StorageKeys;
pub use memory::MemoryStore;
pub use traits::DurableStore;

use keepsake_config_and_utils::{Config, Paths};
use thiserror::Error;

/// Error type for storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The write would push the store past its byte budget.
    #[error("Storage quota exceeded writing {key}: {needed} bytes needed, limit is {limit}")]
    QuotaExceeded { key: String, needed: u64, limit: u64 },

    /// The host has disabled persistent storage.
    #[error("Storage is disabled")]
    Disabled,

    /// The value could not be encoded for storage.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Open the file-backed store for the configured origin.
pub fn create_store(config: &Config, paths: &Paths) -> StorageResult<Box<dyn DurableStore>> {
    let dir = paths.origin_store_dir(&config.origin);
    let store = FileStore::open(dir, config.store_quota_bytes)?;
    Ok(Box::new(store))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_quota_error_message_names_key_and_sizes() {
        let err = StorageError::QuotaExceeded {
            key: StorageKeys::PHOTOS.to_string(),
            needed: 6_000_000,
            limit: 5_242_880,
        };
        let message = err.to_string();
        assert!(message.contains("miznah-photos"));
        assert!(message.contains("6000000"));
        assert!(message.contains("5242880"));
    }

    #[test]
    fn test_create_store_is_scoped_to_origin() {
        let dir = tempdir().unwrap();
        let paths = Paths::with_base_dir(dir.path().to_path_buf());

        let first = Config {
            origin: "first.example".to_string(),
            ..Config::default()
        };
        let second = Config {
            origin: "second.example".to_string(),
            ..Config::default()
        };

        let first_store = create_store(&first, &paths).unwrap();
        let second_store = create_store(&second, &paths).unwrap();

        first_store.save(StorageKeys::WISHES, "[]").unwrap();

        assert_eq!(
            first_store.load(StorageKeys::WISHES).unwrap(),
            Some("[]".to_string())
        );
        assert_eq!(second_store.load(StorageKeys::WISHES).unwrap(), None);
        assert!(paths.origin_store_dir("first.example").is_dir());
    }

    #[test]
    fn test_create_store_survives_reopen() {
        let dir = tempdir().unwrap();
        let paths = Paths::with_base_dir(dir.path().to_path_buf());
        let config = Config::default();

        create_store(&config, &paths)
            .unwrap()
            .save(StorageKeys::GUESTBOOK, r#"[{"id":1}]"#)
            .unwrap();

        let reopened = create_store(&config, &paths).unwrap();
        assert_eq!(
            reopened.load(StorageKeys::GUESTBOOK).unwrap(),
            Some(r#"[{"id":1}]"#.to_string())
        );
    }
}
