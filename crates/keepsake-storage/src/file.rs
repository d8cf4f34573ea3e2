//! File-backed store: one directory per origin, one file per key.
//!
//! Layout:
//! ```text
//! <stores_dir>/<origin>/
//!     <base64url(key)>.value
//! ```
//! Key names are base64url-encoded so any key maps to a safe, distinct file
//! name. Writes go to a hidden temp file in the same directory and are renamed
//! into place, so a crash never leaves a half-written value behind.

use crate::{DurableStore, StorageError, StorageResult};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use parking_lot::Mutex;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

const VALUE_EXT: &str = ".value";

/// Durable store rooted at one origin's directory.
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
    quota_bytes: Option<u64>,
    /// Serializes quota check + write within this process.
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Open (creating if needed) the store at `dir`.
    ///
    /// `quota_bytes` caps the total size of all values; `None` means unlimited.
    pub fn open(dir: impl Into<PathBuf>, quota_bytes: Option<u64>) -> StorageResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        tracing::debug!(dir = %dir.display(), ?quota_bytes, "file store opened");
        Ok(Self {
            dir,
            quota_bytes,
            write_lock: Mutex::new(()),
        })
    }

    /// The origin directory backing this store.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Total bytes of all stored values.
    pub fn used_bytes(&self) -> StorageResult<u64> {
        self.used_bytes_excluding(None)
    }

    fn value_path(&self, key: &str) -> PathBuf {
        self.dir
            .join(format!("{}{}", URL_SAFE_NO_PAD.encode(key), VALUE_EXT))
    }

    fn used_bytes_excluding(&self, skip: Option<&Path>) -> StorageResult<u64> {
        let mut total = 0u64;
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let path = entry.path();
            let is_value = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.ends_with(VALUE_EXT) && !name.starts_with('.'));
            if !is_value || Some(path.as_path()) == skip {
                continue;
            }
            total += entry.metadata()?.len();
        }
        Ok(total)
    }
}

impl DurableStore for FileStore {
    fn load(&self, key: &str) -> StorageResult<Option<String>> {
        match fs::read_to_string(self.value_path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Io(e)),
        }
    }

    fn save(&self, key: &str, value: &str) -> StorageResult<()> {
        let _guard = self.write_lock.lock();
        let path = self.value_path(key);

        if let Some(limit) = self.quota_bytes {
            let needed = self.used_bytes_excluding(Some(&path))? + value.len() as u64;
            if needed > limit {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    needed,
                    limit,
                });
            }
        }

        atomic_write(&path, value.as_bytes())?;
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<bool> {
        let _guard = self.write_lock.lock();
        match fs::remove_file(self.value_path(key)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StorageError::Io(e)),
        }
    }
}

fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path
        .parent()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "value path has no parent"))?;
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "value path has no file name"))?;

    let tmp_path = dir.join(format!(
        ".{}.tmp.{}",
        file_name,
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ));

    let write_result = (|| -> io::Result<()> {
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(content)?;
        file.sync_all()?;
        fs::rename(&tmp_path, path)
    })();

    if write_result.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    write_result
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_key_loads_as_none() {
        let tmp = TempDir::new().expect("failed to create temp dir");
        let store = FileStore::open(tmp.path(), None).unwrap();

        assert_eq!(store.load("miznah-wishes").unwrap(), None);
        assert!(!store.has("miznah-wishes").unwrap());
    }

    #[test]
    fn test_save_load_remove() {
        let tmp = TempDir::new().expect("failed to create temp dir");
        let store = FileStore::open(tmp.path(), None).unwrap();

        store.save("miznah-wishes", r#"[{"id":1}]"#).unwrap();
        assert_eq!(
            store.load("miznah-wishes").unwrap(),
            Some(r#"[{"id":1}]"#.to_string())
        );

        assert!(store.remove("miznah-wishes").unwrap());
        assert!(!store.remove("miznah-wishes").unwrap());
        assert_eq!(store.load("miznah-wishes").unwrap(), None);
    }

    #[test]
    fn test_open_creates_nested_directory() {
        let tmp = TempDir::new().expect("failed to create temp dir");
        let dir = tmp.path().join("stores").join("localhost");

        let store = FileStore::open(&dir, None).unwrap();
        assert!(dir.is_dir());
        assert_eq!(store.dir(), dir.as_path());
    }

    #[test]
    fn test_keys_with_path_characters_stay_inside_dir() {
        let tmp = TempDir::new().expect("failed to create temp dir");
        let store = FileStore::open(tmp.path(), None).unwrap();

        store.save("../escape/attempt", "x").unwrap();
        store.save("..", "y").unwrap();

        assert_eq!(store.load("../escape/attempt").unwrap(), Some("x".to_string()));
        assert_eq!(store.load("..").unwrap(), Some("y".to_string()));
        assert!(!tmp.path().join("escape").exists());
        assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 2);
    }

    #[test]
    fn test_no_temp_files_left_behind() {
        let tmp = TempDir::new().expect("failed to create temp dir");
        let store = FileStore::open(tmp.path(), None).unwrap();

        for i in 0..5 {
            store.save("miznah-photos", &format!("[{i}]")).unwrap();
        }

        let names: Vec<String> = fs::read_dir(tmp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names.len(), 1, "only the value file should remain: {names:?}");
        assert!(!names[0].starts_with('.'));
    }

    #[test]
    fn test_quota_exceeded_keeps_previous_value() {
        let tmp = TempDir::new().expect("failed to create temp dir");
        let store = FileStore::open(tmp.path(), Some(16)).unwrap();

        store.save("miznah-wishes", "0123456789").unwrap();
        store.save("miznah-photos", "abcdef").unwrap();
        assert_eq!(store.used_bytes().unwrap(), 16);

        let err = store.save("miznah-photos", "abcdefg").unwrap_err();
        assert!(
            matches!(
                err,
                StorageError::QuotaExceeded {
                    needed: 17,
                    limit: 16,
                    ..
                }
            ),
            "unexpected error: {err:?}"
        );
        assert_eq!(
            store.load("miznah-photos").unwrap(),
            Some("abcdef".to_string())
        );

        // Shrinking a value is always allowed.
        store.save("miznah-wishes", "0").unwrap();
        store.save("miznah-photos", "abcdefg").unwrap();
    }

    #[test]
    fn test_values_survive_reopen() {
        let tmp = TempDir::new().expect("failed to create temp dir");
        {
            let store = FileStore::open(tmp.path(), None).unwrap();
            store.save("miznah-guestbook", "[]").unwrap();
        }
        let store = FileStore::open(tmp.path(), None).unwrap();
        assert_eq!(store.load("miznah-guestbook").unwrap(), Some("[]".to_string()));
    }
}
