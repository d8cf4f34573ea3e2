//! Behavioral tests for the collection state manager.
//!
//! Test organization follows the Keepsake collection rules:
//!
//! - `appends.rs`    - Rules 1-8 (Input validation & drafts)
//! - `durability.rs` - Rules 9-16 (Write-through & round-trip)
//! - `recovery.rs`   - Rules 17-22 (Startup from missing or corrupted data)
//! - `failures.rs`   - Rules 23-28 (Storage failures never roll back)
//! - `ids.rs`        - Rules 29-34 (Id uniqueness)


use crate::clock::FixedClock;
use crate::manager::CollectionManager;
use crate::types::GuestbookDraft;
use chrono::{DateTime, Local, TimeZone};
use keepsake_storage::{DurableStore, MemoryStore, StorageKeys, StorageResult};
use std::sync::Arc;

pub(crate) const US_DATE: &str = "%-m/%-d/%Y";

/// A store handle that survives the manager, so tests can reopen and inspect.
#[derive(Clone, Default)]
pub(crate) struct SharedStore(pub Arc<MemoryStore>);

impl SharedStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota_bytes: u64) -> Self {
        Self(Arc::new(MemoryStore::with_quota(quota_bytes)))
    }

    /// Write `value` under `key` directly, bypassing the manager.
    pub fn seed(&self, key: &str, value: &str) {
        self.0.save(key, value).unwrap();
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.0.load(key).unwrap()
    }
}

impl DurableStore for SharedStore {
    fn load(&self, key: &str) -> StorageResult<Option<String>> {
        self.0.load(key)
    }

    fn save(&self, key: &str, value: &str) -> StorageResult<()> {
        self.0.save(key, value)
    }

    fn remove(&self, key: &str) -> StorageResult<bool> {
        self.0.remove(key)
    }
}

pub(crate) fn june_tenth() -> DateTime<Local> {
    Local.with_ymd_and_hms(2024, 6, 10, 12, 30, 0).unwrap()
}

pub(crate) fn fixed_clock() -> Arc<FixedClock> {
    Arc::new(FixedClock::new(june_tenth()))
}

pub(crate) fn open(store: &SharedStore, clock: &Arc<FixedClock>) -> CollectionManager {
    CollectionManager::initialize(Box::new(store.clone()), clock.clone(), US_DATE)
}

/// Basic workflow test demonstrating core functionality.
#[test]
fn basic_workflow() {
    let store = SharedStore::new();
    let clock = fixed_clock();
    let mut manager = open(&store, &clock);

    assert!(manager.wishes().is_empty());
    assert!(manager.guestbook().is_empty());
    assert!(manager.photos().is_empty());

    // Append a wish and sign the guestbook
    assert!(manager.append_wish("Happy birthday!").is_persisted());
    let mut draft = GuestbookDraft::new("Alice", "Hi!");
    assert!(manager.append_guestbook_entry(&mut draft).is_persisted());

    // Add a photo
    let id = manager.next_photo_id();
    let outcome = manager.append_photo(crate::types::UploadedPhoto {
        id,
        src: "data:image/png;base64,AA==".to_string(),
        name: "cake.png".to_string(),
    });
    assert!(outcome.is_persisted());

    // Every collection is in storage
    for key in StorageKeys::ALL {
        assert!(store.raw(key).is_some(), "{key} was not written through");
    }

    // Reopen and see the same state
    let reopened = open(&store, &clock);
    assert_eq!(reopened.wishes(), manager.wishes());
    assert_eq!(reopened.guestbook(), manager.guestbook());
    assert_eq!(reopened.photos().len(), 1);
    assert_eq!(reopened.wishes()[0].date, "6/10/2024");
}
