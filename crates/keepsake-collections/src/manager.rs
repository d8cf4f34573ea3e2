//! The collection state manager.
//!
//! Single owner of the three collections. Every mutation appends in memory
//! first, then serializes the whole affected collection and saves it under
//! its key before returning.

use crate::clock::{format_date, Clock};
use crate::collection::{Collection, Entry};
use crate::error::CollectionError;
use crate::ids::IdGenerator;
use crate::types::{GuestbookDraft, GuestbookEntry, UploadedPhoto, Wish, WishDraft};
use keepsake_storage::{DurableStore, StorageError};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Result of one append request.
#[derive(Debug)]
pub enum AppendOutcome<I = i64> {
    /// Input was blank; nothing changed.
    Ignored,
    /// Entry is in memory. `warning` is set when the write-through failed.
    Appended {
        id: I,
        warning: Option<StorageError>,
    },
}

impl<I: Copy> AppendOutcome<I> {
    pub fn is_appended(&self) -> bool {
        matches!(self, Self::Appended { .. })
    }

    pub fn id(&self) -> Option<I> {
        match self {
            Self::Appended { id, .. } => Some(*id),
            Self::Ignored => None,
        }
    }

    /// The storage failure, if the entry was appended but not persisted.
    pub fn warning(&self) -> Option<&StorageError> {
        match self {
            Self::Appended { warning, .. } => warning.as_ref(),
            Self::Ignored => None,
        }
    }

    pub fn is_persisted(&self) -> bool {
        matches!(self, Self::Appended { warning: None, .. })
    }
}

/// How one collection came out of startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadStatus {
    /// Key never written.
    Absent,
    /// Parsed this many entries.
    Loaded(usize),
    /// Stored value was unreadable; started empty.
    Recovered { reason: String },
}

impl LoadStatus {
    pub fn is_recovered(&self) -> bool {
        matches!(self, Self::Recovered { .. })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InitReport {
    pub wishes: LoadStatus,
    pub guestbook: LoadStatus,
    pub photos: LoadStatus,
}

impl InitReport {
    /// Storage keys of the collections that were reset to empty.
    pub fn recovered_keys(&self) -> Vec<&'static str> {
        [
            (Wish::KEY, &self.wishes),
            (GuestbookEntry::KEY, &self.guestbook),
            (UploadedPhoto::KEY, &self.photos),
        ]
        .into_iter()
        .filter(|(_, status)| status.is_recovered())
        .map(|(key, _)| key)
        .collect()
    }
}

pub struct CollectionManager {
    store: Box<dyn DurableStore>,
    clock: Arc<dyn Clock>,
    date_format: String,
    wishes: Collection<Wish>,
    guestbook: Collection<GuestbookEntry>,
    photos: Collection<UploadedPhoto>,
    wish_ids: IdGenerator,
    guestbook_ids: IdGenerator,
    photo_ids: IdGenerator,
    init_report: InitReport,
}

impl CollectionManager {
    /// Load all three collections from `store`.
    ///
    /// Never fails: an absent key, a refused read or malformed JSON each
    /// leave that collection empty and are recorded in [`InitReport`].
    pub fn initialize(
        store: Box<dyn DurableStore>,
        clock: Arc<dyn Clock>,
        date_format: impl Into<String>,
    ) -> Self {
        let (wishes, wishes_status) = load_collection::<Wish>(store.as_ref());
        let (guestbook, guestbook_status) = load_collection::<GuestbookEntry>(store.as_ref());
        let (photos, photos_status) = load_collection::<UploadedPhoto>(store.as_ref());

        let wish_ids = seeded_ids(&wishes);
        let guestbook_ids = seeded_ids(&guestbook);
        let photo_ids = seeded_ids(&photos);

        info!(
            wishes = wishes.len(),
            guestbook = guestbook.len(),
            photos = photos.len(),
            "Collections initialized"
        );

        Self {
            store,
            clock,
            date_format: date_format.into(),
            wishes,
            guestbook,
            photos,
            wish_ids,
            guestbook_ids,
            photo_ids,
            init_report: InitReport {
                wishes: wishes_status,
                guestbook: guestbook_status,
                photos: photos_status,
            },
        }
    }

    pub fn init_report(&self) -> &InitReport {
        &self.init_report
    }

    /// Append a wish. Blank text is ignored; stored text is trimmed.
    pub fn append_wish(&mut self, text: &str) -> AppendOutcome {
        let text = text.trim();
        if text.is_empty() {
            return AppendOutcome::Ignored;
        }

        let now = self.clock.now();
        let id = unused_id(&self.wishes, &mut self.wish_ids, now.timestamp_millis());
        self.wishes.push(Wish {
            id,
            text: text.to_string(),
            date: format_date(&now, &self.date_format),
        });
        debug!(id, "Wish appended");

        let warning = write_through(self.store.as_ref(), &self.wishes);
        AppendOutcome::Appended { id, warning }
    }

    /// Submit a wish draft. The draft is cleared only when the wish was appended.
    pub fn submit_wish(&mut self, draft: &mut WishDraft) -> AppendOutcome {
        let outcome = self.append_wish(&draft.text);
        if outcome.is_appended() {
            draft.clear();
        }
        outcome
    }

    /// Sign the guestbook. Both fields must be non-blank; on success the
    /// draft is cleared, otherwise it is left untouched.
    pub fn append_guestbook_entry(&mut self, draft: &mut GuestbookDraft) -> AppendOutcome {
        if !draft.is_submittable() {
            return AppendOutcome::Ignored;
        }

        let now = self.clock.now();
        let id = unused_id(&self.guestbook, &mut self.guestbook_ids, now.timestamp_millis());
        self.guestbook.push(GuestbookEntry {
            id,
            name: draft.name.trim().to_string(),
            message: draft.message.trim().to_string(),
            date: format_date(&now, &self.date_format),
        });
        draft.clear();
        debug!(id, "Guestbook entry appended");

        let warning = write_through(self.store.as_ref(), &self.guestbook);
        AppendOutcome::Appended { id, warning }
    }

    /// Fresh photo id: unique integer part plus a random fraction.
    pub fn next_photo_id(&mut self) -> f64 {
        let now_millis = self.clock.now_millis();
        loop {
            let id = self.photo_ids.next_fractional_id(now_millis);
            if !self.photos.contains_id_floor(id.floor() as i64) {
                return id;
            }
        }
    }

    /// Append an encoded photo.
    ///
    /// A photo whose id collides with a stored one (by integer part) is
    /// given a fresh id.
    pub fn append_photo(&mut self, mut photo: UploadedPhoto) -> AppendOutcome<f64> {
        let floor = photo.id_floor();
        if self.photos.contains_id_floor(floor) {
            let fresh = self.next_photo_id();
            debug!(old = photo.id, new = fresh, "Photo id collided, reassigned");
            photo.id = fresh;
        } else {
            self.photo_ids.observe(floor);
        }

        let id = photo.id;
        debug!(id, name = %photo.name, bytes = photo.src.len(), "Photo appended");
        self.photos.push(photo);

        let warning = write_through(self.store.as_ref(), &self.photos);
        AppendOutcome::Appended { id, warning }
    }

    pub fn wishes(&self) -> &[Wish] {
        self.wishes.as_slice()
    }

    pub fn guestbook(&self) -> &[GuestbookEntry] {
        self.guestbook.as_slice()
    }

    pub fn photos(&self) -> &[UploadedPhoto] {
        self.photos.as_slice()
    }
}

impl std::fmt::Debug for CollectionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollectionManager")
            .field("wishes", &self.wishes.len())
            .field("guestbook", &self.guestbook.len())
            .field("photos", &self.photos.len())
            .field("date_format", &self.date_format)
            .finish()
    }
}

fn load_collection<T: Entry>(store: &dyn DurableStore) -> (Collection<T>, LoadStatus) {
    let failure = match store.load(T::KEY) {
        Ok(None) => return (Collection::new(), LoadStatus::Absent),
        Ok(Some(raw)) => match Collection::from_json(&raw) {
            Ok(collection) => {
                let count = collection.len();
                return (collection, LoadStatus::Loaded(count));
            }
            Err(source) => CollectionError::Deserialization {
                key: T::KEY,
                source,
            },
        },
        Err(source) => CollectionError::Load {
            key: T::KEY,
            source,
        },
    };

    warn!(collection = T::LABEL, error = %failure, "Starting with empty collection");
    (
        Collection::new(),
        LoadStatus::Recovered {
            reason: failure.to_string(),
        },
    )
}

/// Next id from `ids` that no entry of `collection` already carries.
fn unused_id<T: Entry>(collection: &Collection<T>, ids: &mut IdGenerator, now_millis: i64) -> i64 {
    loop {
        let id = ids.next_id(now_millis);
        if !collection.contains_id_floor(id) {
            return id;
        }
    }
}

fn seeded_ids<T: Entry>(collection: &Collection<T>) -> IdGenerator {
    let mut ids = IdGenerator::new();
    if let Some(max) = collection.max_id_floor() {
        ids.observe(max);
    }
    ids
}

fn write_through<T: Entry>(store: &dyn DurableStore, collection: &Collection<T>) -> Option<StorageError> {
    let result = collection
        .to_json()
        .map_err(|e| StorageError::Serialization(e.to_string()))
        .and_then(|json| store.save(T::KEY, &json));

    match result {
        Ok(()) => None,
        Err(err) => {
            warn!(collection = T::LABEL, error = %err, "Write-through failed, keeping in-memory entry");
            Some(err)
        }
    }
}
