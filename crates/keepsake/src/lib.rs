//! # Keepsake
//!
//! Client-side state of a celebration page. Visitors leave wishes, sign a
//! guestbook and upload photos; everything is kept in an origin-scoped
//! durable store and shown again on the next visit. A playback flag tracks
//! the background music.
//!
//! [`KeepsakeContext`] is the one object a presentation layer holds. It
//! serializes every mutation through a single [`CollectionManager`].
//!
//! ```ignore
//! let context = KeepsakeContext::bootstrap()?;
//! context.append_wish("Happy birthday!").await;
//! let report = context.upload_photos(vec![Box::new(DiskPhoto::new("cake.jpg"))]).await;
//! ```

mod context;
mod error;

pub use context::KeepsakeContext;
pub use error::{KeepsakeError, KeepsakeResult};

pub use keepsake_collections::{
    AppendOutcome, CollectionManager, GuestbookDraft, GuestbookEntry, InitReport, LoadStatus,
    UploadedPhoto, Wish, WishDraft,
};
pub use keepsake_config_and_utils::{Config, Paths};
pub use keepsake_storage::{DurableStore, FileStore, MemoryStore, StorageError, StorageKeys};
pub use photo_ingestion_pipeline::{
    BatchReport, DiskPhoto, IngestBatch, IngestError, IngestEvent, MemoryPhoto, PhotoSource,
};
pub use playback_toggle::{AudioCollaborator, PlaybackError};
