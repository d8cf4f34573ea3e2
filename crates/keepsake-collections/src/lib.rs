//! # Keepsake Collections
//!
//! Owns the three append-only collections of the page (wishes, guestbook
//! entries, uploaded photos) and mirrors each one into a [`DurableStore`].
//!
//! ## Principles
//!
//! - **Memory is authoritative for the session** - a failed write never
//!   rolls back an append; it comes back as a warning
//! - **Write-through, no batching** - every append serializes the whole
//!   affected collection and saves it before returning
//! - **Startup never fails** - absent or malformed stored data loads as an
//!   empty collection
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use keepsake_collections::{CollectionManager, GuestbookDraft, SystemClock};
//! use keepsake_storage::MemoryStore;
//!
//! let mut manager = CollectionManager::initialize(
//!     Box::new(MemoryStore::new()),
//!     Arc::new(SystemClock),
//!     "%-m/%-d/%Y",
//! );
//!
//! assert!(manager.append_wish("Happy birthday!").is_appended());
//! assert!(!manager.append_wish("   ").is_appended());
//!
//! let mut draft = GuestbookDraft::new("Alice", "Hi!");
//! assert!(manager.append_guestbook_entry(&mut draft).is_appended());
//! assert!(draft.is_empty());
//!
//! assert_eq!(manager.wishes().len(), 1);
//! assert_eq!(manager.guestbook().len(), 1);
//! ```
//!
//! [`DurableStore`]: keepsake_storage::DurableStore

mod clock;
mod collection;
mod error;
mod ids;
mod manager;
pub mod types;

#[cfg(test)]
mod tests;

pub use clock::{format_date, Clock, FixedClock, SystemClock};
pub use collection::{Collection, Entry};
pub use error::CollectionError;
pub use ids::IdGenerator;
pub use manager::{AppendOutcome, CollectionManager, InitReport, LoadStatus};
pub use types::{GuestbookDraft, GuestbookEntry, UploadedPhoto, Wish, WishDraft};
