//! Ordered, append-only collection of one entity kind.

use crate::types::{GuestbookEntry, UploadedPhoto, Wish};
use keepsake_storage::StorageKeys;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// An entity that lives in a persisted collection.
pub trait Entry: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Storage key of the collection.
    const KEY: &'static str;

    /// Short label used in logs.
    const LABEL: &'static str;

    /// Integer part of the entry's id, used to seed id generation.
    fn id_floor(&self) -> i64;
}

impl Entry for Wish {
    const KEY: &'static str = StorageKeys::WISHES;
    const LABEL: &'static str = "wishes";

    fn id_floor(&self) -> i64 {
        self.id
    }
}

impl Entry for GuestbookEntry {
    const KEY: &'static str = StorageKeys::GUESTBOOK;
    const LABEL: &'static str = "guestbook";

    fn id_floor(&self) -> i64 {
        self.id
    }
}

impl Entry for UploadedPhoto {
    const KEY: &'static str = StorageKeys::PHOTOS;
    const LABEL: &'static str = "photos";

    fn id_floor(&self) -> i64 {
        self.id.floor() as i64
    }
}

/// Insertion order is display order.
#[derive(Clone, Debug, PartialEq)]
pub struct Collection<T> {
    items: Vec<T>,
}

impl<T: Entry> Collection<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Parse the stored JSON array.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let items: Vec<T> = serde_json::from_str(raw)?;
        Ok(Self { items })
    }

    /// Serialize the whole collection as a JSON array.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.items)
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Largest integer id part present, if any.
    pub fn max_id_floor(&self) -> Option<i64> {
        self.items.iter().map(Entry::id_floor).max()
    }

    pub fn contains_id_floor(&self, id_floor: i64) -> bool {
        self.items.iter().any(|item| item.id_floor() == id_floor)
    }
}

impl<T: Entry> Default for Collection<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wish(id: i64, text: &str) -> Wish {
        Wish {
            id,
            text: text.to_string(),
            date: "6/10/2024".to_string(),
        }
    }

    #[test]
    fn empty_collection_serializes_as_empty_array() {
        let collection: Collection<Wish> = Collection::new();
        assert_eq!(collection.to_json().unwrap(), "[]");
        assert_eq!(collection.max_id_floor(), None);
    }

    #[test]
    fn push_preserves_insertion_order() {
        let mut collection = Collection::new();
        collection.push(wish(3, "c"));
        collection.push(wish(1, "a"));
        collection.push(wish(2, "b"));

        let texts: Vec<&str> = collection.as_slice().iter().map(|w| w.text.as_str()).collect();
        assert_eq!(texts, vec!["c", "a", "b"]);
        assert_eq!(collection.max_id_floor(), Some(3));
        assert!(collection.contains_id_floor(1));
        assert!(!collection.contains_id_floor(4));
    }

    #[test]
    fn wrong_shape_is_a_parse_error() {
        assert!(Collection::<Wish>::from_json(r#"{"id":1}"#).is_err());
        assert!(Collection::<Wish>::from_json(r#"[{"id":"x","text":"a","date":"d"}]"#).is_err());
        assert!(Collection::<GuestbookEntry>::from_json(r#"[{"id":1,"name":"a","date":"d"}]"#).is_err());
        assert!(Collection::<UploadedPhoto>::from_json("[").is_err());
    }

    #[test]
    fn keys_map_to_storage_keys() {
        assert_eq!(Wish::KEY, StorageKeys::WISHES);
        assert_eq!(GuestbookEntry::KEY, StorageKeys::GUESTBOOK);
        assert_eq!(UploadedPhoto::KEY, StorageKeys::PHOTOS);
    }
}
