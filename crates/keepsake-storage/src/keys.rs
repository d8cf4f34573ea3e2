//! Storage key constants.

/// Keys under which each collection is persisted.
///
/// These match the keys the page has always used, so existing stored
/// collections load unchanged.
pub struct StorageKeys;

impl StorageKeys {
    /// Wishes (JSON array)
    pub const WISHES: &'static str = "miznah-wishes";

    /// Guestbook entries (JSON array)
    pub const GUESTBOOK: &'static str = "miznah-guestbook";

    /// Uploaded photos with embedded data URIs (JSON array)
    pub const PHOTOS: &'static str = "miznah-photos";

    /// Every collection key, in load order.
    pub const ALL: [&'static str; 3] = [Self::WISHES, Self::GUESTBOOK, Self::PHOTOS];
}
