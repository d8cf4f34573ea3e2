//! Entity and draft types.
//!
//! Field names match the persisted JSON exactly.

use serde::{Deserialize, Serialize};

/// A text wish left for the guest of honor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wish {
    pub id: i64,
    pub text: String,
    /// Creation date, already formatted for display.
    pub date: String,
}

/// A signed guestbook entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestbookEntry {
    pub id: i64,
    pub name: String,
    pub message: String,
    pub date: String,
}

/// An uploaded photo, embedded as a data URI.
///
/// `id` is a timestamp plus a random fraction, so it is not an integer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UploadedPhoto {
    pub id: f64,
    /// `data:<media type>;base64,<payload>`
    pub src: String,
    /// Original file name.
    pub name: String,
}

/// Uncommitted wish input.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WishDraft {
    pub text: String,
}

impl WishDraft {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }
}

/// Uncommitted guestbook input. Both fields must be non-blank to submit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GuestbookDraft {
    pub name: String,
    pub message: String,
}

impl GuestbookDraft {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
        }
    }

    /// True when both trimmed fields are non-empty.
    pub fn is_submittable(&self) -> bool {
        !self.name.trim().is_empty() && !self.message.trim().is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.message.is_empty()
    }

    pub fn clear(&mut self) {
        self.name.clear();
        self.message.clear();
    }
}
