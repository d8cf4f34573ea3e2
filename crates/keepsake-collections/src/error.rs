//! Load-time errors. These are logged and recovered from, never surfaced.

use keepsake_storage::StorageError;

#[derive(Debug, thiserror::Error)]
pub enum CollectionError {
    /// Stored data is truncated or not the expected collection shape.
    #[error("stored {key} is not a well-formed collection: {source}")]
    Deserialization {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The store refused the read.
    #[error("could not load {key}: {source}")]
    Load {
        key: &'static str,
        #[source]
        source: StorageError,
    },
}
