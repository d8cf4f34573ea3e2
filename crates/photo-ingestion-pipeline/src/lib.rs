//! # Photo Ingestion Pipeline
//!
//! Turns user-selected photo files into `data:` URIs and appends them to the
//! photo collection.
//!
//! ```text
//! files ──▶ PhotoIngestor::ingest ──▶ one task per file ──▶ mpsc ──▶ IngestBatch
//!                                     (read, sniff, encode)          │
//!                                                                    ▼
//!                                                 CollectionManager::append_photo
//! ```
//!
//! - Files complete in any order; the collection grows in completion order.
//! - A file that fails to read is skipped and reported; its siblings still land.
//! - Dropping an [`IngestBatch`] aborts whatever is still running, so nothing
//!   from an abandoned batch is appended later.

mod batch;
mod encode;
mod source;

pub use batch::{BatchReport, EncodedPhoto, IngestBatch, IngestEvent, IngestOptions, PhotoIngestor};
pub use encode::{encode_data_uri, resolve_media_type, OCTET_STREAM};
pub use source::{DiskPhoto, MemoryPhoto, PhotoSource};

use thiserror::Error;

/// Why one file produced no photo.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The file could not be read.
    #[error("Failed to read {name}: {source}")]
    Read {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// Content sniffing found no image format and strict mode is on.
    #[error("{name} is not a recognized image")]
    NotAnImage { name: String },

    /// The encoding task died before reporting.
    #[error("Encoding task for {name} failed: {reason}")]
    TaskFailed { name: String, reason: String },
}

impl IngestError {
    /// Name of the file this error belongs to.
    pub fn file_name(&self) -> &str {
        match self {
            Self::Read { name, .. } | Self::NotAnImage { name } | Self::TaskFailed { name, .. } => {
                name
            }
        }
    }
}

pub type IngestResult<T> = Result<T, IngestError>;
