use keepsake_config_and_utils::CoreError;
use keepsake_storage::StorageError;
use thiserror::Error;

/// Errors that can stop a context from opening.
///
/// Once open, nothing is fatal: storage and ingestion problems come back as
/// warnings on the individual operations.
#[derive(Error, Debug)]
pub enum KeepsakeError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Failed to open store: {0}")]
    Storage(#[from] StorageError),
}

pub type KeepsakeResult<T> = Result<T, KeepsakeError>;
