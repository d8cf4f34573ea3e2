//! Batch ingestion: one task per file, completions over a channel.

use crate::encode::{encode_data_uri, resolve_media_type};
use crate::source::PhotoSource;
use crate::IngestError;
use keepsake_collections::{AppendOutcome, CollectionManager, UploadedPhoto};
use keepsake_storage::StorageError;
use tokio::sync::mpsc;
use tokio::task::{AbortHandle, JoinSet};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, Default)]
pub struct IngestOptions {
    /// Refuse files whose content does not sniff as an image.
    pub reject_non_images: bool,
}

/// A file that finished encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedPhoto {
    pub name: String,
    pub media_type: String,
    /// The full `data:` URI.
    pub src: String,
}

/// Completion of one file.
#[derive(Debug)]
pub enum IngestEvent {
    Encoded(EncodedPhoto),
    Failed(IngestError),
}

/// Starts ingestion batches.
#[derive(Debug, Clone, Default)]
pub struct PhotoIngestor {
    options: IngestOptions,
}

impl PhotoIngestor {
    pub fn new(options: IngestOptions) -> Self {
        Self { options }
    }

    /// Start reading and encoding every file concurrently.
    ///
    /// Must be called from within a tokio runtime.
    pub fn ingest<I>(&self, files: I) -> IngestBatch
    where
        I: IntoIterator<Item = Box<dyn PhotoSource>>,
    {
        let files: Vec<Box<dyn PhotoSource>> = files.into_iter().collect();
        let (sender, events) = mpsc::channel(files.len().max(1));
        let mut tasks = JoinSet::new();
        let expected = files.len();

        for file in files {
            let sender = sender.clone();
            let options = self.options;
            tasks.spawn(async move {
                let name = file.name().to_string();
                // Run the file in its own task so a panicking source still
                // produces a failure event.
                let work = tokio::spawn(async move { ingest_one(file.as_ref(), options).await });
                let _abort = AbortOnDrop(work.abort_handle());
                let event = match work.await {
                    Ok(Ok(photo)) => IngestEvent::Encoded(photo),
                    Ok(Err(err)) => IngestEvent::Failed(err),
                    Err(err) => IngestEvent::Failed(IngestError::TaskFailed {
                        name,
                        reason: err.to_string(),
                    }),
                };
                // Receiver gone means the batch was abandoned.
                let _ = sender.send(event).await;
            });
        }

        debug!(files = expected, "Photo ingestion started");
        IngestBatch {
            events,
            _tasks: tasks,
            expected,
        }
    }
}

/// Aborts the wrapped task when the batch task holding it is aborted.
struct AbortOnDrop(AbortHandle);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        self.0.abort();
    }
}

async fn ingest_one(file: &dyn PhotoSource, options: IngestOptions) -> Result<EncodedPhoto, IngestError> {
    let name = file.name().to_string();
    let bytes = file.read().await.map_err(|source| IngestError::Read {
        name: name.clone(),
        source,
    })?;

    let declared = file.media_type().map(str::to_string);
    let task_name = name.clone();

    // Base64 over a multi-megabyte photo is CPU work; keep it off the reactor.
    tokio::task::spawn_blocking(move || -> Result<EncodedPhoto, IngestError> {
        let media_type = resolve_media_type(
            &task_name,
            declared.as_deref(),
            &bytes,
            options.reject_non_images,
        )?;
        let src = encode_data_uri(&media_type, &bytes);
        Ok(EncodedPhoto {
            name: task_name,
            media_type,
            src,
        })
    })
    .await
    .map_err(|err| IngestError::TaskFailed {
        name,
        reason: err.to_string(),
    })?
}

/// A running batch. Dropping it aborts unfinished files.
pub struct IngestBatch {
    events: mpsc::Receiver<IngestEvent>,
    _tasks: JoinSet<()>,
    expected: usize,
}

impl IngestBatch {
    /// Number of files in the batch.
    pub fn len(&self) -> usize {
        self.expected
    }

    pub fn is_empty(&self) -> bool {
        self.expected == 0
    }

    /// Next completion in arrival order, or `None` once every file reported.
    pub async fn next_event(&mut self) -> Option<IngestEvent> {
        self.events.recv().await
    }

    /// Drain the batch into `manager`, appending each photo as it completes.
    pub async fn apply_to(mut self, manager: &mut CollectionManager) -> BatchReport {
        let mut report = BatchReport::default();
        while let Some(event) = self.next_event().await {
            report.record(manager, event);
        }
        report
    }
}

impl std::fmt::Debug for IngestBatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IngestBatch")
            .field("expected", &self.expected)
            .finish_non_exhaustive()
    }
}

/// What a batch did to the photo collection.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Ids of appended photos, in completion order.
    pub appended: Vec<f64>,
    /// Files that produced no photo.
    pub failed: Vec<IngestError>,
    /// Appends that stayed in memory but could not be persisted.
    pub storage_warnings: Vec<StorageError>,
}

impl BatchReport {
    /// Apply one completion to `manager`.
    pub fn record(&mut self, manager: &mut CollectionManager, event: IngestEvent) {
        match event {
            IngestEvent::Encoded(photo) => {
                let id = manager.next_photo_id();
                let outcome = manager.append_photo(UploadedPhoto {
                    id,
                    src: photo.src,
                    name: photo.name,
                });
                if let AppendOutcome::Appended { id, warning } = outcome {
                    self.appended.push(id);
                    if let Some(warning) = warning {
                        self.storage_warnings.push(warning);
                    }
                }
            }
            IngestEvent::Failed(err) => {
                warn!(file = err.file_name(), error = %err, "Skipping photo");
                self.failed.push(err);
            }
        }
    }

    pub fn is_clean(&self) -> bool {
        self.failed.is_empty() && self.storage_warnings.is_empty()
    }
}
