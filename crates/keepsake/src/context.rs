//! The injected application context.

use crate::error::KeepsakeResult;
use keepsake_collections::{
    AppendOutcome, Clock, CollectionManager, GuestbookDraft, GuestbookEntry, InitReport,
    SystemClock, UploadedPhoto, Wish, WishDraft,
};
use keepsake_config_and_utils::{init_logging_for_service, Config, Paths};
use keepsake_storage::{create_store, DurableStore};
use photo_ingestion_pipeline::{BatchReport, IngestBatch, IngestOptions, PhotoIngestor, PhotoSource};
use playback_toggle::{AudioCollaborator, PlaybackToggle};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

/// Everything the page needs, passed explicitly to whoever renders it.
///
/// Collection mutations go through one async mutex, so presentation handlers
/// and photo batches never interleave inside an append.
pub struct KeepsakeContext {
    config: Config,
    manager: Arc<Mutex<CollectionManager>>,
    ingestor: PhotoIngestor,
    playback: PlaybackToggle,
}

impl KeepsakeContext {
    /// Load `~/.keepsake/config.json`, start logging, and open the store.
    pub fn bootstrap() -> KeepsakeResult<Self> {
        let paths = Paths::new()?;
        let config = Config::load(&paths)?;
        paths.ensure_dirs()?;
        init_logging_for_service("keepsake", &config.log_level, Some(paths.log_file()));
        Self::open(config, &paths)
    }

    /// Open the configured origin's file store under `paths`.
    pub fn open(config: Config, paths: &Paths) -> KeepsakeResult<Self> {
        config.validate()?;
        let store = create_store(&config, paths)?;
        info!(origin = %config.origin, "Opening keepsake store");
        Ok(Self::with_store(config, store, Arc::new(SystemClock)))
    }

    /// Build a context over any store and clock.
    pub fn with_store(config: Config, store: Box<dyn DurableStore>, clock: Arc<dyn Clock>) -> Self {
        let manager = CollectionManager::initialize(store, clock, config.date_format.clone());
        let ingestor = PhotoIngestor::new(IngestOptions {
            reject_non_images: config.reject_non_images,
        });
        Self {
            config,
            manager: Arc::new(Mutex::new(manager)),
            ingestor,
            playback: PlaybackToggle::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Shared handle for callers that batch several operations under one lock.
    pub fn manager(&self) -> Arc<Mutex<CollectionManager>> {
        Arc::clone(&self.manager)
    }

    pub async fn init_report(&self) -> InitReport {
        self.manager.lock().await.init_report().clone()
    }

    pub async fn append_wish(&self, text: &str) -> AppendOutcome {
        self.manager.lock().await.append_wish(text)
    }

    pub async fn submit_wish(&self, draft: &mut WishDraft) -> AppendOutcome {
        self.manager.lock().await.submit_wish(draft)
    }

    pub async fn sign_guestbook(&self, draft: &mut GuestbookDraft) -> AppendOutcome {
        self.manager.lock().await.append_guestbook_entry(draft)
    }

    pub async fn wishes(&self) -> Vec<Wish> {
        self.manager.lock().await.wishes().to_vec()
    }

    pub async fn guestbook(&self) -> Vec<GuestbookEntry> {
        self.manager.lock().await.guestbook().to_vec()
    }

    pub async fn photos(&self) -> Vec<UploadedPhoto> {
        self.manager.lock().await.photos().to_vec()
    }

    /// Start encoding `files` without applying them yet.
    pub fn ingest<I>(&self, files: I) -> IngestBatch
    where
        I: IntoIterator<Item = Box<dyn PhotoSource>>,
    {
        self.ingestor.ingest(files)
    }

    /// Encode `files` and append each photo as soon as it is ready.
    ///
    /// The collection lock is taken per photo, so other mutations can run
    /// between completions.
    pub async fn upload_photos<I>(&self, files: I) -> BatchReport
    where
        I: IntoIterator<Item = Box<dyn PhotoSource>>,
    {
        let mut batch = self.ingest(files);
        let mut report = BatchReport::default();
        while let Some(event) = batch.next_event().await {
            let mut manager = self.manager.lock().await;
            report.record(&mut manager, event);
        }
        info!(
            appended = report.appended.len(),
            failed = report.failed.len(),
            unsaved = report.storage_warnings.len(),
            "Photo upload finished"
        );
        report
    }

    /// Attach the page's audio element.
    pub fn attach_audio(&mut self, audio: Arc<dyn AudioCollaborator>) {
        self.playback.attach(audio);
    }

    pub fn playback(&self) -> &PlaybackToggle {
        &self.playback
    }

    /// Flip background music. Returns whether it is now playing.
    pub fn toggle_playback(&self) -> bool {
        self.playback.toggle()
    }

    pub fn is_playing(&self) -> bool {
        self.playback.is_playing()
    }
}

impl std::fmt::Debug for KeepsakeContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeepsakeContext")
            .field("origin", &self.config.origin)
            .field("playback", &self.playback)
            .finish_non_exhaustive()
    }
}
