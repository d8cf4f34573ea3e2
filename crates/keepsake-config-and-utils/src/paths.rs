//! File system paths.

use crate::{CoreError, CoreResult};
use std::path::PathBuf;

/// Directory name under the home directory.
const BASE_DIR_NAME: &str = ".keepsake";
/// Log file name under the logs directory.
const LOG_FILE_NAME: &str = "keepsake.jsonl";

/// Manages file system paths.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Base directory (~/.keepsake)
    base_dir: PathBuf,
}

impl Paths {
    /// Create a new Paths instance rooted at `~/.keepsake`.
    pub fn new() -> CoreResult<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| CoreError::Path("Could not determine home directory".to_string()))?;

        Ok(Self {
            base_dir: home.join(BASE_DIR_NAME),
        })
    }

    /// Create a new Paths instance with a custom base directory.
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.keepsake).
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the config file path (~/.keepsake/config.json).
    pub fn config_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the directory holding every origin's store (~/.keepsake/stores).
    pub fn stores_dir(&self) -> PathBuf {
        self.base_dir.join("stores")
    }

    /// Get one origin's store directory (~/.keepsake/stores/<origin>).
    pub fn origin_store_dir(&self, origin: &str) -> PathBuf {
        self.stores_dir().join(origin)
    }

    /// Get the logs directory (~/.keepsake/logs).
    pub fn logs_dir(&self) -> PathBuf {
        self.base_dir.join("logs")
    }

    /// Get the log file path (~/.keepsake/logs/keepsake.jsonl).
    pub fn log_file(&self) -> PathBuf {
        self.logs_dir().join(LOG_FILE_NAME)
    }

    /// Ensure all required directories exist.
    pub fn ensure_dirs(&self) -> CoreResult<()> {
        std::fs::create_dir_all(&self.base_dir)?;
        std::fs::create_dir_all(self.stores_dir())?;
        std::fs::create_dir_all(self.logs_dir())?;
        Ok(())
    }
}
