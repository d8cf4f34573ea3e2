//! Configuration management.

use crate::{CoreError, CoreResult, Paths};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Default storage origin. Every origin gets its own store directory.
pub const DEFAULT_ORIGIN: &str = "localhost";

/// Default total byte budget of one origin's store (the usual browser budget).
pub const DEFAULT_STORE_QUOTA_BYTES: u64 = 5 * 1024 * 1024;

/// Default creation-date format, matching the en-US short date (`6/10/2024`).
pub const DEFAULT_DATE_FORMAT: &str = "%-m/%-d/%Y";

/// Environment variable overriding `log_level`.
const LOG_LEVEL_ENV: &str = "KEEPSAKE_LOG_LEVEL";

/// Main configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Origin whose store is opened; names a directory under the stores dir.
    #[serde(default = "default_origin")]
    pub origin: String,
    /// Total bytes the origin's store may hold. `None` disables the quota.
    #[serde(default = "default_store_quota_bytes")]
    pub store_quota_bytes: Option<u64>,
    /// `chrono` format string used for wish and guestbook dates.
    #[serde(default = "default_date_format")]
    pub date_format: String,
    /// Reject uploads whose content is not a recognizable image.
    #[serde(default)]
    pub reject_non_images: bool,
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

fn default_origin() -> String {
    DEFAULT_ORIGIN.to_string()
}

fn default_store_quota_bytes() -> Option<u64> {
    Some(DEFAULT_STORE_QUOTA_BYTES)
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            origin: default_origin(),
            store_quota_bytes: default_store_quota_bytes(),
            date_format: default_date_format(),
            reject_non_images: false,
        }
    }
}

impl Config {
    /// Create a new Config with default values, then override from environment.
    pub fn new() -> Self {
        let mut config = Self::default();
        config.load_from_env();
        config
    }

    /// Load configuration from the config file, falling back to defaults.
    pub fn load(paths: &Paths) -> CoreResult<Self> {
        let config_path = paths.config_file();

        let mut config = if config_path.exists() {
            Self::load_from_file(&config_path)?
        } else {
            Self::default()
        };

        config.load_from_env();
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the config file.
    pub fn save(&self, paths: &Paths) -> CoreResult<()> {
        paths.ensure_dirs()?;
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(paths.config_file(), content)?;
        Ok(())
    }

    /// Check values that would otherwise fail later in a confusing place.
    pub fn validate(&self) -> CoreResult<()> {
        let origin = self.origin.as_str();
        if origin.is_empty()
            || origin == "."
            || origin == ".."
            || origin.contains(['/', '\\'])
        {
            return Err(CoreError::Config(format!(
                "origin {:?} is not a valid directory name",
                self.origin
            )));
        }
        if self.date_format.trim().is_empty() {
            return Err(CoreError::Config("date_format must not be empty".to_string()));
        }
        Ok(())
    }

    /// Only `log_level` can be overridden at runtime.
    fn load_from_env(&mut self) {
        if let Ok(log_level) = std::env::var(LOG_LEVEL_ENV) {
            self.log_level = log_level;
        }
    }
}
