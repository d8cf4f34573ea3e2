//! # Observability
//!
//! Structured logging layer shared by every Keepsake crate.
//!
//! Crates are **log producers** only. They use the standard `tracing` macros
//! and never decide where logs go; the host calls [`init`] or
//! [`init_with_config`] once at startup.
//!
//! ## Output
//!
//! Every event is written as one JSON line to
//! `~/.keepsake/logs/keepsake.jsonl` (or [`LogConfig::log_path`]):
//!
//! - `tail -f ~/.keepsake/logs/keepsake.jsonl | jq` for pretty JSON
//! - `lnav ~/.keepsake/logs/keepsake.jsonl` for interactive exploration
//!
//! String fields longer than [`LogConfig::max_field_len`] are elided so that
//! embedded image payloads never end up in the log file.
//!
//! ## Usage
//!
//! ```rust,ignore
//! observability::init_with_config(observability::LogConfig {
//!     service_name: "keepsake".into(),
//!     default_level: "debug".into(),
//!     also_stderr: true,
//!     ..Default::default()
//! });
//! tracing::info!("ready");
//! ```

mod json_layer;
mod writer;

use std::path::PathBuf;

pub use json_layer::{elide, JsonLayer, LogEntry};
pub use writer::CentralLogWriter;

/// Default cap on the length of a single string field in a log line.
pub const DEFAULT_MAX_FIELD_LEN: usize = 256;

/// Configuration for the logging system.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Name of the service (e.g., "keepsake", "ingest").
    /// Included in every log line for filtering.
    pub service_name: String,

    /// Default log level filter (e.g., "debug", "info", "warn").
    /// Can be overridden by `RUST_LOG` environment variable.
    pub default_level: String,

    /// Optional custom log file path.
    /// Defaults to `~/.keepsake/logs/keepsake.jsonl`.
    pub log_path: Option<PathBuf>,

    /// Also emit logs to stderr for immediate feedback.
    pub also_stderr: bool,

    /// Longest string field written verbatim; longer values are elided.
    pub max_field_len: usize,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            service_name: "unknown".into(),
            default_level: "info".into(),
            log_path: None,
            also_stderr: false,
            max_field_len: DEFAULT_MAX_FIELD_LEN,
        }
    }
}

/// Initialize logging with default settings.
///
/// ```rust,ignore
/// observability::init("keepsake");
/// tracing::info!("ready");
/// ```
pub fn init(service_name: &str) {
    init_with_config(LogConfig {
        service_name: service_name.into(),
        ..Default::default()
    });
}

/// Initialize logging with custom configuration.
///
/// When the log file cannot be opened, falls back to a compact stderr
/// subscriber instead of failing the host. Calling this more than once is
/// harmless; only the first subscriber is installed.
pub fn init_with_config(config: LogConfig) {
    if let Err(e) = writer::init_file_subscriber(&config) {
        use tracing_subscriber::util::SubscriberInitExt;
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.default_level)),
            )
            .with_target(true)
            .compact()
            .with_writer(std::io::stderr)
            .finish()
            .try_init();
        tracing::warn!(error = %e, "log file unavailable, logging to stderr only");
    }
}

/// Re-export tracing macros for convenience.
pub use tracing::{debug, error, info, instrument, trace, warn};

/// Re-export Level for advanced filtering.
pub use tracing::Level;
