//! Logging initialization.
//!
//! Thin wrapper over the observability crate. Every Keepsake process writes
//! structured JSONL to `~/.keepsake/logs/keepsake.jsonl`.

use std::path::PathBuf;

/// Initialize the logging system for the default `keepsake` service.
///
/// - Structured JSONL output to `~/.keepsake/logs/keepsake.jsonl`
/// - Log level from RUST_LOG env var or the provided default
/// - Service name included in every log line
///
/// ```ignore
/// init_logging("info");
/// tracing::info!("keepsake started");
/// ```
pub fn init_logging(level: &str) {
    init_logging_for_service("keepsake", level, None);
}

/// Initialize logging with a custom service name and optional log file.
///
/// Use this to tell hosts apart in the shared log stream, or to point the
/// log at a [`Paths::log_file`](crate::Paths::log_file) under a custom base dir.
pub fn init_logging_for_service(service_name: &str, level: &str, log_path: Option<PathBuf>) {
    observability::init_with_config(observability::LogConfig {
        service_name: service_name.into(),
        default_level: parse_level(level).as_str().to_ascii_lowercase(),
        log_path,
        also_stderr: std::env::var("KEEPSAKE_LOG_STDERR").is_ok(),
        ..Default::default()
    });
}

/// Parse a log level string into a tracing Level.
pub fn parse_level(level: &str) -> tracing::Level {
    match level.to_lowercase().as_str() {
        "trace" => tracing::Level::TRACE,
        "debug" => tracing::Level::DEBUG,
        "info" => tracing::Level::INFO,
        "warn" | "warning" => tracing::Level::WARN,
        "error" => tracing::Level::ERROR,
        _ => tracing::Level::INFO,
    }
}
