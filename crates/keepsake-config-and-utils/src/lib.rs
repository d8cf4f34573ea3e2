//! Core types, configuration, and utilities shared by the Keepsake crates.

mod config;
mod error;
mod logging;
mod paths;

pub use config::{Config, DEFAULT_DATE_FORMAT, DEFAULT_LOG_LEVEL, DEFAULT_ORIGIN, DEFAULT_STORE_QUOTA_BYTES};
pub use error::{CoreError, CoreResult};
pub use logging::{init_logging, init_logging_for_service, parse_level};
pub use paths::Paths;
