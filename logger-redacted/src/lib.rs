//! Logging with automatic PII redaction
//!
//! Patient names, contact details and medical record numbers routinely end up
//! in log messages (`"admitted patient MRN004512"`). This crate installs the
//! process-wide `tracing` subscriber and routes every formatted line through a
//! [`PiiRedactor`] before it reaches the output.
//!
//! # Detected Data Types
//!
//! - **Email Addresses**: user@example.com → u***@e***
//! - **Phone Numbers**: (555) 123-4567 → (***) ***-****
//! - **SSN**: 123-45-6789 → ***-**-****
//! - **Credit Cards**: 4111-1111-1111-1111 → ****-****-****-****
//! - **IP Addresses**: 192.168.1.1 → 192.***.***.1
//! - **Medical Record Numbers**: MRN123456 → MRN[REDACTED]
//!
//! With `hash_for_correlation` enabled each value is replaced by a short
//! SHA-256 digest instead, so the same patient can be followed across lines
//! without exposing the raw value.
//!
//! # Example
//!
//! ```rust,no_run
//! use logger_redacted::{init_logging, LoggerConfig};
//!
//! init_logging(&LoggerConfig::default()).expect("logger installed once");
//! tracing::info!("Registered patient jane.doe@example.com");
//! // Output: "Registered patient EMAIL[...]"
//! ```

pub mod config;
pub mod redactor;
pub mod writer;

pub use config::*;
pub use redactor::*;
pub use writer::*;

use std::sync::Arc;
use thiserror::Error;
use tracing_subscriber::{
    fmt::{self, time::ChronoUtc},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

#[derive(Error, Debug)]
pub enum LoggerError {
    #[error("Invalid log filter '{filter}': {message}")]
    InvalidFilter { filter: String, message: String },

    #[error("Failed to install global subscriber: {0}")]
    Init(String),
}

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` takes precedence over `config.log_level` when set.
pub fn init_logging(config: &LoggerConfig) -> Result<(), LoggerError> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.log_level).map_err(|e| LoggerError::InvalidFilter {
            filter: config.log_level.clone(),
            message: e.to_string(),
        })?,
    };

    let redactor = Arc::new(PiiRedactor::new(config.redaction_config()));
    let writer = RedactingMakeWriter::new(std::io::stdout, redactor)
        .with_enabled(config.redaction_enabled);

    let registry = tracing_subscriber::registry().with(env_filter);

    let result = match config.format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(config.include_targets)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(false)
                    .with_writer(writer),
            )
            .try_init(),
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .with_target(config.include_targets)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(false)
                    .with_writer(writer),
            )
            .try_init(),
    };

    result.map_err(|e| LoggerError::Init(e.to_string()))
}
