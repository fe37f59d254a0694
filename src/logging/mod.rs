//! Diagnostic logging via `tracing`.
//!
//! The library only emits `tracing` events; the binary installs a
//! stderr subscriber here so stdout stays reserved for the display
//! surface. Swallowed fetch failures surface as `ERROR` events.

use std::io::IsTerminal;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Errors while installing the subscriber.
#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("invalid log filter {filter:?}: {message}")]
    InvalidFilter { filter: String, message: String },
}

/// Parse a level (`warn`) or filter directive (`userfetch=debug,warn`).
pub fn build_filter(level: &str) -> Result<EnvFilter, LoggingError> {
    EnvFilter::try_new(level.trim()).map_err(|e| LoggingError::InvalidFilter {
        filter: level.to_string(),
        message: e.to_string(),
    })
}

/// Install the global stderr subscriber.
///
/// Calling this more than once keeps the first subscriber.
pub fn init(level: &str) -> Result<(), LoggingError> {
    let filter = build_filter(level)?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .try_init();

    Ok(())
}
