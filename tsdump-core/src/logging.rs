//! Logging setup for the tsdump binary.
//!
//! Diagnostics go to stderr because stdout carries rendered output. A run
//! without `--debug` only surfaces errors, so a successful dump leaves stderr
//! empty.

use crate::Result;

/// Maps the debug flag to the maximum enabled level.
pub fn level_for(debug: bool) -> tracing::Level {
    if debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::ERROR
    }
}

/// Initializes structured logging on stderr.
///
/// # Arguments
/// * `debug` - Enables DEBUG level events (catalog calls, assembly decisions)
///
/// # Example
/// ```rust,no_run
/// use tsdump_core::logging::init_logging;
///
/// init_logging(true).expect("Failed to initialize logging");
/// ```
pub fn init_logging(debug: bool) -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(level_for(debug))
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .try_init()
        .map_err(|e| {
            crate::error::TsdumpError::configuration(format!(
                "Failed to initialize logging: {}",
                e
            ))
        })?;

    Ok(())
}
