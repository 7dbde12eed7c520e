#![forbid(unsafe_code)]

//! Logging setup.
//!
//! Log output goes to a file, never to stdout: the terminal is in raw mode
//! with the screen owned by the presenter, and a stray log line would
//! corrupt the frame. Logging is off unless a file is configured.

use std::fs::OpenOptions;
use std::io;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

/// Install the global subscriber writing to `path`, filtered by the
/// `REKEY_LOG` environment variable (default level: `info`).
///
/// # Errors
///
/// Returns an error if the log file cannot be opened.
pub fn init(path: &str) -> io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter = EnvFilter::try_from_env("REKEY_LOG").unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();

    tracing::info!(target: "rekey::app", "logging initialized");
    Ok(())
}
