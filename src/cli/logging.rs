//! Logging initialization

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Initialize logging based on debug flag
/// Returns the log file path if debug logging is enabled
pub fn init_logging(debug: bool) -> Result<Option<PathBuf>> {
    if !debug {
        // No logging by default (silent operation)
        return Ok(None);
    }

    // Named temp file that outlives the process so the log can be inspected afterwards
    let (file, path) = tempfile::Builder::new()
        .prefix("k9s-config-")
        .suffix(".log")
        .tempfile()
        .context("Failed to create log file")?
        .keep()
        .context("Failed to keep log file")?;

    tracing_subscriber::fmt()
        .with_writer(file)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .with_ansi(false) // No ANSI codes in log file
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    Ok(Some(path))
}
