//! Logging initialization

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

/// Initialize logging based on the debug flag
///
/// With `debug`, everything down to debug level goes to a temporary log file
/// whose path is returned. Otherwise only warnings are written, to stderr,
/// so stdout carries nothing but the report. `RUST_LOG` overrides the level
/// in both cases.
pub fn init_logging(debug: bool) -> Result<Option<PathBuf>> {
    if debug {
        let (file, path) = tempfile::Builder::new()
            .prefix("check-gke-ingress-")
            .suffix(".log")
            .tempfile()
            .context("Failed to create debug log file")?
            .keep()
            .context("Failed to persist debug log file")?;

        tracing_subscriber::fmt()
            .with_writer(file)
            .with_env_filter(env_filter("debug"))
            .with_ansi(false)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .init();

        Ok(Some(path))
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(env_filter("warn"))
            .with_target(false)
            .init();

        Ok(None)
    }
}

fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}
