//! Logging setup.
//!
//! The operational log file carries the detailed diagnostics; the user
//! only ever sees a generic failure notice on stdout. An optional
//! console layer mirrors events to stderr for debugging.

use std::fs::{self, OpenOptions};
use std::path::Path;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Initialize the global subscriber: an append-mode file layer plus an
/// optional console layer, both filtered at `level`.
pub fn init_logging(level: &str, file_path: &Path, console: bool) -> anyhow::Result<()> {
    if let Some(parent) = file_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let log_file = OpenOptions::new().create(true).append(true).open(file_path)?;

    let file_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_writer(log_file)
        .with_target(true)
        .with_filter(build_filter(level)?);

    let console_layer = if console {
        Some(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_filter(build_filter(level)?),
        )
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();

    tracing::trace!(level, file = %file_path.display(), "logging initialized");
    Ok(())
}

fn build_filter(level: &str) -> anyhow::Result<EnvFilter> {
    EnvFilter::try_new(level)
        .map_err(|e| anyhow::anyhow!("invalid log filter '{}': {}", level, e))
}
