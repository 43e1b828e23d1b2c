//! Log setup for the binaries.

use std::{fs::OpenOptions, io, path::Path, sync::Arc};

use tracing_subscriber::{
    EnvFilter, Layer, filter, layer::SubscriberExt, util::SubscriberInitExt,
};

/// Send logs to `log_path` and warnings to stderr.
///
/// The file gets everything allowed by `RUST_LOG` (`info` by default). Only
/// warnings and errors go to stderr so they do not drown the menu on stdout.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened.
pub fn setup_logging(log_path: &Path) -> io::Result<()> {
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)?;

    let file_log = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_writer(Arc::new(log_file))
        .with_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")));

    let stderr_log = tracing_subscriber::fmt::layer()
        .compact()
        .with_writer(io::stderr)
        .with_filter(filter::LevelFilter::WARN);

    tracing_subscriber::registry()
        .with(file_log)
        .with(stderr_log)
        .init();

    Ok(())
}
