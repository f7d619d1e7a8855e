//! Tracing initialization and subscriber setup.

use super::file_writer::FileWriter;
use crate::infrastructure::{default_data_dir, expand_tilde};
use crate::Config;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Name of the log file inside the data directory.
pub const LOG_FILE: &str = "unimatch.log";

/// Initializes the tracing subscriber with rotating file output.
///
/// Sets up a subscriber pipeline that:
/// 1. Filters events by level (`RUST_LOG`, then `config.trace_level`, then `"info"`)
/// 2. Formats them as plain text lines
/// 3. Writes to a rotating file with backups
///
/// # File Location
///
/// `<data_dir>/unimatch.log`, where `data_dir` is `config.data_dir` (tilde
/// expanded) or [`default_data_dir`].
///
/// # Initialization Behavior
///
/// - Creates the data directory if it doesn't exist
/// - Silently skips setup if directory creation fails (logging is optional)
/// - Idempotent: only the first call installs a subscriber
///
/// Returns the log file path when a subscriber was installed.
///
/// # Example
///
/// ```rust
/// use unimatch::observability::init_tracing;
/// use unimatch::Config;
///
/// let dir = tempfile::tempdir()?;
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     data_dir: Some(dir.path().display().to_string()),
///     ..Default::default()
/// };
///
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// # Ok::<(), std::io::Error>(())
/// ```
pub fn init_tracing(config: &Config) -> Option<PathBuf> {
    let level = config.trace_level.clone().unwrap_or_else(|| "info".to_string());

    let data_dir = config
        .data_dir
        .as_deref()
        .map_or_else(default_data_dir, expand_tilde);
    if std::fs::create_dir_all(&data_dir).is_err() {
        return None;
    }

    let log_file = data_dir.join(LOG_FILE);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(FileWriter::new(log_file.clone()))
        .with_ansi(false)
        .with_target(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .ok()
        .map(|()| log_file)
}
