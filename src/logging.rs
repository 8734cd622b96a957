//! File logging
//!
//! The terminal belongs to the TUI, so logs go to a file. Defaults to
//! `monsterdex.log` under the platform data directory; `MONSTERDEX_LOG`
//! takes an `EnvFilter` directive (default `info`).

use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const LOG_ENV: &str = "MONSTERDEX_LOG";
const LOG_FILE_NAME: &str = "monsterdex.log";

/// Default log location, `None` when the platform has no data directory
pub fn default_log_path() -> Option<PathBuf> {
    dirs_next::data_local_dir().map(|dir| dir.join("monsterdex").join(LOG_FILE_NAME))
}

/// Initialize file logging.
///
/// The returned guard must be held until exit so buffered lines are flushed.
/// Returns `None` (logging disabled) if the log directory can't be created.
pub fn init(path: Option<&Path>) -> Option<WorkerGuard> {
    let path = path.map(Path::to_path_buf).or_else(default_log_path)?;
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let file_name = path.file_name()?.to_owned();

    if let Err(e) = std::fs::create_dir_all(dir) {
        // No subscriber yet, and stdout is about to become the TUI
        eprintln!("Failed to create log directory {:?}: {}", dir, e);
        return None;
    }

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    let file_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true);

    if tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init()
        .is_err()
    {
        return None;
    }

    tracing::info!(path = %path.display(), "logging initialized");
    Some(guard)
}
