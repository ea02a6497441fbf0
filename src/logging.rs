//! Logging setup for preop.
//!
//! Logs go to the console and to daily-rotating files in the app data
//! directory. Clinical field values are never logged, only counts, status
//! codes and endpoints.
//!
//! ```no_run
//! preop::logging::init();
//! tracing::info!("App started");
//! ```
//!
//! If the log directory cannot be used, logging falls back to the console
//! and the app still starts.

use anyhow::{Context as _, Result};
use std::path::{Path, PathBuf};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    EnvFilter, Layer as _, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _,
};

const MAX_LOG_FILES: usize = 10;

/// Gets the log directory path based on platform conventions
///
/// Returns:
/// - Windows: `%APPDATA%/preop/logs`
/// - macOS: `~/Library/Application Support/preop/logs`
/// - Linux: `~/.local/share/preop/logs`
///
/// # Errors
///
/// Returns error if the platform data directory is unknown.
pub fn get_log_dir() -> Result<PathBuf> {
    let base_dir = dirs::data_dir().context("Failed to determine data directory")?;
    Ok(base_dir.join("preop").join("logs"))
}

/// Rolling appenders for one log directory.
pub struct LogFiles {
    dir: PathBuf,
    all: RollingFileAppender,
    errors: RollingFileAppender,
}

impl LogFiles {
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

fn rolling_appender(log_dir: &Path, prefix: &str) -> Result<RollingFileAppender> {
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .max_log_files(MAX_LOG_FILES)
        .filename_prefix(prefix)
        .filename_suffix("log")
        .build(log_dir)
        .with_context(|| format!("Failed to create {prefix} log appender"))
}

/// Creates `log_dir` if needed and opens both appenders in it.
///
/// - `preop.<date>.log`: everything the env filter lets through
/// - `error.<date>.log`: warnings and errors only
///
/// # Errors
///
/// Returns error if the directory or either appender cannot be created.
pub fn open_log_files(log_dir: &Path) -> Result<LogFiles> {
    if !log_dir.exists() {
        std::fs::create_dir_all(log_dir)
            .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;
    }

    Ok(LogFiles {
        dir: log_dir.to_path_buf(),
        all: rolling_appender(log_dir, "preop")?,
        errors: rolling_appender(log_dir, "error")?,
    })
}

/// Console layer always; file layers only when `files` is present.
///
/// The filter defaults to `info` and can be overridden with `RUST_LOG`.
pub fn build_subscriber(
    files: Option<LogFiles>,
) -> impl tracing::Subscriber + Send + Sync + 'static {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let stdout_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_file(true)
        .pretty();

    let (all_logs_layer, error_logs_layer) = match files {
        Some(files) => (
            Some(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_line_number(true)
                    .with_ansi(false)
                    .with_writer(files.all),
            ),
            Some(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_line_number(true)
                    .with_ansi(false)
                    .with_writer(files.errors)
                    .with_filter(EnvFilter::new("warn")),
            ),
        ),
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(all_logs_layer)
        .with(error_logs_layer)
}

/// Initializes console and file logging.
///
/// Never fails: if the log files cannot be opened, only console logging is
/// installed and a warning records why.
pub fn init() {
    let (files, file_error) = match get_log_dir().and_then(|dir| open_log_files(&dir)) {
        Ok(files) => (Some(files), None),
        Err(e) => (None, Some(e)),
    };
    let log_dir = files.as_ref().map(|f| f.dir().to_path_buf());

    if let Err(e) = build_subscriber(files).try_init() {
        tracing::warn!("Tracing subscriber already installed: {e}");
        return;
    }

    match (log_dir, file_error) {
        (Some(dir), _) => tracing::info!("Logging initialized, log directory: {}", dir.display()),
        (None, Some(e)) => tracing::warn!("File logging disabled, console only: {e:#}"),
        (None, None) => {}
    }
}
