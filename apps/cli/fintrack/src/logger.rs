//! Logging for the fintrack CLI.
//!
//! Dual output: stderr with colors (warnings only unless `--verbose`) and a
//! plain log file with everything at the build's level. Initialization is
//! thread-safe and idempotent.

use crate::error::FintrackError;

use common::ErrorLocation;

use std::fs::File;
use std::io::stderr;
use std::path::Path;
use std::sync::Once;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::SystemTime;

use fern::Dispatch;
use fern::colors::Color::{Blue, Green, Magenta, Red, Yellow};
use fern::colors::ColoredLevelConfig;
use humantime::format_rfc3339;
use log::{LevelFilter, info, warn};

/// Thread-safe initialization guard.
static INIT_LOGGER_ONCE: Once = Once::new();

/// Tracks if logger initialization was already attempted.
static LOGGER_ALREADY_CALLED: AtomicBool = AtomicBool::new(false);

/// Log file name.
pub const LOG_FILE_NAME: &str = "fintrack.log";

const LOGGER_INITIALIZED_MESSAGE_PREFIX: &str = "Logger initialized with level: ";

const LOGGER_ALREADY_INITIALIZED_MESSAGE: &str = "Logger already initialized";

/// Default log level for debug builds.
#[cfg(debug_assertions)]
const LOG_LEVEL: LevelFilter = LevelFilter::Debug;

/// Default log level for release builds.
#[cfg(not(debug_assertions))]
const LOG_LEVEL: LevelFilter = LevelFilter::Info;

/// Level for the terminal; the log file always gets [`LOG_LEVEL`] or finer.
fn console_level(verbose: bool) -> LevelFilter {
    if verbose { LevelFilter::Debug } else { LevelFilter::Warn }
}

fn file_level(verbose: bool) -> LevelFilter {
    if verbose { LevelFilter::Debug } else { LOG_LEVEL }
}

/// Initialize the logger with dual output (stderr + file).
///
/// Safe to call multiple times: later calls log a warning and return Ok.
///
/// # Errors
///
/// Returns an error if the log directory or file cannot be created, or if
/// another global logger is already installed.
pub fn initialize(log_dir: &Path, verbose: bool) -> Result<(), FintrackError> {
    if LOGGER_ALREADY_CALLED.swap(true, Ordering::SeqCst) {
        warn!("{LOGGER_ALREADY_INITIALIZED_MESSAGE}");
        return Ok(());
    }

    let mut result = Ok(());

    INIT_LOGGER_ONCE.call_once(|| {
        result = initialize_internal(log_dir, verbose);
        if result.is_ok() {
            info!("{LOGGER_INITIALIZED_MESSAGE_PREFIX}{:?}", file_level(verbose));
        }
    });

    result
}

/// Create `log_dir` if needed and open the log file for appending.
#[track_caller]
pub(crate) fn open_log_file(log_dir: &Path) -> Result<File, FintrackError> {
    std::fs::create_dir_all(log_dir).map_err(|e| FintrackError::Fintrack {
        message: format!("Failed to create log directory {}: {e}", log_dir.display()),
        location: ErrorLocation::from(std::panic::Location::caller()),
    })?;

    fern::log_file(log_dir.join(LOG_FILE_NAME)).map_err(|e| FintrackError::Fintrack {
        message: format!("Failed to create log file: {e}"),
        location: ErrorLocation::from(std::panic::Location::caller()),
    })
}

#[track_caller]
fn initialize_internal(log_dir: &Path, verbose: bool) -> Result<(), FintrackError> {
    let log_file = open_log_file(log_dir)?;

    let color_configuration = ColoredLevelConfig::new()
        .debug(Blue)
        .info(Green)
        .warn(Yellow)
        .error(Red)
        .trace(Magenta);

    let base_dispatch = Dispatch::new()
        .level(file_level(verbose))
        // Dependency chatter stays out of the log unless verbose
        .level_for("hyper_util", LevelFilter::Warn)
        .level_for("reqwest", if verbose { LevelFilter::Debug } else { LevelFilter::Info });

    let stderr_dispatch = Dispatch::new()
        .level(console_level(verbose))
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{date} - {level}] {message}",
                date = format_rfc3339(SystemTime::now()),
                level = color_configuration.color(record.level()),
                message = message,
            ))
        })
        .chain(stderr());

    // File dispatch (plain text, no colors)
    let file_dispatch = Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{date} - {level}] {message} [{file}:{line}]",
                date = format_rfc3339(SystemTime::now()),
                level = record.level(),
                message = message,
                file = record.file().unwrap_or("unknown"),
                line = record.line().unwrap_or(0)
            ))
        })
        .chain(log_file);

    base_dispatch
        .chain(stderr_dispatch)
        .chain(file_dispatch)
        .apply()
        .map_err(|e| FintrackError::Fintrack {
            message: format!("Failed to initialize logger: {e}"),
            location: ErrorLocation::from(std::panic::Location::caller()),
        })?;

    Ok(())
}
