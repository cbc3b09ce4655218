//! Logging bootstrap.
//!
//! The library only emits through the `log` facade. Binaries call
//! [`init_logging`] once to attach a `flexi_logger` backend, either to stderr
//! or to rotating files in a directory. Messages use a `key=value` register,
//! e.g. `event=record_created namespace=todos id=...`.

use crate::error::{Result, TaskError};
use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::info;
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};

const LOG_FILE_BASENAME: &str = "tasklist";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;
const MAX_LOG_FILES: usize = 3;
const LEVELS: [&str; 6] = ["error", "warn", "info", "debug", "trace", "off"];

static LOGGING_STATE: OnceCell<LoggingState> = OnceCell::new();

struct LoggingState {
    level: String,
    log_dir: Option<PathBuf>,
    _logger: LoggerHandle,
}

/// Initializes logging at `level`, to stderr or into `log_dir`.
///
/// Calling again with the same settings is a no-op; different settings are
/// rejected since the backend can only be installed once per process.
pub fn init_logging(level: &str, log_dir: Option<&Path>) -> Result<()> {
    let level = normalize_level(level)?;
    let log_dir = log_dir.map(Path::to_path_buf);

    if let Some(state) = LOGGING_STATE.get() {
        if state.level == level && state.log_dir == log_dir {
            return Ok(());
        }
        return Err(TaskError::Configuration(format!(
            "logging already initialized with level `{}`; refusing to reconfigure",
            state.level
        )));
    }

    let state = LOGGING_STATE.get_or_try_init(|| -> Result<LoggingState> {
        let logger = Logger::try_with_str(&level)
            .map_err(|e| TaskError::Configuration(format!("invalid log level `{level}`: {e}")))?;

        let logger = match &log_dir {
            Some(dir) => {
                std::fs::create_dir_all(dir)?;
                logger
                    .log_to_file(
                        FileSpec::default()
                            .directory(dir.as_path())
                            .basename(LOG_FILE_BASENAME),
                    )
                    .rotate(
                        Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
                        Naming::Numbers,
                        Cleanup::KeepLogFiles(MAX_LOG_FILES),
                    )
                    .write_mode(WriteMode::BufferAndFlush)
                    .append()
                    .format_for_files(flexi_logger::detailed_format)
            }
            None => logger.log_to_stderr(),
        };

        let handle = logger
            .start()
            .map_err(|e| TaskError::Configuration(format!("failed to start logger: {e}")))?;

        Ok(LoggingState {
            level: level.clone(),
            log_dir: log_dir.clone(),
            _logger: handle,
        })
    })?;

    info!(
        "event=logging_init level={} target={} version={}",
        state.level,
        state
            .log_dir
            .as_ref()
            .map_or_else(|| "stderr".to_string(), |d| d.display().to_string()),
        env!("CARGO_PKG_VERSION")
    );
    Ok(())
}

fn normalize_level(level: &str) -> Result<String> {
    let normalized = level.trim().to_ascii_lowercase();
    if LEVELS.contains(&normalized.as_str()) {
        Ok(normalized)
    } else {
        Err(TaskError::Configuration(format!(
            "unsupported log level `{}`",
            level
        )))
    }
}
