//! Process-wide logging bootstrap.
//!
//! # Responsibility
//! - Route `log` records to stderr or to rolling files in one directory.
//!
//! # Invariants
//! - Repeating `init_logging` with the same level and target is a no-op.
//! - A later call with a different level or target is rejected.

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::info;
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};

const LOG_FILE_BASENAME: &str = "tourbook";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;
const MAX_LOG_FILES: usize = 5;
const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

static ACTIVE: OnceCell<ActiveLogger> = OnceCell::new();

struct ActiveLogger {
    level: &'static str,
    log_dir: Option<PathBuf>,
    _handle: LoggerHandle,
}

/// Starts logging at `level`; `None` logs to stderr, `Some(dir)` writes
/// rolling `tourbook` files into the absolute directory `dir`.
///
/// # Errors
/// - Unknown level, blank or relative directory, or backend start failure.
/// - Logging is already active with another level or target.
pub fn init_logging(level: &str, log_dir: Option<&str>) -> Result<(), String> {
    let level = parse_level(level)?;
    let log_dir = log_dir.map(parse_log_dir).transpose()?;

    let active = ACTIVE.get_or_try_init(|| start_logger(level, log_dir.clone()))?;
    if active.level != level || active.log_dir != log_dir {
        return Err(format!(
            "logging already active with level `{}` on {}; refusing to switch to level `{}` on {}",
            active.level,
            describe_target(active.log_dir.as_deref()),
            level,
            describe_target(log_dir.as_deref())
        ));
    }
    Ok(())
}

/// `debug` in debug builds, `info` in release builds.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn start_logger(level: &'static str, log_dir: Option<PathBuf>) -> Result<ActiveLogger, String> {
    let logger = Logger::try_with_str(level)
        .map_err(|err| format!("invalid log level `{level}`: {err}"))?;

    let logger = match log_dir.as_deref() {
        Some(dir) => {
            std::fs::create_dir_all(dir).map_err(|err| {
                format!("failed to create log directory `{}`: {err}", dir.display())
            })?;
            logger
                .log_to_file(FileSpec::default().directory(dir).basename(LOG_FILE_BASENAME))
                .rotate(
                    Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
                    Naming::Numbers,
                    Cleanup::KeepLogFiles(MAX_LOG_FILES),
                )
                .write_mode(WriteMode::BufferAndFlush)
                .append()
                .format_for_files(flexi_logger::detailed_format)
        }
        None => logger
            .log_to_stderr()
            .format_for_stderr(flexi_logger::detailed_format),
    };

    let handle = logger
        .start()
        .map_err(|err| format!("failed to start logger: {err}"))?;

    info!(
        "event=logging_init module=core status=ok level={} target={} version={}",
        level,
        describe_target(log_dir.as_deref()),
        env!("CARGO_PKG_VERSION")
    );

    Ok(ActiveLogger {
        level,
        log_dir,
        _handle: handle,
    })
}

fn parse_level(level: &str) -> Result<&'static str, String> {
    let wanted = match level.trim().to_ascii_lowercase().as_str() {
        "warning" => "warn".to_string(),
        other => other.to_string(),
    };
    LEVELS
        .iter()
        .copied()
        .find(|known| *known == wanted)
        .ok_or_else(|| format!("unsupported log level `{wanted}`; expected one of {LEVELS:?}"))
}

fn parse_log_dir(log_dir: &str) -> Result<PathBuf, String> {
    let path = Path::new(log_dir.trim());
    if path.as_os_str().is_empty() {
        return Err("log directory cannot be empty".to_string());
    }
    if !path.is_absolute() {
        return Err(format!("log directory must be absolute, got `{}`", path.display()));
    }
    Ok(path.to_path_buf())
}

fn describe_target(log_dir: Option<&Path>) -> String {
    log_dir.map_or_else(|| "stderr".to_string(), |dir| dir.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::{describe_target, init_logging, parse_level, parse_log_dir};
    use std::path::Path;

    #[test]
    fn parse_level_normalizes_case_and_aliases() {
        assert_eq!(parse_level("INFO").unwrap(), "info");
        assert_eq!(parse_level(" warning ").unwrap(), "warn");
        assert!(parse_level("verbose").unwrap_err().contains("verbose"));
    }

    #[test]
    fn parse_log_dir_rejects_blank_and_relative_paths() {
        assert!(parse_log_dir("logs/dev").unwrap_err().contains("absolute"));
        assert!(parse_log_dir("   ").unwrap_err().contains("empty"));
        assert_eq!(parse_log_dir(" /var/log/tb ").unwrap(), Path::new("/var/log/tb"));
    }

    #[test]
    fn describe_target_names_stderr_when_no_directory() {
        assert_eq!(describe_target(None), "stderr");
        assert_eq!(describe_target(Some(Path::new("/var/log/tb"))), "/var/log/tb");
    }

    #[test]
    fn init_logging_is_idempotent_for_same_config_and_rejects_conflicts() {
        let temp = tempfile::tempdir().unwrap();
        let log_dir = temp.path().join("logs");
        let log_dir_str = log_dir.to_str().unwrap().to_string();
        let other_dir_str = temp.path().join("other").to_str().unwrap().to_string();

        init_logging("info", Some(&log_dir_str)).unwrap();
        init_logging("INFO", Some(&log_dir_str)).unwrap();
        assert!(log_dir.is_dir());

        let err = init_logging("debug", Some(&log_dir_str)).unwrap_err();
        assert!(err.contains("refusing to switch"));

        let err = init_logging("info", Some(&other_dir_str)).unwrap_err();
        assert!(err.contains("refusing to switch"));

        let err = init_logging("info", None).unwrap_err();
        assert!(err.contains("stderr"));
    }
}
