//! Reservation listing entry point.
//!
//! # Responsibility
//! - Load database configuration, query entries before today, print them.
//! - Report failures on stderr with a non-zero exit status.

use std::error::Error;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tourbook_core::{
    default_log_level, init_logging, DatabaseConfig, DbEntryRepository, EntryRepository,
};

const DEFAULT_PROPERTIES_FILE: &str = "resources/databaseConnection.properties";

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            let mut source = err.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {cause}");
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let level = std::env::var("TOURBOOK_LOG_LEVEL").unwrap_or_else(|_| default_log_level().into());
    let log_dir = std::env::var("TOURBOOK_LOG_DIR").ok();
    init_logging(&level, log_dir.as_deref())?;

    let config = DatabaseConfig::load(properties_path().as_deref())?;
    let repo = DbEntryRepository::new(config);

    let today = chrono::Local::now().date_naive();
    for entry in repo.get_entries(today)? {
        println!("{entry}");
    }
    log::info!("event=cli_run module=cli status=ok cutoff={today}");
    Ok(())
}

fn properties_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("TOURBOOK_CONFIG") {
        return Some(PathBuf::from(path));
    }
    let fallback = Path::new(DEFAULT_PROPERTIES_FILE);
    fallback.exists().then(|| fallback.to_path_buf())
}
