//! MySQL connection bootstrap over the network protocol.
//!
//! The driver is async; callers drive it on a per-call current-thread
//! runtime so the public API stays blocking.

use super::{DbError, DbResult};
use crate::config::DatabaseConfig;
use log::{error, info};
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection};
use sqlx::ConnectOptions;
use std::time::{Duration, Instant};
use tokio::runtime::Runtime;

pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Builds driver options from validated settings.
///
/// Credentials are passed as options, never embedded in a URL string.
pub fn connect_options(config: &DatabaseConfig) -> MySqlConnectOptions {
    let mut options = MySqlConnectOptions::new()
        .host(&config.host)
        .username(&config.username)
        .database(&config.db);
    if let Some(port) = config.port {
        options = options.port(port);
    }
    if !config.password.is_empty() {
        options = options.password(&config.password);
    }
    options
}

/// Creates the single-threaded runtime that drives one repository call.
pub fn blocking_runtime() -> DbResult<Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(DbError::Runtime)
}

/// Opens one MySQL connection, bounded by `CONNECT_TIMEOUT`.
///
/// # Side effects
/// - Emits `db_open` logging events with duration and status.
pub async fn connect(config: &DatabaseConfig) -> DbResult<MySqlConnection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode=mysql");

    let attempt = tokio::time::timeout(CONNECT_TIMEOUT, connect_options(config).connect()).await;
    let result = match attempt {
        Ok(connected) => connected.map_err(DbError::from),
        Err(_) => Err(DbError::Timeout(CONNECT_TIMEOUT)),
    };

    match result {
        Ok(conn) => {
            info!(
                "event=db_open module=db status=ok mode=mysql duration_ms={}",
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode=mysql duration_ms={} error_code=db_open_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}
