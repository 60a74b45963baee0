//! Database connection bootstrap for the supported engines.
//!
//! # Responsibility
//! - Open scoped connections for SQLite (file) and MySQL (network).
//! - Normalize driver errors into one transport error type.
//!
//! # Invariants
//! - Connections are opened per call and released when the caller's scope
//!   ends; nothing here caches or pools them.
//! - Connections opened here are only used for reads.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

pub mod mysql;
mod sqlite;

pub use sqlite::open_db_read_only;

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    MySql(sqlx::Error),
    Runtime(std::io::Error),
    Timeout(Duration),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::MySql(err) => write!(f, "{err}"),
            Self::Runtime(err) => write!(f, "failed to start database runtime: {err}"),
            Self::Timeout(limit) => {
                write!(f, "database connection timed out after {}s", limit.as_secs())
            }
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::MySql(err) => Some(err),
            Self::Runtime(err) => Some(err),
            Self::Timeout(_) => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

impl From<sqlx::Error> for DbError {
    fn from(value: sqlx::Error) -> Self {
        Self::MySql(value)
    }
}
