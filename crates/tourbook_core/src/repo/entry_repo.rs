//! Reservation entry repository contracts and database implementation.
//!
//! # Responsibility
//! - Translate a cutoff date into the ordered list of reservation entries.
//! - Keep SQL and driver details inside the persistence boundary.
//!
//! # Invariants
//! - Every call opens its own connection and releases it before returning.
//! - Failures are returned to the caller; an empty list always means
//!   "no matching rows".
//! - Rows are returned in result-set order without re-sorting.

use crate::config::{ConfigError, DatabaseConfig, DbType};
use crate::db::{mysql, open_db_read_only, DbError};
use crate::model::entry::{Entry, EntryValidationError};
use crate::repo::query::{
    parameterized_query, query_text, DATE_FORMAT, DAY_INDEX, FIRST_NAME_INDEX, GUIDE_INDEX,
    LAST_NAME_INDEX, LOCATION_INDEX, QUERY_FIELD_NAMES,
};
use chrono::NaiveDate;
use log::{error, info, warn};
use sqlx::mysql::MySqlRow;
use sqlx::{Connection as _, Row as _};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error, split by the stage that failed.
#[derive(Debug)]
pub enum RepoError {
    Config(ConfigError),
    Connection(DbError),
    Query(DbError),
    Validation(EntryValidationError),
    InvalidData(String),
    InvalidDate {
        value: String,
        source: Option<chrono::ParseError>,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(err) => write!(f, "configuration error: {err}"),
            Self::Connection(err) => write!(f, "connection failed: {err}"),
            Self::Query(err) => write!(f, "query failed: {err}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid reservation data: {message}"),
            Self::InvalidDate {
                value,
                source: Some(source),
            } => write!(f, "invalid start day `{value}`: {source}"),
            Self::InvalidDate {
                value,
                source: None,
            } => write!(f, "invalid start day `{value}`: expected YYYY-MM-DD"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Connection(err) => Some(err),
            Self::Query(err) => Some(err),
            Self::Validation(err) => Some(err),
            Self::InvalidData(_) => None,
            Self::InvalidDate { source, .. } => source
                .as_ref()
                .map(|err| err as &(dyn Error + 'static)),
        }
    }
}

impl From<ConfigError> for RepoError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<EntryValidationError> for RepoError {
    fn from(value: EntryValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Read-only access to reservation entries.
pub trait EntryRepository {
    /// Returns every reservation whose start day is strictly before `cutoff`.
    fn get_entries(&self, cutoff: NaiveDate) -> RepoResult<Vec<Entry>>;
}

/// Repository backed by a SQLite file or a MySQL server.
///
/// Calls block the current thread. MySQL calls start their own runtime, so
/// they must not be made from inside an async context.
#[derive(Debug, Clone)]
pub struct DbEntryRepository {
    config: DatabaseConfig,
    url: String,
}

impl DbEntryRepository {
    pub fn new(config: DatabaseConfig) -> Self {
        let url = config.connection_url();
        info!(
            "event=repo_init module=repo status=ok db_type={} url={}",
            config.db_type.as_str(),
            url
        );
        Self { config, url }
    }

    /// Validates raw configuration values before building the repository.
    pub fn from_values(values: &HashMap<String, String>) -> RepoResult<Self> {
        let config = DatabaseConfig::from_values(values)?;
        Ok(Self::new(config))
    }

    pub fn connection_url(&self) -> &str {
        &self.url
    }

    pub fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    fn sqlite_entries(&self, cutoff: NaiveDate) -> RepoResult<Vec<Entry>> {
        let conn = open_db_read_only(&self.config.db).map_err(RepoError::Connection)?;
        let mut stmt = conn
            .prepare(&parameterized_query())
            .map_err(sqlite_query_error)?;
        let mut rows = stmt
            .query([cutoff.format(DATE_FORMAT).to_string()])
            .map_err(sqlite_query_error)?;

        let mut entries = Vec::new();
        while let Some(row) = rows.next().map_err(sqlite_query_error)? {
            entries.push(EntryRow::from_sqlite(row)?.into_entry()?);
        }
        Ok(entries)
    }

    fn mysql_entries(&self, cutoff: NaiveDate) -> RepoResult<Vec<Entry>> {
        let runtime = mysql::blocking_runtime().map_err(RepoError::Connection)?;
        runtime.block_on(fetch_mysql_entries(&self.config, cutoff))
    }
}

impl EntryRepository for DbEntryRepository {
    fn get_entries(&self, cutoff: NaiveDate) -> RepoResult<Vec<Entry>> {
        let started_at = Instant::now();
        info!(
            "event=entries_query module=repo status=start db_type={} query={}",
            self.config.db_type.as_str(),
            query_text(cutoff)
        );

        let result = match self.config.db_type {
            DbType::Sqlite => self.sqlite_entries(cutoff),
            DbType::MySql => self.mysql_entries(cutoff),
        };

        match &result {
            Ok(entries) => info!(
                "event=entries_query module=repo status=ok rows={} duration_ms={}",
                entries.len(),
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=entries_query module=repo status=error duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            ),
        }

        result
    }
}

/// Parses a start day in `YYYY-MM-DD` form.
///
/// The value must be exactly the canonical rendering of the date it names:
/// zero-padded month and day, no sign, no surrounding whitespace.
///
/// # Errors
/// - Returns `InvalidDate` for anything else, including trailing time parts.
pub fn parse_start_day(value: &str) -> RepoResult<NaiveDate> {
    let date = NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|source| {
        RepoError::InvalidDate {
            value: value.to_string(),
            source: Some(source),
        }
    })?;

    if date.format(DATE_FORMAT).to_string() != value {
        return Err(RepoError::InvalidDate {
            value: value.to_string(),
            source: None,
        });
    }
    Ok(date)
}

/// Nullable column values as read from either engine.
struct EntryRow {
    guide: Option<String>,
    location: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    start_day: Option<String>,
}

impl EntryRow {
    fn from_sqlite(row: &rusqlite::Row<'_>) -> RepoResult<Self> {
        let text = |index: usize| {
            row.get::<_, Option<String>>(index)
                .map_err(sqlite_query_error)
        };

        Ok(Self {
            guide: text(GUIDE_INDEX)?,
            location: text(LOCATION_INDEX)?,
            first_name: text(FIRST_NAME_INDEX)?,
            last_name: text(LAST_NAME_INDEX)?,
            start_day: text(DAY_INDEX)?,
        })
    }

    fn from_mysql(row: &MySqlRow) -> RepoResult<Self> {
        let text = |index: usize| {
            row.try_get::<Option<String>, _>(index)
                .map_err(|err| RepoError::Query(DbError::MySql(err)))
        };

        // DATE columns decode natively; normalize to text so both engines
        // share one parse path.
        let start_day = match row.try_get::<Option<NaiveDate>, _>(DAY_INDEX) {
            Ok(day) => day.map(|day| day.format(DATE_FORMAT).to_string()),
            Err(_) => text(DAY_INDEX)?,
        };

        Ok(Self {
            guide: text(GUIDE_INDEX)?,
            location: text(LOCATION_INDEX)?,
            first_name: text(FIRST_NAME_INDEX)?,
            last_name: text(LAST_NAME_INDEX)?,
            start_day,
        })
    }

    fn into_entry(self) -> RepoResult<Entry> {
        let start_day = self.start_day.ok_or_else(|| null_column(DAY_INDEX))?;
        let start_date = parse_start_day(&start_day)?;

        let entry = Entry::builder()
            .guide(self.guide.ok_or_else(|| null_column(GUIDE_INDEX))?)
            .location(self.location.ok_or_else(|| null_column(LOCATION_INDEX))?)
            .start_date(start_date)
            .first_name(self.first_name.ok_or_else(|| null_column(FIRST_NAME_INDEX))?)
            .last_name(self.last_name.ok_or_else(|| null_column(LAST_NAME_INDEX))?)
            .try_build()?;
        Ok(entry)
    }
}

async fn fetch_mysql_entries(config: &DatabaseConfig, cutoff: NaiveDate) -> RepoResult<Vec<Entry>> {
    let mut conn = mysql::connect(config)
        .await
        .map_err(RepoError::Connection)?;

    let sql = parameterized_query();
    let fetched = sqlx::query(&sql).bind(cutoff).fetch_all(&mut conn).await;

    if let Err(err) = conn.close().await {
        warn!(
            "event=db_close module=db status=error mode=mysql error={}",
            err
        );
    }

    let rows = fetched.map_err(|err| RepoError::Query(DbError::MySql(err)))?;
    rows.iter()
        .map(|row| EntryRow::from_mysql(row)?.into_entry())
        .collect()
}

fn null_column(index: usize) -> RepoError {
    RepoError::InvalidData(format!("unexpected NULL in `{}`", QUERY_FIELD_NAMES[index]))
}

fn sqlite_query_error(err: rusqlite::Error) -> RepoError {
    RepoError::Query(DbError::Sqlite(err))
}
