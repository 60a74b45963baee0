//! Core data access for tourbook reservations.
//! Configuration, record model, database backends and the entry repository.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;

pub use config::{read_properties, ConfigError, ConfigResult, DatabaseConfig, DbType};
pub use logging::{default_log_level, init_logging};
pub use model::entry::{Entry, EntryBuilder, EntryValidationError};
pub use repo::entry_repo::{
    parse_start_day, DbEntryRepository, EntryRepository, RepoError, RepoResult,
};
