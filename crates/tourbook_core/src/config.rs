//! Database connection configuration.
//!
//! # Responsibility
//! - Read Java-style properties files and environment overrides.
//! - Validate the values once and hand back an explicit `DatabaseConfig`.
//!
//! # Invariants
//! - A `DatabaseConfig` always carries every key its `DbType` needs.
//! - Passwords are never rendered by `Debug` or the connection URL.

use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

pub const KEY_DB_TYPE: &str = "dbType";
pub const KEY_HOST: &str = "host";
pub const KEY_PORT: &str = "port";
pub const KEY_DB: &str = "db";
pub const KEY_USERNAME: &str = "username";
pub const KEY_PASSWORD: &str = "password";

const URL_SCHEME: &str = "jdbc";

const ENV_OVERRIDES: &[(&str, &str)] = &[
    (KEY_DB_TYPE, "TOURBOOK_DB_TYPE"),
    (KEY_HOST, "TOURBOOK_HOST"),
    (KEY_PORT, "TOURBOOK_PORT"),
    (KEY_DB, "TOURBOOK_DB"),
    (KEY_USERNAME, "TOURBOOK_USERNAME"),
    (KEY_PASSWORD, "TOURBOOK_PASSWORD"),
];

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug)]
pub enum ConfigError {
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: java_properties::PropertiesError,
    },
    MissingKey(&'static str),
    InvalidPort(String),
    UnsupportedDbType(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open { path, source } => {
                write!(f, "failed to open properties `{}`: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "failed to parse properties `{}`: {source}", path.display())
            }
            Self::MissingKey(key) => write!(f, "missing required configuration key `{key}`"),
            Self::InvalidPort(value) => write!(f, "invalid port `{value}`; expected 0..=65535"),
            Self::UnsupportedDbType(value) => {
                write!(f, "unsupported dbType `{value}`; expected mysql|sqlite")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Open { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::MissingKey(_) | Self::InvalidPort(_) | Self::UnsupportedDbType(_) => None,
        }
    }
}

/// Database engines the repository can talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbType {
    MySql,
    Sqlite,
}

impl DbType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MySql => "mysql",
            Self::Sqlite => "sqlite",
        }
    }

    fn parse(value: &str) -> ConfigResult<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "mysql" => Ok(Self::MySql),
            "sqlite" => Ok(Self::Sqlite),
            _ => Err(ConfigError::UnsupportedDbType(value.to_string())),
        }
    }
}

/// Validated connection settings.
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub db_type: DbType,
    pub host: String,
    pub port: Option<u16>,
    /// Database name for MySQL, file path for SQLite.
    pub db: String,
    pub username: String,
    pub password: String,
}

impl Debug for DatabaseConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("db_type", &self.db_type)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("db", &self.db)
            .field("username", &self.username)
            .field("password", &"****")
            .finish()
    }
}

impl DatabaseConfig {
    /// Loads configuration from an optional properties file, then applies
    /// `TOURBOOK_*` environment overrides and validates the result.
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        let mut values = match path {
            Some(path) => read_properties(path)?,
            None => HashMap::new(),
        };

        for (key, env_name) in ENV_OVERRIDES {
            if let Ok(value) = std::env::var(env_name) {
                values.insert((*key).to_string(), value);
            }
        }

        Self::from_values(&values)
    }

    /// Validates raw key/value pairs.
    ///
    /// # Errors
    /// - `UnsupportedDbType` when `dbType` is not `mysql` or `sqlite`.
    /// - `MissingKey` when a key required by the db type is absent or blank.
    /// - `InvalidPort` when `port` is not a valid TCP port.
    pub fn from_values(values: &HashMap<String, String>) -> ConfigResult<Self> {
        let db_type = DbType::parse(&required(values, KEY_DB_TYPE)?)?;
        let db = required(values, KEY_DB)?;

        let config = match db_type {
            DbType::MySql => Self {
                db_type,
                host: required(values, KEY_HOST)?,
                port: Some(parse_port(&required(values, KEY_PORT)?)?),
                db,
                username: required(values, KEY_USERNAME)?,
                password: values
                    .get(KEY_PASSWORD)
                    .cloned()
                    .ok_or(ConfigError::MissingKey(KEY_PASSWORD))?,
            },
            DbType::Sqlite => Self {
                db_type,
                host: optional(values, KEY_HOST).unwrap_or_default(),
                port: optional(values, KEY_PORT)
                    .map(|value| parse_port(&value))
                    .transpose()?,
                db,
                username: optional(values, KEY_USERNAME).unwrap_or_default(),
                password: values.get(KEY_PASSWORD).cloned().unwrap_or_default(),
            },
        };

        Ok(config)
    }

    /// Connection string in `<scheme>:<dbtype>://<host>:<port>/<db>` form.
    ///
    /// SQLite has no network endpoint and renders as `<scheme>:sqlite:<path>`.
    pub fn connection_url(&self) -> String {
        match self.db_type {
            DbType::MySql => format!(
                "{URL_SCHEME}:{}://{}:{}/{}",
                self.db_type.as_str(),
                self.host,
                self.port.unwrap_or_default(),
                self.db
            ),
            DbType::Sqlite => format!("{URL_SCHEME}:{}:{}", self.db_type.as_str(), self.db),
        }
    }
}

/// Reads a Java-style properties file without touching the environment.
///
/// Accepts `key=value`, `key:value` and `key value` lines with `#`/`!`
/// comments. Values are taken literally; `$` has no special meaning.
pub fn read_properties(path: impl AsRef<Path>) -> ConfigResult<HashMap<String, String>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| ConfigError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    java_properties::read(BufReader::new(file)).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn optional(values: &HashMap<String, String>, key: &str) -> Option<String> {
    values
        .get(key)
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

fn required(values: &HashMap<String, String>, key: &'static str) -> ConfigResult<String> {
    optional(values, key).ok_or(ConfigError::MissingKey(key))
}

fn parse_port(value: &str) -> ConfigResult<u16> {
    value
        .trim()
        .parse::<u16>()
        .map_err(|_| ConfigError::InvalidPort(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::{parse_port, ConfigError, DbType};

    #[test]
    fn db_type_parse_is_case_insensitive() {
        assert_eq!(DbType::parse("MySQL").unwrap(), DbType::MySql);
        assert_eq!(DbType::parse(" sqlite ").unwrap(), DbType::Sqlite);
    }

    #[test]
    fn db_type_parse_rejects_unknown_engine() {
        let err = DbType::parse("oracle").unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedDbType(value) if value == "oracle"));
    }

    #[test]
    fn parse_port_rejects_out_of_range() {
        assert_eq!(parse_port("3306").unwrap(), 3306);
        assert!(matches!(
            parse_port("70000"),
            Err(ConfigError::InvalidPort(_))
        ));
        assert!(matches!(parse_port("null"), Err(ConfigError::InvalidPort(_))));
    }
}
