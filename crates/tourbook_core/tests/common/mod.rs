#![allow(dead_code)]

use rusqlite::{params, Connection};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tourbook_core::DbEntryRepository;

const SCHEMA_SQL: &str = "
CREATE TABLE guides (
    idguides INTEGER PRIMARY KEY,
    First TEXT
);
CREATE TABLE locations (
    idlocations INTEGER PRIMARY KEY,
    location TEXT
);
CREATE TABLE reservation (
    idreservation INTEGER PRIMARY KEY,
    guide INTEGER NOT NULL,
    location INTEGER NOT NULL,
    First TEXT,
    Last TEXT,
    StartDay TEXT
);
INSERT INTO guides (idguides, First) VALUES (1, 'Ana'), (2, 'Bo');
INSERT INTO locations (idlocations, location) VALUES (10, 'Lisbon'), (20, 'Porto');
";

/// Temporary reservation database seeded with two guides and two locations.
pub struct ReservationDb {
    _dir: TempDir,
    pub path: PathBuf,
}

impl ReservationDb {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tours.db");
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch(SCHEMA_SQL).unwrap();
        Self { _dir: dir, path }
    }

    pub fn insert(
        &self,
        guide: i64,
        location: i64,
        first: Option<&str>,
        last: Option<&str>,
        start_day: &str,
    ) {
        let conn = Connection::open(&self.path).unwrap();
        conn.execute(
            "INSERT INTO reservation (guide, location, First, Last, StartDay)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![guide, location, first, last, start_day],
        )
        .unwrap();
    }

    pub fn repo(&self) -> DbEntryRepository {
        sqlite_repo(&self.path)
    }
}

pub fn sqlite_values(path: &Path) -> HashMap<String, String> {
    HashMap::from([
        ("dbType".to_string(), "sqlite".to_string()),
        ("db".to_string(), path.to_str().unwrap().to_string()),
    ])
}

pub fn sqlite_repo(path: &Path) -> DbEntryRepository {
    DbEntryRepository::from_values(&sqlite_values(path)).unwrap()
}

pub fn mysql_values() -> HashMap<String, String> {
    HashMap::from([
        ("dbType".to_string(), "mysql".to_string()),
        ("host".to_string(), "127.0.0.1".to_string()),
        ("port".to_string(), "3306".to_string()),
        ("db".to_string(), "tours".to_string()),
        ("username".to_string(), "booker".to_string()),
        ("password".to_string(), "s3cret".to_string()),
    ])
}
