//! Connection bootstrap and schema migrations.
//!
//! Connections are opened, configured (`foreign_keys=ON`, busy timeout),
//! and fully migrated before the catalog hands them to application code.
//! Migration state is mirrored to `PRAGMA user_version` so a newer schema
//! on disk is detected instead of silently misread.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use rusqlite::Connection;
use tracing::{debug, info};

use crate::error::{CatalogError, CatalogResult};

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    sql: "\
        CREATE TABLE admin (
            id INTEGER PRIMARY KEY,
            email TEXT NOT NULL UNIQUE,
            hashed_password TEXT NOT NULL
        );
        CREATE TABLE item (
            id INTEGER PRIMARY KEY,
            title TEXT,
            description TEXT,
            created TEXT NOT NULL UNIQUE,
            is_private INTEGER NOT NULL DEFAULT 0,
            original INTEGER NOT NULL DEFAULT 0
        );",
}];

/// Latest migration version known by this binary.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |m| m.version)
}

/// SQLite-backed catalog holding the `item` and `admin` tables.
///
/// The connection lives behind a mutex: each storage operation locks,
/// runs, and unlocks, so concurrent callers are serialized at the
/// storage boundary. No locks are held across operations.
#[derive(Debug)]
pub struct SqliteCatalog {
    conn: Mutex<Connection>,
}

impl SqliteCatalog {
    /// Open (or create) a catalog database file and apply pending
    /// migrations.
    pub fn open(path: impl AsRef<Path>) -> CatalogResult<Self> {
        debug!(path = %path.as_ref().display(), "opening catalog database");
        let conn = Connection::open(path)?;
        Self::bootstrap(conn)
    }

    /// Open an in-memory catalog. Intended for tests and embedding.
    pub fn in_memory() -> CatalogResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::bootstrap(conn)
    }

    fn bootstrap(mut conn: Connection) -> CatalogResult<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.busy_timeout(Duration::from_secs(5))?;
        apply_migrations(&mut conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub(crate) fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().expect("catalog connection poisoned")
    }
}

fn apply_migrations(conn: &mut Connection) -> CatalogResult<()> {
    let current: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    let latest = latest_version();

    if current > latest {
        return Err(CatalogError::UnsupportedSchemaVersion {
            db_version: current,
            latest_supported: latest,
        });
    }
    if current == latest {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for migration in MIGRATIONS {
        if migration.version <= current {
            continue;
        }
        tx.execute_batch(migration.sql)?;
        tx.execute_batch(&format!("PRAGMA user_version = {};", migration.version))?;
    }
    tx.commit()?;
    info!(from = current, to = latest, "applied catalog migrations");
    Ok(())
}

/// Returns `true` if the error is a UNIQUE constraint violation on the
/// given column (e.g. `"item.created"`).
pub(crate) fn is_unique_violation(err: &rusqlite::Error, column: &str) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(e, Some(msg)) => {
            e.code == rusqlite::ErrorCode::ConstraintViolation && msg.contains(column)
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_catalog_migrates() {
        let catalog = SqliteCatalog::in_memory().unwrap();
        let version: u32 = catalog
            .conn()
            .query_row("PRAGMA user_version;", [], |row| row.get(0))
            .unwrap();
        assert_eq!(version, latest_version());
    }

    #[test]
    fn reopen_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.db");
        drop(SqliteCatalog::open(&path).unwrap());
        // Second open finds migrations already applied.
        let catalog = SqliteCatalog::open(&path).unwrap();
        let version: u32 = catalog
            .conn()
            .query_row("PRAGMA user_version;", [], |row| row.get(0))
            .unwrap();
        assert_eq!(version, latest_version());
    }

    #[test]
    fn newer_schema_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.db");
        {
            let catalog = SqliteCatalog::open(&path).unwrap();
            catalog
                .conn()
                .execute_batch("PRAGMA user_version = 99;")
                .unwrap();
        }
        let err = SqliteCatalog::open(&path).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::UnsupportedSchemaVersion { db_version: 99, .. }
        ));
    }
}
