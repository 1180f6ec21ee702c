//! SQLite-backed key-value persistence.
//!
//! Each persisted snapshot lives in a single named slot of the `kv`
//! table: the alarm list under `"alarms"`, the stopwatch under
//! `"stopwatch"`. There is exactly one snapshot per slot, no versioning.

use std::path::Path;

use rusqlite::{params, Connection};

use super::data_dir;
use crate::error::StoreError;

/// SQLite database holding the persisted snapshots.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `~/.config/reveille/reveille.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, StoreError> {
        let path = data_dir()?.join("reveille.db");
        Self::open_at(&path)
    }

    /// Open a database at an explicit path (tests use a temp dir).
    pub fn open_at(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(|source| StoreError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    #[cfg(test)]
    pub fn open_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(|source| StoreError::OpenFailed {
            path: ":memory:".into(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )
    }

    /// Read a slot. `None` when the slot has never been written.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let mut rows = stmt.query(params![key])?;
        match rows.next()? {
            Some(row) => Ok(Some(row.get(0)?)),
            None => Ok(None),
        }
    }

    /// Overwrite a slot.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_slot_reads_none() {
        let db = Database::open_memory().unwrap();
        assert_eq!(db.kv_get("alarms").unwrap(), None);
    }

    #[test]
    fn set_then_get_roundtrips() {
        let db = Database::open_memory().unwrap();
        db.kv_set("alarms", "[]").unwrap();
        assert_eq!(db.kv_get("alarms").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn set_overwrites_the_single_snapshot() {
        let db = Database::open_memory().unwrap();
        db.kv_set("alarms", "old").unwrap();
        db.kv_set("alarms", "new").unwrap();
        assert_eq!(db.kv_get("alarms").unwrap().as_deref(), Some("new"));
    }

    #[test]
    fn persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reveille.db");
        {
            let db = Database::open_at(&path).unwrap();
            db.kv_set("stopwatch", "{}").unwrap();
        }
        let db = Database::open_at(&path).unwrap();
        assert_eq!(db.kv_get("stopwatch").unwrap().as_deref(), Some("{}"));
    }
}
