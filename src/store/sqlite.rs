use rusqlite::{Connection, Transaction, TransactionBehavior};
use std::path::Path;
use tracing::debug;

use super::schema_gen::{generate_create_table, generate_indexes};
use crate::error::Result;
use crate::schema::{TableSchema, ALL_TABLES};

/// SQLite-backed entity store
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open (or create) the database at `db_path` and ensure the tables exist
    pub fn open(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        debug!(path = ?db_path, "opening database");
        let conn = Connection::open(db_path)?;
        conn.execute_batch(
            "PRAGMA foreign_keys = ON;
             PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;",
        )?;

        Self::with_connection(conn)
    }

    /// In-memory database, mostly for tests
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        let store = Self { conn };
        store.create_tables(ALL_TABLES)?;
        Ok(store)
    }

    /// Create the given tables and their indexes if missing
    pub fn create_tables(&self, schemas: &[&TableSchema]) -> Result<()> {
        for schema in schemas {
            self.conn.execute(&generate_create_table(schema), [])?;

            for index_sql in generate_indexes(schema) {
                self.conn.execute(&index_sql, [])?;
            }
        }

        Ok(())
    }

    /// Start a write transaction. The write lock is taken immediately so
    /// check-then-write sequences inside it cannot interleave with other writers.
    pub fn begin(&mut self) -> Result<Transaction<'_>> {
        Ok(self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?)
    }

    /// Read-only access for queries that need no transaction
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn table_names(conn: &Connection) -> Vec<String> {
        conn.prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .filter_map(|r| r.ok())
            .collect()
    }

    #[test]
    fn test_open_creates_tables() {
        let store = Store::open_in_memory().unwrap();
        assert_eq!(
            table_names(store.connection()),
            vec!["missions", "spy_cats", "targets"]
        );
    }

    #[test]
    fn test_open_is_idempotent_and_creates_parent_dir() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("agency.db");

        Store::open(&path).unwrap();
        let store = Store::open(&path).unwrap();
        assert_eq!(table_names(store.connection()).len(), 3);
    }

    #[test]
    fn test_foreign_keys_enforced() {
        let store = Store::open_in_memory().unwrap();
        let result = store.connection().execute(
            "INSERT INTO targets (name, country, mission_id) VALUES ('A', 'X', 42)",
            [],
        );
        assert!(result.is_err());
    }
}
