//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the LinkStore trait.

use crate::config::CountPolicy;
use crate::storage::schema::initialize_schema;
use crate::storage::traits::{LinkStore, StorageError, StorageResult};
use crate::storage::LinkRecord;
use rusqlite::{params, Connection, ErrorCode, OptionalExtension};
use std::collections::HashSet;
use std::path::Path;

/// SQLite link store
pub struct SqliteLinkStore {
    conn: Connection,
    count_policy: CountPolicy,
}

impl SqliteLinkStore {
    /// Opens or creates the database at `path` and ensures the schema
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    /// * `count_policy` - How batch insert counts are reported
    pub fn open(path: &Path, count_policy: CountPolicy) -> StorageResult<Self> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        let mut store = Self { conn, count_policy };
        store.ensure_schema()?;
        Ok(store)
    }

    /// Creates an in-memory database
    pub fn open_in_memory(count_policy: CountPolicy) -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        let mut store = Self { conn, count_policy };
        store.ensure_schema()?;
        Ok(store)
    }
}

impl LinkStore for SqliteLinkStore {
    fn ensure_schema(&mut self) -> StorageResult<()> {
        initialize_schema(&self.conn).map_err(|e| match e.sqlite_error_code() {
            Some(ErrorCode::ConstraintViolation) => StorageError::Database(
                "existing links table holds duplicate urls and cannot be made unique".to_string(),
            ),
            _ => StorageError::Sqlite(e),
        })
    }

    fn insert_if_absent_batch(&mut self, urls: &HashSet<String>) -> StorageResult<u64> {
        if urls.is_empty() {
            return Ok(0);
        }

        // Dropping the transaction on an early return rolls the batch back
        let tx = self.conn.transaction()?;
        let mut inserted: u64 = 0;
        {
            let mut stmt = tx.prepare_cached("INSERT OR IGNORE INTO links (url) VALUES (?1)")?;
            for url in urls {
                inserted += stmt.execute(params![url])? as u64;
            }
        }
        tx.commit()?;

        Ok(match self.count_policy {
            CountPolicy::Inserted => inserted,
            CountPolicy::Attempted => urls.len() as u64,
        })
    }

    fn count_links(&self) -> StorageResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM links", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn contains(&self, url: &str) -> StorageResult<bool> {
        let found: Option<i64> = self
            .conn
            .query_row("SELECT id FROM links WHERE url = ?1", params![url], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(found.is_some())
    }

    fn list_links(&self) -> StorageResult<Vec<LinkRecord>> {
        let mut stmt = self.conn.prepare("SELECT id, url FROM links ORDER BY id")?;

        let links = stmt
            .query_map([], |row| {
                Ok(LinkRecord {
                    id: row.get(0)?,
                    url: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(links)
    }
}
