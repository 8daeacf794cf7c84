//! Storage module for persisting discovered links
//!
//! This module handles all database operations for the crawler:
//! - SQLite database initialization and schema management
//! - Atomic insert-if-absent batches with accurate insert counts
//! - Read access for statistics

mod schema;
mod sqlite;
mod traits;

pub use schema::get_schema_version;
pub use sqlite::SqliteLinkStore;
pub use traits::{LinkStore, StorageError, StorageResult};

use crate::config::CountPolicy;

use std::path::Path;

/// Opens (creating if needed) the link store at `path`
pub fn open_storage(
    path: &Path,
    count_policy: CountPolicy,
) -> crate::Result<SqliteLinkStore> {
    Ok(SqliteLinkStore::open(path, count_policy)?)
}

/// Represents a stored link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRecord {
    pub id: i64,
    pub url: String,
}
