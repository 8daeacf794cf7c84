//! Storage traits and error types
//!
//! This module defines the trait interface for link store backends and
//! associated error types.

use crate::storage::LinkRecord;
use std::collections::HashSet;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for link store implementations
///
/// The store exclusively owns the persisted link table. Callers only ever go
/// through this interface.
pub trait LinkStore {
    /// Creates the link table if it does not exist
    ///
    /// Idempotent; called once at startup.
    fn ensure_schema(&mut self) -> StorageResult<()>;

    /// Inserts every URL not already present, as one atomic transaction
    ///
    /// # Returns
    ///
    /// The number of rows reported as new, according to the store's
    /// [`CountPolicy`](crate::config::CountPolicy). On error the whole batch
    /// has been rolled back and no URL from it is persisted.
    fn insert_if_absent_batch(&mut self, urls: &HashSet<String>) -> StorageResult<u64>;

    /// Counts the stored links
    fn count_links(&self) -> StorageResult<u64>;

    /// Returns true if the URL has a row
    fn contains(&self, url: &str) -> StorageResult<bool>;

    /// Lists all records in insertion order
    fn list_links(&self) -> StorageResult<Vec<LinkRecord>>;
}
