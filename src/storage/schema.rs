//! Database schema definitions
//!
//! This module contains the SQL schema for the Wiki-Ripple database.

/// SQL schema for the database
pub const SCHEMA_SQL: &str = r#"
-- Every distinct URL ever handed to the store
CREATE TABLE IF NOT EXISTS links (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    url TEXT NOT NULL UNIQUE
);

-- Tables created by older tools may lack the UNIQUE constraint above
CREATE UNIQUE INDEX IF NOT EXISTS links_url ON links(url);
"#;

/// Initializes the database schema
///
/// Safe to call on every start; existing tables are left alone.
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}

/// Gets the current schema version
pub fn get_schema_version() -> u32 {
    1
}
