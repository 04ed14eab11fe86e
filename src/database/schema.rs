/*!
 * Database schema definitions and migrations.
 *
 * This module contains the SQL schema for the word and settings tables
 * and handles schema migrations for version upgrades.
 */

use log::{debug, info};
use rusqlite::{Connection, OptionalExtension};

use crate::errors::{StoreError, StoreResult};

/// Current schema version
pub const SCHEMA_VERSION: i32 = 1;

/// Initialize the database schema
pub fn initialize_schema(conn: &Connection) -> StoreResult<()> {
    let current_version = get_schema_version(conn)?;

    // Upgrade steps get their own arms as the schema evolves, e.g. `1 => migrate_v1_to_v2(conn)?`
    match current_version {
        0 => {
            info!("Initializing database schema v{}", SCHEMA_VERSION);
            create_all_tables(conn)?;
            set_schema_version(conn, SCHEMA_VERSION)?;
        }
        SCHEMA_VERSION => {
            debug!("Database schema is up to date (v{})", current_version);
        }
        version if version > SCHEMA_VERSION => {
            return Err(StoreError::Schema(format!(
                "Database schema v{} is newer than supported v{}",
                version, SCHEMA_VERSION
            )));
        }
        version => {
            return Err(StoreError::Schema(format!(
                "No migration path from schema v{} to v{}",
                version, SCHEMA_VERSION
            )));
        }
    }

    Ok(())
}

/// Get the current schema version from the database
fn get_schema_version(conn: &Connection) -> StoreResult<i32> {
    let table_exists: bool = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='schema_version'",
        [],
        |row| row.get(0),
    )?;

    if !table_exists {
        return Ok(0);
    }

    let version: i32 = conn
        .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
            row.get(0)
        })
        .optional()?
        .unwrap_or(0);

    Ok(version)
}

/// Set the schema version in the database
fn set_schema_version(conn: &Connection, version: i32) -> StoreResult<()> {
    conn.execute(
        "INSERT OR REPLACE INTO schema_version (id, version, updated_at) VALUES (1, ?1, datetime('now'))",
        [version],
    )?;
    Ok(())
}

/// Create all database tables
fn create_all_tables(conn: &Connection) -> StoreResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS schema_version (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            version INTEGER NOT NULL,
            updated_at TEXT NOT NULL
        );
        "#,
    )?;

    // AUTOINCREMENT keeps ids stable and never reused after deletes
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS words (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            source_text TEXT NOT NULL CHECK (length(source_text) > 0),
            target_text TEXT NOT NULL CHECK (length(target_text) > 0),
            meaning TEXT,
            attempts INTEGER NOT NULL DEFAULT 0 CHECK (attempts >= 0),
            successes INTEGER NOT NULL DEFAULT 0 CHECK (successes >= 0),
            weight REAL NOT NULL DEFAULT 1.0 CHECK (weight > 0),
            CHECK (successes <= attempts)
        );

        CREATE INDEX IF NOT EXISTS idx_words_source ON words(source_text);
        CREATE INDEX IF NOT EXISTS idx_words_target ON words(target_text);
        "#,
    )?;

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS settings (
            name TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );
        "#,
    )?;

    info!("Database schema created successfully");
    Ok(())
}
