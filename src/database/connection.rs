/*!
 * Database connection management.
 *
 * This module handles SQLite database connection creation, initialization,
 * and provides serialized access to a single connection. Every store
 * operation runs under one lock, so writers exclude each other and readers.
 * Async callers go through tokio's spawn_blocking.
 */

use log::{debug, info};
use parking_lot::Mutex;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::schema;
use crate::errors::{StoreError, StoreResult};

/// Default database filename
const DEFAULT_DB_FILENAME: &str = "vocabtrain.db";

/// Default database directory name under user's data directory
const DEFAULT_DB_DIRNAME: &str = "vocabtrain";

/// Path reported for in-memory databases
const IN_MEMORY_PATH: &str = ":memory:";

/// Database connection wrapper with thread-safe access
#[derive(Clone)]
pub struct DatabaseConnection {
    /// Path to the database file
    db_path: PathBuf,
    /// Thread-safe connection wrapped in Arc<Mutex>
    connection: Arc<Mutex<Connection>>,
}

impl DatabaseConnection {
    /// Create a new database connection at the default location
    pub fn new_default() -> StoreResult<Self> {
        let db_path = Self::default_database_path()?;
        Self::new(&db_path)
    }

    /// Create a new database connection at the specified path
    pub fn new<P: AsRef<Path>>(db_path: P) -> StoreResult<Self> {
        let db_path = db_path.as_ref().to_path_buf();

        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        info!("Opening database at: {:?}", db_path);

        let conn = Connection::open(&db_path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        schema::initialize_schema(&conn)?;

        Ok(Self {
            db_path,
            connection: Arc::new(Mutex::new(conn)),
        })
    }

    /// Create an in-memory database that lives as long as this handle
    pub fn new_in_memory() -> StoreResult<Self> {
        debug!("Creating in-memory database");

        let conn = Connection::open_in_memory()?;
        schema::initialize_schema(&conn)?;

        Ok(Self {
            db_path: PathBuf::from(IN_MEMORY_PATH),
            connection: Arc::new(Mutex::new(conn)),
        })
    }

    /// Get the default database path
    pub fn default_database_path() -> StoreResult<PathBuf> {
        let base_dir = dirs::data_local_dir()
            .or_else(dirs::data_dir)
            .or_else(|| dirs::home_dir().map(|h| h.join(".local").join("share")))
            .ok_or_else(|| {
                StoreError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "Could not determine data directory",
                ))
            })?;

        Ok(base_dir.join(DEFAULT_DB_DIRNAME).join(DEFAULT_DB_FILENAME))
    }

    /// Get the database file path
    pub fn path(&self) -> &Path {
        &self.db_path
    }

    /// Whether this connection is backed by memory rather than a file
    pub fn is_in_memory(&self) -> bool {
        self.db_path.as_os_str() == IN_MEMORY_PATH
    }

    /// Execute a database operation with the connection
    ///
    /// This method acquires the lock and executes the provided closure
    /// with access to the connection. For async contexts, use `execute_async`.
    pub fn execute<F, T>(&self, f: F) -> StoreResult<T>
    where
        F: FnOnce(&Connection) -> StoreResult<T>,
    {
        let conn = self.connection.lock();
        f(&conn)
    }

    /// Begin a transaction and execute operations within it
    ///
    /// The transaction rolls back when the closure returns an error.
    pub fn transaction<F, T>(&self, f: F) -> StoreResult<T>
    where
        F: FnOnce(&rusqlite::Transaction) -> StoreResult<T>,
    {
        let mut conn = self.connection.lock();

        let tx = conn.transaction()?;
        let result = f(&tx)?;
        tx.commit()?;

        Ok(result)
    }

    /// Execute a database operation asynchronously using spawn_blocking
    ///
    /// This is the preferred method for async contexts as it prevents
    /// blocking the async runtime.
    pub async fn execute_async<F, T>(&self, f: F) -> StoreResult<T>
    where
        F: FnOnce(&Connection) -> StoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let db = self.clone();

        tokio::task::spawn_blocking(move || db.execute(f))
            .await
            .map_err(|e| StoreError::Task(e.to_string()))?
    }

    /// Begin an async transaction and execute operations within it
    pub async fn transaction_async<F, T>(&self, f: F) -> StoreResult<T>
    where
        F: FnOnce(&rusqlite::Transaction) -> StoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let db = self.clone();

        tokio::task::spawn_blocking(move || db.transaction(f))
            .await
            .map_err(|e| StoreError::Task(e.to_string()))?
    }

    /// Get database statistics
    pub fn stats(&self) -> StoreResult<DatabaseStats> {
        self.execute(|conn| {
            let word_count: i64 =
                conn.query_row("SELECT COUNT(*) FROM words", [], |row| row.get(0))?;

            let setting_count: i64 =
                conn.query_row("SELECT COUNT(*) FROM settings", [], |row| row.get(0))?;

            let file_size_bytes = if self.is_in_memory() {
                0
            } else {
                std::fs::metadata(&self.db_path)
                    .map(|m| m.len())
                    .unwrap_or(0)
            };

            Ok(DatabaseStats {
                word_count,
                setting_count,
                file_size_bytes,
            })
        })
    }
}

/// Database statistics
#[derive(Debug, Clone)]
pub struct DatabaseStats {
    /// Number of stored word pairs
    pub word_count: i64,
    /// Number of stored settings
    pub setting_count: i64,
    /// Database file size in bytes
    pub file_size_bytes: u64,
}

impl std::fmt::Display for DatabaseStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Words: {}, Settings: {}, Size: {} KB",
            self.word_count,
            self.setting_count,
            self.file_size_bytes / 1024
        )
    }
}
