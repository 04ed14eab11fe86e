/*!
 * Error types for the vocabtrain application.
 *
 * This module contains custom error types for the word and settings stores
 * and for the command line shell, using the thiserror crate for ergonomic
 * error definitions.
 */

use thiserror::Error;

/// Rejected caller input
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A text field was empty after normalization
    #[error("{field} must not be empty")]
    EmptyText {
        /// Name of the offending field
        field: &'static str,
    },
}

/// Errors that can occur when working with the word or settings store
#[derive(Error, Debug)]
pub enum StoreError {
    /// Malformed input passed to a store operation
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Error reported by SQLite
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Error creating the database directory
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A record was observed with more successes than attempts
    #[error("Inconsistent counters for word {id}: {successes} successes > {attempts} attempts")]
    InconsistentCounters {
        /// Record id
        id: i64,
        /// Stored success counter
        successes: u32,
        /// Stored attempt counter
        attempts: u32,
    },

    /// A practice counter cannot be incremented any further
    #[error("Practice counters for word {id} are at their maximum")]
    CounterOverflow {
        /// Record id
        id: i64,
    },

    /// A setting holds a value that cannot be interpreted
    #[error("Invalid value for setting '{name}': '{value}'")]
    InvalidSetting {
        /// Setting key
        name: String,
        /// Offending value
        value: String,
    },

    /// The on-disk schema cannot be used by this version
    #[error("Schema error: {0}")]
    Schema(String),

    /// A blocking database task failed to complete
    #[error("Database task failed: {0}")]
    Task(String),
}

impl StoreError {
    /// Whether this error was caused by caller input rather than the store itself
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// Result alias for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from the word or settings store
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Error in the configuration file
    #[error("Config error: {0}")]
    Config(String),

    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
