/*!
 * # vocabtrain - adaptive vocabulary trainer core
 *
 * A Rust library that stores bilingual word pairs and draws practice
 * batches biased toward the words a learner struggles with.
 *
 * ## Features
 *
 * - Case-insensitive word pair storage with lookup by either side
 * - Per-word practice counters and a sampling weight recomputed after every answer
 * - Weighted batch sampling without replacement
 * - Atomic batch recording of practice results, safe to call from several threads
 * - Keyed training settings with seeded defaults
 * - SQLite persistence, in memory or in a file
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `database`: SQLite storage:
 *   - `database::connection`: Shared, lock-serialized connection handle
 *   - `database::schema`: Table definitions and migrations
 *   - `database::models`: Typed records built at the storage boundary
 *   - `database::words`: The word store
 *   - `database::settings`: The settings store
 * - `weight`: Sampling weight formula
 * - `sampling`: Weighted sampling without replacement
 * - `app_config`: Configuration management
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod database;
pub mod errors;
pub mod sampling;
pub mod weight;

// Re-export main types for easier usage
pub use app_config::Config;
pub use database::{
    DatabaseConnection, PracticeResult, SettingEntry, SettingsStore, TrainingParameters,
    WordRecord, WordStatistics, WordStore,
};
pub use errors::{AppError, StoreError, StoreResult, ValidationError};
