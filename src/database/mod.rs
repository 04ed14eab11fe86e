/*!
 * Database module for word and settings storage.
 *
 * This module provides SQLite-based storage for:
 * - Word pairs with practice statistics and weighted sampling
 * - Keyed training settings with seeded defaults
 *
 * Both stores can share one `DatabaseConnection`; all access to it is
 * serialized behind a single lock.
 */

pub mod schema;
pub mod connection;
pub mod models;
pub mod words;
pub mod settings;

// Re-export main types
pub use connection::{DatabaseConnection, DatabaseStats};
pub use models::{PracticeResult, SettingEntry, TrainingParameters, WordRecord, WordStatistics};
pub use settings::{SettingsStore, DEFAULT_SETTINGS};
pub use words::{normalize_text, WordStore};
