/*!
 * Settings store operations.
 *
 * Keyed string values with a default seed applied when the store is opened.
 */

use log::debug;
use rusqlite::{params, Connection, OptionalExtension};

use super::connection::DatabaseConnection;
use super::models::{SettingEntry, TrainingParameters};
use crate::errors::{StoreError, StoreResult};

/// Setting controlling the number of words per practice batch
pub const TRAINING_LENGTH: &str = "training_length";

/// Setting controlling how many retries a word gets within a round
pub const NUMBER_OF_RETRIES: &str = "number_of_retries";

/// Values present in every freshly opened settings store
pub const DEFAULT_SETTINGS: [(&str, &str); 7] = [
    ("theme", "light"),
    (TRAINING_LENGTH, "10"),
    ("review_frequency", "daily"),
    ("notification_settings", "on"),
    ("language_preference", "russian_to_english"),
    ("progress_tracking", "enabled"),
    (NUMBER_OF_RETRIES, "3"),
];

/// Keyed configuration values
#[derive(Clone)]
pub struct SettingsStore {
    /// Database connection
    db: DatabaseConnection,
}

impl SettingsStore {
    /// Open the settings store and seed any missing defaults.
    ///
    /// Values already present, e.g. in a reopened file database, are kept.
    pub fn new(db: DatabaseConnection) -> StoreResult<Self> {
        db.transaction(|tx| {
            let mut seeded = 0;
            for (name, value) in DEFAULT_SETTINGS {
                seeded += tx.execute(
                    "INSERT OR IGNORE INTO settings (name, value) VALUES (?1, ?2)",
                    params![name, value],
                )?;
            }
            debug!("Seeded {} default setting(s)", seeded);
            Ok(())
        })?;

        Ok(Self { db })
    }

    /// Create a settings store backed by a fresh in-memory database
    pub fn new_in_memory() -> StoreResult<Self> {
        Self::new(DatabaseConnection::new_in_memory()?)
    }

    /// Get a setting value, `None` if it was never set
    pub fn get(&self, name: &str) -> StoreResult<Option<String>> {
        self.db.execute(|conn| Self::get_sync(conn, name))
    }

    fn get_sync(conn: &Connection, name: &str) -> StoreResult<Option<String>> {
        let value = conn
            .query_row("SELECT value FROM settings WHERE name = ?1", [name], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    /// Insert or replace a setting value
    pub fn set(&self, name: &str, value: &str) -> StoreResult<()> {
        self.db.execute(|conn| {
            conn.execute(
                "INSERT OR REPLACE INTO settings (name, value) VALUES (?1, ?2)",
                params![name, value],
            )?;
            debug!("Setting '{}' = '{}'", name, value);
            Ok(())
        })
    }

    /// All settings ordered by name
    pub fn all(&self) -> StoreResult<Vec<SettingEntry>> {
        self.db.execute(|conn| {
            let mut stmt = conn.prepare("SELECT name, value FROM settings ORDER BY name")?;
            let entries = stmt
                .query_map([], |row| {
                    Ok(SettingEntry {
                        name: row.get(0)?,
                        value: row.get(1)?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(entries)
        })
    }

    /// Parse the numeric training settings
    pub fn training_parameters(&self) -> StoreResult<TrainingParameters> {
        self.db.execute(|conn| {
            Ok(TrainingParameters {
                training_length: Self::parse_sync(conn, TRAINING_LENGTH)?,
                number_of_retries: Self::parse_sync(conn, NUMBER_OF_RETRIES)?,
            })
        })
    }

    fn parse_sync<T: std::str::FromStr>(conn: &Connection, name: &str) -> StoreResult<T> {
        let value = Self::get_sync(conn, name)?.unwrap_or_default();
        let parsed = value.trim().parse::<T>();
        parsed.map_err(|_| StoreError::InvalidSetting {
            name: name.to_string(),
            value,
        })
    }
}
