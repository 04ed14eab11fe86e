/*!
 * Database entity models.
 *
 * These structures map directly to database rows and provide type-safe
 * access to persisted data. Rows are converted here and nowhere else.
 */

use rusqlite::Row;
use serde::{Deserialize, Serialize};

use crate::errors::{StoreError, StoreResult};
use crate::weight;

/// Column list matching [`WordRecord::from_row`]
pub(crate) const WORD_COLUMNS: &str =
    "id, source_text, target_text, meaning, attempts, successes, weight";

/// A stored word pair with its practice statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordRecord {
    /// Identifier assigned on insertion
    pub id: i64,
    /// Normalized source-language text
    pub source_text: String,
    /// Normalized target-language text
    pub target_text: String,
    /// Optional description of the word
    pub meaning: Option<String>,
    /// Number of practice rounds this word appeared in
    pub attempts: u32,
    /// Number of those rounds answered correctly
    pub successes: u32,
    /// Current sampling weight
    pub weight: f64,
}

impl WordRecord {
    /// Fraction of attempts answered correctly
    pub fn success_rate(&self) -> f64 {
        weight::success_rate(self.successes, self.attempts)
    }

    /// Build a record from a row selected with [`WORD_COLUMNS`].
    ///
    /// Fails with `InconsistentCounters` if the row has more successes than attempts.
    pub(crate) fn from_row(row: &Row) -> StoreResult<Self> {
        let record = Self {
            id: row.get(0)?,
            source_text: row.get(1)?,
            target_text: row.get(2)?,
            meaning: row.get(3)?,
            attempts: row.get(4)?,
            successes: row.get(5)?,
            weight: row.get(6)?,
        };
        check_counters(record.id, record.successes, record.attempts)?;
        Ok(record)
    }
}

/// Read-only progress line for one word
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordStatistics {
    pub id: i64,
    pub source_text: String,
    pub target_text: String,
    pub successes: u32,
    pub attempts: u32,
}

impl WordStatistics {
    /// Fraction of attempts answered correctly
    pub fn success_rate(&self) -> f64 {
        weight::success_rate(self.successes, self.attempts)
    }
}

impl From<WordRecord> for WordStatistics {
    fn from(record: WordRecord) -> Self {
        Self {
            id: record.id,
            source_text: record.source_text,
            target_text: record.target_text,
            successes: record.successes,
            attempts: record.attempts,
        }
    }
}

/// A named configuration value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingEntry {
    pub name: String,
    pub value: String,
}

/// Numeric training parameters read from the settings table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingParameters {
    /// Words drawn per practice batch
    pub training_length: usize,
    /// Retries allowed per word within a round
    pub number_of_retries: u32,
}

/// One answer reported by the practice driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PracticeResult {
    pub id: i64,
    pub correct: bool,
}

impl PracticeResult {
    pub fn new(id: i64, correct: bool) -> Self {
        Self { id, correct }
    }
}

impl From<(i64, bool)> for PracticeResult {
    fn from((id, correct): (i64, bool)) -> Self {
        Self::new(id, correct)
    }
}

/// Reject counters that break `successes <= attempts`
pub(crate) fn check_counters(id: i64, successes: u32, attempts: u32) -> StoreResult<()> {
    if successes > attempts {
        return Err(StoreError::InconsistentCounters {
            id,
            successes,
            attempts,
        });
    }
    Ok(())
}
