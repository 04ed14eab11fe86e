/*!
 * Word store operations.
 *
 * CRUD over word pairs, batch result recording and weighted batch sampling.
 * Each public operation runs under the connection lock; `record_results`
 * additionally runs inside one transaction so a concurrent `sample` never
 * sees half of a batch applied.
 */

use log::{debug, warn};
use rand::Rng;
use rusqlite::{params, Connection, OptionalExtension};

use super::connection::DatabaseConnection;
use super::models::{check_counters, PracticeResult, WordRecord, WordStatistics, WORD_COLUMNS};
use crate::errors::{StoreError, StoreResult, ValidationError};
use crate::sampling::weighted_sample_without_replacement;
use crate::weight::{self, NEUTRAL_WEIGHT};

/// Canonical form used for storing and matching word texts
pub fn normalize_text(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Normalize a required text field, rejecting empty input
fn require_text(field: &'static str, text: &str) -> Result<String, ValidationError> {
    let normalized = normalize_text(text);
    if normalized.is_empty() {
        return Err(ValidationError::EmptyText { field });
    }
    Ok(normalized)
}

fn normalize_meaning(meaning: Option<&str>) -> Option<String> {
    meaning
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}

/// Store of word pairs and their practice statistics
#[derive(Clone)]
pub struct WordStore {
    /// Database connection
    db: DatabaseConnection,
}

impl WordStore {
    /// Create a word store over the given database connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create a word store backed by a fresh in-memory database
    pub fn new_in_memory() -> StoreResult<Self> {
        Ok(Self::new(DatabaseConnection::new_in_memory()?))
    }

    /// Underlying database connection
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    // =========================================================================
    // Insert / lookup / delete
    // =========================================================================

    /// Store a new word pair and return its id.
    ///
    /// Both texts are trimmed and lower-cased. Duplicate pairs are allowed.
    pub fn store(&self, source_text: &str, target_text: &str, meaning: Option<&str>) -> StoreResult<i64> {
        let source = require_text("source_text", source_text)?;
        let target = require_text("target_text", target_text)?;
        let meaning = normalize_meaning(meaning);

        self.db
            .execute(move |conn| Self::insert_sync(conn, &source, &target, meaning.as_deref()))
    }

    /// Async version of [`WordStore::store`]
    pub async fn store_async(
        &self,
        source_text: &str,
        target_text: &str,
        meaning: Option<&str>,
    ) -> StoreResult<i64> {
        let source = require_text("source_text", source_text)?;
        let target = require_text("target_text", target_text)?;
        let meaning = normalize_meaning(meaning);

        self.db
            .execute_async(move |conn| Self::insert_sync(conn, &source, &target, meaning.as_deref()))
            .await
    }

    fn insert_sync(
        conn: &Connection,
        source: &str,
        target: &str,
        meaning: Option<&str>,
    ) -> StoreResult<i64> {
        conn.execute(
            r#"
            INSERT INTO words (source_text, target_text, meaning, attempts, successes, weight)
            VALUES (?1, ?2, ?3, 0, 0, ?4)
            "#,
            params![source, target, meaning, weight::weight(0, 0)],
        )?;

        let id = conn.last_insert_rowid();
        debug!("Stored word {}: '{}' <-> '{}'", id, source, target);
        Ok(id)
    }

    /// Get a word by id
    pub fn get(&self, id: i64) -> StoreResult<Option<WordRecord>> {
        self.db.execute(move |conn| Self::get_sync(conn, id))
    }

    fn get_sync(conn: &Connection, id: i64) -> StoreResult<Option<WordRecord>> {
        let sql = format!("SELECT {} FROM words WHERE id = ?1", WORD_COLUMNS);
        let mut stmt = conn.prepare(&sql)?;
        let mut rows = stmt.query([id])?;

        match rows.next()? {
            Some(row) => Ok(Some(WordRecord::from_row(row)?)),
            None => Ok(None),
        }
    }

    /// Find the earliest stored word whose source or target text matches `text`
    pub fn lookup(&self, text: &str) -> StoreResult<Option<WordRecord>> {
        let text = normalize_text(text);
        self.db.execute(move |conn| Self::lookup_sync(conn, &text))
    }

    /// Async version of [`WordStore::lookup`]
    pub async fn lookup_async(&self, text: &str) -> StoreResult<Option<WordRecord>> {
        let text = normalize_text(text);
        self.db
            .execute_async(move |conn| Self::lookup_sync(conn, &text))
            .await
    }

    fn lookup_sync(conn: &Connection, text: &str) -> StoreResult<Option<WordRecord>> {
        if text.is_empty() {
            return Ok(None);
        }

        let sql = format!(
            "SELECT {} FROM words WHERE source_text = ?1 OR target_text = ?1 ORDER BY id LIMIT 1",
            WORD_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let mut rows = stmt.query([text])?;

        match rows.next()? {
            Some(row) => Ok(Some(WordRecord::from_row(row)?)),
            None => Ok(None),
        }
    }

    /// Delete every word whose source or target text matches `text`.
    ///
    /// Returns the number of removed words; zero is not an error.
    pub fn delete(&self, text: &str) -> StoreResult<usize> {
        let text = normalize_text(text);
        self.db.execute(move |conn| Self::delete_sync(conn, &text))
    }

    /// Async version of [`WordStore::delete`]
    pub async fn delete_async(&self, text: &str) -> StoreResult<usize> {
        let text = normalize_text(text);
        self.db
            .execute_async(move |conn| Self::delete_sync(conn, &text))
            .await
    }

    fn delete_sync(conn: &Connection, text: &str) -> StoreResult<usize> {
        let deleted = conn.execute(
            "DELETE FROM words WHERE source_text = ?1 OR target_text = ?1",
            [text],
        )?;
        debug!("Deleted {} word(s) matching '{}'", deleted, text);
        Ok(deleted)
    }

    // =========================================================================
    // Practice statistics
    // =========================================================================

    /// Apply a batch of practice outcomes atomically.
    ///
    /// Every listed word gets one more attempt, one more success when the
    /// answer was correct, and a recomputed weight. Unknown ids are skipped.
    /// Returns the number of updates applied.
    pub fn record_results(&self, results: &[PracticeResult]) -> StoreResult<usize> {
        self.db.transaction(|tx| Self::record_results_sync(tx, results))
    }

    /// Async version of [`WordStore::record_results`]
    pub async fn record_results_async(&self, results: Vec<PracticeResult>) -> StoreResult<usize> {
        self.db
            .transaction_async(move |tx| Self::record_results_sync(tx, &results))
            .await
    }

    fn record_results_sync(conn: &Connection, results: &[PracticeResult]) -> StoreResult<usize> {
        let mut applied = 0;

        for result in results {
            let counters: Option<(u32, u32)> = conn
                .query_row(
                    "SELECT attempts, successes FROM words WHERE id = ?1",
                    [result.id],
                    |row| Ok((row.get(0)?, row.get(1)?)),
                )
                .optional()?;

            let Some((attempts, successes)) = counters else {
                warn!("Skipping result for unknown word id {}", result.id);
                continue;
            };
            check_counters(result.id, successes, attempts)?;

            let overflow = || StoreError::CounterOverflow { id: result.id };
            let attempts = attempts.checked_add(1).ok_or_else(overflow)?;
            let successes = if result.correct {
                successes.checked_add(1).ok_or_else(overflow)?
            } else {
                successes
            };
            check_counters(result.id, successes, attempts)?;

            conn.execute(
                "UPDATE words SET attempts = ?1, successes = ?2, weight = ?3 WHERE id = ?4",
                params![attempts, successes, weight::weight(successes, attempts), result.id],
            )?;
            applied += 1;
        }

        debug!("Recorded {} of {} practice result(s)", applied, results.len());
        Ok(applied)
    }

    /// Clear the practice counters of a word.
    ///
    /// Returns whether a word with that id existed.
    pub fn reset(&self, id: i64) -> StoreResult<bool> {
        self.db.execute(move |conn| Self::reset_sync(conn, id))
    }

    /// Async version of [`WordStore::reset`]
    pub async fn reset_async(&self, id: i64) -> StoreResult<bool> {
        self.db
            .execute_async(move |conn| Self::reset_sync(conn, id))
            .await
    }

    fn reset_sync(conn: &Connection, id: i64) -> StoreResult<bool> {
        let updated = conn.execute(
            "UPDATE words SET attempts = 0, successes = 0, weight = ?1 WHERE id = ?2",
            params![NEUTRAL_WEIGHT, id],
        )?;
        debug!("Reset word {} (found: {})", id, updated > 0);
        Ok(updated > 0)
    }

    // =========================================================================
    // Sampling and reporting
    // =========================================================================

    /// Draw a practice batch of `min(n, count)` distinct words, biased by weight
    pub fn sample(&self, n: usize) -> StoreResult<Vec<WordRecord>> {
        self.sample_with_rng(n, &mut rand::rng())
    }

    /// Same as [`WordStore::sample`] with a caller-supplied random source
    pub fn sample_with_rng<R: Rng>(&self, n: usize, rng: &mut R) -> StoreResult<Vec<WordRecord>> {
        self.db.execute(|conn| Self::sample_sync(conn, n, rng))
    }

    /// Async version of [`WordStore::sample`]
    pub async fn sample_async(&self, n: usize) -> StoreResult<Vec<WordRecord>> {
        self.db
            .execute_async(move |conn| Self::sample_sync(conn, n, &mut rand::rng()))
            .await
    }

    fn sample_sync<R: Rng>(conn: &Connection, n: usize, rng: &mut R) -> StoreResult<Vec<WordRecord>> {
        let records = Self::all_sync(conn)?;
        if records.is_empty() || n == 0 {
            return Ok(Vec::new());
        }

        let weights: Vec<f64> = records.iter().map(|r| r.weight).collect();
        let picked = weighted_sample_without_replacement(&weights, n, rng);

        let mut slots: Vec<Option<WordRecord>> = records.into_iter().map(Some).collect();
        let batch: Vec<WordRecord> = picked
            .into_iter()
            .filter_map(|index| slots[index].take())
            .collect();

        debug!("Sampled {} word(s) for a batch of {}", batch.len(), n);
        Ok(batch)
    }

    /// Progress report ordered by success rate, best first.
    ///
    /// Never-attempted words count as a rate of zero; ties keep insertion order.
    pub fn statistics(&self) -> StoreResult<Vec<WordStatistics>> {
        self.db.execute(Self::statistics_sync)
    }

    /// Async version of [`WordStore::statistics`]
    pub async fn statistics_async(&self) -> StoreResult<Vec<WordStatistics>> {
        self.db.execute_async(Self::statistics_sync).await
    }

    fn statistics_sync(conn: &Connection) -> StoreResult<Vec<WordStatistics>> {
        let mut stmt = conn.prepare(
            r#"
            SELECT id, source_text, target_text, successes, attempts
            FROM words
            ORDER BY
                CASE WHEN attempts > 0 THEN CAST(successes AS REAL) / attempts ELSE 0.0 END DESC,
                id ASC
            "#,
        )?;

        let mut rows = stmt.query([])?;
        let mut report = Vec::new();
        while let Some(row) = rows.next()? {
            let stats = WordStatistics {
                id: row.get(0)?,
                source_text: row.get(1)?,
                target_text: row.get(2)?,
                successes: row.get(3)?,
                attempts: row.get(4)?,
            };
            check_counters(stats.id, stats.successes, stats.attempts)?;
            report.push(stats);
        }

        Ok(report)
    }

    /// All stored words in insertion order
    pub fn all(&self) -> StoreResult<Vec<WordRecord>> {
        self.db.execute(Self::all_sync)
    }

    /// Async version of [`WordStore::all`]
    pub async fn all_async(&self) -> StoreResult<Vec<WordRecord>> {
        self.db.execute_async(Self::all_sync).await
    }

    fn all_sync(conn: &Connection) -> StoreResult<Vec<WordRecord>> {
        let sql = format!("SELECT {} FROM words ORDER BY id", WORD_COLUMNS);
        let mut stmt = conn.prepare(&sql)?;
        let mut rows = stmt.query([])?;

        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            records.push(WordRecord::from_row(row)?);
        }
        Ok(records)
    }

    /// Number of stored words
    pub fn count(&self) -> StoreResult<usize> {
        self.db.execute(|conn| {
            let count: i64 = conn.query_row("SELECT COUNT(*) FROM words", [], |row| row.get(0))?;
            Ok(count as usize)
        })
    }
}
