/*!
 * Common test utilities for the vocabtrain test suite
 */

use anyhow::Result;
use vocabtrain::WordStore;

/// Word pairs used across tests
pub const SAMPLE_PAIRS: [(&str, &str, &str); 5] = [
    ("word", "слово", "meaning1"),
    ("sentence", "предложение", "meaning2"),
    ("language", "язык", "meaning3"),
    ("book", "книга", "meaning4"),
    ("tree", "дерево", "meaning5"),
];

/// Creates an empty in-memory word store
pub fn create_empty_store() -> Result<WordStore> {
    Ok(WordStore::new_in_memory()?)
}

/// Creates an in-memory word store holding [`SAMPLE_PAIRS`], returning the ids in order
pub fn create_sample_store() -> Result<(WordStore, Vec<i64>)> {
    let store = create_empty_store()?;
    let mut ids = Vec::with_capacity(SAMPLE_PAIRS.len());
    for (source, target, meaning) in SAMPLE_PAIRS {
        ids.push(store.store(source, target, Some(meaning))?);
    }
    Ok((store, ids))
}

/// Approximate float comparison
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-12
}
