/*!
 * Integration tests for full practice rounds
 */

use anyhow::Result;
use vocabtrain::{DatabaseConnection, PracticeResult, SettingsStore, WordStore};

use crate::common::SAMPLE_PAIRS;

fn open_trainer() -> Result<(WordStore, SettingsStore)> {
    let db = DatabaseConnection::new_in_memory()?;
    let words = WordStore::new(db.clone());
    let settings = SettingsStore::new(db)?;

    for (source, target, meaning) in SAMPLE_PAIRS {
        words.store(source, target, Some(meaning))?;
    }
    Ok((words, settings))
}

/// Draw a batch sized by settings, answer it, and check the report
#[test]
fn test_practiceRound_shouldUpdateOnlyDrawnWords() -> Result<()> {
    let (words, settings) = open_trainer()?;
    settings.set("training_length", "3")?;

    let params = settings.training_parameters()?;
    let batch = words.sample(params.training_length)?;
    assert_eq!(batch.len(), 3);

    // Answer the first drawn word wrong, the others right
    let results: Vec<PracticeResult> = batch
        .iter()
        .enumerate()
        .map(|(i, record)| PracticeResult::new(record.id, i != 0))
        .collect();
    assert_eq!(words.record_results(&results)?, 3);

    let drawn: Vec<i64> = batch.iter().map(|r| r.id).collect();
    for record in words.all()? {
        if drawn.contains(&record.id) {
            assert_eq!(record.attempts, 1);
            assert!(record.weight < 1.0);
        } else {
            assert_eq!(record.attempts, 0);
            assert_eq!(record.weight, 1.0);
        }
    }

    let report = words.statistics()?;
    assert_eq!(report.len(), SAMPLE_PAIRS.len());
    let mut correct_ids: Vec<i64> = drawn[1..].to_vec();
    correct_ids.sort_unstable();
    let leaders: Vec<i64> = report[..2].iter().map(|s| s.id).collect();
    assert_eq!(leaders, correct_ids);

    let missed = report.iter().find(|s| s.id == batch[0].id).unwrap();
    assert_eq!((missed.successes, missed.attempts), (0, 1));
    Ok(())
}

#[test]
fn test_practiceRound_withDeletedWordInResults_shouldSkipIt() -> Result<()> {
    let (words, _) = open_trainer()?;
    let batch = words.sample(2)?;

    // The shell deletes a word between drawing and answering
    words.delete(&batch[0].source_text)?;

    let applied = words.record_results(&[
        PracticeResult::new(batch[0].id, true),
        PracticeResult::new(batch[1].id, true),
    ])?;

    assert_eq!(applied, 1);
    assert!(words.get(batch[0].id)?.is_none());
    assert_eq!(words.get(batch[1].id)?.unwrap().successes, 1);
    Ok(())
}

#[tokio::test]
async fn test_practiceRound_async_shouldRoundTripThroughStore() -> Result<()> {
    let (words, settings) = open_trainer()?;
    settings.set("training_length", "5")?;

    let batch = words
        .sample_async(settings.training_parameters()?.training_length)
        .await?;
    assert_eq!(batch.len(), SAMPLE_PAIRS.len());

    let results = batch
        .iter()
        .map(|r| PracticeResult::new(r.id, true))
        .collect();
    words.record_results_async(results).await?;

    for line in words.statistics_async().await? {
        assert_eq!(line.success_rate(), 1.0);
    }
    Ok(())
}
