/*!
 * Integration tests for multi-threaded access to one store
 */

use std::sync::{Arc, Barrier};
use std::thread;

use anyhow::Result;
use vocabtrain::{PracticeResult, WordRecord, WordStore};

use crate::common::create_sample_store;

fn snapshot(store: &WordStore) -> Result<Vec<(i64, u32, u32, f64)>> {
    Ok(store
        .all()?
        .into_iter()
        .map(|r: WordRecord| (r.id, r.attempts, r.successes, r.weight))
        .collect())
}

fn batches_for(ids: &[i64], rounds: usize) -> Vec<Vec<PracticeResult>> {
    (0..rounds)
        .map(|round| {
            ids.iter()
                .enumerate()
                .map(|(i, &id)| PracticeResult::new(id, (round + i) % 3 != 0))
                .collect()
        })
        .collect()
}

/// Disjoint batches from two threads equal applying them one after another
#[test]
fn test_recordResults_fromTwoThreads_shouldMatchSequentialApplication() -> Result<()> {
    let (concurrent, ids) = create_sample_store()?;
    let (sequential, _) = create_sample_store()?;

    let left = batches_for(&ids[..2], 50);
    let right = batches_for(&ids[2..], 50);

    let barrier = Arc::new(Barrier::new(2));
    let handles: Vec<_> = [left.clone(), right.clone()]
        .into_iter()
        .map(|batches| {
            let store = concurrent.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || -> vocabtrain::StoreResult<()> {
                barrier.wait();
                for batch in &batches {
                    store.record_results(batch)?;
                }
                Ok(())
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("worker panicked")?;
    }

    for batch in left.iter().chain(right.iter()) {
        sequential.record_results(batch)?;
    }

    assert_eq!(snapshot(&concurrent)?, snapshot(&sequential)?);
    Ok(())
}

/// A reader never sees a batch half applied
#[test]
fn test_sample_duringBatchUpdates_shouldSeeWholeBatches() -> Result<()> {
    let (store, ids) = create_sample_store()?;
    let rounds = 200;

    let writer = {
        let store = store.clone();
        let ids = ids.clone();
        thread::spawn(move || -> vocabtrain::StoreResult<()> {
            for round in 0..rounds {
                let batch: Vec<PracticeResult> = ids
                    .iter()
                    .map(|&id| PracticeResult::new(id, round % 2 == 0))
                    .collect();
                store.record_results(&batch)?;
            }
            Ok(())
        })
    };

    let reader = {
        let store = store.clone();
        let total = ids.len();
        thread::spawn(move || -> vocabtrain::StoreResult<()> {
            for _ in 0..rounds {
                let batch = store.sample(total)?;
                assert_eq!(batch.len(), total);
                let attempts = batch[0].attempts;
                assert!(
                    batch.iter().all(|r| r.attempts == attempts),
                    "observed a partially applied batch"
                );
            }
            Ok(())
        })
    };

    writer.join().expect("writer panicked")?;
    reader.join().expect("reader panicked")?;

    for record in store.all()? {
        assert_eq!(record.attempts, rounds as u32);
        assert_eq!(record.successes, (rounds / 2) as u32);
    }
    Ok(())
}

/// A worker thread can store words while another thread samples
#[test]
fn test_store_fromWorkerThread_shouldBeVisibleToOtherThreads() -> Result<()> {
    let (store, _) = create_sample_store()?;

    let worker = {
        let store = store.clone();
        thread::spawn(move || -> vocabtrain::StoreResult<Vec<i64>> {
            (0..20)
                .map(|i| store.store(&format!("extra{}", i), &format!("ещё{}", i), None))
                .collect()
        })
    };

    for _ in 0..20 {
        let batch = store.sample(3)?;
        assert_eq!(batch.len(), 3);
    }

    let stored = worker.join().expect("worker panicked")?;
    assert_eq!(stored.len(), 20);
    assert_eq!(store.count()?, 25);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_recordResultsAsync_fromManyTasks_shouldNotLoseUpdates() -> Result<()> {
    let (store, ids) = create_sample_store()?;

    let mut tasks = Vec::new();
    for &id in &ids {
        let store = store.clone();
        tasks.push(tokio::spawn(async move {
            for _ in 0..10 {
                store
                    .record_results_async(vec![PracticeResult::new(id, true)])
                    .await?;
            }
            Ok::<_, vocabtrain::StoreError>(())
        }));
    }

    for task in tasks {
        task.await??;
    }

    for record in store.all()? {
        assert_eq!(record.attempts, 10);
        assert_eq!(record.successes, 10);
    }
    Ok(())
}
