use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::{Semaphore, mpsc};
use tokio_util::sync::CancellationToken;

/// What the pool produced: successful results in completion order, plus the
/// counts of dropped failures and cancellation-skipped tasks.
#[derive(Debug)]
pub struct PoolOutcome<T> {
    pub results: Vec<T>,
    pub failed: usize,
    pub skipped: usize,
}

impl<T> PoolOutcome<T> {
    fn empty() -> Self {
        Self {
            results: Vec::new(),
            failed: 0,
            skipped: 0,
        }
    }
}

/// Run one task per item with at most `limit` running concurrently.
///
/// Every item is spawned as its own tokio task; the task body only starts
/// after acquiring a permit from the shared semaphore, so anything the task
/// opens (a rendering context in particular) exists for at most `limit` items
/// at a time. Results are collected in completion order by the single
/// receiver, which is also the only writer to the accumulation vector.
///
/// Failure policy: a failed task is logged and dropped. It never cancels its
/// siblings or the run. When the cancellation token fires, tasks that have not
/// yet started are skipped while in-flight tasks drain normally.
pub async fn run<I, T, E, F, Fut>(
    items: Vec<I>,
    limit: usize,
    cancel: &CancellationToken,
    task: F,
) -> PoolOutcome<T>
where
    I: Send + 'static,
    T: Send + 'static,
    E: Display + Send + 'static,
    F: Fn(I) -> Fut,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
{
    let total = items.len();
    if total == 0 {
        return PoolOutcome::empty();
    }

    let semaphore = Arc::new(Semaphore::new(limit));
    let (result_tx, mut result_rx) = mpsc::channel(total);

    for item in items {
        let fut = task(item);
        let semaphore = Arc::clone(&semaphore);
        let cancel = cancel.clone();
        let result_tx = result_tx.clone();

        tokio::spawn(async move {
            let _permit = semaphore.acquire_owned().await.unwrap();
            if cancel.is_cancelled() {
                // Skipped tasks send nothing; dropping the sender is enough.
                return;
            }
            let result = fut.await;
            let _ = result_tx.send(result).await;
        });
    }

    // Drop the original sender so the channel closes once every task is done.
    drop(result_tx);

    let mut outcome = PoolOutcome::empty();
    let mut completed = 0;
    while let Some(result) = result_rx.recv().await {
        completed += 1;
        match result {
            Ok(value) => outcome.results.push(value),
            Err(e) => {
                outcome.failed += 1;
                ::log::warn!("fetch task failed: {}", e);
            }
        }
        ::log::info!("parsed {}/{} products", completed, total);
    }

    outcome.skipped = total - completed;
    outcome
}
