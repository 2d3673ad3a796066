//! Bounded worker pool for one-shot background jobs
//!
//! Jobs run on a small set of named OS threads; the UI thread never blocks.
//! Submissions are rejected when the queue is full rather than queued
//! without bound.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread;

type Job = Box<dyn FnOnce() + Send + 'static>;

/// Fixed-size pool of worker threads
pub struct WorkerPool {
    sender: mpsc::SyncSender<Job>,
}

impl WorkerPool {
    /// Spawn `workers` threads sharing a queue of at most `queue_depth`
    /// pending jobs
    pub fn new(workers: usize, queue_depth: usize) -> Self {
        let (sender, receiver) = mpsc::sync_channel::<Job>(queue_depth);
        let receiver = Arc::new(Mutex::new(receiver));

        for i in 0..workers.max(1) {
            let receiver = Arc::clone(&receiver);
            let spawned = thread::Builder::new()
                .name(format!("studymate-worker-{i}"))
                .spawn(move || loop {
                    // Hold the lock only while waiting; the job itself runs
                    // after the guard is dropped.
                    let job = match receiver.lock() {
                        Ok(rx) => rx.recv().ok(),
                        Err(_) => None,
                    };
                    match job {
                        Some(job) => job(),
                        None => break,
                    }
                });
            if let Err(e) = spawned {
                tracing::error!("Failed to spawn worker thread: {e}");
            }
        }

        Self { sender }
    }

    /// Submit a one-shot job.
    ///
    /// Returns false when the queue is full; the job is dropped, matching
    /// the drop-when-busy policy for rapid resubmissions.
    pub fn execute(&self, job: impl FnOnce() + Send + 'static) -> bool {
        match self.sender.try_send(Box::new(job)) {
            Ok(()) => true,
            Err(_) => {
                tracing::debug!("Worker queue full, dropping job");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_jobs_run_and_report() {
        let pool = WorkerPool::new(2, 8);
        let (tx, rx) = mpsc::channel();

        for i in 0..4 {
            let tx = tx.clone();
            assert!(pool.execute(move || {
                let _ = tx.send(i);
            }));
        }

        let mut results: Vec<i32> = (0..4)
            .map(|_| rx.recv_timeout(Duration::from_secs(5)).unwrap())
            .collect();
        results.sort_unstable();
        assert_eq!(results, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_full_queue_rejects() {
        let pool = WorkerPool::new(1, 1);
        let (block_tx, block_rx) = mpsc::channel::<()>();

        // Occupy the single worker, then fill the queue.
        pool.execute(move || {
            let _ = block_rx.recv_timeout(Duration::from_secs(5));
        });
        std::thread::sleep(Duration::from_millis(50));
        assert!(pool.execute(|| {}));
        assert!(!pool.execute(|| {}), "second queued job must be rejected");

        let _ = block_tx.send(());
    }
}
