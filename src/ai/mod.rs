//! Background AI services
//!
//! Each service wraps a lazily-loaded pipeline singleton and runs on the
//! shared worker pool, reporting a formatted success or error string back
//! to the UI thread through an event channel.

pub mod key_points;
pub mod outline;
pub mod summarizer;
pub mod workers;

use std::collections::HashSet;
use std::sync::mpsc;

use workers::WorkerPool;

const WORKER_COUNT: usize = 2;
const QUEUE_DEPTH: usize = 8;

/// Function words ignored when scoring text
pub(crate) const STOPWORDS: &[&str] = &[
    "a", "about", "after", "all", "also", "an", "and", "any", "are", "as", "at", "be", "because",
    "been", "but", "by", "can", "could", "did", "do", "does", "for", "from", "had", "has", "have",
    "he", "her", "his", "how", "i", "if", "in", "into", "is", "it", "its", "just", "like", "may",
    "more", "most", "my", "no", "not", "of", "on", "one", "only", "or", "other", "our", "out",
    "over", "she", "should", "so", "some", "such", "than", "that", "the", "their", "them", "then",
    "there", "these", "they", "this", "to", "up", "was", "we", "were", "what", "when", "which",
    "while", "who", "will", "with", "would", "you", "your",
];

/// The background operations the app can run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AiTask {
    Summarize,
    KeyPoints,
    MindMap,
    Preload,
}

impl AiTask {
    pub fn label(self) -> &'static str {
        match self {
            AiTask::Summarize => "Summarization",
            AiTask::KeyPoints => "Key points extraction",
            AiTask::MindMap => "Mind map generation",
            AiTask::Preload => "Model preload",
        }
    }
}

/// Completion event delivered to the UI thread
#[derive(Debug)]
pub struct AiEvent {
    pub task: AiTask,
    /// Formatted success text, or a user-visible error message
    pub outcome: Result<String, String>,
}

/// Worker pool plus the event plumbing back to the frame loop
pub struct AiRuntime {
    pool: WorkerPool,
    events_tx: mpsc::Sender<AiEvent>,
    events_rx: mpsc::Receiver<AiEvent>,
    running: HashSet<AiTask>,
    repaint: Option<egui::Context>,
}

impl AiRuntime {
    /// Create the runtime; `repaint` wakes the UI when a job finishes
    pub fn new(repaint: Option<egui::Context>) -> Self {
        let (events_tx, events_rx) = mpsc::channel();
        Self {
            pool: WorkerPool::new(WORKER_COUNT, QUEUE_DEPTH),
            events_tx,
            events_rx,
            running: HashSet::new(),
            repaint,
        }
    }

    /// Run a job in the background; its result comes back through [`poll`].
    ///
    /// A task kind that is already running, or a full queue, rejects the
    /// submission.
    pub fn submit(
        &mut self,
        task: AiTask,
        job: impl FnOnce() -> Result<String, String> + Send + 'static,
    ) -> bool {
        if self.running.contains(&task) {
            return false;
        }

        let tx = self.events_tx.clone();
        let repaint = self.repaint.clone();
        let accepted = self.pool.execute(move || {
            let outcome = job();
            let _ = tx.send(AiEvent { task, outcome });
            if let Some(ctx) = repaint {
                ctx.request_repaint();
            }
        });

        if accepted {
            self.running.insert(task);
        }
        accepted
    }

    /// Drain finished jobs; called once per frame on the UI thread
    pub fn poll(&mut self) -> Vec<AiEvent> {
        let events: Vec<AiEvent> = self.events_rx.try_iter().collect();
        for event in &events {
            self.running.remove(&event.task);
        }
        events
    }

    pub fn is_running(&self, task: AiTask) -> bool {
        self.running.contains(&task)
    }

    /// Whether any user-visible job is in flight (preload excluded)
    pub fn busy(&self) -> bool {
        self.running.iter().any(|t| *t != AiTask::Preload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn wait_for_event(runtime: &mut AiRuntime) -> AiEvent {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if let Some(event) = runtime.poll().into_iter().next() {
                return event;
            }
            assert!(Instant::now() < deadline, "no event before timeout");
            std::thread::sleep(Duration::from_millis(10));
        }
    }

    #[test]
    fn test_submit_and_poll() {
        let mut runtime = AiRuntime::new(None);
        assert!(runtime.submit(AiTask::Summarize, || Ok("done".to_string())));
        assert!(runtime.is_running(AiTask::Summarize));
        assert!(runtime.busy());

        let event = wait_for_event(&mut runtime);
        assert_eq!(event.task, AiTask::Summarize);
        assert_eq!(event.outcome, Ok("done".to_string()));
        assert!(!runtime.is_running(AiTask::Summarize));
    }

    #[test]
    fn test_duplicate_task_rejected() {
        let mut runtime = AiRuntime::new(None);
        let (block_tx, block_rx) = mpsc::channel::<()>();
        assert!(runtime.submit(AiTask::KeyPoints, move || {
            let _ = block_rx.recv_timeout(Duration::from_secs(5));
            Ok(String::new())
        }));
        assert!(!runtime.submit(AiTask::KeyPoints, || Ok(String::new())));
        // A different task kind still goes through.
        assert!(runtime.submit(AiTask::Summarize, || Ok(String::new())));
        let _ = block_tx.send(());
    }

    #[test]
    fn test_error_outcome_delivered() {
        let mut runtime = AiRuntime::new(None);
        runtime.submit(AiTask::MindMap, || Err("Mind map generation failed: x".to_string()));
        let event = wait_for_event(&mut runtime);
        assert!(event.outcome.is_err());
    }

    #[test]
    fn test_preload_not_busy() {
        let mut runtime = AiRuntime::new(None);
        let (block_tx, block_rx) = mpsc::channel::<()>();
        runtime.submit(AiTask::Preload, move || {
            let _ = block_rx.recv_timeout(Duration::from_secs(5));
            Ok(String::new())
        });
        assert!(!runtime.busy());
        let _ = block_tx.send(());
    }
}
