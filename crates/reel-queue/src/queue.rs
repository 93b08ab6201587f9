//! FIFO video queue with a single worker task.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde::Serialize;
use tracing::{error, info, warn};

use reel_models::{JobId, JobStatus, RenderConfig, SceneInput};

use crate::error::{QueueError, QueueResult};
use crate::job::QueuedJob;
use crate::store::VideoStore;

/// Queue configuration.
#[derive(Debug, Clone)]
pub struct QueueConfig {
    /// Directory holding finished videos
    pub output_dir: String,
    /// Time budget before a short job is evicted unprocessed
    pub short_budget_secs: i64,
    /// Time budget for long-form jobs
    pub long_budget_secs: i64,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            output_dir: "/tmp/reelsmith/videos".to_string(),
            short_budget_secs: 30 * 60,
            long_budget_secs: 45 * 60,
        }
    }
}

impl QueueConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            output_dir: std::env::var("REEL_OUTPUT_DIR")
                .unwrap_or_else(|_| "/tmp/reelsmith/videos".to_string()),
            short_budget_secs: std::env::var("QUEUE_SHORT_BUDGET_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30 * 60),
            long_budget_secs: std::env::var("QUEUE_LONG_BUDGET_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(45 * 60),
        }
    }
}

/// Runs one job to completion. Implemented by the worker crate; the queue
/// owns no pipeline logic.
#[async_trait]
pub trait JobRunner: Send + Sync {
    async fn run(&self, job: &QueuedJob) -> anyhow::Result<()>;
}

/// One entry in the `list_all` result.
#[derive(Debug, Clone, Serialize)]
pub struct JobListing {
    pub id: String,
    pub status: JobStatus,
}

/// A pending job as seen by `queue_status`.
#[derive(Debug, Clone, Serialize)]
pub struct PendingJobInfo {
    pub id: String,
    pub age_secs: i64,
}

/// Operator introspection snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct QueueSnapshot {
    pub queue_length: usize,
    pub is_processing: bool,
    pub jobs: Vec<PendingJobInfo>,
}

/// Result of the `clear_stuck` administrative operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClearStuckReport {
    /// Jobs removed without rendering
    pub removed: usize,
    /// Whether a stale processing flag was cleared
    pub cleared_processing: bool,
}

/// FIFO job queue processed by a single worker task.
///
/// The pending list is the only shared mutable state; it is mutated at
/// well-defined boundaries (append on enqueue, pop on completion or
/// eviction). The processing flag is the re-entrancy guard: a successful
/// compare-and-swap is the only way a worker loop starts, so concurrent
/// enqueues during active processing rely on the live loop to reach their
/// job in FIFO order.
pub struct VideoQueue {
    inner: Arc<QueueInner>,
}

struct QueueInner {
    config: QueueConfig,
    pending: Mutex<VecDeque<QueuedJob>>,
    processing: AtomicBool,
    runner: Arc<dyn JobRunner>,
    store: VideoStore,
}

impl VideoQueue {
    /// Create a queue draining into `runner`.
    pub fn new(config: QueueConfig, runner: Arc<dyn JobRunner>) -> QueueResult<Self> {
        let store = VideoStore::new(&config.output_dir)?;
        Ok(Self {
            inner: Arc::new(QueueInner {
                config,
                pending: Mutex::new(VecDeque::new()),
                processing: AtomicBool::new(false),
                runner,
                store,
            }),
        })
    }

    /// The store this queue reports readiness from.
    pub fn store(&self) -> &VideoStore {
        &self.inner.store
    }

    /// Append a job and kick the worker loop if idle. Returns immediately;
    /// never blocks on completion. Must be called from within a tokio
    /// runtime.
    ///
    /// Malformed input is rejected here and never enters the queue.
    pub fn enqueue(
        &self,
        scenes: Vec<SceneInput>,
        config: RenderConfig,
    ) -> QueueResult<JobId> {
        if scenes.is_empty() {
            return Err(QueueError::invalid_input("Job needs at least one scene"));
        }
        for scene in &scenes {
            scene.validate()?;
        }

        let job = QueuedJob::new(scenes, config);
        let id = job.id.clone();

        {
            let mut pending = self.inner.pending.lock().expect("pending list poisoned");
            pending.push_back(job);
            info!(job_id = %id, queue_length = pending.len(), "Enqueued job");
        }

        self.start_worker_if_idle();
        Ok(id)
    }

    /// Status of one job: `Processing` while pending (including in flight),
    /// `Ready` once the rendered file exists, `Failed` otherwise.
    pub fn status(&self, job_id: &JobId) -> JobStatus {
        let pending = self.inner.pending.lock().expect("pending list poisoned");
        if pending.iter().any(|j| &j.id == job_id) {
            return JobStatus::Processing;
        }
        drop(pending);

        if self.inner.store.exists(job_id) {
            JobStatus::Ready
        } else {
            JobStatus::Failed
        }
    }

    /// Union of on-disk videos and still-pending jobs, deduplicated by id.
    /// Pending jobs are listed first.
    pub fn list_all(&self) -> QueueResult<Vec<JobListing>> {
        let pending_ids: Vec<String> = {
            let pending = self.inner.pending.lock().expect("pending list poisoned");
            pending.iter().map(|j| j.id.to_string()).collect()
        };

        let mut listings: Vec<JobListing> = pending_ids
            .iter()
            .map(|id| JobListing {
                id: id.clone(),
                status: JobStatus::Processing,
            })
            .collect();

        for id in self.inner.store.list_ids()? {
            if !pending_ids.contains(&id) {
                listings.push(JobListing {
                    id,
                    status: JobStatus::Ready,
                });
            }
        }

        Ok(listings)
    }

    /// Operator introspection.
    pub fn queue_status(&self) -> QueueSnapshot {
        let pending = self.inner.pending.lock().expect("pending list poisoned");
        QueueSnapshot {
            queue_length: pending.len(),
            is_processing: self.inner.processing.load(Ordering::SeqCst),
            jobs: pending
                .iter()
                .map(|j| PendingJobInfo {
                    id: j.id.to_string(),
                    age_secs: j.age_seconds(),
                })
                .collect(),
        }
    }

    /// Remove jobs older than their time budget without rendering them. If
    /// the queue becomes empty this also clears a stale processing flag
    /// left behind by a crashed worker.
    pub fn clear_stuck(&self) -> ClearStuckReport {
        let mut pending = self.inner.pending.lock().expect("pending list poisoned");
        let before = pending.len();
        pending.retain(|job| {
            let expired = job.age_seconds() > self.inner.budget_secs(job);
            if expired {
                warn!(job_id = %job.id, age_secs = job.age_seconds(), "Clearing stuck job");
            }
            !expired
        });
        let removed = before - pending.len();

        let cleared_processing = if pending.is_empty() {
            self.inner.processing.swap(false, Ordering::SeqCst)
        } else {
            false
        };
        drop(pending);

        if removed > 0 || cleared_processing {
            info!(removed, cleared_processing, "clear_stuck finished");
        }
        ClearStuckReport {
            removed,
            cleared_processing,
        }
    }

    /// Clear the processing flag and restart the worker loop if jobs
    /// remain. Recovers from a worker that crashed mid-job without removing
    /// the flag.
    pub fn force_restart(&self) {
        self.inner.processing.store(false, Ordering::SeqCst);
        warn!("Processing flag force-cleared");

        let has_jobs = !self
            .inner
            .pending
            .lock()
            .expect("pending list poisoned")
            .is_empty();
        if has_jobs {
            self.start_worker_if_idle();
        }
    }

    fn start_worker_if_idle(&self) {
        if self
            .inner
            .processing
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
        {
            let inner = Arc::clone(&self.inner);
            tokio::spawn(async move {
                run_worker_loop(inner).await;
            });
        }
    }
}

impl QueueInner {
    fn budget_secs(&self, job: &QueuedJob) -> i64 {
        if job.config.long_form {
            self.config.long_budget_secs
        } else {
            self.config.short_budget_secs
        }
    }
}

/// Drain the pending list, one job at a time. Jobs stay at the head while
/// in flight so `status` reports them as processing; the head is popped
/// unconditionally afterwards, success or failure.
async fn run_worker_loop(inner: Arc<QueueInner>) {
    loop {
        loop {
            let job = {
                let pending = inner.pending.lock().expect("pending list poisoned");
                match pending.front() {
                    Some(job) => job.clone(),
                    None => break,
                }
            };

            let age_secs = job.age_seconds();
            if age_secs > inner.budget_secs(&job) {
                warn!(
                    job_id = %job.id,
                    age_secs,
                    "Evicting job older than its time budget"
                );
            } else {
                info!(job_id = %job.id, scenes = job.scenes.len(), "Processing job");
                match inner.runner.run(&job).await {
                    Ok(()) => info!(job_id = %job.id, "Job completed"),
                    Err(e) => error!(job_id = %job.id, error = %e, "Job failed"),
                }
            }

            // clear_stuck may have removed the head while we were working.
            let mut pending = inner.pending.lock().expect("pending list poisoned");
            if pending.front().is_some_and(|j| j.id == job.id) {
                pending.pop_front();
            }
        }

        inner.processing.store(false, Ordering::SeqCst);

        // A job enqueued between the drain check and the flag store relies
        // on this loop; pick it up instead of leaving it orphaned.
        let has_jobs = !inner
            .pending
            .lock()
            .expect("pending list poisoned")
            .is_empty();
        if has_jobs
            && inner
                .processing
                .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
                .is_ok()
        {
            continue;
        }
        break;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration as ChronoDuration, Utc};
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    fn scene() -> SceneInput {
        SceneInput::new("hello", vec!["dog".into()])
    }

    fn test_config(dir: &std::path::Path) -> QueueConfig {
        QueueConfig {
            output_dir: dir.to_string_lossy().to_string(),
            ..QueueConfig::default()
        }
    }

    /// Records processed job ids in order; optionally writes the output
    /// file to simulate a successful render.
    struct RecordingRunner {
        seen: Mutex<Vec<String>>,
        store: VideoStore,
        succeed: bool,
    }

    #[async_trait]
    impl JobRunner for RecordingRunner {
        async fn run(&self, job: &QueuedJob) -> anyhow::Result<()> {
            self.seen.lock().unwrap().push(job.id.to_string());
            if self.succeed {
                std::fs::write(self.store.path_for(&job.id), b"video")?;
                Ok(())
            } else {
                anyhow::bail!("injected failure")
            }
        }
    }

    async fn wait_until_idle(queue: &VideoQueue) {
        for _ in 0..200 {
            let snapshot = queue.queue_status();
            if snapshot.queue_length == 0 && !snapshot.is_processing {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("queue did not drain");
    }

    #[tokio::test]
    async fn test_fifo_processing_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = VideoStore::new(dir.path()).unwrap();
        let runner = Arc::new(RecordingRunner {
            seen: Mutex::new(vec![]),
            store,
            succeed: true,
        });
        let queue = VideoQueue::new(test_config(dir.path()), runner.clone()).unwrap();

        let mut ids = Vec::new();
        for _ in 0..4 {
            ids.push(queue.enqueue(vec![scene()], RenderConfig::default()).unwrap());
        }
        wait_until_idle(&queue).await;

        let seen = runner.seen.lock().unwrap();
        let expected: Vec<String> = ids.iter().map(|id| id.to_string()).collect();
        assert_eq!(*seen, expected);
    }

    #[tokio::test]
    async fn test_status_transitions() {
        let dir = tempfile::tempdir().unwrap();
        let store = VideoStore::new(dir.path()).unwrap();
        let runner = Arc::new(RecordingRunner {
            seen: Mutex::new(vec![]),
            store,
            succeed: true,
        });
        let queue = VideoQueue::new(test_config(dir.path()), runner).unwrap();

        let id = queue.enqueue(vec![scene()], RenderConfig::default()).unwrap();
        wait_until_idle(&queue).await;
        assert_eq!(queue.status(&id), JobStatus::Ready);

        let unknown = JobId::from_string("never-enqueued");
        assert_eq!(queue.status(&unknown), JobStatus::Failed);
    }

    #[tokio::test]
    async fn test_failed_job_does_not_block_queue() {
        let dir = tempfile::tempdir().unwrap();
        let store = VideoStore::new(dir.path()).unwrap();
        let runner = Arc::new(RecordingRunner {
            seen: Mutex::new(vec![]),
            store,
            succeed: false,
        });
        let queue = VideoQueue::new(test_config(dir.path()), runner.clone()).unwrap();

        let a = queue.enqueue(vec![scene()], RenderConfig::default()).unwrap();
        let b = queue.enqueue(vec![scene()], RenderConfig::default()).unwrap();
        wait_until_idle(&queue).await;

        assert_eq!(runner.seen.lock().unwrap().len(), 2);
        assert_eq!(queue.status(&a), JobStatus::Failed);
        assert_eq!(queue.status(&b), JobStatus::Failed);
    }

    #[tokio::test]
    async fn test_aged_job_evicted_without_running() {
        let dir = tempfile::tempdir().unwrap();
        let store = VideoStore::new(dir.path()).unwrap();
        let runner = Arc::new(RecordingRunner {
            seen: Mutex::new(vec![]),
            store,
            succeed: true,
        });
        let queue = VideoQueue::new(test_config(dir.path()), runner.clone()).unwrap();

        // Age the job past the short budget before the loop sees it.
        let mut job = QueuedJob::new(vec![scene()], RenderConfig::default());
        job.enqueued_at = Utc::now() - ChronoDuration::minutes(31);
        let id = job.id.clone();
        queue
            .inner
            .pending
            .lock()
            .unwrap()
            .push_back(job);
        queue.start_worker_if_idle();
        wait_until_idle(&queue).await;

        assert!(runner.seen.lock().unwrap().is_empty());
        assert_eq!(queue.status(&id), JobStatus::Failed);
    }

    #[tokio::test]
    async fn test_long_form_budget_applies() {
        let dir = tempfile::tempdir().unwrap();
        let store = VideoStore::new(dir.path()).unwrap();
        let runner = Arc::new(RecordingRunner {
            seen: Mutex::new(vec![]),
            store,
            succeed: true,
        });
        let queue = VideoQueue::new(test_config(dir.path()), runner.clone()).unwrap();

        // 31 minutes old: over the short budget, within the long one.
        let config = RenderConfig {
            long_form: true,
            ..RenderConfig::default()
        };
        let mut job = QueuedJob::new(vec![scene()], config);
        job.enqueued_at = Utc::now() - ChronoDuration::minutes(31);
        queue.inner.pending.lock().unwrap().push_back(job);
        queue.start_worker_if_idle();
        wait_until_idle(&queue).await;

        assert_eq!(runner.seen.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_clear_stuck_clears_stale_flag() {
        let dir = tempfile::tempdir().unwrap();
        let store = VideoStore::new(dir.path()).unwrap();
        let runner = Arc::new(RecordingRunner {
            seen: Mutex::new(vec![]),
            store,
            succeed: true,
        });
        let queue = VideoQueue::new(test_config(dir.path()), runner).unwrap();

        // Simulate a crashed worker: flag set, one over-age job, no loop.
        queue.inner.processing.store(true, Ordering::SeqCst);
        let mut job = QueuedJob::new(vec![scene()], RenderConfig::default());
        job.enqueued_at = Utc::now() - ChronoDuration::minutes(31);
        queue.inner.pending.lock().unwrap().push_back(job);

        let report = queue.clear_stuck();
        assert_eq!(
            report,
            ClearStuckReport {
                removed: 1,
                cleared_processing: true,
            }
        );
        assert_eq!(queue.queue_status().queue_length, 0);
        assert!(!queue.queue_status().is_processing);
    }

    #[tokio::test]
    async fn test_clear_stuck_keeps_fresh_jobs() {
        let dir = tempfile::tempdir().unwrap();
        let store = VideoStore::new(dir.path()).unwrap();
        let runner = Arc::new(RecordingRunner {
            seen: Mutex::new(vec![]),
            store,
            succeed: true,
        });
        let queue = VideoQueue::new(test_config(dir.path()), runner).unwrap();

        queue.inner.processing.store(true, Ordering::SeqCst);
        queue
            .inner
            .pending
            .lock()
            .unwrap()
            .push_back(QueuedJob::new(vec![scene()], RenderConfig::default()));

        let report = queue.clear_stuck();
        assert_eq!(report.removed, 0);
        assert!(!report.cleared_processing);
        assert_eq!(queue.queue_status().queue_length, 1);
    }

    #[tokio::test]
    async fn test_force_restart_resumes_pending_jobs() {
        let dir = tempfile::tempdir().unwrap();
        let store = VideoStore::new(dir.path()).unwrap();
        let runner = Arc::new(RecordingRunner {
            seen: Mutex::new(vec![]),
            store,
            succeed: true,
        });
        let queue = VideoQueue::new(test_config(dir.path()), runner.clone()).unwrap();

        // Stale flag prevents enqueue from starting a loop.
        queue.inner.processing.store(true, Ordering::SeqCst);
        queue
            .inner
            .pending
            .lock()
            .unwrap()
            .push_back(QueuedJob::new(vec![scene()], RenderConfig::default()));

        queue.force_restart();
        wait_until_idle(&queue).await;
        assert_eq!(runner.seen.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_enqueue_rejects_invalid_input() {
        let dir = tempfile::tempdir().unwrap();
        let store = VideoStore::new(dir.path()).unwrap();
        let runner = Arc::new(RecordingRunner {
            seen: Mutex::new(vec![]),
            store,
            succeed: true,
        });
        let queue = VideoQueue::new(test_config(dir.path()), runner).unwrap();

        assert!(queue.enqueue(vec![], RenderConfig::default()).is_err());
        assert!(queue
            .enqueue(
                vec![SceneInput::new("", vec!["dog".into()])],
                RenderConfig::default()
            )
            .is_err());
        assert_eq!(queue.queue_status().queue_length, 0);
    }

    #[tokio::test]
    async fn test_list_all_merges_store_and_pending() {
        let dir = tempfile::tempdir().unwrap();
        let store = VideoStore::new(dir.path()).unwrap();
        std::fs::write(dir.path().join("old-video.mp4"), b"x").unwrap();

        // Runner that blocks until released, keeping the job pending.
        struct BlockingRunner {
            calls: AtomicUsize,
        }

        #[async_trait]
        impl JobRunner for BlockingRunner {
            async fn run(&self, _job: &QueuedJob) -> anyhow::Result<()> {
                self.calls.fetch_add(1, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok(())
            }
        }

        let _ = store;
        let queue = VideoQueue::new(
            test_config(dir.path()),
            Arc::new(BlockingRunner {
                calls: AtomicUsize::new(0),
            }),
        )
        .unwrap();

        let id = queue.enqueue(vec![scene()], RenderConfig::default()).unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;

        let listings = queue.list_all().unwrap();
        assert_eq!(listings.len(), 2);
        assert_eq!(listings[0].id, id.to_string());
        assert_eq!(listings[0].status, JobStatus::Processing);
        assert_eq!(listings[1].id, "old-video");
        assert_eq!(listings[1].status, JobStatus::Ready);
    }
}
