//! Process-wide job table
//!
//! Jobs are registered when triggered and updated as they progress. Terminal
//! jobs stay visible until the cleanup task drops them after the retention
//! period.

use chrono::Utc;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use uuid::Uuid;

use super::types::{JobKind, JobStatus, ScrapeJob};
use crate::scrape_engine::{PageProgress, ProgressReporter, ScrapeRequest};

/// Initial capacity for the job map
const JOB_TABLE_INITIAL_CAPACITY: usize = 16;

/// How often the cleanup task sweeps the table
const CLEANUP_INTERVAL: Duration = Duration::from_secs(60);

/// Live counters a running job updates without taking the table lock
#[derive(Debug, Default)]
struct JobCounters {
    pages_done: AtomicU32,
    records_seen: AtomicUsize,
}

#[derive(Debug)]
struct JobEntry {
    job: ScrapeJob,
    counters: Arc<JobCounters>,
}

impl JobEntry {
    fn snapshot(&self) -> ScrapeJob {
        let mut job = self.job.clone();
        if !job.status.is_terminal() {
            job.pages_done = self.counters.pages_done.load(Ordering::Relaxed);
            job.record_count = self.counters.records_seen.load(Ordering::Relaxed);
        }
        job
    }
}

/// Table of scrape jobs plus the per-city locks that serialize them
#[derive(Clone)]
pub struct JobManager {
    jobs: Arc<Mutex<HashMap<Uuid, JobEntry>>>,
    city_locks: Arc<Mutex<HashMap<String, Arc<Mutex<()>>>>>,
    retention: Duration,
}

impl JobManager {
    /// Terminal jobs are kept for `retention` after they finish
    #[must_use]
    pub fn new(retention: Duration) -> Self {
        Self {
            jobs: Arc::new(Mutex::new(HashMap::with_capacity(
                JOB_TABLE_INITIAL_CAPACITY,
            ))),
            city_locks: Arc::new(Mutex::new(HashMap::new())),
            retention,
        }
    }

    /// Register a new `Pending` job
    pub async fn create(&self, kind: JobKind, request: &ScrapeRequest) -> ScrapeJob {
        let job = ScrapeJob::new(kind, request);
        let snapshot = job.clone();
        self.jobs.lock().await.insert(
            job.id,
            JobEntry {
                job,
                counters: Arc::default(),
            },
        );
        log::debug!("Registered {:?} job {} for {}", kind, snapshot.id, snapshot.city);
        snapshot
    }

    pub async fn mark_running(&self, id: Uuid) {
        self.update(id, |job| {
            job.status = JobStatus::Running;
            job.started_at = Some(Utc::now());
        })
        .await;
    }

    pub async fn mark_done(&self, id: Uuid, record_count: usize, output_path: Option<PathBuf>) {
        let mut jobs = self.jobs.lock().await;
        if let Some(entry) = jobs.get_mut(&id) {
            entry.job.pages_done = entry.counters.pages_done.load(Ordering::Relaxed);
            entry.job.record_count = record_count;
            entry.job.output_path = output_path;
            entry.job.status = JobStatus::Done;
            entry.job.finished_at = Some(Utc::now());
        }
    }

    pub async fn mark_failed(&self, id: Uuid, error: impl Into<String>) {
        let error = error.into();
        let mut jobs = self.jobs.lock().await;
        if let Some(entry) = jobs.get_mut(&id) {
            entry.job.pages_done = entry.counters.pages_done.load(Ordering::Relaxed);
            entry.job.record_count = 0;
            entry.job.status = JobStatus::Failed { error };
            entry.job.finished_at = Some(Utc::now());
        }
    }

    /// Current snapshot of a job
    pub async fn get(&self, id: Uuid) -> Option<ScrapeJob> {
        self.jobs.lock().await.get(&id).map(JobEntry::snapshot)
    }

    /// Every job in the table, oldest first
    pub async fn list(&self) -> Vec<ScrapeJob> {
        let mut all: Vec<ScrapeJob> = self
            .jobs
            .lock()
            .await
            .values()
            .map(JobEntry::snapshot)
            .collect();
        all.sort_by_key(|job| job.created_at);
        all
    }

    /// Progress reporter feeding the job's live counters
    pub async fn progress(&self, id: Uuid) -> JobProgress {
        let counters = self
            .jobs
            .lock()
            .await
            .get(&id)
            .map(|entry| Arc::clone(&entry.counters))
            .unwrap_or_default();
        JobProgress { id, counters }
    }

    /// Shared lock for `city`. Hold it across scrape and write so two jobs
    /// never race on one table.
    pub async fn city_lock(&self, city: &str) -> Arc<Mutex<()>> {
        let mut locks = self.city_locks.lock().await;
        Arc::clone(locks.entry(city.to_string()).or_default())
    }

    async fn update(&self, id: Uuid, f: impl FnOnce(&mut ScrapeJob)) {
        if let Some(entry) = self.jobs.lock().await.get_mut(&id) {
            f(&mut entry.job);
        }
    }

    /// Drop terminal jobs that finished more than `retention` ago, and city
    /// locks nobody holds. Returns the number of jobs removed.
    pub async fn cleanup_jobs(&self) -> usize {
        let now = Utc::now();
        let retention = self.retention;

        let removed = {
            let mut jobs = self.jobs.lock().await;
            let before = jobs.len();
            jobs.retain(|id, entry| {
                let expired = entry.job.status.is_terminal()
                    && entry.job.finished_at.is_some_and(|done| {
                        now.signed_duration_since(done)
                            .to_std()
                            .unwrap_or(Duration::ZERO)
                            >= retention
                    });
                if expired {
                    log::debug!("Removing job {id}: {:?}", entry.job.status);
                }
                !expired
            });
            before - jobs.len()
        };

        // Only the map holds an unused lock
        self.city_locks
            .lock()
            .await
            .retain(|_, lock| Arc::strong_count(lock) > 1);

        if removed > 0 {
            log::info!("Cleaned up {removed} finished jobs");
        }
        removed
    }

    /// Spawn the periodic cleanup sweep (call once at startup)
    pub fn start_cleanup_task(self: Arc<Self>) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(CLEANUP_INTERVAL);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                self.cleanup_jobs().await;
            }
        })
    }
}

/// `ProgressReporter` that updates one job's counters
#[derive(Debug, Clone)]
pub struct JobProgress {
    id: Uuid,
    counters: Arc<JobCounters>,
}

impl ProgressReporter for JobProgress {
    fn report_browser_launched(&self) {
        log::debug!("Job {}: browser launched", self.id);
    }

    fn report_page_started(&self, page: u32, url: &str) {
        log::debug!("Job {}: page {page} -> {url}", self.id);
    }

    fn report_page_scraped(&self, progress: &PageProgress) {
        self.counters
            .pages_done
            .store(progress.page, Ordering::Relaxed);
        self.counters
            .records_seen
            .fetch_add(progress.found, Ordering::Relaxed);
    }

    fn report_completed(&self, total_records: usize) {
        log::debug!("Job {}: completed with {total_records} records", self.id);
    }

    fn report_error(&self, error: &str) {
        log::debug!("Job {}: {error}", self.id);
    }
}
