//! Running scrape jobs against the job table

use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{Instrument, error, info, info_span};
use uuid::Uuid;

use super::manager::JobManager;
use super::types::{JobKind, ScrapeJob};
use crate::config::ScrapeConfig;
use crate::content_saver::CsvStore;
use crate::page_extractor::ExtractedRecord;
use crate::renderer::RendererFactory;
use crate::scrape_engine::{ScrapeError, ScrapeRequest, ScrapeResult, scrape_city_with_progress};

/// Everything a job needs to run, cheap to clone into a task
#[derive(Clone)]
pub struct JobRunner {
    jobs: JobManager,
    store: CsvStore,
    renderer: Arc<dyn RendererFactory>,
    config: Arc<ScrapeConfig>,
}

impl JobRunner {
    #[must_use]
    pub fn new(
        jobs: JobManager,
        store: CsvStore,
        renderer: Arc<dyn RendererFactory>,
        config: Arc<ScrapeConfig>,
    ) -> Self {
        Self {
            jobs,
            store,
            renderer,
            config,
        }
    }

    #[must_use]
    pub fn jobs(&self) -> &JobManager {
        &self.jobs
    }

    /// Register a background job and start it on its own task.
    ///
    /// Returns the `Pending` snapshot immediately. The task waits for the
    /// city's lock, scrapes, writes the table, and records the outcome.
    pub async fn spawn_background_job(&self, request: ScrapeRequest) -> ScrapeJob {
        let job = self.jobs.create(JobKind::Background, &request).await;
        let runner = self.clone();
        let id = job.id;
        let span = info_span!("scrape_job", %id, city = %request.city);

        tokio::spawn(
            async move {
                let lock = runner.jobs.city_lock(&request.city).await;
                let _guard = lock.lock().await;

                runner.jobs.mark_running(id).await;
                let worker = runner.clone();
                let work = async move { worker.scrape_and_persist(id, &request).await };
                let _ = supervise(&runner.jobs, id, work, |(count, path): &(usize, PathBuf)| {
                    (*count, Some(path.clone()))
                })
                .await;
            }
            .instrument(span),
        );

        job
    }

    /// Run a job to completion and return its records.
    ///
    /// The job is registered in the table like any other, but nothing is
    /// written to disk. The scrape runs on its own task, so the job still
    /// finishes and closes its browser if the caller stops waiting.
    pub async fn run_sync_job(
        &self,
        request: ScrapeRequest,
    ) -> (ScrapeJob, ScrapeResult<Vec<ExtractedRecord>>) {
        let job = self.jobs.create(JobKind::Synchronous, &request).await;
        let id = job.id;
        let span = info_span!("scrape_job", %id, city = %request.city);

        self.jobs.mark_running(id).await;
        let worker = self.clone();
        let work = async move {
            let progress = worker.jobs.progress(id).await;
            scrape_city_with_progress(worker.renderer.as_ref(), &worker.config, &request, &progress)
                .await
        };
        let jobs = self.jobs.clone();
        let task = tokio::spawn(
            async move { supervise(&jobs, id, work, |records: &Vec<ExtractedRecord>| (records.len(), None)).await }
                .instrument(span),
        );

        let result = match task.await {
            Ok(result) => result,
            Err(e) => {
                let err = ScrapeError::Other(format!("job task ended abnormally: {e}"));
                self.jobs.mark_failed(id, err.to_string()).await;
                Err(err)
            }
        };

        let snapshot = self.jobs.get(id).await.unwrap_or(job);
        (snapshot, result)
    }

    async fn scrape_and_persist(
        &self,
        id: Uuid,
        request: &ScrapeRequest,
    ) -> ScrapeResult<(usize, PathBuf)> {
        let progress = self.jobs.progress(id).await;
        let records =
            scrape_city_with_progress(self.renderer.as_ref(), &self.config, request, &progress)
                .await?;

        let path = self.store.write_rows(&request.city, &records).await?;
        info!("Persisted {} records to {}", records.len(), path.display());
        Ok((records.len(), path))
    }
}

/// Run `work` on its own task and record how it ended.
///
/// A panic inside `work` surfaces as a `JoinError` and marks the job failed,
/// so no job is left `Running` once its task is gone.
async fn supervise<T, F>(
    jobs: &JobManager,
    id: Uuid,
    work: F,
    summary: impl FnOnce(&T) -> (usize, Option<PathBuf>),
) -> ScrapeResult<T>
where
    F: Future<Output = ScrapeResult<T>> + Send + 'static,
    T: Send + 'static,
{
    let result = match tokio::spawn(work).await {
        Ok(result) => result,
        Err(e) => Err(ScrapeError::Other(format!("job task ended abnormally: {e}"))),
    };

    match &result {
        Ok(value) => {
            let (count, path) = summary(value);
            jobs.mark_done(id, count, path).await;
        }
        Err(e) => {
            error!("Job failed: {e}");
            jobs.mark_failed(id, e.to_string()).await;
        }
    }
    result
}
