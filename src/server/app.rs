//! Router construction from explicit state

use axum::Router;
use axum::routing::get;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::routes;
use crate::config::ServerConfig;
use crate::content_saver::CsvStore;
use crate::jobs::{JobManager, JobRunner};
use crate::renderer::RendererFactory;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub jobs: JobManager,
    pub store: CsvStore,
    pub renderer: Arc<dyn RendererFactory>,
}

impl AppState {
    /// State with a fresh job table and a store rooted at the configured data dir
    #[must_use]
    pub fn new(config: ServerConfig, renderer: Arc<dyn RendererFactory>) -> Self {
        let jobs = JobManager::new(std::time::Duration::from_secs(config.job_retention_secs));
        let store = CsvStore::new(config.scrape.data_dir());
        Self {
            config: Arc::new(config),
            jobs,
            store,
            renderer,
        }
    }

    #[must_use]
    pub fn runner(&self) -> JobRunner {
        JobRunner::new(
            self.jobs.clone(),
            self.store.clone(),
            Arc::clone(&self.renderer),
            Arc::new(self.config.scrape.clone()),
        )
    }
}

/// All routes, with request tracing
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/scrape",
            get(routes::trigger_background).post(routes::scrape_now),
        )
        .route("/data/:city", get(routes::read_data))
        .route("/jobs", get(routes::list_jobs))
        .route("/jobs/:id", get(routes::get_job))
        .route("/health", get(routes::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
