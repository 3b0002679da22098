//! Route handlers

use axum::Json;
use axum::body::Bytes;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::http::HeaderValue;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use super::app::AppState;
use super::error::ApiError;
use crate::page_extractor::ExtractedRecord;
use crate::scrape_engine::ScrapeRequest;
use crate::utils::is_valid_city_slug;

/// Message returned when a city's table has not been written yet
pub const DATA_NOT_FOUND: &str = "Data not found. Please run /scrape first.";

/// Header carrying the id of the job behind a synchronous scrape
pub const JOB_ID_HEADER: &str = "x-job-id";

#[derive(Debug, Default, Deserialize)]
pub struct ScrapeQuery {
    pub city: Option<String>,
    pub pages: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ScrapeBody {
    pub city: Option<String>,
    pub pages: Option<u32>,
    pub headless: Option<bool>,
}

/// Acknowledgement for a background trigger
#[derive(Debug, Serialize, Deserialize)]
pub struct ScrapeStarted {
    pub status: String,
    pub city: String,
    pub pages: u32,
    pub job_id: Uuid,
}

fn build_request(state: &AppState, city: Option<String>, pages: u32) -> Result<ScrapeRequest, ApiError> {
    let city = city.unwrap_or_else(|| state.config.default_city.clone());
    let request = ScrapeRequest::new(city, pages);
    request.validate(state.config.scrape.max_pages())?;
    Ok(request)
}

/// `GET /scrape?city=&pages=`: start a background job and return at once
pub async fn trigger_background(
    State(state): State<AppState>,
    query: Result<Query<ScrapeQuery>, QueryRejection>,
) -> Result<Json<ScrapeStarted>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let pages = query.pages.unwrap_or(state.config.default_background_pages);
    let request = build_request(&state, query.city, pages)?;

    let job = state.runner().spawn_background_job(request).await;
    info!(job_id = %job.id, city = %job.city, pages = job.pages, "Scraper started");

    Ok(Json(ScrapeStarted {
        status: "Scraper started".to_string(),
        city: job.city,
        pages: job.pages,
        job_id: job.id,
    }))
}

/// `POST /scrape`: scrape synchronously and return the records.
///
/// An empty body means all defaults.
pub async fn scrape_now(State(state): State<AppState>, body: Bytes) -> Result<Response, ApiError> {
    let body: ScrapeBody = if body.iter().all(u8::is_ascii_whitespace) {
        ScrapeBody::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| ApiError::BadRequest(format!("invalid JSON body: {e}")))?
    };

    let pages = body.pages.unwrap_or(state.config.default_sync_pages);
    let request = build_request(&state, body.city, pages)?.headless(body.headless.unwrap_or(true));

    let (job, result) = state.runner().run_sync_job(request).await;
    let records = result?;

    let mut response = Json(records).into_response();
    if let Ok(value) = HeaderValue::from_str(&job.id.to_string()) {
        response.headers_mut().insert(JOB_ID_HEADER, value);
    }
    Ok(response)
}

/// `GET /data/:city`: the persisted table for `city`
pub async fn read_data(
    State(state): State<AppState>,
    Path(city): Path<String>,
) -> Result<Json<Vec<ExtractedRecord>>, ApiError> {
    if !is_valid_city_slug(&city) {
        return Err(ApiError::BadRequest(format!("invalid city slug '{city}'")));
    }

    state
        .store
        .read_rows(&city)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(DATA_NOT_FOUND.to_string()))
}

/// `GET /jobs`
pub async fn list_jobs(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.jobs.list().await)
}

/// `GET /jobs/:id`
pub async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = Uuid::parse_str(&id).map_err(|e| ApiError::BadRequest(format!("invalid job id: {e}")))?;
    state
        .jobs
        .get(id)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("job {id} not found")))
}

/// `GET /health`
pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}
