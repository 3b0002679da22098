//! Router tests driven through `tower::ServiceExt::oneshot`

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use restaurant_scrape::config::ServerConfig;
use restaurant_scrape::jobs::{JobStatus, ScrapeJob};
use restaurant_scrape::page_extractor::ExtractedRecord;
use restaurant_scrape::server::routes::{DATA_NOT_FOUND, JOB_ID_HEADER, ScrapeStarted};
use restaurant_scrape::server::{AppState, build_router};
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tower::ServiceExt;

mod common;
use common::{FakeRendererFactory, container_block, listing_page, test_config};

struct TestApp {
    router: Router,
    state: AppState,
    _dir: TempDir,
}

fn app_with(factory: FakeRendererFactory) -> TestApp {
    let dir = TempDir::new().unwrap();
    let config = ServerConfig::with_scrape_config(test_config(dir.path()));
    let state = AppState::new(config, Arc::new(factory));
    TestApp {
        router: build_router(state.clone()),
        state,
        _dir: dir,
    }
}

fn default_app() -> TestApp {
    app_with(FakeRendererFactory::with_pages(vec![listing_page(&[
        container_block(&[("A", "/r/a"), ("B", "/r/b")]).as_str(),
    ])]))
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, axum::http::HeaderMap, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, headers, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn wait_for_job(app: &TestApp, id: uuid::Uuid) -> ScrapeJob {
    for _ in 0..200 {
        if let Some(job) = app.state.jobs.get(id).await
            && job.status.is_terminal()
        {
            return job;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("job {id} never finished");
}

#[tokio::test]
async fn health_reports_ok() {
    let app = default_app();
    let (status, _, body) = send(&app.router, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
}

#[tokio::test]
async fn data_for_unscraped_city_is_404() {
    let app = default_app();
    let (status, _, body) = send(&app.router, get("/data/pune")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": DATA_NOT_FOUND}));
}

#[tokio::test]
async fn data_rejects_bad_slug() {
    let app = default_app();
    let (status, _, body) = send(&app.router, get("/data/Pune")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("invalid city slug"));
}

#[tokio::test]
async fn background_trigger_acknowledges_then_persists() {
    let app = default_app();

    let (status, _, body) = send(&app.router, get("/scrape?city=hyderabad&pages=2")).await;
    assert_eq!(status, StatusCode::OK);

    let ack: ScrapeStarted = serde_json::from_value(body).unwrap();
    assert_eq!(ack.status, "Scraper started");
    assert_eq!(ack.city, "hyderabad");
    assert_eq!(ack.pages, 2);

    let job = wait_for_job(&app, ack.job_id).await;
    assert_eq!(job.status, JobStatus::Done);

    let (status, _, body) = send(&app.router, get("/data/hyderabad")).await;
    assert_eq!(status, StatusCode::OK);
    let rows: Vec<ExtractedRecord> = serde_json::from_value(body).unwrap();
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0].url.as_deref(), Some("https://listings.test/r/a"));
    assert_eq!(rows[3].page, 2);
}

#[tokio::test]
async fn background_trigger_uses_defaults() {
    let app = default_app();

    let (status, _, body) = send(&app.router, get("/scrape")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["city"], "hyderabad");
    assert_eq!(body["pages"], 2);
    assert!(body["job_id"].is_string());
}

#[tokio::test]
async fn background_trigger_validates_input() {
    let app = default_app();

    for uri in [
        "/scrape?pages=0",
        "/scrape?pages=99",
        "/scrape?pages=two",
        "/scrape?city=..%2Fetc",
    ] {
        let (status, _, body) = send(&app.router, get(uri)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert!(body["error"].is_string(), "{uri}");
    }
    assert!(app.state.jobs.list().await.is_empty());
}

#[tokio::test]
async fn sync_scrape_returns_records_without_persisting() {
    let app = default_app();

    let (status, headers, body) = send(
        &app.router,
        post_json("/scrape", json!({"city": "pune", "pages": 1, "headless": true})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let records: Vec<ExtractedRecord> = serde_json::from_value(body.clone()).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(body[0]["reviewCount"], Value::Null);
    assert_eq!(body[0]["city"], "pune");
    assert!(headers.contains_key(JOB_ID_HEADER));

    let (status, _, _) = send(&app.router, get("/data/pune")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn sync_scrape_accepts_empty_body() {
    let app = default_app();
    let request = Request::builder()
        .method("POST")
        .uri("/scrape")
        .body(Body::empty())
        .unwrap();

    let (status, _, body) = send(&app.router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["city"], "hyderabad");
    assert_eq!(body[0]["page"], 1);
}

#[tokio::test]
async fn sync_scrape_rejects_malformed_json() {
    let app = default_app();
    let request = Request::builder()
        .method("POST")
        .uri("/scrape")
        .body(Body::from("{not json"))
        .unwrap();

    let (status, _, _) = send(&app.router, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn sync_render_timeout_is_bad_gateway() {
    let app = app_with(
        FakeRendererFactory::with_pages(vec![listing_page(&[])]).timing_out_on(1),
    );

    let (status, _, body) = send(&app.router, post_json("/scrape", json!({"city": "pune"}))).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["error"].as_str().unwrap().contains("Timed out"));

    let jobs = app.state.jobs.list().await;
    assert_eq!(jobs.len(), 1);
    assert!(matches!(jobs[0].status, JobStatus::Failed { .. }));
}

#[tokio::test]
async fn jobs_are_listed_and_fetchable() {
    let app = default_app();
    let (_, _, ack) = send(&app.router, get("/scrape?city=delhi&pages=1")).await;
    let id = ack["job_id"].as_str().unwrap().to_string();

    let (status, _, list) = send(&app.router, get("/jobs")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["id"], id.as_str());

    let (status, _, job) = send(&app.router, get(&format!("/jobs/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(job["city"], "delhi");
    assert_eq!(job["kind"], "background");
}

#[tokio::test]
async fn unknown_or_malformed_job_ids() {
    let app = default_app();

    let (status, _, _) = send(
        &app.router,
        get("/jobs/00000000-0000-4000-8000-000000000000"),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, _) = send(&app.router, get("/jobs/not-a-uuid")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
