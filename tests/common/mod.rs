//! Shared fixtures for the integration tests: an in-memory renderer and
//! listing-page HTML builders.

use async_trait::async_trait;
use restaurant_scrape::config::ScrapeConfig;
use restaurant_scrape::renderer::{PageRenderer, RendererFactory, WaitSpec};
use restaurant_scrape::scrape_engine::{ScrapeError, ScrapeResult};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Wrap ld+json payloads in a minimal listing page
#[allow(dead_code)]
pub fn listing_page(blocks: &[&str]) -> String {
    let scripts: String = blocks
        .iter()
        .map(|b| format!(r#"<script type="application/ld+json">{b}</script>"#))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        r#"<!DOCTYPE html>
<html>
<head><title>Restaurants</title>{scripts}</head>
<body><div id="root">listing</div></body>
</html>"#
    )
}

/// Container block with one `Restaurant` item per `(name, url)` pair
#[allow(dead_code)]
pub fn container_block(items: &[(&str, &str)]) -> String {
    let elements: Vec<String> = items
        .iter()
        .enumerate()
        .map(|(i, (name, url))| {
            format!(
                r#"{{"@type":"ListItem","position":{},"item":{{"@type":"Restaurant","name":"{name}","url":"{url}"}}}}"#,
                i + 1
            )
        })
        .collect();
    format!(
        r#"{{"@context":"https://schema.org","@type":"ItemList","itemListElement":[{}]}}"#,
        elements.join(",")
    )
}

/// Scrape config suitable for tests: no politeness pauses, short waits
#[allow(dead_code)]
pub fn test_config(data_dir: &Path) -> ScrapeConfig {
    ScrapeConfig::builder()
        .data_dir(data_dir)
        .base_url("https://listings.test")
        .wait_timeout_secs(1)
        .no_delays()
        .max_pages(5)
        .build()
        .expect("test config is valid")
}

/// Observations shared between a fake factory and the renderers it launched
#[allow(dead_code)]
#[derive(Debug, Default)]
pub struct RenderLog {
    pub launches: AtomicUsize,
    pub closes: AtomicUsize,
    pub urls: Mutex<Vec<String>>,
    pub headless: Mutex<Vec<bool>>,
}

#[allow(dead_code)]
impl RenderLog {
    pub fn launches(&self) -> usize {
        self.launches.load(Ordering::SeqCst)
    }

    pub fn closes(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }

    pub fn urls(&self) -> Vec<String> {
        self.urls.lock().unwrap().clone()
    }
}

/// `RendererFactory` serving canned HTML, one document per page number
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct FakeRendererFactory {
    pages: Arc<Vec<String>>,
    timeout_on_page: Option<usize>,
    hang_on_page: Option<usize>,
    panic_on_page: Option<usize>,
    fail_launch: bool,
    pub log: Arc<RenderLog>,
}

#[allow(dead_code)]
impl FakeRendererFactory {
    /// Page `n` (1-based) renders `pages[n - 1]`; later pages reuse the last one
    pub fn with_pages(pages: Vec<String>) -> Self {
        Self {
            pages: Arc::new(pages),
            ..Self::default()
        }
    }

    /// The `n`th render call (1-based) times out waiting for ld+json
    pub fn timing_out_on(mut self, n: usize) -> Self {
        self.timeout_on_page = Some(n);
        self
    }

    /// The `n`th render call (1-based) never returns
    pub fn hanging_on(mut self, n: usize) -> Self {
        self.hang_on_page = Some(n);
        self
    }

    /// The `n`th render call (1-based) panics
    pub fn panicking_on(mut self, n: usize) -> Self {
        self.panic_on_page = Some(n);
        self
    }

    pub fn failing_launch(mut self) -> Self {
        self.fail_launch = true;
        self
    }
}

#[async_trait]
impl RendererFactory for FakeRendererFactory {
    async fn launch(&self, headless: bool) -> ScrapeResult<Box<dyn PageRenderer>> {
        if self.fail_launch {
            return Err(ScrapeError::Browser("no browser in tests".to_string()));
        }
        self.log.launches.fetch_add(1, Ordering::SeqCst);
        self.log.headless.lock().unwrap().push(headless);
        Ok(Box::new(FakeRenderer {
            factory: self.clone(),
            calls: 0,
        }))
    }
}

#[allow(dead_code)]
struct FakeRenderer {
    factory: FakeRendererFactory,
    calls: usize,
}

#[async_trait]
impl PageRenderer for FakeRenderer {
    async fn render(&mut self, url: &str, wait: &WaitSpec<'_>) -> ScrapeResult<String> {
        self.calls += 1;
        self.factory.log.urls.lock().unwrap().push(url.to_string());

        if self.factory.hang_on_page == Some(self.calls) {
            std::future::pending::<()>().await;
        }

        if self.factory.panic_on_page == Some(self.calls) {
            panic!("renderer crashed on {url}");
        }

        if self.factory.timeout_on_page == Some(self.calls) {
            return Err(ScrapeError::RenderTimeout {
                url: url.to_string(),
                timeout_secs: wait.timeout.as_secs(),
            });
        }

        let pages = &self.factory.pages;
        let index = (self.calls - 1).min(pages.len().saturating_sub(1));
        Ok(pages.get(index).cloned().unwrap_or_default())
    }

    async fn close(self: Box<Self>) {
        self.factory.log.closes.fetch_add(1, Ordering::SeqCst);
    }
}
