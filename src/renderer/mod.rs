//! Page rendering behind a launch/render/close trait pair.
//!
//! The orchestrator only ever sees `RendererFactory` and `PageRenderer`, so a
//! real Chromium and an in-memory fake are interchangeable.

pub mod browser;
pub mod cleanup;
pub mod discovery;
pub mod page_helpers;
pub mod page_timeout;

use async_trait::async_trait;
use std::time::Duration;

use crate::scrape_engine::ScrapeResult;

pub use browser::{BrowserWrapper, ChromiumRenderer, ChromiumRendererFactory};
pub use page_timeout::with_page_timeout;

/// What a render call waits for before returning markup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitSpec<'a> {
    /// CSS selector that must match at least one element
    pub selector: &'a str,
    /// Upper bound on waiting for `selector` once navigation finished
    pub timeout: Duration,
    /// Upper bound on the navigation itself
    pub navigation_timeout: Duration,
}

/// Launches one renderer per scrape job
#[async_trait]
pub trait RendererFactory: Send + Sync {
    async fn launch(&self, headless: bool) -> ScrapeResult<Box<dyn PageRenderer>>;
}

/// A live rendering session
#[async_trait]
pub trait PageRenderer: Send {
    /// Navigate to `url`, wait for `wait.selector`, return the rendered HTML.
    ///
    /// Returns `ScrapeError::RenderTimeout` when the selector never matches.
    async fn render(&mut self, url: &str, wait: &WaitSpec<'_>) -> ScrapeResult<String>;

    /// Release the session. Never fails; problems are logged.
    async fn close(self: Box<Self>);
}
