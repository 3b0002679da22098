//! Core types for scrape operations.
//!
//! Error type, request description and per-page progress used by the
//! orchestrator, the job table and the HTTP layer.

use serde::{Deserialize, Serialize};

/// Error type for scrape operations
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    /// Browser could not be launched or stopped responding
    #[error("Browser error: {0}")]
    Browser(String),

    /// Navigation to a listing page failed
    #[error("Navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    /// ld+json blocks never showed up in the rendered page
    #[error("Timed out after {timeout_secs}s waiting for structured data on {url}")]
    RenderTimeout { url: String, timeout_secs: u64 },

    /// Request parameters rejected before any work started
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Reading or writing the persisted table failed
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// Other errors
    #[error("Scrape error: {0}")]
    Other(String),
}

impl From<anyhow::Error> for ScrapeError {
    fn from(err: anyhow::Error) -> Self {
        // {:#} keeps the whole context chain
        Self::Other(format!("{err:#}"))
    }
}

/// Convenience alias for Result with `ScrapeError`
pub type ScrapeResult<T> = Result<T, ScrapeError>;

/// One scrape job's parameters: which city, how many pages, and whether the
/// browser runs headless.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapeRequest {
    pub city: String,
    pub pages: u32,
    pub headless: bool,
}

impl ScrapeRequest {
    #[must_use]
    pub fn new(city: impl Into<String>, pages: u32) -> Self {
        Self {
            city: city.into(),
            pages,
            headless: true,
        }
    }

    #[must_use]
    pub fn headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Reject slugs that cannot be spliced into a URL path and a file name,
    /// and page counts outside `1..=max_pages`.
    pub fn validate(&self, max_pages: u32) -> ScrapeResult<()> {
        if !crate::utils::is_valid_city_slug(&self.city) {
            return Err(ScrapeError::InvalidRequest(format!(
                "city must be a lowercase slug of letters, digits, '-' or '_' (got '{}')",
                self.city
            )));
        }
        if self.pages == 0 || self.pages > max_pages {
            return Err(ScrapeError::InvalidRequest(format!(
                "pages must be between 1 and {max_pages} (got {})",
                self.pages
            )));
        }
        Ok(())
    }
}

/// Progress update emitted once per rendered page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageProgress {
    pub page: u32,
    pub pages: u32,
    pub url: String,
    pub found: usize,
}
