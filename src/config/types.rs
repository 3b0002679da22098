//! Core configuration types for scrape jobs
//!
//! This module contains the `ScrapeConfig` struct that every job reads its
//! site origin, timeouts, politeness delays and storage location from.

use std::path::PathBuf;

use crate::utils::{
    DEFAULT_BASE_URL, DEFAULT_MAX_PAGES, DEFAULT_NAVIGATION_TIMEOUT_SECS, DEFAULT_PAGE_DELAY_MS,
    DEFAULT_SETTLE_DELAY_MS, DEFAULT_WAIT_TIMEOUT_SECS,
};

/// Inclusive range of milliseconds a randomized pause is drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayRange {
    pub min_ms: u64,
    pub max_ms: u64,
}

impl DelayRange {
    #[must_use]
    pub const fn new(min_ms: u64, max_ms: u64) -> Self {
        Self { min_ms, max_ms }
    }

    /// A range that never sleeps
    #[must_use]
    pub const fn none() -> Self {
        Self::new(0, 0)
    }

    #[must_use]
    pub const fn from_tuple(range: (u64, u64)) -> Self {
        Self::new(range.0, range.1)
    }
}

/// Main configuration struct for scrape jobs
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    /// Directory the per-city CSV tables are written to.
    pub(crate) data_dir: PathBuf,

    /// Site origin listing URLs are built from, e.g. `https://www.zomato.com`
    pub(crate) base_url: String,

    /// Timeout in seconds for ld+json blocks to appear after navigation.
    ///
    /// Expiry aborts the whole job; there is no partial-results path.
    ///
    /// Default: 20 seconds
    pub(crate) wait_timeout_secs: u64,

    /// Timeout in seconds for `page.goto()` operations
    ///
    /// Default: 60 seconds
    pub(crate) navigation_timeout_secs: u64,

    /// Pause after structured data shows up, before the markup is read
    pub(crate) settle_delay: DelayRange,

    /// Pause between two page fetches
    pub(crate) page_delay: DelayRange,

    /// Largest `pages` value a single job may request
    pub(crate) max_pages: u32,

    /// Chrome user data directory root. Each job gets a unique profile below it.
    /// Defaults to the system temp directory.
    pub(crate) chrome_data_dir: Option<PathBuf>,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            base_url: DEFAULT_BASE_URL.to_string(),
            wait_timeout_secs: DEFAULT_WAIT_TIMEOUT_SECS,
            navigation_timeout_secs: DEFAULT_NAVIGATION_TIMEOUT_SECS,
            settle_delay: DelayRange::from_tuple(DEFAULT_SETTLE_DELAY_MS),
            page_delay: DelayRange::from_tuple(DEFAULT_PAGE_DELAY_MS),
            max_pages: DEFAULT_MAX_PAGES,
            chrome_data_dir: None,
        }
    }
}
