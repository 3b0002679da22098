//! Type-safe builder for `ScrapeConfig` using the typestate pattern
//!
//! `build()` only exists once a data directory has been supplied, so a config
//! without a place to persist tables cannot be constructed.

use anyhow::{Result, anyhow};
use std::marker::PhantomData;
use std::path::PathBuf;

use super::types::{DelayRange, ScrapeConfig};
use crate::utils::{
    DEFAULT_BASE_URL, DEFAULT_MAX_PAGES, DEFAULT_NAVIGATION_TIMEOUT_SECS, DEFAULT_PAGE_DELAY_MS,
    DEFAULT_SETTLE_DELAY_MS, DEFAULT_WAIT_TIMEOUT_SECS, is_valid_url,
};

// Type states for the builder
pub struct WithDataDir;

pub struct ScrapeConfigBuilder<State = ()> {
    pub(crate) data_dir: Option<PathBuf>,
    pub(crate) base_url: String,
    pub(crate) wait_timeout_secs: u64,
    pub(crate) navigation_timeout_secs: u64,
    pub(crate) settle_delay: DelayRange,
    pub(crate) page_delay: DelayRange,
    pub(crate) max_pages: u32,
    pub(crate) chrome_data_dir: Option<PathBuf>,
    pub(crate) _phantom: PhantomData<State>,
}

impl Default for ScrapeConfigBuilder<()> {
    fn default() -> Self {
        Self {
            data_dir: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            wait_timeout_secs: DEFAULT_WAIT_TIMEOUT_SECS,
            navigation_timeout_secs: DEFAULT_NAVIGATION_TIMEOUT_SECS,
            settle_delay: DelayRange::from_tuple(DEFAULT_SETTLE_DELAY_MS),
            page_delay: DelayRange::from_tuple(DEFAULT_PAGE_DELAY_MS),
            max_pages: DEFAULT_MAX_PAGES,
            chrome_data_dir: None,
            _phantom: PhantomData,
        }
    }
}

impl ScrapeConfig {
    /// Create a builder for configuring a `ScrapeConfig` with a fluent interface
    #[must_use]
    pub fn builder() -> ScrapeConfigBuilder<()> {
        ScrapeConfigBuilder::default()
    }
}

impl ScrapeConfigBuilder<()> {
    pub fn data_dir(self, dir: impl Into<PathBuf>) -> ScrapeConfigBuilder<WithDataDir> {
        ScrapeConfigBuilder {
            data_dir: Some(dir.into()),
            base_url: self.base_url,
            wait_timeout_secs: self.wait_timeout_secs,
            navigation_timeout_secs: self.navigation_timeout_secs,
            settle_delay: self.settle_delay,
            page_delay: self.page_delay,
            max_pages: self.max_pages,
            chrome_data_dir: self.chrome_data_dir,
            _phantom: PhantomData,
        }
    }
}

// Build method only available when all required fields are set
impl ScrapeConfigBuilder<WithDataDir> {
    pub fn build(self) -> Result<ScrapeConfig> {
        let base_url = self.base_url.trim_end_matches('/').to_string();
        if !is_valid_url(&base_url) {
            return Err(anyhow!("base_url must be an http(s) URL (got '{base_url}')"));
        }

        for (name, range) in [("settle_delay", self.settle_delay), ("page_delay", self.page_delay)] {
            if range.min_ms > range.max_ms {
                return Err(anyhow!(
                    "{name} minimum ({}ms) exceeds maximum ({}ms)",
                    range.min_ms,
                    range.max_ms
                ));
            }
        }

        if self.max_pages == 0 {
            return Err(anyhow!("max_pages must be at least 1"));
        }

        Ok(ScrapeConfig {
            data_dir: self
                .data_dir
                .ok_or_else(|| anyhow!("data_dir is required"))?,
            base_url,
            wait_timeout_secs: self.wait_timeout_secs,
            navigation_timeout_secs: self.navigation_timeout_secs,
            settle_delay: self.settle_delay,
            page_delay: self.page_delay,
            max_pages: self.max_pages,
            chrome_data_dir: self.chrome_data_dir,
        })
    }
}

// Methods available for all states
impl<State> ScrapeConfigBuilder<State> {
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    #[must_use]
    pub fn wait_timeout_secs(mut self, secs: u64) -> Self {
        self.wait_timeout_secs = secs;
        self
    }

    #[must_use]
    pub fn navigation_timeout_secs(mut self, secs: u64) -> Self {
        self.navigation_timeout_secs = secs;
        self
    }

    /// Pause drawn from `[min_ms, max_ms]` after ld+json blocks appear
    #[must_use]
    pub fn settle_delay(mut self, min_ms: u64, max_ms: u64) -> Self {
        self.settle_delay = DelayRange::new(min_ms, max_ms);
        self
    }

    /// Pause drawn from `[min_ms, max_ms]` between page fetches
    #[must_use]
    pub fn page_delay(mut self, min_ms: u64, max_ms: u64) -> Self {
        self.page_delay = DelayRange::new(min_ms, max_ms);
        self
    }

    /// Turn both politeness pauses off. Meant for tests and local fixtures.
    #[must_use]
    pub fn no_delays(self) -> Self {
        self.settle_delay(0, 0).page_delay(0, 0)
    }

    #[must_use]
    pub fn max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages;
        self
    }

    #[must_use]
    pub fn chrome_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.chrome_data_dir = Some(dir.into());
        self
    }
}
