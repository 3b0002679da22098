//! Getter methods for `ScrapeConfig`

use std::path::{Path, PathBuf};
use std::time::Duration;

use super::types::{DelayRange, ScrapeConfig};
use crate::utils::origin_of;

impl ScrapeConfig {
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Scheme and host of `base_url`; relative listing links are joined onto it
    #[must_use]
    pub fn origin(&self) -> String {
        origin_of(&self.base_url).unwrap_or_else(|| self.base_url.clone())
    }

    #[must_use]
    pub fn wait_timeout(&self) -> Duration {
        Duration::from_secs(self.wait_timeout_secs)
    }

    #[must_use]
    pub fn navigation_timeout_secs(&self) -> u64 {
        self.navigation_timeout_secs
    }

    #[must_use]
    pub fn settle_delay(&self) -> DelayRange {
        self.settle_delay
    }

    #[must_use]
    pub fn page_delay(&self) -> DelayRange {
        self.page_delay
    }

    #[must_use]
    pub fn max_pages(&self) -> u32 {
        self.max_pages
    }

    #[must_use]
    pub fn chrome_data_dir(&self) -> Option<&PathBuf> {
        self.chrome_data_dir.as_ref()
    }
}
