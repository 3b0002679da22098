//! Progress reporting abstraction for scrape jobs
//!
//! Defines the `ProgressReporter` trait for lifecycle event reporting
//! and provides a no-op implementation for simple use cases.

use super::scrape_types::PageProgress;

/// Trait for reporting scrape progress at key lifecycle events
///
/// The job table implements this to keep per-job counters current; the
/// synchronous API path uses `NoOpProgress`.
pub trait ProgressReporter: Send + Sync {
    /// Report that the browser has launched successfully
    fn report_browser_launched(&self);

    /// Report that navigation to a listing page has started
    fn report_page_started(&self, page: u32, url: &str);

    /// Report that a page has been rendered and extracted
    fn report_page_scraped(&self, progress: &PageProgress);

    /// Report that every page has been scraped
    fn report_completed(&self, total_records: usize);

    /// Report an error that aborted the job
    fn report_error(&self, error: &str);
}

/// Progress reporter that does nothing
#[derive(Debug, Clone, Copy)]
pub struct NoOpProgress;

impl ProgressReporter for NoOpProgress {
    #[inline(always)]
    fn report_browser_launched(&self) {}

    #[inline(always)]
    fn report_page_started(&self, _page: u32, _url: &str) {}

    #[inline(always)]
    fn report_page_scraped(&self, _progress: &PageProgress) {}

    #[inline(always)]
    fn report_completed(&self, _total_records: usize) {}

    #[inline(always)]
    fn report_error(&self, _error: &str) {}
}
