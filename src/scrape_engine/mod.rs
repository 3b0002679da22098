//! Scrape job execution.
//!
//! Drives a renderer through the listing pages of one city and collects
//! tagged records. Persistence and job bookkeeping live elsewhere.

// Sub-modules
pub mod delay;
pub mod orchestrator;
pub mod progress;
pub mod scrape_types;

// Re-exports for public API
pub use orchestrator::{scrape_city, scrape_city_with_progress};
pub use progress::{NoOpProgress, ProgressReporter};
pub use scrape_types::{PageProgress, ScrapeError, ScrapeRequest, ScrapeResult};
