//! Explicit job handles for scrape runs.
//!
//! Every trigger registers a job with an id and a status that moves
//! `pending -> running -> done | failed`; callers poll it through the table.

pub mod manager;
pub mod runner;
pub mod types;

pub use manager::{JobManager, JobProgress};
pub use runner::JobRunner;
pub use types::{JobKind, JobStatus, ScrapeJob};
