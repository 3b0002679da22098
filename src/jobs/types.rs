//! Job table types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

use crate::scrape_engine::ScrapeRequest;

/// Lifecycle state of a scrape job
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum JobStatus {
    /// Registered, waiting for its city lock
    Pending,
    /// Browser launched or launching
    Running,
    /// Finished and, for background jobs, persisted
    Done,
    /// Aborted with error message
    Failed { error: String },
}

impl JobStatus {
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Failed { .. })
    }
}

/// How the job was triggered
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum JobKind {
    /// Fire-and-forget; results land in the city's CSV table
    Background,
    /// Caller waits; results are returned, not persisted
    Synchronous,
}

/// Snapshot of one job as reported by the job table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScrapeJob {
    pub id: Uuid,
    pub kind: JobKind,
    pub city: String,
    pub pages: u32,
    pub headless: bool,
    pub status: JobStatus,
    pub created_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
    /// Pages rendered and extracted so far
    pub pages_done: u32,
    /// Records gathered so far; final count once `Done`
    pub record_count: usize,
    /// Table written by a finished background job
    pub output_path: Option<PathBuf>,
}

impl ScrapeJob {
    #[must_use]
    pub fn new(kind: JobKind, request: &ScrapeRequest) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            city: request.city.clone(),
            pages: request.pages,
            headless: request.headless,
            status: JobStatus::Pending,
            created_at: Utc::now(),
            started_at: None,
            finished_at: None,
            pages_done: 0,
            record_count: 0,
            output_path: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_with_state_tag() {
        let failed = JobStatus::Failed {
            error: "boom".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&failed).unwrap(),
            serde_json::json!({"state": "failed", "error": "boom"})
        );
        assert_eq!(
            serde_json::to_value(JobStatus::Running).unwrap(),
            serde_json::json!({"state": "running"})
        );
    }

    #[test]
    fn only_done_and_failed_are_terminal() {
        assert!(!JobStatus::Pending.is_terminal());
        assert!(!JobStatus::Running.is_terminal());
        assert!(JobStatus::Done.is_terminal());
        assert!(JobStatus::Failed { error: String::new() }.is_terminal());
    }
}
