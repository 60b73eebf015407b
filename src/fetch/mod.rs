//! Status-fetch seam used by the polling session

mod http;

pub use http::HttpStatusFetcher;

use crate::events::ProgressUpdate;
use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;

/// Statuses after which no further progress is expected for a search
pub const TERMINAL_STATUSES: [&str; 3] = ["completed", "failed", "cancelled"];

/// Snapshot of a search as reported by the backend status endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct SearchStatus {
    pub search_id: String,
    pub status: String,
    pub progress: f32,
    pub current_step: String,
    pub completed_steps: u32,
    pub total_steps: u32,
    pub processed_count: u64,
    pub total_count: u64,
    /// Result rows, present once the backend has any to report
    #[serde(default)]
    pub results: Option<Vec<serde_json::Value>>,
    /// Failure message, populated by the backend on error statuses
    #[serde(default)]
    pub error: Option<String>,
}

impl SearchStatus {
    /// Whether this status ends the search
    pub fn is_terminal(&self) -> bool {
        TERMINAL_STATUSES.contains(&self.status.as_str())
    }

    /// Number of results reported so far, 0 if the collection is absent
    pub fn result_count(&self) -> usize {
        self.results.as_ref().map_or(0, |results| results.len())
    }

    /// Map the snapshot into the normalized progress event
    pub(crate) fn to_progress(&self) -> ProgressUpdate {
        ProgressUpdate {
            search_id: self.search_id.clone(),
            status: self.status.clone(),
            progress: self.progress,
            current_step: self.current_step.clone(),
            completed_steps: self.completed_steps,
            total_steps: self.total_steps,
            processed_count: self.processed_count,
            total_count: self.total_count,
        }
    }
}

/// Fetches the current status of a search by id
#[async_trait]
pub trait StatusFetcher: Send + Sync {
    async fn fetch_status(&self, search_id: &str) -> Result<SearchStatus>;
}
