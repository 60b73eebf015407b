//! Event payloads shared by both transports

use crate::client::ConnectionState;
use serde::Deserialize;

/// Named event categories exposed to subscribers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    /// Progress snapshot for a running search
    ProgressUpdate,
    /// Terminal signal for a search
    SearchComplete,
    /// Connectivity state changed
    StatusChange,
}

/// Progress snapshot for a running search, normalized across transports
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProgressUpdate {
    pub search_id: String,
    pub status: String,
    /// Percent complete, 0-100
    pub progress: f32,
    pub current_step: String,
    pub completed_steps: u32,
    pub total_steps: u32,
    pub processed_count: u64,
    pub total_count: u64,
}

/// Terminal signal for a search; no further progress follows it
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SearchComplete {
    pub search_id: String,
    pub result_count: usize,
}

/// An event delivered to subscribers
#[derive(Debug, Clone)]
pub enum BusEvent {
    Progress(ProgressUpdate),
    Complete(SearchComplete),
    Status(ConnectionState),
}

impl BusEvent {
    /// The topic this event is delivered on
    pub fn topic(&self) -> Topic {
        match self {
            BusEvent::Progress(_) => Topic::ProgressUpdate,
            BusEvent::Complete(_) => Topic::SearchComplete,
            BusEvent::Status(_) => Topic::StatusChange,
        }
    }
}
