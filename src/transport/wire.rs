//! Wire codec for inbound push-channel frames
//!
//! Frames are newline-delimited JSON envelopes of the form
//! `{"event": "progress_update", "data": {...}}`.

use crate::events::{ProgressUpdate, SearchComplete};
use serde::Deserialize;
use thiserror::Error;

/// Errors produced while decoding a frame
#[derive(Debug, Error)]
pub enum WireError {
    #[error("malformed frame: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// One inbound event from the push channel
#[derive(Debug, Clone)]
pub enum WireEvent {
    ProgressUpdate(ProgressUpdate),
    SearchComplete(SearchComplete),
}

/// Raw envelope as it appears on the wire
#[derive(Deserialize)]
struct Envelope {
    event: String,
    #[serde(default)]
    data: serde_json::Value,
}

/// Decode a single frame; unknown event names and blank lines yield `None`
pub fn decode_frame(line: &str) -> Result<Option<WireEvent>, WireError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let envelope: Envelope = serde_json::from_str(line)?;
    let event = match envelope.event.as_str() {
        "progress_update" => WireEvent::ProgressUpdate(serde_json::from_value(envelope.data)?),
        "search_complete" => WireEvent::SearchComplete(serde_json::from_value(envelope.data)?),
        _ => return Ok(None),
    };
    Ok(Some(event))
}
