//! Realtime connection management
//!
//! This module handles:
//! - The link state machine deciding which transport is authoritative
//! - The stream session (push connection, reconnect with backoff)
//! - The polling session (fixed-cadence status fetches in fallback mode)
//! - The caller-facing `RealtimeClient` surface

mod manager;
mod polling;
mod state;
mod stream;

pub use manager::{ClientConfig, RealtimeClient};
pub use state::{ConnectionState, FAILURE_THRESHOLD};
