//! Client-side realtime connection manager for long-running searches.
//!
//! Maintains a live push channel to the backend, watches for degraded
//! connectivity, and transparently falls back to interval polling of the
//! status endpoint so progress updates for the active search keep flowing.
//! Consumers subscribe to normalized events and never see which transport
//! produced them.

pub mod client;
pub mod events;
pub mod fetch;
pub mod transport;

pub use client::{ClientConfig, ConnectionState, RealtimeClient};
pub use events::{BusEvent, ProgressUpdate, SearchComplete, SubscriptionId, Topic};
