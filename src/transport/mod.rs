//! Push-channel transport seam
//!
//! This module handles:
//! - The connector abstraction the stream session negotiates over
//! - A TCP-backed connector for the streaming and long-poll channel flavors
//! - The line-delimited JSON wire codec for inbound events

mod tcp;
mod traits;
mod wire;

pub use tcp::TcpConnector;
pub use traits::{StreamConnector, TransportStream};
pub use wire::{decode_frame, WireError, WireEvent};
