//! Connector trait abstraction for pluggable push channels

use anyhow::Result;
use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncWrite};

/// Byte stream carrying the push channel
pub trait TransportStream: AsyncRead + AsyncWrite + Send + Unpin {}

impl<T: AsyncRead + AsyncWrite + Send + Unpin> TransportStream for T {}

/// Factory for one flavor of push connection
///
/// The stream session holds a list of these and tries them in order on each
/// connect cycle, so the negotiation order (streaming first, then the
/// long-poll flavor) lives in the list, not in the connector.
#[async_trait]
pub trait StreamConnector: Send + Sync {
    /// Attempt to connect, returning a live stream on success
    async fn connect(&self) -> Result<Box<dyn TransportStream>>;

    /// Human-readable name for this channel flavor
    fn name(&self) -> &'static str;
}
