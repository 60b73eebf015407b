//! TCP connector for the push channel

use crate::transport::traits::{StreamConnector, TransportStream};
use anyhow::Result;
use async_trait::async_trait;
use tokio::net::TcpStream;

/// Connects the push channel over plain TCP
pub struct TcpConnector {
    address: String,
    name: &'static str,
}

impl TcpConnector {
    /// Connector for the native streaming flavor
    pub fn new_streaming(address: String) -> Self {
        Self {
            address,
            name: "streaming",
        }
    }

    /// Connector for the long-poll fallback flavor
    pub fn new_long_poll(address: String) -> Self {
        Self {
            address,
            name: "long-poll",
        }
    }
}

#[async_trait]
impl StreamConnector for TcpConnector {
    async fn connect(&self) -> Result<Box<dyn TransportStream>> {
        let stream = TcpStream::connect(&self.address).await?;
        Ok(Box::new(stream))
    }

    fn name(&self) -> &'static str {
        self.name
    }
}
