//! Stream session: owns the push connection and its retry policy
//!
//! Reconnection with backoff is internal to this session; the decision to
//! abandon streaming for polling belongs to the state machine, which watches
//! the consecutive-failure count.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::timeout;
use tracing::{debug, info, warn};

use super::manager::Inner;
use super::state::{LinkEffect, LinkEvent};
use crate::events::BusEvent;
use crate::transport::{decode_frame, TransportStream, WireEvent};

/// Connect, serve, reconnect - forever, until aborted or fallback is entered
pub(crate) async fn stream_loop(inner: Arc<Inner>) {
    let mut delay = inner.config.reconnect_delay;
    let mut first_cycle = true;

    loop {
        if !first_cycle {
            inner.apply(LinkEvent::ReconnectAttempt).await;
        }
        first_cycle = false;

        match negotiate(&inner).await {
            Some(stream) => {
                delay = inner.config.reconnect_delay;
                inner.apply(LinkEvent::ConnectAck).await;

                let reason = serve(&inner, stream).await;
                warn!("push channel dropped: {}", reason);
                inner.apply(LinkEvent::TransportClosed).await;
            }
            None => {
                let transition = inner.apply(LinkEvent::ConnectError).await;
                if transition.effect == LinkEffect::EnterFallback {
                    // The machine has switched to polling; this session ends.
                    // No connection is open on this path, so teardown is just
                    // returning.
                    return;
                }
            }
        }

        tokio::time::sleep(delay).await;
        delay = std::cmp::min(delay * 2, inner.config.max_reconnect_delay);
    }
}

/// One negotiation cycle: try each channel flavor in order
///
/// A cycle that ends without a connection counts as a single connect error,
/// no matter how many flavors it tried.
async fn negotiate(inner: &Arc<Inner>) -> Option<Box<dyn TransportStream>> {
    for connector in &inner.connectors {
        match timeout(inner.config.connect_timeout, connector.connect()).await {
            Ok(Ok(stream)) => {
                info!("push channel connected via {}", connector.name());
                return Some(stream);
            }
            Ok(Err(e)) => {
                debug!("{} connect failed: {}", connector.name(), e);
            }
            Err(_) => {
                debug!("{} connect timed out", connector.name());
            }
        }
    }
    None
}

/// Demultiplex inbound frames onto the bus until the connection drops
async fn serve(inner: &Arc<Inner>, stream: Box<dyn TransportStream>) -> String {
    let mut lines = BufReader::new(stream).lines();

    loop {
        match lines.next_line().await {
            Ok(Some(line)) => match decode_frame(&line) {
                Ok(Some(WireEvent::ProgressUpdate(update))) => {
                    inner.publish(BusEvent::Progress(update)).await;
                }
                Ok(Some(WireEvent::SearchComplete(done))) => {
                    inner.publish(BusEvent::Complete(done)).await;
                }
                Ok(None) => {}
                Err(e) => {
                    debug!("skipping malformed frame: {}", e);
                }
            },
            Ok(None) => return "server closed connection".into(),
            Err(e) => return format!("read error: {}", e),
        }
    }
}
