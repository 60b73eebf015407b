//! Caller-facing connection manager
//!
//! Owns the shared state behind one lock so that a state transition and the
//! `status_change` event it publishes are atomic, and wires the stream and
//! polling session tasks to the link state machine.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::info;

use super::polling;
use super::state::{ConnectionState, LinkEffect, LinkEvent, LinkStateMachine, Transition};
use super::stream;
use crate::events::{BusEvent, EventBus, SubscriptionId, Topic};
use crate::fetch::{HttpStatusFetcher, StatusFetcher};
use crate::transport::{StreamConnector, TcpConnector};

/// Tunable connection behavior; defaults preserve the documented policy
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Initial delay between stream connect cycles
    pub reconnect_delay: Duration,
    /// Backoff cap for stream connect cycles
    pub max_reconnect_delay: Duration,
    /// Per-attempt connect timeout
    pub connect_timeout: Duration,
    /// Cadence of status fetches in fallback mode
    pub poll_interval: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            reconnect_delay: Duration::from_secs(1),
            max_reconnect_delay: Duration::from_secs(16),
            connect_timeout: Duration::from_secs(8),
            poll_interval: Duration::from_secs(2),
        }
    }
}

/// Realtime connection manager for search progress events
///
/// One instance per running session, constructed by the application's
/// composition point. All failure is absorbed into state transitions and
/// event emission; no method returns an error.
pub struct RealtimeClient {
    inner: Arc<Inner>,
}

pub(crate) struct Inner {
    pub(crate) config: ClientConfig,
    pub(crate) connectors: Vec<Arc<dyn StreamConnector>>,
    pub(crate) fetcher: Arc<dyn StatusFetcher>,
    shared: Mutex<Shared>,
}

struct Shared {
    machine: LinkStateMachine,
    bus: EventBus,
    active_search: Option<String>,
    stream_task: Option<JoinHandle<()>>,
    poll_task: Option<JoinHandle<()>>,
}

impl Inner {
    /// Feed one link event through the machine, publishing any state change
    /// and running the requested side effect
    pub(crate) async fn apply(self: &Arc<Self>, event: LinkEvent) -> Transition {
        let mut shared = self.shared.lock().await;
        let transition = shared.machine.process_event(event);
        if let Some(state) = transition.changed {
            shared.bus.publish(&BusEvent::Status(state));
        }
        if transition.effect == LinkEffect::EnterFallback {
            info!("connection degraded, switching to status polling");
            start_polling(self, &mut shared);
        }
        transition
    }

    /// Deliver a normalized event to subscribers
    pub(crate) async fn publish(&self, event: BusEvent) {
        let shared = self.shared.lock().await;
        shared.bus.publish(&event);
    }

    /// Clear the active search once its completion has been observed
    pub(crate) async fn finish_search(&self, search_id: &str) {
        let mut shared = self.shared.lock().await;
        if shared.active_search.as_deref() == Some(search_id) {
            shared.active_search = None;
        }
    }
}

/// Start the poll loop for the active search, cancelling any previous one.
/// Caller holds the shared lock; without a search id this is a no-op.
fn start_polling(inner: &Arc<Inner>, shared: &mut Shared) {
    let Some(search_id) = shared.active_search.clone() else {
        return;
    };
    if let Some(task) = shared.poll_task.take() {
        task.abort();
    }
    let inner = Arc::clone(inner);
    shared.poll_task = Some(tokio::spawn(polling::poll_loop(inner, search_id)));
}

impl RealtimeClient {
    /// Build a client from its collaborator seams
    pub fn new(
        config: ClientConfig,
        connectors: Vec<Arc<dyn StreamConnector>>,
        fetcher: Arc<dyn StatusFetcher>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                config,
                connectors,
                fetcher,
                shared: Mutex::new(Shared {
                    machine: LinkStateMachine::new(),
                    bus: EventBus::new(),
                    active_search: None,
                    stream_task: None,
                    poll_task: None,
                }),
            }),
        }
    }

    /// Convenience constructor: TCP push channel (streaming flavor first,
    /// long-poll flavor second) plus the HTTP status endpoint
    pub fn with_endpoints(stream_address: &str, api_base_url: &str) -> Self {
        let connectors: Vec<Arc<dyn StreamConnector>> = vec![
            Arc::new(TcpConnector::new_streaming(stream_address.to_string())),
            Arc::new(TcpConnector::new_long_poll(stream_address.to_string())),
        ];
        Self::new(
            ClientConfig::default(),
            connectors,
            Arc::new(HttpStatusFetcher::new(api_base_url)),
        )
    }

    /// Start the stream session; a no-op unless currently disconnected
    pub async fn connect(&self) {
        let mut shared = self.inner.shared.lock().await;
        if shared.machine.state() != ConnectionState::Disconnected {
            return;
        }
        let transition = shared.machine.process_event(LinkEvent::CallerConnect);
        if let Some(state) = transition.changed {
            shared.bus.publish(&BusEvent::Status(state));
        }
        let inner = Arc::clone(&self.inner);
        shared.stream_task = Some(tokio::spawn(stream::stream_loop(inner)));
    }

    /// Stop both sessions, drop all subscriptions, and reset the link
    ///
    /// The single cancellation point: after this returns, no handler
    /// registered beforehand receives any further event, even from I/O that
    /// was in flight when it was called. Safe to call when already
    /// disconnected.
    pub async fn disconnect(&self) {
        let mut shared = self.inner.shared.lock().await;
        if let Some(task) = shared.stream_task.take() {
            task.abort();
        }
        if let Some(task) = shared.poll_task.take() {
            task.abort();
        }
        shared.bus.clear();
        shared.active_search = None;
        shared.machine.reset();
    }

    /// Set or clear the search the caller currently cares about
    ///
    /// A new id supersedes the previous one. Side-effects the polling session
    /// only while in fallback mode; before that it is simply remembered.
    pub async fn set_active_search(&self, search_id: Option<String>) {
        let mut shared = self.inner.shared.lock().await;
        shared.active_search = search_id;
        if shared.active_search.is_none() {
            if let Some(task) = shared.poll_task.take() {
                task.abort();
            }
        } else if shared.machine.state() == ConnectionState::Fallback {
            start_polling(&self.inner, &mut shared);
        }
    }

    /// Subscribe a handler to a topic
    pub async fn on(
        &self,
        topic: Topic,
        handler: impl Fn(&BusEvent) + Send + Sync + 'static,
    ) -> SubscriptionId {
        let mut shared = self.inner.shared.lock().await;
        shared.bus.subscribe(topic, Arc::new(handler))
    }

    /// Remove a subscription; unknown handles are ignored
    pub async fn off(&self, topic: Topic, id: SubscriptionId) {
        let mut shared = self.inner.shared.lock().await;
        shared.bus.unsubscribe(topic, id);
    }

    /// Whether the push channel is currently established
    pub async fn is_connected(&self) -> bool {
        self.status().await == ConnectionState::Connected
    }

    /// Current connectivity state
    pub async fn status(&self) -> ConnectionState {
        let shared = self.inner.shared.lock().await;
        shared.machine.state()
    }
}
