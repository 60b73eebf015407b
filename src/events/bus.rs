//! Topic-keyed publish/subscribe registry

use super::{BusEvent, Topic};
use std::collections::HashMap;
use std::sync::Arc;

/// Opaque handle identifying one subscription
///
/// Removal goes by handle identity rather than handler equality, so the same
/// closure can be registered on several topics without ambiguity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u64);

/// Callback invoked for each published event on a subscribed topic
pub type Handler = Arc<dyn Fn(&BusEvent) + Send + Sync>;

/// In-process event bus: fire-and-forget, no delivery without a subscriber
pub struct EventBus {
    subscribers: HashMap<Topic, Vec<(SubscriptionId, Handler)>>,
    next_id: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            subscribers: HashMap::new(),
            next_id: 0,
        }
    }

    /// Register a handler for a topic
    pub fn subscribe(&mut self, topic: Topic, handler: Handler) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.subscribers.entry(topic).or_default().push((id, handler));
        id
    }

    /// Remove a subscription; a stale or unknown handle is a no-op
    pub fn unsubscribe(&mut self, topic: Topic, id: SubscriptionId) {
        if let Some(entries) = self.subscribers.get_mut(&topic) {
            entries.retain(|(entry_id, _)| *entry_id != id);
            if entries.is_empty() {
                self.subscribers.remove(&topic);
            }
        }
    }

    /// Deliver an event to every subscriber of its topic
    pub fn publish(&self, event: &BusEvent) {
        if let Some(entries) = self.subscribers.get(&event.topic()) {
            for (_, handler) in entries {
                handler(event);
            }
        }
    }

    /// Drop every subscription
    pub fn clear(&mut self) {
        self.subscribers.clear();
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
