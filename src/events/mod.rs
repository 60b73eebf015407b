//! Normalized events and the in-process event bus
//!
//! Both the stream session and the polling session publish through the same
//! bus, so subscribers cannot tell which transport produced an event.

mod bus;
mod types;

pub use bus::{EventBus, Handler, SubscriptionId};
pub use types::{BusEvent, ProgressUpdate, SearchComplete, Topic};
