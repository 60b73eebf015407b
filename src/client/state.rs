//! Link State Machine
//!
//! A pure transition table mapping (state, event) to (new state, effect).
//! All connectivity policy lives here; the session loops only feed it events
//! and run the effects it requests.

use std::fmt;

/// Consecutive connect errors tolerated before switching to polling
pub const FAILURE_THRESHOLD: u32 = 5;

/// Connectivity state of the realtime link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
    Reconnecting,
    /// Degraded mode: the stream is down and polling is authoritative
    Fallback,
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ConnectionState::Disconnected => "disconnected",
            ConnectionState::Connecting => "connecting",
            ConnectionState::Connected => "connected",
            ConnectionState::Reconnecting => "reconnecting",
            ConnectionState::Fallback => "fallback",
        };
        write!(f, "{}", label)
    }
}

/// Events that can drive a link state transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkEvent {
    /// Caller invoked `connect()`
    CallerConnect,
    /// Transport acknowledged a successful connect
    ConnectAck,
    /// Transport is about to retry after a failure or drop
    ReconnectAttempt,
    /// One full connect cycle ended without a connection
    ConnectError,
    /// Transport notified an established connection dropped
    TransportClosed,
    /// Caller invoked `disconnect()`
    CallerDisconnect,
}

/// Side effect requested by a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkEffect {
    None,
    /// Tear down the stream session and start polling if a search is active
    EnterFallback,
}

/// Result of feeding one event to the machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// New state, present only when the state actually changed
    pub changed: Option<ConnectionState>,
    pub effect: LinkEffect,
}

impl Transition {
    fn unchanged() -> Self {
        Self {
            changed: None,
            effect: LinkEffect::None,
        }
    }
}

/// The state machine deciding which transport is authoritative
#[derive(Debug)]
pub struct LinkStateMachine {
    state: ConnectionState,
    failures: u32,
}

impl Default for LinkStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl LinkStateMachine {
    /// Create a new machine in the disconnected state
    pub fn new() -> Self {
        Self {
            state: ConnectionState::Disconnected,
            failures: 0,
        }
    }

    /// Current state
    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Consecutive connect errors since the last successful connect
    pub fn failures(&self) -> u32 {
        self.failures
    }

    /// Return to the initial state, dropping the failure count
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Process an event and return the transition result
    pub fn process_event(&mut self, event: LinkEvent) -> Transition {
        use ConnectionState::*;
        use LinkEvent::*;

        // An explicit disconnect wins from every state.
        if event == CallerDisconnect {
            return self.move_to(Disconnected, LinkEffect::None);
        }

        // Fallback is one-way within a session; only disconnect exits it.
        if self.state == Fallback {
            return Transition::unchanged();
        }

        match (self.state, event) {
            (Disconnected, CallerConnect) => self.move_to(Connecting, LinkEffect::None),

            (Connecting | Reconnecting, ConnectAck) => {
                self.failures = 0;
                self.move_to(Connected, LinkEffect::None)
            }

            // The transport retries on its own after a failure or drop; this
            // is a transient display state, not a session teardown.
            (Connecting | Connected | Disconnected, ReconnectAttempt) => {
                self.move_to(Reconnecting, LinkEffect::None)
            }

            (Connecting | Connected | Reconnecting, ConnectError) => {
                self.failures += 1;
                if self.failures >= FAILURE_THRESHOLD {
                    self.move_to(Fallback, LinkEffect::EnterFallback)
                } else {
                    Transition::unchanged()
                }
            }

            (_, TransportClosed) => self.move_to(Disconnected, LinkEffect::None),

            // Anything else is a tolerated no-op, not an error.
            _ => Transition::unchanged(),
        }
    }

    fn move_to(&mut self, next: ConnectionState, effect: LinkEffect) -> Transition {
        let changed = (next != self.state).then_some(next);
        self.state = next;
        Transition { changed, effect }
    }
}
