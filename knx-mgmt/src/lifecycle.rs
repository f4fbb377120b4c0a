//! Adapter lifecycle and reset handling

use knx_transport::{CloseEvent, CloseInitiator};
use std::sync::{Mutex, PoisonError};

/// Reason reported for connections closed after a server reset
pub const SERVER_RESET_REASON: &str = "server reset";

/// Adapter state
///
/// # State Transitions
/// ```text
/// Open -> Closed (close(), reset indication, link closed)
/// ```
/// The transition is final.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdapterState {
    /// Adapter is usable for property access
    Open,
    /// Adapter is closed, all property access fails
    Closed,
}

#[derive(Debug)]
struct Inner {
    state: AdapterState,
    reset: bool,
}

/// Open/closed state together with the server reset flag
///
/// Both values change under one lock, so a reader never observes a reset
/// adapter that is still open.
#[derive(Debug)]
pub struct Lifecycle {
    inner: Mutex<Inner>,
}

impl Lifecycle {
    /// Create a lifecycle in the `Open` state
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                state: AdapterState::Open,
                reset: false,
            }),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn state(&self) -> AdapterState {
        self.lock().state
    }

    pub fn is_open(&self) -> bool {
        self.state() == AdapterState::Open
    }

    /// Check if a server reset was observed
    pub fn was_reset(&self) -> bool {
        self.lock().reset
    }

    /// Transition to `Closed`
    ///
    /// # Returns
    /// `true` if this call closed the adapter, `false` if it was closed already
    pub fn close(&self) -> bool {
        let mut inner = self.lock();
        let was_open = inner.state == AdapterState::Open;
        inner.state = AdapterState::Closed;
        was_open
    }

    /// Record a server reset and transition to `Closed`
    ///
    /// # Returns
    /// `true` if this call closed the adapter
    pub fn server_reset(&self) -> bool {
        let mut inner = self.lock();
        let was_open = inner.state == AdapterState::Open;
        inner.reset = true;
        inner.state = AdapterState::Closed;
        was_open
    }

    /// Rewrite a close event of the link for the adapter's listener
    ///
    /// After a server reset every close is reported as a server reset,
    /// independent of what the link reports.
    pub fn close_event(&self, event: CloseEvent) -> CloseEvent {
        if self.was_reset() {
            CloseEvent::new(CloseInitiator::ServerRequest, SERVER_RESET_REASON)
        } else {
            event
        }
    }
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}
