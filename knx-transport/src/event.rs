//! Connection close events

use std::fmt;

/// Initiator of a connection close
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseInitiator {
    /// Closed on request of the local client
    ClientRequest,
    /// Closed on request of the remote server
    ServerRequest,
    /// Closed by the transport itself (e.g. communication failure)
    Internal,
}

impl fmt::Display for CloseInitiator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CloseInitiator::ClientRequest => "client request",
            CloseInitiator::ServerRequest => "server request",
            CloseInitiator::Internal => "internal",
        };
        f.write_str(name)
    }
}

/// Notification about a closed connection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloseEvent {
    initiator: CloseInitiator,
    reason: String,
}

impl CloseEvent {
    /// Create a new close event
    pub fn new(initiator: CloseInitiator, reason: impl Into<String>) -> Self {
        Self {
            initiator,
            reason: reason.into(),
        }
    }

    pub fn initiator(&self) -> CloseInitiator {
        self.initiator
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl fmt::Display for CloseEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "closed by {}: {}", self.initiator, self.reason)
    }
}

/// Receiver of close notifications of an adapter
pub trait CloseListener: Send + Sync {
    /// Called once the adapter's connection was closed
    fn closed(&self, event: CloseEvent);
}
