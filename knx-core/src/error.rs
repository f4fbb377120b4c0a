use thiserror::Error;

/// Main error type for KNX device management operations
///
/// Callers pattern-match on the variant rather than on a type hierarchy.
/// `ConnectionReset` is a remote error as well, see [`KnxError::is_remote`].
#[derive(Error, Debug)]
pub enum KnxError {
    /// Operation attempted on a closed adapter; no I/O was performed
    #[error("Illegal state: {0}")]
    IllegalState(String),

    /// A confirmation was expected but none was available
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Negative response or failure reported by the remote partner
    #[error("Remote error: {0}")]
    Remote(String),

    /// The remote partner issued an unsolicited reset
    #[error("Connection reset: {0}")]
    ConnectionReset(String),

    /// The caller's wait for a confirmation was cancelled
    #[error("Cancelled")]
    Cancelled,

    #[error("Connection error: {0}")]
    Connection(#[from] std::io::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl KnxError {
    /// Check if the error originates from the remote partner
    ///
    /// # Returns
    /// `true` for [`KnxError::Remote`] and [`KnxError::ConnectionReset`]
    pub fn is_remote(&self) -> bool {
        matches!(self, KnxError::Remote(_) | KnxError::ConnectionReset(_))
    }
}

/// Result type alias for KNX device management operations
pub type KnxResult<T> = Result<T, KnxError>;
