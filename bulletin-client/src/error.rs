//! Error types for the transport layer.

use thiserror::Error;

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// A failed request.
///
/// `Display` is the message a view shows verbatim, so variants carrying a
/// message render it without decoration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Connection-level failure.
    #[error("{0}")]
    Network(String),

    /// The server answered with a non-2xx status.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// The body was not the JSON shape expected.
    #[error("invalid response: {0}")]
    Decode(String),

    /// The request did not complete in time.
    #[error("request timed out")]
    Timeout,
}

impl TransportError {
    /// Builds a network error from any message.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// The HTTP status, if the server answered.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for TransportError {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode(e.to_string())
    }
}
