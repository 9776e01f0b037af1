//! Transport errors.

use thiserror::Error;

/// Errors raised by the push transport and the one-shot fetch.
///
/// None of these end the session. [`TransportError::Unavailable`] degrades
/// the client to snapshot-only display; everything else is surfaced as a
/// lifecycle signal and retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Push transport cannot be used in this environment.
    #[error("transport unavailable: {0}")]
    Unavailable(String),

    /// Connection could not be established.
    #[error("connection failed: {0}")]
    Connection(String),

    /// Server answered with a non-success status.
    #[error("unexpected HTTP status {0}")]
    Status(u16),

    /// Server answered with something other than an event stream.
    #[error("unexpected content type {0:?}")]
    ContentType(String),

    /// Server answered `204 No Content`, which asks the client to stop.
    #[error("server closed the channel")]
    NoContent,

    /// Body stream failed mid-read.
    #[error("stream error: {0}")]
    Stream(String),
}

impl TransportError {
    /// Returns true if reconnecting may succeed.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Self::Unavailable(_) | Self::NoContent)
    }
}
