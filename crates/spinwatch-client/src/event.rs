//! Channel identities, ready states and the events a channel emits.

use std::fmt;

/// Which push channel an event came from.
///
/// The client runs one telemetry channel and, optionally, a separate debug
/// channel. Only the telemetry channel drives connectivity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelId {
    /// `rotation`, `speed` and `state` events.
    Telemetry,
    /// Free-text `debug` events.
    Debug,
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Telemetry => f.write_str("telemetry"),
            Self::Debug => f.write_str("debug"),
        }
    }
}

/// EventSource ready state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyState {
    /// Connecting or waiting to reconnect.
    Connecting,
    /// Response headers accepted; frames are flowing.
    Open,
    /// Permanently closed. No further reconnects.
    Closed,
}

/// Events emitted by an [`crate::EventChannel`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelEvent {
    /// Connection (re)established. Fires once per successful connection.
    Opened,

    /// Transport error.
    Error {
        /// Channel was still in the open state when the error occurred.
        ///
        /// `true` marks a transient hiccup on a live stream; `false` means the
        /// connection is gone.
        is_open: bool,
    },

    /// A frame of a subscribed event type.
    Message {
        /// SSE event type.
        event_type: String,
        /// Raw payload text.
        data: String,
    },
}
