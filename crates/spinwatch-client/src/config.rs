//! Channel configuration.

use std::time::Duration;

use spinwatch_proto::{EventKind, sse::DEFAULT_MAX_LINE_BYTES};

/// Reconnection and framing settings for one push channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelConfig {
    /// Base delay before reconnecting. A server `retry:` field replaces it.
    pub reconnect_delay: Duration,
    /// Upper bound for the exponential backoff.
    pub max_backoff: Duration,
    /// Lines longer than this are discarded.
    pub max_line_bytes: usize,
    /// Event types delivered to the caller. Everything else is dropped.
    pub subscriptions: Vec<String>,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            reconnect_delay: Duration::from_millis(3000),
            max_backoff: Duration::from_secs(30),
            max_line_bytes: DEFAULT_MAX_LINE_BYTES,
            subscriptions: Vec::new(),
        }
    }
}

impl ChannelConfig {
    /// Channel subscribed to `rotation`, `speed` and `state`.
    pub fn telemetry() -> Self {
        Self::default().with_kinds(&EventKind::TELEMETRY)
    }

    /// Channel subscribed to `debug` only.
    pub fn debug() -> Self {
        Self::default().with_kinds(&[EventKind::Debug])
    }

    /// Add subscriptions for the given event kinds.
    #[must_use]
    pub fn with_kinds(mut self, kinds: &[EventKind]) -> Self {
        self.subscriptions.extend(kinds.iter().map(|k| k.name().to_owned()));
        self
    }

    /// Override the base reconnect delay and backoff cap.
    #[must_use]
    pub fn with_backoff(mut self, reconnect_delay: Duration, max_backoff: Duration) -> Self {
        self.reconnect_delay = reconnect_delay;
        self.max_backoff = max_backoff;
        self
    }
}
