//! Push channel state machine.
//!
//! [`EventChannel`] holds everything about one push connection that survives
//! across reconnects: the ready state, the SSE parser (and with it the last
//! event ID), the server's reconnection hint, and the count of consecutive
//! failed attempts used for backoff.
//!
//! The channel performs no I/O. The transport reports what happened
//! ([`EventChannel::handle_open`], [`EventChannel::handle_bytes`],
//! [`EventChannel::handle_disconnect`]) and forwards the returned
//! [`ChannelEvent`]s unchanged.
//!
//! # Invariants
//!
//! - `Opened` is emitted exactly once per successful connection.
//! - An `Error` emitted for a lost connection always has `is_open == false`,
//!   because the state has already left `Open` when it is raised.
//! - Frames are emitted in arrival order, and only for subscribed types.

use std::{collections::HashSet, time::Duration};

use spinwatch_proto::{SseItem, SseParser};

use crate::{ChannelConfig, ChannelEvent, ReadyState};

/// Lower bound for the backoff base, so `retry: 0` still backs off.
pub const MIN_RECONNECT_DELAY: Duration = Duration::from_millis(100);

/// Sans-IO push channel.
#[derive(Debug, Clone)]
pub struct EventChannel {
    config: ChannelConfig,
    ready_state: ReadyState,
    parser: SseParser,
    subscriptions: HashSet<String>,
    /// Base reconnect delay; replaced by the server's `retry:` field.
    reconnection_time: Duration,
    /// Consecutive connection attempts that ended without reopening.
    failed_attempts: u32,
}

impl EventChannel {
    /// Create a channel in the connecting state.
    pub fn new(config: ChannelConfig) -> Self {
        let subscriptions = config.subscriptions.iter().cloned().collect();
        Self {
            ready_state: ReadyState::Connecting,
            parser: SseParser::with_max_line_bytes(config.max_line_bytes),
            reconnection_time: config.reconnect_delay,
            failed_attempts: 0,
            subscriptions,
            config,
        }
    }

    /// Deliver frames of `event_type` to the caller.
    pub fn on(&mut self, event_type: impl Into<String>) {
        self.subscriptions.insert(event_type.into());
    }

    /// True if frames of `event_type` are delivered.
    pub fn is_subscribed(&self, event_type: &str) -> bool {
        self.subscriptions.contains(event_type)
    }

    /// Current ready state.
    pub fn ready_state(&self) -> ReadyState {
        self.ready_state
    }

    /// Last event ID to resume from. `None` if the server never sent one.
    pub fn last_event_id(&self) -> Option<&str> {
        Some(self.parser.last_event_id()).filter(|id| !id.is_empty())
    }

    /// Base reconnect delay currently in effect.
    pub fn reconnection_time(&self) -> Duration {
        self.reconnection_time
    }

    /// Consecutive failed connection attempts since the last open.
    pub fn failed_attempts(&self) -> u32 {
        self.failed_attempts
    }

    /// Connection established and response accepted.
    pub fn handle_open(&mut self) -> ChannelEvent {
        self.parser.reset();
        self.ready_state = ReadyState::Open;
        self.failed_attempts = 0;
        tracing::info!("push channel open");
        ChannelEvent::Opened
    }

    /// Bytes received on an open connection.
    pub fn handle_bytes(&mut self, chunk: &[u8]) -> Vec<ChannelEvent> {
        let mut events = Vec::new();

        for item in self.parser.push(chunk) {
            match item {
                SseItem::Event(event) => {
                    if self.subscriptions.contains(&event.event_type) {
                        events.push(ChannelEvent::Message {
                            event_type: event.event_type,
                            data: event.data,
                        });
                    } else {
                        tracing::trace!(event_type = %event.event_type, "unsubscribed frame dropped");
                    }
                },
                SseItem::Retry(ms) => {
                    self.reconnection_time = Duration::from_millis(ms);
                    tracing::debug!(retry_ms = ms, "server updated reconnection time");
                },
                SseItem::LineTooLong { limit } => {
                    tracing::warn!(limit, "oversized line discarded");
                    events.push(ChannelEvent::Error {
                        is_open: self.ready_state == ReadyState::Open,
                    });
                },
            }
        }

        events
    }

    /// Connection attempt failed or an open connection was lost.
    ///
    /// Moves back to connecting; the transport should wait
    /// [`EventChannel::reconnect_delay`] before trying again.
    pub fn handle_disconnect(&mut self) -> ChannelEvent {
        if self.ready_state == ReadyState::Closed {
            return ChannelEvent::Error { is_open: false };
        }
        self.ready_state = ReadyState::Connecting;
        self.failed_attempts = self.failed_attempts.saturating_add(1);
        ChannelEvent::Error { is_open: false }
    }

    /// Connection failed permanently. No further reconnects.
    pub fn handle_fatal(&mut self) -> ChannelEvent {
        self.close();
        ChannelEvent::Error { is_open: false }
    }

    /// Close the channel.
    pub fn close(&mut self) {
        self.ready_state = ReadyState::Closed;
    }

    /// Delay before the next reconnect attempt.
    ///
    /// Doubles with each consecutive failure starting from the base
    /// reconnection time (never less than [`MIN_RECONNECT_DELAY`]), capped at
    /// the configured maximum. A base larger than the cap is honoured as is.
    pub fn reconnect_delay(&self) -> Duration {
        let base = self.reconnection_time.max(MIN_RECONNECT_DELAY);
        let exponent = self.failed_attempts.saturating_sub(1).min(16);
        let backoff = base.saturating_mul(1u32 << exponent);
        backoff.min(self.config.max_backoff).max(base)
    }
}
