//! Transport-to-Application translation layer.
//!
//! The [`Bridge`] turns raw [`DriverInput`] into [`AppEvent`]s.
//!
//! # Responsibilities
//!
//! - Routes telemetry channel lifecycle to the connectivity events and keeps
//!   debug channel lifecycle out of them.
//! - Decodes `rotation`, `speed` and `state` frames. A malformed frame is
//!   dropped, logged, and reported as a debug line; it never reaches the
//!   reconciler.
//! - Decodes the initial rotation count snapshot.

use spinwatch_client::{ChannelEvent, ChannelId, EventKind, TransportError};
use spinwatch_proto::{DecodeError, decode_rotation, decode_speed, decode_state};

use crate::{AppEvent, DriverInput, TelemetryEvent};

/// Decodes driver input into App events.
#[derive(Debug, Default)]
pub struct Bridge {
    dropped_frames: u64,
}

impl Bridge {
    /// Create a new Bridge.
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames dropped as malformed so far.
    pub fn dropped_frames(&self) -> u64 {
        self.dropped_frames
    }

    /// Translate one driver input.
    pub fn handle_input(&mut self, input: DriverInput) -> Vec<AppEvent> {
        match input {
            DriverInput::Key(key) => vec![AppEvent::Key(key)],
            DriverInput::Resize(cols, rows) => vec![AppEvent::Resize(cols, rows)],
            DriverInput::Tick => vec![AppEvent::Tick],
            DriverInput::Channel { channel, event } => self.handle_channel(channel, event),
            DriverInput::InitialRotations(result) => self.handle_initial(result),
        }
    }

    fn handle_channel(&mut self, channel: ChannelId, event: ChannelEvent) -> Vec<AppEvent> {
        match (channel, event) {
            (ChannelId::Telemetry, ChannelEvent::Opened) => vec![AppEvent::ChannelOpened],
            (ChannelId::Telemetry, ChannelEvent::Error { is_open }) => {
                vec![AppEvent::ChannelError { is_open }]
            },
            (ChannelId::Debug, ChannelEvent::Opened) => {
                tracing::debug!("debug channel opened");
                vec![AppEvent::DebugLine("[client] debug channel open".to_string())]
            },
            (ChannelId::Debug, ChannelEvent::Error { is_open }) => {
                tracing::debug!(is_open, "debug channel error");
                let line = if is_open {
                    "[client] debug channel error"
                } else {
                    "[client] debug channel lost, reconnecting"
                };
                vec![AppEvent::DebugLine(line.to_string())]
            },
            (_, ChannelEvent::Message { event_type, data }) => self.handle_frame(&event_type, data),
        }
    }

    fn handle_frame(&mut self, event_type: &str, data: String) -> Vec<AppEvent> {
        let Some(kind) = EventKind::from_name(event_type) else {
            tracing::trace!(event_type, "ignoring unknown event type");
            return vec![];
        };

        let decoded = match kind {
            EventKind::Debug => return vec![AppEvent::DebugLine(data)],
            EventKind::Rotation => decode_rotation(&data).map(TelemetryEvent::Rotation),
            EventKind::Speed => decode_speed(&data).map(TelemetryEvent::Speed),
            EventKind::State => decode_state(&data).map(TelemetryEvent::State),
        };

        match decoded {
            Ok(event) => vec![AppEvent::Telemetry(event)],
            Err(error) => vec![self.dropped(&error, &data)],
        }
    }

    fn handle_initial(&mut self, result: Result<String, TransportError>) -> Vec<AppEvent> {
        let body = match result {
            Ok(body) => body,
            Err(error) => {
                tracing::warn!(%error, "initial rotation count unavailable");
                return vec![AppEvent::DebugLine(format!(
                    "[client] initial rotation count unavailable: {error}"
                ))];
            },
        };

        match decode_rotation(&body) {
            Ok(count) => vec![AppEvent::Telemetry(TelemetryEvent::InitialRotations(count))],
            Err(error) => vec![self.dropped(&error, &body)],
        }
    }

    fn dropped(&mut self, error: &DecodeError, payload: &str) -> AppEvent {
        self.dropped_frames = self.dropped_frames.saturating_add(1);
        tracing::warn!(%error, payload, "dropping malformed frame");
        AppEvent::DebugLine(format!("[client] dropped {} frame: {error}", error.kind()))
    }
}
