//! Named event types carried on the push channel.

use std::fmt;

/// Event types the rotation server emits.
///
/// The SSE `event:` field selects one of these. Frames with any other name
/// are not part of the telemetry contract and are ignored by subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Cumulative rotation count as decimal text.
    Rotation,
    /// `"<current>,<max>,<average>"` speed snapshot.
    Speed,
    /// `"<0|1>,<ms>"` rotating flag and stall duration.
    State,
    /// Free-text diagnostics. Never folded into the view model.
    Debug,
}

impl EventKind {
    /// Event types that feed the view model.
    pub const TELEMETRY: [Self; 3] = [Self::Rotation, Self::Speed, Self::State];

    /// Wire name used in the SSE `event:` field.
    pub fn name(self) -> &'static str {
        match self {
            Self::Rotation => "rotation",
            Self::Speed => "speed",
            Self::State => "state",
            Self::Debug => "debug",
        }
    }

    /// Look up an event type by its wire name. Matching is exact.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "rotation" => Some(Self::Rotation),
            "speed" => Some(Self::Speed),
            "state" => Some(Self::State),
            "debug" => Some(Self::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
