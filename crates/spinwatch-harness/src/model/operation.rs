//! Operations for model-based testing.
//!
//! Operations represent everything the server, the network and the user can
//! do to one client. They are generated randomly by proptest and applied to
//! both the reference model and the real client.

/// One speed field as the server might send it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeedField {
    /// Empty field.
    Missing,
    /// Valid reading, in quarter units so it prints exactly.
    Quarters(u16),
    /// Negative reading.
    Negative,
    /// `nan` on the wire.
    NotANumber,
}

impl SpeedField {
    /// Wire text for this field.
    pub fn encode(self) -> String {
        match self {
            Self::Missing => String::new(),
            Self::Quarters(q) => format!("{}", f64::from(q) / 4.0),
            Self::Negative => "-1.5".to_string(),
            Self::NotANumber => "nan".to_string(),
        }
    }

    /// Value the client should take from this field. `None` keeps the old one.
    pub fn value(self) -> Option<f64> {
        match self {
            Self::Quarters(q) => Some(f64::from(q) / 4.0),
            Self::Missing | Self::Negative | Self::NotANumber => None,
        }
    }
}

/// Frame payloads that must be rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Malformed {
    /// Non-numeric rotation count.
    Rotation,
    /// Too many speed fields.
    SpeedFieldCount,
    /// Speed frame without a single usable field.
    SpeedUnusable,
    /// State frame with one field.
    StateFieldCount,
    /// State frame with a non-numeric duration.
    StateDuration,
}

impl Malformed {
    /// Event type and payload for this malformed frame.
    pub fn frame(self) -> (&'static str, &'static str) {
        match self {
            Self::Rotation => ("rotation", "12a"),
            Self::SpeedFieldCount => ("speed", "1,2,3,4"),
            Self::SpeedUnusable => ("speed", ",-2,"),
            Self::StateFieldCount => ("state", "1"),
            Self::StateDuration => ("state", "0,soon"),
        }
    }
}

/// Operations that can be applied to the system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Telemetry connection accepted.
    OpenTelemetry,
    /// Telemetry connection dropped.
    LoseTelemetry,
    /// Server sent a line the client refuses to buffer.
    OversizedLine,
    /// `rotation` frame.
    Rotation(u32),
    /// `speed` frame.
    Speed {
        /// Current speed field.
        current: SpeedField,
        /// Max speed field.
        max: SpeedField,
        /// Average speed field.
        average: SpeedField,
    },
    /// `state` frame.
    State {
        /// Rotating flag.
        rotating: bool,
        /// Milliseconds since last movement.
        ms: u16,
    },
    /// Frame that fails to decode.
    Malformed(Malformed),
    /// Frame of a type nobody subscribed to.
    Unsubscribed,
    /// Initial rotation count snapshot arrives.
    InitialSnapshot(u32),
    /// Initial rotation count fetch fails.
    InitialSnapshotFailed,
    /// Diagnostic line on the debug channel.
    DebugMessage(String),
    /// Debug channel dropped.
    LoseDebug,
    /// User toggles the debug pane.
    ToggleDebug,
    /// Periodic tick.
    Tick,
}
