//! Decode errors.

use thiserror::Error;

use crate::EventKind;

/// Result alias for payload decoding.
pub type Result<T> = std::result::Result<T, DecodeError>;

/// Why a single payload could not be turned into a typed value.
///
/// A decode error never ends the session: the caller drops the offending
/// frame and keeps its last-known-good state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Payload was empty or whitespace only.
    #[error("empty {kind} payload")]
    Empty {
        /// Event type the payload belonged to.
        kind: EventKind,
    },

    /// A field that must be an unsigned integer was not one.
    #[error("invalid integer {value:?} in {kind} payload")]
    InvalidInteger {
        /// Event type the payload belonged to.
        kind: EventKind,
        /// Offending field text.
        value: String,
    },

    /// Payload had the wrong number of comma-separated fields.
    #[error("{kind} payload has {found} fields, expected {expected}")]
    FieldCount {
        /// Event type the payload belonged to.
        kind: EventKind,
        /// Number of fields the format requires.
        expected: usize,
        /// Number of fields present.
        found: usize,
    },

    /// Every field of the payload decoded to "no update".
    #[error("{kind} payload carries no usable field")]
    NoUsableField {
        /// Event type the payload belonged to.
        kind: EventKind,
    },
}

impl DecodeError {
    /// Event type of the payload that failed to decode.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Empty { kind }
            | Self::InvalidInteger { kind, .. }
            | Self::FieldCount { kind, .. }
            | Self::NoUsableField { kind } => *kind,
        }
    }
}
