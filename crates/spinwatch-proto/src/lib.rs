//! Wire format for the spinwatch telemetry stream.
//!
//! The rotation server pushes a `text/event-stream` where every frame carries a
//! named event type and a short textual payload. This crate owns both halves of
//! turning those bytes into typed values:
//!
//! - [`sse`]: incremental Server-Sent Events framing (line splitting, field
//!   parsing, dispatch on blank lines).
//! - [`payloads`]: per-event-type payload decoders (`rotation`, `speed`,
//!   `state`).
//!
//! Nothing here performs I/O or keeps session state beyond the SSE line
//! buffer, so every function is safe to fuzz and property-test directly.
//!
//! # Invariants
//!
//! - Decoders never panic. Every input either yields a typed value or a
//!   [`DecodeError`].
//! - A decoded speed field is either finite and non-negative, or `None`.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod errors;
pub mod event;
pub mod payloads;
pub mod sse;

pub use errors::{DecodeError, Result};
pub use event::EventKind;
pub use payloads::{RotationState, SpeedSample, decode_rotation, decode_speed, decode_state};
pub use sse::{SseEvent, SseItem, SseParser};
