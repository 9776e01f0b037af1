//! Application input events.
//!
//! This module defines [`AppEvent`], the set of inputs that drive the
//! [`crate::App`] state machine.
//!
//! Events originate from two distinct sources:
//! - User interactions (keyboard, resize) and system ticks.
//! - Push channel traffic, already decoded by the [`crate::Bridge`].

use crate::{KeyInput, TelemetryEvent};

/// Events processed by the App state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// Keyboard input.
    Key(KeyInput),

    /// Periodic tick.
    Tick,

    /// Terminal resize (columns, rows).
    Resize(u16, u16),

    /// Telemetry channel (re)opened.
    ChannelOpened,

    /// Telemetry channel transport error.
    ChannelError {
        /// Channel was still open when the error occurred.
        is_open: bool,
    },

    /// Decoded telemetry value.
    Telemetry(TelemetryEvent),

    /// Diagnostic line for the debug pane.
    DebugLine(String),
}
