//! Driver trait for abstracting I/O operations.
//!
//! The [`Driver`] trait decouples the application runtime from specific I/O
//! implementations. Each frontend implements the trait to provide
//! platform-specific I/O, while the generic [`crate::Runtime`] handles all
//! orchestration.

use std::future::Future;

use spinwatch_client::{ChannelEvent, ChannelId, TransportError};

use crate::{KeyInput, ViewSnapshot};

/// Raw input delivered by a driver, before decoding.
#[derive(Debug, Clone, PartialEq)]
pub enum DriverInput {
    /// Keyboard input.
    Key(KeyInput),
    /// Terminal resize (columns, rows).
    Resize(u16, u16),
    /// Periodic tick.
    Tick,
    /// Lifecycle signal or frame from a push channel.
    Channel {
        /// Channel the event came from.
        channel: ChannelId,
        /// The event itself.
        event: ChannelEvent,
    },
    /// Outcome of the one-shot initial rotation count fetch. `Ok` carries
    /// the raw response body.
    InitialRotations(Result<String, TransportError>),
}

/// Abstracts I/O operations for the application runtime.
///
/// Implementations provide platform-specific I/O while the generic
/// [`Runtime`](crate::Runtime) handles orchestration logic. This ensures
/// the same orchestration code runs in the terminal UI and in simulation.
///
/// # Implementations
///
/// - **TUI**: crossterm for terminal events, reqwest for push channels
/// - **Simulation**: scripted input queue with captured renders
pub trait Driver: Send {
    /// Platform-specific error type.
    type Error: std::error::Error + Send + 'static;

    /// Wait for the next input.
    ///
    /// Returns `None` once the input source is exhausted, which ends the run.
    fn next_input(
        &mut self,
    ) -> impl Future<Output = Result<Option<DriverInput>, Self::Error>> + Send;

    /// Start a push channel. Its events arrive later through
    /// [`next_input`](Driver::next_input) tagged with `channel`.
    ///
    /// # Errors
    ///
    /// Returns an error if the channel cannot be started at all, for
    /// example when the endpoint is not a valid URL.
    fn open_channel(&mut self, channel: ChannelId, endpoint: &str) -> Result<(), TransportError>;

    /// Start the one-shot initial rotation count fetch. The result arrives
    /// later as [`DriverInput::InitialRotations`].
    fn fetch_initial_rotations(&mut self, url: &str);

    /// Render a snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    fn render(&mut self, snapshot: &ViewSnapshot) -> Result<(), Self::Error>;

    /// Close every channel and clean up resources.
    fn stop(&mut self);
}
