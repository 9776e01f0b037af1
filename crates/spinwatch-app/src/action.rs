//! Application side-effects and intents.
//!
//! This module defines the [`AppAction`] enum, which represents instructions
//! produced by the [`crate::App`] state machine for the runtime to execute.

use spinwatch_client::ChannelId;

/// Actions produced by the App state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    /// Render a fresh snapshot.
    Render,

    /// Quit the application.
    Quit,

    /// Open a push channel.
    OpenChannel {
        /// Which channel this is.
        channel: ChannelId,
        /// Absolute endpoint URL.
        endpoint: String,
    },

    /// Fetch the initial rotation count once.
    FetchInitialRotations {
        /// Absolute URL of the snapshot endpoint.
        url: String,
    },
}
