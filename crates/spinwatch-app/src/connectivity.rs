//! Connectivity monitor.
//!
//! Derives [`Connectivity`] purely from push channel lifecycle signals. Payload
//! traffic, or the lack of it, never moves connectivity; there is no timeout.

use spinwatch_client::ChannelEvent;

use crate::Connectivity;

/// Lifecycle signals the monitor understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleSignal {
    /// Channel (re)opened.
    Opened,
    /// Transport error.
    Error {
        /// Channel was still open when the error occurred.
        is_open: bool,
    },
}

impl LifecycleSignal {
    /// Lifecycle part of a channel event. `None` for frames.
    pub fn from_channel_event(event: &ChannelEvent) -> Option<Self> {
        match event {
            ChannelEvent::Opened => Some(Self::Opened),
            ChannelEvent::Error { is_open } => Some(Self::Error { is_open: *is_open }),
            ChannelEvent::Message { .. } => None,
        }
    }
}

/// Maps lifecycle signals to connectivity.
#[derive(Debug, Clone, Default)]
pub struct ConnectivityMonitor {
    current: Connectivity,
}

impl ConnectivityMonitor {
    /// Start at [`Connectivity::Unknown`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Current connectivity.
    pub fn current(&self) -> Connectivity {
        self.current
    }

    /// Observe a signal. Returns the new connectivity if it changed.
    ///
    /// An error while the channel is still open is a transient hiccup and
    /// never causes a transition.
    pub fn observe(&mut self, signal: LifecycleSignal) -> Option<Connectivity> {
        let next = match signal {
            LifecycleSignal::Opened => Connectivity::Online,
            LifecycleSignal::Error { is_open: false } => Connectivity::Offline,
            LifecycleSignal::Error { is_open: true } => return None,
        };

        if next == self.current {
            return None;
        }
        tracing::info!(from = ?self.current, to = ?next, "connectivity changed");
        self.current = next;
        Some(next)
    }
}
