//! Push channel client
//!
//! Owns one long-lived Server-Sent Events connection per endpoint and turns
//! the byte stream into lifecycle signals and named-event messages.
//!
//! # Architecture
//!
//! The [`EventChannel`] is a Sans-IO state machine: the caller reports
//! connection outcomes and feeds received bytes, and the channel returns
//! [`ChannelEvent`]s plus the delay to wait before the next reconnect. It
//! tracks the EventSource ready state, the last event ID and the server's
//! `retry:` hint, and filters frames down to subscribed event types.
//!
//! # Transport (optional)
//!
//! With the `transport` feature enabled, this crate also provides:
//! - [`transport::open`]: spawn a reqwest-backed connection task that
//!   reconnects with backoff and delivers events on an mpsc channel
//! - [`transport::fetch_text`]: one-shot GET used for the initial snapshot

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod channel;
mod config;
mod error;
mod event;

#[cfg(feature = "transport")]
pub mod transport;

pub use channel::{EventChannel, MIN_RECONNECT_DELAY};
pub use config::ChannelConfig;
pub use error::TransportError;
pub use event::{ChannelEvent, ChannelId, ReadyState};
pub use spinwatch_proto::EventKind;
